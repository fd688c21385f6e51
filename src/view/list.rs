use crate::{
    api::{ApiClient, ApiError},
    management::state::{Action, Store},
    types::{ListParams, Movie, MovieListResponse, SortField, SortOrder},
    view::pagination,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored(ApiError),
}

/// What the listing asks the backend for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    List(ListParams),
    Search(String),
}

impl ListRequest {
    pub async fn run(&self, client: &ApiClient) -> Result<MovieListResponse, ApiError> {
        match self {
            ListRequest::List(params) => client.list_movies(params).await,
            ListRequest::Search(text) => client.search_movies(text).await,
        }
    }
}

/// Sorted, searchable, paginated movie listing with a detail overlay.
///
/// A non-empty search replaces the sorted listing; clearing it brings the
/// sorted listing back. Search results come as a single page.
#[derive(Debug, Clone)]
pub struct ListView {
    sort: SortField,
    order: SortOrder,
    search: String,
    page: u64,
    limit: u64,
    movies: Vec<Movie>,
    total: u64,
    status: ViewStatus,
    detail: Option<Movie>,
}

impl ListView {
    pub fn new(limit: u64) -> Self {
        Self {
            sort: SortField::Year,
            order: SortOrder::Desc,
            search: String::new(),
            page: 1,
            limit: limit.max(1),
            movies: Vec::new(),
            total: 0,
            status: ViewStatus::Idle,
            detail: None,
        }
    }

    pub fn with_sort(mut self, sort: SortField, order: SortOrder) -> Self {
        self.sort = sort;
        self.order = order;
        self
    }

    /// Starts on `page` without clamping; the total is unknown before the first load.
    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sorts by title and flips the direction on every call.
    pub fn toggle_title_sort(&mut self) {
        self.sort = SortField::Title;
        self.order = self.order.flip();
        self.page = 1;
    }

    pub fn sort_label(&self) -> &'static str {
        if self.sort == SortField::Title && self.order == SortOrder::Asc {
            "Z → A"
        } else {
            "A → Z"
        }
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_string();
        self.page = 1;
    }

    pub fn clear_search(&mut self) {
        self.set_search("");
    }

    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }

    /// Moves to `page`, clamped to the pages that exist. Returns whether the
    /// page changed. Ignored while searching.
    pub fn set_page(&mut self, page: u64) -> bool {
        if self.is_searching() {
            return false;
        }
        let page = pagination::clamp_page(page, self.total, self.limit);
        let changed = page != self.page;
        self.page = page;
        changed
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn request(&self) -> ListRequest {
        if self.is_searching() {
            ListRequest::Search(self.search.clone())
        } else {
            ListRequest::List(ListParams {
                sort: self.sort,
                order: self.order,
                limit: self.limit,
                offset: pagination::offset(self.page, self.limit),
            })
        }
    }

    /// Enters `Loading` and returns the request to run.
    pub fn begin(&mut self, store: &mut Store) -> ListRequest {
        let request = self.request();
        self.status = ViewStatus::Loading;
        if let ListRequest::Search(text) = &request {
            store.dispatch(Action::SearchStarted(text.clone()));
        }
        request
    }

    /// Applies the outcome of `request`. Results for a request that no longer
    /// matches the view's parameters are dropped; returns whether it was applied.
    pub fn apply(
        &mut self,
        store: &mut Store,
        request: &ListRequest,
        outcome: Result<MovieListResponse, ApiError>,
    ) -> bool {
        if *request != self.request() {
            tracing::debug!(?request, "dropping response for outdated parameters");
            return false;
        }

        match outcome {
            Ok(response) => {
                self.total = response.meta.total;
                self.movies = response.data;
                self.status = ViewStatus::Loaded;
                if let ListRequest::Search(_) = request {
                    store.dispatch(Action::SearchFetched {
                        results: self.movies.clone(),
                        total_results: self.total,
                        page: 1,
                        total_pages: u64::from(self.total > 0),
                    });
                }
            }
            Err(err) => {
                self.status = ViewStatus::Errored(err);
            }
        }
        true
    }

    pub async fn load(&mut self, store: &mut Store, client: &ApiClient) -> &ViewStatus {
        let request = self.begin(store);
        let outcome = request.run(client).await;
        self.apply(store, &request, outcome);
        &self.status
    }

    /// Fetches one movie and opens it in the detail overlay.
    pub async fn open_detail(&mut self, client: &ApiClient, id: u64) -> Result<&Movie, ApiError> {
        self.detail = None;
        let movie = client.get_movie(id).await?;
        Ok(self.detail.insert(movie))
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&Movie> {
        self.detail.as_ref()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Pages available for the sorted listing; search results are one page.
    pub fn page_count(&self) -> u64 {
        if self.is_searching() {
            u64::from(self.total > 0)
        } else {
            pagination::page_count(self.total, self.limit)
        }
    }

    pub fn pager_visible(&self) -> bool {
        !self.is_searching() && pagination::is_visible(self.total, self.limit)
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> (SortField, SortOrder) {
        (self.sort, self.order)
    }
}
