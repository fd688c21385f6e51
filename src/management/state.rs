use std::sync::Arc;

use crate::{
    management::cookies::{ACCESS_TOKEN, CookieAccess, has_session},
    types::Movie,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
}

/// Results of the most recent free-text search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Movie>,
    pub total_results: u64,
    pub page: u64,
    pub total_pages: u64,
    pub is_loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub search: SearchState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetAuthenticated,
    ClearAuthenticated,
    SearchStarted(String),
    SearchFetched {
        results: Vec<Movie>,
        total_results: u64,
        page: u64,
        total_pages: u64,
    },
    SearchReset,
}

pub fn reduce_auth(state: AuthState, action: &Action) -> AuthState {
    match action {
        Action::SetAuthenticated => AuthState {
            is_authenticated: true,
        },
        Action::ClearAuthenticated => AuthState {
            is_authenticated: false,
        },
        _ => state,
    }
}

pub fn reduce_search(state: SearchState, action: &Action) -> SearchState {
    match action {
        Action::SearchStarted(query) => SearchState {
            query: query.clone(),
            is_loading: true,
            ..state
        },
        Action::SearchFetched {
            results,
            total_results,
            page,
            total_pages,
        } => SearchState {
            results: results.clone(),
            total_results: *total_results,
            page: *page,
            total_pages: *total_pages,
            is_loading: false,
            ..state
        },
        Action::SearchReset => SearchState::default(),
        _ => state,
    }
}

pub fn reduce(state: AppState, action: &Action) -> AppState {
    AppState {
        auth: reduce_auth(state.auth, action),
        search: reduce_search(state.search, action),
    }
}

/// Single owner of the application state.
///
/// State only changes through [`Store::dispatch`]. The reducers stay pure; the
/// one side effect, deleting the session cookie on `ClearAuthenticated`, lives here.
pub struct Store {
    state: AppState,
    cookies: Arc<dyn CookieAccess>,
}

impl Store {
    pub fn new(cookies: Arc<dyn CookieAccess>) -> Self {
        Self {
            state: AppState::default(),
            cookies,
        }
    }

    /// Derives the authentication flag from the session cookie.
    ///
    /// Only presence is checked; a stale token counts as authenticated until
    /// the backend rejects it.
    pub fn bootstrap(cookies: Arc<dyn CookieAccess>) -> Self {
        let authenticated = has_session(cookies.as_ref());
        let mut store = Self::new(cookies);
        store.dispatch(if authenticated {
            Action::SetAuthenticated
        } else {
            Action::ClearAuthenticated
        });
        store
    }

    pub fn dispatch(&mut self, action: Action) {
        if action == Action::ClearAuthenticated {
            self.cookies.remove(ACCESS_TOKEN);
        }

        tracing::trace!(?action, "dispatch");
        self.state = reduce(std::mem::take(&mut self.state), &action);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.auth.is_authenticated
    }

    pub fn cookies(&self) -> &Arc<dyn CookieAccess> {
        &self.cookies
    }
}
