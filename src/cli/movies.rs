use std::path::PathBuf;

use crate::{
    api::ApiError,
    error, info,
    forms::{Field, FormErrors, ImportForm, MovieForm, SubmitError},
    route::App,
    success,
    types::{Format, SortField, SortOrder},
    utils,
    view::{ListView, ViewStatus, pagination},
    warning,
};

/// Options for the paged listing.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub sort: SortField,
    pub order: SortOrder,
    pub page: u64,
    pub limit: u64,
    pub search: Option<String>,
    /// Catalog management view: smaller pages, item range and edit/delete hints.
    pub manage: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            sort: SortField::Year,
            order: SortOrder::Desc,
            page: 1,
            limit: pagination::HOME_PAGE_SIZE,
            search: None,
            manage: false,
        }
    }
}

impl ListOptions {
    pub fn management() -> Self {
        Self {
            limit: pagination::ADMIN_PAGE_SIZE,
            manage: true,
            ..Self::default()
        }
    }

    pub fn view(&self) -> ListView {
        let mut view = ListView::new(self.limit)
            .with_sort(self.sort, self.order)
            .with_page(self.page);
        if let Some(search) = &self.search {
            view.set_search(search);
        }
        view
    }
}

/// Values typed on the command line for `add` and `edit`.
#[derive(Debug, Clone, Default)]
pub struct MovieInput {
    pub title: Option<String>,
    pub year: Option<String>,
    pub format: Option<String>,
    pub actors: Vec<String>,
}

pub async fn list_movies(app: &mut App, options: ListOptions) {
    let mut view = options.view();

    let pb = utils::spinner("Fetching movies...");
    let (store, client) = app.parts();
    view.load(store, client).await;

    // Requested page is past the end; show the last one instead.
    if view.page() > view.page_count() && view.page_count() > 0 && view.set_page(view.page()) {
        view.load(store, client).await;
    }
    pb.finish_and_clear();

    if let ViewStatus::Errored(err) = view.status() {
        error!("Cannot load movies. Err: {}", err);
    }

    if options.manage {
        render_management(&view);
    } else {
        render_listing(&view);
    }
}

/// The home route: first page, newest first.
pub async fn home(app: &mut App) {
    list_movies(app, ListOptions::default()).await
}

pub(crate) fn render_listing(view: &ListView) {
    if view.movies().is_empty() {
        if view.is_searching() {
            warning!("No movies match '{}'", view.search());
        } else {
            info!("No movies in the catalog yet");
        }
        return;
    }

    println!("{}", utils::movie_table(view.movies()));

    if view.is_searching() {
        info!(
            "{} result(s) for '{}'",
            view.movies().len(),
            view.search()
        );
    } else if view.pager_visible() {
        info!(
            "Page {} of {} ({})",
            view.page(),
            view.page_count(),
            pagination::range_label(view.page(), view.limit(), view.total())
        );
    }
}

fn render_management(view: &ListView) {
    if view.movies().is_empty() {
        render_listing(view);
        return;
    }

    println!("{}", utils::movie_table(view.movies()));
    if view.is_searching() {
        info!("{} result(s) for '{}'", view.movies().len(), view.search());
    } else {
        info!(
            "Page {} of {} ({})",
            view.page(),
            view.page_count(),
            pagination::range_label(view.page(), view.limit(), view.total())
        );
    }
    info!("Edit with 'moviefan edit <ID>', delete with 'moviefan delete <ID>'");
}

pub async fn show_movie(app: &App, id: u64) {
    let pb = utils::spinner(format!("Fetching movie {}...", id));
    let outcome = app.client().get_movie(id).await;
    pb.finish_and_clear();

    match outcome {
        Ok(movie) => println!("{}", utils::detail_table(&movie)),
        Err(ApiError::NotFound) => error!("Movie {} not found", id),
        Err(e) => error!("Cannot load movie {}. Err: {}", id, e),
    }
}

pub async fn add_movie(app: &App, input: MovieInput) {
    warn_without_session(app);

    let mut form = MovieForm::new();
    form.title = match input.title {
        Some(title) => title,
        None => ask("Title"),
    };
    form.year = match input.year {
        Some(year) => year,
        None => ask("Year"),
    };
    form.format = match input.format {
        Some(format) => format,
        None => ask(&format!("Format ({})", format_choices())),
    };
    collect_actors(&mut form, input.actors);

    let pb = utils::spinner("Adding movie...");
    let outcome = form.submit_create(app.client()).await;
    pb.finish_and_clear();

    match outcome {
        Ok(created) => {
            success!("Movie added successfully!");
            if let Some(movie) = created {
                println!("{}", utils::detail_table(&movie));
            }
        }
        Err(e) => report(e),
    }
}

pub async fn import_movies(app: &App, file: PathBuf) {
    warn_without_session(app);

    let mut form = ImportForm::new(Some(file));
    let pb = utils::spinner("Importing movies...");
    let outcome = form.submit(app.client()).await;
    pb.finish_and_clear();

    match outcome {
        Ok(result) => success!(
            "Imported {} of {} movie(s)",
            result.meta.imported,
            result.meta.total
        ),
        Err(e) => report(e),
    }
}

pub async fn edit_movie(app: &App, id: u64, input: MovieInput) {
    warn_without_session(app);

    let pb = utils::spinner(format!("Fetching movie {}...", id));
    let current = app.client().get_movie(id).await;
    pb.finish_and_clear();

    let movie = match current {
        Ok(movie) => movie,
        Err(ApiError::NotFound) => error!("Movie {} not found", id),
        Err(e) => error!("Cannot load movie {}. Err: {}", id, e),
    };

    let mut form = MovieForm::from_movie(&movie);
    if let Some(title) = input.title {
        form.title = title;
    }
    if let Some(year) = input.year {
        form.year = year;
    }
    if let Some(format) = input.format {
        form.format = format;
    }
    if !input.actors.is_empty() {
        while form.remove_actor(0).is_some() {}
        for actor in &input.actors {
            form.push_actor(actor);
        }
    }

    let pb = utils::spinner("Saving movie...");
    let outcome = form.submit_edit(app.client(), id).await;
    pb.finish_and_clear();

    match outcome {
        Ok(_) => success!("Movie {} updated", id),
        Err(e) => report(e),
    }
}

pub async fn delete_movie(app: &App, id: u64, yes: bool) {
    warn_without_session(app);

    if !yes {
        match utils::confirm(&format!("Delete movie {}?", id)) {
            Ok(true) => {}
            Ok(false) => {
                info!("Nothing deleted");
                return;
            }
            Err(e) => error!("Cannot read confirmation. Err: {}", e),
        }
    }

    let pb = utils::spinner(format!("Deleting movie {}...", id));
    let outcome = app.client().delete_movie(id).await;
    pb.finish_and_clear();

    match outcome {
        Ok(()) => success!("Movie {} deleted", id),
        Err(ApiError::NotFound) => error!("Movie {} not found", id),
        Err(e) => error!("Failed to delete movie. Err: {}", e),
    }
}

fn warn_without_session(app: &App) {
    if !app.store().is_authenticated() {
        warning!("You are not logged in; the server may reject this request. Run moviefan login.");
    }
}

fn format_choices() -> String {
    Format::ALL
        .iter()
        .map(Format::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn ask(label: &str) -> String {
    match utils::prompt(label) {
        Ok(value) => value,
        Err(e) => error!("Cannot read input. Err: {}", e),
    }
}

/// Takes actors from the command line, or asks for them one per line until an
/// empty line.
fn collect_actors(form: &mut MovieForm, actors: Vec<String>) {
    if !actors.is_empty() {
        for actor in &actors {
            if !form.push_actor(actor) {
                warning!("Skipping actor '{}'", actor);
            }
        }
        return;
    }

    info!("Enter actors, one per line. Leave empty to finish.");
    loop {
        form.actor_input = ask("Actor");
        if form.actor_input.is_empty() {
            break;
        }
        if !form.add_actor() {
            warning!("Actor already added");
        }
    }
}

pub(crate) fn report_errors(errors: &FormErrors) {
    for (field, message) in errors.iter() {
        match field {
            Field::Form => warning!("{}", message),
            _ => warning!("{}: {}", field, message),
        }
    }
}

fn report(err: SubmitError) -> ! {
    match err {
        SubmitError::Invalid(errors) => {
            report_errors(&errors);
            error!("Nothing was saved");
        }
        SubmitError::Rejected { message, cause } => error!("{} Err: {}", message, cause),
    }
}
