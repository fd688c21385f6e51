use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    api::ApiError,
    cli::movies,
    error, info,
    route::App,
    types::MovieListResponse,
    utils,
    view::{LatestRequest, ListRequest, ListView, ViewStatus, pagination},
    warning,
};

type Loaded = (ListRequest, Result<MovieListResponse, ApiError>);

const HELP: &str = "/TEXT search | clear | sort | next | prev | page N | open ID | close | help | quit";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Search(String),
    ClearSearch,
    ToggleSort,
    Next,
    Prev,
    Page(u64),
    Open(u64),
    Close,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(text) = line.strip_prefix('/') {
        return Some(if text.trim().is_empty() {
            Input::ClearSearch
        } else {
            Input::Search(text.trim().to_string())
        });
    }

    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_lowercase();
    let argument = words.next().and_then(|word| word.parse::<u64>().ok());

    Some(match (command.as_str(), argument) {
        ("clear", _) => Input::ClearSearch,
        ("sort", _) => Input::ToggleSort,
        ("next" | "n", _) => Input::Next,
        ("prev" | "p", _) => Input::Prev,
        ("page", Some(page)) => Input::Page(page),
        ("open", Some(id)) => Input::Open(id),
        ("close", _) => Input::Close,
        ("help" | "?", _) => Input::Help,
        ("quit" | "q" | "exit", _) => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    })
}

/// Interactive listing. Each change of search, sort or page issues a new load;
/// a load still in flight is aborted so only the newest result is shown.
pub async fn browse(app: &mut App) {
    let mut view = ListView::new(pagination::HOME_PAGE_SIZE);
    let mut latest: LatestRequest<Loaded> = LatestRequest::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!("{}", HELP);
    reload(app, &mut view, &mut latest);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => error!("Cannot read input. Err: {}", e),
                };

                let Some(input) = parse_input(&line) else {
                    continue;
                };

                match input {
                    Input::Search(text) => {
                        view.set_search(&text);
                        reload(app, &mut view, &mut latest);
                    }
                    Input::ClearSearch => {
                        view.clear_search();
                        reload(app, &mut view, &mut latest);
                    }
                    Input::ToggleSort => {
                        view.toggle_title_sort();
                        info!("Sorted by title; next toggle: {}", view.sort_label());
                        reload(app, &mut view, &mut latest);
                    }
                    Input::Next => turn(app, &mut view, &mut latest, |view| view.next_page()),
                    Input::Prev => turn(app, &mut view, &mut latest, |view| view.prev_page()),
                    Input::Page(page) => turn(app, &mut view, &mut latest, |view| view.set_page(page)),
                    Input::Open(id) => match view.open_detail(app.client(), id).await {
                        Ok(movie) => println!("{}", utils::detail_table(movie)),
                        Err(ApiError::NotFound) => warning!("Movie {} not found", id),
                        Err(e) => warning!("Cannot load movie {}. Err: {}", id, e),
                    },
                    Input::Close => {
                        view.close_detail();
                        movies::render_listing(&view);
                    }
                    Input::Help => info!("{}", HELP),
                    Input::Quit => break,
                    Input::Unknown(text) => warning!("Unknown command '{}'. {}", text, HELP),
                }
            }
            Some((seq, (request, outcome))) = latest.settle(), if latest.is_pending() => {
                if !latest.is_current(seq) {
                    continue;
                }
                if view.apply(app.store_mut(), &request, outcome) {
                    match view.status() {
                        ViewStatus::Errored(e) => warning!("Cannot load movies. Err: {}", e),
                        _ => movies::render_listing(&view),
                    }
                }
            }
        }
    }

    latest.cancel();
}

fn reload(app: &mut App, view: &mut ListView, latest: &mut LatestRequest<Loaded>) {
    let request = view.begin(app.store_mut());
    let client = Arc::clone(app.client());
    let seq = latest.issue(async move {
        let outcome = request.run(&client).await;
        (request, outcome)
    });
    tracing::debug!(seq, "listing load issued");
}

fn turn(
    app: &mut App,
    view: &mut ListView,
    latest: &mut LatestRequest<Loaded>,
    change: impl FnOnce(&mut ListView) -> bool,
) {
    if view.is_searching() {
        warning!("Search results are a single page; clear the search to page through the catalog");
        return;
    }

    if change(view) {
        reload(app, view, latest);
    } else {
        info!("Already on page {} of {}", view.page(), view.page_count().max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_commands() {
        assert_eq!(parse_input("/matrix"), Some(Input::Search("matrix".into())));
        assert_eq!(parse_input("/  "), Some(Input::ClearSearch));
        assert_eq!(parse_input("page 3"), Some(Input::Page(3)));
        assert_eq!(parse_input("open 42"), Some(Input::Open(42)));
        assert_eq!(parse_input("SORT"), Some(Input::ToggleSort));
        assert_eq!(parse_input("q"), Some(Input::Quit));
        assert_eq!(parse_input("   "), None);
        assert_eq!(parse_input("page x"), Some(Input::Unknown("page x".into())));
    }
}
