use std::{sync::Arc, time::Duration};

use httpmock::prelude::*;
use moviefan::api::{ApiClient, ApiError, SEARCH_LIMIT};
use moviefan::cli::ListOptions;
use moviefan::config::parse_api_url;
use moviefan::management::{CookieAccess, MemoryCookies, Store};
use moviefan::types::{ListParams, Meta, MovieListResponse, SortField, SortOrder};
use moviefan::view::pagination::{
    ADMIN_PAGE_SIZE, DEFAULT_PAGE_SIZE, HOME_PAGE_SIZE, clamp_page, is_visible, offset, page_count, range_label,
};
use moviefan::view::{LatestRequest, ListRequest, ListView, ViewStatus};
use serde_json::json;

fn store() -> Store {
    Store::bootstrap(Arc::new(MemoryCookies::new()))
}

fn page_of(total: u64) -> MovieListResponse {
    MovieListResponse {
        data: Vec::new(),
        meta: Meta { total },
    }
}

#[test]
fn test_page_count() {
    assert_eq!(page_count(23, 5), 5);
    assert_eq!(page_count(25, 5), 5);
    assert_eq!(page_count(26, 5), 6);
    assert_eq!(page_count(0, 5), 0);
    assert_eq!(page_count(10, 0), 0);
}

#[test]
fn test_offsets_and_visibility() {
    assert_eq!(offset(1, HOME_PAGE_SIZE), 0);
    assert_eq!(offset(3, ADMIN_PAGE_SIZE), 10);
    assert_eq!(offset(0, 5), 0);

    assert!(!is_visible(0, 5));
    assert!(!is_visible(5, 5));
    assert!(is_visible(6, 5));

    assert_eq!(clamp_page(9, 23, 5), 5);
    assert_eq!(clamp_page(0, 23, 5), 1);
    assert_eq!(clamp_page(4, 0, 5), 1);
}

#[test]
fn test_range_label() {
    assert_eq!(range_label(2, 5, 23), "6 to 10 of 23 items");
    assert_eq!(range_label(5, 5, 23), "21 to 23 of 23 items");
    assert_eq!(range_label(1, 5, 0), "0 of 0 items");
}

#[test]
fn test_default_request_is_newest_first() {
    let view = ListView::new(HOME_PAGE_SIZE);
    assert_eq!(
        view.request(),
        ListRequest::List(ListParams {
            sort: SortField::Year,
            order: SortOrder::Desc,
            limit: 9,
            offset: 0,
        })
    );
    assert_eq!(view.status(), &ViewStatus::Idle);
}

#[test]
fn test_unsized_requests_use_backend_page_size() {
    assert_eq!(ListParams::default().limit, DEFAULT_PAGE_SIZE);
    assert_eq!(SEARCH_LIMIT, DEFAULT_PAGE_SIZE);
}

#[test]
fn test_management_listing_pages_by_five() {
    let options = ListOptions {
        page: 3,
        ..ListOptions::management()
    };
    assert!(options.manage);

    let view = options.view();
    assert_eq!(
        view.request(),
        ListRequest::List(ListParams {
            sort: SortField::Year,
            order: SortOrder::Desc,
            limit: ADMIN_PAGE_SIZE,
            offset: 10,
        })
    );
    assert!(!ListOptions::default().manage);
    assert_eq!(ListOptions::default().limit, HOME_PAGE_SIZE);
}

#[test]
fn test_title_toggle_flips_order_and_label() {
    let mut view = ListView::new(5);
    assert_eq!(view.sort_label(), "A → Z");

    view.toggle_title_sort();
    assert_eq!(view.sort(), (SortField::Title, SortOrder::Asc));
    assert_eq!(view.sort_label(), "Z → A");

    view.toggle_title_sort();
    assert_eq!(view.sort(), (SortField::Title, SortOrder::Desc));
    assert_eq!(view.sort_label(), "A → Z");
}

#[test]
fn test_search_supersedes_sort_and_clearing_restores_it() {
    let mut view = ListView::new(5);
    let mut store = store();
    view.toggle_title_sort();

    view.set_search("  bogart ");
    assert_eq!(view.request(), ListRequest::Search("bogart".to_string()));

    view.begin(&mut store);
    assert_eq!(store.state().search.query, "bogart");
    assert!(store.state().search.is_loading);

    view.clear_search();
    assert_eq!(
        view.request(),
        ListRequest::List(ListParams {
            sort: SortField::Title,
            order: SortOrder::Asc,
            limit: 5,
            offset: 0,
        })
    );
}

#[test]
fn test_paging_is_clamped_to_known_pages() {
    let mut view = ListView::new(5);
    let mut store = store();

    let request = view.begin(&mut store);
    assert!(view.apply(&mut store, &request, Ok(page_of(23))));
    assert_eq!(view.page_count(), 5);
    assert!(view.pager_visible());

    assert!(view.set_page(7));
    assert_eq!(view.page(), 5);
    assert!(!view.next_page());
    assert!(view.prev_page());
    assert_eq!(view.page(), 4);

    view.toggle_title_sort();
    assert_eq!(view.page(), 1);
}

#[test]
fn test_empty_catalog_hides_pager() {
    let mut view = ListView::new(5);
    let mut store = store();

    let request = view.begin(&mut store);
    view.apply(&mut store, &request, Ok(page_of(0)));

    assert_eq!(view.page_count(), 0);
    assert!(!view.pager_visible());
    assert!(!view.set_page(3));
    assert_eq!(view.page(), 1);
}

#[test]
fn test_outdated_response_is_dropped() {
    let mut view = ListView::new(5);
    let mut store = store();

    let old = view.begin(&mut store);
    view.set_search("heat");
    let current = view.begin(&mut store);

    assert!(!view.apply(&mut store, &old, Ok(page_of(40))));
    assert_eq!(view.status(), &ViewStatus::Loading);

    assert!(view.apply(&mut store, &current, Ok(page_of(1))));
    assert_eq!(view.status(), &ViewStatus::Loaded);
    assert_eq!(store.state().search.total_results, 1);
    assert!(!store.state().search.is_loading);
}

#[test]
fn test_failed_load_is_errored() {
    let mut view = ListView::new(5);
    let mut store = store();

    let request = view.begin(&mut store);
    view.apply(&mut store, &request, Err(ApiError::Network("down".to_string())));

    assert!(matches!(view.status(), ViewStatus::Errored(ApiError::Network(_))));
}

#[tokio::test]
async fn test_load_and_open_detail() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/movies").query_param("limit", "9");
            then.status(200).json_body(json!({
                "data": [{ "id": 5, "title": "Heat", "year": 1995, "format": "DVD", "actors": [] }],
                "meta": { "total": 1 }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/movies/5");
            then.status(200).json_body(json!({
                "data": { "id": 5, "title": "Heat", "year": 1995, "format": "DVD",
                          "actors": [{ "id": 1, "name": "Al Pacino" }] }
            }));
        })
        .await;

    let cookies: Arc<dyn CookieAccess> = Arc::new(MemoryCookies::new());
    let client = ApiClient::new(parse_api_url(&server.base_url()).unwrap(), Arc::clone(&cookies))
        .unwrap();
    let mut store = Store::bootstrap(cookies);
    let mut view = ListView::new(HOME_PAGE_SIZE);

    assert_eq!(view.load(&mut store, &client).await, &ViewStatus::Loaded);
    assert_eq!(view.movies().len(), 1);
    assert!(!view.pager_visible());

    let movie = view.open_detail(&client, 5).await.unwrap();
    assert_eq!(movie.actors, vec!["Al Pacino"]);
    assert!(view.detail().is_some());

    view.close_detail();
    assert!(view.detail().is_none());
}

#[tokio::test]
async fn test_latest_request_aborts_superseded_load() {
    let mut latest: LatestRequest<&'static str> = LatestRequest::new();

    let first = latest.issue(async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "slow"
    });
    let second = latest.issue(async { "fast" });

    assert!(first < second);
    assert!(latest.is_current(second));
    assert!(!latest.is_current(first));
    assert_eq!(latest.settle().await, Some((second, "fast")));
    assert!(!latest.is_pending());
    assert_eq!(latest.settle().await, None);
}

#[tokio::test]
async fn test_latest_request_cancel() {
    let mut latest: LatestRequest<u8> = LatestRequest::default();
    latest.issue(async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        1
    });

    latest.cancel();
    assert!(!latest.is_pending());
    assert_eq!(latest.current(), 1);
}

#[tokio::test]
async fn test_management_listing_requests_admin_pages() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/movies")
                .query_param("limit", "5")
                .query_param("offset", "5");
            then.status(200).json_body(json!({
                "data": [{ "id": 9, "title": "Ran", "year": 1985, "format": "VHS", "actors": [] }],
                "meta": { "total": 23 }
            }));
        })
        .await;

    let cookies: Arc<dyn CookieAccess> = Arc::new(MemoryCookies::new());
    let client = ApiClient::new(parse_api_url(&server.base_url()).unwrap(), Arc::clone(&cookies))
        .unwrap();
    let mut store = Store::bootstrap(cookies);
    let mut view = ListOptions {
        page: 2,
        ..ListOptions::management()
    }
    .view();

    assert_eq!(view.load(&mut store, &client).await, &ViewStatus::Loaded);
    mock.assert_async().await;
    assert_eq!(view.page_count(), 5);
    assert_eq!(range_label(view.page(), view.limit(), view.total()), "6 to 10 of 23 items");
}
