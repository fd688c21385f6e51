use moviefan::api::{QueryCache, QueryKey, Tag};
use serde_json::json;

fn listing(page: u64) -> QueryKey {
    QueryKey::new("movies")
        .param("sort", "year")
        .param("offset", page * 10)
}

#[test]
fn test_key_params_are_normalized() {
    let a = QueryKey::new("movies").param("sort", "year").param("order", "DESC");
    let b = QueryKey::new("movies").param("order", "DESC").param("sort", "year");

    assert_eq!(a, b);
    assert_eq!(a.to_string(), "movies?order=DESC&sort=year");
    assert_eq!(QueryKey::new("movies/3").to_string(), "movies/3");
}

#[test]
fn test_invalidate_returns_stale_keys() {
    let mut cache = QueryCache::new();
    cache.insert(listing(0), &[Tag::Movie], json!({ "page": 0 }));
    cache.insert(listing(1), &[Tag::Movie], json!({ "page": 1 }));
    cache.insert(QueryKey::new("sessions"), &[Tag::Auth], json!({}));

    let stale = cache.invalidate(&[Tag::Movie]);

    assert_eq!(stale, vec![listing(0), listing(1)]);
    assert!(!cache.contains(&listing(0)));
    assert!(cache.contains(&QueryKey::new("sessions")));
    assert!(cache.keys_for(Tag::Movie).is_empty());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_invalidating_unused_tag_is_empty() {
    let mut cache = QueryCache::new();
    cache.insert(listing(0), &[Tag::Movie], json!(null));

    assert!(cache.invalidate(&[Tag::Auth]).is_empty());
    assert!(cache.contains(&listing(0)));
}

#[test]
fn test_reinsert_replaces_tags() {
    let mut cache = QueryCache::new();
    cache.insert(listing(0), &[Tag::Movie], json!(1));
    cache.insert(listing(0), &[Tag::Auth], json!(2));

    assert!(cache.keys_for(Tag::Movie).is_empty());
    assert_eq!(cache.keys_for(Tag::Auth), vec![listing(0)]);
    assert_eq!(cache.get(&listing(0)), Some(&json!(2)));
}

#[test]
fn test_response_started_before_invalidation_is_discarded() {
    let mut cache = QueryCache::new();
    let started = cache.generation();

    cache.invalidate(&[Tag::Movie]);

    assert!(!cache.insert_if_current(started, listing(0), &[Tag::Movie], json!("old")));
    assert!(cache.is_empty());

    let now = cache.generation();
    assert!(cache.insert_if_current(now, listing(0), &[Tag::Movie], json!("new")));
    assert!(cache.fetched_at(&listing(0)).is_some());
}

#[test]
fn test_reset_drops_everything() {
    let mut cache = QueryCache::new();
    cache.insert(listing(0), &[Tag::Movie], json!(1));
    cache.insert(QueryKey::new("sessions"), &[Tag::Auth], json!(2));
    let before = cache.generation();

    cache.reset();

    assert!(cache.is_empty());
    assert!(cache.generation() > before);
}
