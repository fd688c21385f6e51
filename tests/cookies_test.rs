use std::time::Duration;

use chrono::{TimeDelta, Utc};
use moviefan::management::cookies::{
    ACCESS_TOKEN, CookieAccess, CookieJar, MemoryCookies, SESSION_LIFETIME, StoredCookie,
    has_session, parse_cookie_header,
};

#[test]
fn test_memory_cookies_set_get_remove() {
    let cookies = MemoryCookies::new();
    assert_eq!(cookies.get(ACCESS_TOKEN), None);
    assert!(!has_session(&cookies));

    cookies.set(ACCESS_TOKEN, "abc", SESSION_LIFETIME);
    assert_eq!(cookies.get(ACCESS_TOKEN).as_deref(), Some("abc"));
    assert!(has_session(&cookies));

    cookies.remove(ACCESS_TOKEN);
    assert_eq!(cookies.get(ACCESS_TOKEN), None);
}

#[test]
fn test_expired_cookie_reads_as_absent() {
    let cookies = MemoryCookies::new();
    cookies.set(ACCESS_TOKEN, "abc", Duration::ZERO);

    assert_eq!(cookies.get(ACCESS_TOKEN), None);
    assert!(!has_session(&cookies));
}

#[test]
fn test_stored_cookie_expiry() {
    let cookie = StoredCookie::new("abc", Duration::from_secs(60));
    let now = Utc::now();

    assert!(!cookie.is_expired(now));
    assert!(cookie.is_expired(now + TimeDelta::seconds(120)));
}

#[test]
fn test_parse_cookie_header() {
    let cookies = parse_cookie_header("ACCESS_TOKEN=ey.J=; theme = dark ;=orphan; broken");

    assert_eq!(cookies.len(), 2);
    assert_eq!(cookies.get("ACCESS_TOKEN").map(String::as_str), Some("ey.J="));
    assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
}

#[tokio::test]
async fn test_jar_persists_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cookies.json");

    let jar = CookieJar::open(path.clone()).await.unwrap();
    assert_eq!(jar.get(ACCESS_TOKEN), None);

    jar.set(ACCESS_TOKEN, "token-1", SESSION_LIFETIME);
    jar.set("short", "gone", Duration::ZERO);
    jar.persist().await.unwrap();
    assert!(path.is_file());

    let reopened = CookieJar::open(path.clone()).await.unwrap();
    assert_eq!(reopened.get(ACCESS_TOKEN).as_deref(), Some("token-1"));
    assert_eq!(reopened.get("short"), None);
    assert_eq!(reopened.path(), path.as_path());
}

#[tokio::test]
async fn test_removed_cookie_stays_removed_after_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");

    let jar = CookieJar::open(path.clone()).await.unwrap();
    jar.set(ACCESS_TOKEN, "token-1", SESSION_LIFETIME);
    jar.persist().await.unwrap();

    jar.remove(ACCESS_TOKEN);
    jar.persist().await.unwrap();

    let reopened = CookieJar::open(path).await.unwrap();
    assert!(!has_session(&reopened));
}

#[tokio::test]
async fn test_corrupt_jar_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(CookieJar::open(path).await.is_err());
}
