use crate::{
    api::{ApiClient, Tag},
    management::{
        cookies::{ACCESS_TOKEN, SESSION_LIFETIME},
        state::{Action, Store},
    },
};

/// Stores a freshly issued token and marks the user as authenticated.
///
/// Movie queries are invalidated so listings are fetched again with the new
/// authorization value.
pub async fn establish(store: &mut Store, client: &ApiClient, token: &str) {
    store.cookies().set(ACCESS_TOKEN, token, SESSION_LIFETIME);
    store.dispatch(Action::SetAuthenticated);
    client.invalidate(&[Tag::Movie]).await;
}

/// Clears the session cookie and every cached query.
pub async fn logout(store: &mut Store, client: &ApiClient) {
    store.dispatch(Action::ClearAuthenticated);
    client.reset_cache().await;
}
