use reqwest::Method;

use crate::{
    api::{ApiClient, ApiError, Tag, decode},
    types::{AuthResponse, Credentials, Registration},
};

impl ApiClient {
    /// Exchanges credentials for a session token.
    ///
    /// Unauthenticated request. Storing the token is the caller's job.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let builder = self.request(Method::POST, "sessions", false)?.json(credentials);
        decode(self.mutate(builder, &[Tag::Auth]).await?)
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        let builder = self.request(Method::POST, "users", false)?.json(registration);
        decode(self.mutate(builder, &[Tag::Auth]).await?)
    }
}
