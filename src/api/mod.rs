//! # Catalog API Module
//!
//! This module is the client side of the MovieFan REST backend. It issues the
//! HTTP requests for authentication and movie resources, caches query results
//! and invalidates them after mutations.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Forms, Views)
//!          ↓
//! ApiClient
//!     ├── Auth (login, register)          -> tag Auth
//!     ├── Movies (list, search, get)      -> cached, tag Movie
//!     ├── Movie mutations                 -> invalidate tag Movie
//!     └── QueryCache (key -> body, tag -> keys)
//!          ↓
//! HTTP Layer (reqwest, JSON, multipart)
//! ```
//!
//! ## Endpoints
//!
//! - `POST sessions` - login, returns `{ token, status }`
//! - `POST users` - registration, returns `{ token, status }`
//! - `GET movies?sort=&order=&limit=&offset=` - paged listing
//! - `GET movies?search=&sort=year&order=DESC&limit=10&offset=0` - free-text search
//! - `GET movies/{id}` - single movie
//! - `POST movies`, `PATCH movies/{id}`, `DELETE movies/{id}` - mutations
//! - `POST movies/import` - multipart upload, field `movies`
//!
//! ## Authorization
//!
//! Movie requests carry the raw session token from the `ACCESS_TOKEN` cookie in
//! the `Authorization` header, without a `Bearer` prefix. The token is read at
//! send time, so logging in or out takes effect on the next request.
//!
//! ## Caching
//!
//! Query results are cached by endpoint and normalized parameters. Identical
//! queries issued concurrently share a per-key gate, so only one of them goes
//! to the network. Successful mutations invalidate the tags they declare.
//!
//! ## Errors
//!
//! Every failure is an [`ApiError`]. Nothing is retried.

mod auth;
mod cache;
mod error;
mod movies;

pub use cache::QueryCache;
pub use cache::QueryKey;
pub use cache::Tag;
pub use error::ApiError;
pub use movies::SEARCH_LIMIT;

use std::{collections::HashMap, sync::Arc};

use reqwest::{Client, Method, RequestBuilder, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use url::Url;

use crate::management::cookies::{ACCESS_TOKEN, CookieAccess};

pub struct ApiClient {
    http: Client,
    base_url: Url,
    cookies: Arc<dyn CookieAccess>,
    cache: Arc<Mutex<QueryCache>>,
    gates: Mutex<HashMap<QueryKey, Arc<Mutex<()>>>>,
}

impl ApiClient {
    pub fn new(base_url: Url, cookies: Arc<dyn CookieAccess>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_http(http, base_url, cookies))
    }

    pub fn with_http(http: Client, base_url: Url, cookies: Arc<dyn CookieAccess>) -> Self {
        Self {
            http,
            base_url,
            cookies,
            cache: Arc::new(Mutex::new(QueryCache::new())),
            gates: Mutex::new(HashMap::new()),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cookies(&self) -> &Arc<dyn CookieAccess> {
        &self.cookies
    }

    pub fn cache(&self) -> Arc<Mutex<QueryCache>> {
        Arc::clone(&self.cache)
    }

    /// Drops cached results for `tags`; returns the keys that went stale.
    pub async fn invalidate(&self, tags: &[Tag]) -> Vec<QueryKey> {
        let stale = self.cache.lock().await.invalidate(tags);
        tracing::debug!(?tags, stale = stale.len(), "invalidated cache tags");
        stale
    }

    pub async fn reset_cache(&self) {
        self.cache.lock().await.reset();
        tracing::debug!("query cache reset");
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Validation(format!("invalid endpoint '{}': {}", path, e)))
    }

    fn request(&self, method: Method, path: &str, authorized: bool) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.http.request(method, url);
        Ok(if authorized {
            self.authorize(builder)
        } else {
            builder
        })
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.cookies.get(ACCESS_TOKEN) {
            Some(token) if !token.is_empty() => builder.header(AUTHORIZATION, token),
            _ => builder,
        }
    }

    /// Cached GET. Concurrent callers with the same key wait on one fetch.
    async fn query<T: DeserializeOwned>(&self, key: QueryKey, tags: &[Tag]) -> Result<T, ApiError> {
        if let Some(body) = self.cached(&key).await {
            tracing::debug!(key = %key, "cache hit");
            return decode(body);
        }

        let gate = {
            let mut gates = self.gates.lock().await;
            Arc::clone(gates.entry(key.clone()).or_default())
        };
        let _turn = gate.lock().await;

        if let Some(body) = self.cached(&key).await {
            tracing::debug!(key = %key, "cache hit after wait");
            return decode(body);
        }

        let generation = self.cache.lock().await.generation();
        let outcome = self.fetch(&key).await;
        if let Ok(body) = &outcome {
            let stored = self
                .cache
                .lock()
                .await
                .insert_if_current(generation, key.clone(), tags, body.clone());
            if !stored {
                tracing::debug!(key = %key, "response outlived an invalidation, not cached");
            }
        }
        self.gates.lock().await.remove(&key);

        decode(outcome?)
    }

    async fn cached(&self, key: &QueryKey) -> Option<Value> {
        self.cache.lock().await.get(key).cloned()
    }

    async fn fetch(&self, key: &QueryKey) -> Result<Value, ApiError> {
        let mut url = self.endpoint(key.endpoint())?;
        if !key.params().is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in key.params() {
                pairs.append_pair(name, value);
            }
        }

        let builder = self.authorize(self.http.get(url));
        self.execute(builder).await
    }

    /// Sends a mutation; on success the declared tags are invalidated.
    async fn mutate(&self, builder: RequestBuilder, invalidates: &[Tag]) -> Result<Value, ApiError> {
        let body = self.execute(builder).await?;
        if !invalidates.is_empty() {
            self.invalidate(invalidates).await;
        }
        Ok(body)
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let request = builder.build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(status = %status, bytes = text.len(), "received response");

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let body: Value = serde_json::from_str(&text).map_err(ApiError::malformed)?;
        check_envelope(body)
    }
}

/// Rejects `{ "status": 0, "error": .. }` bodies the backend sends with HTTP 200.
fn check_envelope(body: Value) -> Result<Value, ApiError> {
    if body.get("status").and_then(Value::as_i64) == Some(0) {
        let error = body.get("error").cloned().unwrap_or(Value::Null);
        return Err(ApiError::from_envelope(&error));
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(ApiError::malformed)
}
