use std::{fmt, str::FromStr, sync::Arc};

use crate::{
    api::{ApiClient, ApiError},
    config::{Config, ConfigError},
    management::{
        cookies::{CookieAccess, CookieError, CookieJar, SESSION_LIFETIME, parse_cookie_header},
        state::Store,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Login, Route::Register];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
        }
    }

    /// Matches a URL path; a trailing slash and a query string are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim().trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_path(s).ok_or_else(|| {
            format!(
                "unknown route '{}', expected one of: {}",
                s,
                Route::ALL.map(|route| route.path()).join(", ")
            )
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cookie jar: {0}")]
    Cookies(#[from] CookieError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The application shell: cookie jar, state store and API client, wired once
/// at startup.
pub struct App {
    config: Config,
    jar: Arc<CookieJar>,
    store: Store,
    client: Arc<ApiClient>,
}

impl App {
    /// Opens the cookie jar, derives the authentication flag from it and
    /// builds the API client against the configured backend.
    pub async fn bootstrap(config: Config) -> Result<App, AppError> {
        let path = config.cookie_path();
        let fresh = !path.is_file();
        let jar = Arc::new(CookieJar::open(path).await?);

        // The header only seeds a jar that has never been written.
        match &config.cookie_header {
            Some(header) if fresh => {
                for (name, value) in parse_cookie_header(header) {
                    tracing::debug!(cookie = %name, "seeding cookie from environment");
                    jar.set(&name, &value, SESSION_LIFETIME);
                }
            }
            Some(_) => tracing::debug!("cookie jar exists; ignoring MOVIEFAN_COOKIE"),
            None => {}
        }

        let cookies: Arc<dyn CookieAccess> = jar.clone();
        let store = Store::bootstrap(Arc::clone(&cookies));
        let client = Arc::new(ApiClient::new(config.api_url.clone(), cookies)?);

        tracing::debug!(
            api = %config.api_url,
            authenticated = store.is_authenticated(),
            "application ready"
        );

        Ok(App {
            config,
            jar,
            store,
            client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Borrows the store mutably next to the client.
    pub fn parts(&mut self) -> (&mut Store, &ApiClient) {
        (&mut self.store, &self.client)
    }

    /// Writes the cookie jar back to disk.
    pub async fn persist_cookies(&self) -> Result<(), AppError> {
        self.jar.persist().await?;
        tracing::debug!(path = %self.jar.path().display(), "cookie jar persisted");
        Ok(())
    }
}
