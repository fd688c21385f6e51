use std::{
    collections::BTreeMap,
    io::Error,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Name of the cookie holding the session token.
pub const ACCESS_TOKEN: &str = "ACCESS_TOKEN";

/// Lifetime given to the session cookie on login and registration.
pub const SESSION_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("cookie jar i/o failed: {0}")]
    IoError(#[from] Error),
    #[error("cookie jar is corrupt: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Read/write access to named cookies.
///
/// Everything that touches the session token goes through this capability, so
/// callers never reach for storage on their own.
pub trait CookieAccess: Send + Sync {
    /// Returns the value of a live cookie. Expired cookies read as absent.
    fn get(&self, name: &str) -> Option<String>;

    fn set(&self, name: &str, value: &str, max_age: Duration);

    fn remove(&self, name: &str);
}

/// True when the session cookie exists and carries a non-empty value.
pub fn has_session(cookies: &dyn CookieAccess) -> bool {
    cookies
        .get(ACCESS_TOKEN)
        .is_some_and(|token| !token.is_empty())
}

/// Splits a `name=value; name2=value2` header into its pairs.
///
/// Values keep everything after the first `=`. Entries without a name are dropped.
pub fn parse_cookie_header(header: &str) -> BTreeMap<String, String> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredCookie {
    pub fn new(value: &str, max_age: Duration) -> Self {
        let now = Utc::now();
        let expires_at = TimeDelta::from_std(max_age)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value: value.to_string(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Default)]
struct Entries(Mutex<BTreeMap<String, StoredCookie>>);

impl Entries {
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, StoredCookie>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get(&self, name: &str) -> Option<String> {
        let entries = self.lock();
        entries
            .get(name)
            .filter(|cookie| !cookie.is_expired(Utc::now()))
            .map(|cookie| cookie.value.clone())
    }

    fn set(&self, name: &str, value: &str, max_age: Duration) {
        self.lock()
            .insert(name.to_string(), StoredCookie::new(value, max_age));
    }

    fn remove(&self, name: &str) {
        self.lock().remove(name);
    }

    fn live(&self) -> BTreeMap<String, StoredCookie> {
        let now = Utc::now();
        let mut entries = self.lock();
        entries.retain(|_, cookie| !cookie.is_expired(now));
        entries.clone()
    }
}

/// Cookies that live only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCookies {
    entries: Entries,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a jar holding a single session cookie.
    pub fn with_session(token: &str) -> Self {
        let cookies = Self::new();
        cookies.set(ACCESS_TOKEN, token, SESSION_LIFETIME);
        cookies
    }
}

impl CookieAccess for MemoryCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.entries.get(name)
    }

    fn set(&self, name: &str, value: &str, max_age: Duration) {
        self.entries.set(name, value, max_age)
    }

    fn remove(&self, name: &str) {
        self.entries.remove(name)
    }
}

/// Cookie jar persisted as JSON in the local data directory.
///
/// Reads and writes happen in memory; [`CookieJar::persist`] writes the live
/// cookies back to disk.
#[derive(Debug)]
pub struct CookieJar {
    path: PathBuf,
    entries: Entries,
}

impl CookieJar {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: Entries::default(),
        }
    }

    /// Opens the jar at `path`. A missing file yields an empty jar.
    pub async fn open(path: PathBuf) -> Result<Self, CookieError> {
        if !path.is_file() {
            return Ok(Self::new(path));
        }

        let content = async_fs::read_to_string(&path).await?;
        let entries: BTreeMap<String, StoredCookie> = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&content)?
        };

        tracing::debug!(path = %path.display(), cookies = entries.len(), "opened cookie jar");
        Ok(Self {
            path,
            entries: Entries(Mutex::new(entries)),
        })
    }

    /// Writes all unexpired cookies to disk, creating the directory if needed.
    pub async fn persist(&self) -> Result<(), CookieError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.entries.live())?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CookieAccess for CookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.entries.get(name)
    }

    fn set(&self, name: &str, value: &str, max_age: Duration) {
        self.entries.set(name, value, max_age)
    }

    fn remove(&self, name: &str) {
        self.entries.remove(name)
    }
}
