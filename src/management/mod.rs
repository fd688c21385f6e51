pub mod cookies;
pub mod session;
pub mod state;

pub use cookies::ACCESS_TOKEN;
pub use cookies::CookieAccess;
pub use cookies::CookieJar;
pub use cookies::MemoryCookies;
pub use state::Action;
pub use state::Store;
