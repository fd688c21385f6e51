//! # View Module
//!
//! State behind the movie listing: sort order, free-text search, pagination
//! and the detail overlay. Nothing here prints; the CLI layer renders whatever
//! the view holds.
//!
//! ## Listing modes
//!
//! ```text
//! search empty      -> movies?sort=..&order=..&limit=..&offset=..   (paged)
//! search non-empty  -> movies?search=..&sort=year&order=DESC&limit=10&offset=0
//! ```
//!
//! Every parameter change re-enters `Loading` on the next load. A response
//! whose parameters no longer match the view is dropped.
//!
//! ## Superseded requests
//!
//! [`LatestRequest`] runs each load as a spawned task. Issuing a new load
//! aborts the previous one, so a slow response can never overwrite the result
//! of a newer request.

pub mod latest;
pub mod list;
pub mod pagination;

pub use latest::LatestRequest;
pub use list::ListRequest;
pub use list::ListView;
pub use list::ViewStatus;
