//! # CLI Module
//!
//! This module provides the command-line interface layer for MovieFan, a client for
//! a movie catalog backend. It implements all user-facing commands and coordinates
//! between the API client, the forms, the listing view and user interaction.
//!
//! ## Overview
//!
//! The CLI module serves as the primary interface between users and the catalog.
//! It provides commands for:
//!
//! - **Browsing**: Sorted, paged listing and free-text search
//! - **Details**: Showing a single movie by id
//! - **Editing**: Adding, importing, editing and deleting movies
//! - **Sessions**: Login, registration, logout and session status
//!
//! ## Command Categories
//!
//! ### Listing
//!
//! - [`list_movies`] - One page of movies, sorted or filtered by a search
//! - [`browse`] - Interactive listing driven by line commands
//! - [`show_movie`] - Detail table for one movie
//!
//! ### Catalog Maintenance
//!
//! - [`add_movie`] - Validates and creates a movie, prompting for missing values
//! - [`import_movies`] - Uploads a `.txt` movie list
//! - [`edit_movie`] - Fetches a movie, applies overrides and saves it
//! - [`delete_movie`] - Deletes a movie after confirmation
//!
//! ### Session
//!
//! - [`login`] / [`register`] - Obtain a session token; passwords are never echoed
//! - [`logout`] - Drops the session cookie and every cached query
//! - [`status`] - Shows whether a session is present
//!
//! ### Routing
//!
//! - [`open`] - Follows an application path (`/`, `/login`, `/register`)
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Forms / View (Validation, Listing State)
//!     ↓
//! Management Layer (Cookies, Store, Session)
//!     ↓
//! API Layer (Catalog Client, Query Cache)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! ## Error Handling
//!
//! Validation problems are printed per field before the command fails. Request
//! failures show the form's message with the underlying error. Mutations without
//! a session print a warning and are sent anyway; the backend decides.
//!
//! ## Usage Patterns
//!
//! ```bash
//! moviefan login                              # Start a session
//! moviefan movies --sort title --order asc    # Alphabetical listing
//! moviefan movies --search "Hanks"            # Search titles and actors
//! moviefan add --title Heat --year 1995 --format DVD --actor "Al Pacino"
//! moviefan add --file movies.txt              # Bulk import
//! moviefan browse                             # Interactive listing
//! ```

mod auth;
mod browse;
mod movies;

pub use auth::login;
pub use auth::logout;
pub use auth::register;
pub use auth::status;
pub use browse::browse;
pub use movies::ListOptions;
pub use movies::MovieInput;
pub use movies::add_movie;
pub use movies::delete_movie;
pub use movies::edit_movie;
pub use movies::home;
pub use movies::import_movies;
pub use movies::list_movies;
pub use movies::show_movie;

use crate::{
    route::{App, Route},
    warning,
};

/// Navigates to an application path.
pub async fn open(app: &mut App, path: &str) {
    match Route::from_path(path) {
        Some(Route::Home) => home(app).await,
        Some(Route::Login) => login(app, None).await,
        Some(Route::Register) => register(app, None, None).await,
        None => {
            warning!("No page at '{}', showing the catalog instead", path);
            home(app).await
        }
    }
}
