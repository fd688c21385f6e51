//! MovieFan Catalog CLI Library
//!
//! This library provides a client for the MovieFan catalog API. Users can browse,
//! search, sort and paginate movies, authenticate to obtain a session token and,
//! once authenticated, create, edit, delete or bulk-import movie records.
//!
//! # Modules
//!
//! - `api` - HTTP client for the catalog backend, including the tagged query cache
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `forms` - Input collection and validation for movies, imports, login and registration
//! - `management` - Session cookie storage, application state and session orchestration
//! - `route` - Route table and the application shell
//! - `types` - Data structures and type definitions
//! - `utils` - Output helpers (tables, spinners, prompts) and logging setup
//! - `view` - Listing state machine, pagination and superseded-request handling
//!
//! # Example
//!
//! ```no_run
//! use moviefan::{config, route::App};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     config::load_env().await?;
//!     let app = App::bootstrap(config::Config::from_env()?).await?;
//!     println!("authenticated: {}", app.store().is_authenticated());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod forms;
pub mod management;
pub mod route;
pub mod types;
pub mod utils;
pub mod view;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```ignore
/// info!("Loading movies...");
/// info!("Found {} movies", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```ignore
/// success!("Movie added successfully!");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the command layer uses this macro. Library code returns errors.
///
/// # Example
///
/// ```ignore
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```ignore
/// warning!("You are not logged in");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
