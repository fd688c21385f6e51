use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;
use tracing_subscriber::EnvFilter;

use crate::types::{Movie, MovieDetailRow, MovieTableRow};

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub fn movie_table(movies: &[Movie]) -> Table {
    let rows: Vec<MovieTableRow> = movies.iter().map(MovieTableRow::from).collect();
    Table::new(rows)
}

pub fn detail_table(movie: &Movie) -> Table {
    let actors = if movie.actors.is_empty() {
        "No actors listed".to_string()
    } else {
        movie.actors.join(", ")
    };

    let rows = vec![
        MovieDetailRow {
            field: "ID".to_string(),
            value: movie.id.map(|id| id.to_string()).unwrap_or_default(),
        },
        MovieDetailRow {
            field: "Title".to_string(),
            value: movie.title.clone(),
        },
        MovieDetailRow {
            field: "Year".to_string(),
            value: movie.year.to_string(),
        },
        MovieDetailRow {
            field: "Format".to_string(),
            value: movie.format.to_string(),
        },
        MovieDetailRow {
            field: "Actors".to_string(),
            value: actors,
        },
    ];
    Table::new(rows)
}

/// Installs the stderr tracing subscriber. An invalid filter falls back to `warn`.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Reads one trimmed line from stdin after printing `label`.
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Reads a password without echoing it.
pub fn prompt_password(label: &str) -> io::Result<String> {
    rpassword::prompt_password(format!("{}: ", label))
}

pub fn confirm(question: &str) -> io::Result<bool> {
    let answer = prompt(&format!("{} [y/N]", question))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}
