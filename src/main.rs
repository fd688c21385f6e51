use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moviefan::{
    cli, config, error,
    route::App,
    types::{SortField, SortOrder},
    utils, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List movies, sorted and paged
    Movies(MoviesOptions),

    /// Show a single movie
    Show(IdOption),

    /// Browse the catalog interactively
    Browse,

    /// Add a movie, or import a .txt file of movies
    Add(AddOptions),

    /// Edit a movie
    Edit(EditOptions),

    /// Delete a movie
    Delete(DeleteOptions),

    /// Log in to the catalog
    Login(LoginOptions),

    /// Create an account
    Register(RegisterOptions),

    /// Drop the current session
    Logout,

    /// Show session and configuration status
    Status,

    /// Open an application path (/, /login, /register)
    Open(OpenOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct MoviesOptions {
    /// Field to sort by
    #[clap(long, value_enum, default_value_t = SortField::Year)]
    pub sort: SortField,

    /// Sort direction
    #[clap(long, value_enum, default_value_t = SortOrder::Desc)]
    pub order: SortOrder,

    /// Page to show, starting at 1
    #[clap(long, default_value_t = 1)]
    pub page: u64,

    /// Movies per page [default: 9, or 5 with --manage]
    #[clap(long)]
    pub limit: Option<u64>,

    /// Search titles and actors (replaces sorting and paging)
    #[clap(long)]
    pub search: Option<String>,

    /// Catalog management view with item ranges and edit/delete hints
    #[clap(long)]
    pub manage: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct IdOption {
    pub id: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct MovieFields {
    /// Movie title
    #[clap(long)]
    pub title: Option<String>,

    /// Release year (1900-2021)
    #[clap(long)]
    pub year: Option<String>,

    /// VHS, DVD or Blu-Ray
    #[clap(long)]
    pub format: Option<String>,

    /// Actor name; can be repeated
    #[clap(long = "actor")]
    pub actors: Vec<String>,
}

impl From<MovieFields> for cli::MovieInput {
    fn from(fields: MovieFields) -> Self {
        Self {
            title: fields.title,
            year: fields.year,
            format: fields.format,
            actors: fields.actors,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AddOptions {
    /// Import movies from a .txt file instead
    #[clap(long, conflicts_with_all = ["title", "year", "format", "actors"])]
    pub file: Option<PathBuf>,

    #[clap(flatten)]
    pub fields: MovieFields,
}

#[derive(Parser, Debug, Clone)]
pub struct EditOptions {
    pub id: u64,

    #[clap(flatten)]
    pub fields: MovieFields,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteOptions {
    pub id: u64,

    /// Skip the confirmation prompt
    #[clap(long, short)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LoginOptions {
    #[clap(long)]
    pub email: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct RegisterOptions {
    #[clap(long)]
    pub name: Option<String>,

    #[clap(long)]
    pub email: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct OpenOptions {
    #[clap(default_value = "/")]
    pub path: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }
    utils::init_tracing(&config::log_filter());

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    let mut app = match App::bootstrap(config).await {
        Ok(app) => app,
        Err(e) => error!("Cannot start. Err: {}", e),
    };

    match cli.command {
        Command::Movies(opt) => {
            let defaults = if opt.manage {
                cli::ListOptions::management()
            } else {
                cli::ListOptions::default()
            };
            cli::list_movies(
                &mut app,
                cli::ListOptions {
                    sort: opt.sort,
                    order: opt.order,
                    page: opt.page,
                    limit: opt.limit.unwrap_or(defaults.limit),
                    search: opt.search,
                    manage: opt.manage,
                },
            )
            .await
        }
        Command::Show(opt) => cli::show_movie(&app, opt.id).await,
        Command::Browse => cli::browse(&mut app).await,
        Command::Add(opt) => match opt.file {
            Some(file) => cli::import_movies(&app, file).await,
            None => cli::add_movie(&app, opt.fields.into()).await,
        },
        Command::Edit(opt) => cli::edit_movie(&app, opt.id, opt.fields.into()).await,
        Command::Delete(opt) => cli::delete_movie(&app, opt.id, opt.yes).await,
        Command::Login(opt) => cli::login(&mut app, opt.email).await,
        Command::Register(opt) => cli::register(&mut app, opt.name, opt.email).await,
        Command::Logout => cli::logout(&mut app).await,
        Command::Status => cli::status(&app),
        Command::Open(opt) => cli::open(&mut app, &opt.path).await,
        Command::Completions(_) => {}
    }

    if let Err(e) = app.persist_cookies().await {
        warning!("Cannot save cookies. Err: {}", e);
    }
}
