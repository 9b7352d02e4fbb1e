//! filmorate CLI
//!
//! Command-line front end for the film catalog: loads fixtures and prints
//! the popularity, filmography, and friendship views.

mod backend;
mod commands;
mod error;
mod settings;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::backend::Backend;
pub(crate) use crate::error::CliError;

#[derive(Parser)]
#[command(name = "filmorate")]
#[command(about = "Film catalog with likes, directors, and friendships", long_about = None)]
struct Cli {
    /// Catalog database file (defaults to settings, then the data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Use a throwaway in-memory catalog instead of a database file
    #[arg(long, global = true, conflicts_with = "db")]
    memory: bool,

    /// Directory holding genres.yaml and ratings.yaml
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database (if needed) and seed reference data
    Init,

    /// Show row counts for the catalog database
    Stats,

    /// Load users, directors, films, likes, and friendships from a JSON file
    Load {
        /// Fixture file
        file: PathBuf,
    },

    /// Show one film
    Film {
        id: i64,

        #[arg(long)]
        json: bool,
    },

    /// List the most liked films
    Popular {
        /// Number of films to show
        #[arg(short, long, default_value_t = 10)]
        count: usize,

        #[arg(long)]
        json: bool,
    },

    /// List a director's films
    Director {
        id: i64,

        /// Sort key: likes or year
        #[arg(long, default_value = "likes")]
        sort: String,

        #[arg(long)]
        json: bool,
    },

    /// List films liked by both users
    CommonFilms {
        user: i64,
        other: i64,

        #[arg(long)]
        json: bool,
    },

    /// List a user's friends
    Friends {
        user: i64,

        /// Only friends shared with this user
        #[arg(long)]
        common: Option<i64>,

        #[arg(long)]
        json: bool,
    },

    /// List genres
    Genres {
        #[arg(long)]
        json: bool,
    },

    /// List content ratings
    Ratings {
        #[arg(long)]
        json: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the settings file and resolved paths
    Show,

    /// Print the settings file path
    Path,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!(
            "{} {}",
            "error:".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Config { action } = &cli.command {
        match action {
            ConfigAction::Show => commands::config::run_config_show(cli.db, cli.reference),
            ConfigAction::Path => commands::config::run_config_path(),
        }
        return Ok(());
    }

    let backend = Backend::open(cli.memory, cli.db, cli.reference)?;
    let svc = &backend.services;

    match cli.command {
        Commands::Init => {
            match &backend.sqlite {
                Some((_, path)) => log::info!("Catalog ready at {}", path.display()),
                None => log::info!("In-memory catalog ready"),
            }
            Ok(())
        }
        Commands::Stats => commands::stats::run_stats(&backend),
        Commands::Load { file } => commands::load::run_load(svc, &file),
        Commands::Film { id, json } => commands::films::run_film(svc, id, json),
        Commands::Popular { count, json } => commands::films::run_popular(svc, count, json),
        Commands::Director { id, sort, json } => {
            commands::films::run_director(svc, id, &sort, json)
        }
        Commands::CommonFilms { user, other, json } => {
            commands::films::run_common(svc, user, other, json)
        }
        Commands::Friends { user, common, json } => {
            commands::friends::run_friends(svc, user, common, json)
        }
        Commands::Genres { json } => commands::reference::run_genres(svc, json),
        Commands::Ratings { json } => commands::reference::run_ratings(svc, json),
        Commands::Config { .. } => Ok(()),
    }
}

/// Route `log` output to stdout. Info lines print bare; `RUST_LOG`
/// overrides the level.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(
                buf,
                "{}: {}",
                level.as_str().to_lowercase(),
                record.args()
            ),
        })
        .init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
