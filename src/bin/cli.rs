//! Comics CLI
//!
//! Runs one logical operation against the configured site and prints the
//! result as pretty JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comics::{
    api::ComicsApi,
    error::Result,
    models::{Config, RecommendKind, StatusFilter, TopCategory},
};
use serde::Serialize;

/// Comic catalog extraction engine
#[derive(Parser, Debug)]
#[command(name = "comics", version, about = "Comic site listing and comment extractor")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the genre catalog
    Genres,

    /// Comics in a genre (`all` for every genre)
    Genre {
        genre: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// all, ongoing or completed
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },

    /// Newly added comics
    New {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },

    /// Top comics by ranking
    Top {
        /// all, monthly, weekly, daily, follow, comment or chapter
        #[arg(default_value = "all")]
        category: TopCategory,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },

    /// Completed comics
    Completed {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Recently updated comics
    Recent {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Trending comics
    Trending {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Comics for boys
    Boy {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Comics for girls
    Girl {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Search comics by keyword
    Search {
        query: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Comics by an author alias
    Author {
        alias: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Full detail of a comic
    Detail { comic_id: String },

    /// Chapter list of a comic
    Chapters { comic_id: String },

    /// Page images of a chapter
    Chapter { comic_id: String, chapter: u32 },

    /// Comments on a comic or one of its chapters
    Comments {
        comic_id: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Chapter id; omit for comments on the whole comic
        #[arg(long, allow_negative_numbers = true)]
        chapter: Option<i64>,
    },

    /// Quick search suggestions
    Suggest { query: String },

    /// Recommended comics (hot, boy or girl)
    Recommend {
        #[arg(default_value = "hot")]
        kind: RecommendKind,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::load_or_default(&cli.config)
    };
    log::debug!("Using base URL {}", config.source.base_url);

    if let Command::Validate = cli.command {
        log::info!("Validating configuration...");
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!("✓ Config OK ({} label mappings)", config.labels.len());
        return Ok(());
    }

    let api = ComicsApi::from_config(&config)?;

    match cli.command {
        Command::Genres => print_json(&api.genres().await?)?,
        Command::Genre {
            genre,
            page,
            status,
        } => print_json(&api.list_by_genre(&genre, page, status).await?)?,
        Command::New { page, status } => print_json(&api.new_comics(page, status).await?)?,
        Command::Top {
            category,
            page,
            status,
        } => print_json(&api.top(category, page, status).await?)?,
        Command::Completed { page } => print_json(&api.completed(page).await?)?,
        Command::Recent { page } => print_json(&api.recent_updates(page).await?)?,
        Command::Trending { page } => print_json(&api.trending(page).await?)?,
        Command::Boy { page } => print_json(&api.boy(page).await?)?,
        Command::Girl { page } => print_json(&api.girl(page).await?)?,
        Command::Search { query, page } => print_json(&api.search(&query, page).await?)?,
        Command::Author { alias, page } => print_json(&api.by_author(&alias, page).await?)?,
        Command::Detail { comic_id } => print_json(&api.detail(&comic_id).await?)?,
        Command::Chapters { comic_id } => print_json(&api.chapters(&comic_id).await?)?,
        Command::Chapter { comic_id, chapter } => {
            print_json(&api.chapter(&comic_id, chapter).await?)?
        }
        Command::Comments {
            comic_id,
            page,
            chapter,
        } => print_json(&api.comments(&comic_id, page, chapter).await?)?,
        Command::Suggest { query } => print_json(&api.search_suggest(&query).await?)?,
        Command::Recommend { kind } => print_json(&api.recommend(kind).await?)?,
        Command::Validate => {}
    }

    Ok(())
}
