use anyhow::{bail, Result};
use arrapi::{
    Configuration, QueueOptions, RadarrClient, RadarrEventType, RadarrSortKey, SortDirection,
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every movie in the library
    Movies,
    /// Show one movie by its library id
    Movie { id: i64 },
    /// Search the metadata catalog
    Lookup {
        term: Option<String>,
        #[arg(long, conflicts_with_all = ["term", "imdb"])]
        tmdb: Option<i64>,
        #[arg(long, conflicts_with = "term")]
        imdb: Option<String>,
    },
    /// Show one page of the download queue
    Queue {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        sort_key: Option<RadarrSortKey>,
        #[arg(long)]
        sort_dir: Option<SortDirection>,
        /// Include items not matched to a movie; bare flag means true
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        include_unknown: Option<bool>,
    },
    /// Show queue totals
    QueueStatus,
    /// Show history for a movie
    History {
        movie_id: i64,
        #[arg(long)]
        event_type: Option<RadarrEventType>,
    },
    /// Show blocklisted releases for a movie
    Blocklist { movie_id: i64 },
    /// List configured indexers
    Indexers,
    /// Show one indexer
    Indexer { id: i64 },
    /// Show server status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(&cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = Configuration::from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    let radarr = RadarrClient::from_config(&config.radarr, &config.http)?;
    let output = run(&radarr, cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(radarr: &RadarrClient, command: Command) -> Result<Value> {
    let value = match command {
        Command::Movies => Value::from(radarr.get_movies().await?),
        Command::Movie { id } => radarr.get_movie_by_movie_id(id).await?,
        Command::Lookup { term, tmdb, imdb } => {
            let results = match (term, tmdb, imdb) {
                (Some(term), None, None) => radarr.lookup_movie(&term).await?,
                (None, Some(id), None) => radarr.lookup_movie_by_tmdb_id(id).await?,
                (None, None, Some(id)) => radarr.lookup_movie_by_imdb_id(&id).await?,
                _ => bail!("lookup needs exactly one of <term>, --tmdb or --imdb"),
            };
            Value::from(results)
        }
        Command::Queue {
            page,
            page_size,
            sort_key,
            sort_dir,
            include_unknown,
        } => {
            let options = QueueOptions {
                page,
                page_size,
                sort_key,
                sort_dir,
                include_unknown_movie_items: include_unknown,
            };
            radarr.get_queue(&options).await?
        }
        Command::QueueStatus => radarr.get_queue_status().await?,
        Command::History {
            movie_id,
            event_type,
        } => Value::from(radarr.get_movie_history(movie_id, event_type).await?),
        Command::Blocklist { movie_id } => {
            Value::from(radarr.get_blocklist_by_movie_id(movie_id).await?)
        }
        Command::Indexers => Value::from(radarr.get_indexers().await?),
        Command::Indexer { id } => radarr.get_indexer(id).await?,
        Command::Status => radarr.get_system_status().await?,
    };

    Ok(value)
}
