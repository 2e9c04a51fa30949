//! Giphy Search CLI - run the `search_gifs` tool from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use giphy_search::{
    GiphyTool, Rating, TracingEmitter, Valves, DEFAULT_API_BASE_URL,
    DEFAULT_GIF_LIMIT,
};

/// Giphy Search - find GIFs and print embeddable markdown
#[derive(Parser)]
#[command(name = "giphy-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search Giphy for GIFs
    Search(SearchArgs),

    /// Print the tool definition advertised to agents
    Schema,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Giphy API key
    #[arg(short = 'k', long, env = "GIPHY_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Giphy API base URL
    #[arg(short, long, env = "GIPHY_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    /// Number of GIFs to retrieve
    #[arg(short, long, default_value_t = DEFAULT_GIF_LIMIT)]
    limit: u32,

    /// Language(s) for results (e.g. "en,fr")
    #[arg(long, default_value = "en")]
    lang: String,

    /// Content rating: g, pg, pg-13 or r
    #[arg(short, long, default_value = "g")]
    rating: Rating,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let filter = if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level.to_string())
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Schema => print_schema(),
    }
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let valves = Valves::new(args.api_key)
        .with_base_url(args.base_url)
        .with_gif_limit(args.limit);
    let tool = GiphyTool::new(valves);

    let user = json!({
        "valves": {
            "GIF_LANG": args.lang,
            "GIF_RATING": args.rating.as_str(),
        }
    });

    let output = tool
        .search_gifs(&args.query, Some(&TracingEmitter), &user)
        .await;
    println!("{}", output);

    Ok(())
}

fn print_schema() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&GiphyTool::definition())?);
    Ok(())
}
