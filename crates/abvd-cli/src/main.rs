use std::path::PathBuf;

use abvd_core::{Collection, Config};
use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "abvd")]
#[command(about = "Download ABVD word lists and export cognate-coded records", version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a single language
    Download {
        /// Collection name (austronesian, bantu, mayan, utoaztecan)
        collection: Collection,
        /// Numeric language id
        language: u32,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit the raw XML export instead of JSON
        #[arg(long)]
        raw: bool,
    },
    /// Download a range of languages into the data directory
    Fetch {
        collection: Collection,
        /// First language id
        #[arg(long)]
        start: Option<u32>,
        /// Stop before this language id
        #[arg(long)]
        stop: Option<u32>,
        /// Maximum requests in flight
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Write the per-language summary table
    Details {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output TSV file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Export cognate-coded records as JSON
    Records {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check cognacy values, one per line
    CheckCognates {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Download {
            collection,
            language,
            output,
            raw,
        } => commands::download(&config, collection, language, output, raw).await,
        Commands::Fetch {
            collection,
            start,
            stop,
            concurrency,
        } => commands::fetch(&config, collection, start, stop, concurrency).await,
        Commands::Details { files, output } => commands::details(&config, &files, &output),
        Commands::Records { files, output } => commands::records(&config, &files, output),
        Commands::CheckCognates { files } => commands::check_cognates(&files),
    }
}
