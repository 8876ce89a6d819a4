use anyhow::Result;
use clap::{Parser, Subcommand};
use search_cli::{load_server, run_console, run_match, run_search};
use search_core::{DocId, DocumentStatus};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Query an in-memory TF-IDF document index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Corpus {
    /// Input path (JSON/JSONL file or a directory of them)
    #[arg(long)]
    input: PathBuf,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Read stop words, documents and a query from stdin using the line protocol
    Console,
    /// Print the top documents for a query as JSON lines
    Search {
        #[command(flatten)]
        corpus: Corpus,
        #[arg(long)]
        query: String,
        /// Only return documents with this status (actual, irrelevant, banned, removed)
        #[arg(long, default_value = "actual")]
        status: DocumentStatus,
    },
    /// Print which query words occur in one document
    Match {
        #[command(flatten)]
        corpus: Corpus,
        #[arg(long)]
        query: String,
        #[arg(long, allow_negative_numbers = true)]
        id: DocId,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Console => {
            run_console(io::stdin().lock(), io::stdout().lock())?;
        }
        Commands::Search { corpus, query, status } => {
            let server = load_server(&corpus.input, &corpus.stop_words)?;
            run_search(&server, &query, status, io::stdout().lock())?;
        }
        Commands::Match { corpus, query, id } => {
            let server = load_server(&corpus.input, &corpus.stop_words)?;
            run_match(&server, &query, id, io::stdout().lock())?;
        }
    }
    Ok(())
}
