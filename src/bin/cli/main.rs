mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "study-buddy", about = "AI study buddy over your PDF documents", version)]
struct Cli {
    /// Use a specific vector index file (default: platform data dir)
    #[arg(long, global = true)]
    index: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Process PDF documents into the index
    Index {
        /// PDF files to process
        pdfs: Vec<PathBuf>,
    },

    /// Summarize the processed documents
    Summary,

    /// Generate a quiz and take it interactively
    Quiz,

    /// Generate flashcards and review them interactively
    Flashcards,

    /// Ask a single question about the documents
    Ask {
        /// The question to ask
        question: String,
    },

    /// Chat about the documents, one question per line
    Chat,

    /// Show index statistics
    Status,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let index_override = cli.index.as_deref();

    match cli.command {
        Command::Index { pdfs } => {
            let mut app = app::App::new(index_override)?;
            commands::index::run(&mut app, &pdfs)
        }
        Command::Summary => {
            let app = app::App::new(index_override)?;
            commands::summary::run(&app, &cli.format)
        }
        Command::Quiz => {
            let app = app::App::new(index_override)?;
            commands::quiz::run(&app)
        }
        Command::Flashcards => {
            let app = app::App::new(index_override)?;
            commands::flashcards::run(&app)
        }
        Command::Ask { question } => {
            let app = app::App::new(index_override)?;
            commands::ask::run(&app, &question, &cli.format)
        }
        Command::Chat => {
            let app = app::App::new(index_override)?;
            commands::chat::run(&app)
        }
        Command::Status => {
            let app = app::App::new(index_override)?;
            commands::status::run(&app, &cli.format)
        }
    }
}
