//! memoraid CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "memoraid", version, about = "AI-assisted memory recall quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate recall questions for a memory journal
    Generate {
        /// Path to a .toml journal file or directory
        #[arg(long)]
        journal: PathBuf,

        /// Model to generate with (e.g. "gemini/gemini-pro")
        #[arg(long)]
        model: Option<String>,

        /// Max concurrent generations
        #[arg(long, default_value = "4")]
        parallelism: usize,

        /// Output directory for the generated question bundle
        #[arg(long, default_value = "./memoraid-out")]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a free-text answer against a reference answer
    Score {
        /// The stored reference answer
        #[arg(long)]
        reference: String,

        /// The submitted answer
        #[arg(long)]
        answer: String,

        /// Point value of the question
        #[arg(long, default_value = "10")]
        points: u32,
    },

    /// Validate journal TOML files
    Validate {
        /// Path to a journal file or directory
        #[arg(long)]
        journal: PathBuf,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example journal
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("memoraid=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            journal,
            model,
            parallelism,
            output,
            config,
        } => commands::generate::execute(journal, model, parallelism, output, config).await,
        Commands::Score {
            reference,
            answer,
            points,
        } => commands::score::execute(&reference, &answer, points),
        Commands::Validate { journal } => commands::validate::execute(journal),
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config)
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
