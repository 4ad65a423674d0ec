//! talentflow CLI — author, check and store hiring assessments.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "talentflow", version, about = "Hiring assessment builder and checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint assessment files for schema problems
    Validate {
        /// Path to an assessment file or directory
        #[arg(long)]
        assessment: PathBuf,
    },

    /// Print an assessment's questions as a table
    Show {
        /// Path to an assessment file
        #[arg(long)]
        assessment: PathBuf,
    },

    /// Validate an answers file against an assessment
    Check {
        /// Path to an assessment file
        #[arg(long)]
        assessment: PathBuf,

        /// Path to a JSON answers file
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Save an assessment file into the store
    Save {
        /// Path to an assessment file
        #[arg(long)]
        assessment: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate and record a candidate's answers for a stored assessment
    Submit {
        /// Job the assessment belongs to
        #[arg(long)]
        job_id: String,

        /// Candidate submitting the answers
        #[arg(long)]
        candidate_id: String,

        /// Path to a JSON answers file
        #[arg(long)]
        answers: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Apply one builder operation to a stored assessment
    Edit {
        /// Job the assessment belongs to
        #[arg(long)]
        job_id: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        action: commands::edit::EditAction,
    },

    /// Create starter config and example assessment
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("talentflow=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { assessment } => commands::validate::execute(assessment),
        Commands::Show { assessment } => commands::show::execute(assessment),
        Commands::Check {
            assessment,
            answers,
            format,
        } => commands::check::execute(assessment, answers, format),
        Commands::Save { assessment, config } => commands::save::execute(assessment, config).await,
        Commands::Submit {
            job_id,
            candidate_id,
            answers,
            config,
        } => commands::submit::execute(job_id, candidate_id, answers, config).await,
        Commands::Edit {
            job_id,
            config,
            action,
        } => commands::edit::execute(job_id, action, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
