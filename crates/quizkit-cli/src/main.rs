//! quizkit CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizkit",
    version,
    about = "Exercise merge, scoring, and exam serialization engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate exercise bank TOML files
    Validate {
        /// Path to bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Merge duplicate exercise records into canonical exercises
    Merge {
        /// JSON array of exercise records
        #[arg(long)]
        input: PathBuf,

        /// Write merged exercises here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Score a quiz submission
    Score {
        /// Submission JSON ({ QuizId, Answers, StartTime?, EndTime? })
        #[arg(long)]
        answers: PathBuf,

        /// Quiz to score against (default: the submission's QuizId)
        #[arg(long)]
        quiz: Option<i64>,

        /// Bank file or directory (overrides config)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Save the scored submission to the output directory
        #[arg(long)]
        save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Summarize saved submissions
    Stats {
        /// Directory of saved submissions (default: config output_dir)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Serialize an exam from the bank with full exercise bodies
    ExportExam {
        /// Exam id
        #[arg(long)]
        exam: i64,

        /// Bank file or directory (overrides config)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Write the exam here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Resolve an exam of exercise ids through the bank
    ImportExam {
        /// Exam reference JSON ({ Id, SectionId?, Exercises: [ids] })
        #[arg(long)]
        input: PathBuf,

        /// Bank file or directory (overrides config)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizkit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Merge { input, output } => commands::merge::execute(input, output),
        Commands::Score {
            answers,
            quiz,
            bank,
            format,
            save,
            config,
        } => commands::score::execute(answers, quiz, bank, format, save, config),
        Commands::Stats { dir, config } => commands::stats::execute(dir, config),
        Commands::ExportExam {
            exam,
            bank,
            output,
            config,
        } => commands::export_exam::execute(exam, bank, output, config).await,
        Commands::ImportExam {
            input,
            bank,
            config,
        } => commands::import_exam::execute(input, bank, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
