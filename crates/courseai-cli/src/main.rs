//! courseai CLI: grade quiz answers and run prioritized work queues.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "courseai", version, about = "Quiz answer grading and work queue tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single free-text answer
    Score {
        /// The submitted answer
        #[arg(long, required_unless_present = "input")]
        answer: Option<String>,

        /// The correct answer
        #[arg(long, required_unless_present = "input")]
        correct: Option<String>,

        /// Seconds spent answering
        #[arg(long, default_value = "0")]
        time_spent: f64,

        /// The user revealed hints
        #[arg(long)]
        hints_used: bool,

        /// Question difficulty (easy, medium, hard)
        #[arg(long, default_value = "easy")]
        difficulty: String,

        /// JSON submission file with answer, correctAnswer, timeSpent, hintsUsed, difficulty
        #[arg(long, conflicts_with_all = ["answer", "correct"])]
        input: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade a quiz attempt
    Grade {
        /// Path to the quiz .toml file
        #[arg(long)]
        quiz: PathBuf,

        /// Path to the attempt .json file
        #[arg(long)]
        attempt: PathBuf,

        /// Directory to save the JSON report in
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two graded reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Minimum change in normalized score to count
        #[arg(long, default_value = "0.05")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate quiz TOML files
    Validate {
        /// Path to quiz file or directory
        #[arg(long)]
        quiz: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Dispatch jobs in priority order
    Queue {
        /// Path to a jobs .toml file
        #[arg(long)]
        jobs: PathBuf,

        /// Concurrent workers (default from config)
        #[arg(long)]
        workers: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example quiz
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("courseai_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            answer,
            correct,
            time_spent,
            hints_used,
            difficulty,
            input,
            format,
            config,
        } => commands::score::execute(
            commands::score::ScoreArgs {
                answer,
                correct,
                time_spent,
                hints_used,
                difficulty,
                input,
            },
            format,
            config,
        ),
        Commands::Grade {
            quiz,
            attempt,
            output,
            format,
            config,
        } => commands::grade::execute(quiz, attempt, output, format, config),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Validate { quiz, config } => commands::validate::execute(quiz, config),
        Commands::Queue {
            jobs,
            workers,
            config,
        } => commands::queue::execute(jobs, workers, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
