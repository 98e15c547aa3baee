//! The `courseai score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use courseai_core::config::load_config_from;
use courseai_core::model::Submission;
use courseai_core::scoring::calculate_question_score;

/// Answer details given on the command line or in a submission file.
pub struct ScoreArgs {
    pub answer: Option<String>,
    pub correct: Option<String>,
    pub time_spent: f64,
    pub hints_used: bool,
    pub difficulty: String,
    pub input: Option<PathBuf>,
}

impl ScoreArgs {
    fn into_submission(self) -> Result<Submission> {
        if let Some(path) = &self.input {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read submission: {}", path.display()))?;
            return serde_json::from_str(&content)
                .with_context(|| format!("failed to parse submission JSON: {}", path.display()));
        }

        anyhow::ensure!(
            self.time_spent.is_finite() && self.time_spent >= 0.0,
            "time spent must be a non-negative number of seconds"
        );

        Ok(Submission {
            answer: self.answer.unwrap_or_default(),
            correct_answer: self
                .correct
                .context("--correct is required without --input")?,
            time_spent: self.time_spent,
            hints_used: self.hints_used,
            difficulty: self.difficulty,
        })
    }
}

pub fn execute(args: ScoreArgs, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let submission = args.into_submission()?;

    let score = calculate_question_score(
        &submission.answer,
        &submission.correct_answer,
        &submission.metadata(),
        &config.scoring,
    );

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&score)?);
        }
        _ => {
            println!("Score: {}", score.score);
            println!("Similarity: {:.1}%", score.similarity * 100.0);
            println!(
                "Result: {}",
                if score.passed { "passed" } else { "not passed" }
            );
            for bonus in &score.bonuses {
                println!("  + {} ({} pts)", bonus.kind, bonus.points);
            }
        }
    }

    Ok(())
}
