//! The `courseai validate` command.

use std::path::PathBuf;

use anyhow::Result;

use courseai_core::config::load_config_from;
use courseai_core::parser::{load_quizzes, validate_quiz};

pub fn execute(quiz_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let quizzes = load_quizzes(&quiz_path)?;

    let mut total_warnings = 0;

    for quiz in &quizzes {
        println!("Quiz: {} ({} questions)", quiz.name, quiz.questions.len());

        let warnings = validate_quiz(quiz, &config.scoring);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
