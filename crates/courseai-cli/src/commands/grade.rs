//! The `courseai grade` command.

use std::path::PathBuf;

use anyhow::Result;

use courseai_core::config::load_config_from;
use courseai_core::parser::{load_attempt, parse_quiz};
use courseai_core::report::{grade_quiz, QuizReport};

pub fn execute(
    quiz_path: PathBuf,
    attempt_path: PathBuf,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let quiz = parse_quiz(&quiz_path)?;
    let attempt = load_attempt(&attempt_path)?;

    anyhow::ensure!(
        attempt.quiz_id == quiz.id,
        "attempt is for quiz '{}' but {} is quiz '{}'",
        attempt.quiz_id,
        quiz_path.display(),
        quiz.id
    );

    let report = grade_quiz(&quiz, &attempt, &config.scoring);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => print_summary(&report),
    }

    if let Some(dir) = output {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("report-{}-{timestamp}.json", report.quiz.id));
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &QuizReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Question",
        "Difficulty",
        "Similarity",
        "Score",
        "Bonuses",
        "Passed",
    ]);

    for r in &report.results {
        let similarity = if r.answered {
            format!("{:.1}%", r.score.similarity * 100.0)
        } else {
            "unanswered".to_string()
        };
        table.add_row(vec![
            Cell::new(&r.question_id),
            Cell::new(&r.difficulty),
            Cell::new(similarity),
            Cell::new(format!("{} / {}", r.score.score, r.max_score)),
            Cell::new(format!("+{}", r.score.bonus_total())),
            Cell::new(if r.score.passed { "yes" } else { "no" }),
        ]);
    }

    println!("{} ({} questions)", report.quiz.name, report.quiz.question_count);
    println!("{table}");
    println!(
        "Total: {} / {} ({:.1}%), {} passed, {} answered",
        report.stats.total_score,
        report.stats.max_score,
        report.stats.percentage * 100.0,
        report.stats.passed,
        report.stats.answered
    );
}
