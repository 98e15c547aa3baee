//! End-to-end grading pipeline tests.
//!
//! Loads the bundled quizzes and attempts, grades them, persists the reports
//! and compares attempts, all through the library API.

use std::path::Path;

use courseai_core::parser::{load_attempt, load_quiz_directory, parse_quiz, validate_quiz};
use courseai_core::report::{grade_quiz, QuizReport};
use courseai_core::scoring::ScoringCriteria;

const QUIZ: &str = "../../quizzes/rust-basics.toml";

fn grade(attempt: &str) -> QuizReport {
    let quiz = parse_quiz(Path::new(QUIZ)).unwrap();
    let attempt = load_attempt(Path::new(attempt)).unwrap();
    grade_quiz(&quiz, &attempt, &ScoringCriteria::default())
}

#[test]
fn bundled_quizzes_are_valid() {
    let quizzes = load_quiz_directory(Path::new("../../quizzes")).unwrap();
    assert_eq!(quizzes.len(), 2);
    for quiz in &quizzes {
        let warnings = validate_quiz(quiz, &ScoringCriteria::default());
        assert!(warnings.is_empty(), "{}: {warnings:?}", quiz.id);
    }
}

#[test]
fn perfect_attempt_scores_maximum() {
    let report = grade("../../attempts/rust-basics-second.json");
    assert_eq!(report.stats.total_score, report.stats.max_score);
    assert_eq!(report.stats.passed, 5);
    assert!(report.results.iter().all(|r| r.score.similarity == 1.0));
}

#[test]
fn first_attempt_scores() {
    let report = grade("../../attempts/rust-basics-first.json");

    let by_id = |id: &str| report.results.iter().find(|r| r.question_id == id).unwrap();

    // Accepted alternative matches exactly.
    assert_eq!(by_id("ownership").score.score, 108);
    // "the type checker" vs "the borrow checker": 16 / 28 similar, medium,
    // quick but with hints.
    let borrow = by_id("borrow-checker");
    assert_eq!(borrow.score.score, 57 * 2 + 5);
    assert!(!borrow.score.passed);
    // Not answered at all.
    let shared = by_id("shared-refs");
    assert!(!shared.answered);
    assert_eq!(shared.score.score, 0);

    assert!(report.stats.percentage < 1.0);
    assert_eq!(report.stats.answered, 4);
}

#[test]
fn reports_persist_and_compare() {
    let dir = tempfile::tempdir().unwrap();
    let first_path = dir.path().join("first.json");
    let second_path = dir.path().join("second.json");

    grade("../../attempts/rust-basics-first.json")
        .save_json(&first_path)
        .unwrap();
    grade("../../attempts/rust-basics-second.json")
        .save_json(&second_path)
        .unwrap();

    let first = QuizReport::load_json(&first_path).unwrap();
    let second = QuizReport::load_json(&second_path).unwrap();

    let progress = second.compare(&first, 0.05);
    assert!(!progress.has_regressions());
    assert!(progress
        .improvements
        .iter()
        .any(|c| c.question_id == "shared-refs"));
    assert_eq!(progress.new_questions, 0);
    assert_eq!(progress.removed_questions, 0);

    let backwards = first.compare(&second, 0.05);
    assert!(backwards.has_regressions());
    assert_eq!(backwards.regressions.len(), progress.improvements.len());
}
