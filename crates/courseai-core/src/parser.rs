//! Quiz, attempt, and job file loading.
//!
//! Quizzes and job lists are TOML; attempts are JSON, matching what the
//! quiz-completion handlers post.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Attempt, Job, Question, Quiz};
use crate::scoring::ScoringCriteria;

/// Intermediate TOML structure for quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_difficulty")]
    default_difficulty: String,
}

fn default_difficulty() -> String {
    "easy".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(default)]
    prompt: String,
    answer: String,
    #[serde(default)]
    accepted_answers: Vec<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlJobsFile {
    #[serde(default)]
    jobs: Vec<Job>,
}

/// Parse a single TOML file into a `Quiz`.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `Quiz`.
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            id: q.id,
            prompt: q.prompt,
            answer: q.answer,
            accepted_answers: q.accepted_answers,
            difficulty: q.difficulty.map(|d| d.trim().to_lowercase()),
            tags: q.tags,
        })
        .collect();

    Ok(Quiz {
        id: parsed.quiz.id,
        name: parsed.quiz.name,
        description: parsed.quiz.description,
        default_difficulty: parsed.quiz.default_difficulty.trim().to_lowercase(),
        questions,
    })
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<Quiz>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// Load a quiz from a file, or every quiz under a directory.
pub fn load_quizzes(path: &Path) -> Result<Vec<Quiz>> {
    if path.is_dir() {
        load_quiz_directory(path)
    } else {
        Ok(vec![parse_quiz(path)?])
    }
}

/// Load an attempt from a JSON file.
pub fn load_attempt(path: &Path) -> Result<Attempt> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read attempt file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse attempt JSON: {}", path.display()))
}

/// Load a list of jobs from a TOML file with `[[jobs]]` tables.
pub fn parse_jobs(path: &Path) -> Result<Vec<Job>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read jobs file: {}", path.display()))?;
    parse_jobs_str(&content, path)
}

pub fn parse_jobs_str(content: &str, source_path: &Path) -> Result<Vec<Job>> {
    let parsed: TomlJobsFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    for job in &parsed.jobs {
        anyhow::ensure!(
            job.priority.is_finite(),
            "job '{}' has a non-finite priority",
            job.name
        );
    }

    Ok(parsed.jobs)
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    pub message: String,
}

/// Validate a quiz for common issues.
pub fn validate_quiz(quiz: &Quiz, criteria: &ScoringCriteria) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "quiz has no questions".into(),
        });
    }

    if !criteria.knows_difficulty(&quiz.default_difficulty) {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "default difficulty '{}' has no weight, scored as 1",
                quiz.default_difficulty
            ),
        });
    }

    let mut seen_ids = HashSet::new();
    for question in &quiz.questions {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message,
            })
        };

        if !seen_ids.insert(&question.id) {
            warn(format!("duplicate question ID: {}", question.id));
        }
        if question.prompt.trim().is_empty() {
            warn("prompt is empty".into());
        }
        if question.answer.trim().is_empty() {
            warn("answer is empty, every submission will score 0".into());
        }
        if let Some(difficulty) = &question.difficulty {
            if !criteria.knows_difficulty(difficulty) {
                warn(format!("unknown difficulty '{difficulty}', scored as 1"));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[quiz]
id = "rust-basics"
name = "Rust Basics"
description = "Ownership and borrowing"
default_difficulty = "Easy"

[[questions]]
id = "owner"
prompt = "How many owners can a value have at a time?"
answer = "one"
accepted_answers = ["exactly one", "a single owner"]
tags = ["ownership"]

[[questions]]
id = "borrow"
prompt = "What enforces borrowing rules at compile time?"
answer = "the borrow checker"
difficulty = "MEDIUM"
"#;

    #[test]
    fn parse_valid_toml() {
        let quiz = parse_quiz_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(quiz.id, "rust-basics");
        assert_eq!(quiz.default_difficulty, "easy");
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].accepted_answers.len(), 2);
        assert_eq!(quiz.questions[0].difficulty, None);
        assert_eq!(quiz.questions[1].difficulty.as_deref(), Some("medium"));
        assert!(validate_quiz(&quiz, &ScoringCriteria::default()).is_empty());
    }

    #[test]
    fn parse_missing_answer_fails() {
        let toml = r#"
[quiz]
id = "broken"
name = "Broken"

[[questions]]
id = "q1"
prompt = "no answer here"
"#;
        assert!(parse_quiz_str(toml, &PathBuf::from("broken.toml")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_quiz_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_reports_issues() {
        let toml = r#"
[quiz]
id = "issues"
name = "Issues"
default_difficulty = "legendary"

[[questions]]
id = "same"
prompt = "First"
answer = "a"

[[questions]]
id = "same"
prompt = "  "
answer = ""
difficulty = "expert"
"#;
        let quiz = parse_quiz_str(toml, &PathBuf::from("issues.toml")).unwrap();
        let warnings = validate_quiz(&quiz, &ScoringCriteria::default());
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();

        assert!(messages.iter().any(|m| m.contains("default difficulty 'legendary'")));
        assert!(messages.iter().any(|m| m.contains("duplicate")));
        assert!(messages.iter().any(|m| m.contains("prompt is empty")));
        assert!(messages.iter().any(|m| m.contains("answer is empty")));
        assert!(messages.iter().any(|m| m.contains("unknown difficulty 'expert'")));
        assert_eq!(warnings.len(), 5);
    }

    #[test]
    fn validate_empty_quiz() {
        let toml = "[quiz]\nid = \"empty\"\nname = \"Empty\"\n";
        let quiz = parse_quiz_str(toml, &PathBuf::from("empty.toml")).unwrap();
        let warnings = validate_quiz(&quiz, &ScoringCriteria::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].question_id.is_none());
    }

    #[test]
    fn load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("basics.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [toml").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            nested.join("more.toml"),
            VALID_TOML.replace("rust-basics", "rust-more"),
        )
        .unwrap();

        let quizzes = load_quiz_directory(dir.path()).unwrap();
        let ids: Vec<&str> = quizzes.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["rust-basics", "rust-more"]);
    }

    #[test]
    fn load_directory_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("quiz.toml");
        std::fs::write(&file, VALID_TOML).unwrap();
        assert!(load_quiz_directory(&file).is_err());
        assert_eq!(load_quizzes(&file).unwrap().len(), 1);
    }

    #[test]
    fn load_attempt_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attempt.json");
        std::fs::write(
            &path,
            r#"{"quizId": "rust-basics", "user": "sam", "answers": [{"questionId": "owner", "answer": "one"}]}"#,
        )
        .unwrap();

        let attempt = load_attempt(&path).unwrap();
        assert_eq!(attempt.quiz_id, "rust-basics");
        assert_eq!(attempt.answers.len(), 1);
        assert!(load_attempt(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn parse_jobs_file() {
        let toml = r#"
[[jobs]]
name = "send-digest"
priority = 5

[[jobs]]
name = "transcode-video"
priority = 1.5
description = "lesson 3 upload"
"#;
        let jobs = parse_jobs_str(toml, &PathBuf::from("jobs.toml")).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].priority, 5.0);
        assert_eq!(jobs[1].description, "lesson 3 upload");

        let nan = "[[jobs]]\nname = \"bad\"\npriority = nan\n";
        assert!(parse_jobs_str(nan, &PathBuf::from("jobs.toml")).is_err());
    }
}
