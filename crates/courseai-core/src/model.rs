//! Core data model types for courseai.
//!
//! Quizzes and their questions, user attempts, single-answer submissions, and
//! background jobs ordered by the priority queue.

use serde::{Deserialize, Serialize};

use crate::scoring::AnswerMetadata;

/// A free-text question with a canonical answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the quiz.
    pub id: String,
    /// The question shown to the user.
    pub prompt: String,
    /// The canonical correct answer.
    pub answer: String,
    /// Other answers that should also be accepted.
    #[serde(default)]
    pub accepted_answers: Vec<String>,
    /// Difficulty label; falls back to the quiz default when absent.
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Tags for filtering questions.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// An ordered collection of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier for this quiz.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Difficulty for questions that don't specify one.
    #[serde(default = "default_difficulty")]
    pub default_difficulty: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

fn default_difficulty() -> String {
    "easy".to_string()
}

impl Quiz {
    /// The difficulty a question is scored at.
    pub fn difficulty_of<'a>(&'a self, question: &'a Question) -> &'a str {
        question
            .difficulty
            .as_deref()
            .unwrap_or(&self.default_difficulty)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// One answer inside an [`Attempt`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: String,
    #[serde(default)]
    pub answer: String,
    /// Seconds spent on the question.
    #[serde(default)]
    pub time_spent: f64,
    #[serde(default)]
    pub hints_used: bool,
}

/// A user's answers to a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub quiz_id: String,
    /// Optional label for who made the attempt.
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub answers: Vec<AnswerEntry>,
}

impl Attempt {
    /// The first answer given for a question, if any.
    pub fn answer_for(&self, question_id: &str) -> Option<&AnswerEntry> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }
}

/// A single-answer grading request, as posted by a quiz-completion handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub answer: String,
    pub correct_answer: String,
    #[serde(default)]
    pub time_spent: f64,
    #[serde(default)]
    pub hints_used: bool,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

impl Submission {
    pub fn metadata(&self) -> AnswerMetadata {
        AnswerMetadata {
            answer: self.answer.clone(),
            time_spent: self.time_spent,
            hints_used: self.hints_used,
            difficulty: self.difficulty.clone(),
        }
    }
}

/// A unit of background work with a numeric priority (lower runs first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub priority: f64,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_uses_camel_case() {
        let json = r#"{
            "answer": "hello",
            "correctAnswer": "hello",
            "timeSpent": 10,
            "hintsUsed": false,
            "difficulty": "easy"
        }"#;
        let sub: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(sub.correct_answer, "hello");
        assert_eq!(sub.time_spent, 10.0);
        assert!(!sub.hints_used);

        let meta = sub.metadata();
        assert_eq!(meta.answer, "hello");
        assert_eq!(meta.difficulty, "easy");
    }

    #[test]
    fn submission_defaults() {
        let sub: Submission =
            serde_json::from_str(r#"{"answer": "a", "correctAnswer": "b"}"#).unwrap();
        assert_eq!(sub.difficulty, "easy");
        assert_eq!(sub.time_spent, 0.0);
        assert!(!sub.hints_used);
    }

    #[test]
    fn attempt_lookup() {
        let json = r#"{
            "quizId": "rust-basics",
            "answers": [
                {"questionId": "q1", "answer": "first", "timeSpent": 4.5},
                {"questionId": "q1", "answer": "duplicate"},
                {"questionId": "q2", "answer": "second", "hintsUsed": true}
            ]
        }"#;
        let attempt: Attempt = serde_json::from_str(json).unwrap();
        assert_eq!(attempt.user, None);
        assert_eq!(attempt.answer_for("q1").unwrap().answer, "first");
        assert!(attempt.answer_for("q2").unwrap().hints_used);
        assert!(attempt.answer_for("q3").is_none());
    }

    #[test]
    fn question_difficulty_falls_back_to_quiz_default() {
        let quiz = Quiz {
            id: "q".into(),
            name: "Q".into(),
            description: String::new(),
            default_difficulty: "medium".into(),
            questions: vec![
                Question {
                    id: "a".into(),
                    prompt: "?".into(),
                    answer: "x".into(),
                    accepted_answers: vec![],
                    difficulty: None,
                    tags: vec![],
                },
                Question {
                    id: "b".into(),
                    prompt: "?".into(),
                    answer: "y".into(),
                    accepted_answers: vec![],
                    difficulty: Some("hard".into()),
                    tags: vec![],
                },
            ],
        };
        assert_eq!(quiz.difficulty_of(&quiz.questions[0]), "medium");
        assert_eq!(quiz.difficulty_of(quiz.question("b").unwrap()), "hard");
        assert!(quiz.question("c").is_none());
    }
}
