//! Quiz reports with JSON persistence and progress comparison.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Attempt, Quiz};
use crate::scoring::{score_against_any, AnswerMetadata, QuestionScore, ScoringCriteria};
use crate::statistics::{compute_quiz_stats, QuizStats};

/// A graded quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub quiz: QuizSummary,
    /// Who made the attempt, if known.
    #[serde(default)]
    pub user: Option<String>,
    /// One entry per quiz question, in quiz order.
    pub results: Vec<QuestionResult>,
    pub stats: QuizStats,
    /// Criteria the attempt was scored with.
    pub criteria: ScoringCriteria,
}

/// Summary of a quiz (without the questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

/// The graded outcome of one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub difficulty: String,
    /// False when the attempt had no answer for this question.
    pub answered: bool,
    pub answer: String,
    pub score: QuestionScore,
    /// Best achievable score for this question.
    pub max_score: u32,
}

impl QuestionResult {
    /// Score as a fraction of the best achievable score.
    pub fn ratio(&self) -> f64 {
        if self.max_score == 0 {
            0.0
        } else {
            self.score.score as f64 / self.max_score as f64
        }
    }
}

/// Grade every question of `quiz` against the answers in `attempt`.
///
/// Unanswered questions are scored as an empty answer. Answers to questions
/// the quiz doesn't have are ignored, and only the first answer to a question
/// counts.
pub fn grade_quiz(quiz: &Quiz, attempt: &Attempt, criteria: &ScoringCriteria) -> QuizReport {
    if attempt.quiz_id != quiz.id {
        tracing::warn!(
            "attempt is for quiz '{}' but grading against '{}'",
            attempt.quiz_id,
            quiz.id
        );
    }

    let known: HashSet<&str> = quiz.questions.iter().map(|q| q.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    for entry in &attempt.answers {
        if !known.contains(entry.question_id.as_str()) {
            tracing::warn!(
                "ignoring answer for unknown question '{}' in quiz '{}'",
                entry.question_id,
                quiz.id
            );
        } else if !seen.insert(entry.question_id.as_str()) {
            tracing::warn!(
                "ignoring duplicate answer for question '{}', grading the first one",
                entry.question_id
            );
        }
    }

    let results: Vec<QuestionResult> = quiz
        .questions
        .iter()
        .map(|question| {
            let difficulty = quiz.difficulty_of(question).to_string();
            let entry = attempt.answer_for(&question.id);
            let metadata = AnswerMetadata {
                answer: entry.map(|e| e.answer.clone()).unwrap_or_default(),
                time_spent: entry.map(|e| e.time_spent).unwrap_or(0.0),
                hints_used: entry.map(|e| e.hints_used).unwrap_or(false),
                difficulty: difficulty.clone(),
            };

            let score = score_against_any(
                &metadata.answer,
                &question.answer,
                &question.accepted_answers,
                &metadata,
                criteria,
            );
            tracing::debug!(
                question = %question.id,
                similarity = score.similarity,
                score = score.score,
                "graded question"
            );

            QuestionResult {
                question_id: question.id.clone(),
                max_score: criteria.max_score(&difficulty),
                difficulty,
                answered: entry.is_some(),
                answer: metadata.answer,
                score,
            }
        })
        .collect();

    let stats = compute_quiz_stats(&results);

    QuizReport {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        quiz: QuizSummary {
            id: quiz.id.clone(),
            name: quiz.name.clone(),
            question_count: quiz.questions.len(),
        },
        user: attempt.user.clone(),
        results,
        stats,
        criteria: criteria.clone(),
    }
}

impl QuizReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.quiz.name));
        if let Some(user) = &self.user {
            md.push_str(&format!("**User:** {user}\n\n"));
        }
        md.push_str(&format!(
            "**Score:** {} / {} ({:.1}%), {} of {} passed\n\n",
            self.stats.total_score,
            self.stats.max_score,
            self.stats.percentage * 100.0,
            self.stats.passed,
            self.stats.question_count
        ));

        md.push_str("| Question | Difficulty | Similarity | Score | Bonuses |\n");
        md.push_str("|----------|------------|------------|-------|---------|\n");
        for r in &self.results {
            let bonuses = if r.score.bonuses.is_empty() {
                "-".to_string()
            } else {
                r.score
                    .bonuses
                    .iter()
                    .map(|b| format!("{} (+{})", b.kind, b.points))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            md.push_str(&format!(
                "| {} | {} | {:.1}% | {} / {} | {} |\n",
                r.question_id,
                r.difficulty,
                r.score.similarity * 100.0,
                r.score.score,
                r.max_score,
                bonuses
            ));
        }

        md
    }

    /// Compare this report against an earlier one, question by question.
    ///
    /// Scores are compared as fractions of each question's maximum, so a
    /// change of criteria between attempts does not show up as progress.
    pub fn compare(&self, baseline: &QuizReport, threshold: f64) -> ProgressReport {
        let ratio_map = |report: &QuizReport| -> HashMap<String, f64> {
            report
                .results
                .iter()
                .map(|r| (r.question_id.clone(), r.ratio()))
                .collect()
        };

        let baseline_scores = ratio_map(baseline);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_questions = 0usize;

        for r in &self.results {
            let current = r.ratio();
            let Some(&baseline_val) = baseline_scores.get(&r.question_id) else {
                new_questions += 1;
                continue;
            };
            let delta = current - baseline_val;
            let change = ScoreChange {
                question_id: r.question_id.clone(),
                baseline_score: baseline_val,
                current_score: current,
                delta,
            };
            if delta < -threshold {
                regressions.push(change);
            } else if delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let current_ids: HashSet<&str> =
            self.results.iter().map(|r| r.question_id.as_str()).collect();
        let removed_questions = baseline_scores
            .keys()
            .filter(|k| !current_ids.contains(k.as_str()))
            .count();

        ProgressReport {
            regressions,
            improvements,
            unchanged,
            new_questions,
            removed_questions,
            baseline_percentage: baseline.stats.percentage,
            current_percentage: self.stats.percentage,
        }
    }
}

/// Result of comparing two attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Questions where the score went down.
    pub regressions: Vec<ScoreChange>,
    /// Questions where the score went up.
    pub improvements: Vec<ScoreChange>,
    /// Questions with no significant change.
    pub unchanged: usize,
    /// Questions in current but not baseline.
    pub new_questions: usize,
    /// Questions in baseline but not current.
    pub removed_questions: usize,
    pub baseline_percentage: f64,
    pub current_percentage: f64,
}

/// A significant change in one question's normalized score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub question_id: String,
    pub baseline_score: f64,
    pub current_score: f64,
    pub delta: f64,
}

impl ProgressReport {
    /// Format the progress report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged ({:.1}% -> {:.1}%)\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged,
            self.baseline_percentage * 100.0,
            self.current_percentage * 100.0
        ));

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Question | Baseline | Current | Delta |\n");
            md.push_str("|----------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% | {:+.1}% |\n",
                    c.question_id,
                    c.baseline_score * 100.0,
                    c.current_score * 100.0,
                    c.delta * 100.0
                ));
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}
