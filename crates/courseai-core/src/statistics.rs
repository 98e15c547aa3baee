//! Aggregate statistics over graded questions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::report::QuestionResult;

/// Totals for a whole quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizStats {
    /// Sum of all question scores, bonuses included.
    pub total_score: u32,
    /// Sum of the best achievable score of every question.
    pub max_score: u32,
    /// `total_score / max_score`, 0 for an empty quiz.
    pub percentage: f64,
    /// Mean similarity across all questions, unanswered ones count as 0.
    pub avg_similarity: f64,
    pub answered: usize,
    pub passed: usize,
    pub question_count: usize,
    /// Breakdown keyed by lowercase difficulty.
    pub per_difficulty: BTreeMap<String, DifficultyStats>,
}

/// Statistics for the questions of one difficulty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub question_count: usize,
    pub passed: usize,
    pub total_score: u32,
    pub max_score: u32,
    pub avg_similarity: f64,
}

/// Compute aggregate statistics from graded questions.
pub fn compute_quiz_stats(results: &[QuestionResult]) -> QuizStats {
    let question_count = results.len();
    let total_score = saturating_sum(results.iter().map(|r| r.score.score));
    let max_score = saturating_sum(results.iter().map(|r| r.max_score));

    let percentage = if max_score == 0 {
        0.0
    } else {
        total_score as f64 / max_score as f64
    };

    let avg_similarity = mean(results.iter().map(|r| r.score.similarity));

    let mut per_difficulty: BTreeMap<String, DifficultyStats> = BTreeMap::new();
    let mut similarity_sums: BTreeMap<String, f64> = BTreeMap::new();
    for r in results {
        let key = r.difficulty.to_lowercase();
        let stats = per_difficulty.entry(key.clone()).or_default();
        stats.question_count += 1;
        stats.total_score = stats.total_score.saturating_add(r.score.score);
        stats.max_score = stats.max_score.saturating_add(r.max_score);
        if r.score.passed {
            stats.passed += 1;
        }
        *similarity_sums.entry(key).or_insert(0.0) += r.score.similarity;
    }
    for (key, stats) in per_difficulty.iter_mut() {
        let sum = similarity_sums.get(key).copied().unwrap_or(0.0);
        stats.avg_similarity = sum / stats.question_count.max(1) as f64;
    }

    QuizStats {
        total_score,
        max_score,
        percentage,
        avg_similarity,
        answered: results.iter().filter(|r| r.answered).count(),
        passed: results.iter().filter(|r| r.score.passed).count(),
        question_count,
        per_difficulty,
    }
}

fn saturating_sum(values: impl Iterator<Item = u32>) -> u32 {
    values.fold(0, u32::saturating_add)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}
