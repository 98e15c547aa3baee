//! Free-text answer scoring.
//!
//! A submitted answer is compared against the canonical answer with
//! [`compare_two_strings`], weighted by the question's difficulty, and topped
//! up with bonuses for answering quickly and without hints.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CriteriaError;
use crate::similarity::compare_two_strings;

/// Answers below this similarity earn nothing, whatever the criteria say.
pub const MIN_SIMILARITY: f64 = 0.2;

/// Everything we know about a submitted answer besides its text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerMetadata {
    /// The raw answer text as submitted.
    #[serde(default)]
    pub answer: String,
    /// Seconds the user spent on the question.
    #[serde(default)]
    pub time_spent: f64,
    /// Whether the user revealed any hints.
    #[serde(default)]
    pub hints_used: bool,
    /// Difficulty label, e.g. "easy", "medium", "hard". Matched case-insensitively.
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_difficulty() -> String {
    "easy".to_string()
}

/// Bonus point values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusPoints {
    /// Awarded when the answer came in under the time limit.
    #[serde(default = "default_quick_answer")]
    pub quick_answer: u32,
    /// Awarded when no hints were used.
    #[serde(default = "default_no_hints")]
    pub no_hints: u32,
}

fn default_quick_answer() -> u32 {
    5
}
fn default_no_hints() -> u32 {
    3
}

impl Default for BonusPoints {
    fn default() -> Self {
        Self {
            quick_answer: default_quick_answer(),
            no_hints: default_no_hints(),
        }
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringCriteria {
    /// Similarity at or above which an answer counts as passed.
    ///
    /// Points are gated only by [`MIN_SIMILARITY`]; this threshold decides the
    /// `passed` flag and pass counts in reports.
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,
    /// Multiplier per lowercase difficulty label.
    #[serde(default = "default_weights")]
    pub difficulty_weights: BTreeMap<String, u32>,
    #[serde(default)]
    pub bonus_points: BonusPoints,
    /// Answers faster than this many seconds get the quick-answer bonus.
    #[serde(default = "default_time_limit", rename = "time_limit_secs")]
    pub time_limit: f64,
}

fn default_threshold() -> f64 {
    0.6
}

fn default_weights() -> BTreeMap<String, u32> {
    BTreeMap::from([
        ("easy".to_string(), 1),
        ("medium".to_string(), 2),
        ("hard".to_string(), 3),
    ])
}

fn default_time_limit() -> f64 {
    300.0
}

impl Default for ScoringCriteria {
    fn default() -> Self {
        Self {
            similarity_threshold: default_threshold(),
            difficulty_weights: default_weights(),
            bonus_points: BonusPoints::default(),
            time_limit: default_time_limit(),
        }
    }
}

impl ScoringCriteria {
    /// Weight for a difficulty label, or `None` if the label is unknown.
    pub fn weight_for(&self, difficulty: &str) -> Option<u32> {
        self.difficulty_weights
            .get(difficulty.trim().to_lowercase().as_str())
            .copied()
    }

    /// Whether a difficulty label has a configured weight.
    pub fn knows_difficulty(&self, difficulty: &str) -> bool {
        self.weight_for(difficulty).is_some()
    }

    /// Highest score a question of this difficulty can earn, saturating at
    /// `u32::MAX`.
    pub fn max_score(&self, difficulty: &str) -> u32 {
        self.weight_for(difficulty)
            .unwrap_or(1)
            .saturating_mul(100)
            .saturating_add(self.bonus_points.quick_answer)
            .saturating_add(self.bonus_points.no_hints)
    }

    /// Lowercase the weight table keys so lookups are case-insensitive.
    pub fn normalized(mut self) -> Self {
        self.difficulty_weights = self
            .difficulty_weights
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v))
            .collect();
        self
    }

    /// Check the criteria for values that would make scores meaningless.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(CriteriaError::InvalidThreshold(self.similarity_threshold));
        }
        if !self.time_limit.is_finite() || self.time_limit < 0.0 {
            return Err(CriteriaError::InvalidTimeLimit(self.time_limit));
        }
        if self.difficulty_weights.is_empty() {
            return Err(CriteriaError::EmptyWeights);
        }
        if let Some((name, _)) = self.difficulty_weights.iter().find(|(_, w)| **w == 0) {
            return Err(CriteriaError::ZeroWeight(name.clone()));
        }
        Ok(())
    }
}

/// The kind of bonus awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    #[serde(rename = "Quick Answer")]
    QuickAnswer,
    #[serde(rename = "No Hints Used")]
    NoHintsUsed,
}

impl fmt::Display for BonusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusKind::QuickAnswer => write!(f, "Quick Answer"),
            BonusKind::NoHintsUsed => write!(f, "No Hints Used"),
        }
    }
}

/// A bonus applied to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    #[serde(rename = "type")]
    pub kind: BonusKind,
    pub points: u32,
}

/// The outcome of scoring one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionScore {
    /// Total points including bonuses.
    pub score: u32,
    /// Raw similarity ratio in `[0, 1]`.
    pub similarity: f64,
    /// Bonuses included in `score`.
    pub bonuses: Vec<Bonus>,
    /// Multiplier that was applied, 0 when the answer fell below the floor.
    #[serde(default)]
    pub difficulty_weight: u32,
    /// Whether `similarity` reached both the scoring floor and the criteria's
    /// pass threshold. An answer worth no points never passes.
    #[serde(default)]
    pub passed: bool,
}

impl QuestionScore {
    /// Score without bonuses.
    pub fn base_score(&self) -> u32 {
        self.score.saturating_sub(self.bonus_total())
    }

    pub fn bonus_total(&self) -> u32 {
        self.bonuses
            .iter()
            .fold(0, |total: u32, b| total.saturating_add(b.points))
    }
}

/// Score a free-text answer against the correct one.
///
/// Never fails: unknown difficulties fall back to a weight of 1.
pub fn calculate_question_score(
    user_answer: &str,
    correct_answer: &str,
    metadata: &AnswerMetadata,
    criteria: &ScoringCriteria,
) -> QuestionScore {
    let similarity = compare_two_strings(user_answer, correct_answer);
    score_similarity(similarity, metadata, criteria)
}

/// [`calculate_question_score`] with [`ScoringCriteria::default`].
pub fn score_with_defaults(
    user_answer: &str,
    correct_answer: &str,
    metadata: &AnswerMetadata,
) -> QuestionScore {
    calculate_question_score(
        user_answer,
        correct_answer,
        metadata,
        &ScoringCriteria::default(),
    )
}

/// Score an answer against the canonical answer and any accepted alternatives,
/// keeping the closest match.
pub fn score_against_any<S: AsRef<str>>(
    user_answer: &str,
    correct_answer: &str,
    alternatives: &[S],
    metadata: &AnswerMetadata,
    criteria: &ScoringCriteria,
) -> QuestionScore {
    let similarity = alternatives
        .iter()
        .map(|alt| compare_two_strings(user_answer, alt.as_ref()))
        .fold(compare_two_strings(user_answer, correct_answer), f64::max);
    score_similarity(similarity, metadata, criteria)
}

fn score_similarity(
    similarity: f64,
    metadata: &AnswerMetadata,
    criteria: &ScoringCriteria,
) -> QuestionScore {
    if similarity < MIN_SIMILARITY {
        return QuestionScore {
            score: 0,
            similarity,
            bonuses: Vec::new(),
            difficulty_weight: 0,
            passed: false,
        };
    }

    let passed = similarity >= criteria.similarity_threshold;

    let difficulty_weight = criteria.weight_for(&metadata.difficulty).unwrap_or_else(|| {
        tracing::warn!(
            "unknown difficulty '{}', scoring with weight 1",
            metadata.difficulty
        );
        1
    });

    // Weights and bonuses are unbounded in config; scores saturate.
    let mut score = ((similarity * 100.0).round() as u32).saturating_mul(difficulty_weight);
    let mut bonuses = Vec::new();

    if metadata.time_spent < criteria.time_limit {
        let points = criteria.bonus_points.quick_answer;
        score = score.saturating_add(points);
        bonuses.push(Bonus {
            kind: BonusKind::QuickAnswer,
            points,
        });
    }

    if !metadata.hints_used {
        let points = criteria.bonus_points.no_hints;
        score = score.saturating_add(points);
        bonuses.push(Bonus {
            kind: BonusKind::NoHintsUsed,
            points,
        });
    }

    QuestionScore {
        score,
        similarity,
        bonuses,
        difficulty_weight,
        passed,
    }
}
