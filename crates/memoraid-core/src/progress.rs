//! Points and accuracy aggregation.
//!
//! Sums the append-only reward ledger and derives an accuracy percentage
//! from the answer history. Consumes the fields `scoring::evaluate` produces
//! but is otherwise independent of the scorer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{AnswerRecord, RewardEntry};

/// A user's recall progress: answer counts, accuracy, and total points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Answers the scorer judged correct.
    pub correct_answers: usize,
    /// All recorded answers.
    pub total_answers: usize,
    /// correct / total as a percentage, rounded to one decimal place.
    /// 0.0 when no answers have been recorded.
    pub accuracy_pct: f64,
    /// Sum of all reward-ledger entries.
    pub total_points: u64,
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} correct ({:.1}%), {} points",
            self.correct_answers, self.total_answers, self.accuracy_pct, self.total_points
        )
    }
}

/// Compute a progress report from a user's answer history and reward ledger.
pub fn compute_progress(answers: &[AnswerRecord], rewards: &[RewardEntry]) -> ProgressReport {
    let total_answers = answers.len();
    let correct_answers = answers.iter().filter(|a| a.is_correct).count();

    let accuracy_pct = if total_answers > 0 {
        let raw = correct_answers as f64 / total_answers as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    } else {
        0.0
    };

    let total_points = rewards.iter().map(|r| r.points as u64).sum();

    ProgressReport {
        correct_answers,
        total_answers,
        accuracy_pct,
        total_points,
    }
}
