//! Core data model types for memoraid.
//!
//! These are the fundamental types the entire memoraid system uses to
//! represent contributors, memories, recall questions, and answers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A person who contributes memories on behalf of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    /// Unique identifier for this contributor.
    pub id: Uuid,
    /// The user this contributor submits memories for.
    pub user_id: Uuid,
    /// Contributor's display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// How the contributor relates to the user.
    pub relationship_type: RelationshipType,
    /// How long they have known each other, in years.
    pub relationship_years: u32,
}

/// How a contributor relates to the user whose memories they share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    Family,
    Friend,
    Partner,
    Colleague,
    Caregiver,
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipType::Family => write!(f, "family"),
            RelationshipType::Friend => write!(f, "friend"),
            RelationshipType::Partner => write!(f, "partner"),
            RelationshipType::Colleague => write!(f, "colleague"),
            RelationshipType::Caregiver => write!(f, "caregiver"),
        }
    }
}

impl FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "family" | "relative" => Ok(RelationshipType::Family),
            "friend" => Ok(RelationshipType::Friend),
            "partner" | "spouse" => Ok(RelationshipType::Partner),
            "colleague" | "coworker" => Ok(RelationshipType::Colleague),
            "caregiver" => Ok(RelationshipType::Caregiver),
            other => Err(format!("unknown relationship type: {other}")),
        }
    }
}

/// A single contributed memory: a photo plus a free-text description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    /// Unique identifier for this memory.
    pub id: Uuid,
    /// The contributor who submitted it.
    pub contributor_id: Uuid,
    /// Public URL of the associated photo, if one was uploaded.
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Free-text description of the memory.
    pub description: String,
    /// When the remembered event happened, if known.
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    /// When the memory was submitted.
    pub created_at: DateTime<Utc>,
}

/// A recall question generated for a memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    pub id: Uuid,
    /// The memory this question is about.
    pub memory_id: Uuid,
    /// The question text.
    pub question: String,
    /// The stored reference answer. Non-empty by construction.
    pub correct_answer: String,
    /// Points awarded for a correct answer.
    pub points: u32,
    /// Difficulty level, 1 (easiest) to 5.
    pub difficulty: u8,
}

/// A question as produced by the generative model, before persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    /// The question text.
    pub question: String,
    /// The reference answer derived from the memory description.
    pub correct_answer: String,
    /// Difficulty level, 1 to 5.
    pub difficulty: u8,
    /// Points awarded for a correct answer, 5 to 20 by difficulty.
    pub points: u32,
}

/// A recorded answer submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// The user who answered.
    pub user_id: Uuid,
    /// The question that was answered.
    pub question_id: Uuid,
    /// The submitted answer text, verbatim.
    pub answer: String,
    /// Whether the scorer judged it correct.
    pub is_correct: bool,
    /// When the answer was submitted.
    pub answered_at: DateTime<Utc>,
}

/// An append-only reward-ledger entry. Summed externally for total score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardEntry {
    /// The user the points are attributed to.
    pub user_id: Uuid,
    /// Points granted.
    pub points: u32,
    /// Why the points were granted.
    pub reward_type: RewardType,
    /// When the entry was appended.
    pub granted_at: DateTime<Utc>,
}

/// Reason a reward-ledger entry was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardType {
    QuestionCorrect,
}
