//! Core trait definitions for generative-model providers and memory stores.
//!
//! These async traits are implemented by the `memoraid-providers` and
//! `memoraid-store` crates respectively.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{AnswerRecord, Contributor, Memory, Question, RewardEntry};

// ---------------------------------------------------------------------------
// Question model trait
// ---------------------------------------------------------------------------

/// Trait for generative-AI backends that produce recall questions.
#[async_trait]
pub trait QuestionModel: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate text from a prompt.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse>;

    /// List available models for this provider.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request to generate text from a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "gemini-pro").
    pub model: String,
    /// The full prompt, already templated.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Response from a model generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The raw response text.
    pub content: String,
    /// Model that actually generated the response.
    pub model: String,
    /// Token usage.
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting for a single generation request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    pub estimated_cost_usd: f64,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Provider name.
    pub provider: String,
    /// Maximum context window size in tokens.
    pub max_context: u32,
    /// Cost per 1K input tokens in USD.
    pub cost_per_1k_input: f64,
    /// Cost per 1K output tokens in USD.
    pub cost_per_1k_output: f64,
}

// ---------------------------------------------------------------------------
// Memory store trait
// ---------------------------------------------------------------------------

/// Trait for the persistence collaborator.
///
/// The quiz service reads memories and questions through this trait and
/// writes answer records and reward-ledger entries back through it. Any
/// backend satisfying these operations substitutes for the hosted database.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Insert a contributor.
    async fn create_contributor(&self, contributor: Contributor) -> Result<(), StoreError>;

    /// Fetch a contributor by id.
    async fn get_contributor(&self, id: Uuid) -> Result<Contributor, StoreError>;

    /// Insert a memory. The contributor must exist.
    async fn create_memory(&self, memory: Memory) -> Result<(), StoreError>;

    /// Fetch a memory by id.
    async fn get_memory(&self, id: Uuid) -> Result<Memory, StoreError>;

    /// All memories contributed for a user, most recent first.
    async fn memories_for_user(&self, user_id: Uuid) -> Result<Vec<Memory>, StoreError>;

    /// Delete a memory and its questions.
    async fn delete_memory(&self, id: Uuid) -> Result<(), StoreError>;

    /// Insert generated questions.
    async fn insert_questions(&self, questions: Vec<Question>) -> Result<(), StoreError>;

    /// All questions for a memory.
    async fn questions_for_memory(&self, memory_id: Uuid) -> Result<Vec<Question>, StoreError>;

    /// Fetch a question by id.
    async fn get_question(&self, id: Uuid) -> Result<Question, StoreError>;

    /// Record an answer submission.
    async fn record_answer(&self, answer: AnswerRecord) -> Result<(), StoreError>;

    /// Append a reward-ledger entry.
    async fn append_reward(&self, reward: RewardEntry) -> Result<(), StoreError>;

    /// A user's full answer history.
    async fn answers_for_user(&self, user_id: Uuid) -> Result<Vec<AnswerRecord>, StoreError>;

    /// A user's full reward ledger.
    async fn rewards_for_user(&self, user_id: Uuid) -> Result<Vec<RewardEntry>, StoreError>;
}
