//! Quiz service orchestrator.
//!
//! Coordinates question generation against a model provider (with retries),
//! daily quiz selection, answer submission, and progress reporting. This is
//! the request-handling layer around the pure scorer: it owns all persistence
//! and provider I/O so `scoring::evaluate` never has to.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use rand::seq::SliceRandom;
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::error::{ProviderError, ServiceError};
use crate::model::{AnswerRecord, Memory, Question, RewardEntry, RewardType};
use crate::progress::{compute_progress, ProgressReport};
use crate::questions::{build_question_prompt, parse_generated_questions};
use crate::scoring::{evaluate, AnswerComparison};
use crate::traits::{GenerateRequest, MemoryStore, QuestionModel};

/// Configuration for the quiz service.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Retries on transient provider errors.
    pub max_retries: u32,
    /// Delay between retries.
    pub retry_delay: Duration,
    /// Temperature for question generation.
    pub temperature: f64,
    /// Max tokens for question generation.
    pub max_tokens: u32,
    /// Maximum concurrent generations in a batch.
    pub parallelism: usize,
    /// Questions served per daily quiz.
    pub daily_question_limit: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            temperature: 0.7,
            max_tokens: 2048,
            parallelism: 4,
            daily_question_limit: 5,
        }
    }
}

/// Which model to generate questions with.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    /// Provider name (e.g. "gemini").
    pub provider: String,
    /// Model identifier (e.g. "gemini-pro").
    pub model: String,
}

/// Progress reporting for batch generation.
pub trait GenerateProgress: Send + Sync {
    fn on_memory_start(&self, memory_id: Uuid);
    fn on_memory_complete(&self, memory_id: Uuid, question_count: usize);
    fn on_memory_error(&self, memory_id: Uuid, error: &str);
}

/// No-op progress reporter.
pub struct NoopProgress;

impl GenerateProgress for NoopProgress {
    fn on_memory_start(&self, _: Uuid) {}
    fn on_memory_complete(&self, _: Uuid, _: usize) {}
    fn on_memory_error(&self, _: Uuid, _: &str) {}
}

/// Outcome of a batch generation run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Memories that got questions.
    pub completed: usize,
    /// Memories that failed after retries.
    pub failed: usize,
    /// Total questions inserted.
    pub questions_generated: usize,
}

/// A daily quiz: one of the user's memories plus its questions.
#[derive(Debug, Clone)]
pub struct DailyQuiz {
    pub memory: Memory,
    pub questions: Vec<Question>,
    /// True when the memory has no questions yet and needs generation.
    pub needs_questions: bool,
}

/// Outcome of an answer submission.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub comparison: AnswerComparison,
    /// The stored reference answer, returned so the caller can display it.
    pub correct_answer: String,
}

/// The central quiz service.
pub struct QuizService {
    store: Arc<dyn MemoryStore>,
    providers: HashMap<String, Arc<dyn QuestionModel>>,
    config: QuizConfig,
}

impl QuizService {
    pub fn new(
        store: Arc<dyn MemoryStore>,
        providers: HashMap<String, Arc<dyn QuestionModel>>,
        config: QuizConfig,
    ) -> Self {
        Self {
            store,
            providers,
            config,
        }
    }

    /// Generate and persist recall questions for one memory.
    pub async fn generate_questions(
        &self,
        memory_id: Uuid,
        spec: &ModelSpec,
    ) -> Result<Vec<Question>, ServiceError> {
        let provider = self
            .providers
            .get(&spec.provider)
            .ok_or_else(|| ServiceError::UnknownProvider(spec.provider.clone()))?;

        let memory = self.store.get_memory(memory_id).await?;
        let contributor = self.store.get_contributor(memory.contributor_id).await?;

        let request = GenerateRequest {
            model: spec.model.clone(),
            prompt: build_question_prompt(&memory, &contributor),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self.generate_with_retries(provider, &request).await?;
        let generated = parse_generated_questions(&response.content)?;

        let questions: Vec<Question> = generated
            .into_iter()
            .map(|q| Question {
                id: Uuid::new_v4(),
                memory_id,
                question: q.question,
                correct_answer: q.correct_answer,
                points: q.points,
                difficulty: q.difficulty,
            })
            .collect();

        self.store.insert_questions(questions.clone()).await?;

        tracing::info!(
            memory_id = %memory_id,
            count = questions.len(),
            model = %spec.model,
            "generated questions"
        );

        Ok(questions)
    }

    /// Call the provider, retrying transient errors with exponential backoff.
    ///
    /// Permanent errors (bad key, unknown model) fail immediately. Rate-limit
    /// responses reset the delay to the provider's retry-after hint.
    async fn generate_with_retries(
        &self,
        provider: &Arc<dyn QuestionModel>,
        request: &GenerateRequest,
    ) -> Result<crate::traits::GenerateResponse, ServiceError> {
        let mut last_error = None;
        let mut retry_delay = self.config.retry_delay;

        for retry in 0..=self.config.max_retries {
            if retry > 0 {
                tokio::time::sleep(retry_delay).await;
                retry_delay = (retry_delay * 2).min(Duration::from_secs(60));
            }
            match provider.generate(request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if let Some(perr) = e.downcast_ref::<ProviderError>() {
                        if perr.is_permanent() {
                            return Err(ServiceError::Provider(e));
                        }
                        if let Some(ms) = perr.retry_after_ms() {
                            retry_delay = Duration::from_millis(ms);
                        }
                    }
                    tracing::warn!(model = %request.model, attempt = retry + 1, "provider error: {e:#}");
                    last_error = Some(e);
                }
            }
        }

        Err(ServiceError::Provider(last_error.unwrap_or_else(|| {
            anyhow::anyhow!("provider failed with no error")
        })))
    }

    /// Generate questions for many memories with bounded parallelism.
    pub async fn generate_batch(
        &self,
        memory_ids: &[Uuid],
        spec: &ModelSpec,
        progress: &dyn GenerateProgress,
    ) -> BatchSummary {
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism.max(1)));

        let mut futures = FuturesUnordered::new();
        for &memory_id in memory_ids {
            let semaphore = Arc::clone(&semaphore);
            futures.push(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (memory_id, Err(ServiceError::Provider(anyhow::anyhow!("semaphore closed"))));
                };
                progress.on_memory_start(memory_id);
                (memory_id, self.generate_questions(memory_id, spec).await)
            });
        }

        let mut summary = BatchSummary::default();
        while let Some((memory_id, result)) = futures.next().await {
            match result {
                Ok(questions) => {
                    progress.on_memory_complete(memory_id, questions.len());
                    summary.completed += 1;
                    summary.questions_generated += questions.len();
                }
                Err(e) => {
                    tracing::error!("generation failed for memory {memory_id}: {e:#}");
                    progress.on_memory_error(memory_id, &e.to_string());
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    /// Pick a random memory of the user's and return its questions.
    ///
    /// Returns `needs_questions = true` when the chosen memory has none yet;
    /// the caller decides whether to trigger generation.
    pub async fn daily_quiz(&self, user_id: Uuid) -> Result<DailyQuiz, ServiceError> {
        let memories = self.store.memories_for_user(user_id).await?;
        let memory = memories
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(ServiceError::NoMemories(user_id))?;

        let mut questions = self.store.questions_for_memory(memory.id).await?;
        questions.truncate(self.config.daily_question_limit);
        let needs_questions = questions.is_empty();

        Ok(DailyQuiz {
            memory,
            questions,
            needs_questions,
        })
    }

    /// Score a submitted answer, record it, and award points when correct.
    ///
    /// Exactly one answer record per call, and one reward-ledger append iff
    /// the answer is correct.
    pub async fn submit_answer(
        &self,
        user_id: Uuid,
        question_id: Uuid,
        answer: &str,
    ) -> Result<SubmitOutcome, ServiceError> {
        if answer.trim().is_empty() {
            return Err(ServiceError::EmptyAnswer);
        }

        let question = self.store.get_question(question_id).await?;
        let comparison = evaluate(answer, &question.correct_answer, question.points);

        self.store
            .record_answer(AnswerRecord {
                user_id,
                question_id,
                answer: answer.to_string(),
                is_correct: comparison.is_correct,
                answered_at: chrono::Utc::now(),
            })
            .await?;

        if comparison.is_correct {
            self.store
                .append_reward(RewardEntry {
                    user_id,
                    points: comparison.points_awarded,
                    reward_type: RewardType::QuestionCorrect,
                    granted_at: chrono::Utc::now(),
                })
                .await?;
        }

        Ok(SubmitOutcome {
            comparison,
            correct_answer: question.correct_answer,
        })
    }

    /// Aggregate a user's answer history and reward ledger.
    pub async fn progress(&self, user_id: Uuid) -> Result<ProgressReport, ServiceError> {
        let answers = self.store.answers_for_user(user_id).await?;
        let rewards = self.store.rewards_for_user(user_id).await?;
        Ok(compute_progress(&answers, &rewards))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = QuizConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.parallelism, 4);
        assert_eq!(config.daily_question_limit, 5);
    }
}
