//! memoraid-store — In-memory persistence for memoraid.
//!
//! Implements the `MemoryStore` trait over `RwLock`-guarded maps. Any backend
//! satisfying the trait substitutes for this one.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use memoraid_core::error::StoreError;
use memoraid_core::model::{AnswerRecord, Contributor, Memory, Question, RewardEntry};
use memoraid_core::traits::MemoryStore;

#[derive(Default)]
struct Tables {
    contributors: HashMap<Uuid, Contributor>,
    memories: HashMap<Uuid, Memory>,
    questions: HashMap<Uuid, Question>,
    answers: Vec<AnswerRecord>,
    rewards: Vec<RewardEntry>,
}

/// In-memory `MemoryStore` backed by a single `RwLock`.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn create_contributor(&self, contributor: Contributor) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.contributors.contains_key(&contributor.id) {
            return Err(StoreError::Conflict(format!(
                "contributor {} already exists",
                contributor.id
            )));
        }
        tables.contributors.insert(contributor.id, contributor);
        Ok(())
    }

    async fn get_contributor(&self, id: Uuid) -> Result<Contributor, StoreError> {
        let tables = self.tables.read().await;
        tables
            .contributors
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("contributor", id))
    }

    async fn create_memory(&self, memory: Memory) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.contributors.contains_key(&memory.contributor_id) {
            return Err(StoreError::not_found("contributor", memory.contributor_id));
        }
        tables.memories.insert(memory.id, memory);
        Ok(())
    }

    async fn get_memory(&self, id: Uuid) -> Result<Memory, StoreError> {
        let tables = self.tables.read().await;
        tables
            .memories
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("memory", id))
    }

    async fn memories_for_user(&self, user_id: Uuid) -> Result<Vec<Memory>, StoreError> {
        let tables = self.tables.read().await;
        let contributor_ids: Vec<Uuid> = tables
            .contributors
            .values()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.id)
            .collect();

        let mut memories: Vec<Memory> = tables
            .memories
            .values()
            .filter(|m| contributor_ids.contains(&m.contributor_id))
            .cloned()
            .collect();
        memories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(memories)
    }

    async fn delete_memory(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.memories.remove(&id).is_none() {
            return Err(StoreError::not_found("memory", id));
        }
        tables.questions.retain(|_, q| q.memory_id != id);
        Ok(())
    }

    async fn insert_questions(&self, questions: Vec<Question>) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        for question in questions {
            if !tables.memories.contains_key(&question.memory_id) {
                return Err(StoreError::not_found("memory", question.memory_id));
            }
            tables.questions.insert(question.id, question);
        }
        Ok(())
    }

    async fn questions_for_memory(&self, memory_id: Uuid) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| q.memory_id == memory_id)
            .cloned()
            .collect())
    }

    async fn get_question(&self, id: Uuid) -> Result<Question, StoreError> {
        let tables = self.tables.read().await;
        tables
            .questions
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("question", id))
    }

    async fn record_answer(&self, answer: AnswerRecord) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.answers.push(answer);
        Ok(())
    }

    async fn append_reward(&self, reward: RewardEntry) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.rewards.push(reward);
        Ok(())
    }

    async fn answers_for_user(&self, user_id: Uuid) -> Result<Vec<AnswerRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .answers
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn rewards_for_user(&self, user_id: Uuid) -> Result<Vec<RewardEntry>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .rewards
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use memoraid_core::model::RelationshipType;

    fn contributor(user_id: Uuid) -> Contributor {
        Contributor {
            id: Uuid::new_v4(),
            user_id,
            name: "Maya".into(),
            email: "maya@example.com".into(),
            relationship_type: RelationshipType::Friend,
            relationship_years: 12,
        }
    }

    fn memory(contributor_id: Uuid, age_hours: i64) -> Memory {
        Memory {
            id: Uuid::new_v4(),
            contributor_id,
            photo_url: None,
            description: "a lake trip".into(),
            event_date: None,
            created_at: Utc::now() - Duration::hours(age_hours),
        }
    }

    fn question(memory_id: Uuid) -> Question {
        Question {
            id: Uuid::new_v4(),
            memory_id,
            question: "Where?".into(),
            correct_answer: "the lake".into(),
            points: 10,
            difficulty: 2,
        }
    }

    #[tokio::test]
    async fn contributor_roundtrip_and_conflict() {
        let store = InMemoryStore::new();
        let c = contributor(Uuid::new_v4());
        store.create_contributor(c.clone()).await.unwrap();

        let fetched = store.get_contributor(c.id).await.unwrap();
        assert_eq!(fetched.email, "maya@example.com");

        let err = store.create_contributor(c).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn memory_requires_existing_contributor() {
        let store = InMemoryStore::new();
        let err = store.create_memory(memory(Uuid::new_v4(), 0)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn memories_sorted_most_recent_first() {
        let store = InMemoryStore::new();
        let user_id = Uuid::new_v4();
        let c = contributor(user_id);
        store.create_contributor(c.clone()).await.unwrap();

        let old = memory(c.id, 48);
        let new = memory(c.id, 1);
        store.create_memory(old.clone()).await.unwrap();
        store.create_memory(new.clone()).await.unwrap();

        let memories = store.memories_for_user(user_id).await.unwrap();
        assert_eq!(memories.len(), 2);
        assert_eq!(memories[0].id, new.id);
        assert_eq!(memories[1].id, old.id);
    }

    #[tokio::test]
    async fn memories_scoped_to_user() {
        let store = InMemoryStore::new();
        let c1 = contributor(Uuid::new_v4());
        let c2 = contributor(Uuid::new_v4());
        store.create_contributor(c1.clone()).await.unwrap();
        store.create_contributor(c2.clone()).await.unwrap();
        store.create_memory(memory(c1.id, 0)).await.unwrap();

        assert_eq!(store.memories_for_user(c1.user_id).await.unwrap().len(), 1);
        assert!(store.memories_for_user(c2.user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_memory_removes_questions() {
        let store = InMemoryStore::new();
        let c = contributor(Uuid::new_v4());
        store.create_contributor(c.clone()).await.unwrap();
        let m = memory(c.id, 0);
        store.create_memory(m.clone()).await.unwrap();
        let q = question(m.id);
        store.insert_questions(vec![q.clone()]).await.unwrap();

        store.delete_memory(m.id).await.unwrap();
        assert!(store.get_question(q.id).await.is_err());
        assert!(store.questions_for_memory(m.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn questions_require_existing_memory() {
        let store = InMemoryStore::new();
        let err = store
            .insert_questions(vec![question(Uuid::new_v4())])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn answers_and_rewards_scoped_to_user() {
        let store = InMemoryStore::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();

        store
            .record_answer(AnswerRecord {
                user_id: user,
                question_id: Uuid::new_v4(),
                answer: "the lake".into(),
                is_correct: true,
                answered_at: Utc::now(),
            })
            .await
            .unwrap();
        store
            .append_reward(RewardEntry {
                user_id: user,
                points: 10,
                reward_type: memoraid_core::model::RewardType::QuestionCorrect,
                granted_at: Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(store.answers_for_user(user).await.unwrap().len(), 1);
        assert_eq!(store.rewards_for_user(user).await.unwrap().len(), 1);
        assert!(store.answers_for_user(other).await.unwrap().is_empty());
        assert!(store.rewards_for_user(other).await.unwrap().is_empty());
    }
}
