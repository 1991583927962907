//! Mock provider for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use memoraid_core::traits::{
    GenerateRequest, GenerateResponse, ModelInfo, QuestionModel, TokenUsage,
};

/// A mock question model for testing the quiz service without real API calls.
///
/// Returns configurable responses based on prompt content matching.
pub struct MockModel {
    /// Map of prompt substring → response text.
    responses: HashMap<String, String>,
    /// Default response if no prompt matches.
    default_response: String,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<GenerateRequest>>,
}

/// A plausible single-question JSON payload, used when nothing matches.
const DEFAULT_QUESTIONS: &str = r#"[
  {"question": "What happened in this memory?", "correct_answer": "something memorable", "difficulty": 1, "points": 5}
]"#;

impl MockModel {
    /// Create a new mock with the given prompt→response mappings.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: DEFAULT_QUESTIONS.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            responses: HashMap::new(),
            default_response: response.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this provider.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionModel for MockModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        // Find a matching response based on prompt content
        let content = self
            .responses
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_response.clone());

        let token_count = (content.len() / 4) as u32; // Rough estimate

        Ok(GenerateResponse {
            content,
            model: request.model.clone(),
            token_usage: TokenUsage {
                prompt_tokens: (request.prompt.len() / 4) as u32,
                completion_tokens: token_count,
                total_tokens: (request.prompt.len() / 4) as u32 + token_count,
                estimated_cost_usd: 0.0,
            },
            latency_ms: 1,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "mock-model".into(),
            name: "Mock Model".into(),
            provider: "mock".into(),
            max_context: 100_000,
            cost_per_1k_input: 0.0,
            cost_per_1k_output: 0.0,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoraid_core::questions::parse_generated_questions;

    fn request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            model: "mock-model".into(),
            prompt: prompt.into(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }

    #[tokio::test]
    async fn default_response_parses_as_questions() {
        let provider = MockModel::new(HashMap::new());
        let response = provider.generate(&request("anything")).await.unwrap();
        let questions = parse_generated_questions(&response.content).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn prompt_matching() {
        let mut responses = HashMap::new();
        responses.insert(
            "lake".to_string(),
            r#"[{"question": "Where?", "correct_answer": "the lake", "difficulty": 2, "points": 10}]"#.to_string(),
        );
        responses.insert(
            "wedding".to_string(),
            r#"[{"question": "Who married?", "correct_answer": "Ana and Luis", "difficulty": 3, "points": 15}]"#.to_string(),
        );

        let provider = MockModel::new(responses);

        let resp = provider
            .generate(&request("a party at the lake house"))
            .await
            .unwrap();
        assert!(resp.content.contains("the lake"));

        let resp = provider
            .generate(&request("the wedding last June"))
            .await
            .unwrap();
        assert!(resp.content.contains("Ana and Luis"));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn records_last_request() {
        let provider = MockModel::with_fixed_response("[]");
        provider.generate(&request("remember this")).await.unwrap();
        let last = provider.last_request().unwrap();
        assert_eq!(last.prompt, "remember this");
    }
}
