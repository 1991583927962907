//! The `memoraid generate` command.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

use memoraid_core::journal::{self, Journal};
use memoraid_core::model::Question;
use memoraid_core::service::{GenerateProgress, ModelSpec, QuizConfig, QuizService};
use memoraid_core::traits::{MemoryStore, QuestionModel};
use memoraid_providers::config::load_config_from;
use memoraid_providers::create_provider;
use memoraid_store::InMemoryStore;

/// Console progress reporter.
struct ConsoleProgress;

impl GenerateProgress for ConsoleProgress {
    fn on_memory_start(&self, memory_id: Uuid) {
        eprintln!("  Generating questions for memory {memory_id}");
    }

    fn on_memory_complete(&self, memory_id: Uuid, question_count: usize) {
        eprintln!("  Done: {memory_id} ({question_count} questions)");
    }

    fn on_memory_error(&self, memory_id: Uuid, error: &str) {
        eprintln!("  ERROR: {memory_id}: {error}");
    }
}

/// One memory's generated questions in the output bundle.
#[derive(Serialize)]
struct BundleEntry {
    memory: String,
    description: String,
    questions: Vec<Question>,
}

pub async fn execute(
    journal_path: PathBuf,
    model_str: Option<String>,
    parallelism: usize,
    output: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");

    let config = load_config_from(config_path.as_deref())?;

    let journals = if journal_path.is_dir() {
        journal::load_journal_directory(&journal_path)?
    } else {
        vec![journal::parse_journal(&journal_path)?]
    };
    anyhow::ensure!(!journals.is_empty(), "no journals found");

    // Parse the model spec: "provider/model", bare model, or config defaults
    let spec = match &model_str {
        Some(m) => {
            let parts: Vec<&str> = m.splitn(2, '/').collect();
            if parts.len() == 2 {
                ModelSpec {
                    provider: parts[0].to_string(),
                    model: parts[1].to_string(),
                }
            } else {
                ModelSpec {
                    provider: config.default_provider.clone(),
                    model: parts[0].to_string(),
                }
            }
        }
        None => ModelSpec {
            provider: config.default_provider.clone(),
            model: config.default_model.clone(),
        },
    };

    let Some(provider_config) = config.providers.get(&spec.provider) else {
        anyhow::bail!(
            "provider '{}' not found in config. Available: {:?}",
            spec.provider,
            config.providers.keys().collect::<Vec<_>>()
        );
    };
    let provider = create_provider(&spec.provider, provider_config)?;

    let mut providers: HashMap<String, Arc<dyn QuestionModel>> = HashMap::new();
    providers.insert(spec.provider.clone(), Arc::from(provider));

    let quiz_config = QuizConfig {
        max_retries: config.max_retries,
        retry_delay: Duration::from_millis(config.retry_delay_ms),
        temperature: config.default_temperature,
        parallelism,
        daily_question_limit: config.daily_question_limit,
        ..QuizConfig::default()
    };

    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    for journal in &journals {
        for w in journal::validate_journal(journal) {
            let id = w.memory_id.as_deref().unwrap_or("journal");
            eprintln!("  [{id}] WARNING: {}", w.message);
        }

        let store = Arc::new(InMemoryStore::new());
        let entities = journal.instantiate(Uuid::new_v4());
        for contributor in entities.contributors {
            store.create_contributor(contributor).await?;
        }
        for memory in &entities.memories {
            store.create_memory(memory.clone()).await?;
        }
        store.insert_questions(entities.questions).await?;

        // Only generate for memories that don't already carry questions
        let mut pending = Vec::new();
        for memory in &entities.memories {
            if store.questions_for_memory(memory.id).await?.is_empty() {
                pending.push(memory.id);
            }
        }

        eprintln!(
            "memoraid — Generating questions for {} of {} memories in '{}' with {}",
            pending.len(),
            entities.memories.len(),
            journal.name,
            spec.model
        );

        let service = QuizService::new(
            Arc::clone(&store) as Arc<dyn MemoryStore>,
            providers.clone(),
            quiz_config.clone(),
        );
        let summary = service
            .generate_batch(&pending, &spec, &ConsoleProgress)
            .await;

        eprintln!(
            "\nComplete: {} memories done, {} failed, {} questions generated",
            summary.completed, summary.failed, summary.questions_generated
        );

        let memory_ids: Vec<Uuid> = entities.memories.iter().map(|m| m.id).collect();
        let bundle = build_bundle(journal, &memory_ids, &store).await?;
        print_summary(&bundle);

        let path = output.join(format!("questions-{}-{timestamp}.json", journal.id));
        std::fs::write(&path, serde_json::to_string_pretty(&bundle)?)?;
        eprintln!("Questions saved to: {}", path.display());
    }

    Ok(())
}

/// Collect every memory's questions back out of the store, keyed by the
/// journal-local memory id. `memory_ids` comes from `instantiate`, which
/// produces one store memory per journal entry in order.
async fn build_bundle(
    journal: &Journal,
    memory_ids: &[Uuid],
    store: &InMemoryStore,
) -> Result<Vec<BundleEntry>> {
    let mut bundle = Vec::new();
    for (entry, memory_id) in journal.memories.iter().zip(memory_ids) {
        let questions = store.questions_for_memory(*memory_id).await?;
        bundle.push(BundleEntry {
            memory: entry.id.clone(),
            description: entry.description.clone(),
            questions,
        });
    }
    Ok(bundle)
}

fn print_summary(bundle: &[BundleEntry]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Memory", "Questions", "Total points"]);

    for entry in bundle {
        let total_points: u32 = entry.questions.iter().map(|q| q.points).sum();
        table.add_row(vec![
            Cell::new(&entry.memory),
            Cell::new(entry.questions.len()),
            Cell::new(total_points),
        ]);
    }

    eprintln!("\n{table}");
}
