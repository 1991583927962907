//! TOML memory-journal parser.
//!
//! A journal file is the offline contribution channel: a contributor writes
//! down memories (and optionally pre-authored questions) as TOML, and the CLI
//! loads them into a store for question generation and quizzing.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::model::{Contributor, Memory, Question, RelationshipType};

/// A parsed memory journal.
#[derive(Debug, Clone)]
pub struct Journal {
    /// Unique identifier for this journal.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of the journal.
    pub description: String,
    /// The memories it contains.
    pub memories: Vec<JournalMemory>,
}

/// One memory entry in a journal.
#[derive(Debug, Clone)]
pub struct JournalMemory {
    /// Journal-local identifier, used in validation messages.
    pub id: String,
    /// Free-text description of the memory.
    pub description: String,
    /// When the remembered event happened, if known.
    pub event_date: Option<NaiveDate>,
    /// Public photo URL, if one exists.
    pub photo_url: Option<String>,
    /// Who contributed this memory.
    pub contributor: JournalContributor,
    /// Pre-authored questions, if any. Usually empty; generation fills them.
    pub questions: Vec<JournalQuestion>,
}

/// Contributor details attached to a journal memory.
#[derive(Debug, Clone)]
pub struct JournalContributor {
    pub name: String,
    pub email: String,
    pub relationship: RelationshipType,
    pub years: u32,
}

/// A pre-authored question in a journal.
#[derive(Debug, Clone)]
pub struct JournalQuestion {
    pub question: String,
    pub correct_answer: String,
    pub difficulty: u8,
    pub points: u32,
}

/// Intermediate TOML structure for parsing journal files.
#[derive(Debug, Deserialize)]
struct TomlJournalFile {
    journal: TomlJournalHeader,
    #[serde(default)]
    memories: Vec<TomlMemory>,
}

#[derive(Debug, Deserialize)]
struct TomlJournalHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlMemory {
    id: String,
    description: String,
    #[serde(default)]
    event_date: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    contributor: TomlContributor,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlContributor {
    name: String,
    email: String,
    relationship: String,
    #[serde(default = "default_years")]
    years: u32,
}

fn default_years() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    question: String,
    correct_answer: String,
    #[serde(default = "default_difficulty")]
    difficulty: u8,
    #[serde(default = "default_points")]
    points: u32,
}

fn default_difficulty() -> u8 {
    3
}

fn default_points() -> u32 {
    10
}

/// Parse a single TOML file into a `Journal`.
pub fn parse_journal(path: &Path) -> Result<Journal> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read journal file: {}", path.display()))?;

    parse_journal_str(&content, path)
}

/// Parse a TOML string into a `Journal` (useful for testing).
pub fn parse_journal_str(content: &str, source_path: &Path) -> Result<Journal> {
    let parsed: TomlJournalFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let memories = parsed
        .memories
        .into_iter()
        .map(|m| {
            let event_date = m
                .event_date
                .map(|d| {
                    NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                        .with_context(|| format!("invalid event_date '{d}' in memory '{}'", m.id))
                })
                .transpose()?;

            let relationship: RelationshipType = m
                .contributor
                .relationship
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{e} in memory '{}'", m.id))?;

            let questions = m
                .questions
                .into_iter()
                .map(|q| JournalQuestion {
                    question: q.question,
                    correct_answer: q.correct_answer,
                    difficulty: q.difficulty,
                    points: q.points,
                })
                .collect();

            Ok(JournalMemory {
                id: m.id,
                description: m.description,
                event_date,
                photo_url: m.photo_url,
                contributor: JournalContributor {
                    name: m.contributor.name,
                    email: m.contributor.email,
                    relationship,
                    years: m.contributor.years,
                },
                questions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Journal {
        id: parsed.journal.id,
        name: parsed.journal.name,
        description: parsed.journal.description,
        memories,
    })
}

/// Recursively load all `.toml` journal files from a directory.
pub fn load_journal_directory(dir: &Path) -> Result<Vec<Journal>> {
    let mut journals = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            journals.extend(load_journal_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_journal(&path) {
                Ok(journal) => journals.push(journal),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(journals)
}

/// A warning from journal validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The memory ID (if applicable).
    pub memory_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a journal for common issues.
pub fn validate_journal(journal: &Journal) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate memory IDs
    let mut seen_ids = std::collections::HashSet::new();
    for memory in &journal.memories {
        if !seen_ids.insert(&memory.id) {
            warnings.push(ValidationWarning {
                memory_id: Some(memory.id.clone()),
                message: format!("duplicate memory ID: {}", memory.id),
            });
        }
    }

    for memory in &journal.memories {
        if memory.description.trim().is_empty() {
            warnings.push(ValidationWarning {
                memory_id: Some(memory.id.clone()),
                message: "description is empty".into(),
            });
        }

        for question in &memory.questions {
            // The scorer relies on a non-empty reference answer
            if question.correct_answer.trim().is_empty() {
                warnings.push(ValidationWarning {
                    memory_id: Some(memory.id.clone()),
                    message: format!("question '{}' has an empty correct answer", question.question),
                });
            }
            if question.points == 0 {
                warnings.push(ValidationWarning {
                    memory_id: Some(memory.id.clone()),
                    message: format!("question '{}' awards zero points", question.question),
                });
            }
            if !(1..=5).contains(&question.difficulty) {
                warnings.push(ValidationWarning {
                    memory_id: Some(memory.id.clone()),
                    message: format!(
                        "question '{}' has difficulty {} outside 1-5",
                        question.question, question.difficulty
                    ),
                });
            }
        }
    }

    warnings
}

/// Entities instantiated from a journal, ready for store insertion.
#[derive(Debug, Clone)]
pub struct JournalEntities {
    pub contributors: Vec<Contributor>,
    pub memories: Vec<Memory>,
    pub questions: Vec<Question>,
}

impl Journal {
    /// Materialize store entities for this journal, owned by `user_id`.
    ///
    /// Contributors are deduplicated by email; each memory gets a fresh id.
    pub fn instantiate(&self, user_id: Uuid) -> JournalEntities {
        let mut contributors: Vec<Contributor> = Vec::new();
        let mut memories = Vec::new();
        let mut questions = Vec::new();

        for entry in &self.memories {
            let contributor_id = match contributors
                .iter()
                .find(|c| c.email == entry.contributor.email)
            {
                Some(existing) => existing.id,
                None => {
                    let contributor = Contributor {
                        id: Uuid::new_v4(),
                        user_id,
                        name: entry.contributor.name.clone(),
                        email: entry.contributor.email.clone(),
                        relationship_type: entry.contributor.relationship,
                        relationship_years: entry.contributor.years,
                    };
                    let id = contributor.id;
                    contributors.push(contributor);
                    id
                }
            };

            let memory = Memory {
                id: Uuid::new_v4(),
                contributor_id,
                photo_url: entry.photo_url.clone(),
                description: entry.description.clone(),
                event_date: entry.event_date,
                created_at: Utc::now(),
            };

            for q in &entry.questions {
                questions.push(Question {
                    id: Uuid::new_v4(),
                    memory_id: memory.id,
                    question: q.question.clone(),
                    correct_answer: q.correct_answer.clone(),
                    points: q.points,
                    difficulty: q.difficulty,
                });
            }

            memories.push(memory);
        }

        JournalEntities {
            contributors,
            memories,
            questions,
        }
    }
}
