//! memoraid-core — Data model, answer scoring, and quiz orchestration.
//!
//! This crate defines the domain types, the keyword-overlap answer scorer,
//! and the quiz service that the rest of the memoraid system builds on.

pub mod error;
pub mod journal;
pub mod model;
pub mod progress;
pub mod questions;
pub mod scoring;
pub mod service;
pub mod traits;
