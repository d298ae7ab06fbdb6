//! # Cyclewise Core Library
//!
//! Task-timing advice keyed on menstrual cycle phase. Given a task description
//! and a phase, the engine retrieves matching knowledge, asks a text generator
//! for a verdict (good / ok / avoid) and falls back to deterministic rules
//! whenever generation is unavailable or its output can't be trusted.
//!
//! ## Architecture
//!
//! - **Knowledge**: Static per-phase profiles, built in or loaded from TOML
//! - **Retrieval**: Keyword scoring over profile fields
//! - **Generation**: Pluggable [`Generator`] trait, Gemini over REST by default
//! - **Resolution**: Fenced-JSON extraction and verdict normalization
//! - **Fallback**: Static table or keyword-recommendation strategy
//!
//! ## Key Components
//!
//! - [`AdviceEngine`]: Orchestrates a single advice request
//! - [`KnowledgeBase`]: Phase profiles
//! - [`Config`]: Application configuration management

pub mod config;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod knowledge;
pub mod phase;
pub mod prompt;
pub mod resolver;
pub mod retrieval;

pub use config::Config;
pub use engine::{AdviceEngine, AdviceInput, AdviceRequest, AdviceResponse, AdviceSource, HealthStatus};
pub use error::{ConfigError, CoreError, KnowledgeError, ValidationError};
pub use fallback::{FallbackPolicy, FallbackStrategy};
pub use generator::{GeminiGenerator, GenerationError, Generator};
pub use knowledge::{KnowledgeBase, PhaseProfile, Section};
pub use phase::{Locale, Phase, PhaseLabel, Verdict};
pub use prompt::PromptBuilder;
pub use resolver::{InvalidVerdictPolicy, ParseError, ResponseResolver};
pub use retrieval::{KnowledgeSnippet, Retriever};
