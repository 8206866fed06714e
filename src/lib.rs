//! testforge - LLM-backed C unit test generation
//!
//! testforge scans a C header for function prototypes, asks an LLM oracle to
//! write a unit test per prototype and strategy, then compiles each candidate
//! against the real implementation and runs it. A failed compile earns one
//! corrective round with the compiler diagnostic; every instance lands in
//! exactly one verdict bucket of the final report.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors, and the `Oracle` and
//!   `Toolchain` port traits
//! - **Adapters Layer** (`adapters`): OpenAI-compatible chat client and the
//!   C compiler/executor, plus their test mocks
//! - **Service Layer** (`services`): signature extraction, prompt building,
//!   reply parsing, the per-prompt pipeline, and run orchestration
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, Conversation, FunctionSignature, InstanceOutcome, OracleConfig, PipelineConfig,
    RunReport, Tally, ToolchainConfig, Verdict,
};
pub use domain::ports::{Oracle, Toolchain};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Orchestrator, PromptStrategy, RunInputs, SignatureExtractor};
