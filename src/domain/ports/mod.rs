//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that adapters must implement:
//! - `Oracle`: the external code-generation service
//! - `Toolchain`: the native compiler plus the test-binary executor
//!
//! These traits define the contracts that allow the pipeline to be
//! independent of specific transports and toolchains.

pub mod oracle;
pub mod toolchain;

pub use oracle::Oracle;
pub use toolchain::{sanitize_source, CompileOutcome, CompileRequest, RunOutcome, Toolchain};
