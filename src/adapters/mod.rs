//! Adapters for external systems.

pub mod oracle;
pub mod toolchain;
