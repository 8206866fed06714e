//! Toolchain adapter implementations.

pub mod cc;
pub mod mock;

pub use cc::CcToolchain;
pub use mock::MockToolchain;
