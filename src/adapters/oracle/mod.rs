//! Oracle adapter implementations.

pub mod mock;
pub mod openai;

pub use mock::{MockOracle, MockReply};
pub use openai::OpenAiOracle;
