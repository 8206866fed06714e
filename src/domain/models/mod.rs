pub mod candidate;
pub mod config;
pub mod conversation;
pub mod report;
pub mod signature;

pub use candidate::{Attempt, CandidateTest, ScratchPaths};
pub use config::{Config, OracleConfig, PipelineConfig, ToolchainConfig};
pub use conversation::{Conversation, Role, Turn};
pub use report::{InstanceOutcome, RunReport, Tally, Verdict};
pub use signature::FunctionSignature;
