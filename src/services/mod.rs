pub mod orchestrator;
pub mod pipeline;
pub mod prompt_builder;
pub mod reply_parser;
pub mod signature_extractor;

pub use orchestrator::{Orchestrator, RunInputs};
pub use pipeline::PipelineContext;
pub use prompt_builder::{Prompt, PromptBuilder, PromptStrategy};
pub use signature_extractor::SignatureExtractor;
