//! Prompt construction for the oracle.
//!
//! Wording lives here and nowhere else: the standing system instruction, the
//! per-signature generation requests, and the corrective follow-up sent after
//! a failed compile.

use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomainError;
use crate::domain::models::FunctionSignature;

/// Standing instruction that opens every conversation.
pub const SYSTEM_PROMPT: &str = "You are a professional tester of C programs. \
When I ask you to write a test, you will answer only in code without any \
explanatory text. Response should not contain tested code. Use only asserts \
for testing. Test should contain main function.";

/// Intent behind one generated prompt.
///
/// Strategies differ only in what the request asks the test to exercise;
/// everything downstream treats prompts uniformly, so adding a variant here
/// is the whole job of adding a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStrategy {
    /// Exercise ordinary, valid inputs.
    HappyPath,
    /// Exercise boundary conditions.
    EdgeCase,
}

impl PromptStrategy {
    /// Every shipped strategy, in the order prompts are issued.
    pub const ALL: [Self; 2] = [Self::HappyPath, Self::EdgeCase];

    /// Stable name used in configuration and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::HappyPath => "happy-path",
            Self::EdgeCase => "edge-case",
        }
    }

    /// The strategy-specific request for one signature.
    fn request(self, signature: &FunctionSignature) -> String {
        let name = signature.function_name();
        match self {
            Self::HappyPath => format!(
                "Write a unit test for function '{name}' declared as '{signature}'. \
                 Exercise typical valid inputs and assert the expected results."
            ),
            Self::EdgeCase => format!(
                "Write a unit test for function '{name}' declared as '{signature}'. \
                 Exercise boundary conditions and edge cases and assert the expected results."
            ),
        }
    }
}

impl fmt::Display for PromptStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PromptStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy-path" => Ok(Self::HappyPath),
            "edge-case" => Ok(Self::EdgeCase),
            other => Err(DomainError::UnknownStrategy(other.to_string())),
        }
    }
}

/// One generation request, ready for the oracle.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Signature the request targets.
    pub signature: FunctionSignature,
    /// Intent that produced the request.
    pub strategy: PromptStrategy,
    /// Full first-user-turn text.
    pub text: String,
}

/// Builds the first user turn for every (signature, strategy) pair.
pub struct PromptBuilder {
    header_display: String,
    source_text: String,
    strategies: Vec<PromptStrategy>,
}

impl PromptBuilder {
    /// `header_display` is the header path as the user gave it;
    /// `source_text` is the comment-stripped implementation embedded in
    /// every request.
    pub fn new(
        header_display: impl Into<String>,
        source_text: impl Into<String>,
        strategies: Vec<PromptStrategy>,
    ) -> Self {
        Self {
            header_display: header_display.into(),
            source_text: source_text.into(),
            strategies,
        }
    }

    /// Cartesian product: one prompt per (signature, strategy) pair, in
    /// signature order.
    pub fn build(&self, signatures: &[FunctionSignature]) -> Vec<Prompt> {
        let preamble = self.context_preamble();
        signatures
            .iter()
            .flat_map(|signature| {
                self.strategies.iter().map(|&strategy| Prompt {
                    signature: signature.clone(),
                    strategy,
                    text: format!("{preamble} {}", strategy.request(signature)),
                })
            })
            .collect()
    }

    fn context_preamble(&self) -> String {
        format!(
            "I have header '{}' with all function prototypes. C code with functions definitions: {}\n.",
            self.header_display, self.source_text
        )
    }
}

/// Corrective follow-up after a failed compile, carrying the verbatim
/// compiler diagnostic.
pub fn corrective_request(stderr: &str) -> String {
    format!("Compilation of tests above failed with error: {stderr}. Generate fixed test.")
}
