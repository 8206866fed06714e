//! Function signatures lifted from a C header.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single C function prototype, kept verbatim as it appeared in the header.
///
/// Identity is the exact text: prototypes that differ only in whitespace are
/// distinct values, and a header that declares the same prototype twice
/// yields two signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSignature(String);

impl FunctionSignature {
    /// Wrap the verbatim declaration text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The verbatim declaration text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort function name: the identifier directly before the
    /// parameter list. Used for log fields and prompt wording only; the
    /// verbatim text stays authoritative.
    pub fn function_name(&self) -> &str {
        let head = self.0.split('(').next().unwrap_or(&self.0);
        head.rsplit(|c: char| c.is_whitespace() || c == '*')
            .find(|part| !part.is_empty())
            .unwrap_or(head)
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FunctionSignature {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
