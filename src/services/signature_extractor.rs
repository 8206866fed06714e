//! Lexical extraction of C function prototypes from header text.
//!
//! This is a best-effort scanner, not a C parser. It matches the shape
//! "identifier, pointer/space tokens, identifier, parenthesized parameter
//! list with at most one nested level". Declarations hidden behind macros or
//! token pasting fall outside that shape and are silently skipped; a comment
//! that merely mentions a call will never match because comments are stripped
//! before scanning.

use regex::Regex;

use crate::domain::models::FunctionSignature;

/// Scans preprocessed header text for function declarations.
pub struct SignatureExtractor {
    comment_pattern: Regex,
    function_pattern: Regex,
}

impl SignatureExtractor {
    /// Build the extractor with its compiled patterns.
    pub fn new() -> Self {
        Self {
            // `$` is line-relative, `.` crosses lines so block comments may span them.
            comment_pattern: Regex::new(r"(?ms)//.*?$|/\*.*?\*/")
                .expect("comment pattern compiles"),
            function_pattern: Regex::new(
                r"\b[A-Za-z_][A-Za-z0-9_]*[\s\*]+\**\s*[A-Za-z_][A-Za-z0-9_]*\s*\((?:[^()]|\([^()]*\))*\)",
            )
            .expect("function pattern compiles"),
        }
    }

    /// Strip `//` and `/* */` comments, then drop empty lines.
    ///
    /// Runs before scanning so a parenthesized fragment inside a comment can
    /// never be mistaken for a declaration.
    pub fn strip_comments(&self, code: &str) -> String {
        let without_comments = self.comment_pattern.replace_all(code, "");
        without_comments
            .lines()
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All declarations in the text, in order of appearance.
    ///
    /// Duplicates are preserved; callers that want one test per unique
    /// prototype dedupe themselves. Expects comment-free input, see
    /// [`strip_comments`](Self::strip_comments).
    pub fn extract(&self, header_text: &str) -> Vec<FunctionSignature> {
        self.function_pattern
            .find_iter(header_text)
            .map(|m| FunctionSignature::new(m.as_str()))
            .collect()
    }

    /// Convenience: strip comments, then extract.
    pub fn scan(&self, raw_header: &str) -> Vec<FunctionSignature> {
        self.extract(&self.strip_comments(raw_header))
    }
}

impl Default for SignatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
