//! Toolchain port: compiling candidates and executing the result.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Inputs for one compile invocation.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Scratch file holding the candidate test program.
    pub test_source: PathBuf,
    /// Implementation translation unit compiled alongside the test.
    pub impl_source: PathBuf,
    /// Directory added to the include search path.
    pub include_dir: PathBuf,
    /// Where the linked binary lands.
    pub output: PathBuf,
}

/// Result of a compile invocation.
///
/// Toolchain trouble (missing compiler, spawn failure, timeout) folds into a
/// failed outcome with a synthesized diagnostic; at this seam it is
/// indistinguishable from a code defect, and both take the same retry path.
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    /// Whether the compiler exited zero within its time bound.
    pub success: bool,
    /// Compiler diagnostics (may be nonempty on success, e.g. warnings).
    pub stderr: String,
}

impl CompileOutcome {
    /// A successful compile, keeping any warning text.
    pub fn succeeded(stderr: impl Into<String>) -> Self {
        Self {
            success: true,
            stderr: stderr.into(),
        }
    }

    /// A failed compile with its diagnostic text.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stderr: stderr.into(),
        }
    }
}

/// Result of running a compiled test binary.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Process exit code; `None` when killed by a signal or the timeout.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the run was cut off at the time bound.
    pub timed_out: bool,
}

impl RunOutcome {
    /// A test passes only by exiting zero within the time bound.
    pub const fn passed(&self) -> bool {
        !self.timed_out && matches!(self.exit_code, Some(0))
    }
}

/// Strip generation artifacts that slip through reply parsing, currently
/// stray fence-marker lines. The engine applies this to every candidate
/// before writing it, first and corrected attempts alike.
pub fn sanitize_source(code: &str) -> String {
    code.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Native compiler and process executor behind one seam.
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Adapter name for log fields.
    fn name(&self) -> &str;

    /// Compile the candidate against the real implementation.
    async fn compile(&self, request: &CompileRequest) -> CompileOutcome;

    /// Execute a compiled test binary with captured output.
    async fn run(&self, binary: &Path) -> RunOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_fence_lines() {
        let code = "```c\nint main(void) { return 0; }\n```";
        assert_eq!(sanitize_source(code), "int main(void) { return 0; }");
    }

    #[test]
    fn test_sanitize_keeps_clean_code() {
        let code = "#include <assert.h>\nint main(void) { return 0; }";
        assert_eq!(sanitize_source(code), code);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let code = "```\nint x;\n  ```c\nint y;";
        let once = sanitize_source(code);
        assert_eq!(sanitize_source(&once), once);
        assert_eq!(once, "int x;\nint y;");
    }

    #[test]
    fn test_passed_requires_zero_exit() {
        let outcome = RunOutcome {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
            timed_out: false,
        };
        assert!(outcome.passed());

        let outcome = RunOutcome {
            exit_code: Some(1),
            ..outcome
        };
        assert!(!outcome.passed());
    }

    #[test]
    fn test_timeout_never_passes() {
        let outcome = RunOutcome {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
            timed_out: true,
        };
        assert!(!outcome.passed());
    }

    #[test]
    fn test_signal_death_never_passes() {
        let outcome = RunOutcome {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            timed_out: false,
        };
        assert!(!outcome.passed());
    }
}
