//! Candidate test programs and their scratch-file naming.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Which generation attempt produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Straight from the initial prompt.
    First,
    /// Regenerated after compiler feedback.
    Corrected,
}

impl Attempt {
    /// Provenance marker written as the first line of every scratch file,
    /// so leftover files can be told apart from hand-written sources.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::First => "/* file autogenerated */",
            Self::Corrected => "/* file re-autogenerated */",
        }
    }
}

/// One generated test program, pre-compilation.
#[derive(Debug, Clone)]
pub struct CandidateTest {
    /// Normalized test source, ready to write.
    pub source: String,
    /// Provenance of this candidate.
    pub attempt: Attempt,
}

impl CandidateTest {
    /// Create a candidate.
    pub fn new(source: impl Into<String>, attempt: Attempt) -> Self {
        Self {
            source: source.into(),
            attempt,
        }
    }

    /// Scratch-file content: the provenance marker, then the test source.
    pub fn render(&self) -> String {
        format!("{}\n{}", self.attempt.marker(), self.source)
    }
}

/// Scratch locations for one compile attempt: `{uuid}.c` and `{uuid}.c.out`.
///
/// Names are fresh per attempt, so concurrent instances and corrective
/// retries never write to the same path. Nothing here is cleaned up; the
/// files stay behind for coverage tooling and audits.
#[derive(Debug, Clone)]
pub struct ScratchPaths {
    /// Candidate source file.
    pub source: PathBuf,
    /// Linked test binary.
    pub binary: PathBuf,
}

impl ScratchPaths {
    /// Mint a collision-free pair of paths under `build_dir`.
    pub fn fresh(build_dir: &Path) -> Self {
        let id = Uuid::new_v4();
        Self {
            source: build_dir.join(format!("{id}.c")),
            binary: build_dir.join(format!("{id}.c.out")),
        }
    }
}
