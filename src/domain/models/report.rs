//! Run outcomes: per-instance verdicts, the tally, and the final report.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Exclusive terminal classification of one pipeline instance.
///
/// Every instance lands in exactly one bucket; the aggregator folds each
/// verdict into the [`Tally`] exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The oracle never produced a first candidate; nothing was compiled.
    OracleFailed,
    /// A candidate was produced but no compile attempt succeeded.
    NeverCompiled,
    /// Compiled, but the binary exited nonzero or overran its time bound.
    Failed,
    /// Compiled and exited zero.
    Passed,
}

impl Verdict {
    /// Stable lowercase name, used in log fields and reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OracleFailed => "oracle_failed",
            Self::NeverCompiled => "never_compiled",
            Self::Failed => "failed",
            Self::Passed => "passed",
        }
    }

    /// Whether the instance reached its first compile attempt.
    ///
    /// Oracle failures before any candidate was written do not count as
    /// generated; everything else does.
    pub const fn reached_compile(self) -> bool {
        !matches!(self, Self::OracleFailed)
    }
}

/// Terminal report from one pipeline instance, sent to the aggregator.
#[derive(Debug, Clone)]
pub struct InstanceOutcome {
    /// Declaration text of the signature under test.
    pub signature: String,
    /// Name of the prompt strategy that drove the instance.
    pub strategy: String,
    /// Terminal classification.
    pub verdict: Verdict,
    /// Path of the compiled binary, for instances that compiled.
    pub artifact: Option<String>,
}

/// Aggregate counters and artifact lists across a whole run.
///
/// `compiled` is the union of `passed` and `failed`: an instance that
/// compiled always ran, and the run result sorts it into one of the two.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Instances that reached at least one compile attempt.
    pub generated: usize,
    /// Instances aborted by oracle transport or API failure.
    pub oracle_failed: usize,
    /// Binary paths of candidates that compiled.
    pub compiled: Vec<String>,
    /// Binary paths of tests that exited zero.
    pub passed: Vec<String>,
    /// Binary paths of tests that exited nonzero or timed out.
    pub failed: Vec<String>,
}

impl Tally {
    /// Fold one terminal outcome in. Called exactly once per instance.
    pub fn absorb(&mut self, outcome: &InstanceOutcome) {
        if outcome.verdict.reached_compile() {
            self.generated += 1;
        }
        match outcome.verdict {
            Verdict::OracleFailed => self.oracle_failed += 1,
            Verdict::NeverCompiled => {}
            Verdict::Failed => {
                if let Some(artifact) = &outcome.artifact {
                    self.compiled.push(artifact.clone());
                    self.failed.push(artifact.clone());
                }
            }
            Verdict::Passed => {
                if let Some(artifact) = &outcome.artifact {
                    self.compiled.push(artifact.clone());
                    self.passed.push(artifact.clone());
                }
            }
        }
    }
}

/// Everything the `run` command reports once the pipeline drains.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the whole run.
    pub duration_secs: f64,
    /// Prototypes found in the header.
    pub signatures_found: usize,
    /// Prompts issued (signatures x enabled strategies).
    pub prompts_issued: usize,
    /// Final counters and artifact lists.
    pub tally: Tally,
}
