//! Mock toolchain for testing.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{CompileOutcome, CompileRequest, RunOutcome, Toolchain};

/// Run outcome with exit code 0.
pub fn passing_run() -> RunOutcome {
    RunOutcome {
        exit_code: Some(0),
        stdout: String::new(),
        stderr: String::new(),
        timed_out: false,
    }
}

/// Run outcome with the given nonzero exit code.
pub fn failing_run(code: i32) -> RunOutcome {
    RunOutcome {
        exit_code: Some(code),
        stdout: String::new(),
        stderr: "Assertion failed.".to_string(),
        timed_out: false,
    }
}

/// Run outcome cut off by the timeout.
pub fn timed_out_run() -> RunOutcome {
    RunOutcome {
        exit_code: None,
        stdout: String::new(),
        stderr: "execution timed out".to_string(),
        timed_out: true,
    }
}

/// Mock toolchain serving scripted outcomes and recording invocations.
///
/// Unscripted calls succeed (clean compile, passing run) so happy-path tests
/// only script the deviations they care about.
pub struct MockToolchain {
    compile_script: Mutex<VecDeque<CompileOutcome>>,
    run_script: Mutex<VecDeque<RunOutcome>>,
    compile_calls: Mutex<Vec<CompileRequest>>,
    run_calls: Mutex<Vec<PathBuf>>,
}

impl MockToolchain {
    /// A toolchain where everything compiles and passes.
    pub fn new() -> Self {
        Self {
            compile_script: Mutex::new(VecDeque::new()),
            run_script: Mutex::new(VecDeque::new()),
            compile_calls: Mutex::new(Vec::new()),
            run_calls: Mutex::new(Vec::new()),
        }
    }

    /// Append one scripted compile outcome.
    pub async fn queue_compile(&self, outcome: CompileOutcome) {
        self.compile_script.lock().await.push_back(outcome);
    }

    /// Append one scripted run outcome.
    pub async fn queue_run(&self, outcome: RunOutcome) {
        self.run_script.lock().await.push_back(outcome);
    }

    /// Every compile request seen, in order.
    pub async fn compile_calls(&self) -> Vec<CompileRequest> {
        self.compile_calls.lock().await.clone()
    }

    /// Every executed binary path, in order.
    pub async fn run_calls(&self) -> Vec<PathBuf> {
        self.run_calls.lock().await.clone()
    }
}

impl Default for MockToolchain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Toolchain for MockToolchain {
    fn name(&self) -> &str {
        "mock"
    }

    async fn compile(&self, request: &CompileRequest) -> CompileOutcome {
        self.compile_calls.lock().await.push(request.clone());
        self.compile_script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| CompileOutcome::succeeded(""))
    }

    async fn run(&self, binary: &Path) -> RunOutcome {
        self.run_calls.lock().await.push(binary.to_path_buf());
        self.run_script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(passing_run)
    }
}
