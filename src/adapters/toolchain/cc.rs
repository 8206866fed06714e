//! System toolchain adapter: C compiler invocation and binary execution.
//!
//! Both operations are bounded by configured timeouts. A generated test can
//! loop forever, so the executor must assume the child never halts on its
//! own; `kill_on_drop` tears the process down when the timeout fires.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::models::ToolchainConfig;
use crate::domain::ports::{CompileOutcome, CompileRequest, RunOutcome, Toolchain};

/// Invokes the configured C compiler and runs the produced binaries.
pub struct CcToolchain {
    config: ToolchainConfig,
}

impl CcToolchain {
    /// Create the adapter.
    pub const fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }

    /// `<cc> <test.c> <impl.c> -I <header-dir> -o <out>`
    fn compile_args(request: &CompileRequest) -> Vec<OsString> {
        vec![
            request.test_source.as_os_str().to_owned(),
            request.impl_source.as_os_str().to_owned(),
            OsString::from("-I"),
            request.include_dir.as_os_str().to_owned(),
            OsString::from("-o"),
            request.output.as_os_str().to_owned(),
        ]
    }
}

#[async_trait]
impl Toolchain for CcToolchain {
    fn name(&self) -> &str {
        "cc"
    }

    async fn compile(&self, request: &CompileRequest) -> CompileOutcome {
        debug!(
            compiler = %self.config.compiler,
            test = %request.test_source.display(),
            "invoking compiler"
        );

        let result = tokio::time::timeout(
            Duration::from_secs(self.config.compile_timeout_secs),
            Command::new(&self.config.compiler)
                .args(Self::compile_args(request))
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await;

        match result {
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                if output.status.success() {
                    CompileOutcome::succeeded(stderr)
                } else {
                    CompileOutcome::failed(stderr)
                }
            }
            Ok(Err(e)) => {
                warn!(compiler = %self.config.compiler, error = %e, "compiler failed to start");
                CompileOutcome::failed(format!(
                    "failed to invoke {}: {e}",
                    self.config.compiler
                ))
            }
            Err(_) => CompileOutcome::failed(format!(
                "compilation timed out after {}s",
                self.config.compile_timeout_secs
            )),
        }
    }

    async fn run(&self, binary: &Path) -> RunOutcome {
        debug!(binary = %binary.display(), "executing test binary");

        let result = tokio::time::timeout(
            Duration::from_secs(self.config.exec_timeout_secs),
            Command::new(binary)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await;

        match result {
            Ok(Ok(output)) => RunOutcome {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                timed_out: false,
            },
            Ok(Err(e)) => RunOutcome {
                exit_code: None,
                stdout: String::new(),
                stderr: format!("failed to execute {}: {e}", binary.display()),
                timed_out: false,
            },
            Err(_) => RunOutcome {
                exit_code: None,
                stdout: String::new(),
                stderr: format!(
                    "execution timed out after {}s",
                    self.config.exec_timeout_secs
                ),
                timed_out: true,
            },
        }
    }
}
