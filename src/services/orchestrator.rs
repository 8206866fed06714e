//! Run orchestration: fan prompts out over pipeline instances, fold
//! outcomes into one report.
//!
//! Instances run under a semaphore-bounded worker pool and report over a
//! channel to a single aggregation loop, so the tally never needs a lock.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{RunReport, Tally};
use crate::domain::ports::{Oracle, Toolchain};
use crate::services::pipeline::{run_instance, PipelineContext};
use crate::services::prompt_builder::{PromptBuilder, PromptStrategy};
use crate::services::signature_extractor::SignatureExtractor;

/// Source material for one run, already read from disk.
#[derive(Debug, Clone)]
pub struct RunInputs {
    /// Header path as the user gave it; its directory becomes `-I`.
    pub header_path: PathBuf,
    /// Header contents, scanned for prototypes.
    pub header_text: String,
    /// Implementation path, compiled alongside every candidate.
    pub source_path: PathBuf,
    /// Implementation contents, embedded in every prompt.
    pub source_text: String,
}

/// Drives a whole generation run.
pub struct Orchestrator {
    oracle: Arc<dyn Oracle>,
    toolchain: Arc<dyn Toolchain>,
    build_dir: PathBuf,
    max_workers: usize,
    strategies: Vec<PromptStrategy>,
}

impl Orchestrator {
    /// Assemble an orchestrator over the given backends.
    pub fn new(
        oracle: Arc<dyn Oracle>,
        toolchain: Arc<dyn Toolchain>,
        build_dir: impl Into<PathBuf>,
        max_workers: usize,
        strategies: Vec<PromptStrategy>,
    ) -> Self {
        Self {
            oracle,
            toolchain,
            build_dir: build_dir.into(),
            max_workers,
            strategies,
        }
    }

    /// Run the pipeline over every prototype in the header.
    ///
    /// Only scratch-directory creation can fail the run; everything past
    /// that point folds into per-instance verdicts.
    pub async fn run(&self, inputs: RunInputs) -> DomainResult<RunReport> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let extractor = SignatureExtractor::new();
        let signatures = extractor.scan(&inputs.header_text);
        info!(
            header = %inputs.header_path.display(),
            signatures = signatures.len(),
            "Scanned header for prototypes"
        );

        if signatures.is_empty() {
            warn!(
                header = %inputs.header_path.display(),
                "No function prototypes found; nothing to generate"
            );
            return Ok(self.report(started_at, clock, 0, 0, Tally::default()));
        }

        let stripped_source = extractor.strip_comments(&inputs.source_text);
        let builder = PromptBuilder::new(
            inputs.header_path.display().to_string(),
            stripped_source,
            self.strategies.clone(),
        );
        let prompts = builder.build(&signatures);

        tokio::fs::create_dir_all(&self.build_dir)
            .await
            .map_err(|source| DomainError::Scratch {
                path: self.build_dir.clone(),
                source,
            })?;

        let include_dir = match inputs.header_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let ctx = PipelineContext {
            oracle: Arc::clone(&self.oracle),
            toolchain: Arc::clone(&self.toolchain),
            impl_source: inputs.source_path.clone(),
            include_dir,
            build_dir: self.build_dir.clone(),
        };

        let signatures_found = signatures.len();
        let prompts_issued = prompts.len();
        info!(
            prompts = prompts_issued,
            workers = self.max_workers,
            oracle = self.oracle.name(),
            toolchain = self.toolchain.name(),
            "Generation run starting"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_workers.max(1)));
        let (tx, mut rx) = mpsc::channel(prompts_issued.max(1));
        let mut handles = Vec::with_capacity(prompts_issued);

        for prompt in prompts {
            // Never errors: the semaphore is never closed.
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };
            let ctx = ctx.clone();
            let tx = tx.clone();
            handles.push(tokio::spawn(async move {
                let _permit = permit;
                let outcome = run_instance(&ctx, &prompt).await;
                let _ = tx.send(outcome).await;
            }));
        }
        drop(tx);

        let mut tally = Tally::default();
        while let Some(outcome) = rx.recv().await {
            info!(
                signature = %outcome.signature,
                strategy = %outcome.strategy,
                verdict = outcome.verdict.as_str(),
                artifact = outcome.artifact.as_deref().unwrap_or("-"),
                "Instance finished"
            );
            tally.absorb(&outcome);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Pipeline instance aborted");
            }
        }

        info!(
            generated = tally.generated,
            compiled = tally.compiled.len(),
            passed = tally.passed.len(),
            failed = tally.failed.len(),
            oracle_failed = tally.oracle_failed,
            "Run complete"
        );
        Ok(self.report(started_at, clock, signatures_found, prompts_issued, tally))
    }

    fn report(
        &self,
        started_at: chrono::DateTime<Utc>,
        clock: Instant,
        signatures_found: usize,
        prompts_issued: usize,
        tally: Tally,
    ) -> RunReport {
        RunReport {
            started_at,
            duration_secs: clock.elapsed().as_secs_f64(),
            signatures_found,
            prompts_issued,
            tally,
        }
    }
}
