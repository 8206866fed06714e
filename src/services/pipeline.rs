//! Per-prompt pipeline instance.
//!
//! One instance drives one prompt from oracle conversation to terminal
//! verdict: generate, write to scratch, compile, retry once on compiler
//! feedback, execute. Every failure mode folds into the returned outcome,
//! so the aggregator always receives exactly one report per instance.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Attempt, CandidateTest, Conversation, InstanceOutcome, ScratchPaths, Verdict,
};
use crate::domain::ports::{sanitize_source, CompileOutcome, CompileRequest, Oracle, Toolchain};
use crate::services::prompt_builder::{corrective_request, Prompt, SYSTEM_PROMPT};
use crate::services::reply_parser;

/// Shared inputs for every instance of one run; cheap to clone per task.
#[derive(Clone)]
pub struct PipelineContext {
    /// Code-generation backend.
    pub oracle: Arc<dyn Oracle>,
    /// Compiler plus test-binary executor.
    pub toolchain: Arc<dyn Toolchain>,
    /// Implementation source compiled alongside every candidate.
    pub impl_source: PathBuf,
    /// Directory holding the header under test, passed as `-I`.
    pub include_dir: PathBuf,
    /// Scratch directory for candidate sources and binaries.
    pub build_dir: PathBuf,
}

/// Drive one prompt to a terminal verdict.
///
/// The conversation starts fresh per instance: system instruction, then the
/// generation request. A failed first compile triggers exactly one
/// corrective round with the compiler diagnostic appended; the corrected
/// candidate gets fresh scratch paths so both attempts stay on disk.
pub async fn run_instance(ctx: &PipelineContext, prompt: &Prompt) -> InstanceOutcome {
    let mut conversation = Conversation::with_system(SYSTEM_PROMPT);
    conversation.push_user(prompt.text.clone());

    let reply = match ctx.oracle.converse(&mut conversation).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(
                signature = %prompt.signature,
                strategy = %prompt.strategy,
                error = %e,
                "Oracle failed before any candidate was produced"
            );
            return outcome(prompt, Verdict::OracleFailed, None);
        }
    };

    let candidate = CandidateTest::new(
        sanitize_source(&reply_parser::candidate_source(&reply)),
        Attempt::First,
    );
    let (compiled, paths) = match compile_candidate(ctx, &candidate).await {
        Ok(pair) => pair,
        Err(e) => {
            warn!(signature = %prompt.signature, error = %e, "Could not write candidate");
            return outcome(prompt, Verdict::NeverCompiled, None);
        }
    };

    if compiled.success {
        return execute(ctx, prompt, &paths).await;
    }

    info!(
        signature = %prompt.signature,
        strategy = %prompt.strategy,
        "First compile failed, requesting a corrected test"
    );
    debug!(stderr = %compiled.stderr, "Compiler diagnostic fed back to the oracle");

    conversation.push_user(corrective_request(&compiled.stderr));
    let reply = match ctx.oracle.converse(&mut conversation).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(
                signature = %prompt.signature,
                strategy = %prompt.strategy,
                error = %e,
                "Oracle failed during the corrective round"
            );
            return outcome(prompt, Verdict::NeverCompiled, None);
        }
    };

    let candidate = CandidateTest::new(
        sanitize_source(&reply_parser::candidate_source(&reply)),
        Attempt::Corrected,
    );
    let (compiled, paths) = match compile_candidate(ctx, &candidate).await {
        Ok(pair) => pair,
        Err(e) => {
            warn!(signature = %prompt.signature, error = %e, "Could not write corrected candidate");
            return outcome(prompt, Verdict::NeverCompiled, None);
        }
    };

    if compiled.success {
        return execute(ctx, prompt, &paths).await;
    }

    info!(
        signature = %prompt.signature,
        strategy = %prompt.strategy,
        "Corrected candidate still does not compile"
    );
    debug!(stderr = %compiled.stderr, "Final compiler diagnostic");
    outcome(prompt, Verdict::NeverCompiled, None)
}

/// Write a candidate to a fresh scratch pair and compile it.
async fn compile_candidate(
    ctx: &PipelineContext,
    candidate: &CandidateTest,
) -> DomainResult<(CompileOutcome, ScratchPaths)> {
    let paths = ScratchPaths::fresh(&ctx.build_dir);
    tokio::fs::write(&paths.source, format!("{}\n", candidate.render()))
        .await
        .map_err(|source| DomainError::Scratch {
            path: paths.source.clone(),
            source,
        })?;

    let request = CompileRequest {
        test_source: paths.source.clone(),
        impl_source: ctx.impl_source.clone(),
        include_dir: ctx.include_dir.clone(),
        output: paths.binary.clone(),
    };
    let compiled = ctx.toolchain.compile(&request).await;
    Ok((compiled, paths))
}

/// Run a compiled candidate and classify the exit.
async fn execute(ctx: &PipelineContext, prompt: &Prompt, paths: &ScratchPaths) -> InstanceOutcome {
    let run = ctx.toolchain.run(&paths.binary).await;
    let verdict = if run.passed() {
        Verdict::Passed
    } else {
        Verdict::Failed
    };
    if verdict == Verdict::Failed {
        debug!(
            signature = %prompt.signature,
            exit_code = ?run.exit_code,
            timed_out = run.timed_out,
            "Test binary did not pass"
        );
    }
    outcome(prompt, verdict, Some(paths.binary.display().to_string()))
}

fn outcome(prompt: &Prompt, verdict: Verdict, artifact: Option<String>) -> InstanceOutcome {
    InstanceOutcome {
        signature: prompt.signature.to_string(),
        strategy: prompt.strategy.to_string(),
        verdict,
        artifact,
    }
}
