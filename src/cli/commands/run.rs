//! Implementation of the `testforge run` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use tokio::fs;

use crate::adapters::oracle::OpenAiOracle;
use crate::adapters::toolchain::CcToolchain;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, RunReport};
use crate::infrastructure::config::ConfigLoader;
use crate::services::prompt_builder::PromptStrategy;
use crate::services::{Orchestrator, RunInputs};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// C implementation file compiled alongside every generated test
    #[arg(long)]
    pub source_file: PathBuf,

    /// C header whose prototypes get tests
    #[arg(long)]
    pub header_file: PathBuf,

    /// Compiler invoked by name or path
    #[arg(long)]
    pub compiler: Option<String>,

    /// Oracle model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Scratch directory for generated sources and binaries
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Pipeline instances to run in parallel (1-64)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Prompt strategy to enable; repeat for more than one
    #[arg(long = "strategy")]
    pub strategies: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct RunOutput {
    pub header_file: PathBuf,
    pub source_file: PathBuf,
    #[serde(flatten)]
    pub report: RunReport,
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("Signatures found"),
            Cell::new(self.report.signatures_found),
        ]);
        table.add_row(vec![
            Cell::new("Prompts issued"),
            Cell::new(self.report.prompts_issued),
        ]);
        table.add_row(vec![
            Cell::new("Tests generated"),
            Cell::new(self.report.tally.generated),
        ]);
        table.add_row(vec![
            Cell::new("Tests compiled"),
            Cell::new(self.report.tally.compiled.len()),
        ]);
        table.add_row(vec![
            Cell::new("Tests passed"),
            Cell::new(self.report.tally.passed.len()),
        ]);
        table.add_row(vec![
            Cell::new("Tests failed"),
            Cell::new(self.report.tally.failed.len()),
        ]);
        table.add_row(vec![
            Cell::new("Oracle failures"),
            Cell::new(self.report.tally.oracle_failed),
        ]);
        table.add_row(vec![
            Cell::new("Duration"),
            Cell::new(format!("{:.1}s", self.report.duration_secs)),
        ]);

        let mut lines = vec![
            format!("Tested {} against {}", self.source_file.display(), self.header_file.display()),
            table.to_string(),
        ];
        if !self.report.tally.passed.is_empty() {
            lines.push("\nPassed tests:".to_string());
            for artifact in &self.report.tally.passed {
                lines.push(format!("  - {artifact}"));
            }
        }
        if !self.report.tally.failed.is_empty() {
            lines.push("\nFailed tests:".to_string());
            for artifact in &self.report.tally.failed {
                lines.push(format!("  - {artifact}"));
            }
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RunArgs, config_path: &Path, json_mode: bool) -> Result<()> {
    let mut config = ConfigLoader::load(config_path)?;
    apply_overrides(&mut config, &args);
    ConfigLoader::validate(&config)?;

    let strategies = parse_strategies(&config.pipeline.strategies)?;

    let header_text = fs::read_to_string(&args.header_file)
        .await
        .with_context(|| format!("Failed to read header {}", args.header_file.display()))?;
    let source_text = fs::read_to_string(&args.source_file)
        .await
        .with_context(|| format!("Failed to read source {}", args.source_file.display()))?;

    let oracle = Arc::new(OpenAiOracle::new(config.oracle.clone())?);
    let toolchain = Arc::new(CcToolchain::new(config.toolchain.clone()));
    let orchestrator = Orchestrator::new(
        oracle,
        toolchain,
        config.pipeline.build_dir.clone(),
        config.pipeline.max_workers,
        strategies,
    );

    let report = orchestrator
        .run(RunInputs {
            header_path: args.header_file.clone(),
            header_text,
            source_path: args.source_file.clone(),
            source_text,
        })
        .await?;

    let output_data = RunOutput {
        header_file: args.header_file,
        source_file: args.source_file,
        report,
    };
    output(&output_data, json_mode);
    Ok(())
}

/// CLI flags win over file and environment configuration.
fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(compiler) = &args.compiler {
        config.toolchain.compiler.clone_from(compiler);
    }
    if let Some(model) = &args.model {
        config.oracle.model.clone_from(model);
    }
    if let Some(build_dir) = &args.build_dir {
        config.pipeline.build_dir.clone_from(build_dir);
    }
    if let Some(jobs) = args.jobs {
        config.pipeline.max_workers = jobs;
    }
    if !args.strategies.is_empty() {
        config.pipeline.strategies.clone_from(&args.strategies);
    }
}

fn parse_strategies(names: &[String]) -> Result<Vec<PromptStrategy>> {
    names
        .iter()
        .map(|name| {
            name.parse::<PromptStrategy>()
                .with_context(|| format!("Unknown prompt strategy '{name}'"))
        })
        .collect()
}
