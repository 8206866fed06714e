//! Implementation of the `testforge signatures` command.
//!
//! Dry-run companion to `run`: shows which prototypes the scan would
//! target, without touching the oracle or the compiler.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use tokio::fs;

use crate::cli::output::{output, CommandOutput};
use crate::services::SignatureExtractor;

#[derive(Args, Debug)]
pub struct SignaturesArgs {
    /// C header to scan for function prototypes
    #[arg(long)]
    pub header_file: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct SignaturesOutput {
    pub header_file: PathBuf,
    pub count: usize,
    pub signatures: Vec<SignatureRow>,
}

#[derive(Debug, serde::Serialize)]
pub struct SignatureRow {
    pub function: String,
    pub declaration: String,
}

impl CommandOutput for SignaturesOutput {
    fn to_human(&self) -> String {
        if self.signatures.is_empty() {
            return format!(
                "No function prototypes found in {}",
                self.header_file.display()
            );
        }

        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Function").add_attribute(Attribute::Bold),
            Cell::new("Declaration").add_attribute(Attribute::Bold),
        ]);
        for row in &self.signatures {
            table.add_row(vec![
                Cell::new(&row.function),
                Cell::new(&row.declaration),
            ]);
        }

        format!(
            "{} prototype(s) in {}\n{table}",
            self.count,
            self.header_file.display()
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: SignaturesArgs, json_mode: bool) -> Result<()> {
    let header_text = fs::read_to_string(&args.header_file)
        .await
        .with_context(|| format!("Failed to read header {}", args.header_file.display()))?;

    let signatures = SignatureExtractor::new().scan(&header_text);
    let rows: Vec<SignatureRow> = signatures
        .iter()
        .map(|signature| SignatureRow {
            function: signature.function_name().to_string(),
            declaration: signature.to_string(),
        })
        .collect();

    let output_data = SignaturesOutput {
        header_file: args.header_file,
        count: rows.len(),
        signatures: rows,
    };
    output(&output_data, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_output() -> SignaturesOutput {
        SignaturesOutput {
            header_file: PathBuf::from("math.h"),
            count: 2,
            signatures: vec![
                SignatureRow {
                    function: "add".to_string(),
                    declaration: "int add(int a, int b)".to_string(),
                },
                SignatureRow {
                    function: "sub".to_string(),
                    declaration: "int sub(int a, int b)".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_human_output_tabulates_prototypes() {
        let text = sample_output().to_human();
        assert!(text.starts_with("2 prototype(s) in math.h"));
        assert!(text.contains("add"));
        assert!(text.contains("int sub(int a, int b)"));
    }

    #[test]
    fn test_human_output_for_empty_header() {
        let empty = SignaturesOutput {
            header_file: PathBuf::from("empty.h"),
            count: 0,
            signatures: vec![],
        };
        assert_eq!(
            empty.to_human(),
            "No function prototypes found in empty.h"
        );
    }

    #[test]
    fn test_json_output_shape() {
        let value = sample_output().to_json();
        assert_eq!(value["count"], 2);
        assert_eq!(value["signatures"][0]["function"], "add");
        assert_eq!(value["signatures"][1]["declaration"], "int sub(int a, int b)");
    }
}
