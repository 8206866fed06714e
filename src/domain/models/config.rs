//! Runtime configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure for testforge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Oracle endpoint configuration
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Compiler and executor configuration
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    /// Pipeline scheduling and scratch-space configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Oracle endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OracleConfig {
    /// Base URL of an OpenAI-compatible chat completions endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token; falls back to `OPENAI_API_KEY` when unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Sampling temperature; omitted from requests when unset
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4-1106-preview".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    300
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            temperature: None,
        }
    }
}

impl OracleConfig {
    /// Replace the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set an explicit bearer token.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Compiler and executor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ToolchainConfig {
    /// Compiler invoked by name or path
    #[serde(default = "default_compiler")]
    pub compiler: String,

    /// Upper bound on one compile invocation, in seconds
    #[serde(default = "default_compile_timeout_secs")]
    pub compile_timeout_secs: u64,

    /// Upper bound on one test-binary execution, in seconds
    #[serde(default = "default_exec_timeout_secs")]
    pub exec_timeout_secs: u64,
}

fn default_compiler() -> String {
    "gcc".to_string()
}

const fn default_compile_timeout_secs() -> u64 {
    60
}

const fn default_exec_timeout_secs() -> u64 {
    10
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            compile_timeout_secs: default_compile_timeout_secs(),
            exec_timeout_secs: default_exec_timeout_secs(),
        }
    }
}

/// Pipeline scheduling and scratch-space configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Scratch directory for generated sources and binaries
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Maximum pipeline instances in flight (1-64)
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Enabled prompt strategies, by name
    #[serde(default = "default_strategies")]
    pub strategies: Vec<String>,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

const fn default_max_workers() -> usize {
    1
}

fn default_strategies() -> Vec<String> {
    vec!["happy-path".to_string(), "edge-case".to_string()]
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
            max_workers: default_max_workers(),
            strategies: default_strategies(),
        }
    }
}
