use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;
use crate::services::prompt_builder::PromptStrategy;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_workers: {0}. Must be between 1 and 64")]
    InvalidMaxWorkers(usize),

    #[error("Invalid {0}: must be a positive number of seconds")]
    ZeroTimeout(&'static str),

    #[error("Compiler command cannot be empty")]
    EmptyCompiler,

    #[error("Oracle model cannot be empty")]
    EmptyModel,

    #[error("Oracle base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("Scratch build directory cannot be empty")]
    EmptyBuildDir,

    #[error("At least one prompt strategy must be enabled")]
    NoStrategies,

    #[error("Unknown prompt strategy: {0}")]
    UnknownStrategy(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. The given YAML file, when it exists
    /// 3. Environment variables (TESTFORGE_* prefix, `__` nesting)
    ///
    /// CLI flags land on top of this; the command layer applies them and
    /// re-validates the result.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("TESTFORGE_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let workers = config.pipeline.max_workers;
        if workers == 0 || workers > 64 {
            return Err(ConfigError::InvalidMaxWorkers(workers));
        }

        if config.oracle.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("oracle.request_timeout_secs"));
        }
        if config.toolchain.compile_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("toolchain.compile_timeout_secs"));
        }
        if config.toolchain.exec_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("toolchain.exec_timeout_secs"));
        }

        if config.toolchain.compiler.trim().is_empty() {
            return Err(ConfigError::EmptyCompiler);
        }
        if config.oracle.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if config.oracle.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if config.pipeline.build_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyBuildDir);
        }

        if config.pipeline.strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        for name in &config.pipeline.strategies {
            name.parse::<PromptStrategy>()
                .map_err(|_| ConfigError::UnknownStrategy(name.clone()))?;
        }

        Ok(())
    }
}
