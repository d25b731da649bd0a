pub mod toml_config;

use crate::adapters::http::DEFAULT_BASE_URL;
use crate::core::{ConfigProvider, DiagnosticsMode};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use toml_config::TomlConfig;

/// Person fetched when nothing else is asked for.
pub const DEFAULT_PERSON_ID: u32 = 22;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "swapi"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Print a character with their home planet and films from SWAPI")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_BASE_URL))]
    pub base_url: String,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_PERSON_ID))]
    pub person_id: u32,

    #[cfg_attr(
        feature = "cli",
        arg(long, help = "Cap on simultaneous planet/film requests (unbounded when unset)")
    )]
    pub max_concurrent: Option<usize>,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t = DiagnosticsMode::Banner))]
    pub diagnostics: DiagnosticsMode,

    #[cfg_attr(
        feature = "cli",
        arg(long, help = "Read settings from a TOML file instead of the flags above")
    )]
    pub config: Option<PathBuf>,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub json_logs: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            person_id: DEFAULT_PERSON_ID,
            max_concurrent: None,
            diagnostics: DiagnosticsMode::default(),
            config: None,
            json_logs: false,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn person_id(&self) -> u32 {
        self.person_id
    }

    fn max_concurrent(&self) -> Option<usize> {
        self.max_concurrent
    }

    fn diagnostics(&self) -> DiagnosticsMode {
        self.diagnostics
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("--base-url", &self.base_url)?;
        validation::validate_positive_number("--person-id", self.person_id, 1)?;
        validation::validate_optional_positive("--max-concurrent", self.max_concurrent, 1)?;
        Ok(())
    }
}

/// Picks the settings source: the TOML file when `--config` is given,
/// the flags otherwise. The result is already validated.
pub fn resolve(cli: &CliConfig) -> Result<Box<dyn ConfigProvider>> {
    match &cli.config {
        Some(path) => {
            tracing::debug!("Loading settings from {}", path.display());
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            Ok(Box::new(config))
        }
        None => {
            cli.validate()?;
            Ok(Box::new(cli.clone()))
        }
    }
}
