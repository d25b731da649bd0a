use crate::adapters::http::DEFAULT_BASE_URL;
use crate::config::DEFAULT_PERSON_ID;
use crate::core::{ConfigProvider, DiagnosticsMode};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based settings:
///
/// ```toml
/// [api]
/// base_url = "https://swapi.dev/api/"
///
/// [run]
/// person_id = 22
/// max_concurrent = 4
/// diagnostics = "log"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_person_id")]
    pub person_id: u32,
    pub max_concurrent: Option<usize>,
    #[serde(default)]
    pub diagnostics: DiagnosticsMode,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_person_id() -> u32 {
    DEFAULT_PERSON_ID
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            person_id: default_person_id(),
            max_concurrent: None,
            diagnostics: DiagnosticsMode::default(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${SWAPI_BASE_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn person_id(&self) -> u32 {
        self.run.person_id
    }

    fn max_concurrent(&self) -> Option<usize> {
        self.run.max_concurrent
    }

    fn diagnostics(&self) -> DiagnosticsMode {
        self.run.diagnostics
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_positive_number("run.person_id", self.run.person_id, 1)?;
        validation::validate_optional_positive("run.max_concurrent", self.run.max_concurrent, 1)?;
        Ok(())
    }
}
