use crate::core::sampler::{SamplerDefaults, MAX_NUM_POINTS};
use crate::core::separability::DemoConfig;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SigmoidError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub sampler: SamplerDefaults,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// "compact" 或 "json"
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            log_format: "compact".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// "memory" 或 "file"
    pub backend: String,
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            path: "./data/parameters.json".to_string(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SigmoidError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SigmoidError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SIGMOID_BIND})；未設定的保留原字串
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn uses_file_storage(&self) -> bool {
        self.storage.backend == "file"
    }

    pub fn json_logs_enabled(&self) -> bool {
        self.server.log_format == "json"
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> &str {
        &self.server.bind
    }

    fn storage_path(&self) -> Option<&str> {
        self.uses_file_storage().then_some(self.storage.path.as_str())
    }

    fn json_logs(&self) -> bool {
        self.json_logs_enabled()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_socket_addr("server.bind", &self.server.bind)?;
        validation::validate_one_of("server.log_format", &self.server.log_format, &["compact", "json"])?;
        validation::validate_one_of("storage.backend", &self.storage.backend, &["memory", "file"])?;
        if self.uses_file_storage() {
            validation::validate_path("storage.path", &self.storage.path)?;
        }

        validation::validate_finite("sampler.x_shift", self.sampler.x_shift)?;
        validation::validate_finite("sampler.steepness", self.sampler.steepness)?;
        validation::validate_finite("sampler.x_range_start", self.sampler.x_range_start)?;
        validation::validate_finite("sampler.x_range_end", self.sampler.x_range_end)?;
        validation::validate_range(
            "sampler.max_num_points",
            self.sampler.max_num_points,
            1,
            MAX_NUM_POINTS,
        )?;
        validation::validate_range(
            "sampler.num_points",
            self.sampler.num_points,
            1,
            self.sampler.max_num_points,
        )?;

        self.demo.validate()?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
