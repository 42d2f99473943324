use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "sigmoid-api")]
#[command(about = "HTTP API for sampling sigmoid curves and a radial separability demo")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to listen on (overrides server.bind)
    #[arg(long)]
    pub bind: Option<String>,

    /// Persist parameters to this JSON file (overrides storage settings)
    #[arg(long)]
    pub storage_path: Option<String>,

    /// Keep parameters in memory only, even if the config file names a path
    #[arg(long, conflicts_with = "storage_path")]
    pub in_memory: bool,

    /// Seed for the separability demo (overrides demo.seed)
    #[arg(long)]
    pub demo_seed: Option<u64>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入 TOML (若有指定) 並套用命令列覆蓋設定
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(path) = &self.storage_path {
            config.storage.backend = "file".to_string();
            config.storage.path = path.clone();
        }
        if self.in_memory {
            config.storage.backend = "memory".to_string();
        }
        if let Some(seed) = self.demo_seed {
            config.demo.seed = seed;
        }
        if self.json_logs {
            config.server.log_format = "json".to_string();
        }

        Ok(config)
    }
}
