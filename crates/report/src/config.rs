use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use engine::parser::DETECTION_SAMPLE_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory scanned for log files when no inputs are given
    pub logs_dir: String,
    /// Cap on the total record set after loading
    pub max_entries: usize,
    /// Default number of top clients to list
    pub top_clients: usize,
    /// Non-blank lines sampled for format detection
    pub detect_sample: usize,
}

impl ReportConfig {
    /// Load configuration from file or environment variables.
    /// Priority: CLI flags (applied by the caller) > Environment Variables >
    /// Config File > Defaults
    pub fn load() -> anyhow::Result<Self> {
        let config_path =
            std::env::var("REPORT_CONFIG_FILE").unwrap_or_else(|_| "report.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        // Environment variables override file config
        if let Ok(dir) = std::env::var("REPORT_LOGS_DIR") {
            config.logs_dir = dir;
        }
        if let Ok(max) = std::env::var("REPORT_MAX_ENTRIES") {
            if let Ok(max) = max.parse() {
                config.max_entries = max;
            }
        }
        if let Ok(top) = std::env::var("REPORT_TOP_CLIENTS") {
            if let Ok(top) = top.parse() {
                config.top_clients = top;
            }
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let mut file =
            File::open(path).with_context(|| format!("cannot open config file {path}"))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("cannot read config file {path}"))?;

        let config: ReportConfig =
            toml::from_str(&contents).with_context(|| format!("invalid TOML in {path}"))?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.logs_dir.is_empty() {
            return Err("logs_dir must not be empty".to_string());
        }
        if self.max_entries == 0 {
            return Err("max_entries must be > 0".to_string());
        }
        if self.top_clients == 0 {
            return Err("top_clients must be > 0".to_string());
        }
        if self.detect_sample == 0 {
            return Err("detect_sample must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            logs_dir: "logs".to_string(),
            max_entries: 85_000,
            top_clients: 20,
            detect_sample: DETECTION_SAMPLE_SIZE,
        }
    }
}
