use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::metric::{COMPONENT_CPU, COMPONENT_RAM, Labels, METRIC_USAGE, UNIT_PERCENT};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub labels: LabelsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub interval_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig { interval_ms: 1000 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            db_path: PathBuf::from("data").join("syspulse.db"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub cpu_component: String,
    pub ram_component: String,
    pub usage_metric: String,
    pub percent_unit: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        LabelsConfig {
            cpu_component: COMPONENT_CPU.to_string(),
            ram_component: COMPONENT_RAM.to_string(),
            usage_metric: METRIC_USAGE.to_string(),
            percent_unit: UNIT_PERCENT.to_string(),
        }
    }
}

impl LabelsConfig {
    pub fn cpu(&self) -> Labels {
        self.labels_for(&self.cpu_component, COMPONENT_CPU)
    }

    pub fn ram(&self) -> Labels {
        self.labels_for(&self.ram_component, COMPONENT_RAM)
    }

    // Blank names fall back to the built-in ones; an empty label would make
    // every metric from that sampler unstorable.
    fn labels_for(&self, component: &str, default_component: &str) -> Labels {
        Labels::new(
            non_blank(component, default_component),
            non_blank(&self.usage_metric, METRIC_USAGE),
            non_blank(&self.percent_unit, UNIT_PERCENT),
        )
    }
}

fn non_blank<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { default } else { trimmed }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("syspulse").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
