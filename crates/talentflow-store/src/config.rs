//! Store configuration and factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use talentflow_core::{IdGenerator, RandomIds, SequentialIds};

use crate::json::JsonStore;
use crate::memory::MemoryStore;
use crate::traits::AssessmentStore;

/// Which storage backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// One JSON file per record under `data_dir`.
    #[default]
    Json,
    /// Process memory only.
    Memory,
}

/// How the builder generates section and question ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Sequential,
    Random,
}

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator + Send> {
        match self {
            IdStrategy::Sequential => Box::new(SequentialIds::new()),
            IdStrategy::Random => Box::new(RandomIds),
        }
    }
}

/// Top-level talentflow configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentflowConfig {
    /// Where the JSON backend keeps its records.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./talentflow-data")
}

impl Default for TalentflowConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backend: Backend::default(),
            id_strategy: IdStrategy::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `talentflow.toml` in the current directory
/// 2. `~/.config/talentflow/config.toml`
///
/// `TALENTFLOW_DATA_DIR` overrides `data_dir`.
pub fn load_config() -> Result<TalentflowConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TalentflowConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("talentflow.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TalentflowConfig::default(),
    };

    if let Ok(dir) = std::env::var("TALENTFLOW_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }

    Ok(config)
}

/// Parse a config document and expand `${VAR}` references in `data_dir`.
pub fn parse_config(content: &str) -> Result<TalentflowConfig> {
    let mut config: TalentflowConfig = toml::from_str(content)?;
    config.data_dir = PathBuf::from(resolve_env_vars(&config.data_dir.to_string_lossy()));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("talentflow"))
}

/// Create a store instance from the configuration.
pub fn create_store(config: &TalentflowConfig) -> Box<dyn AssessmentStore> {
    match config.backend {
        Backend::Json => Box::new(JsonStore::new(&config.data_dir)),
        Backend::Memory => Box::new(MemoryStore::new()),
    }
}
