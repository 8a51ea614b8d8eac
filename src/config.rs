use crate::cohesion::CohesionThresholds;
use crate::core::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Top-level configuration loaded from `.cohesionmap.toml`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CohesionConfig {
    #[serde(default)]
    pub thresholds: CohesionThresholds,

    #[serde(default)]
    pub ignore: IgnoreConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Glob patterns for paths to skip.
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_format")]
    pub default_format: String,
}

fn default_output_format() -> String {
    "terminal".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_output_format(),
        }
    }
}

impl CohesionConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.thresholds.validate()
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CohesionConfig = toml::from_str(&content)
            .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))?;
        config
            .validate()
            .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Load `.cohesionmap.toml` from the given root, searching upward
    /// through parent directories. Missing config falls back to defaults;
    /// a malformed config is an error rather than a silent fallback.
    pub fn load(root: &Path) -> Result<Self> {
        match find_config_file(root) {
            Some(path) => {
                log::debug!("Loaded config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    let mut dir = Some(root);
    while let Some(current) = dir {
        let candidate = current.join(".cohesionmap.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

/// Process-wide config accessor for contexts without an explicit handle.
pub fn get_config() -> &'static CohesionConfig {
    static CONFIG: OnceLock<CohesionConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        CohesionConfig::load(Path::new(".")).unwrap_or_else(|e| {
            log::warn!("Failed to load configuration, using defaults: {}", e);
            CohesionConfig::default()
        })
    })
}
