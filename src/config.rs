//! Widget configuration
//!
//! Read from `~/.config/numeric-input/config.yaml` unless a path is given explicitly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use serde::{Deserialize, Serialize};

use crate::state::DEFAULT_VALUE;
use crate::unit::{PERCENT_MAX, Unit};

const APP_DIR: &str = "numeric-input";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub initial_value: f64,
    pub unit: Unit,
    /// Seconds a validation tooltip stays visible
    pub tooltip_secs: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            initial_value: DEFAULT_VALUE,
            unit: Unit::default(),
            tooltip_secs: 5,
        }
    }
}

/// `<config_dir>/numeric-input/config.yaml`, if the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

impl WidgetConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).wrap_err("invalid widget config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config at {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .wrap_err_with(|| format!("failed to load config at {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// An explicit path must load. Without one, the default location is tried and any problem
    /// there falls back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let Some(path) = default_path() else {
            tracing::debug!("No config directory available, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        match Self::load(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("{:#}, using defaults", e);
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.initial_value.is_finite() || self.initial_value < 0.0 {
            bail!(
                "initial_value must be a non-negative number, got {}",
                self.initial_value
            );
        }
        if self.unit == Unit::Percent && self.initial_value > PERCENT_MAX {
            bail!(
                "initial_value {} exceeds {} for unit {}",
                self.initial_value,
                PERCENT_MAX,
                self.unit
            );
        }
        if self.tooltip_secs == 0 {
            bail!("tooltip_secs must be at least 1");
        }
        Ok(())
    }

    pub fn tooltip_duration(&self) -> Duration {
        Duration::from_secs(self.tooltip_secs)
    }
}
