use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::estimator::ClampPolicy;
use crate::models::CurrencyConversion;
use crate::render::DisplayCurrency;

const APP_NAME: &str = "launch-cost";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Port for the form page and JSON API
    pub port: u16,
    /// Model artifact path. Falls back to the platform data directory, then
    /// `models/launch_cost_model.json` under the working directory.
    pub model_path: Option<PathBuf>,
    /// Floor negative predictions at zero
    pub clamp_negative: bool,
    /// Local currency units per USD, used for the crores display
    pub fx_rate: f64,
    /// Show results in crores instead of millions of USD
    pub show_crores: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            model_path: None,
            clamp_negative: true,
            fx_rate: CurrencyConversion::DEFAULT_FX_RATE,
            show_crores: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the user's config directory, then apply
    /// environment overrides.
    /// Falls back to defaults if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let config = match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    fn try_load() -> Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(content).context("Failed to parse config file")?;
        if let Err(e) = CurrencyConversion::try_new(config.fx_rate) {
            tracing::warn!("Ignoring fx_rate in config file: {}", e);
            config.fx_rate = CurrencyConversion::DEFAULT_FX_RATE;
        }
        Ok(config)
    }

    /// Apply `LAUNCH_COST_*` overrides. Unparseable values are ignored with a
    /// warning.
    pub fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(port) = parse_var(&var, "LAUNCH_COST_PORT") {
            self.port = port;
        }
        if let Some(path) = var("LAUNCH_COST_MODEL") {
            self.model_path = Some(PathBuf::from(path));
        }
        if let Some(clamp) = parse_var(&var, "LAUNCH_COST_CLAMP") {
            self.clamp_negative = clamp;
        }
        if let Some(rate) = parse_var::<f64>(&var, "LAUNCH_COST_FX_RATE") {
            match CurrencyConversion::try_new(rate) {
                Ok(conversion) => self.fx_rate = conversion.fx_rate(),
                Err(e) => tracing::warn!("Ignoring LAUNCH_COST_FX_RATE: {}", e),
            }
        }
        if let Some(show) = parse_var(&var, "LAUNCH_COST_SHOW_CRORES") {
            self.show_crores = show;
        }
        self
    }

    pub fn clamp_policy(&self) -> ClampPolicy {
        ClampPolicy::from_flag(self.clamp_negative)
    }

    /// The configured conversion, or the default rate if `fx_rate` was set
    /// to something unusable after loading.
    pub fn currency(&self) -> CurrencyConversion {
        CurrencyConversion::try_new(self.fx_rate).unwrap_or_default()
    }

    pub fn display_currency(&self) -> DisplayCurrency {
        if self.show_crores {
            DisplayCurrency::Crores(self.currency())
        } else {
            DisplayCurrency::UsdMillions
        }
    }

    /// Save the current configuration to disk.
    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = var(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
