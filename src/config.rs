//! Configuration for the hrdesk CLI.
//!
//! Settings live in `<config_dir>/hrdesk/config.json`. A missing or broken
//! file yields the defaults. Environment variables override the file:
//! - `HRDESK_URL` - API base URL
//! - `HRDESK_API_KEY` - bearer token
//! - `HRDESK_USER_ID` - id of the signed-in user
//! - `HRDESK_ROLE` - role of the signed-in user

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::client::{HrClient, DEFAULT_URL};
use crate::models::{Caller, DEFAULT_BASE_INCENTIVE_RATE, DEFAULT_MAX_INCENTIVE, EMPLOYEE_ROLE};

const APP_NAME: &str = "hrdesk";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HrConfig {
    /// Base URL of the HR API, without the `/api` suffix.
    pub base_url: String,
    pub api_key: Option<String>,
    /// Id of the signed-in user.
    pub user_id: i64,
    /// Role of the signed-in user; `employee` limits payslips to their own.
    pub role: String,
    /// Pause between payslips in a batch download, in milliseconds.
    pub pacing_ms: u64,
    /// Where generated payslips are written.
    pub output_dir: PathBuf,
    pub base_incentive_rate: u64,
    pub max_incentive: u64,
}

impl Default for HrConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            api_key: None,
            user_id: 0,
            role: EMPLOYEE_ROLE.to_string(),
            pacing_ms: 500,
            output_dir: PathBuf::from("payslips"),
            base_incentive_rate: DEFAULT_BASE_INCENTIVE_RATE,
            max_incentive: DEFAULT_MAX_INCENTIVE,
        }
    }
}

impl HrConfig {
    /// Load from the user's config directory, then apply environment overrides.
    pub fn load() -> Self {
        let config = match get_config_path().and_then(|p| Self::load_from(&p)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Read a config file. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save to the given path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    /// Unparsable numeric overrides are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("HRDESK_URL") {
            self.base_url = url;
        }
        if let Some(key) = lookup("HRDESK_API_KEY") {
            self.api_key = Some(key).filter(|k| !k.is_empty());
        }
        if let Some(id) = lookup("HRDESK_USER_ID").and_then(|v| v.trim().parse().ok()) {
            self.user_id = id;
        }
        if let Some(role) = lookup("HRDESK_ROLE") {
            self.role = role;
        }
        self
    }

    pub fn caller(&self) -> Caller {
        Caller::new(self.user_id, self.role.clone())
    }

    pub fn client(&self) -> HrClient {
        HrClient::new(self.base_url.clone(), self.api_key.clone())
    }

    pub fn pacing(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.pacing_ms)
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
