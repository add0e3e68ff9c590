use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_audit_log_path")]
    pub audit_log_path: PathBuf,
}

fn default_api_url() -> String {
    "https://api.rolegate.sh".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_audit_log_path() -> PathBuf {
    Config::rolegate_dir().join("logs")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            user_id: None,
            request_timeout_secs: default_request_timeout_secs(),
            audit_log_path: default_audit_log_path(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let mut config = Self::default();
            config.apply_env_overrides();
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path).context("Failed to read config file")?;
        let mut config: Config =
            toml::from_str(&contents).context("Failed to parse config file")?;

        config.apply_env_overrides();

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    pub fn config_path() -> PathBuf {
        std::env::var("ROLEGATE_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::rolegate_dir().join("config.toml"))
    }

    pub fn rolegate_dir() -> PathBuf {
        std::env::var("ROLEGATE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".rolegate")
            })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ROLEGATE_API_URL") {
            self.api_url = val;
        }

        if let Ok(val) = std::env::var("ROLEGATE_API_KEY") {
            self.api_key = Some(val);
        }

        if let Ok(val) = std::env::var("ROLEGATE_USER_ID") {
            if let Ok(id) = val.parse() {
                self.user_id = Some(id);
            }
        }

        if let Ok(val) = std::env::var("ROLEGATE_TIMEOUT_SECS") {
            if let Ok(seconds) = val.parse() {
                self.request_timeout_secs = seconds;
            }
        }

        if let Ok(val) = std::env::var("ROLEGATE_AUDIT_LOG_PATH") {
            self.audit_log_path = PathBuf::from(val);
        }
    }
}

pub async fn show_config() -> Result<()> {
    let config = Config::load()?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

pub async fn init_config() -> Result<()> {
    let config_path = Config::config_path();

    if config_path.exists() {
        anyhow::bail!("Config file already exists at: {}", config_path.display());
    }

    let config = Config::default();
    config.save()?;

    println!("Initialized config at: {}", config_path.display());
    Ok(())
}
