use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{GraphbookError, Result};

pub const DEFAULT_BASE_URL: &str = "https://graphbook-backend.herokuapp.com";
pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

const EMAIL_ENV_VAR: &str = "GRAPHBOOK_EMAIL";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub base_url: String,
    pub posts_url: String,
    pub session_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            email: None,
            first_name: None,
            last_name: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            posts_url: DEFAULT_POSTS_URL.to_string(),
            session_timeout_secs: 5,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| GraphbookError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| GraphbookError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "graphbook")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(GraphbookError::NoConfigDir)
    }

    /// Session email: explicit argument, then env var, then config file
    pub fn resolve_email(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(email) = explicit {
            return Ok(email.to_string());
        }

        if let Ok(email) = std::env::var(EMAIL_ENV_VAR) {
            return Ok(email);
        }

        self.email.clone().ok_or(GraphbookError::MissingEmail)
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
