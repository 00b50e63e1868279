use crate::error::{config_error, PlanResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;

/// Default tracing filter when neither RUST_LOG nor PLANSYNC_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Optional overlay file read after the environment
pub const CONFIG_FILE: &str = "config/plansync.toml";

/// Runtime configuration for the normalization layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Timezone used when rendering plan times
    pub timezone: String,
    /// Fallback tracing filter directive
    pub log_filter: String,
    /// Platform user the session acts as, if known
    pub session_user_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: String::from("UTC"),
            log_filter: String::from(DEFAULT_LOG_FILTER),
            session_user_id: None,
        }
    }
}

/// Fields allowed in the TOML overlay, all optional
#[derive(Debug, Deserialize)]
struct ConfigOverlay {
    timezone: Option<String>,
    log_filter: Option<String>,
    session_user_id: Option<String>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> PlanResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));
        let log_filter =
            env::var("PLANSYNC_LOG").unwrap_or_else(|_| String::from(DEFAULT_LOG_FILTER));
        let session_user_id = env::var("PLANSYNC_USER_ID").ok().filter(|s| !s.is_empty());

        let mut config = Config {
            timezone,
            log_filter,
            session_user_id,
        };

        match fs::read_to_string(CONFIG_FILE) {
            Ok(content) => config = config.merge_toml_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        // Fail on unknown timezone names
        config.tz()?;

        Ok(config)
    }

    /// Build a configuration from a TOML document on top of the defaults
    pub fn from_toml_str(content: &str) -> PlanResult<Self> {
        Config::default().merge_toml_str(content)
    }

    /// Apply a TOML overlay, keeping current values for keys it leaves out
    pub fn merge_toml_str(mut self, content: &str) -> PlanResult<Self> {
        let overlay: ConfigOverlay = toml::from_str(content)?;

        if let Some(timezone) = overlay.timezone {
            self.timezone = timezone;
        }
        if let Some(log_filter) = overlay.log_filter {
            self.log_filter = log_filter;
        }
        if overlay.session_user_id.is_some() {
            self.session_user_id = overlay.session_user_id;
        }

        Ok(self)
    }

    /// Parse the configured timezone
    pub fn tz(&self) -> PlanResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }
}
