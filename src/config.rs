use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::presenter::wizard_presenter::WizardOptions;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Telegram bot token
    pub telegram_bot_token: String,

    /// Postgres URL; the in-memory journal is used when absent
    pub database_url: Option<String>,

    pub db_max_connections: u32,

    /// Seconds a wizard may stay untouched before it is reset, 0 disables
    pub session_idle_timeout_secs: u64,

    pub session_sweep_interval_secs: u64,

    pub strict_pair_choice: bool,

    pub keep_deal_on_save_failure: bool,
}

impl AppConfig {
    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("db_max_connections", 10)?
            .set_default("session_idle_timeout_secs", 900)?
            .set_default("session_sweep_interval_secs", 60)?
            .set_default("strict_pair_choice", true)?
            .set_default("keep_deal_on_save_failure", true)
    }

    /// Load from `config/bot.toml` (optional), `BOT_*` variables and the
    /// unprefixed `TELEGRAM_BOT_TOKEN` / `DATABASE_URL` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("config/bot").required(false))
            .add_source(Environment::with_prefix("BOT").try_parsing(true))
            .set_override_option("telegram_bot_token", env::var("TELEGRAM_BOT_TOKEN").ok())?
            .set_override_option("database_url", env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }

    pub fn session_idle_timeout(&self) -> Option<Duration> {
        match self.session_idle_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_secs.max(1))
    }

    pub fn wizard_options(&self) -> WizardOptions {
        WizardOptions {
            strict_pair_choice: self.strict_pair_choice,
            keep_deal_on_save_failure: self.keep_deal_on_save_failure,
        }
    }
}
