use super::Settings;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use std::path::Path;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Layered configuration: embedded defaults, then one config file, then
/// `RFIND_*` environment variables (`__` separates sections).
pub struct FindConfig {
    figment: Figment,
}

impl FindConfig {
    /// Use `custom_config` instead of the per-user file when given.
    /// A missing file contributes nothing.
    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Self {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        figment = match custom_config {
            Some(custom_path) => figment.merge(Toml::file(custom_path)),
            None => figment.merge(Toml::file(Self::user_config_path())),
        };

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("RFIND_").split("__"));

        FindConfig { figment }
    }

    /// Typed view of the merged configuration
    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .context("Invalid rfind configuration")
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/rfind/config.toml", home),
            Err(_) => "~/.config/rfind/config.toml".to_string(),
        }
    }
}
