//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use brms_auth::SessionConfig;
use brms_commerce::pricing::PricingConfig;
use serde::{Deserialize, Serialize};

/// Config file names searched from the working directory upward.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["brms.toml", ".brms.toml", "brms.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrmsConfig {
    /// Currency, tax and delivery fees.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Checkout behavior.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Session storage.
    #[serde(default)]
    pub session: SessionSettings,
}

impl BrmsConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Checkout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// How long the simulated placement takes.
    #[serde(default = "default_placement_delay_ms")]
    pub placement_delay_ms: u64,
}

fn default_placement_delay_ms() -> u64 {
    2000
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            placement_delay_ms: default_placement_delay_ms(),
        }
    }
}

impl CheckoutConfig {
    pub fn placement_delay(&self) -> Duration {
        Duration::from_millis(self.placement_delay_ms)
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Login lifetime in hours; 0 never expires.
    #[serde(default = "default_duration_hours")]
    pub duration_hours: i64,

    /// Where the session file lives. Relative paths resolve against the
    /// working directory; unset uses the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
}

fn default_duration_hours() -> i64 {
    SessionConfig::DEFAULT_DURATION_HOURS
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            duration_hours: default_duration_hours(),
            storage_path: None,
        }
    }
}

impl SessionSettings {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::from_hours(self.duration_hours)
    }
}

/// Generate a default brms.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# BRMS ordering configuration

[pricing]
currency = "RWF"
# 800 basis points = 8%
tax_rate_bps = 800

[pricing.delivery_fees]
delivery_1hour = 3000
dine_in = 0
take_away = 0

[checkout]
placement_delay_ms = {delay}

[session]
duration_hours = {hours}
# storage_path = ".brms/state.json"
"#,
        delay = default_placement_delay_ms(),
        hours = default_duration_hours(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use brms_commerce::money::Currency;

    #[test]
    fn test_default_file_matches_defaults() {
        let parsed: BrmsConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, BrmsConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: BrmsConfig = toml::from_str(
            r#"
[pricing]
tax_rate_bps = 1800

[pricing.delivery_fees]
delivery_1hour = 2500
"#,
        )
        .unwrap();
        assert_eq!(parsed.pricing.currency, Currency::RWF);
        assert_eq!(parsed.pricing.tax_rate_bps, 1800);
        assert_eq!(parsed.pricing.delivery_fees.delivery_1hour, 2500);
        assert_eq!(parsed.checkout.placement_delay_ms, 2000);
        assert_eq!(parsed.session.duration_hours, 168);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brms.json");
        let mut config = BrmsConfig::default();
        config.session.storage_path = Some("state.json".to_string());
        config.save(&path).unwrap();
        assert_eq!(BrmsConfig::load(&path).unwrap(), config);
    }
}
