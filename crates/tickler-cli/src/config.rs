use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use tickler_core::timezone::validate_time_zone;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// User's default timezone (IANA format)
    #[serde(default = "detect_system_timezone")]
    pub default_timezone: String,
    /// Horizon in days for preview windows without an explicit end
    #[serde(default = "default_horizon_days")]
    pub horizon_days: i64,
    /// Rolling window length for sweeps, in minutes
    #[serde(default = "default_sweep_window_minutes")]
    pub sweep_window_minutes: i64,
}

fn default_horizon_days() -> i64 {
    90
}

fn default_sweep_window_minutes() -> i64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_timezone: detect_system_timezone(),
            horizon_days: default_horizon_days(),
            sweep_window_minutes: default_sweep_window_minutes(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("tickler.toml"))
            .merge(Env::prefixed("TICKLER_"))
            .extract()
    }
}

/// Detect the system timezone, falling back to UTC.
pub fn detect_system_timezone() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        if !tz.is_empty() && validate_time_zone(&tz).is_ok() {
            return tz;
        }
    }

    if let Ok(tz) = iana_time_zone::get_timezone() {
        if validate_time_zone(&tz).is_ok() {
            return tz;
        }
    }

    "UTC".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_system_timezone_is_usable() {
        let tz = detect_system_timezone();
        assert!(validate_time_zone(&tz).is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.horizon_days, 90);
        assert_eq!(config.sweep_window_minutes, 5);
    }
}
