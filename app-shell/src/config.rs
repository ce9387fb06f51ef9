//! Dashboard configuration, loaded from TOML.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use ts_core::TimeFrame;

use crate::prefs::FONT_KEY;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Backend base URL; empty means same origin.
    pub api_base: String,
    /// Chart timeframe before any recommendation picks one.
    pub default_timeframe: String,
    pub candle_limit: usize,
    pub default_risk_pct: f64,
    pub clock_sync_interval_ms: i64,
    pub poll_min_delay_ms: i64,
    pub poll_grace_ms: i64,
    /// localStorage key for the font size preference.
    pub font_key: String,
    /// Bind address of the development server.
    pub site_addr: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: reco_client::RecoConfig::build_time_base()
                .unwrap_or_default()
                .to_string(),
            default_timeframe: "30m".to_string(),
            candle_limit: reco_client::DEFAULT_CANDLE_LIMIT,
            default_risk_pct: 0.5,
            clock_sync_interval_ms: live_sync::CLOCK_SYNC_INTERVAL_MS,
            poll_min_delay_ms: live_sync::poll::MIN_POLL_DELAY_MS,
            poll_grace_ms: live_sync::poll::POLL_GRACE_MS,
            font_key: FONT_KEY.to_string(),
            site_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl DashboardConfig {
    pub const DEFAULT_FILE: &'static str = "reco-dashboard.toml";

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// `./reco-dashboard.toml` if present and valid, else defaults.
    pub fn load_default() -> Self {
        match Self::load(Self::default_path()) {
            Ok(config) => config,
            Err(ConfigError::ReadError(_)) => Self::default(),
            Err(e) => {
                log::warn!("ignoring {}: {e}", Self::DEFAULT_FILE);
                Self::default()
            }
        }
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(Self::DEFAULT_FILE)
    }

    /// Parsed default timeframe; unknown labels fall back to 30m.
    pub fn timeframe(&self) -> TimeFrame {
        TimeFrame::parse(&self.default_timeframe).unwrap_or(TimeFrame::THIRTY_MINUTES)
    }

    pub fn poll_schedule(&self) -> live_sync::PollSchedule {
        live_sync::PollSchedule {
            min_delay_ms: self.poll_min_delay_ms,
            grace_ms: self.poll_grace_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_behaviour() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.timeframe(), TimeFrame::Minutes(30));
        assert_eq!(cfg.candle_limit, 5000);
        assert_eq!(cfg.default_risk_pct, 0.5);
        assert_eq!(cfg.clock_sync_interval_ms, 60_000);
        assert_eq!(cfg.poll_schedule(), live_sync::PollSchedule::default());
        assert_eq!(cfg.font_key, "reco_font_base_px");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = DashboardConfig::from_toml_str(
            r#"
            api_base = "http://localhost:8000"
            default_timeframe = "1H"
            poll_grace_ms = 1500
            "#,
        )
        .unwrap();
        assert_eq!(cfg.api_base, "http://localhost:8000");
        assert_eq!(cfg.timeframe(), TimeFrame::Minutes(60));
        assert_eq!(cfg.poll_schedule().grace_ms, 1500);
        assert_eq!(cfg.poll_min_delay_ms, 2_000);
        assert_eq!(cfg.site_addr, "127.0.0.1:3000");
    }

    #[test]
    fn bad_values_are_parse_errors() {
        let err = DashboardConfig::from_toml_str("candle_limit = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn unknown_timeframe_falls_back() {
        let cfg = DashboardConfig::from_toml_str("default_timeframe = \"7w\"").unwrap();
        assert_eq!(cfg.timeframe(), TimeFrame::THIRTY_MINUTES);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("reco-dashboard-{}.toml", std::process::id()));
        std::fs::write(&path, "candle_limit = 1234\npoll_grace_ms = 500\n").unwrap();
        let loaded = DashboardConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(
            loaded,
            DashboardConfig {
                candle_limit: 1234,
                poll_grace_ms: 500,
                ..DashboardConfig::default()
            }
        );
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = DashboardConfig::load("/nonexistent/reco-dashboard.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }
}
