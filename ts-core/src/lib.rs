use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Seconds since Unix epoch. The backend stamps bars with their open time.
pub type Timestamp = i64;

pub const MS: i64 = 1_000;
pub const MINUTE_SECS: i64 = 60;
pub const MINUTE_MS: i64 = MINUTE_SECS * MS;

/// Seconds to browser-clock milliseconds, saturating at the `i64` range.
pub fn secs_to_ms(ts: Timestamp) -> i64 {
    ts.saturating_mul(MS)
}

/// Backend timeframe labels: `1m`, `5m`, `15m`, `30m`, `60m`, `180m`, `1D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    Minutes(u32),
    Days(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported timeframe: {0}")]
pub struct ParseTimeFrameError(pub String);

impl TimeFrame {
    pub const ONE_MINUTE: TimeFrame = TimeFrame::Minutes(1);
    pub const THIRTY_MINUTES: TimeFrame = TimeFrame::Minutes(30);

    /// Label used in URLs and snapshot keys.
    pub fn label(&self) -> String {
        match *self {
            TimeFrame::Minutes(m) => format!("{m}m"),
            TimeFrame::Days(d) => format!("{d}D"),
        }
    }

    /// Parse a label, accepting the aliases TradingView alerts use
    /// (`30`, `1H`, `3H`, `D`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "1" | "1M" => Some(TimeFrame::Minutes(1)),
            "5" | "5M" => Some(TimeFrame::Minutes(5)),
            "15" | "15M" => Some(TimeFrame::Minutes(15)),
            "30" | "30M" | "0.5H" => Some(TimeFrame::Minutes(30)),
            "60" | "60M" | "1H" => Some(TimeFrame::Minutes(60)),
            "180" | "180M" | "3H" => Some(TimeFrame::Minutes(180)),
            "1D" | "D" | "1DAY" | "DAY" => Some(TimeFrame::Days(1)),
            _ => None,
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for TimeFrame {
    type Err = ParseTimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeFrame::parse(s).ok_or_else(|| ParseTimeFrameError(s.to_string()))
    }
}

impl Serialize for TimeFrame {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for TimeFrame {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One OHLC bar as served by `/api/candles`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub ts: Timestamp, // bar open time
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
    /// In-progress bar synthesised from finer data.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_partial: bool,
}

impl Candle {
    pub fn new(ts: Timestamp, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            ts,
            open,
            high,
            low,
            close,
            volume: None,
            is_partial: false,
        }
    }

    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

/// A single `(time, value)` vertex of a line series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub ts: Timestamp,
    pub value: f64,
}

impl LinePoint {
    pub fn new(ts: Timestamp, value: f64) -> Self {
        Self { ts, value }
    }
}

/// Last close and its change versus the previous bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    pub last: f64,
    pub delta: Option<f64>,
    pub delta_pct: Option<f64>,
}

/// Summarise the tail of a candle snapshot; `None` when it is empty.
pub fn price_change(candles: &[Candle]) -> Option<PriceChange> {
    let last = candles.last()?;
    let prev = candles.len().checked_sub(2).map(|i| &candles[i]);
    let delta = prev.map(|p| last.close - p.close);
    let delta_pct = match (prev, delta) {
        (Some(p), Some(d)) if p.close != 0.0 => Some(d / p.close * 100.0),
        _ => None,
    };
    Some(PriceChange {
        last: last.close,
        delta,
        delta_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_aliases() {
        assert_eq!(TimeFrame::parse("30"), Some(TimeFrame::Minutes(30)));
        assert_eq!(TimeFrame::parse("1h"), Some(TimeFrame::Minutes(60)));
        assert_eq!(TimeFrame::parse("3H"), Some(TimeFrame::Minutes(180)));
        assert_eq!(TimeFrame::parse("d"), Some(TimeFrame::Days(1)));
        assert_eq!(TimeFrame::parse("1m"), Some(TimeFrame::Minutes(1)));
        assert!(TimeFrame::parse("2w").is_none());
        for label in ["1m", "5m", "15m", "30m", "60m", "180m", "1D"] {
            let tf: TimeFrame = label.parse().unwrap();
            assert_eq!(tf.label(), label);
        }
        assert_eq!(
            "2w".parse::<TimeFrame>().unwrap_err().to_string(),
            "unsupported timeframe: 2w"
        );
    }

    #[test]
    fn secs_to_ms_saturates() {
        assert_eq!(secs_to_ms(1_700_000_000), 1_700_000_000_000);
        assert_eq!(secs_to_ms(i64::MAX), i64::MAX);
        assert_eq!(secs_to_ms(i64::MIN), i64::MIN);
    }

    #[test]
    fn candle_accepts_null_volume_and_partial_flag() {
        let raw = r#"[
            {"ts": 60, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "volume": null},
            {"ts": 120, "open": 1.5, "high": 2.5, "low": 1.0, "close": 2.0, "volume": 3.0, "is_partial": true}
        ]"#;
        let candles: Vec<Candle> = serde_json::from_str(raw).unwrap();
        assert_eq!(candles[0].volume, None);
        assert!(!candles[0].is_partial);
        assert_eq!(candles[1].volume, Some(3.0));
        assert!(candles[1].is_partial);
    }

    #[test]
    fn price_change_needs_two_bars_for_delta() {
        assert!(price_change(&[]).is_none());
        let one = [Candle::new(0, 1.0, 1.0, 1.0, 10.0)];
        let pc = price_change(&one).unwrap();
        assert_eq!(pc.last, 10.0);
        assert!(pc.delta_pct.is_none());

        let two = [
            Candle::new(0, 1.0, 1.0, 1.0, 10.0),
            Candle::new(60, 1.0, 1.0, 1.0, 11.0),
        ];
        let pc = price_change(&two).unwrap();
        assert_eq!(pc.delta, Some(1.0));
        assert!((pc.delta_pct.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn zero_previous_close_has_no_percentage() {
        let bars = [
            Candle::new(0, 0.0, 0.0, 0.0, 0.0),
            Candle::new(60, 1.0, 1.0, 1.0, 1.0),
        ];
        assert!(price_change(&bars).unwrap().delta_pct.is_none());
    }
}
