use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_core::{Candle, LinePoint, TimeFrame, Timestamp};

/// Trade direction requested from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Long,
    Short,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Long => "long",
            Side::Short => "short",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Long => "LONG",
            Side::Short => "SHORT",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, deserialize_with = "opt_epoch_secs")]
    pub ts: Option<Timestamp>,
}

/// Newest bar of one timeframe. Only the timestamp is guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatestBar {
    #[serde(deserialize_with = "epoch_secs")]
    pub ts: Timestamp,
    #[serde(default)]
    pub close: Option<f64>,
}

/// Newest stored bar per timeframe label; `None` when a timeframe has no data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestSnapshot {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub latest: BTreeMap<String, Option<LatestBar>>,
}

impl LatestSnapshot {
    pub fn get(&self, tf: TimeFrame) -> Option<&LatestBar> {
        self.latest.get(&tf.label()).and_then(Option::as_ref)
    }

    pub fn ts(&self, tf: TimeFrame) -> Option<Timestamp> {
        self.get(tf).map(|bar| bar.ts)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Regime {
    #[serde(default)]
    pub bias: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub last_close: Option<f64>,
    #[serde(default)]
    pub sma200: Option<f64>,
    #[serde(default, deserialize_with = "opt_epoch_secs")]
    pub ts: Option<Timestamp>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// One evaluated timeframe in the ranking table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub tf: String,
    #[serde(default, deserialize_with = "opt_epoch_secs")]
    pub ts: Option<Timestamp>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub sma5: Option<f64>,
    #[serde(default)]
    pub rsi2: Option<f64>,
    #[serde(default)]
    pub atr14: Option<f64>,
    #[serde(default)]
    pub atr_pct: Option<f64>,
    #[serde(default)]
    pub entry_ease_score: Option<f64>,
    #[serde(default)]
    pub composite_score: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub backtest_score_norm: Option<f64>,
    #[serde(default, deserialize_with = "flag")]
    pub trigger_now: bool,
    #[serde(default)]
    pub time_to_next_sec: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Candidate {
    pub fn is_ready(&self) -> bool {
        self.status.as_deref() == Some("ready")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanParams {
    #[serde(default)]
    pub entry_atr_k: Option<f64>,
    #[serde(default)]
    pub stop_atr_mult: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Levels {
    #[serde(default)]
    pub entry: Option<f64>,
    #[serde(default)]
    pub stop: Option<f64>,
    #[serde(default)]
    pub tp1: Option<f64>,
    #[serde(default)]
    pub tp2: Option<f64>,
}

/// Overlay drawn on top of the candles: a guide path plus price levels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub tf_sec: i64,
    #[serde(default)]
    pub path: Vec<LinePoint>,
    #[serde(default)]
    pub levels: Levels,
}

/// Trade plan for the selected timeframe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub tf: Option<String>,
    #[serde(default)]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub stop_price: Option<f64>,
    #[serde(default)]
    pub tp1_price: Option<f64>,
    #[serde(default)]
    pub tp2_price: Option<f64>,
    #[serde(default)]
    pub tp3_price: Option<f64>,
    #[serde(default)]
    pub tp_rule: Option<String>,
    #[serde(default)]
    pub risk_pct: Option<f64>,
    #[serde(default)]
    pub stop_distance_pct: Option<f64>,
    #[serde(default)]
    pub entry_distance_pct: Option<f64>,
    #[serde(default)]
    pub max_leverage_by_risk: Option<f64>,
    #[serde(default)]
    pub reward_risk_to_tp1: Option<f64>,
    #[serde(default)]
    pub params: PlanParams,
    #[serde(default)]
    pub scenario: Option<Scenario>,
}

impl Plan {
    pub fn timeframe(&self) -> Option<TimeFrame> {
        self.tf.as_deref().and_then(TimeFrame::parse)
    }

    /// A plan is actionable once it carries an entry price.
    pub fn has_entry(&self) -> bool {
        self.entry_price.is_some_and(f64::is_finite)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub regime: Option<Regime>,
    #[serde(default)]
    pub selected: Option<Candidate>,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl RecommendResponse {
    pub fn scenario(&self) -> Option<&Scenario> {
        self.plan.as_ref().and_then(|p| p.scenario.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandlesResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default, rename = "data", deserialize_with = "null_as_empty")]
    pub candles: Vec<Candle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifyResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub recommend: Option<RecommendResponse>,
}

// Python backends emit either `true` or `1` for boolean flags.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Num(f64),
        Null(()),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => b,
        Raw::Num(n) => n != 0.0,
        Raw::Null(()) => false,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSecs {
    Int(i64),
    Float(f64),
}

impl RawSecs {
    // Fractional seconds are truncated; `as` saturates out-of-range floats.
    fn secs(self) -> Timestamp {
        match self {
            RawSecs::Int(s) => s,
            RawSecs::Float(s) => s.trunc() as Timestamp,
        }
    }
}

fn epoch_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
    Ok(RawSecs::deserialize(deserializer)?.secs())
}

fn opt_epoch_secs<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Timestamp>, D::Error> {
    Ok(Option::<RawSecs>::deserialize(deserializer)?.map(RawSecs::secs))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Candle>, D::Error> {
    Ok(Option::<Vec<Candle>>::deserialize(deserializer)?.unwrap_or_default())
}
