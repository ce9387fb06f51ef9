//! Dashboard state and the transitions user actions and the feed drive.

use live_sync::{Countdown, FeedEvent};
use reco_client::{
    Candidate, LatestSnapshot, NotifyResponse, Plan, RecoError, RecommendResponse, Regime,
    Scenario, Side,
};
use ts_core::{price_change, Candle, PriceChange, TimeFrame, Timestamp};

use crate::config::DashboardConfig;
use crate::format::notify_detail_message;
use crate::prefs::{self, FONT_DEFAULT_PX};

pub const RISK_MIN_PCT: f64 = 0.05;
pub const RISK_MAX_PCT: f64 = 2.0;
pub const RISK_STEP_PCT: f64 = 0.05;

pub const UNKNOWN_ERROR: &str = "unknown error";
pub const NOTIFY_SENT: &str = "Discord notification sent";

/// Timeframes listed in the status row.
pub const STATUS_TIMEFRAMES: [TimeFrame; 4] = [
    TimeFrame::Minutes(1),
    TimeFrame::Minutes(30),
    TimeFrame::Minutes(60),
    TimeFrame::Minutes(180),
];

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub side: Side,
    pub risk_pct: f64,
    pub recommendation: Option<RecommendResponse>,
    pub candles: Vec<Candle>,
    pub scenario: Option<Scenario>,
    pub chart_tf: TimeFrame,
    pub busy: bool,
    pub error: Option<String>,
    pub notify_msg: Option<String>,
    pub latest: Option<LatestSnapshot>,
    pub font_px: i32,
    pub clock_offset_ms: i64,
    pub glossary_open: bool,
    pub glossary_query: String,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl DashboardState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            side: Side::Long,
            risk_pct: clamp_risk_pct(config.default_risk_pct).unwrap_or(0.5),
            recommendation: None,
            candles: Vec::new(),
            scenario: None,
            chart_tf: config.timeframe(),
            busy: false,
            error: None,
            notify_msg: None,
            latest: None,
            font_px: FONT_DEFAULT_PX,
            clock_offset_ms: 0,
            glossary_open: false,
            glossary_query: String::new(),
        }
    }

    pub fn begin_request(&mut self) {
        self.busy = true;
        self.error = None;
        self.notify_msg = None;
    }

    pub fn apply_recommendation(&mut self, result: Result<RecommendResponse, RecoError>) {
        match result {
            Ok(reco) if !reco.ok => {
                self.error = Some(
                    reco.error
                        .clone()
                        .filter(|e| !e.is_empty())
                        .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
                );
                self.scenario = None;
                self.recommendation = Some(reco);
            }
            Ok(reco) => {
                self.scenario = reco.scenario().cloned();
                if let Some(tf) = reco.plan.as_ref().and_then(Plan::timeframe) {
                    self.chart_tf = tf;
                }
                self.recommendation = Some(reco);
            }
            Err(e) => {
                log::warn!("recommendation failed: {e}");
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn finish_request(&mut self) {
        self.busy = false;
    }

    pub fn begin_notify(&mut self) {
        self.notify_msg = None;
    }

    pub fn apply_notify(&mut self, result: Result<NotifyResponse, RecoError>) {
        let msg = match result {
            Ok(res) if !res.ok => notify_detail_message(res.detail.as_deref()),
            Ok(res) => {
                if let Some(reco) = res.recommend.filter(|r| r.ok) {
                    self.recommendation = Some(reco);
                }
                NOTIFY_SENT.to_string()
            }
            Err(e) => {
                log::warn!("notification failed: {e}");
                e.to_string()
            }
        };
        self.notify_msg = Some(msg);
    }

    pub fn apply_latest(&mut self, snapshot: LatestSnapshot) {
        self.latest = Some(snapshot);
    }

    /// Candle snapshots for a timeframe the chart no longer shows are dropped.
    pub fn apply_feed(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Latest(snapshot) => self.apply_latest(snapshot),
            FeedEvent::Candles { timeframe, candles } => {
                if timeframe == self.chart_tf {
                    self.candles = candles;
                }
            }
            FeedEvent::ClockOffset(offset) => self.clock_offset_ms = offset,
        }
    }

    pub fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    /// Accepts finite values, clamped to the input range; anything else is ignored.
    pub fn set_risk_pct(&mut self, pct: f64) {
        if let Some(p) = clamp_risk_pct(pct) {
            self.risk_pct = p;
        }
    }

    pub fn risk_param(&self) -> Option<f64> {
        Some(self.risk_pct).filter(|p| p.is_finite())
    }

    pub fn set_font_px(&mut self, px: i32) {
        self.font_px = prefs::clamp_font_px(f64::from(px));
    }

    pub fn font_increase(&mut self) {
        self.font_px = prefs::increase_font(self.font_px);
    }

    pub fn font_decrease(&mut self) {
        self.font_px = prefs::decrease_font(self.font_px);
    }

    pub fn font_reset(&mut self) {
        self.font_px = FONT_DEFAULT_PX;
    }

    pub fn open_glossary(&mut self, term: Option<&str>) {
        self.glossary_query = term.unwrap_or_default().to_string();
        self.glossary_open = true;
    }

    pub fn close_glossary(&mut self) {
        self.glossary_open = false;
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.recommendation.as_ref()?.plan.as_ref()
    }

    pub fn regime(&self) -> Option<&Regime> {
        self.recommendation.as_ref()?.regime.as_ref()
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.recommendation.as_ref()?.selected.as_ref()
    }

    pub fn candidates(&self) -> &[Candidate] {
        self.recommendation
            .as_ref()
            .map(|r| r.candidates.as_slice())
            .unwrap_or_default()
    }

    pub fn notes(&self) -> &[String] {
        self.recommendation
            .as_ref()
            .map(|r| r.notes.as_slice())
            .unwrap_or_default()
    }

    pub fn has_plan(&self) -> bool {
        self.plan().is_some_and(Plan::has_entry)
    }

    /// Plan timeframe label when there is one, else the chart timeframe.
    pub fn selected_tf(&self) -> String {
        self.plan()
            .and_then(|p| p.tf.clone())
            .unwrap_or_else(|| self.chart_tf.label())
    }

    pub fn plan_tf(&self) -> Option<TimeFrame> {
        self.plan().and_then(Plan::timeframe)
    }

    pub fn is_active_candidate(&self, candidate: &Candidate) -> bool {
        self.plan()
            .and_then(|p| p.tf.as_deref())
            .is_some_and(|tf| tf == candidate.tf)
    }

    pub fn price_change(&self) -> Option<PriceChange> {
        price_change(&self.candles)
    }

    pub fn latest_ts(&self, tf: TimeFrame) -> Option<Timestamp> {
        self.latest.as_ref()?.ts(tf)
    }

    /// Scenario the chart should draw; hidden until a plan has an entry.
    pub fn visible_scenario(&self) -> Option<&Scenario> {
        if self.has_plan() {
            self.scenario.as_ref()
        } else {
            None
        }
    }

    pub fn can_notify(&self) -> bool {
        !self.busy && self.has_plan()
    }

    pub fn server_now_ms(&self, local_now_ms: i64) -> i64 {
        local_now_ms + self.clock_offset_ms
    }

    pub fn countdown(&self, local_now_ms: i64) -> Countdown {
        Countdown::compute(
            self.latest_ts(TimeFrame::ONE_MINUTE),
            self.server_now_ms(local_now_ms),
        )
    }
}

pub fn clamp_risk_pct(pct: f64) -> Option<f64> {
    pct.is_finite().then(|| pct.clamp(RISK_MIN_PCT, RISK_MAX_PCT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use live_sync::UpdateBadge;
    use reco_client::{LatestBar, Levels};
    use std::collections::BTreeMap;
    use ts_core::LinePoint;

    fn scenario() -> Scenario {
        Scenario {
            tf_sec: 1_800,
            path: vec![LinePoint::new(0, 100.0), LinePoint::new(1_800, 98.0)],
            levels: Levels {
                entry: Some(98.0),
                stop: Some(95.0),
                tp1: Some(103.0),
                tp2: None,
            },
        }
    }

    fn reco(tf: &str) -> RecommendResponse {
        RecommendResponse {
            ok: true,
            plan: Some(Plan {
                tf: Some(tf.to_string()),
                entry_price: Some(98.0),
                scenario: Some(scenario()),
                ..Plan::default()
            }),
            ..RecommendResponse::default()
        }
    }

    fn snapshot(ts_1m: Timestamp) -> LatestSnapshot {
        let mut latest = BTreeMap::new();
        latest.insert(
            "1m".to_string(),
            Some(LatestBar {
                ts: ts_1m,
                close: Some(100.0),
            }),
        );
        latest.insert("30m".to_string(), None);
        LatestSnapshot { ok: true, latest }
    }

    #[test]
    fn defaults() {
        let st = DashboardState::default();
        assert_eq!(st.side, Side::Long);
        assert_eq!(st.risk_pct, 0.5);
        assert_eq!(st.chart_tf, TimeFrame::THIRTY_MINUTES);
        assert_eq!(st.font_px, 16);
        assert!(!st.has_plan());
        assert_eq!(st.selected_tf(), "30m");
        assert!(st.visible_scenario().is_none());
    }

    #[test]
    fn successful_recommendation_sets_scenario_and_timeframe() {
        let mut st = DashboardState::default();
        st.begin_request();
        assert!(st.busy);
        st.apply_recommendation(Ok(reco("60m")));
        st.finish_request();
        assert!(!st.busy);
        assert!(st.error.is_none());
        assert_eq!(st.chart_tf, TimeFrame::Minutes(60));
        assert_eq!(st.selected_tf(), "60m");
        assert!(st.has_plan());
        assert!(st.can_notify());
        assert_eq!(st.visible_scenario(), Some(&scenario()));
    }

    #[test]
    fn rejected_recommendation_clears_scenario() {
        let mut st = DashboardState::default();
        st.apply_recommendation(Ok(reco("60m")));
        st.apply_recommendation(Ok(RecommendResponse {
            ok: false,
            error: Some("insufficient data".into()),
            ..RecommendResponse::default()
        }));
        assert!(st.scenario.is_none());
        assert_eq!(st.error.as_deref(), Some("insufficient data"));
        assert!(st.recommendation.is_some());
        assert!(!st.has_plan());

        st.apply_recommendation(Ok(RecommendResponse::default()));
        assert_eq!(st.error.as_deref(), Some(UNKNOWN_ERROR));
    }

    #[test]
    fn transport_failure_keeps_previous_result() {
        let mut st = DashboardState::default();
        st.apply_recommendation(Ok(reco("180m")));
        st.apply_recommendation(Err(RecoError::Status(502)));
        assert_eq!(st.error.as_deref(), Some("HTTP 502"));
        assert!(st.has_plan());
    }

    #[test]
    fn begin_request_clears_messages() {
        let mut st = DashboardState::default();
        st.error = Some("old".into());
        st.notify_msg = Some("old".into());
        st.begin_request();
        assert!(st.error.is_none());
        assert!(st.notify_msg.is_none());
        assert!(!st.can_notify());
    }

    #[test]
    fn notify_results() {
        let mut st = DashboardState::default();
        st.apply_recommendation(Ok(reco("30m")));

        st.apply_notify(Ok(NotifyResponse {
            ok: false,
            detail: Some("http_500".into()),
            recommend: None,
        }));
        assert_eq!(st.notify_msg.as_deref(), Some("Discord request failed (http_500)"));

        st.apply_notify(Ok(NotifyResponse {
            ok: true,
            detail: None,
            recommend: Some(reco("60m")),
        }));
        assert_eq!(st.notify_msg.as_deref(), Some(NOTIFY_SENT));
        assert_eq!(st.plan().and_then(|p| p.tf.as_deref()), Some("60m"));

        st.apply_notify(Ok(NotifyResponse {
            ok: true,
            detail: None,
            recommend: Some(RecommendResponse::default()),
        }));
        assert_eq!(st.plan().and_then(|p| p.tf.as_deref()), Some("60m"));

        st.apply_notify(Err(RecoError::Status(504)));
        assert_eq!(st.notify_msg.as_deref(), Some("HTTP 504"));
    }

    #[test]
    fn feed_candles_only_for_current_timeframe() {
        let mut st = DashboardState::default();
        let bars = vec![Candle::new(0, 1.0, 1.0, 1.0, 10.0), Candle::new(1_800, 1.0, 1.0, 1.0, 11.0)];
        st.apply_feed(FeedEvent::Candles {
            timeframe: TimeFrame::Minutes(60),
            candles: bars.clone(),
        });
        assert!(st.candles.is_empty());
        st.apply_feed(FeedEvent::Candles {
            timeframe: TimeFrame::THIRTY_MINUTES,
            candles: bars,
        });
        assert_eq!(st.candles.len(), 2);
        let pc = st.price_change().unwrap();
        assert_eq!(pc.last, 11.0);
        assert!((pc.delta_pct.unwrap() - 10.0).abs() < 1e-9);

        st.apply_feed(FeedEvent::ClockOffset(-2_500));
        assert_eq!(st.server_now_ms(10_000), 7_500);
    }

    #[test]
    fn countdown_uses_latest_1m_bar_and_offset() {
        let mut st = DashboardState::default();
        st.apply_feed(FeedEvent::Latest(snapshot(1_000)));
        st.apply_feed(FeedEvent::ClockOffset(1_000));
        assert_eq!(st.latest_ts(TimeFrame::ONE_MINUTE), Some(1_000));
        assert_eq!(st.latest_ts(TimeFrame::THIRTY_MINUTES), None);

        // server now = 1_060_000 + 1_000 -> bar just closed, next at 1_120s
        let cd = st.countdown(1_060_000);
        assert_eq!(cd.next_update_ms, 1_120_000);
        assert_eq!(cd.remaining_secs, 59);
        assert_eq!(cd.age_secs, Some(1));
        assert_eq!(cd.badge, UpdateBadge::Live);
    }

    #[test]
    fn risk_input_is_clamped() {
        let mut st = DashboardState::default();
        st.set_risk_pct(5.0);
        assert_eq!(st.risk_pct, RISK_MAX_PCT);
        st.set_risk_pct(0.0);
        assert_eq!(st.risk_pct, RISK_MIN_PCT);
        st.set_risk_pct(f64::NAN);
        assert_eq!(st.risk_pct, RISK_MIN_PCT);
        assert_eq!(st.risk_param(), Some(RISK_MIN_PCT));
    }

    #[test]
    fn font_controls_stay_in_range() {
        let mut st = DashboardState::default();
        for _ in 0..10 {
            st.font_increase();
        }
        assert_eq!(st.font_px, 20);
        for _ in 0..10 {
            st.font_decrease();
        }
        assert_eq!(st.font_px, 14);
        st.font_reset();
        assert_eq!(st.font_px, 16);
        st.set_font_px(99);
        assert_eq!(st.font_px, 20);
    }

    #[test]
    fn glossary_open_with_term() {
        let mut st = DashboardState::default();
        st.open_glossary(Some("ATR%"));
        assert!(st.glossary_open);
        assert_eq!(st.glossary_query, "ATR%");
        st.close_glossary();
        st.open_glossary(None);
        assert_eq!(st.glossary_query, "");
    }

    #[test]
    fn active_candidate_matches_plan_tf() {
        let mut st = DashboardState::default();
        st.apply_recommendation(Ok(reco("60m")));
        let c60 = Candidate {
            tf: "60m".into(),
            ..Candidate::default()
        };
        let c30 = Candidate {
            tf: "30m".into(),
            ..Candidate::default()
        };
        assert!(st.is_active_candidate(&c60));
        assert!(!st.is_active_candidate(&c30));
    }
}
