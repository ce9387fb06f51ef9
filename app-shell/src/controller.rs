//! User intents: each one calls the backend and folds the result into
//! [`DashboardState`].

use std::cell::RefCell;
use std::rc::Rc;

use live_sync::{FeedEvent, FeedSink};
use log::{debug, info, warn};
use reco_client::{LatestSnapshot, RecoApi, Side};
use ts_core::TimeFrame;

use crate::state::DashboardState;

/// Shared, interior-mutable home of the dashboard state.
///
/// The browser keeps it in a reactive signal; tests use `Rc<RefCell<_>>`.
pub trait StateCell {
    fn update(&self, f: impl FnOnce(&mut DashboardState));

    fn with<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R;
}

impl StateCell for Rc<RefCell<DashboardState>> {
    fn update(&self, f: impl FnOnce(&mut DashboardState)) {
        f(&mut self.borrow_mut());
    }

    fn with<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&self.borrow())
    }
}

/// Routes feed events from the background loops into the state.
#[derive(Clone)]
pub struct StateFeed<S>(pub S);

impl<S: StateCell> FeedSink for StateFeed<S> {
    fn on_event(&mut self, event: FeedEvent) {
        self.0.update(|st| st.apply_feed(event));
    }
}

/// Overlapping calls are not sequenced; whichever response lands last wins.
#[derive(Clone)]
pub struct Controller<A, S> {
    api: A,
    state: S,
}

impl<A: RecoApi, S: StateCell> Controller<A, S> {
    pub fn new(api: A, state: S) -> Self {
        Self { api, state }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Fetch `/api/latest` into the state. Failures are not surfaced.
    pub async fn refresh_latest(&self) -> Option<LatestSnapshot> {
        match self.api.latest().await {
            Ok(snapshot) => {
                self.state.update(|st| st.apply_latest(snapshot.clone()));
                Some(snapshot)
            }
            Err(e) => {
                debug!("latest refresh failed: {e}");
                None
            }
        }
    }

    pub async fn choose_side(&self, side: Side) {
        self.state.update(|st| st.set_side(side));
        self.run_recommendation(side, None).await;
    }

    pub async fn compute_recommendation(&self) {
        let side = self.state.with(|st| st.side);
        self.run_recommendation(side, None).await;
    }

    /// Re-run the recommendation pinned to a candidate row's timeframe.
    pub async fn pick_timeframe(&self, label: &str) {
        if label.trim().is_empty() {
            return;
        }
        let tf = match label.parse::<TimeFrame>() {
            Ok(tf) => tf,
            Err(e) => {
                warn!("{e}");
                self.state.update(|st| st.error = Some(e.to_string()));
                return;
            }
        };
        let side = self.state.with(|st| st.side);
        self.run_recommendation(side, Some(tf)).await;
    }

    async fn run_recommendation(&self, side: Side, tf: Option<TimeFrame>) {
        let risk = self.state.with(DashboardState::risk_param);
        self.state.update(DashboardState::begin_request);
        info!(
            "recommend side={side} risk={risk:?} tf={}",
            tf.map(|t| t.label()).unwrap_or_default()
        );
        let result = self.api.recommend(side, risk, tf).await;
        self.state.update(|st| {
            st.apply_recommendation(result);
            st.finish_request();
        });
        self.refresh_latest().await;
    }

    /// Ask the backend to post the current plan. No-op without a plan.
    pub async fn send_notification(&self) {
        let Some((side, risk, tf)) = self.state.with(|st| {
            st.can_notify()
                .then(|| (st.side, st.risk_param(), st.plan_tf()))
        }) else {
            return;
        };
        self.state.update(DashboardState::begin_notify);
        let result = self.api.notify_recommend(side, risk, tf).await;
        self.state.update(|st| st.apply_notify(result));
    }
}
