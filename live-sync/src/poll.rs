use std::cell::RefCell;

use log::{debug, info};
use reco_client::{RecoApi, DEFAULT_CANDLE_LIMIT};
use ts_core::{TimeFrame, Timestamp};

use crate::{
    clock::ClockSync, countdown::resolve_next_update_ms, timer::Timer, CancelFlag, FeedEvent,
    FeedSink,
};

pub const MIN_POLL_DELAY_MS: i64 = 2_000;
/// Slack after the expected bar close so the backend has stored the bar.
pub const POLL_GRACE_MS: i64 = 700;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub min_delay_ms: i64,
    pub grace_ms: i64,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            min_delay_ms: MIN_POLL_DELAY_MS,
            grace_ms: POLL_GRACE_MS,
        }
    }
}

impl PollSchedule {
    pub fn next_delay_ms(&self, latest_1m_ts: Option<Timestamp>, server_now_ms: i64) -> i64 {
        let next = resolve_next_update_ms(latest_1m_ts, server_now_ms);
        next.saturating_sub(server_now_ms)
            .saturating_add(self.grace_ms)
            .max(self.min_delay_ms)
    }
}

/// Delay before the next refresh with the default schedule.
pub fn next_poll_delay_ms(latest_1m_ts: Option<Timestamp>, server_now_ms: i64) -> i64 {
    PollSchedule::default().next_delay_ms(latest_1m_ts, server_now_ms)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollOptions {
    pub timeframe: TimeFrame,
    pub candle_limit: usize,
    pub schedule: PollSchedule,
}

impl PollOptions {
    pub fn new(timeframe: TimeFrame) -> Self {
        Self {
            timeframe,
            candle_limit: DEFAULT_CANDLE_LIMIT,
            schedule: PollSchedule::default(),
        }
    }

    pub fn with_candle_limit(mut self, limit: usize) -> Self {
        self.candle_limit = limit;
        self
    }

    pub fn with_schedule(mut self, schedule: PollSchedule) -> Self {
        self.schedule = schedule;
        self
    }
}

/// Owns the stop flag of the running refresh loop. Restarting hands out a
/// fresh flag and raises the old one, so responses still in flight for the
/// previous timeframe are dropped.
#[derive(Debug, Default)]
pub struct PollHandle {
    running: RefCell<Option<CancelFlag>>,
}

impl PollHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restart(&self) -> CancelFlag {
        let fresh = CancelFlag::new();
        if let Some(old) = self.running.replace(Some(fresh.clone())) {
            old.cancel();
        }
        fresh
    }

    pub fn stop(&self) {
        if let Some(old) = self.running.take() {
            old.cancel();
        }
    }
}

/// Refresh the latest snapshot and the candle series for one timeframe,
/// then sleep until just after the next expected 1m bar. Runs until
/// `cancel` is raised; failures are logged and the cycle carries on.
pub async fn run_poll_loop<A, T, S>(
    api: &A,
    clock: &ClockSync,
    timer: &T,
    opts: &PollOptions,
    sink: &mut S,
    cancel: &CancelFlag,
) where
    A: RecoApi,
    T: Timer,
    S: FeedSink,
{
    let tf = opts.timeframe;
    info!("poll loop started for {tf}");
    while !cancel.is_cancelled() {
        let latest = api.latest().await;
        if cancel.is_cancelled() {
            break;
        }
        let latest_1m_ts = match latest {
            Ok(snapshot) => {
                let ts = snapshot.ts(TimeFrame::ONE_MINUTE);
                sink.on_event(FeedEvent::Latest(snapshot));
                ts
            }
            Err(e) => {
                debug!("latest refresh failed: {e}");
                None
            }
        };

        let candles = api.candles(tf, opts.candle_limit).await;
        if cancel.is_cancelled() {
            break;
        }
        match candles {
            Ok(resp) => sink.on_event(FeedEvent::Candles {
                timeframe: tf,
                candles: resp.candles,
            }),
            Err(e) => debug!("candle refresh for {tf} failed: {e}"),
        }

        let now = clock.server_now_ms(timer.now_ms());
        let delay = opts.schedule.next_delay_ms(latest_1m_ts, now);
        debug!("next {tf} refresh in {delay} ms");
        timer.sleep_ms(delay).await;
    }
    info!("poll loop stopped for {tf}");
}
