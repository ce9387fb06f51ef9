use std::cell::Cell;

use log::{debug, info};
use reco_client::{HealthResponse, RecoApi, RecoError};
use ts_core::{secs_to_ms, Timestamp};

use crate::{timer::Timer, CancelFlag, FeedEvent, FeedSink};

pub const CLOCK_SYNC_INTERVAL_MS: i64 = 60_000;

/// Estimated offset between the backend clock and the local clock.
///
/// Starts at zero and only moves when a health probe returns a usable
/// timestamp; a failed probe keeps the previous estimate.
#[derive(Debug, Default)]
pub struct ClockSync {
    offset_ms: Cell<i64>,
}

impl ClockSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset_ms(&self) -> i64 {
        self.offset_ms.get()
    }

    pub fn server_now_ms(&self, local_now_ms: i64) -> i64 {
        local_now_ms.saturating_add(self.offset_ms.get())
    }

    /// Record a server timestamp (unix seconds) observed at `local_now_ms`.
    /// Returns whether the offset changed.
    pub fn apply_server_ts(&self, server_ts: Timestamp, local_now_ms: i64) -> bool {
        let offset = secs_to_ms(server_ts).saturating_sub(local_now_ms);
        self.offset_ms.replace(offset) != offset
    }

    fn apply_probe(&self, probe: Result<HealthResponse, RecoError>, local_now_ms: i64) -> bool {
        match probe {
            Ok(HealthResponse { ts: Some(ts), .. }) if ts > 0 => {
                self.apply_server_ts(ts, local_now_ms)
            }
            Ok(_) => {
                debug!("health response carried no timestamp; keeping offset");
                false
            }
            Err(e) => {
                debug!("clock sync failed: {e}");
                false
            }
        }
    }
}

/// One probe of `/api/health`. Returns whether the offset changed.
pub async fn sync_once<A: RecoApi, T: Timer>(api: &A, clock: &ClockSync, timer: &T) -> bool {
    let probe = api.health().await;
    clock.apply_probe(probe, timer.now_ms())
}

/// Probe immediately, then every `interval_ms`, until `cancel` is raised.
pub async fn run_clock_sync<A, T, S>(
    api: &A,
    clock: &ClockSync,
    timer: &T,
    sink: &mut S,
    cancel: &CancelFlag,
    interval_ms: i64,
) where
    A: RecoApi,
    T: Timer,
    S: FeedSink,
{
    info!("clock sync started");
    while !cancel.is_cancelled() {
        let probe = api.health().await;
        if cancel.is_cancelled() {
            break;
        }
        if clock.apply_probe(probe, timer.now_ms()) {
            sink.on_event(FeedEvent::ClockOffset(clock.offset_ms()));
        }
        timer.sleep_ms(interval_ms).await;
    }
    info!("clock sync stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTimer;
    use reco_client::{
        CandlesResponse, LatestSnapshot, NotifyResponse, RecommendResponse, Side,
    };
    use std::cell::RefCell;
    use ts_core::TimeFrame;

    /// Replays scripted health probes; cancels once the script runs out.
    struct ScriptedHealth {
        replies: RefCell<Vec<Result<HealthResponse, RecoError>>>,
        cancel: CancelFlag,
    }

    impl ScriptedHealth {
        fn new(mut replies: Vec<Result<HealthResponse, RecoError>>, cancel: CancelFlag) -> Self {
            replies.reverse();
            Self {
                replies: RefCell::new(replies),
                cancel,
            }
        }
    }

    #[async_trait::async_trait(?Send)]
    impl RecoApi for ScriptedHealth {
        async fn health(&self) -> Result<HealthResponse, RecoError> {
            let mut replies = self.replies.borrow_mut();
            let next = replies.pop().unwrap_or(Err(RecoError::Status(599)));
            if replies.is_empty() {
                self.cancel.cancel();
            }
            next
        }

        async fn latest(&self) -> Result<LatestSnapshot, RecoError> {
            Err(RecoError::Status(501))
        }

        async fn recommend(
            &self,
            _side: Side,
            _risk_pct: Option<f64>,
            _tf: Option<TimeFrame>,
        ) -> Result<RecommendResponse, RecoError> {
            Err(RecoError::Status(501))
        }

        async fn candles(&self, _tf: TimeFrame, _limit: usize) -> Result<CandlesResponse, RecoError> {
            Err(RecoError::Status(501))
        }

        async fn notify_recommend(
            &self,
            _side: Side,
            _risk_pct: Option<f64>,
            _tf: Option<TimeFrame>,
        ) -> Result<NotifyResponse, RecoError> {
            Err(RecoError::Status(501))
        }
    }

    fn health(ts: Option<i64>) -> Result<HealthResponse, RecoError> {
        Ok(HealthResponse { ok: true, ts })
    }

    #[test]
    fn offset_is_server_minus_local() {
        let clock = ClockSync::new();
        assert_eq!(clock.offset_ms(), 0);
        assert!(clock.apply_server_ts(1_000, 998_500));
        assert_eq!(clock.offset_ms(), 1_500);
        assert_eq!(clock.server_now_ms(2_000_000), 2_001_500);
        assert!(!clock.apply_server_ts(1_001, 999_500));
    }

    #[test]
    fn absurd_server_timestamp_saturates() {
        let clock = ClockSync::new();
        clock.apply_server_ts(i64::MAX, -5_000);
        assert_eq!(clock.offset_ms(), i64::MAX);
        assert_eq!(clock.server_now_ms(1_700_000_000_000), i64::MAX);
    }

    #[tokio::test]
    async fn failed_probe_keeps_previous_offset() {
        let cancel = CancelFlag::new();
        let api = ScriptedHealth::new(
            vec![
                health(Some(100)),
                Err(RecoError::Status(500)),
                health(None),
                health(Some(0)),
            ],
            cancel,
        );
        let timer = ManualTimer::new(90_000);
        let clock = ClockSync::new();

        assert!(sync_once(&api, &clock, &timer).await);
        assert_eq!(clock.offset_ms(), 10_000);
        for _ in 0..3 {
            assert!(!sync_once(&api, &clock, &timer).await);
            assert_eq!(clock.offset_ms(), 10_000);
        }
    }

    #[tokio::test]
    async fn loop_probes_every_interval_and_reports_changes() {
        let cancel = CancelFlag::new();
        let api = ScriptedHealth::new(
            vec![health(Some(100)), health(Some(170)), health(Some(500))],
            cancel.clone(),
        );
        let timer = ManualTimer::new(100_000);
        let clock = ClockSync::new();
        let mut events = Vec::new();
        let mut sink = |ev: FeedEvent| events.push(ev);

        run_clock_sync(&api, &clock, &timer, &mut sink, &cancel, CLOCK_SYNC_INTERVAL_MS).await;

        // First probe matches the local clock, so nothing is reported; the
        // third reply raises the cancel flag and is never applied.
        assert_eq!(timer.sleeps(), vec![60_000, 60_000]);
        assert_eq!(events, vec![FeedEvent::ClockOffset(10_000)]);
        assert_eq!(clock.offset_ms(), 10_000);
    }
}
