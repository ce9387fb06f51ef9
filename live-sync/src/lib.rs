//! Keeps the dashboard in step with the backend: server clock offset,
//! countdown to the next 1m bar, and the self-scheduling refresh loop.

pub mod clock;
pub mod countdown;
pub mod poll;
pub mod timer;

use std::cell::Cell;
use std::rc::Rc;

use reco_client::LatestSnapshot;
use ts_core::{Candle, TimeFrame};

pub use clock::{run_clock_sync, sync_once, ClockSync, CLOCK_SYNC_INTERVAL_MS};
pub use countdown::{fmt_countdown, Countdown, UpdateBadge};
pub use poll::{next_poll_delay_ms, run_poll_loop, PollHandle, PollOptions, PollSchedule};
pub use timer::{ManualTimer, Timer};

#[cfg(target_arch = "wasm32")]
pub use timer::BrowserTimer;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Fresh `/api/latest` snapshot.
    Latest(LatestSnapshot),
    /// Full candle snapshot for the polled timeframe.
    Candles {
        timeframe: TimeFrame,
        candles: Vec<Candle>,
    },
    /// Server clock offset changed (ms, server minus local).
    ClockOffset(i64),
}

/// Consumer interface for feed events.
pub trait FeedSink {
    fn on_event(&mut self, event: FeedEvent);
}

impl<F: FnMut(FeedEvent)> FeedSink for F {
    fn on_event(&mut self, event: FeedEvent) {
        self(event)
    }
}

/// Shared stop signal for a background loop. Checked after every await so a
/// response that lands after teardown is dropped.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Rc<Cell<bool>>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_shared_between_clones() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        assert!(!other.is_cancelled());
        flag.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        let mut sink = |ev: FeedEvent| seen.push(ev);
        sink.on_event(FeedEvent::ClockOffset(5));
        assert_eq!(seen, vec![FeedEvent::ClockOffset(5)]);
    }
}
