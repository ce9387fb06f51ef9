use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Wall clock plus sleep. Loops are written against this so tests can run
/// them on virtual time.
#[async_trait(?Send)]
pub trait Timer {
    /// Local time in unix milliseconds.
    fn now_ms(&self) -> i64;

    async fn sleep_ms(&self, ms: i64);
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Timer for BrowserTimer {
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }

    async fn sleep_ms(&self, ms: i64) {
        let ms = ms.clamp(0, u32::MAX as i64) as u32;
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}

/// Virtual clock: sleeping advances time instantly and is recorded.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now: Rc<Cell<i64>>,
    sleeps: Rc<RefCell<Vec<i64>>>,
}

impl ManualTimer {
    pub fn new(start_ms: i64) -> Self {
        let t = Self::default();
        t.now.set(start_ms);
        t
    }

    pub fn set(&self, now_ms: i64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }

    /// Durations passed to `sleep_ms`, in call order.
    pub fn sleeps(&self) -> Vec<i64> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Timer for ManualTimer {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }

    async fn sleep_ms(&self, ms: i64) {
        self.sleeps.borrow_mut().push(ms);
        self.advance(ms.max(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn manual_timer_advances_on_sleep() {
        let t = ManualTimer::new(1_000);
        t.sleep_ms(250).await;
        t.sleep_ms(-5).await;
        assert_eq!(t.now_ms(), 1_250);
        assert_eq!(t.sleeps(), vec![250, -5]);
    }
}
