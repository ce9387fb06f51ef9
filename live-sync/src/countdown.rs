use ts_core::{secs_to_ms, Timestamp, MINUTE_MS, MINUTE_SECS, MS};

/// When the next 1m bar should land.
///
/// Bars are stamped with their open time and delivered on close, so after a
/// bar opening at `T` the next delivery is the close of the following bar,
/// `T + 120 s`.
pub fn next_update_at_ms(latest_1m_ts: Option<Timestamp>) -> Option<i64> {
    latest_1m_ts
        .filter(|ts| *ts > 0)
        .map(|ts| secs_to_ms(ts.saturating_add(2 * MINUTE_SECS)))
}

pub fn next_minute_boundary_ms(now_ms: i64) -> i64 {
    (now_ms.div_euclid(MINUTE_MS) * MINUTE_MS).saturating_add(MINUTE_MS)
}

/// Expected update time, falling back to the next minute boundary.
pub fn resolve_next_update_ms(latest_1m_ts: Option<Timestamp>, now_ms: i64) -> i64 {
    next_update_at_ms(latest_1m_ts).unwrap_or_else(|| next_minute_boundary_ms(now_ms))
}

/// Whole seconds until `next_ms`, rounded up, never negative.
pub fn countdown_secs(next_ms: i64, now_ms: i64) -> i64 {
    let remaining = next_ms.saturating_sub(now_ms);
    if remaining <= 0 {
        0
    } else {
        remaining / MS + i64::from(remaining % MS != 0)
    }
}

/// Seconds since the newest 1m bar closed.
pub fn last_update_age_secs(latest_1m_ts: Option<Timestamp>, now_ms: i64) -> Option<i64> {
    let ts = latest_1m_ts.filter(|ts| *ts > 0)?;
    let closed_ms = secs_to_ms(ts.saturating_add(MINUTE_SECS));
    let age = (now_ms.saturating_sub(closed_ms) as f64 / MS as f64 + 0.5).floor() as i64;
    Some(age.max(0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateBadge {
    NoData,
    Live,
    Delay,
    Stale,
}

impl UpdateBadge {
    pub fn from_age(age_secs: Option<i64>) -> Self {
        match age_secs {
            None => UpdateBadge::NoData,
            Some(age) if age <= 15 => UpdateBadge::Live,
            Some(age) if age <= 90 => UpdateBadge::Delay,
            Some(_) => UpdateBadge::Stale,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UpdateBadge::NoData => "NO DATA",
            UpdateBadge::Live => "LIVE",
            UpdateBadge::Delay => "DELAY",
            UpdateBadge::Stale => "STALE",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            UpdateBadge::NoData => "badge",
            UpdateBadge::Live => "badge badgeLive",
            UpdateBadge::Delay => "badge badgeWarn",
            UpdateBadge::Stale => "badge badgeDanger",
        }
    }
}

/// `m:ss`.
pub fn fmt_countdown(secs: i64) -> String {
    let s = secs.max(0);
    format!("{}:{:02}", s / 60, s % 60)
}

/// Everything the status row shows, for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub next_update_ms: i64,
    pub remaining_secs: i64,
    pub age_secs: Option<i64>,
    pub badge: UpdateBadge,
}

impl Countdown {
    /// `server_now_ms` is local time already corrected by the clock offset.
    pub fn compute(latest_1m_ts: Option<Timestamp>, server_now_ms: i64) -> Self {
        let next_update_ms = resolve_next_update_ms(latest_1m_ts, server_now_ms);
        let age_secs = last_update_age_secs(latest_1m_ts, server_now_ms);
        Self {
            next_update_ms,
            remaining_secs: countdown_secs(next_update_ms, server_now_ms),
            age_secs,
            badge: UpdateBadge::from_age(age_secs),
        }
    }

    pub fn label(&self) -> String {
        fmt_countdown(self.remaining_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClockSync;

    const T: i64 = 1_700_000_040; // 1m bar open, minute aligned

    #[test]
    fn next_update_is_two_minutes_after_bar_open() {
        assert_eq!(next_update_at_ms(Some(T)), Some((T + 120) * 1000));
        assert_eq!(next_update_at_ms(Some(0)), None);
        assert_eq!(next_update_at_ms(Some(-5)), None);
        assert_eq!(next_update_at_ms(None), None);
    }

    #[test]
    fn fallback_is_next_minute_boundary() {
        assert_eq!(next_minute_boundary_ms(1_700_000_059_500), 1_700_000_100_000);
        assert_eq!(next_minute_boundary_ms(1_700_000_040_000), 1_700_000_100_000);
        assert_eq!(resolve_next_update_ms(None, 30_001), 60_000);
    }

    #[test]
    fn countdown_rounds_up_and_floors_at_zero() {
        assert_eq!(countdown_secs(10_000, 0), 10);
        assert_eq!(countdown_secs(10_000, 1), 10);
        assert_eq!(countdown_secs(10_000, 9_001), 1);
        assert_eq!(countdown_secs(10_000, 10_000), 0);
        assert_eq!(countdown_secs(10_000, 50_000), 0);
    }

    #[test]
    fn countdown_follows_server_adjusted_time_down_to_zero() {
        // Local clock runs 7.25 s behind the server.
        let clock = ClockSync::new();
        let local_start = (T + 65) * 1000 - 7_250;
        clock.apply_server_ts(T + 65, local_start);

        let first = Countdown::compute(Some(T), clock.server_now_ms(local_start));
        assert_eq!(first.next_update_ms, (T + 120) * 1000);
        assert_eq!(first.remaining_secs, 55);

        let mut prev = first.remaining_secs;
        let mut local = local_start;
        loop {
            local += 1_000;
            let c = Countdown::compute(Some(T), clock.server_now_ms(local));
            if prev == 0 {
                assert_eq!(c.remaining_secs, 0);
                break;
            }
            assert!(c.remaining_secs < prev);
            prev = c.remaining_secs;
        }

        // A newer snapshot restarts the countdown.
        let next = Countdown::compute(Some(T + 60), clock.server_now_ms(local));
        assert!(next.remaining_secs > 0);
        assert_eq!(next.next_update_ms, (T + 180) * 1000);
    }

    #[test]
    fn age_rounds_half_up_and_never_negative() {
        let closed = (T + 60) * 1000;
        assert_eq!(last_update_age_secs(Some(T), closed + 1_499), Some(1));
        assert_eq!(last_update_age_secs(Some(T), closed + 1_500), Some(2));
        assert_eq!(last_update_age_secs(Some(T), closed - 5_000), Some(0));
        assert_eq!(last_update_age_secs(None, closed), None);
    }

    #[test]
    fn badge_thresholds() {
        assert_eq!(UpdateBadge::from_age(None).label(), "NO DATA");
        assert_eq!(UpdateBadge::from_age(Some(15)), UpdateBadge::Live);
        assert_eq!(UpdateBadge::from_age(Some(16)), UpdateBadge::Delay);
        assert_eq!(UpdateBadge::from_age(Some(90)), UpdateBadge::Delay);
        assert_eq!(UpdateBadge::from_age(Some(91)).css_class(), "badge badgeDanger");
    }

    #[test]
    fn out_of_range_bar_timestamp_does_not_overflow() {
        let now = 1_700_000_000_000;
        let c = Countdown::compute(Some(i64::MAX - 10), now);
        assert_eq!(c.next_update_ms, i64::MAX);
        assert_eq!(c.age_secs, Some(0));
        assert_eq!(c.badge, UpdateBadge::Live);
        assert!(c.remaining_secs > 0);

        assert_eq!(countdown_secs(i64::MAX, i64::MIN), i64::MAX / MS + 1);
        assert_eq!(countdown_secs(i64::MIN, i64::MAX), 0);
        assert_eq!(next_minute_boundary_ms(i64::MAX), i64::MAX);
    }

    #[test]
    fn countdown_format() {
        assert_eq!(fmt_countdown(0), "0:00");
        assert_eq!(fmt_countdown(59), "0:59");
        assert_eq!(fmt_countdown(125), "2:05");
        assert_eq!(fmt_countdown(-3), "0:00");
    }
}
