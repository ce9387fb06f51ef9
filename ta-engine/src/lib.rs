use std::collections::VecDeque;
use ts_core::{Candle, LinePoint};

/// Window of the short moving average drawn on the price chart.
pub const SHORT_WINDOW: usize = 5;
/// Window of the long moving average drawn on the price chart.
pub const LONG_WINDOW: usize = 200;

/// Trailing simple moving average over a fixed window.
///
/// Keeps a running sum so each step is O(1); yields nothing until the window
/// is full.
#[derive(Debug, Clone)]
pub struct SmaEngine {
    period: usize,
    window: VecDeque<f64>,
    sum: f64,
}

impl SmaEngine {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
            window: VecDeque::with_capacity(period.max(1) + 1),
            sum: 0.0,
        }
    }

    pub fn next(&mut self, value: f64) -> Option<f64> {
        self.window.push_back(value);
        self.sum += value;
        if self.window.len() > self.period {
            if let Some(old) = self.window.pop_front() {
                self.sum -= old;
            }
        }
        if self.window.len() == self.period {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }
}

/// Moving average aligned index-for-index with `values`.
pub fn sma_series(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut engine = SmaEngine::new(window);
    values.iter().map(|v| engine.next(*v)).collect()
}

/// Moving average of the closes as a drawable line; bars before the window
/// fills are skipped.
pub fn sma_line(candles: &[Candle], window: usize) -> Vec<LinePoint> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    sma_series(&closes, window)
        .into_iter()
        .zip(candles)
        .filter_map(|(avg, c)| avg.map(|v| LinePoint::new(c.ts, v)))
        .collect()
}

/// The pair of averages the dashboard always overlays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaOverlay {
    pub short: Vec<LinePoint>,
    pub long: Vec<LinePoint>,
}

impl MaOverlay {
    pub fn from_candles(candles: &[Candle]) -> Self {
        Self {
            short: sma_line(candles, SHORT_WINDOW),
            long: sma_line(candles, LONG_WINDOW),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_candle(ts: i64, close: f64) -> Candle {
        Candle::new(ts, close, close + 1.0, close - 1.0, close)
    }

    #[test]
    fn constant_series_is_none_until_window_fills() {
        let v = 42.5;
        for w in [1usize, 3, 5, 200] {
            let series = sma_series(&vec![v; 250], w);
            for (i, out) in series.iter().enumerate() {
                if i < w - 1 {
                    assert_eq!(*out, None, "window {w} index {i}");
                } else {
                    assert!((out.unwrap() - v).abs() < 1e-9, "window {w} index {i}");
                }
            }
        }
    }

    #[test]
    fn sliding_window_drops_oldest_value() {
        let series = sma_series(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(series, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn short_input_never_yields() {
        assert!(sma_series(&[1.0, 2.0], 5).iter().all(Option::is_none));
        assert!(sma_series(&[], 5).is_empty());
    }

    #[test]
    fn line_is_stamped_with_bar_time() {
        let candles: Vec<Candle> = (0..6).map(|i| mk_candle(i * 60, 10.0 + i as f64)).collect();
        let line = sma_line(&candles, SHORT_WINDOW);
        assert_eq!(line.len(), 2);
        assert_eq!(line[0].ts, 240);
        assert!((line[0].value - 12.0).abs() < 1e-9);
        assert_eq!(line[1].ts, 300);
    }

    #[test]
    fn overlay_long_line_needs_two_hundred_bars() {
        let candles: Vec<Candle> = (0..199).map(|i| mk_candle(i * 60, 1.0)).collect();
        let overlay = MaOverlay::from_candles(&candles);
        assert_eq!(overlay.short.len(), 195);
        assert!(overlay.long.is_empty());
        assert_eq!(overlay.short.last().map(|p| p.ts), Some(198 * 60));
    }
}
