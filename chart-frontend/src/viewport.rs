use ts_core::{Candle, Timestamp, MINUTE_SECS};

use crate::model::LineSeries;

/// Visible time span (unix seconds) and price range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub start: Timestamp,
    pub end: Timestamp,
    pub price_min: f64,
    pub price_max: f64,
}

const PRICE_PAD: f64 = 0.035;

impl Viewport {
    /// Smallest viewport showing every candle, the line points inside that
    /// time span, and every level. `None` when there is nothing to show.
    pub fn fit(candles: &[Candle], lines: &[LineSeries], levels: &[f64]) -> Option<Self> {
        let (start, end) = match (candles.first(), candles.last()) {
            (Some(first), Some(last)) => {
                let half_bar = bar_spacing(candles) / 2;
                (first.ts - half_bar, last.ts + half_bar)
            }
            _ => {
                let mut ts = lines.iter().flat_map(|l| l.points.iter().map(|p| p.ts));
                let first = ts.next()?;
                ts.fold(Some((first, first)), |acc, t| {
                    acc.map(|(lo, hi)| (lo.min(t), hi.max(t)))
                })?
            }
        };
        let end = if end <= start { start + MINUTE_SECS } else { end };

        let candle_prices = candles.iter().flat_map(|c| [c.low, c.high]);
        let line_prices = lines.iter().flat_map(|l| {
            l.points
                .iter()
                .filter(move |p| p.ts >= start && p.ts <= end)
                .map(|p| p.value)
        });
        let (lo, hi) = candle_prices
            .chain(line_prices)
            .chain(levels.iter().copied())
            .filter(|p| p.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            });
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        let span = hi - lo;
        let pad = if span > 0.0 {
            span * PRICE_PAD
        } else {
            (hi.abs() * 0.01).max(1.0)
        };
        Some(Self {
            start,
            end,
            price_min: lo - pad,
            price_max: hi + pad,
        })
    }
}

fn bar_spacing(candles: &[Candle]) -> i64 {
    candles
        .windows(2)
        .map(|w| w[1].ts - w[0].ts)
        .filter(|d| *d > 0)
        .min()
        .unwrap_or(MINUTE_SECS)
}

/// A candle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotCandle {
    pub x: f64,
    pub half_w: f64,
    pub y_open: f64,
    pub y_close: f64,
    pub y_high: f64,
    pub y_low: f64,
    pub up: bool,
}

/// Maps a viewport onto a pixel area. The right-hand gutter is kept free
/// for price labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub viewport: Viewport,
    pub width: f64,
    pub height: f64,
    pub axis_gutter: f64,
}

impl Projection {
    pub fn new(viewport: Viewport, width: f64, height: f64) -> Self {
        Self {
            viewport,
            width,
            height,
            axis_gutter: 64.0,
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - self.axis_gutter).max(1.0)
    }

    pub fn x(&self, ts: Timestamp) -> f64 {
        let span = (self.viewport.end - self.viewport.start) as f64;
        if span <= 0.0 {
            return 0.0;
        }
        (ts - self.viewport.start) as f64 / span * self.plot_width()
    }

    pub fn y(&self, price: f64) -> f64 {
        let range = (self.viewport.price_max - self.viewport.price_min).max(1e-9);
        let norm = (price - self.viewport.price_min) / range;
        self.height - norm * self.height
    }

    pub fn project_candles(&self, candles: &[Candle]) -> Vec<PlotCandle> {
        let visible = candles
            .iter()
            .filter(|c| c.ts >= self.viewport.start && c.ts <= self.viewport.end)
            .count()
            .max(1);
        let bar_width = (self.plot_width() / visible as f64 * 0.7).clamp(1.0, 14.0);
        candles
            .iter()
            .map(|c| PlotCandle {
                x: self.x(c.ts),
                half_w: bar_width * 0.5,
                y_open: self.y(c.open),
                y_close: self.y(c.close),
                y_high: self.y(c.high),
                y_low: self.y(c.low),
                up: c.is_up(),
            })
            .collect()
    }

    pub fn price_ticks(&self, count: usize) -> Vec<f64> {
        if count < 2 {
            return Vec::new();
        }
        let vp = &self.viewport;
        let step = (vp.price_max - vp.price_min).max(1e-6) / (count as f64 - 1.0);
        (0..count).map(|i| vp.price_min + step * i as f64).collect()
    }

    pub fn time_ticks(&self, count: usize) -> Vec<Timestamp> {
        let span = self.viewport.end - self.viewport.start;
        if count == 0 || span <= 0 {
            return Vec::new();
        }
        let step = span / (count as i64 + 1);
        (1..=count as i64).map(|i| self.viewport.start + step * i).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineOptions, LineStyle};
    use ts_core::LinePoint;

    fn series(points: Vec<LinePoint>) -> LineSeries {
        LineSeries {
            id: 1,
            options: LineOptions::new("#fff", 1.0, LineStyle::Solid),
            points,
        }
    }

    #[test]
    fn fit_includes_levels_outside_candle_range() {
        let candles = [
            Candle::new(1_800, 100.0, 101.0, 99.0, 100.5),
            Candle::new(3_600, 100.5, 102.0, 100.0, 101.5),
        ];
        let vp = Viewport::fit(&candles, &[], &[95.0, 110.0]).unwrap();
        assert_eq!(vp.start, 900);
        assert_eq!(vp.end, 4_500);
        assert!(vp.price_min < 95.0);
        assert!(vp.price_max > 110.0);
    }

    #[test]
    fn line_points_outside_time_span_do_not_stretch_prices() {
        let candles = [Candle::new(60, 10.0, 11.0, 9.0, 10.0)];
        let line = series(vec![LinePoint::new(60, 10.5), LinePoint::new(10_000, 500.0)]);
        let vp = Viewport::fit(&candles, &[line], &[]).unwrap();
        assert!(vp.price_max < 20.0);
    }

    #[test]
    fn fit_without_candles_uses_lines_or_nothing() {
        assert!(Viewport::fit(&[], &[], &[1.0]).is_none());
        let line = series(vec![LinePoint::new(100, 5.0), LinePoint::new(200, 6.0)]);
        let vp = Viewport::fit(&[], &[line], &[]).unwrap();
        assert_eq!((vp.start, vp.end), (100, 200));
    }

    #[test]
    fn flat_series_still_has_a_price_range() {
        let candles = [Candle::new(0, 5.0, 5.0, 5.0, 5.0)];
        let vp = Viewport::fit(&candles, &[], &[]).unwrap();
        assert!(vp.price_max > vp.price_min);
        assert!(vp.end > vp.start);
    }

    #[test]
    fn projection_maps_corners() {
        let vp = Viewport {
            start: 0,
            end: 100,
            price_min: 0.0,
            price_max: 10.0,
        };
        let p = Projection::new(vp, 164.0, 200.0);
        assert_eq!(p.x(0), 0.0);
        assert_eq!(p.x(100), 100.0);
        assert_eq!(p.y(0.0), 200.0);
        assert_eq!(p.y(10.0), 0.0);
        assert_eq!(p.time_ticks(3), vec![25, 50, 75]);
        assert_eq!(p.price_ticks(3), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn projected_candles_keep_direction() {
        let vp = Viewport {
            start: 0,
            end: 120,
            price_min: 0.0,
            price_max: 10.0,
        };
        let plotted = Projection::new(vp, 200.0, 100.0)
            .project_candles(&[Candle::new(60, 2.0, 8.0, 1.0, 6.0)]);
        assert!(plotted[0].up);
        assert!(plotted[0].y_high < plotted[0].y_low);
    }
}
