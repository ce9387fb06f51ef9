use ts_core::{Candle, LinePoint};

use crate::viewport::Viewport;

pub type SeriesId = u32;
pub type PriceLineId = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineOptions {
    pub color: String,
    pub width: f32,
    pub style: LineStyle,
}

impl LineOptions {
    pub fn new(color: impl Into<String>, width: f32, style: LineStyle) -> Self {
        Self {
            color: color.into(),
            width,
            style,
        }
    }
}

/// Horizontal level pinned to the price axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLineOptions {
    pub price: f64,
    pub title: String,
    pub color: String,
    pub width: f32,
    pub style: LineStyle,
    pub axis_label_visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub id: SeriesId,
    pub options: LineOptions,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceLine {
    pub id: PriceLineId,
    pub options: PriceLineOptions,
}

/// The operations the dashboard needs from a chart widget.
pub trait ChartWidget {
    /// Replace the candlestick series.
    fn set_candles(&mut self, candles: &[Candle]);

    fn add_line_series(&mut self, options: LineOptions) -> SeriesId;

    /// Replace the data of a line series; unknown ids are ignored.
    fn set_line_data(&mut self, id: SeriesId, points: &[LinePoint]);

    fn create_price_line(&mut self, options: PriceLineOptions) -> PriceLineId;

    /// Returns false when the line was already gone.
    fn remove_price_line(&mut self, id: PriceLineId) -> bool;

    /// Fit the visible range to the loaded content.
    fn fit_content(&mut self);
}

/// Colours used by the adapter and the canvas renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    pub background: String,
    pub grid: String,
    pub text: String,
    pub candle_up: String,
    pub candle_down: String,
    pub guide_path: String,
    pub sma_short: String,
    pub sma_long: String,
    pub entry: String,
    pub stop: String,
    pub take_profit: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: "#0b1220".into(),
            grid: "#24304f".into(),
            text: "#e7e9ee".into(),
            candle_up: "#26a69a".into(),
            candle_down: "#ef5350".into(),
            guide_path: "#8ab4ff".into(),
            sma_short: "#f5c542".into(),
            sma_long: "#b084f5".into(),
            entry: "#4da3ff".into(),
            stop: "#ef5350".into(),
            take_profit: "#26a69a".into(),
        }
    }
}

/// Chart state held in memory. Implements [`ChartWidget`] directly and is
/// what the canvas renderer draws from.
#[derive(Debug, Clone, Default)]
pub struct ChartModel {
    candles: Vec<Candle>,
    lines: Vec<LineSeries>,
    price_lines: Vec<PriceLine>,
    viewport: Option<Viewport>,
    next_id: u32,
}

impl ChartModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn lines(&self) -> &[LineSeries] {
        &self.lines
    }

    pub fn line(&self, id: SeriesId) -> Option<&LineSeries> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn price_lines(&self) -> &[PriceLine] {
        &self.price_lines
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl ChartWidget for ChartModel {
    fn set_candles(&mut self, candles: &[Candle]) {
        self.candles = candles.to_vec();
    }

    fn add_line_series(&mut self, options: LineOptions) -> SeriesId {
        let id = self.alloc_id();
        self.lines.push(LineSeries {
            id,
            options,
            points: Vec::new(),
        });
        id
    }

    fn set_line_data(&mut self, id: SeriesId, points: &[LinePoint]) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            line.points = points.to_vec();
        }
    }

    fn create_price_line(&mut self, options: PriceLineOptions) -> PriceLineId {
        let id = self.alloc_id();
        self.price_lines.push(PriceLine { id, options });
        id
    }

    fn remove_price_line(&mut self, id: PriceLineId) -> bool {
        let before = self.price_lines.len();
        self.price_lines.retain(|l| l.id != id);
        self.price_lines.len() != before
    }

    fn fit_content(&mut self) {
        let levels: Vec<f64> = self.price_lines.iter().map(|l| l.options.price).collect();
        self.viewport = Viewport::fit(&self.candles, &self.lines, &levels);
    }
}
