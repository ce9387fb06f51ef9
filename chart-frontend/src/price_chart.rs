use reco_client::Scenario;
use ta_engine::MaOverlay;
use ts_core::Candle;

use crate::model::{
    ChartTheme, ChartWidget, LineOptions, LineStyle, PriceLineId, PriceLineOptions, SeriesId,
};

/// Binds dashboard data to a [`ChartWidget`].
///
/// Owns three line series (dashed guide path, SMA5, SMA200) and the price
/// lines of the current scenario. Price lines are never diffed: every
/// scenario change removes all of them and draws the new set.
pub struct PriceChart<W: ChartWidget> {
    widget: W,
    theme: ChartTheme,
    path: SeriesId,
    sma_short: SeriesId,
    sma_long: SeriesId,
    price_lines: Vec<PriceLineId>,
}

impl<W: ChartWidget> PriceChart<W> {
    pub fn new(widget: W) -> Self {
        Self::with_theme(widget, ChartTheme::default())
    }

    pub fn with_theme(mut widget: W, theme: ChartTheme) -> Self {
        let sma_short = widget.add_line_series(LineOptions::new(&theme.sma_short, 1.0, LineStyle::Solid));
        let sma_long = widget.add_line_series(LineOptions::new(&theme.sma_long, 1.5, LineStyle::Solid));
        let path = widget.add_line_series(LineOptions::new(&theme.guide_path, 2.0, LineStyle::Dashed));
        Self {
            widget,
            theme,
            path,
            sma_short,
            sma_long,
            price_lines: Vec::new(),
        }
    }

    /// Bind a new candle snapshot, recompute the moving averages and fit.
    pub fn set_candles(&mut self, candles: &[Candle]) {
        self.widget.set_candles(candles);
        let overlay = MaOverlay::from_candles(candles);
        self.widget.set_line_data(self.sma_short, &overlay.short);
        self.widget.set_line_data(self.sma_long, &overlay.long);
        self.widget.fit_content();
    }

    /// Replace the drawn scenario. `None` empties the guide path and leaves
    /// no price lines behind.
    pub fn set_scenario(&mut self, scenario: Option<&Scenario>) {
        self.clear_price_lines();
        let Some(scenario) = scenario else {
            self.widget.set_line_data(self.path, &[]);
            return;
        };
        self.widget.set_line_data(self.path, &scenario.path);

        let levels = &scenario.levels;
        let wanted = [
            ("Entry", levels.entry, &self.theme.entry),
            ("Stop", levels.stop, &self.theme.stop),
            ("TP1", levels.tp1, &self.theme.take_profit),
            ("TP2", levels.tp2, &self.theme.take_profit),
        ];
        for (title, price, color) in wanted {
            let Some(price) = price.filter(|p| p.is_finite()) else {
                continue;
            };
            let id = self.widget.create_price_line(PriceLineOptions {
                price,
                title: title.to_string(),
                color: color.clone(),
                width: 1.0,
                style: LineStyle::Dashed,
                axis_label_visible: true,
            });
            self.price_lines.push(id);
        }
    }

    fn clear_price_lines(&mut self) {
        for id in self.price_lines.drain(..) {
            if !self.widget.remove_price_line(id) {
                log::debug!("price line {id} already removed");
            }
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn path_series(&self) -> SeriesId {
        self.path
    }

    pub fn sma_series(&self) -> (SeriesId, SeriesId) {
        (self.sma_short, self.sma_long)
    }
}
