//! Price chart: a widget seam, an in-memory model of what is on screen, the
//! adapter that maps candles and recommendation scenarios onto it, and a
//! 2D-canvas renderer for the browser.

mod model;
mod price_chart;
mod viewport;

#[cfg(target_arch = "wasm32")]
mod canvas;

pub use model::{
    ChartModel, ChartTheme, ChartWidget, LineOptions, LineSeries, LineStyle, PriceLine,
    PriceLineId, PriceLineOptions, SeriesId,
};
pub use price_chart::PriceChart;
pub use viewport::{PlotCandle, Projection, Viewport};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasChart;
