use js_sys::{Array, Date};
use ts_core::{Candle, LinePoint, Timestamp};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::model::{
    ChartModel, ChartTheme, ChartWidget, LineOptions, LineStyle, PriceLineId, PriceLineOptions,
    SeriesId,
};
use crate::viewport::{PlotCandle, Projection};

const FONT: &str = "12px 'Inter', sans-serif";

trait RendererBackend {
    fn begin_frame(&mut self, width: f64, height: f64, clear_color: &str);
    fn draw_candles(&mut self, candles: &[PlotCandle], color_up: &str, color_down: &str);
    fn draw_polyline(&mut self, points: &[(f64, f64)], color: &str, width: f32, style: LineStyle);
    fn draw_segments(&mut self, segments: &[(f64, f64, f64, f64)], color: &str, width: f32);
    fn draw_label(&mut self, text: &str, x: f64, y: f64, color: &str, background: Option<&str>);
}

struct CanvasBackend {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasBackend {
    fn set_dash(&self, style: LineStyle) {
        let pattern = match style {
            LineStyle::Solid => Array::new(),
            LineStyle::Dashed => Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0)),
        };
        let _ = self.ctx.set_line_dash(&pattern);
    }
}

impl RendererBackend for CanvasBackend {
    fn begin_frame(&mut self, width: f64, height: f64, clear_color: &str) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.ctx.set_fill_style_str(clear_color);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn draw_candles(&mut self, candles: &[PlotCandle], color_up: &str, color_down: &str) {
        let ctx = &self.ctx;
        self.set_dash(LineStyle::Solid);
        ctx.set_line_width(1.0);
        for c in candles {
            let color = if c.up { color_up } else { color_down };
            ctx.set_stroke_style_str(color);
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            ctx.move_to(c.x, c.y_high);
            ctx.line_to(c.x, c.y_low);
            ctx.stroke();

            let body_top = c.y_open.min(c.y_close);
            let body_h = (c.y_open.max(c.y_close) - body_top).max(1.0);
            ctx.fill_rect(c.x - c.half_w, body_top, c.half_w * 2.0, body_h);
        }
    }

    fn draw_polyline(&mut self, points: &[(f64, f64)], color: &str, width: f32, style: LineStyle) {
        if points.len() < 2 {
            return;
        }
        let ctx = &self.ctx;
        self.set_dash(style);
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width as f64);
        ctx.begin_path();
        ctx.move_to(points[0].0, points[0].1);
        for p in points.iter().skip(1) {
            ctx.line_to(p.0, p.1);
        }
        ctx.stroke();
        self.set_dash(LineStyle::Solid);
    }

    fn draw_segments(&mut self, segments: &[(f64, f64, f64, f64)], color: &str, width: f32) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width as f64);
        for (x1, y1, x2, y2) in segments {
            ctx.begin_path();
            ctx.move_to(*x1, *y1);
            ctx.line_to(*x2, *y2);
            ctx.stroke();
        }
    }

    fn draw_label(&mut self, text: &str, x: f64, y: f64, color: &str, background: Option<&str>) {
        let ctx = &self.ctx;
        ctx.set_font(FONT);
        if let Some(bg) = background {
            let w = text.len() as f64 * 7.0 + 8.0;
            ctx.set_fill_style_str(bg);
            ctx.fill_rect(x - 4.0, y - 12.0, w, 16.0);
        }
        ctx.set_fill_style_str(color);
        let _ = ctx.fill_text(text, x, y);
    }
}

/// Browser chart: keeps a [`ChartModel`] and repaints a 2D canvas from it
/// after every change.
pub struct CanvasChart {
    backend: CanvasBackend,
    model: ChartModel,
    theme: ChartTheme,
    width: f64,
    height: f64,
}

impl CanvasChart {
    pub fn new(canvas: HtmlCanvasElement, theme: ChartTheme) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let width = canvas.client_width().max(1) as f64;
        let height = canvas.client_height().max(1) as f64;
        Ok(Self {
            backend: CanvasBackend { canvas, ctx },
            model: ChartModel::new(),
            theme,
            width,
            height,
        })
    }

    pub fn model(&self) -> &ChartModel {
        &self.model
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        self.render();
    }

    pub fn render(&mut self) {
        let theme = &self.theme;
        self.backend
            .begin_frame(self.width, self.height, &theme.background);
        let Some(viewport) = self.model.viewport() else {
            return;
        };
        let proj = Projection::new(viewport, self.width, self.height);

        let price_ticks = proj.price_ticks(5);
        let time_ticks = proj.time_ticks(5);
        let mut grid: Vec<(f64, f64, f64, f64)> = price_ticks
            .iter()
            .map(|p| {
                let y = proj.y(*p);
                (0.0, y, proj.plot_width(), y)
            })
            .collect();
        grid.extend(time_ticks.iter().map(|t| {
            let x = proj.x(*t);
            (x, 0.0, x, self.height)
        }));
        self.backend.draw_segments(&grid, &theme.grid, 1.0);

        let plotted = proj.project_candles(self.model.candles());
        self.backend
            .draw_candles(&plotted, &theme.candle_up, &theme.candle_down);

        for line in self.model.lines() {
            let pts: Vec<(f64, f64)> = line
                .points
                .iter()
                .filter(|p| p.value.is_finite())
                .map(|p| (proj.x(p.ts), proj.y(p.value)))
                .collect();
            self.backend.draw_polyline(
                &pts,
                &line.options.color,
                line.options.width,
                line.options.style,
            );
        }

        let label_x = proj.plot_width() + 4.0;
        for pl in self.model.price_lines() {
            let o = &pl.options;
            let y = proj.y(o.price);
            self.backend.draw_polyline(
                &[(0.0, y), (proj.plot_width(), y)],
                &o.color,
                o.width,
                o.style,
            );
            self.backend
                .draw_label(&o.title, 6.0, y - 4.0, &o.color, None);
            if o.axis_label_visible {
                self.backend.draw_label(
                    &format!("{:.2}", o.price),
                    label_x,
                    y + 4.0,
                    &theme.background,
                    Some(&o.color),
                );
            }
        }

        for p in &price_ticks {
            self.backend
                .draw_label(&format!("{p:.2}"), label_x, proj.y(*p) - 1.0, &theme.text, None);
        }
        for t in &time_ticks {
            self.backend
                .draw_label(&time_label(*t), proj.x(*t) - 16.0, self.height - 4.0, &theme.text, None);
        }
    }
}

fn time_label(ts: Timestamp) -> String {
    let dt = Date::new(&JsValue::from_f64((ts * 1000) as f64));
    format!("{:02}:{:02}", dt.get_hours(), dt.get_minutes())
}

impl ChartWidget for CanvasChart {
    fn set_candles(&mut self, candles: &[Candle]) {
        self.model.set_candles(candles);
        self.render();
    }

    fn add_line_series(&mut self, options: LineOptions) -> SeriesId {
        self.model.add_line_series(options)
    }

    fn set_line_data(&mut self, id: SeriesId, points: &[LinePoint]) {
        self.model.set_line_data(id, points);
        self.render();
    }

    fn create_price_line(&mut self, options: PriceLineOptions) -> PriceLineId {
        let id = self.model.create_price_line(options);
        self.render();
        id
    }

    fn remove_price_line(&mut self, id: PriceLineId) -> bool {
        let removed = self.model.remove_price_line(id);
        self.render();
        removed
    }

    fn fit_content(&mut self) {
        self.model.fit_content();
        self.render();
    }
}
