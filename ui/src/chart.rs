use crate::state::use_app_ctx;
use leptos::*;

#[cfg(target_arch = "wasm32")]
use chart_frontend::{CanvasChart, ChartTheme, PriceChart};
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{prelude::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::window;

#[cfg(target_arch = "wasm32")]
type ChartSlot = Rc<RefCell<Option<PriceChart<CanvasChart>>>>;

/// Run `f` against the chart, creating it on first use once the canvas is
/// mounted.
#[cfg(target_arch = "wasm32")]
fn with_chart(
    slot: &ChartSlot,
    canvas_ref: NodeRef<html::Canvas>,
    f: impl FnOnce(&mut PriceChart<CanvasChart>),
) {
    let Some(canvas) = canvas_ref.get() else {
        return;
    };
    let mut slot = slot.borrow_mut();
    if slot.is_none() {
        let el: web_sys::HtmlCanvasElement = (*canvas).clone();
        let theme = ChartTheme::default();
        match CanvasChart::new(el, theme.clone()) {
            Ok(widget) => *slot = Some(PriceChart::with_theme(widget, theme)),
            Err(err) => {
                log::warn!("chart init failed: {err:?}");
                return;
            }
        }
    }
    if let Some(chart) = slot.as_mut() {
        f(chart);
    }
}

#[component]
pub fn ChartView() -> impl IntoView {
    let ctx = use_app_ctx();
    let state = ctx.state;
    let canvas_ref = create_node_ref::<html::Canvas>();
    let candles = create_memo(move |_| state.with(|st| st.candles.clone()));
    let scenario = create_memo(move |_| state.with(|st| st.visible_scenario().cloned()));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (candles, scenario);

    #[cfg(target_arch = "wasm32")]
    {
        let slot: ChartSlot = Rc::new(RefCell::new(None));

        {
            let slot = slot.clone();
            create_effect(move |_| {
                candles.with(|bars| with_chart(&slot, canvas_ref, |chart| chart.set_candles(bars)));
            });
        }

        {
            let slot = slot.clone();
            create_effect(move |_| {
                scenario.with(|sc| with_chart(&slot, canvas_ref, |chart| chart.set_scenario(sc.as_ref())));
            });
        }

        // Track the container size.
        create_effect(move |_| {
            let Some(win) = window() else {
                return;
            };
            let slot = slot.clone();
            let cb = Rc::new(Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
                move |_ev: web_sys::Event| {
                    let Some(canvas) = canvas_ref.get_untracked() else {
                        return;
                    };
                    let (w, h) = (canvas.client_width() as f64, canvas.client_height() as f64);
                    if let Some(chart) = slot.borrow_mut().as_mut() {
                        chart.widget_mut().resize(w, h);
                    }
                },
            )));
            let _ = win.add_event_listener_with_callback("resize", cb.as_ref().as_ref().unchecked_ref());
            on_cleanup({
                let cb = cb.clone();
                move || {
                    if let Some(win) = window() {
                        let _ = win.remove_event_listener_with_callback(
                            "resize",
                            cb.as_ref().as_ref().unchecked_ref(),
                        );
                    }
                }
            });
        });
    }

    view! { <canvas class="chartCanvas" node_ref=canvas_ref></canvas> }
}
