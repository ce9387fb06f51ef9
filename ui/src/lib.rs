pub mod app;
pub mod chart;
pub mod modal;
pub mod panels;
pub mod state;
pub mod theme;

pub use app::App;

#[cfg(all(any(feature = "csr", feature = "hydrate"), target_arch = "wasm32"))]
use leptos::*;
#[cfg(all(any(feature = "csr", feature = "hydrate"), target_arch = "wasm32"))]
use wasm_bindgen::prelude::*;

#[cfg(all(any(feature = "csr", feature = "hydrate"), target_arch = "wasm32"))]
fn init_browser_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("logger already installed"));
    }
}

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
#[wasm_bindgen]
pub fn start() {
    init_browser_logging();
    leptos::mount_to_body(|| view! { <App/> });
}

#[cfg(all(feature = "hydrate", target_arch = "wasm32"))]
#[wasm_bindgen]
pub fn hydrate() {
    init_browser_logging();
    leptos::mount_to_body(|| view! { <App/> });
}
