use std::rc::Rc;

use app_shell::{Controller, DashboardConfig, DashboardState, StateCell};
use leptos::*;
use reco_client::{RecoClient, RecoConfig, RecoError};

#[cfg(target_arch = "wasm32")]
use js_sys::Reflect;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// Dashboard state living in a reactive signal.
#[derive(Clone, Copy)]
pub struct SignalState(pub RwSignal<DashboardState>);

impl StateCell for SignalState {
    fn update(&self, f: impl FnOnce(&mut DashboardState)) {
        self.0.update(f);
    }

    fn with<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        self.0.with_untracked(f)
    }
}

pub type DashboardController = Controller<Rc<RecoClient>, SignalState>;

#[derive(Clone)]
pub struct AppCtx {
    pub state: RwSignal<DashboardState>,
    pub config: Rc<DashboardConfig>,
    pub controller: DashboardController,
}

#[cfg(target_arch = "wasm32")]
fn read_global(key: &str) -> Option<String> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
        .filter(|s| !s.trim().is_empty())
}

/// Page global `RECO_API_BASE`, then the configured base, then the page
/// origin.
pub fn resolve_api_base(config: &DashboardConfig) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        read_global("RECO_API_BASE")
            .or_else(|| Some(config.api_base.clone()).filter(|s| !s.trim().is_empty()))
            .or_else(|| web_sys::window().and_then(|w| w.location().origin().ok()))
            .unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        config.api_base.clone()
    }
}

fn stored_font_px(config: &DashboardConfig) -> i32 {
    #[cfg(target_arch = "wasm32")]
    {
        app_shell::prefs::load_font_px(&config.font_key)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = config;
        app_shell::prefs::FONT_DEFAULT_PX
    }
}

pub fn provide_app_ctx(config: DashboardConfig) -> Result<AppCtx, RecoError> {
    let api_base = resolve_api_base(&config);
    log::info!("backend api base: {api_base:?}");
    let client = RecoClient::new(RecoConfig::new(api_base))?;

    let mut initial = DashboardState::new(&config);
    initial.set_font_px(stored_font_px(&config));
    let state = create_rw_signal(initial);
    let ctx = AppCtx {
        state,
        config: Rc::new(config),
        controller: Controller::new(Rc::new(client), SignalState(state)),
    };
    provide_context(ctx.clone());
    Ok(ctx)
}

pub fn use_app_ctx() -> AppCtx {
    use_context::<AppCtx>().expect("AppCtx not provided")
}
