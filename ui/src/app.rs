use app_shell::{
    format::fmt_ts,
    state::{RISK_MAX_PCT, RISK_MIN_PCT, RISK_STEP_PCT, STATUS_TIMEFRAMES},
    DashboardConfig,
};
use leptos::*;
use leptos_meta::*;
use reco_client::Side;

use crate::{
    modal::GlossaryModal,
    panels::{ChartPanel, PlanPanel, RankingPanel},
    state::{provide_app_ctx, use_app_ctx},
    theme::GLOBAL_CSS,
};

#[cfg(target_arch = "wasm32")]
use app_shell::{prefs, StateFeed};
#[cfg(target_arch = "wasm32")]
use crate::state::SignalState;
#[cfg(target_arch = "wasm32")]
use gloo_timers::future::TimeoutFuture;
#[cfg(target_arch = "wasm32")]
use js_sys::Date;
#[cfg(target_arch = "wasm32")]
use live_sync::{
    run_clock_sync, run_poll_loop, BrowserTimer, CancelFlag, ClockSync, PollHandle, PollOptions,
};
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(target_arch = "wasm32")]
fn now_ms() -> i64 {
    Date::now() as i64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let body = match provide_app_ctx(DashboardConfig::default()) {
        Ok(_) => view! { <Dashboard/> }.into_view(),
        Err(err) => {
            log::error!("cannot create backend client: {err}");
            view! { <div class="toast toastError">{format!("Error: {err}")}</div> }.into_view()
        }
    };

    view! {
        <Title text="Reco Dashboard"/>
        <Style>{GLOBAL_CSS}</Style>
        {body}
    }
}

#[component]
fn Dashboard() -> impl IntoView {
    let ctx = use_app_ctx();
    let state = ctx.state;
    let now = create_rw_signal(now_ms());

    #[cfg(target_arch = "wasm32")]
    {
        let clock = Rc::new(ClockSync::new());

        // Server clock offset, refreshed every interval.
        {
            let api = ctx.controller.api().clone();
            let clock = clock.clone();
            let interval = ctx.config.clock_sync_interval_ms;
            let cancel = CancelFlag::new();
            let mut sink = StateFeed(SignalState(state));
            spawn_local({
                let cancel = cancel.clone();
                async move {
                    run_clock_sync(&api, &clock, &BrowserTimer, &mut sink, &cancel, interval).await;
                }
            });
            on_cleanup(move || cancel.cancel());
        }

        // Refresh loop for the chart timeframe; restarted when it changes.
        {
            let api = ctx.controller.api().clone();
            let config = ctx.config.clone();
            let chart_tf = create_memo(move |_| state.with(|st| st.chart_tf));
            let handle = Rc::new(PollHandle::new());
            create_effect({
                let handle = handle.clone();
                move |_| {
                    let opts = PollOptions::new(chart_tf.get())
                        .with_candle_limit(config.candle_limit)
                        .with_schedule(config.poll_schedule());
                    let cancel = handle.restart();
                    let api = api.clone();
                    let clock = clock.clone();
                    let mut sink = StateFeed(SignalState(state));
                    spawn_local(async move {
                        run_poll_loop(&api, &clock, &BrowserTimer, &opts, &mut sink, &cancel).await;
                    });
                }
            });
            on_cleanup(move || handle.stop());
        }

        // One-second tick for the countdown.
        {
            let cancel = CancelFlag::new();
            spawn_local({
                let cancel = cancel.clone();
                async move {
                    while !cancel.is_cancelled() {
                        TimeoutFuture::new(1_000).await;
                        if cancel.is_cancelled() {
                            break;
                        }
                        now.set(now_ms());
                    }
                }
            });
            on_cleanup(move || cancel.cancel());
        }

        // Font size: apply and persist.
        {
            let key = ctx.config.font_key.clone();
            let font_px = create_memo(move |_| state.with(|st| st.font_px));
            create_effect(move |_| {
                let px = font_px.get();
                if let Err(err) = prefs::apply_font_px(px) {
                    log::warn!("cannot apply font size: {err:?}");
                }
                if let Err(err) = prefs::save_font_px(&key, px) {
                    log::debug!("cannot persist font size: {err:?}");
                }
            });
        }
    }

    view! {
        <TopBar/>
        <main class="wrap">
            <StatusRow now=now/>
            {move || {
                state
                    .with(|st| st.notify_msg.clone())
                    .map(|msg| view! { <div class="toast">{msg}</div> })
            }}
            {move || {
                state
                    .with(|st| st.error.clone())
                    .map(|err| view! { <div class="toast toastError">{format!("Error: {err}")}</div> })
            }}
            <div class="layoutGrid">
                <ChartPanel/>
                <PlanPanel/>
            </div>
            <RankingPanel/>
        </main>
        <GlossaryModal/>
    }
}

#[component]
fn TopBar() -> impl IntoView {
    let ctx = use_app_ctx();
    let state = ctx.state;
    let ctl = store_value(ctx.controller.clone());
    let busy = create_memo(move |_| state.with(|st| st.busy));
    let side = create_memo(move |_| state.with(|st| st.side));
    let can_notify = create_memo(move |_| state.with(|st| st.can_notify()));

    let choose_side = move |s: Side| {
        let c = ctl.get_value();
        spawn_local(async move { c.choose_side(s).await });
    };
    let compute = move |_| {
        let c = ctl.get_value();
        spawn_local(async move { c.compute_recommendation().await });
    };
    let notify = move |_| {
        let c = ctl.get_value();
        spawn_local(async move { c.send_notification().await });
    };

    view! {
        <header class="topBar">
            <div class="wrap topBarInner">
                <div class="brand">
                    <div class="brandTitle">"Reco Dashboard"</div>
                    <div class="muted brandSub">
                        "1D regime plus 30m/60m/180m candidates: picks the timeframe that is easiest to enter now and proposes Entry/Stop/TP."
                    </div>
                </div>

                <div class="topControls">
                    <div class="segmented">
                        <button
                            class=move || {
                                if side.get() == Side::Long { "segBtn segBtnActiveLong" } else { "segBtn" }
                            }
                            disabled=move || busy.get()
                            on:click=move |_| choose_side(Side::Long)
                        >
                            "LONG"
                        </button>
                        <button
                            class=move || {
                                if side.get() == Side::Short { "segBtn segBtnActiveShort" } else { "segBtn" }
                            }
                            disabled=move || busy.get()
                            on:click=move |_| choose_side(Side::Short)
                        >
                            "SHORT"
                        </button>
                    </div>

                    <div class="inputGroup">
                        <div class="muted inputLabel">"Risk (%)"</div>
                        <input
                            class="numInput"
                            type="number"
                            step=RISK_STEP_PCT.to_string()
                            min=RISK_MIN_PCT.to_string()
                            max=RISK_MAX_PCT.to_string()
                            prop:value=move || state.with(|st| st.risk_pct.to_string())
                            disabled=move || busy.get()
                            on:change=move |ev| {
                                if let Ok(v) = event_target_value(&ev).trim().parse::<f64>() {
                                    state.update(|st| st.set_risk_pct(v));
                                }
                            }
                        />
                    </div>

                    <button class="btn btnPrimary" disabled=move || busy.get() on:click=compute>
                        {move || if busy.get() { "Computing..." } else { "Compute" }}
                    </button>

                    <button class="btn" disabled=move || !can_notify.get() on:click=notify>
                        "Send to Discord"
                    </button>

                    <div class="fontControls">
                        <button class="btn btnTiny" on:click=move |_| state.update(|st| st.font_decrease())>
                            "A-"
                        </button>
                        <div class="muted fontValue">
                            {move || format!("{}px", state.with(|st| st.font_px))}
                        </div>
                        <button class="btn btnTiny" on:click=move |_| state.update(|st| st.font_increase())>
                            "A+"
                        </button>
                        <button class="btn btnTiny" on:click=move |_| state.update(|st| st.font_reset())>
                            "Reset"
                        </button>
                    </div>

                    <button class="btn" on:click=move |_| state.update(|st| st.open_glossary(None))>
                        "Glossary"
                    </button>
                </div>
            </div>
        </header>
    }
}

#[component]
fn StatusRow(#[prop(into)] now: Signal<i64>) -> impl IntoView {
    let state = use_app_ctx().state;
    let countdown = create_memo(move |_| state.with(|st| st.countdown(now.get())));

    let latest_line = move || {
        state.with(|st| {
            if st.latest.is_none() {
                return "Data status: -".to_string();
            }
            STATUS_TIMEFRAMES
                .iter()
                .map(|tf| format!("{tf} {}", fmt_ts(st.latest_ts(*tf))))
                .collect::<Vec<_>>()
                .join(" · ")
        })
    };

    view! {
        <div class="statusRow">
            <div class="statusItem">
                <span class=move || countdown.get().badge.css_class()>
                    {move || countdown.get().badge.label()}
                </span>
                <span class="muted">
                    {move || {
                        let cd = countdown.get();
                        let mut line = format!("Next update {} (1m)", cd.label());
                        if let Some(age) = cd.age_secs {
                            line.push_str(&format!(" · last received {age}s ago"));
                        }
                        line
                    }}
                </span>
            </div>
            <div class="statusItem muted statusLatest">{latest_line}</div>
        </div>
    }
}
