use app_shell::format::{fmt_fixed, fmt_minutes, fmt_num, fmt_pct, fmt_raw, fmt_signed_pct};
use leptos::*;
use reco_client::{Candidate, Plan};

use crate::{chart::ChartView, state::use_app_ctx};

/// Label with a `?` button that opens the glossary at `term`.
#[component]
pub fn Term(#[prop(into)] label: String, term: &'static str) -> impl IntoView {
    let state = use_app_ctx().state;
    view! {
        <span class="termLabel">
            <span>{label}</span>
            <button
                class="helpBtn"
                aria-label=format!("{term} explained")
                on:click=move |_| state.update(|st| st.open_glossary(Some(term)))
            >
                "?"
            </button>
        </span>
    }
}

#[component]
pub fn ChartPanel() -> impl IntoView {
    let state = use_app_ctx().state;
    let has_plan = create_memo(move |_| state.with(|st| st.has_plan()));
    let regime = create_memo(move |_| state.with(|st| st.regime().cloned()));
    let selected = create_memo(move |_| state.with(|st| st.selected().cloned()));
    let change = create_memo(move |_| state.with(|st| st.price_change()));

    view! {
        <section class="panel">
            <div class="panelHeader">
                <div>
                    <div class="panelTitle">"Chart"</div>
                    <div class="muted panelSub">
                        "TF " <b>{move || state.with(|st| st.selected_tf())}</b>
                        {move || {
                            regime
                                .get()
                                .filter(|r| !r.bias.is_empty())
                                .map(|r| {
                                    view! {
                                        <span class="pill">
                                            <Term label=format!("Regime: {}", r.bias) term="Regime"/>
                                        </span>
                                    }
                                })
                        }}
                        {move || {
                            regime
                                .get()
                                .and_then(|r| r.confidence)
                                .map(|c| {
                                    view! {
                                        <span class="pill">
                                            <Term label=format!("conf {}", fmt_raw(Some(c))) term="Conf"/>
                                        </span>
                                    }
                                })
                        }}
                    </div>
                </div>

                <div class="priceHeader">
                    <div class="priceNow">{move || fmt_num(change.get().map(|c| c.last))}</div>
                    {move || {
                        change
                            .get()
                            .and_then(|c| c.delta_pct)
                            .map(|pct| {
                                let class = if pct >= 0.0 { "priceDelta up" } else { "priceDelta down" };
                                view! { <div class=class>{fmt_signed_pct(Some(pct), 2)}</div> }
                            })
                    }}
                </div>
            </div>

            <div class="chartBox">
                <ChartView/>
            </div>

            <div class="muted panelFoot">
                {move || {
                    if has_plan.get() {
                        "With a plan: Entry/Stop/TP lines are drawn. SMA5 and SMA200 are always shown."
                    } else {
                        "No plan yet: only price and the SMA lines are shown. Press LONG or SHORT to build a recommendation."
                    }
                }}
            </div>

            <div class="kpiGrid">
                <div class="kpi">
                    <div class="muted">
                        <Term label="Status" term="Score"/>
                    </div>
                    <div class=move || {
                        if selected.get().is_some_and(|c| c.is_ready()) { "kpiValue ok" } else { "kpiValue wait" }
                    }>
                        {move || {
                            selected
                                .get()
                                .and_then(|c| c.status)
                                .map(|s| s.to_uppercase())
                                .unwrap_or_else(|| "-".to_string())
                        }}
                    </div>
                </div>
                <div class="kpi">
                    <div class="muted">
                        <Term label="Confidence" term="Conf"/>
                    </div>
                    <div class="kpiValue">{move || fmt_raw(selected.get().and_then(|c| c.confidence))}</div>
                </div>
                <div class="kpi">
                    <div class="muted">
                        <Term label="ATR%" term="ATR%"/>
                    </div>
                    <div class="kpiValue">{move || fmt_pct(selected.get().and_then(|c| c.atr_pct), 3)}</div>
                </div>
                <div class="kpi">
                    <div class="muted">"Next bar in"</div>
                    <div class="kpiValue">
                        {move || fmt_minutes(selected.get().and_then(|c| c.time_to_next_sec))}
                    </div>
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn PlanPanel() -> impl IntoView {
    let state = use_app_ctx().state;
    let plan = create_memo(move |_| state.with(|st| st.plan().filter(|p| p.has_entry()).cloned()));
    let notes = create_memo(move |_| state.with(|st| st.notes().to_vec()));

    view! {
        <aside class="panel">
            <div class="panelHeader">
                <div>
                    <div class="panelTitle">"Recommendation"</div>
                    <div class="muted panelSub">
                        {move || match plan.get() {
                            Some(p) => {
                                view! {
                                    "Side " <b>{p.side.map(|s| s.label()).unwrap_or("-")}</b>
                                    " · TF " <b>{p.tf.unwrap_or_else(|| "-".into())}</b>
                                }
                                    .into_view()
                            }
                            None => "Press LONG or SHORT to see Entry/Stop/TP.".into_view(),
                        }}
                    </div>
                </div>
            </div>

            <Show when=move || notes.with(|n| !n.is_empty())>
                <div class="notice">
                    {move || {
                        notes.get().into_iter().map(|n| view! { <div>{format!("• {n}")}</div> }).collect_view()
                    }}
                </div>
            </Show>

            {move || plan.get().map(plan_details)}
        </aside>
    }
}

fn plan_details(p: Plan) -> impl IntoView {
    view! {
        <div class="priceGrid">
            <div class="priceCard">
                <div class="muted">
                    <Term label="Entry" term="ATR(14)"/>
                    " "
                    <span class="muted">{format!("({})", p.entry_type.clone().unwrap_or_else(|| "-".into()))}</span>
                </div>
                <div class="priceValue">{fmt_num(p.entry_price)}</div>
                <div class="muted">
                    {format!(
                        "k={} · distance {}%",
                        fmt_raw(p.params.entry_atr_k),
                        fmt_raw(p.entry_distance_pct),
                    )}
                </div>
            </div>

            <div class="priceCard">
                <div class="muted">
                    <Term label="Stop" term="ATR(14)"/>
                </div>
                <div class="priceValue">{fmt_num(p.stop_price)}</div>
                <div class="muted">
                    {format!(
                        "ATR x {} · {}%",
                        fmt_raw(p.params.stop_atr_mult),
                        fmt_raw(p.stop_distance_pct),
                    )}
                </div>
            </div>

            <div class="priceCard">
                <div class="muted">
                    <Term label="TP1" term="SMA5"/>
                </div>
                <div class="priceValue">{fmt_num(p.tp1_price)}</div>
                <div class="muted">
                    <Term label="R:R" term="R:R"/>
                    {format!(" {}", fmt_raw(p.reward_risk_to_tp1))}
                </div>
            </div>
        </div>

        <div class="planMeta">
            <div class="metaRow">
                <span class="muted">"TP2/TP3"</span>
                <span>
                    <b>{fmt_num(p.tp2_price)}</b>
                    " / "
                    <b>{fmt_num(p.tp3_price)}</b>
                </span>
            </div>
            <div class="metaRow">
                <span class="muted">"Max leverage"</span>
                <span>
                    <b>{fmt_raw(p.max_leverage_by_risk)}</b>
                    "x "
                    <span class="muted">{format!("(risk {}%)", fmt_raw(p.risk_pct))}</span>
                </span>
            </div>
            <div class="metaRow">
                <span class="muted">"Exit rule"</span>
                <span>{p.tp_rule.clone().unwrap_or_else(|| "-".into())}</span>
            </div>
        </div>
    }
}

#[component]
pub fn RankingPanel() -> impl IntoView {
    let state = use_app_ctx().state;
    let has_plan = create_memo(move |_| state.with(|st| st.has_plan()));
    let rows = create_memo(move |_| {
        state.with(|st| {
            st.candidates()
                .iter()
                .map(|c| (c.clone(), st.is_active_candidate(c)))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <Show when=move || has_plan.get()>
            <section class="panel rankingPanel">
                <div class="panelHeader">
                    <div>
                        <div class="panelTitle">"Timeframe Ranking"</div>
                        <div class="muted panelSub">
                            "Candidate scores (entry ease + backtest + regime + volatility)"
                        </div>
                    </div>
                </div>

                <div class="tableScroll">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"TF"</th>
                                <th><Term label="Score" term="Score"/></th>
                                <th><Term label="Comp" term="Comp"/></th>
                                <th><Term label="Conf" term="Conf"/></th>
                                <th><Term label="BT" term="BT"/></th>
                                <th>"Signal"</th>
                                <th>"Close"</th>
                                <th><Term label="SMA5" term="SMA5"/></th>
                                <th><Term label="RSI2" term="RSI(2)"/></th>
                                <th><Term label="ATR%" term="ATR%"/></th>
                                <th>"Next"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                rows.get()
                                    .into_iter()
                                    .map(|(c, active)| view! { <CandidateRow candidate=c active=active/> })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </section>
        </Show>
    }
}

#[component]
fn CandidateRow(candidate: Candidate, active: bool) -> impl IntoView {
    let ctl = store_value(use_app_ctx().controller);
    let tf = store_value(candidate.tf.clone());
    let pick = move || {
        let c = ctl.get_value();
        let label = tf.get_value();
        spawn_local(async move { c.pick_timeframe(&label).await });
    };
    let bt_width = candidate
        .backtest_score_norm
        .filter(|v| v.is_finite())
        .map(|v| (v * 100.0).round())
        .unwrap_or(0.0);

    view! {
        <tr
            class=if active { "rowActive" } else { "" }
            role="button"
            tabindex="0"
            on:click=move |_| pick()
            on:keydown=move |ev| {
                let key = ev.key();
                if key == "Enter" || key == " " {
                    ev.prevent_default();
                    pick();
                }
            }
        >
            <td><b>{candidate.tf.clone()}</b></td>
            <td>{fmt_raw(candidate.entry_ease_score)}</td>
            <td>{fmt_raw(candidate.composite_score)}</td>
            <td>{fmt_raw(candidate.confidence)}</td>
            <td>
                <div class="barWrap" title="Recent backtest score (normalised)">
                    <div class="barFill" style=format!("width: {bt_width}%")></div>
                </div>
            </td>
            <td>{if candidate.trigger_now { "READY" } else { "WAIT" }}</td>
            <td>{fmt_num(candidate.close)}</td>
            <td>{fmt_num(candidate.sma5)}</td>
            <td>{fmt_fixed(candidate.rsi2, 2)}</td>
            <td>{fmt_pct(candidate.atr_pct, 3)}</td>
            <td>{fmt_minutes(candidate.time_to_next_sec)}</td>
        </tr>
    }
}
