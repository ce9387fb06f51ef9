use app_shell::glossary;
use leptos::*;

use crate::state::use_app_ctx;

#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{prelude::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, KeyboardEvent};

/// Dialog shell. Escape, the backdrop and the close button all call
/// `on_close`.
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    #[cfg(target_arch = "wasm32")]
    create_effect(move |_| {
        let Some(win) = window() else {
            return;
        };
        let cb = Rc::new(Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
            move |ev: web_sys::Event| {
                if let Ok(key_ev) = ev.dyn_into::<KeyboardEvent>() {
                    if key_ev.key() == "Escape" && open.get_untracked() {
                        on_close.call(());
                    }
                }
            },
        )));
        let _ = win.add_event_listener_with_callback("keydown", cb.as_ref().as_ref().unchecked_ref());
        on_cleanup({
            let cb = cb.clone();
            move || {
                if let Some(win) = window() {
                    let _ = win.remove_event_listener_with_callback(
                        "keydown",
                        cb.as_ref().as_ref().unchecked_ref(),
                    );
                }
            }
        });
    });

    view! {
        <Show when=move || open.get()>
            <div class="modalBackdrop" on:click=move |_| on_close.call(())>
                <div
                    class="modal"
                    role="dialog"
                    aria-modal="true"
                    on:click=|ev| ev.stop_propagation()
                >
                    <div class="modalHeader">
                        <div class="modalTitle">{title.clone()}</div>
                        <button class="iconBtn" aria-label="Close" on:click=move |_| on_close.call(())>
                            "×"
                        </button>
                    </div>
                    <div class="modalBody">{children()}</div>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn GlossaryModal() -> impl IntoView {
    let state = use_app_ctx().state;
    let open = Signal::derive(move || state.with(|st| st.glossary_open));
    let query = create_memo(move |_| state.with(|st| st.glossary_query.clone()));
    let entries = create_memo(move |_| query.with(|q| glossary::filter(q)));

    view! {
        <Modal
            open=open
            title="Glossary"
            on_close=move |_| state.update(|st| st.close_glossary())
        >
            <GlossarySearch query=query/>
            <div class="muted glossaryCount">{move || format!("{} terms", entries.with(Vec::len))}</div>
            <div class="glossaryList">
                <For
                    each=move || entries.get()
                    key=|entry| entry.term
                    children=|entry| {
                        view! {
                            <div class="glossaryItem">
                                <div class="glossaryTerm">
                                    <b>{entry.term}</b>
                                    <span class="muted">{entry.short}</span>
                                </div>
                                <div class="glossaryDetail">{entry.detail}</div>
                                <div class="glossaryTags">
                                    {entry
                                        .tags
                                        .iter()
                                        .map(|t| view! { <span class="pill">{*t}</span> })
                                        .collect_view()}
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </Modal>
    }
}

#[component]
fn GlossarySearch(#[prop(into)] query: Signal<String>) -> impl IntoView {
    let state = use_app_ctx().state;
    let input_ref = create_node_ref::<html::Input>();
    #[cfg(target_arch = "wasm32")]
    input_ref.on_load(|el| {
        request_animation_frame(move || {
            let _ = el.focus();
        });
    });

    view! {
        <input
            class="searchInput"
            type="search"
            placeholder="Search terms, e.g. ATR, SMA, backtest"
            node_ref=input_ref
            prop:value=move || query.get()
            on:input=move |ev| state.update(|st| st.glossary_query = event_target_value(&ev))
        />
    }
}
