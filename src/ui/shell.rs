use dioxus::prelude::*;

use crate::{
    app::Route,
    domain::SourcingState,
    util::version::{version_label, APP_NAME},
};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let nav = use_navigator();
    let state = use_context::<Signal<SourcingState>>();
    let staged = state.with(|st| st.staging.sale_price.is_some());
    let staging_label = if staged { "Staged item •" } else { "Staged item" };

    rsx! {
        div { class: "min-h-screen bg-slate-950 text-slate-100 font-sans",
            header {
                class: "border-b border-slate-900/60 bg-slate-950/80 backdrop-blur px-6 py-4",
                div { class: "mx-auto flex max-w-6xl items-center justify-between gap-4",
                    div {
                        h1 { class: "text-xl font-semibold tracking-tight text-emerald-200", "{APP_NAME}" }
                        p { class: "text-xs text-slate-500 italic", "should I buy it?" }
                    }
                    nav { class: "flex gap-2 text-sm justify-end",
                        NavButton {
                            active: matches!(current_route, Route::Sourcing {}),
                            onclick: move |_| { nav.push(Route::Sourcing {}); },
                            label: "Estimate",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Staging {}),
                            onclick: move |_| { nav.push(Route::Staging {}); },
                            label: staging_label,
                        }
                    }
                }
            }
            main { class: "mx-auto max-w-6xl px-6 py-10",
                {children}
            }
            footer { class: "mx-auto max-w-6xl px-6 pb-6 text-right text-xs text-slate-600",
                "{version_label()}"
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active {
        "min-w-[5.5rem] rounded-lg border border-emerald-500/60 bg-emerald-500/15 px-4 py-2 font-semibold text-emerald-300"
    } else {
        "min-w-[5.5rem] rounded-lg border border-transparent px-4 py-2 text-slate-400 transition hover:border-slate-700 hover:bg-slate-900/80 hover:text-slate-200"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
