use dioxus::prelude::*;

use crate::{
    domain::{ProfitVerdict, VerdictStatus},
    ui::theme,
};

#[component]
pub fn ProfitIndicator(verdict: ProfitVerdict, profit: f64) -> Element {
    let label = match verdict.status {
        VerdictStatus::Good => "Buy",
        VerdictStatus::Thin => "Thin",
        VerdictStatus::Loss => "Pass",
    };
    let theme = theme::verdict_theme(verdict.status);
    let profit_display = format!("${profit:.2}");

    rsx! {
        div {
            class: "rounded-xl border px-4 py-3 {theme}",
            div {
                class: "flex items-center justify-between",
                span { class: "text-xs font-semibold uppercase tracking-wide", "Verdict" }
                span { class: "text-xs font-semibold uppercase", "{label}" }
            }
            p { class: "mt-2 text-2xl font-semibold", "{profit_display}" }
            p { class: "mt-1 text-xs opacity-80", "{verdict.rationale}" }
        }
    }
}
