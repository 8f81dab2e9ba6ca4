use dioxus::prelude::*;

use crate::{
    domain::{SourcingState, StagingField, StagingRecord},
    ui::{
        components::{
            kpi_card::KpiCard,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

const STAGED_FIELDS: [StagingField; 6] = [
    StagingField::CostOfGoods,
    StagingField::SalePrice,
    StagingField::Shipping,
    StagingField::AdFee,
    StagingField::MarketplaceFee,
    StagingField::BuyerPaidAmount,
];

/// Preview of the item record the inventory form will submit.
#[component]
pub fn StagingPage() -> Element {
    let mut state = use_context::<Signal<SourcingState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let record = state.with(|st| st.staging.clone());
    let rows: Vec<(&'static str, String)> = STAGED_FIELDS
        .iter()
        .map(|field| (field.label(), money(record.value(*field))))
        .collect();
    let barcode = record.barcode.clone().unwrap_or_else(|| "-".to_string());
    let net_cost = format!("${:.2}", record.net_cost());
    let gross_profit = format!("${:.2}", record.gross_profit());

    let on_clear = move |_| {
        state.with_mut(|st| st.staging = StagingRecord::default());
        push_toast(toasts, ToastKind::Info, "Cleared the staged item.");
    };

    rsx! {
        div { class: "space-y-8",
            section { class: "grid gap-4 sm:grid-cols-2",
                KpiCard { title: "Net cost".to_string(), value: net_cost, description: Some("COG + fees + shipping".to_string()) }
                KpiCard { title: "Gross profit".to_string(), value: gross_profit, description: Some("Buyer paid minus net cost".to_string()) }
            }
            section {
                class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Staged item" }
                dl { class: "mt-4 grid gap-3 sm:grid-cols-2",
                    div { class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                        dt { class: "text-xs uppercase text-slate-500", "Barcode" }
                        dd { class: "font-mono text-sm text-slate-200", "{barcode}" }
                    }
                    for (label, value) in rows {
                        div { key: "{label}", class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                            dt { class: "text-xs uppercase text-slate-500", "{label}" }
                            dd { class: "text-sm text-slate-200", "{value}" }
                        }
                    }
                }
                p { class: "mt-3 text-xs text-slate-500", "Buyer paid is assumed to equal the sale price until the item actually sells." }
                button { class: "mt-4 {theme::BTN_DANGER}", onclick: on_clear, "Clear staged item" }
            }
        }
    }
}

fn money(value: Option<f64>) -> String {
    value
        .map(|amount| format!("${amount:.2}"))
        .unwrap_or_else(|| "-".to_string())
}
