use dioxus::prelude::*;

use crate::{
    domain::{shipping, FieldBinding, SourcingState, Trigger},
    ui::{
        components::{
            kpi_card::KpiCard,
            profit_indicator::ProfitIndicator,
            scan_panel::ScanPanel,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[component]
pub fn SourcingPage() -> Element {
    let mut state = use_context::<Signal<SourcingState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let presets = shipping::presets();
    let preset_labels = presets.labels().to_vec();
    let selected_preset = state.with(|st| {
        st.shipping_preset
            .map(|preset| preset.key().to_string())
            .unwrap_or_default()
    });
    let estimate = state.with(|st| st.estimate);
    let estimator_output = state.with(|st| st.field(FieldBinding::EstimatorOutput).unwrap_or_default());

    let on_estimate = move |_| {
        state.with_mut(|st| {
            st.run_estimate();
        });
    };

    let on_apply = move |_| {
        let assignments = state.with_mut(|st| st.apply_estimate());
        let staged = state.with(|st| st.staging.clone());
        push_toast(
            toasts,
            ToastKind::Success,
            format!(
                "Staged {} fields. Net cost ${:.2}, gross profit ${:.2}.",
                assignments.len(),
                staged.net_cost(),
                staged.gross_profit()
            ),
        );
    };

    let on_preset = move |evt: FormEvent| {
        let key = evt.value();
        state.with_mut(|st| {
            st.select_preset(presets, &key);
            st.run_estimate();
        });
    };

    rsx! {
        div { class: "grid gap-8 lg:grid-cols-[2fr_1fr]",
            div { class: "space-y-8",
                section {
                    class: theme::PANEL,
                    h2 { class: theme::PANEL_TITLE, "Should I buy it?" }
                    div { class: "mt-4 grid gap-4 sm:grid-cols-2",
                        for binding in FieldBinding::INPUTS {
                            EstimateField { key: "{binding.key()}", binding }
                        }
                        div {
                            label { class: theme::LABEL, "Shipping preset" }
                            select {
                                class: theme::INPUT,
                                value: selected_preset,
                                onchange: on_preset,
                                option { value: "", disabled: true, "Pick a preset" }
                                for entry in preset_labels {
                                    option { key: "{entry.preset.key()}", value: entry.preset.key(), "{entry.label}" }
                                }
                            }
                        }
                    }
                    div { class: "mt-4",
                        label { class: theme::LABEL, "{FieldBinding::EstimatorOutput.label()}" }
                        input {
                            class: theme::READONLY_INPUT,
                            name: FieldBinding::EstimatorOutput.key(),
                            readonly: true,
                            value: estimator_output,
                        }
                    }
                    div { class: "mt-4 flex gap-3",
                        button {
                            class: theme::BTN_SECONDARY,
                            "data-trigger": Trigger::Estimate.key(),
                            onclick: on_estimate,
                            "{Trigger::Estimate.label()}"
                        }
                        button {
                            class: theme::BTN_PRIMARY,
                            "data-trigger": Trigger::ApplyEstimate.key(),
                            onclick: on_apply,
                            "{Trigger::ApplyEstimate.label()}"
                        }
                    }
                }

                if let Some(result) = estimate {
                    section { class: "grid gap-4 sm:grid-cols-3",
                        KpiCard {
                            title: "Profit".to_string(),
                            value: format!("${:.2}", result.profit),
                            description: Some(format!("Fees ${:.2} · Ads ${:.2}", result.marketplace_fee, result.ad_fee)),
                        }
                        KpiCard {
                            title: "ROI".to_string(),
                            value: format!("{:.2}%", result.roi),
                            description: Some("Profit over cost of goods".to_string()),
                        }
                        KpiCard {
                            title: "Margin".to_string(),
                            value: format!("{:.2}%", result.margin),
                            description: Some("Profit over sale price".to_string()),
                        }
                    }
                }
            }

            div { class: "space-y-8",
                if let Some(result) = estimate {
                    ProfitIndicator { verdict: result.verdict(), profit: result.profit }
                }
                ScanPanel {}
            }
        }
    }
}

#[component]
fn EstimateField(binding: FieldBinding) -> Element {
    let mut state = use_context::<Signal<SourcingState>>();
    let value = state.with(|st| st.field(binding).unwrap_or_default());

    rsx! {
        div {
            label { class: theme::LABEL, "{binding.label()}" }
            input {
                class: theme::INPUT,
                name: binding.key(),
                inputmode: "decimal",
                value: value,
                oninput: move |evt| {
                    state.with_mut(|st| {
                        st.set_field(binding, evt.value());
                        st.run_estimate();
                    });
                },
            }
        }
    }
}
