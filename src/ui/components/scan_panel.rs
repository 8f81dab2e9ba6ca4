use dioxus::prelude::*;

use crate::{
    app::Scanner,
    domain::{FieldBinding, SessionState, SourcingState, StatusReporter, Trigger},
    ui::theme,
};

/// Barcode field plus the start/close scan triggers and the status line.
#[component]
pub fn ScanPanel() -> Element {
    let scanner = use_context::<Scanner>();
    let status = use_context::<Signal<StatusReporter>>();
    let mut state = use_context::<Signal<SourcingState>>();

    // Every session transition emits an event that rewrites the status
    // signal, so reading it here keeps the badge in step with the session.
    let message = status.with(|st| st.current().map(str::to_string));
    let session_state = scanner.state();
    let scanning = matches!(
        session_state,
        SessionState::Requesting | SessionState::Active
    );
    let (badge_label, badge_class) = theme::session_badge(session_state);
    let barcode = state.with(|st| st.field(FieldBinding::Barcode).unwrap_or_default());

    let on_start = {
        let scanner = scanner.clone();
        move |_| scanner.start()
    };
    let on_close = {
        let scanner = scanner.clone();
        move |_| scanner.close()
    };

    rsx! {
        section {
            class: theme::PANEL,
            div { class: "flex items-center justify-between",
                h2 { class: theme::PANEL_TITLE, "Barcode" }
                span { class: "rounded-full px-2 py-0.5 text-xs font-semibold {badge_class}", "{badge_label}" }
            }
            div { class: "mt-4",
                label { class: theme::LABEL, "{FieldBinding::Barcode.label()}" }
                input {
                    class: theme::INPUT,
                    name: FieldBinding::Barcode.key(),
                    value: barcode,
                    placeholder: "Scan or type UPC / EAN",
                    oninput: move |evt| state.with_mut(|st| st.set_field(FieldBinding::Barcode, evt.value())),
                }
            }
            p {
                class: "mt-3 min-h-[1.25rem] text-sm text-slate-400",
                "data-binding": FieldBinding::StatusText.key(),
                if let Some(text) = message {
                    "{text}"
                }
            }
            div { class: "mt-4 flex gap-3",
                button {
                    class: theme::BTN_PRIMARY,
                    disabled: scanning,
                    "data-trigger": Trigger::StartScan.key(),
                    onclick: on_start,
                    "{Trigger::StartScan.label()}"
                }
                if scanning {
                    button {
                        class: theme::BTN_DANGER,
                        "data-trigger": Trigger::CloseScan.key(),
                        onclick: on_close,
                        "{Trigger::CloseScan.label()}"
                    }
                }
            }
        }
    }
}
