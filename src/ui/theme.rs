//! Shared Tailwind class strings so pages stay visually consistent.

use crate::domain::{SessionState, VerdictStatus};

// ============================================
// PANELS
// ============================================

pub const PANEL: &str = "rounded-xl border border-slate-800 bg-slate-900/40 p-6";
pub const PANEL_TITLE: &str = "text-sm font-semibold uppercase tracking-wide text-slate-500";

// ============================================
// INPUTS
// ============================================

pub const LABEL: &str = "block text-xs font-semibold uppercase text-slate-500";
pub const INPUT: &str = "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-emerald-500 focus:outline-none";
pub const READONLY_INPUT: &str = "mt-1 w-full rounded-lg border border-slate-800 bg-slate-900 px-3 py-2 text-sm text-slate-300";

// ============================================
// BUTTONS
// ============================================

pub const BTN_PRIMARY: &str = "rounded-lg bg-emerald-500 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-950 hover:bg-emerald-400 disabled:opacity-40";
pub const BTN_SECONDARY: &str = "rounded-lg border border-slate-600 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-200 hover:bg-slate-800 disabled:opacity-40";
pub const BTN_DANGER: &str = "rounded-lg border border-rose-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-rose-200 hover:bg-rose-500/10";

pub fn verdict_theme(status: VerdictStatus) -> &'static str {
    match status {
        VerdictStatus::Good => "border-emerald-500/40 bg-emerald-500/10 text-emerald-200",
        VerdictStatus::Thin => "border-amber-500/40 bg-amber-500/10 text-amber-200",
        VerdictStatus::Loss => "border-rose-500/40 bg-rose-500/10 text-rose-200",
    }
}

pub fn session_badge(state: SessionState) -> (&'static str, &'static str) {
    match state {
        SessionState::Idle => ("Idle", "bg-slate-800 text-slate-400"),
        SessionState::Requesting => ("Requesting", "bg-amber-500/20 text-amber-200"),
        SessionState::Active => ("Live", "bg-emerald-500/20 text-emerald-200"),
        SessionState::Stopped => ("Stopped", "bg-slate-800 text-slate-300"),
    }
}
