//! Shipping presets offered next to the shipping field.

use std::{collections::HashMap, sync::OnceLock};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::estimate::parse_amount;

static PRESET_TABLE: OnceLock<ShippingPresetTable> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingPreset {
    Small,
    Medium,
    Large,
    Custom,
}

impl ShippingPreset {
    pub const ALL: [ShippingPreset; 4] = [
        ShippingPreset::Small,
        ShippingPreset::Medium,
        ShippingPreset::Large,
        ShippingPreset::Custom,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ShippingPreset::Small => "small",
            ShippingPreset::Medium => "medium",
            ShippingPreset::Large => "large",
            ShippingPreset::Custom => "custom",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.key().eq_ignore_ascii_case(key.trim()))
    }
}

/// A preset option as the host labels it, e.g. `Medium box ($8.95)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetLabel {
    pub preset: ShippingPreset,
    pub label: String,
}

impl PresetLabel {
    pub fn new(preset: ShippingPreset, label: impl Into<String>) -> Self {
        Self {
            preset,
            label: label.into(),
        }
    }
}

pub fn default_labels() -> Vec<PresetLabel> {
    vec![
        PresetLabel::new(ShippingPreset::Small, "Small envelope ($4.50)"),
        PresetLabel::new(ShippingPreset::Medium, "Medium box ($8.95)"),
        PresetLabel::new(ShippingPreset::Large, "Large box ($15.25)"),
        PresetLabel::new(ShippingPreset::Custom, "Custom"),
    ]
}

/// What picking a preset does to the shipping field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PresetCost {
    Amount(f64),
    /// Leave the field exactly as the user left it.
    Manual,
}

impl PresetCost {
    /// Writes the preset amount into `field`; `Manual` is a no-op.
    pub fn fill(&self, field: &mut String) {
        if let PresetCost::Amount(cost) = self {
            *field = format!("{cost:.2}");
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShippingPresetTable {
    costs: HashMap<ShippingPreset, f64>,
    labels: Vec<PresetLabel>,
}

impl ShippingPresetTable {
    pub fn from_labels(labels: &[PresetLabel]) -> Self {
        let mut costs = HashMap::new();
        for entry in labels {
            if entry.preset == ShippingPreset::Custom {
                continue;
            }
            match cost_in_parentheses(&entry.label) {
                Some(cost) => {
                    costs.insert(entry.preset, cost);
                }
                None => warn!(
                    preset = entry.preset.key(),
                    label = %entry.label,
                    "shipping preset label carries no cost"
                ),
            }
        }

        Self {
            costs,
            labels: labels.to_vec(),
        }
    }

    pub fn resolve(&self, key: &str) -> PresetCost {
        match ShippingPreset::from_key(key) {
            Some(ShippingPreset::Custom) => PresetCost::Manual,
            Some(preset) => PresetCost::Amount(self.costs.get(&preset).copied().unwrap_or(0.0)),
            None => PresetCost::Amount(0.0),
        }
    }

    pub fn labels(&self) -> &[PresetLabel] {
        &self.labels
    }
}

/// Installs the process-wide table. Only the first call wins.
pub fn install_presets(labels: &[PresetLabel]) -> &'static ShippingPresetTable {
    PRESET_TABLE.get_or_init(|| ShippingPresetTable::from_labels(labels))
}

pub fn presets() -> &'static ShippingPresetTable {
    PRESET_TABLE.get_or_init(|| ShippingPresetTable::from_labels(&default_labels()))
}

fn cost_in_parentheses(label: &str) -> Option<f64> {
    let open = label.rfind('(')?;
    let close = open + label[open..].find(')')?;
    let inner = label[open + 1..close].trim();
    if inner.is_empty() {
        return None;
    }
    Some(parse_amount(inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ShippingPresetTable {
        ShippingPresetTable::from_labels(&default_labels())
    }

    #[test]
    fn parses_costs_from_labels() {
        let table = table();
        assert_eq!(table.resolve("small"), PresetCost::Amount(4.50));
        assert_eq!(table.resolve("medium"), PresetCost::Amount(8.95));
        assert_eq!(table.resolve("LARGE"), PresetCost::Amount(15.25));
    }

    #[test]
    fn unknown_key_resolves_to_zero() {
        assert_eq!(table().resolve("pallet"), PresetCost::Amount(0.0));
    }

    #[test]
    fn custom_never_touches_the_field() {
        let cost = table().resolve("custom");
        assert_eq!(cost, PresetCost::Manual);

        for prior in ["", "7.25", "not a number", "-3", "$1,000"] {
            let mut field = prior.to_string();
            cost.fill(&mut field);
            assert_eq!(field, prior);
        }
    }

    #[test]
    fn amount_overwrites_with_two_decimals() {
        let mut field = "1".to_string();
        table().resolve("small").fill(&mut field);
        assert_eq!(field, "4.50");
    }

    #[test]
    fn label_without_cost_falls_back_to_zero() {
        let table = ShippingPresetTable::from_labels(&[PresetLabel::new(
            ShippingPreset::Small,
            "Small envelope",
        )]);
        assert_eq!(table.resolve("small"), PresetCost::Amount(0.0));
    }

    #[test]
    fn custom_label_with_cost_is_still_manual() {
        let table = ShippingPresetTable::from_labels(&[PresetLabel::new(
            ShippingPreset::Custom,
            "Custom ($99.00)",
        )]);
        assert_eq!(table.resolve("custom"), PresetCost::Manual);
    }
}
