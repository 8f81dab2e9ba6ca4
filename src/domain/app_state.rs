use super::{
    bindings::FieldBinding,
    estimate::{compute, EstimateFields, EstimateInput, EstimateResult},
    shipping::{ShippingPreset, ShippingPresetTable},
    staging::{apply, FieldAssignments, StagingRecord},
};
use crate::{infra::detector::ScanResult, util::config::SourcingConfig};

/// Everything the sourcing page edits. Lives only for the app session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourcingState {
    pub fields: EstimateFields,
    pub shipping_preset: Option<ShippingPreset>,
    pub estimate: Option<EstimateResult>,
    pub staging: StagingRecord,
    /// Barcode field; written by a successful scan or typed by hand.
    pub barcode: String,
}

impl SourcingState {
    /// Prefills fee percentages from config so a fresh form is ready to use.
    pub fn with_defaults(config: &SourcingConfig) -> Self {
        Self {
            fields: EstimateFields {
                marketplace_fee_percent: config.marketplace_fee_percent.to_string(),
                marketplace_fee_fixed: format!("{:.2}", config.marketplace_fee_fixed),
                ad_fee_percent: config.ad_fee_percent.to_string(),
                ..EstimateFields::default()
            },
            ..Self::default()
        }
    }

    /// Current text of a binding. `None` for the status text, which the
    /// [`StatusReporter`](super::status::StatusReporter) owns.
    pub fn field(&self, binding: FieldBinding) -> Option<String> {
        let text = match binding {
            FieldBinding::SalePrice => self.fields.sale_price.clone(),
            FieldBinding::CostOfGoods => self.fields.cost_of_goods.clone(),
            FieldBinding::Shipping => self.fields.shipping.clone(),
            FieldBinding::MarketplaceFeePercent => self.fields.marketplace_fee_percent.clone(),
            FieldBinding::MarketplaceFeeFixed => self.fields.marketplace_fee_fixed.clone(),
            FieldBinding::AdFeePercent => self.fields.ad_fee_percent.clone(),
            FieldBinding::EstimatorOutput => self
                .estimate
                .map(|result| result.summary())
                .unwrap_or_default(),
            FieldBinding::Barcode => self.barcode.clone(),
            FieldBinding::StatusText => return None,
        };
        Some(text)
    }

    /// Writes user input into an editable binding. Output-only bindings are
    /// ignored.
    pub fn set_field(&mut self, binding: FieldBinding, value: String) {
        let slot = match binding {
            FieldBinding::SalePrice => &mut self.fields.sale_price,
            FieldBinding::CostOfGoods => &mut self.fields.cost_of_goods,
            FieldBinding::Shipping => {
                self.shipping_preset = Some(ShippingPreset::Custom);
                &mut self.fields.shipping
            }
            FieldBinding::MarketplaceFeePercent => &mut self.fields.marketplace_fee_percent,
            FieldBinding::MarketplaceFeeFixed => &mut self.fields.marketplace_fee_fixed,
            FieldBinding::AdFeePercent => &mut self.fields.ad_fee_percent,
            FieldBinding::Barcode => &mut self.barcode,
            FieldBinding::EstimatorOutput | FieldBinding::StatusText => return,
        };
        *slot = value;
    }

    pub fn input(&self) -> EstimateInput {
        EstimateInput::from_fields(&self.fields)
    }

    /// Estimate trigger.
    pub fn run_estimate(&mut self) -> EstimateResult {
        let result = compute(&self.input());
        self.estimate = Some(result);
        result
    }

    /// Apply-estimate trigger.
    pub fn apply_estimate(&mut self) -> FieldAssignments {
        self.run_estimate();
        let assignments = apply(&self.input());
        self.staging.assign(&assignments);
        if !self.barcode.trim().is_empty() {
            self.staging.barcode = Some(self.barcode.trim().to_string());
        }
        assignments
    }

    pub fn select_preset(&mut self, table: &ShippingPresetTable, key: &str) {
        self.shipping_preset = ShippingPreset::from_key(key);
        table.resolve(key).fill(&mut self.fields.shipping);
    }

    pub fn record_scan(&mut self, result: &ScanResult) {
        self.barcode = result.raw_value.clone();
        self.staging.barcode = Some(result.raw_value.clone());
    }
}
