//! Named fields and triggers the sourcing page exposes to its host form.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldBinding {
    SalePrice,
    CostOfGoods,
    Shipping,
    MarketplaceFeePercent,
    MarketplaceFeeFixed,
    AdFeePercent,
    EstimatorOutput,
    Barcode,
    StatusText,
}

impl FieldBinding {
    pub const INPUTS: [FieldBinding; 6] = [
        FieldBinding::SalePrice,
        FieldBinding::CostOfGoods,
        FieldBinding::Shipping,
        FieldBinding::MarketplaceFeePercent,
        FieldBinding::MarketplaceFeeFixed,
        FieldBinding::AdFeePercent,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FieldBinding::SalePrice => "sale_price",
            FieldBinding::CostOfGoods => "cost_of_goods",
            FieldBinding::Shipping => "shipping",
            FieldBinding::MarketplaceFeePercent => "marketplace_fee_percent",
            FieldBinding::MarketplaceFeeFixed => "marketplace_fee_fixed",
            FieldBinding::AdFeePercent => "ad_fee_percent",
            FieldBinding::EstimatorOutput => "estimator_output",
            FieldBinding::Barcode => "barcode",
            FieldBinding::StatusText => "status_text",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldBinding::SalePrice => "Sale price",
            FieldBinding::CostOfGoods => "Cost of goods",
            FieldBinding::Shipping => "Shipping",
            FieldBinding::MarketplaceFeePercent => "Marketplace fee %",
            FieldBinding::MarketplaceFeeFixed => "Marketplace fee (fixed)",
            FieldBinding::AdFeePercent => "Ad fee %",
            FieldBinding::EstimatorOutput => "Estimate",
            FieldBinding::Barcode => "Barcode",
            FieldBinding::StatusText => "Scanner status",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    Estimate,
    ApplyEstimate,
    StartScan,
    CloseScan,
}

impl Trigger {
    pub fn key(&self) -> &'static str {
        match self {
            Trigger::Estimate => "estimate",
            Trigger::ApplyEstimate => "apply-estimate",
            Trigger::StartScan => "start-scan",
            Trigger::CloseScan => "close-scan",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trigger::Estimate => "Estimate",
            Trigger::ApplyEstimate => "Apply to item",
            Trigger::StartScan => "Scan barcode",
            Trigger::CloseScan => "Close camera",
        }
    }
}
