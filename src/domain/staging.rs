use serde::{Deserialize, Serialize};

use super::estimate::{compute, EstimateInput};

/// Fields of the item being staged for inventory that the estimator can fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StagingField {
    CostOfGoods,
    SalePrice,
    Shipping,
    AdFee,
    MarketplaceFee,
    BuyerPaidAmount,
}

impl StagingField {
    pub fn label(&self) -> &'static str {
        match self {
            StagingField::CostOfGoods => "COG",
            StagingField::SalePrice => "Sale price",
            StagingField::Shipping => "Shipping",
            StagingField::AdFee => "Ad fee",
            StagingField::MarketplaceFee => "Marketplace fee",
            StagingField::BuyerPaidAmount => "Buyer paid",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldAssignment {
    pub field: StagingField,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldAssignments(Vec<FieldAssignment>);

impl FieldAssignments {
    pub fn iter(&self) -> impl Iterator<Item = &FieldAssignment> {
        self.0.iter()
    }

    pub fn get(&self, field: StagingField) -> Option<f64> {
        self.0
            .iter()
            .find(|assignment| assignment.field == field)
            .map(|assignment| assignment.value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Maps the current estimate onto staging fields. Only call this from the
/// apply-estimate trigger; nothing re-applies it behind the user's back.
///
/// Buyer paid amount is assumed to equal the sale price. That is a stated
/// simplification, not something the estimator derives.
pub fn apply(input: &EstimateInput) -> FieldAssignments {
    let input = input.sanitized();
    let result = compute(&input);
    let sale = input.sale_cost;

    FieldAssignments(vec![
        FieldAssignment {
            field: StagingField::CostOfGoods,
            value: input.cost_of_goods,
        },
        FieldAssignment {
            field: StagingField::SalePrice,
            value: sale,
        },
        FieldAssignment {
            field: StagingField::Shipping,
            value: input.shipping_cost,
        },
        FieldAssignment {
            field: StagingField::AdFee,
            value: result.ad_fee,
        },
        FieldAssignment {
            field: StagingField::MarketplaceFee,
            value: result.marketplace_fee,
        },
        FieldAssignment {
            field: StagingField::BuyerPaidAmount,
            value: sale,
        },
    ])
}

/// The item record the surrounding inventory form submits. Empty fields are
/// `None` and count as zero in the derived totals.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StagingRecord {
    pub cost_of_goods: Option<f64>,
    pub sale_price: Option<f64>,
    pub shipping: Option<f64>,
    pub ad_fee: Option<f64>,
    pub marketplace_fee: Option<f64>,
    pub buyer_paid_amount: Option<f64>,
    pub barcode: Option<String>,
}

impl StagingRecord {
    pub fn assign(&mut self, assignments: &FieldAssignments) {
        for assignment in assignments.iter() {
            let slot = match assignment.field {
                StagingField::CostOfGoods => &mut self.cost_of_goods,
                StagingField::SalePrice => &mut self.sale_price,
                StagingField::Shipping => &mut self.shipping,
                StagingField::AdFee => &mut self.ad_fee,
                StagingField::MarketplaceFee => &mut self.marketplace_fee,
                StagingField::BuyerPaidAmount => &mut self.buyer_paid_amount,
            };
            *slot = Some(assignment.value);
        }
    }

    pub fn value(&self, field: StagingField) -> Option<f64> {
        match field {
            StagingField::CostOfGoods => self.cost_of_goods,
            StagingField::SalePrice => self.sale_price,
            StagingField::Shipping => self.shipping,
            StagingField::AdFee => self.ad_fee,
            StagingField::MarketplaceFee => self.marketplace_fee,
            StagingField::BuyerPaidAmount => self.buyer_paid_amount,
        }
    }

    /// COG + ad fee + marketplace fee + shipping.
    pub fn net_cost(&self) -> f64 {
        n(self.cost_of_goods) + n(self.ad_fee) + n(self.marketplace_fee) + n(self.shipping)
    }

    /// Buyer paid minus net cost; negative net cost when nothing was paid yet.
    pub fn gross_profit(&self) -> f64 {
        n(self.buyer_paid_amount) - self.net_cost()
    }
}

fn n(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}
