use serde::{Deserialize, Serialize};

/// Margin below which a profitable item is still flagged as thin.
const THIN_MARGIN_PCT: f64 = 15.0;

/// Raw text of the estimator form, exactly as the user typed it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimateFields {
    pub sale_price: String,
    pub cost_of_goods: String,
    pub shipping: String,
    pub marketplace_fee_percent: String,
    pub marketplace_fee_fixed: String,
    pub ad_fee_percent: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EstimateInput {
    pub sale_cost: f64,
    pub cost_of_goods: f64,
    pub shipping_cost: f64,
    pub marketplace_fee_percent: f64,
    pub marketplace_fee_fixed: f64,
    pub ad_fee_percent: f64,
}

impl EstimateInput {
    /// Parses every form field leniently; anything unreadable counts as zero.
    pub fn from_fields(fields: &EstimateFields) -> Self {
        Self {
            sale_cost: parse_amount(&fields.sale_price),
            cost_of_goods: parse_amount(&fields.cost_of_goods),
            shipping_cost: parse_amount(&fields.shipping),
            marketplace_fee_percent: parse_amount(&fields.marketplace_fee_percent),
            marketplace_fee_fixed: parse_amount(&fields.marketplace_fee_fixed),
            ad_fee_percent: parse_amount(&fields.ad_fee_percent),
        }
    }

    pub(crate) fn sanitized(&self) -> Self {
        Self {
            sale_cost: finite_or_zero(self.sale_cost),
            cost_of_goods: finite_or_zero(self.cost_of_goods),
            shipping_cost: finite_or_zero(self.shipping_cost),
            marketplace_fee_percent: finite_or_zero(self.marketplace_fee_percent),
            marketplace_fee_fixed: finite_or_zero(self.marketplace_fee_fixed),
            ad_fee_percent: finite_or_zero(self.ad_fee_percent),
        }
    }
}

/// Output of [`compute`]. Only ever derived, never built by hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimateResult {
    pub marketplace_fee: f64,
    pub ad_fee: f64,
    pub profit: f64,
    pub roi: f64,
    pub margin: f64,
}

/// Accepts `$1,234.50` style money text. Blank, garbage and non-finite values
/// all come back as `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .map(finite_or_zero)
        .unwrap_or(0.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub fn compute(input: &EstimateInput) -> EstimateResult {
    let input = input.sanitized();
    let sale = input.sale_cost;
    let cog = input.cost_of_goods;

    let marketplace_fee = sale * input.marketplace_fee_percent / 100.0 + input.marketplace_fee_fixed;
    let ad_fee = sale * input.ad_fee_percent / 100.0;
    let profit = sale - (cog + input.shipping_cost + marketplace_fee + ad_fee);
    let roi = if cog > 0.0 { profit / cog * 100.0 } else { 0.0 };
    let margin = if sale > 0.0 { profit / sale * 100.0 } else { 0.0 };

    EstimateResult {
        marketplace_fee,
        ad_fee,
        profit,
        roi,
        margin,
    }
}

impl EstimateResult {
    /// One-line text shown in the estimator output binding.
    pub fn summary(&self) -> String {
        format!(
            "Fees ${:.2} · Ads ${:.2} · Profit ${:.2} · ROI {:.2}% · Margin {:.2}%",
            self.marketplace_fee, self.ad_fee, self.profit, self.roi, self.margin
        )
    }

    pub fn verdict(&self) -> ProfitVerdict {
        let status = if self.profit <= 0.0 {
            VerdictStatus::Loss
        } else if self.margin < THIN_MARGIN_PCT {
            VerdictStatus::Thin
        } else {
            VerdictStatus::Good
        };

        let rationale = match status {
            VerdictStatus::Loss => format!("Loses ${:.2} after fees and shipping", -self.profit),
            VerdictStatus::Thin => format!(
                "Margin {:.1}% is under the {:.0}% comfort line",
                self.margin, THIN_MARGIN_PCT
            ),
            VerdictStatus::Good => format!("Clears ${:.2} at {:.1}% margin", self.profit, self.margin),
        };

        ProfitVerdict { status, rationale }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfitVerdict {
    pub status: VerdictStatus,
    pub rationale: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerdictStatus {
    Good,
    Thin,
    Loss,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn input(sale: f64, cog: f64, ship: f64, fee_pct: f64, fee_fixed: f64, ad_pct: f64) -> EstimateInput {
        EstimateInput {
            sale_cost: sale,
            cost_of_goods: cog,
            shipping_cost: ship,
            marketplace_fee_percent: fee_pct,
            marketplace_fee_fixed: fee_fixed,
            ad_fee_percent: ad_pct,
        }
    }

    #[test]
    fn typical_flip_matches_hand_calculation() {
        let result = compute(&input(25.0, 8.0, 6.5, 12.9, 0.30, 2.0));

        assert!(close(result.marketplace_fee, 3.525));
        assert!(close(result.ad_fee, 0.50));
        assert!(close(result.profit, 6.475));
        assert!(close(result.margin, 25.9));
        assert!(close(result.roi, 80.9375));
        assert!(result.summary().contains("Margin 25.90%"));
        assert_eq!(result.verdict().status, VerdictStatus::Good);
    }

    #[test]
    fn zero_sale_keeps_margin_at_zero() {
        let result = compute(&input(0.0, 5.0, 0.0, 0.0, 0.0, 0.0));

        assert_eq!(result.marketplace_fee, 0.0);
        assert_eq!(result.ad_fee, 0.0);
        assert_eq!(result.profit, -5.0);
        assert_eq!(result.roi, -100.0);
        assert_eq!(result.margin, 0.0);
        assert_eq!(result.verdict().status, VerdictStatus::Loss);
    }

    #[test]
    fn profit_identity_holds_for_signed_inputs() {
        let cases = [
            input(25.0, 8.0, 6.5, 12.9, 0.30, 2.0),
            input(-10.0, 3.0, -2.0, 15.0, 0.0, 1.5),
            input(100.0, -20.0, 0.0, -5.0, -1.0, 0.0),
            input(0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        ];

        for case in cases {
            let result = compute(&case);
            let expected = case.sale_cost
                - (case.cost_of_goods + case.shipping_cost + result.marketplace_fee + result.ad_fee);
            assert_eq!(result.profit, expected);
        }
    }

    #[test]
    fn roi_and_margin_guard_non_positive_bases() {
        let negative_cog = compute(&input(40.0, -3.0, 0.0, 0.0, 0.0, 0.0));
        assert_eq!(negative_cog.roi, 0.0);

        let negative_sale = compute(&input(-40.0, 3.0, 0.0, 0.0, 0.0, 0.0));
        assert_eq!(negative_sale.margin, 0.0);
        assert!(negative_sale.roi < 0.0);
    }

    #[test]
    fn compute_is_repeatable() {
        let case = input(19.99, 4.25, 5.1, 13.25, 0.4, 3.0);
        assert_eq!(compute(&case), compute(&case));
    }

    #[test]
    fn non_finite_inputs_count_as_zero() {
        let poisoned = input(f64::NAN, f64::INFINITY, 1.0, 0.0, 0.0, 0.0);
        let clean = input(0.0, 0.0, 1.0, 0.0, 0.0, 0.0);
        assert_eq!(compute(&poisoned), compute(&clean));
    }

    #[test]
    fn parse_amount_is_lenient() {
        assert_eq!(parse_amount(" $1,234.50 "), 1234.5);
        assert_eq!(parse_amount("-2"), -2.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("twelve"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
    }

    #[test]
    fn from_fields_coerces_each_field_independently() {
        let fields = EstimateFields {
            sale_price: "25".into(),
            cost_of_goods: "abc".into(),
            shipping: "$6.50".into(),
            marketplace_fee_percent: "12.9".into(),
            marketplace_fee_fixed: "".into(),
            ad_fee_percent: "2".into(),
        };

        let parsed = EstimateInput::from_fields(&fields);
        assert_eq!(parsed.sale_cost, 25.0);
        assert_eq!(parsed.cost_of_goods, 0.0);
        assert_eq!(parsed.shipping_cost, 6.5);
        assert_eq!(parsed.marketplace_fee_fixed, 0.0);
    }

    #[test]
    fn thin_margin_is_flagged() {
        let result = compute(&input(20.0, 16.0, 2.0, 0.0, 0.0, 0.0));
        assert_eq!(result.verdict().status, VerdictStatus::Thin);
    }
}
