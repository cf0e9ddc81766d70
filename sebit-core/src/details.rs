//! Model-specific detail payloads.
//!
//! Field names mirror the model outputs verbatim; the declared type of each
//! field lives in the registry shape for the model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::registry::DetailKind;

/// Loosely typed record, used for model schedules.
pub type Record = Map<String, Value>;

/// Details for `SEBIT-DDA`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DdaDetails {
    /// Asset identifier.
    pub asset_label: String,
    /// Per-period schedule rows.
    #[serde(default)]
    pub schedule: Vec<Record>,
    /// Depreciation over the whole schedule.
    pub total_depreciation: f64,
    /// Net revaluation gain or loss.
    pub total_revaluation_gain_loss: f64,
    /// Revaluation not yet recognised.
    pub total_unrecognised_revaluation: f64,
}

/// Details for `SEBIT-LAM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LamDetails {
    /// Lease identifier.
    pub lease_label: String,
    /// Per-period schedule rows.
    #[serde(default)]
    pub schedule: Vec<Record>,
    /// Net revaluation gain or loss.
    pub total_revaluation_gain_loss: f64,
    /// Interest expense over the lease term.
    pub total_interest_expense: f64,
    /// Adjustment booked on early termination.
    pub total_termination_adjustment: f64,
}

/// Details for `SEBIT-RVM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RvmDetails {
    /// Resource identifier.
    pub resource_label: String,
    /// Average units extracted per day.
    pub daily_average_extraction: f64,
    /// Value of the standard extraction volume.
    pub standard_extraction_value: f64,
    /// Value of everything extracted.
    pub total_extraction_value: f64,
    /// Extracted share of the standard volume.
    pub extraction_rate: f64,
    /// Market movement over the period.
    pub market_change_index: f64,
    /// Sensitivity to the market index.
    pub market_sensitivity: f64,
    /// Revalued amount.
    pub final_revaluation_value: f64,
}

/// Details for `SEBIT-CEEM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeemDetails {
    /// Expense identifier.
    pub expense_label: String,
    /// Average units consumed per day.
    pub daily_average_usage_units: f64,
    /// Standard usage value without quantity data.
    pub standard_usage_value_non_quantitative: f64,
    /// Standard usage value from quantity data, when available.
    pub standard_usage_value_quantitative: Option<f64>,
    /// Standard usage value the evaluation used.
    pub selected_standard_usage_value: f64,
    /// Value of all consumables used.
    pub total_consumable_usage_value: f64,
    /// Usage value after market adjustment.
    pub adjusted_consumable_usage_value: f64,
    /// Change in usage against the standard.
    pub usage_change_rate: f64,
    /// Market movement over the period.
    pub market_change_index: f64,
    /// Sensitivity to the market index.
    pub market_sensitivity_value: f64,
    /// Revalued amount.
    pub final_revaluation_value: f64,
}

/// Details for `SEBIT-BDM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BdmDetails {
    /// Bond identifier.
    pub bond_label: String,
    /// Estimated daily usage.
    pub daily_estimated_usage: f64,
    /// Estimated value per share.
    pub estimated_value_ps: f64,
    /// Market beta.
    pub market_beta: f64,
    /// Book value at evaluation.
    pub final_book_value: f64,
    /// Interest cost.
    pub interest_cost: f64,
    /// Fixed or floating, as reported.
    pub interest_type: String,
}

/// Details for `SEBIT-BELM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BelmDetails {
    /// Debtor identifier.
    pub debtor_label: String,
    /// Estimated daily repayment.
    pub daily_estimated_repayment: f64,
    /// Repayment expected by the evaluation date.
    pub expected_repayment_at_evaluation: f64,
    /// Adjustment applied to the contract rate.
    pub interest_rate_adjustment: f64,
    /// Interest cost after adjustment.
    pub actual_interest_cost: f64,
    /// Bad-debt ratio before adjustment.
    pub preliminary_bad_debt_ratio: f64,
    /// Bad-debt ratio.
    pub final_bad_debt_ratio: f64,
}

/// Details for `SEBIT-CPRM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CprmDetails {
    /// Exposure identifier.
    pub exposure_id: String,
    /// Assumed rate of bad-debt events.
    pub assumed_bad_debt_occurrence_rate: f64,
    /// Conversion rate.
    pub convertible_bond_rate: f64,
    /// Initial convertible amount.
    pub convertible_bond_first_amount: f64,
    /// Historical average recovery.
    pub average_past_bad_debt_recovery: f64,
    /// Average bond price.
    pub average_convertible_bond_price: f64,
    /// Extra beta applied when the trigger fires.
    pub additional_adjustment_beta: f64,
    /// Convertible amount after adjustment.
    pub final_convertible_bond_amount: f64,
    /// Whether the adjustment trigger fired.
    pub trigger_applied: bool,
    /// Adjustment to the conversion rate.
    pub convertible_bond_rate_adjustment: f64,
    /// Conversion rate after adjustment.
    pub final_adjusted_convertible_bond_rate: f64,
}

/// One quarter of a `SEBIT-C-OCIM` compounding schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocimQuarterAdjustment {
    /// Quarter number, starting at 1.
    pub quarter_index: i64,
    /// Adjustment booked in the quarter.
    pub adjustment_value: f64,
    /// Balance before compounding.
    pub pre_compound_balance: f64,
    /// Balance after compounding.
    pub post_compound_balance: f64,
}

/// Details for `SEBIT-C-OCIM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocimDetails {
    /// Portfolio identifier.
    pub portfolio_label: String,
    /// Share of the account under measurement.
    pub account_ratio: f64,
    /// Opening measured balance.
    pub initial_compound_measurement: f64,
    /// Quarter-by-quarter compounding schedule.
    #[serde(default)]
    pub quarterly_adjustments: Vec<CocimQuarterAdjustment>,
    /// Annualised compound growth.
    pub annual_compound_growth_rate: f64,
    /// Whether the growth trigger fired.
    pub compound_growth_trigger_applied: bool,
    /// Amount added by compounding.
    pub compound_adjustment_amount: f64,
    /// Balance after compounding.
    pub final_adjusted_balance: f64,
}

/// Details for `SEBIT-FAREX`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarexDetails {
    /// Contract identifier.
    pub contract_id: String,
    /// Trade ratio for the previous year.
    pub last_year_trade_ratio: f64,
    /// Trade ratio for the current year.
    pub current_year_trade_ratio: f64,
    /// Export/import sensitivity.
    pub export_import_beta: f64,
    /// Direction and size of the rate adjustment.
    pub adjustment_indicator: f64,
    /// Rate after inflation.
    pub inflation_adjusted_rate: f64,
    /// Rate applied to the revaluation.
    pub final_adjusted_rate: f64,
    /// Revalued amount.
    pub revaluation_amount: f64,
}

/// Details for `SEBIT-TCT-BEAM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TctBeamDetails {
    /// Scenario identifier.
    pub model_label: String,
    /// Number of years evaluated.
    pub evaluation_years: i64,
    /// Fixed cost over all years.
    pub cumulative_fixed_cost: f64,
    /// Variable cost over all years.
    pub cumulative_variable_cost: f64,
    /// Operating profit over all years.
    pub cumulative_operating_profit: f64,
    /// First profitable year, if any.
    pub break_even_year_index: Option<i64>,
    /// Per-period schedule rows.
    #[serde(default)]
    pub schedule: Vec<Record>,
}

/// Details for `SEBIT-CPMRV`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpmrvDetails {
    /// Asset identifier.
    pub asset_label: String,
    /// Average performance for the previous year.
    pub last_year_average_performance: f64,
    /// Log return for the current year.
    pub current_year_log_ratio: f64,
    /// Monthly growth volatility.
    pub monthly_growth_risk: f64,
    /// Upside or downside, as reported.
    pub risk_direction: String,
    /// Risk relative to the market.
    pub relative_asset_risk: f64,
    /// Value after risk adjustment.
    pub adjusted_crypto_value: f64,
}

/// Details for `SEBIT-DCBPRA`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcbpraDetails {
    /// Asset identifier.
    pub asset_label: String,
    /// Growth factor in percent.
    pub growth_percentage_factor: f64,
    /// Growth adjustment net of inflation.
    pub real_growth_adjustment: f64,
    /// Average performance for the previous year.
    pub last_year_average_performance: f64,
    /// Log return for the current year.
    pub current_year_log_ratio: f64,
    /// Monthly growth volatility.
    pub monthly_growth_risk: f64,
    /// Risk term added to beta.
    pub risk_adjustment_component: f64,
    /// Upside or downside, as reported.
    pub risk_direction: String,
    /// Beta after risk adjustment.
    pub adjusted_beta: f64,
    /// CAPM return before adjustment.
    pub baseline_capm_return: f64,
    /// Expected return after adjustment.
    pub adjusted_expected_return: f64,
}

/// Details for `SEBIT-PSRAS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsrasDetails {
    /// Portfolio identifier.
    pub portfolio_label: String,
    /// Assumed recognition rate.
    pub assumed_revenue_recognition_rate: f64,
    /// Average payment of new subscribers.
    pub new_subscriber_average_payment: f64,
    /// Average payment of existing subscribers.
    pub existing_subscriber_average_payment: f64,
    /// Relative gap between new and existing payments.
    pub payment_comparison_index: f64,
    /// Baseline the payment index applies to.
    pub payment_index_baseline_amount: f64,
    /// Break-even revenue from performance alone.
    pub pure_performance_break_even: f64,
    /// Recognised revenue.
    pub final_recognised_revenue: f64,
}

/// Details for `SEBIT-LSMRV`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LsmrvDetails {
    /// Scenario identifier.
    pub evaluation_label: String,
    /// Probability weight of outcome A.
    pub probability_distribution_a: f64,
    /// Probability weight of outcome B.
    pub probability_distribution_b: f64,
    /// Growth correction factor.
    pub growth_correction_value: f64,
    /// Adjustment accumulated so far.
    pub cumulative_adjustment_value: f64,
    /// Probability-weighted adjustment.
    pub expected_adjustment_value: f64,
    /// Adjustment amount.
    pub final_adjustment_amount: f64,
}

/// Validated detail payload, one variant per registered shape.
///
/// Serializes as the bare inner object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelDetails {
    /// `SEBIT-DDA`.
    Dda(DdaDetails),
    /// `SEBIT-LAM`.
    Lam(LamDetails),
    /// `SEBIT-RVM`.
    Rvm(RvmDetails),
    /// `SEBIT-CEEM`.
    Ceem(CeemDetails),
    /// `SEBIT-BDM`.
    Bdm(BdmDetails),
    /// `SEBIT-BELM`.
    Belm(BelmDetails),
    /// `SEBIT-CPRM`.
    Cprm(CprmDetails),
    /// `SEBIT-C-OCIM`.
    Cocim(CocimDetails),
    /// `SEBIT-FAREX`.
    Farex(FarexDetails),
    /// `SEBIT-TCT-BEAM`.
    TctBeam(TctBeamDetails),
    /// `SEBIT-CPMRV`.
    Cpmrv(CpmrvDetails),
    /// `SEBIT-DCBPRA`.
    Dcbpra(DcbpraDetails),
    /// `SEBIT-PSRAS`.
    Psras(PsrasDetails),
    /// `SEBIT-LSMRV`.
    Lsmrv(LsmrvDetails),
}

impl ModelDetails {
    /// Deserialize an already shape-checked object into the variant for `kind`.
    pub fn from_value(kind: DetailKind, value: Value) -> serde_json::Result<Self> {
        Ok(match kind {
            DetailKind::Dda => Self::Dda(serde_json::from_value(value)?),
            DetailKind::Lam => Self::Lam(serde_json::from_value(value)?),
            DetailKind::Rvm => Self::Rvm(serde_json::from_value(value)?),
            DetailKind::Ceem => Self::Ceem(serde_json::from_value(value)?),
            DetailKind::Bdm => Self::Bdm(serde_json::from_value(value)?),
            DetailKind::Belm => Self::Belm(serde_json::from_value(value)?),
            DetailKind::Cprm => Self::Cprm(serde_json::from_value(value)?),
            DetailKind::Cocim => Self::Cocim(serde_json::from_value(value)?),
            DetailKind::Farex => Self::Farex(serde_json::from_value(value)?),
            DetailKind::TctBeam => Self::TctBeam(serde_json::from_value(value)?),
            DetailKind::Cpmrv => Self::Cpmrv(serde_json::from_value(value)?),
            DetailKind::Dcbpra => Self::Dcbpra(serde_json::from_value(value)?),
            DetailKind::Psras => Self::Psras(serde_json::from_value(value)?),
            DetailKind::Lsmrv => Self::Lsmrv(serde_json::from_value(value)?),
        })
    }

    /// The registry kind this variant belongs to.
    pub fn kind(&self) -> DetailKind {
        match self {
            Self::Dda(_) => DetailKind::Dda,
            Self::Lam(_) => DetailKind::Lam,
            Self::Rvm(_) => DetailKind::Rvm,
            Self::Ceem(_) => DetailKind::Ceem,
            Self::Bdm(_) => DetailKind::Bdm,
            Self::Belm(_) => DetailKind::Belm,
            Self::Cprm(_) => DetailKind::Cprm,
            Self::Cocim(_) => DetailKind::Cocim,
            Self::Farex(_) => DetailKind::Farex,
            Self::TctBeam(_) => DetailKind::TctBeam,
            Self::Cpmrv(_) => DetailKind::Cpmrv,
            Self::Dcbpra(_) => DetailKind::Dcbpra,
            Self::Psras(_) => DetailKind::Psras,
            Self::Lsmrv(_) => DetailKind::Lsmrv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_details_serialize_without_variant_tag() {
        let details = ModelDetails::from_value(
            DetailKind::Lsmrv,
            json!({
                "evaluation_label": "scenario-a",
                "probability_distribution_a": 0.6,
                "probability_distribution_b": 0.4,
                "growth_correction_value": 1.2,
                "cumulative_adjustment_value": 10.0,
                "expected_adjustment_value": 12.5,
                "final_adjustment_amount": 15.0,
            }),
        )
        .expect("lsmrv details");
        assert_eq!(details.kind(), DetailKind::Lsmrv);

        let value = serde_json::to_value(&details).expect("serialize");
        assert_eq!(value["evaluation_label"], "scenario-a");
        assert_eq!(value["final_adjustment_amount"], 15.0);
        assert!(value.get("Lsmrv").is_none());
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let result = ModelDetails::from_value(
            DetailKind::Bdm,
            json!({ "asset_label": "facility-line-1" }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn schedule_defaults_to_empty() {
        let details = ModelDetails::from_value(
            DetailKind::Dda,
            json!({
                "asset_label": "facility-line-1",
                "total_depreciation": 233449.88,
                "total_revaluation_gain_loss": 5400.25,
                "total_unrecognised_revaluation": 250.0,
            }),
        )
        .expect("dda details");
        match details {
            ModelDetails::Dda(dda) => assert!(dda.schedule.is_empty()),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
