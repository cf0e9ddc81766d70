//! Static registry of SEBIT models.
//!
//! Each registered model maps to its series, the shape its detail payload must
//! satisfy, and the field that carries its headline amount. The table is plain
//! data; nothing here mutates after start-up.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Declared type of a detail field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string.
    Text,
    /// A decimal number.
    Decimal,
    /// A decimal number or null. The key itself is still required.
    NullableDecimal,
    /// An integer.
    Integer,
    /// An integer or null. The key itself is still required.
    NullableInteger,
    /// A boolean flag.
    Flag,
    /// An optional list of objects, defaulting to empty. When a shape is
    /// given, every element is validated against it.
    Records(Option<&'static [FieldSpec]>),
}

impl FieldKind {
    /// Short label used in catalogues.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Decimal => "decimal",
            Self::NullableDecimal => "decimal?",
            Self::Integer => "integer",
            Self::NullableInteger => "integer?",
            Self::Flag => "boolean",
            Self::Records(None) => "records",
            Self::Records(Some(_)) => "typed records",
        }
    }
}

/// A named, typed field in a detail shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears in the payload.
    pub name: &'static str,
    /// Declared type.
    pub kind: FieldKind,
}

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Text,
    }
}

const fn decimal(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Decimal,
    }
}

const fn nullable_decimal(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::NullableDecimal,
    }
}

const fn integer(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Integer,
    }
}

const fn nullable_integer(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::NullableInteger,
    }
}

const fn flag(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Flag,
    }
}

const fn records(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Records(None),
    }
}

const fn typed_records(name: &'static str, shape: &'static [FieldSpec]) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Records(Some(shape)),
    }
}

/// Which detail variant a model's payload deserializes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailKind {
    /// Declining depreciation asset.
    Dda,
    /// Lease asset measurement.
    Lam,
    /// Resource valuation.
    Rvm,
    /// Consumable expense evaluation.
    Ceem,
    /// Bond depreciation.
    Bdm,
    /// Bad-debt expected loss.
    Belm,
    /// Convertible-bond pricing risk.
    Cprm,
    /// Compound other comprehensive income.
    Cocim,
    /// Foreign exchange revaluation.
    Farex,
    /// Total-cost break-even analysis.
    TctBeam,
    /// Crypto performance revaluation.
    Cpmrv,
    /// Dynamic CAPM beta risk adjustment.
    Dcbpra,
    /// Premium subscription revenue recognition.
    Psras,
    /// Probability-weighted revaluation.
    Lsmrv,
}

/// One registered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelRegistryEntry {
    /// Unique model identifier, e.g. `SEBIT-DDA`.
    pub model: &'static str,
    /// Series the model aggregates under.
    pub series: &'static str,
    /// Variant the validated details deserialize into.
    pub detail_kind: DetailKind,
    /// Fields a valid payload must satisfy.
    pub detail_shape: &'static [FieldSpec],
    /// Field whose value becomes the headline amount.
    pub headline_field: &'static str,
}

/// Series label for depreciation and lease models.
pub const ASSET_AND_DEPRECIATION: &str = "Asset & Depreciation";
/// Series label for expense and bond models.
pub const EXPENSE_AND_PROFITABILITY: &str = "Expense & Profitability";
/// Series label for credit and derivative models.
pub const CAPITAL_AND_RISK_DERIVATIVES: &str = "Capital & Risk Derivatives";
/// Series label for analytics models.
pub const ADVANCED_ANALYTICS: &str = "Advanced Analytics";
/// Series label for revenue recognition models.
pub const INSURANCE_AND_SERVICE_REVENUE: &str = "Insurance & Service Revenue";
/// Series label for probability models.
pub const PROBABILITY_REVALUATION: &str = "Probability Revaluation";

const DDA_SHAPE: &[FieldSpec] = &[
    text("asset_label"),
    records("schedule"),
    decimal("total_depreciation"),
    decimal("total_revaluation_gain_loss"),
    decimal("total_unrecognised_revaluation"),
];

const LAM_SHAPE: &[FieldSpec] = &[
    text("lease_label"),
    records("schedule"),
    decimal("total_revaluation_gain_loss"),
    decimal("total_interest_expense"),
    decimal("total_termination_adjustment"),
];

const RVM_SHAPE: &[FieldSpec] = &[
    text("resource_label"),
    decimal("daily_average_extraction"),
    decimal("standard_extraction_value"),
    decimal("total_extraction_value"),
    decimal("extraction_rate"),
    decimal("market_change_index"),
    decimal("market_sensitivity"),
    decimal("final_revaluation_value"),
];

const CEEM_SHAPE: &[FieldSpec] = &[
    text("expense_label"),
    decimal("daily_average_usage_units"),
    decimal("standard_usage_value_non_quantitative"),
    nullable_decimal("standard_usage_value_quantitative"),
    decimal("selected_standard_usage_value"),
    decimal("total_consumable_usage_value"),
    decimal("adjusted_consumable_usage_value"),
    decimal("usage_change_rate"),
    decimal("market_change_index"),
    decimal("market_sensitivity_value"),
    decimal("final_revaluation_value"),
];

const BDM_SHAPE: &[FieldSpec] = &[
    text("bond_label"),
    decimal("daily_estimated_usage"),
    decimal("estimated_value_ps"),
    decimal("market_beta"),
    decimal("final_book_value"),
    decimal("interest_cost"),
    text("interest_type"),
];

const BELM_SHAPE: &[FieldSpec] = &[
    text("debtor_label"),
    decimal("daily_estimated_repayment"),
    decimal("expected_repayment_at_evaluation"),
    decimal("interest_rate_adjustment"),
    decimal("actual_interest_cost"),
    decimal("preliminary_bad_debt_ratio"),
    decimal("final_bad_debt_ratio"),
];

const CPRM_SHAPE: &[FieldSpec] = &[
    text("exposure_id"),
    decimal("assumed_bad_debt_occurrence_rate"),
    decimal("convertible_bond_rate"),
    decimal("convertible_bond_first_amount"),
    decimal("average_past_bad_debt_recovery"),
    decimal("average_convertible_bond_price"),
    decimal("additional_adjustment_beta"),
    decimal("final_convertible_bond_amount"),
    flag("trigger_applied"),
    decimal("convertible_bond_rate_adjustment"),
    decimal("final_adjusted_convertible_bond_rate"),
];

const QUARTER_ADJUSTMENT_SHAPE: &[FieldSpec] = &[
    integer("quarter_index"),
    decimal("adjustment_value"),
    decimal("pre_compound_balance"),
    decimal("post_compound_balance"),
];

const COCIM_SHAPE: &[FieldSpec] = &[
    text("portfolio_label"),
    decimal("account_ratio"),
    decimal("initial_compound_measurement"),
    typed_records("quarterly_adjustments", QUARTER_ADJUSTMENT_SHAPE),
    decimal("annual_compound_growth_rate"),
    flag("compound_growth_trigger_applied"),
    decimal("compound_adjustment_amount"),
    decimal("final_adjusted_balance"),
];

const FAREX_SHAPE: &[FieldSpec] = &[
    text("contract_id"),
    decimal("last_year_trade_ratio"),
    decimal("current_year_trade_ratio"),
    decimal("export_import_beta"),
    decimal("adjustment_indicator"),
    decimal("inflation_adjusted_rate"),
    decimal("final_adjusted_rate"),
    decimal("revaluation_amount"),
];

const TCT_BEAM_SHAPE: &[FieldSpec] = &[
    text("model_label"),
    integer("evaluation_years"),
    decimal("cumulative_fixed_cost"),
    decimal("cumulative_variable_cost"),
    decimal("cumulative_operating_profit"),
    nullable_integer("break_even_year_index"),
    records("schedule"),
];

const CPMRV_SHAPE: &[FieldSpec] = &[
    text("asset_label"),
    decimal("last_year_average_performance"),
    decimal("current_year_log_ratio"),
    decimal("monthly_growth_risk"),
    text("risk_direction"),
    decimal("relative_asset_risk"),
    decimal("adjusted_crypto_value"),
];

const DCBPRA_SHAPE: &[FieldSpec] = &[
    text("asset_label"),
    decimal("growth_percentage_factor"),
    decimal("real_growth_adjustment"),
    decimal("last_year_average_performance"),
    decimal("current_year_log_ratio"),
    decimal("monthly_growth_risk"),
    decimal("risk_adjustment_component"),
    text("risk_direction"),
    decimal("adjusted_beta"),
    decimal("baseline_capm_return"),
    decimal("adjusted_expected_return"),
];

const PSRAS_SHAPE: &[FieldSpec] = &[
    text("portfolio_label"),
    decimal("assumed_revenue_recognition_rate"),
    decimal("new_subscriber_average_payment"),
    decimal("existing_subscriber_average_payment"),
    decimal("payment_comparison_index"),
    decimal("payment_index_baseline_amount"),
    decimal("pure_performance_break_even"),
    decimal("final_recognised_revenue"),
];

const LSMRV_SHAPE: &[FieldSpec] = &[
    text("evaluation_label"),
    decimal("probability_distribution_a"),
    decimal("probability_distribution_b"),
    decimal("growth_correction_value"),
    decimal("cumulative_adjustment_value"),
    decimal("expected_adjustment_value"),
    decimal("final_adjustment_amount"),
];

/// Every supported model, in catalogue order.
pub static MODEL_REGISTRY: &[ModelRegistryEntry] = &[
    ModelRegistryEntry {
        model: "SEBIT-DDA",
        series: ASSET_AND_DEPRECIATION,
        detail_kind: DetailKind::Dda,
        detail_shape: DDA_SHAPE,
        headline_field: "total_revaluation_gain_loss",
    },
    ModelRegistryEntry {
        model: "SEBIT-LAM",
        series: ASSET_AND_DEPRECIATION,
        detail_kind: DetailKind::Lam,
        detail_shape: LAM_SHAPE,
        headline_field: "total_revaluation_gain_loss",
    },
    ModelRegistryEntry {
        model: "SEBIT-RVM",
        series: ASSET_AND_DEPRECIATION,
        detail_kind: DetailKind::Rvm,
        detail_shape: RVM_SHAPE,
        headline_field: "final_revaluation_value",
    },
    ModelRegistryEntry {
        model: "SEBIT-CEEM",
        series: EXPENSE_AND_PROFITABILITY,
        detail_kind: DetailKind::Ceem,
        detail_shape: CEEM_SHAPE,
        headline_field: "final_revaluation_value",
    },
    ModelRegistryEntry {
        model: "SEBIT-BDM",
        series: EXPENSE_AND_PROFITABILITY,
        detail_kind: DetailKind::Bdm,
        detail_shape: BDM_SHAPE,
        headline_field: "final_book_value",
    },
    ModelRegistryEntry {
        model: "SEBIT-BELM",
        series: EXPENSE_AND_PROFITABILITY,
        detail_kind: DetailKind::Belm,
        detail_shape: BELM_SHAPE,
        headline_field: "final_bad_debt_ratio",
    },
    ModelRegistryEntry {
        model: "SEBIT-CPRM",
        series: CAPITAL_AND_RISK_DERIVATIVES,
        detail_kind: DetailKind::Cprm,
        detail_shape: CPRM_SHAPE,
        headline_field: "final_convertible_bond_amount",
    },
    ModelRegistryEntry {
        model: "SEBIT-C-OCIM",
        series: CAPITAL_AND_RISK_DERIVATIVES,
        detail_kind: DetailKind::Cocim,
        detail_shape: COCIM_SHAPE,
        headline_field: "final_adjusted_balance",
    },
    ModelRegistryEntry {
        model: "SEBIT-FAREX",
        series: CAPITAL_AND_RISK_DERIVATIVES,
        detail_kind: DetailKind::Farex,
        detail_shape: FAREX_SHAPE,
        headline_field: "revaluation_amount",
    },
    ModelRegistryEntry {
        model: "SEBIT-TCT-BEAM",
        series: ADVANCED_ANALYTICS,
        detail_kind: DetailKind::TctBeam,
        detail_shape: TCT_BEAM_SHAPE,
        headline_field: "cumulative_operating_profit",
    },
    ModelRegistryEntry {
        model: "SEBIT-CPMRV",
        series: ADVANCED_ANALYTICS,
        detail_kind: DetailKind::Cpmrv,
        detail_shape: CPMRV_SHAPE,
        headline_field: "adjusted_crypto_value",
    },
    ModelRegistryEntry {
        model: "SEBIT-DCBPRA",
        series: ADVANCED_ANALYTICS,
        detail_kind: DetailKind::Dcbpra,
        detail_shape: DCBPRA_SHAPE,
        headline_field: "adjusted_expected_return",
    },
    ModelRegistryEntry {
        model: "SEBIT-PSRAS",
        series: INSURANCE_AND_SERVICE_REVENUE,
        detail_kind: DetailKind::Psras,
        detail_shape: PSRAS_SHAPE,
        headline_field: "final_recognised_revenue",
    },
    ModelRegistryEntry {
        model: "SEBIT-LSMRV",
        series: PROBABILITY_REVALUATION,
        detail_kind: DetailKind::Lsmrv,
        detail_shape: LSMRV_SHAPE,
        headline_field: "final_adjustment_amount",
    },
];

/// Look up a registered model by identifier.
pub fn lookup(model: &str) -> Option<&'static ModelRegistryEntry> {
    MODEL_REGISTRY.iter().find(|entry| entry.model == model)
}

/// Distinct series labels, in catalogue order.
pub fn series_labels() -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = Vec::new();
    for entry in MODEL_REGISTRY {
        if !labels.contains(&entry.series) {
            labels.push(entry.series);
        }
    }
    labels
}

/// Source of model registry entries.
///
/// The static table is the only production implementation; the trait exists
/// so validation can be exercised against a substitute catalogue.
#[cfg_attr(test, mockall::automock)]
pub trait ModelCatalog {
    /// Find the entry for a model identifier.
    fn lookup(&self, model: &str) -> Option<ModelRegistryEntry>;
    /// Every entry in the catalogue.
    fn entries(&self) -> Vec<ModelRegistryEntry>;
}

/// Catalogue backed by [`MODEL_REGISTRY`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCatalog;

impl ModelCatalog for StaticCatalog {
    fn lookup(&self, model: &str) -> Option<ModelRegistryEntry> {
        lookup(model).copied()
    }

    fn entries(&self) -> Vec<ModelRegistryEntry> {
        MODEL_REGISTRY.to_vec()
    }
}

/// Public description of a detail field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Type label, see [`FieldKind::label`].
    pub kind: String,
}

/// Public description of a registered model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Model identifier.
    pub model: String,
    /// Series label.
    pub series: String,
    /// Headline field name.
    pub headline_field: String,
    /// Detail shape fields.
    pub fields: Vec<FieldDescriptor>,
}

impl From<&ModelRegistryEntry> for ModelDescriptor {
    fn from(entry: &ModelRegistryEntry) -> Self {
        Self {
            model: entry.model.to_string(),
            series: entry.series.to_string(),
            headline_field: entry.headline_field.to_string(),
            fields: entry
                .detail_shape
                .iter()
                .map(|spec| FieldDescriptor {
                    name: spec.name.to_string(),
                    kind: spec.kind.label().to_string(),
                })
                .collect(),
        }
    }
}

/// Describe every model a catalogue knows about.
pub fn describe_catalog(catalog: &dyn ModelCatalog) -> Vec<ModelDescriptor> {
    catalog
        .entries()
        .iter()
        .map(ModelDescriptor::from)
        .collect()
}
