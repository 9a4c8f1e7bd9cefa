//! # Cost Calculation Engine
//!
//! Turns a [`ParameterSet`] into a [`CostBreakdown`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      calculate(params)                                  │
//! │                                                                         │
//! │  1. VALIDATE (every check runs, errors are collected)                   │
//! │     ├── weight_g ≤ 0          → "weight must be > 0"                    │
//! │     └── filament_price ≤ 0    → "filament price must be > 0"            │
//! │         (extended: only checked when weight_g > 0)                      │
//! │                                                                         │
//! │  2. SHARED CATEGORIES                                                   │
//! │     material     = weight_g/1000 × filament_price                      │
//! │     electricity  = power_w/1000 × print_hours × energy_rate            │
//! │     depreciation = printer_value/depreciation_hours × print_hours      │
//! │                                                                         │
//! │  3. MODEL SPECIFIC                                                      │
//! │     Basic:    labor = labor_rate × print_hours                         │
//! │     Extended: labor = labor_rate × active_work_hours                   │
//! │               material × (1 + failure_rate_pct/100)                    │
//! │               + maintenance, + post-processing                         │
//! │                                                                         │
//! │  4. PRICE                                                               │
//! │     production × complexity × (1 + margin_pct/100)                     │
//! │                                                                         │
//! │  5. OVERFLOW CHECK                                                      │
//! │     any amount not finite → "<field> is too large to calculate"         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is a pure function: no I/O, no clock, no randomness.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{ValidationError, ValidationErrors};
use crate::types::{CostBreakdown, CostCategory, CostModel, ExtendedParams, ParameterSet};

/// Prices one unit of a part.
///
/// ## Returns
/// * `Ok(CostBreakdown)` - per-unit costs and suggested price
/// * `Err(ValidationErrors)` - every failed check, never just the first
///
/// ## Example
/// ```rust
/// use printcost_core::engine::calculate;
/// use printcost_core::types::ParameterSet;
///
/// let params = ParameterSet {
///     filament_price: 100.0,
///     weight_g: 50.0,
///     margin_pct: 100.0,
///     ..ParameterSet::default()
/// };
/// let breakdown = calculate(&params).unwrap();
/// assert_eq!(breakdown.total_production_cost, 5.0);
/// assert_eq!(breakdown.suggested_unit_price, 10.0);
/// ```
pub fn calculate(params: &ParameterSet) -> Result<CostBreakdown, ValidationErrors> {
    let p = Sanitized::from(params);

    if let Some(errors) = ValidationErrors::from_vec(validate(&p, &params.model)) {
        debug!(errors = errors.len(), "Calculation rejected");
        return Err(errors);
    }

    let material = p.weight_g / 1000.0 * p.filament_price;
    let electricity = p.power_w / 1000.0 * p.print_hours * p.energy_rate;
    let depreciation = if p.depreciation_hours > 0.0 {
        p.printer_value / p.depreciation_hours * p.print_hours
    } else {
        0.0
    };

    let mut categories = BTreeMap::new();
    categories.insert(CostCategory::Electricity, electricity);
    categories.insert(CostCategory::Depreciation, depreciation);

    let complexity_multiplier = match &params.model {
        CostModel::Basic => {
            categories.insert(CostCategory::Material, material);
            categories.insert(CostCategory::Labor, p.labor_rate * p.print_hours);
            1.0
        }
        CostModel::Extended(ext) => {
            let ext = SanitizedExtended::from(ext);
            categories.insert(
                CostCategory::Material,
                material * (1.0 + ext.failure_rate_pct / 100.0),
            );
            categories.insert(CostCategory::Labor, p.labor_rate * ext.active_work_hours);
            categories.insert(
                CostCategory::Maintenance,
                ext.maintenance_cost_per_hour * p.print_hours,
            );
            categories.insert(CostCategory::PostProcessing, ext.post_processing_cost);
            ext.complexity_multiplier
        }
    };

    let total_production_cost: f64 = categories.values().sum();
    let suggested_unit_price =
        total_production_cost * complexity_multiplier * (1.0 + p.margin_pct / 100.0);
    let cost_per_hour = if p.print_hours > 0.0 {
        total_production_cost / p.print_hours
    } else {
        0.0
    };

    let totals = [
        ("production cost", total_production_cost),
        ("suggested price", suggested_unit_price),
        ("cost per hour", cost_per_hour),
    ];
    if let Some(errors) = ValidationErrors::from_vec(overflowed(&categories, totals)) {
        debug!(errors = errors.len(), "Calculation overflowed");
        return Err(errors);
    }

    debug!(
        model = %params.model.version(),
        total_production_cost,
        suggested_unit_price,
        "Calculated cost breakdown"
    );

    Ok(CostBreakdown {
        model: params.model.version(),
        categories,
        total_production_cost,
        complexity_multiplier,
        suggested_unit_price,
        cost_per_hour,
    })
}

fn validate(p: &Sanitized, model: &CostModel) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let price_required = match model {
        CostModel::Basic => true,
        CostModel::Extended(_) => p.weight_g > 0.0,
    };
    if price_required && p.filament_price <= 0.0 {
        errors.push(ValidationError::must_be_positive("filament price"));
    }
    if p.weight_g <= 0.0 {
        errors.push(ValidationError::must_be_positive("weight"));
    }

    errors
}

/// Amounts that came out as infinity or NaN from finite but huge inputs.
///
/// Overflowing categories are reported by label. The totals are only
/// reported when every category is finite on its own.
fn overflowed(
    categories: &BTreeMap<CostCategory, f64>,
    totals: [(&str, f64); 3],
) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = categories
        .iter()
        .filter(|(_, amount)| !amount.is_finite())
        .map(|(category, _)| ValidationError::TooLarge {
            field: category.label().to_string(),
        })
        .collect();

    if errors.is_empty() {
        if let Some((field, _)) = totals.iter().find(|(_, value)| !value.is_finite()) {
            errors.push(ValidationError::TooLarge {
                field: field.to_string(),
            });
        }
    }
    errors
}

// =============================================================================
// Input Sanitizing
// =============================================================================

/// Non-finite inputs count as zero, like unparsable text does.
fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

struct Sanitized {
    filament_price: f64,
    weight_g: f64,
    print_hours: f64,
    power_w: f64,
    energy_rate: f64,
    labor_rate: f64,
    printer_value: f64,
    depreciation_hours: f64,
    margin_pct: f64,
}

impl From<&ParameterSet> for Sanitized {
    fn from(p: &ParameterSet) -> Self {
        Sanitized {
            filament_price: finite(p.filament_price),
            weight_g: finite(p.weight_g),
            print_hours: finite(p.print_hours),
            power_w: finite(p.power_w),
            energy_rate: finite(p.energy_rate),
            labor_rate: finite(p.labor_rate),
            printer_value: finite(p.printer_value),
            depreciation_hours: finite(p.depreciation_hours),
            margin_pct: finite(p.margin_pct),
        }
    }
}

struct SanitizedExtended {
    active_work_hours: f64,
    maintenance_cost_per_hour: f64,
    failure_rate_pct: f64,
    post_processing_cost: f64,
    complexity_multiplier: f64,
}

impl From<&ExtendedParams> for SanitizedExtended {
    fn from(e: &ExtendedParams) -> Self {
        SanitizedExtended {
            active_work_hours: finite(e.active_work_hours),
            maintenance_cost_per_hour: finite(e.maintenance_cost_per_hour),
            failure_rate_pct: finite(e.failure_rate_pct),
            post_processing_cost: finite(e.post_processing_cost),
            complexity_multiplier: e.complexity.multiplier(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Complexity, ModelVersion};

    const EPS: f64 = 1e-9;

    fn reference_params() -> ParameterSet {
        ParameterSet {
            filament_price: 100.0,
            weight_g: 50.0,
            print_hours: 10.5,
            power_w: 220.0,
            energy_rate: 0.70,
            labor_rate: 40.0,
            printer_value: 1500.0,
            depreciation_hours: 5000.0,
            margin_pct: 100.0,
            model: CostModel::Basic,
        }
    }

    fn extended(params: ParameterSet, ext: ExtendedParams) -> ParameterSet {
        ParameterSet {
            model: CostModel::Extended(ext),
            ..params
        }
    }

    #[test]
    fn test_basic_reference_scenario() {
        let b = calculate(&reference_params()).unwrap();

        assert_eq!(b.model, ModelVersion::Basic);
        assert!((b.amount(CostCategory::Material) - 5.0).abs() < EPS);
        assert!((b.amount(CostCategory::Electricity) - 1.617).abs() < EPS);
        assert!((b.amount(CostCategory::Labor) - 420.0).abs() < EPS);
        // 1500 / 5000 × 10.5
        assert!((b.amount(CostCategory::Depreciation) - 3.15).abs() < EPS);
        assert!((b.total_production_cost - 429.767).abs() < EPS);
        assert!((b.suggested_unit_price - 859.534).abs() < EPS);
        assert!((b.cost_per_hour - 429.767 / 10.5).abs() < EPS);
        assert_eq!(b.complexity_multiplier, 1.0);
    }

    #[test]
    fn test_basic_total_is_exact_sum_and_price_applies_margin() {
        let params = ParameterSet {
            margin_pct: 35.0,
            ..reference_params()
        };
        let b = calculate(&params).unwrap();

        let sum = b.amount(CostCategory::Material)
            + b.amount(CostCategory::Electricity)
            + b.amount(CostCategory::Labor)
            + b.amount(CostCategory::Depreciation);
        assert_eq!(b.total_production_cost, sum);
        assert_eq!(b.suggested_unit_price, b.total_production_cost * (1.0 + 35.0 / 100.0));
        assert_eq!(b.categories.len(), 4);
    }

    #[test]
    fn test_basic_rejects_zero_price_and_weight_together() {
        let params = ParameterSet {
            filament_price: 0.0,
            weight_g: 0.0,
            ..reference_params()
        };
        let errors = calculate(&params).unwrap_err();
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec!["filament price must be > 0", "weight must be > 0"]
        );
    }

    #[test]
    fn test_basic_rejects_negative_values() {
        let params = ParameterSet {
            filament_price: -10.0,
            ..reference_params()
        };
        assert_eq!(calculate(&params).unwrap_err().len(), 1);

        let params = ParameterSet {
            weight_g: -1.0,
            ..reference_params()
        };
        assert_eq!(calculate(&params).unwrap_err().len(), 1);
    }

    #[test]
    fn test_non_finite_inputs_count_as_zero() {
        let params = ParameterSet {
            filament_price: f64::NAN,
            ..reference_params()
        };
        assert!(calculate(&params).is_err());

        let params = ParameterSet {
            power_w: f64::INFINITY,
            ..reference_params()
        };
        let b = calculate(&params).unwrap();
        assert_eq!(b.amount(CostCategory::Electricity), 0.0);
    }

    #[test]
    fn test_huge_inputs_are_rejected_instead_of_overflowing() {
        let params = ParameterSet {
            filament_price: 1e308,
            weight_g: 1e308,
            ..reference_params()
        };
        let messages: Vec<String> = calculate(&params)
            .unwrap_err()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(messages, vec!["Material is too large to calculate"]);

        let params = ParameterSet {
            margin_pct: 1e308,
            ..reference_params()
        };
        let errors = calculate(&params).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[ValidationError::TooLarge {
                field: "suggested price".to_string()
            }]
        );
    }

    #[test]
    fn test_cost_per_hour_zero_without_print_time() {
        let params = ParameterSet {
            print_hours: 0.0,
            ..reference_params()
        };
        let b = calculate(&params).unwrap();
        assert_eq!(b.cost_per_hour, 0.0);

        let ext = extended(params, ExtendedParams {
            active_work_hours: 2.0,
            post_processing_cost: 15.0,
            ..ExtendedParams::default()
        });
        assert_eq!(calculate(&ext).unwrap().cost_per_hour, 0.0);
    }

    #[test]
    fn test_no_depreciation_without_lifetime() {
        let params = ParameterSet {
            depreciation_hours: 0.0,
            ..reference_params()
        };
        let b = calculate(&params).unwrap();
        assert_eq!(b.amount(CostCategory::Depreciation), 0.0);
    }

    #[test]
    fn test_extended_formulas() {
        let params = extended(reference_params(), ExtendedParams {
            active_work_hours: 1.5,
            maintenance_cost_per_hour: 0.5,
            failure_rate_pct: 10.0,
            post_processing_cost: 12.0,
            complexity: Complexity::Moderate,
        });
        let b = calculate(&params).unwrap();

        assert_eq!(b.model, ModelVersion::Extended);
        assert!((b.amount(CostCategory::Material) - 5.5).abs() < EPS);
        assert!((b.amount(CostCategory::Labor) - 60.0).abs() < EPS);
        assert!((b.amount(CostCategory::Maintenance) - 5.25).abs() < EPS);
        assert!((b.amount(CostCategory::PostProcessing) - 12.0).abs() < EPS);

        let production = 5.5 + 1.617 + 60.0 + 3.15 + 5.25 + 12.0;
        assert!((b.total_production_cost - production).abs() < EPS);
        assert!((b.suggested_unit_price - production * 1.25 * 2.0).abs() < EPS);
        // cost per hour ignores the complexity markup
        assert!((b.cost_per_hour - production / 10.5).abs() < EPS);
    }

    #[test]
    fn test_extended_complexity_changes_price_only() {
        let base = ExtendedParams {
            active_work_hours: 1.0,
            ..ExtendedParams::default()
        };
        let simple = calculate(&extended(reference_params(), base.clone())).unwrap();
        let hard = calculate(&extended(reference_params(), ExtendedParams {
            complexity: Complexity::VeryComplex,
            ..base
        }))
        .unwrap();

        assert_eq!(simple.categories, hard.categories);
        assert_eq!(simple.total_production_cost, hard.total_production_cost);
        assert_eq!(simple.cost_per_hour, hard.cost_per_hour);
        assert!((hard.suggested_unit_price - simple.suggested_unit_price * 2.0).abs() < EPS);
    }

    #[test]
    fn test_extended_categories_sum_to_production_cost() {
        let params = extended(reference_params(), ExtendedParams {
            active_work_hours: 3.0,
            maintenance_cost_per_hour: 1.2,
            failure_rate_pct: 7.5,
            post_processing_cost: 4.0,
            complexity: Complexity::Complex,
        });
        let b = calculate(&params).unwrap();
        let sum: f64 = b.categories.values().sum();
        assert_eq!(b.total_production_cost, sum);
        assert_eq!(b.categories.len(), 6);
    }

    #[test]
    fn test_extended_price_check_gated_on_weight() {
        // no weight declared: only the weight error
        let params = extended(
            ParameterSet {
                filament_price: 0.0,
                weight_g: 0.0,
                ..reference_params()
            },
            ExtendedParams::default(),
        );
        let errors = calculate(&params).unwrap_err();
        assert_eq!(errors.errors(), &[ValidationError::must_be_positive("weight")]);

        // weight declared: price is required
        let params = extended(
            ParameterSet {
                filament_price: 0.0,
                ..reference_params()
            },
            ExtendedParams::default(),
        );
        let errors = calculate(&params).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[ValidationError::must_be_positive("filament price")]
        );
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let params = reference_params();
        assert_eq!(calculate(&params).unwrap(), calculate(&params).unwrap());
    }
}
