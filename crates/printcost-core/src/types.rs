//! # Domain Types
//!
//! Calculation inputs and outputs.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐            ┌─────────────────────────┐        │
//! │  │    ParameterSet     │ calculate  │     CostBreakdown       │        │
//! │  │  ─────────────────  │ ─────────► │  ─────────────────────  │        │
//! │  │  filament_price     │            │  model                  │        │
//! │  │  weight_g           │            │  categories (ordered)   │        │
//! │  │  print_hours  ...   │            │  total_production_cost  │        │
//! │  │  model: CostModel ──┼──┐         │  suggested_unit_price   │        │
//! │  └─────────────────────┘  │         │  cost_per_hour          │        │
//! │                           ▼         └─────────────────────────┘        │
//! │           ┌──────────────────────────────┐                             │
//! │           │ CostModel                    │                             │
//! │           │  Basic                       │                             │
//! │           │  Extended(ExtendedParams)    │                             │
//! │           │   active_work_hours          │                             │
//! │           │   maintenance_cost_per_hour  │                             │
//! │           │   failure_rate_pct           │                             │
//! │           │   post_processing_cost       │                             │
//! │           │   complexity: Complexity     │                             │
//! │           └──────────────────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Model Version
// =============================================================================

/// Which set of pricing formulas produced a breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVersion {
    /// Material, electricity, labor and depreciation only.
    #[default]
    Basic,
    /// Adds hands-on labor time, failure surcharge, maintenance,
    /// post-processing and a complexity multiplier.
    Extended,
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelVersion::Basic => write!(f, "basic"),
            ModelVersion::Extended => write!(f, "extended"),
        }
    }
}

impl FromStr for ModelVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "v1" => Ok(ModelVersion::Basic),
            "extended" | "v2" => Ok(ModelVersion::Extended),
            other => Err(format!("unknown cost model '{}'", other)),
        }
    }
}

// =============================================================================
// Complexity
// =============================================================================

/// Handling difficulty of a part, applied as a markup on production cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    /// × 1.0
    #[default]
    Simple,
    /// × 1.25
    Moderate,
    /// × 1.5
    Complex,
    /// × 2.0
    VeryComplex,
}

impl Complexity {
    /// All levels, from cheapest to most expensive.
    pub const ALL: [Complexity; 4] = [
        Complexity::Simple,
        Complexity::Moderate,
        Complexity::Complex,
        Complexity::VeryComplex,
    ];

    /// The multiplier applied to production cost.
    pub const fn multiplier(&self) -> f64 {
        match self {
            Complexity::Simple => 1.0,
            Complexity::Moderate => 1.25,
            Complexity::Complex => 1.5,
            Complexity::VeryComplex => 2.0,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
            Complexity::VeryComplex => "very_complex",
        };
        write!(f, "{} (x{})", name, self.multiplier())
    }
}

impl FromStr for Complexity {
    type Err = String;

    /// Accepts a level name or its multiplier (`"1,25"` and `"1.25"` both work).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "simple" => return Ok(Complexity::Simple),
            "moderate" => return Ok(Complexity::Moderate),
            "complex" => return Ok(Complexity::Complex),
            "very_complex" => return Ok(Complexity::VeryComplex),
            _ => {}
        }

        let factor = crate::parse::parse_decimal(&normalized);
        Complexity::ALL
            .into_iter()
            .find(|level| (level.multiplier() - factor).abs() < f64::EPSILON)
            .ok_or_else(|| {
                format!(
                    "unknown complexity '{}' (expected simple, moderate, complex, very_complex or 1/1.25/1.5/2)",
                    s.trim()
                )
            })
    }
}

// =============================================================================
// Parameter Set
// =============================================================================

/// Inputs only the extended model reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedParams {
    /// Hands-on labor time in hours (not the unattended print time).
    pub active_work_hours: f64,

    /// Maintenance reserve per printing hour.
    pub maintenance_cost_per_hour: f64,

    /// Expected share of failed prints, in percent.
    pub failure_rate_pct: f64,

    /// Flat finishing cost (sanding, supports removal, ...).
    pub post_processing_cost: f64,

    pub complexity: Complexity,
}

/// Model selector carrying the model-specific inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "version", rename_all = "snake_case")]
pub enum CostModel {
    #[default]
    Basic,
    Extended(ExtendedParams),
}

impl CostModel {
    /// Returns the version tag.
    pub fn version(&self) -> ModelVersion {
        match self {
            CostModel::Basic => ModelVersion::Basic,
            CostModel::Extended(_) => ModelVersion::Extended,
        }
    }
}

/// Everything the engine needs to price one unit of a part.
///
/// All values are per unit; quantity is applied later on the quote item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Filament price per kilogram.
    pub filament_price: f64,

    /// Filament used, in grams.
    pub weight_g: f64,

    /// Printing time in decimal hours.
    pub print_hours: f64,

    /// Printer power draw in watts.
    pub power_w: f64,

    /// Energy tariff per kWh.
    pub energy_rate: f64,

    /// Labor cost per hour.
    pub labor_rate: f64,

    /// Purchase value of the printer.
    pub printer_value: f64,

    /// Expected printer lifetime in hours.
    pub depreciation_hours: f64,

    /// Profit margin in percent.
    pub margin_pct: f64,

    pub model: CostModel,
}

// =============================================================================
// Cost Category
// =============================================================================

/// A line of the cost breakdown.
///
/// Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    #[serde(rename = "Material")]
    Material,
    #[serde(rename = "Eletricidade")]
    Electricity,
    #[serde(rename = "Mão de obra")]
    Labor,
    #[serde(rename = "Depreciação")]
    Depreciation,
    #[serde(rename = "Manutenção")]
    Maintenance,
    #[serde(rename = "Pós-processamento")]
    PostProcessing,
}

impl CostCategory {
    /// Label used in persisted records and on documents.
    pub const fn label(&self) -> &'static str {
        match self {
            CostCategory::Material => "Material",
            CostCategory::Electricity => "Eletricidade",
            CostCategory::Labor => "Mão de obra",
            CostCategory::Depreciation => "Depreciação",
            CostCategory::Maintenance => "Manutenção",
            CostCategory::PostProcessing => "Pós-processamento",
        }
    }

    /// Looks a category up by its label.
    pub fn from_label(label: &str) -> Option<Self> {
        [
            CostCategory::Material,
            CostCategory::Electricity,
            CostCategory::Labor,
            CostCategory::Depreciation,
            CostCategory::Maintenance,
            CostCategory::PostProcessing,
        ]
        .into_iter()
        .find(|c| c.label() == label)
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Cost Breakdown
// =============================================================================

/// Result of a successful calculation, for one unit.
///
/// ## Invariant
/// The category amounts sum to `total_production_cost`. The complexity
/// multiplier and the margin only show up in `suggested_unit_price`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub model: ModelVersion,

    pub categories: BTreeMap<CostCategory, f64>,

    /// Sum of all categories (before complexity and margin).
    pub total_production_cost: f64,

    /// 1.0 for the basic model.
    pub complexity_multiplier: f64,

    pub suggested_unit_price: f64,

    /// Production cost per printing hour; 0 when print time is 0.
    pub cost_per_hour: f64,
}

impl CostBreakdown {
    /// Amount of one category, 0 when the model does not produce it.
    pub fn amount(&self, category: CostCategory) -> f64 {
        self.categories.get(&category).copied().unwrap_or(0.0)
    }

    /// Production cost after the complexity multiplier, before margin.
    pub fn cost_with_complexity(&self) -> f64 {
        self.total_production_cost * self.complexity_multiplier
    }

    /// The part of the price that is profit.
    pub fn margin_amount(&self) -> f64 {
        self.suggested_unit_price - self.cost_with_complexity()
    }

    /// Fraction of production cost per category, in display order.
    ///
    /// Empty when production cost is zero. This is what a pie chart of the
    /// breakdown plots.
    pub fn category_shares(&self) -> Vec<(CostCategory, f64)> {
        if self.total_production_cost <= 0.0 {
            return Vec::new();
        }
        self.categories
            .iter()
            .map(|(category, amount)| (*category, amount / self.total_production_cost))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_multipliers() {
        assert_eq!(Complexity::Simple.multiplier(), 1.0);
        assert_eq!(Complexity::Moderate.multiplier(), 1.25);
        assert_eq!(Complexity::Complex.multiplier(), 1.5);
        assert_eq!(Complexity::VeryComplex.multiplier(), 2.0);
    }

    #[test]
    fn test_complexity_from_str() {
        assert_eq!("moderate".parse::<Complexity>().unwrap(), Complexity::Moderate);
        assert_eq!("very-complex".parse::<Complexity>().unwrap(), Complexity::VeryComplex);
        assert_eq!("1,5".parse::<Complexity>().unwrap(), Complexity::Complex);
        assert_eq!("2".parse::<Complexity>().unwrap(), Complexity::VeryComplex);
        assert!("1.75".parse::<Complexity>().is_err());
        assert!("hard".parse::<Complexity>().is_err());
    }

    #[test]
    fn test_category_labels_round_trip() {
        for label in ["Material", "Eletricidade", "Mão de obra", "Depreciação"] {
            let category = CostCategory::from_label(label).unwrap();
            assert_eq!(category.label(), label);
        }
        assert!(CostCategory::from_label("Frete").is_none());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&CostCategory::Labor).unwrap();
        assert_eq!(json, "\"Mão de obra\"");
    }

    #[test]
    fn test_model_version_from_str() {
        assert_eq!("basic".parse::<ModelVersion>().unwrap(), ModelVersion::Basic);
        assert_eq!("Extended".parse::<ModelVersion>().unwrap(), ModelVersion::Extended);
        assert!("v3".parse::<ModelVersion>().is_err());
    }

    #[test]
    fn test_category_shares() {
        let mut categories = BTreeMap::new();
        categories.insert(CostCategory::Material, 30.0);
        categories.insert(CostCategory::Labor, 70.0);
        let breakdown = CostBreakdown {
            model: ModelVersion::Basic,
            categories,
            total_production_cost: 100.0,
            complexity_multiplier: 1.0,
            suggested_unit_price: 150.0,
            cost_per_hour: 10.0,
        };

        let shares = breakdown.category_shares();
        assert_eq!(shares, vec![(CostCategory::Material, 0.3), (CostCategory::Labor, 0.7)]);
        assert_eq!(breakdown.margin_amount(), 50.0);
        assert_eq!(breakdown.amount(CostCategory::Maintenance), 0.0);
    }
}
