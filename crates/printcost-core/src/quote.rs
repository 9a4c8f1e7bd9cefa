//! # Quote
//!
//! Priced items collected into a client proposal.
//!
//! ## Quote Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quote Operations                                     │
//! │                                                                         │
//! │  calculate() ok ──────────► push(item) ─────────► items.push(item)     │
//! │                                                                         │
//! │  Change quantity ─────────► set_quantity(i, n) ─► final_price recomputed│
//! │                                                                         │
//! │  Click Remove ────────────► remove(i) ──────────► items.remove(i)      │
//! │                                                                         │
//! │  Click Clear ─────────────► clear() ────────────► items.clear()        │
//! │                                                                         │
//! │  Items have no identity beyond their position; duplicates are fine.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Record Format
//! A [`QuoteItem`] serializes to a flat JSON object (see [`StoredQuoteItem`]).
//! Reading is tolerant: records written by older versions may lack `price`
//! or `final_price`, and both default sensibly. `final_price` is always
//! recomputed on load.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CostBreakdown, CostCategory, ModelVersion, ParameterSet};
use crate::validation::{validate_item_text, validate_quantity};
use crate::{DEFAULT_MATERIAL, MAX_ITEM_NAME_LEN, MAX_MATERIAL_LEN, UNNAMED_ITEM};

// =============================================================================
// Painting
// =============================================================================

/// Whether the part gets manual painting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Painting {
    #[serde(rename = "Sim")]
    Sim,
    #[default]
    #[serde(rename = "Não")]
    Nao,
}

impl fmt::Display for Painting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Painting::Sim => f.write_str("Sim"),
            Painting::Nao => f.write_str("Não"),
        }
    }
}

impl FromStr for Painting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sim" | "s" | "yes" | "y" | "true" => Ok(Painting::Sim),
            "não" | "nao" | "n" | "no" | "false" => Ok(Painting::Nao),
            other => Err(format!("painting must be Sim or Não, got '{}'", other)),
        }
    }
}

impl From<bool> for Painting {
    fn from(painted: bool) -> Self {
        if painted {
            Painting::Sim
        } else {
            Painting::Nao
        }
    }
}

// =============================================================================
// Item Details
// =============================================================================

/// Presentation data entered alongside the calculation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    pub item_name: String,
    pub material_type: String,
    pub quantity: u32,
    pub painting: Painting,
}

impl ItemDetails {
    /// Validates and normalizes item details.
    ///
    /// ## Rules
    /// - Empty or blank name becomes "Item sem nome"
    /// - Empty material becomes "PLA"
    /// - Quantity must be ≥ 1
    pub fn new(
        item_name: &str,
        material_type: &str,
        quantity: u32,
        painting: Painting,
    ) -> Result<Self, ValidationError> {
        validate_quantity(quantity)?;

        let item_name = match item_name.trim() {
            "" => UNNAMED_ITEM.to_string(),
            name => name.to_string(),
        };
        let material_type = match material_type.trim() {
            "" => DEFAULT_MATERIAL.to_string(),
            material => material.to_string(),
        };
        validate_item_text("item name", &item_name, MAX_ITEM_NAME_LEN)?;
        validate_item_text("material", &material_type, MAX_MATERIAL_LEN)?;

        Ok(ItemDetails {
            item_name,
            material_type,
            quantity,
            painting,
        })
    }
}

impl Default for ItemDetails {
    fn default() -> Self {
        ItemDetails {
            item_name: UNNAMED_ITEM.to_string(),
            material_type: DEFAULT_MATERIAL.to_string(),
            quantity: 1,
            painting: Painting::Nao,
        }
    }
}

// =============================================================================
// Quote Item
// =============================================================================

/// A priced item in a quote.
///
/// ## Invariant
/// `final_price == unit_price() × quantity()`. Quantity and price are only
/// changed through [`QuoteItem::set_quantity`], which recomputes the final
/// price.
///
/// `weight_g`, `print_hours` and `cost_per_hour` stay per unit whatever the
/// quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StoredQuoteItem", from = "StoredQuoteItem")]
pub struct QuoteItem {
    item_name: String,
    material_type: String,
    painting: Painting,
    quantity: u32,
    weight_g: f64,
    print_hours: f64,
    breakdown: CostBreakdown,
    final_price: f64,
}

impl QuoteItem {
    /// Builds an item from a successful calculation.
    pub fn new(details: ItemDetails, params: &ParameterSet, breakdown: CostBreakdown) -> Self {
        let final_price = breakdown.suggested_unit_price * details.quantity as f64;
        QuoteItem {
            item_name: details.item_name,
            material_type: details.material_type,
            painting: details.painting,
            quantity: details.quantity,
            weight_g: params.weight_g,
            print_hours: params.print_hours,
            breakdown,
            final_price,
        }
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn material_type(&self) -> &str {
        &self.material_type
    }

    pub fn painting(&self) -> Painting {
        self.painting
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Filament per unit, in grams.
    pub fn weight_g(&self) -> f64 {
        self.weight_g
    }

    /// Print time per unit, in hours.
    pub fn print_hours(&self) -> f64 {
        self.print_hours
    }

    pub fn breakdown(&self) -> &CostBreakdown {
        &self.breakdown
    }

    /// Suggested price of one unit.
    pub fn unit_price(&self) -> f64 {
        self.breakdown.suggested_unit_price
    }

    /// Unit price times quantity.
    pub fn final_price(&self) -> f64 {
        self.final_price
    }

    /// Changes the quantity and recomputes the final price.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), ValidationError> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        self.final_price = self.breakdown.suggested_unit_price * self.quantity as f64;
    }
}

// =============================================================================
// Stored Quote Item
// =============================================================================

/// On-disk shape of a [`QuoteItem`].
///
/// Every field is optional on read so that partial or older records load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredQuoteItem {
    pub item_name: Option<String>,
    pub material_type: Option<String>,
    pub quantity: Option<i64>,
    pub painting: Option<Painting>,
    pub model: Option<ModelVersion>,
    pub breakdown: BTreeMap<String, f64>,
    pub total_cost: Option<f64>,
    pub complexity_multiplier: Option<f64>,
    pub price: Option<f64>,
    pub cost_per_hour: Option<f64>,
    pub weight_g: Option<f64>,
    pub print_hours: Option<f64>,
    pub final_price: Option<f64>,
}

impl From<QuoteItem> for StoredQuoteItem {
    fn from(item: QuoteItem) -> Self {
        let breakdown = item
            .breakdown
            .categories
            .iter()
            .map(|(category, amount)| (category.label().to_string(), *amount))
            .collect();

        StoredQuoteItem {
            item_name: Some(item.item_name),
            material_type: Some(item.material_type),
            quantity: Some(i64::from(item.quantity)),
            painting: Some(item.painting),
            model: Some(item.breakdown.model),
            breakdown,
            total_cost: Some(item.breakdown.total_production_cost),
            complexity_multiplier: Some(item.breakdown.complexity_multiplier),
            price: Some(item.breakdown.suggested_unit_price),
            cost_per_hour: Some(item.breakdown.cost_per_hour),
            weight_g: Some(item.weight_g),
            print_hours: Some(item.print_hours),
            final_price: Some(item.final_price),
        }
    }
}

impl From<StoredQuoteItem> for QuoteItem {
    fn from(stored: StoredQuoteItem) -> Self {
        let quantity = stored
            .quantity
            .and_then(|q| u32::try_from(q).ok())
            .filter(|q| *q > 0)
            .unwrap_or(1);

        let mut categories = BTreeMap::new();
        for (label, amount) in stored.breakdown {
            match CostCategory::from_label(&label) {
                Some(category) => {
                    categories.insert(category, amount);
                }
                None => warn!(label = %label, "Ignoring unknown cost category in stored item"),
            }
        }

        let total_production_cost = stored
            .total_cost
            .unwrap_or_else(|| categories.values().sum());

        let suggested_unit_price = stored
            .price
            .or_else(|| stored.final_price.map(|total| total / quantity as f64))
            .unwrap_or(0.0);

        let breakdown = CostBreakdown {
            model: stored.model.unwrap_or_default(),
            categories,
            total_production_cost,
            complexity_multiplier: stored.complexity_multiplier.unwrap_or(1.0),
            suggested_unit_price,
            cost_per_hour: stored.cost_per_hour.unwrap_or(0.0),
        };

        let item_name = stored
            .item_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNNAMED_ITEM.to_string());

        QuoteItem {
            item_name,
            material_type: stored.material_type.unwrap_or_default(),
            painting: stored.painting.unwrap_or_default(),
            quantity,
            weight_g: stored.weight_g.unwrap_or(0.0),
            print_hours: stored.print_hours.unwrap_or(0.0),
            final_price: suggested_unit_price * quantity as f64,
            breakdown,
        }
    }
}

// =============================================================================
// Quote
// =============================================================================

/// Ordered list of priced items; order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quote {
    items: Vec<QuoteItem>,
}

impl Quote {
    /// Creates an empty quote.
    pub fn new() -> Self {
        Quote { items: Vec::new() }
    }

    pub fn from_items(items: Vec<QuoteItem>) -> Self {
        Quote { items }
    }

    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }

    pub fn get(&self, position: usize) -> Option<&QuoteItem> {
        self.items.get(position)
    }

    /// Appends an item at the end.
    pub fn push(&mut self, item: QuoteItem) {
        self.items.push(item);
    }

    /// Removes the item at `position`, keeping the others in order.
    pub fn remove(&mut self, position: usize) -> CoreResult<QuoteItem> {
        self.check_position(position)?;
        Ok(self.items.remove(position))
    }

    /// Changes the quantity of the item at `position`.
    pub fn set_quantity(&mut self, position: usize, quantity: u32) -> CoreResult<()> {
        self.check_position(position)?;
        self.items[position].set_quantity(quantity)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of final prices.
    pub fn total(&self) -> f64 {
        self.items.iter().map(QuoteItem::final_price).sum()
    }

    /// Number of units across all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }

    fn check_position(&self, position: usize) -> CoreResult<()> {
        if position >= self.items.len() {
            return Err(CoreError::PositionOutOfRange {
                position,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
