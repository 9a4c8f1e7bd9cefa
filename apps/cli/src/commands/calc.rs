//! `printcost calc`
//!
//! Prices one part and optionally appends it to the quote.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use printcost_core::parse::{parse_decimal, parse_duration, parse_quantity};
use printcost_core::{
    calculate, format_currency, CostBreakdown, CostModel, ExtendedParams,
    ItemDetails, ModelVersion, Painting, ParameterSet, QuoteItem,
};
use printcost_db::QuoteStore;
use tracing::{info, warn};

use crate::cli::CalcArgs;
use crate::error::AppResult;
use crate::state::{AppConfig, QuoteSession};

pub async fn run<S: QuoteStore>(
    args: &CalcArgs,
    config: &AppConfig,
    session: &mut QuoteSession<S>,
) -> AppResult<()> {
    let ignored = ignored_extended_options(args);
    if !ignored.is_empty() {
        warn!(
            options = %ignored.join(", "),
            "Options only read by the extended model were ignored (use --model extended)"
        );
    }

    let params = build_params(args, config);
    let breakdown = calculate(&params)?;
    let quantity = item_quantity(args);

    println!("{}", breakdown_table(&breakdown, quantity));

    if args.add {
        let details = item_details(args, config, quantity)?;
        let item = QuoteItem::new(details, &params, breakdown);
        let name = item.item_name().to_string();
        let final_price = item.final_price();

        session.add(item).await?;
        info!(item = %name, total = session.quote().total(), "Item added to quote");
        println!(
            "\n'{}' adicionado ao orçamento ({}). Total do orçamento: {}",
            name,
            format_currency(final_price),
            format_currency(session.quote().total())
        );
    }

    Ok(())
}

/// Merges the command-line values over the configured defaults.
///
/// Values given on the command line are read leniently, so an unreadable
/// number becomes 0 and is then caught by the engine's validation.
pub fn build_params(args: &CalcArgs, config: &AppConfig) -> ParameterSet {
    let format = args
        .duration_format
        .unwrap_or(config.input.duration_format);
    let mut params = config.defaults.parameter_set();

    let number = |value: &Option<String>, default: f64| {
        value.as_deref().map(parse_decimal).unwrap_or(default)
    };
    let duration = |value: &Option<String>| {
        value
            .as_deref()
            .map(|text| parse_duration(text, format))
            .unwrap_or(0.0)
    };

    params.filament_price = number(&args.filament_price, params.filament_price);
    params.weight_g = number(&args.weight, 0.0);
    params.print_hours = duration(&args.time);
    params.power_w = number(&args.power, params.power_w);
    params.energy_rate = number(&args.energy_rate, params.energy_rate);
    params.labor_rate = number(&args.labor_rate, params.labor_rate);
    params.printer_value = number(&args.printer_value, params.printer_value);
    params.depreciation_hours = number(&args.depreciation_hours, params.depreciation_hours);
    params.margin_pct = number(&args.margin, params.margin_pct);

    params.model = match args.model {
        ModelVersion::Basic => CostModel::Basic,
        ModelVersion::Extended => CostModel::Extended(ExtendedParams {
            active_work_hours: duration(&args.active_time),
            maintenance_cost_per_hour: number(&args.maintenance_rate, 0.0),
            failure_rate_pct: number(&args.failure_rate, 0.0),
            post_processing_cost: number(&args.post_processing, 0.0),
            complexity: args.complexity.unwrap_or_default(),
        }),
    };

    params
}

/// Extended-model options given while the basic model is selected.
pub fn ignored_extended_options(args: &CalcArgs) -> Vec<&'static str> {
    if args.model == ModelVersion::Extended {
        return Vec::new();
    }

    [
        ("--active-time", args.active_time.is_some()),
        ("--maintenance-rate", args.maintenance_rate.is_some()),
        ("--failure-rate", args.failure_rate.is_some()),
        ("--post-processing", args.post_processing.is_some()),
        ("--complexity", args.complexity.is_some()),
    ]
    .into_iter()
    .filter_map(|(flag, given)| given.then_some(flag))
    .collect()
}

fn item_quantity(args: &CalcArgs) -> u32 {
    args.quantity.as_deref().map(parse_quantity).unwrap_or(1)
}

fn item_details(args: &CalcArgs, config: &AppConfig, quantity: u32) -> AppResult<ItemDetails> {
    let material = args
        .material
        .as_deref()
        .unwrap_or(&config.defaults.material);
    let details = ItemDetails::new(
        args.name.as_deref().unwrap_or_default(),
        material,
        quantity,
        Painting::from(args.painted),
    )?;
    Ok(details)
}

/// Cost lines with their share of production cost, then the totals.
///
/// Categories that came out as zero are left out.
pub fn breakdown_table(breakdown: &CostBreakdown, quantity: u32) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Custo").fg(Color::Cyan),
            Cell::new("Valor").fg(Color::Cyan),
            Cell::new("%").fg(Color::Cyan),
        ]);

    for (category, share) in breakdown.category_shares() {
        let amount = breakdown.amount(category);
        if amount > 0.0 {
            table.add_row(vec![
                Cell::new(category.label()),
                Cell::new(format_currency(amount)),
                Cell::new(format!("{:.1}%", share * 100.0)),
            ]);
        }
    }

    table.add_row(vec![
        Cell::new("Custo de produção").fg(Color::Yellow),
        Cell::new(format_currency(breakdown.total_production_cost)).fg(Color::Yellow),
        Cell::new(""),
    ]);
    if breakdown.model == ModelVersion::Extended {
        table.add_row(vec![
            Cell::new("Complexidade"),
            Cell::new(format!("× {:.2}", breakdown.complexity_multiplier)),
            Cell::new(""),
        ]);
    }
    table.add_row(vec![
        Cell::new("Custo por hora"),
        Cell::new(format_currency(breakdown.cost_per_hour)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Preço sugerido (un.)").fg(Color::Green),
        Cell::new(format_currency(breakdown.suggested_unit_price)).fg(Color::Green),
        Cell::new(""),
    ]);
    if quantity > 1 {
        table.add_row(vec![
            Cell::new(format!("Preço total ({} un.)", quantity)).fg(Color::Green),
            Cell::new(format_currency(
                breakdown.suggested_unit_price * f64::from(quantity),
            ))
            .fg(Color::Green),
            Cell::new(""),
        ]);
    }

    for index in [1, 2] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}

// =============================================================================
// Unit Tests
// =============================================================================
