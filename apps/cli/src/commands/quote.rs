//! Quote management: `list`, `remove`, `set-quantity` and `clear`.
//!
//! Positions on the command line start at 1, the way `list` shows them.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use printcost_core::{format_currency, Quote};
use printcost_db::QuoteStore;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::state::QuoteSession;

pub fn list<S: QuoteStore>(session: &QuoteSession<S>) -> AppResult<()> {
    let quote = session.quote();
    if quote.is_empty() {
        println!("O orçamento está vazio.");
        return Ok(());
    }

    println!("{}", quote_table(quote));
    println!(
        "{} itens, {} unidades. Total: {}",
        quote.len(),
        quote.total_quantity(),
        format_currency(quote.total())
    );
    Ok(())
}

pub async fn remove<S: QuoteStore>(session: &mut QuoteSession<S>, position: usize) -> AppResult<()> {
    let index = to_index(position)?;
    let removed = session.remove(index).await?;

    info!(position, item = %removed.item_name(), "Item removed from quote");
    println!(
        "'{}' removido. Total do orçamento: {}",
        removed.item_name(),
        format_currency(session.quote().total())
    );
    Ok(())
}

pub async fn set_quantity<S: QuoteStore>(
    session: &mut QuoteSession<S>,
    position: usize,
    quantity: u32,
) -> AppResult<()> {
    let index = to_index(position)?;
    session.set_quantity(index, quantity).await?;

    if let Some(item) = session.quote().get(index) {
        info!(position, quantity, "Item quantity changed");
        println!(
            "'{}': {} un. = {}. Total do orçamento: {}",
            item.item_name(),
            item.quantity(),
            format_currency(item.final_price()),
            format_currency(session.quote().total())
        );
    }
    Ok(())
}

pub async fn clear<S: QuoteStore>(session: &mut QuoteSession<S>) -> AppResult<()> {
    let removed = session.quote().len();
    session.clear().await?;

    info!(removed, "Quote cleared");
    println!("Orçamento limpo ({} itens removidos).", removed);
    Ok(())
}

/// One row per item, in quote order, numbered from 1.
pub fn quote_table(quote: &Quote) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["#", "Item", "Material", "Qtd.", "Pintura", "Unitário", "Total"]
                .into_iter()
                .map(|title| Cell::new(title).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );

    for (index, item) in quote.items().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(item.item_name()),
            Cell::new(item.material_type()),
            Cell::new(item.quantity()),
            Cell::new(item.painting()),
            Cell::new(format_currency(item.unit_price())),
            Cell::new(format_currency(item.final_price())),
        ]);
    }

    for index in [3, 5, 6] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}

fn to_index(position: usize) -> AppResult<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| AppError::validation("Positions start at 1"))
}
