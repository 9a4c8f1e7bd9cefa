//! # Quote Repository
//!
//! Stores the current quote as one JSON row per item.
//!
//! ## Replace, Never Patch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  replace_all(&items)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  serialize every item ── fails? ──► Err, nothing touched               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   SINGLE TRANSACTION                            │   │
//! │  │  1. DELETE FROM quote_items                                     │   │
//! │  │  2. INSERT INTO quote_items (item_data) VALUES (?)  × N         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ← any failure before this rolls back to the previous quote     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use printcost_core::QuoteItem;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

// =============================================================================
// Store Contract
// =============================================================================

/// Durable home of the current quote.
pub trait QuoteStore {
    /// Returns the persisted items in insertion order; empty when none.
    fn load(&self) -> impl Future<Output = DbResult<Vec<QuoteItem>>> + Send;

    /// Atomically replaces the persisted quote with `items`.
    ///
    /// On error the previous content is still in place.
    fn replace_all(&self, items: &[QuoteItem]) -> impl Future<Output = DbResult<()>> + Send;
}

// =============================================================================
// SQLite Repository
// =============================================================================

/// SQLite implementation of [`QuoteStore`] over `quote_items`.
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    pool: SqlitePool,
}

impl QuoteRepository {
    /// Creates a new QuoteRepository.
    pub fn new(pool: SqlitePool) -> Self {
        QuoteRepository { pool }
    }

    /// Number of stored items.
    pub async fn count(&self) -> DbResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quote_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}

impl QuoteStore for QuoteRepository {
    async fn load(&self) -> DbResult<Vec<QuoteItem>> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, item_data FROM quote_items ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        debug!(rows = rows.len(), "Loaded quote rows");

        rows.into_iter()
            .map(|(id, data)| {
                serde_json::from_str::<QuoteItem>(&data)
                    .map_err(|e| DbError::corrupt(id, e.to_string()))
            })
            .collect()
    }

    async fn replace_all(&self, items: &[QuoteItem]) -> DbResult<()> {
        let payloads = items
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query("DELETE FROM quote_items")
            .execute(&mut *tx)
            .await?;

        for payload in &payloads {
            sqlx::query("INSERT INTO quote_items (item_data) VALUES (?1)")
                .bind(payload)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(items = payloads.len(), "Quote saved");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use printcost_core::{calculate, ItemDetails, Painting, ParameterSet};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn item(name: &str, quantity: u32) -> QuoteItem {
        let params = ParameterSet {
            filament_price: 100.0,
            weight_g: 50.0,
            print_hours: 1.5,
            power_w: 220.0,
            energy_rate: 0.7,
            margin_pct: 100.0,
            ..ParameterSet::default()
        };
        let details = ItemDetails::new(name, "PLA", quantity, Painting::Sim).unwrap();
        QuoteItem::new(details, &params, calculate(&params).unwrap())
    }

    #[tokio::test]
    async fn test_empty_store_loads_nothing() {
        let db = setup().await;
        assert!(db.quotes().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_and_load_preserves_order() {
        let db = setup().await;
        let repo = db.quotes();
        let items = vec![item("a", 1), item("b", 2), item("c", 3)];

        repo.replace_all(&items).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, items);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    /// Items priced from irregular inputs, so every stored float uses all
    /// of its significant digits.
    fn irregular_items(count: usize) -> Vec<QuoteItem> {
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |scale: f64| {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            (seed >> 11) as f64 / (1u64 << 53) as f64 * scale
        };

        (0..count)
            .map(|i| {
                let params = ParameterSet {
                    filament_price: 60.0 + next(140.0),
                    weight_g: 1.0 + next(400.0),
                    print_hours: next(30.0),
                    power_w: 120.0 + next(300.0),
                    energy_rate: 0.4 + next(0.9),
                    labor_rate: next(50.0),
                    printer_value: 800.0 + next(9000.0),
                    depreciation_hours: 2000.0 + next(8000.0),
                    margin_pct: next(200.0),
                    ..ParameterSet::default()
                };
                let details =
                    ItemDetails::new(&format!("Peça {i}"), "PETG", 1 + (i % 7) as u32, Painting::Nao)
                        .unwrap();
                QuoteItem::new(details, &params, calculate(&params).unwrap())
            })
            .collect()
    }

    async fn stored_rows(db: &Database) -> Vec<String> {
        sqlx::query_scalar("SELECT item_data FROM quote_items ORDER BY id")
            .fetch_all(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_saving_loaded_quote_keeps_rows_identical() {
        let db = setup().await;
        let repo = db.quotes();
        let items = irregular_items(500);

        repo.replace_all(&items).await.unwrap();
        let first = stored_rows(&db).await;

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, items);

        repo.replace_all(&loaded).await.unwrap();
        assert_eq!(stored_rows(&db).await, first);
    }

    #[tokio::test]
    async fn test_replace_discards_previous_rows() {
        let db = setup().await;
        let repo = db.quotes();

        repo.replace_all(&[item("a", 1), item("b", 1)]).await.unwrap();
        repo.replace_all(&[item("c", 4)]).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].item_name(), "c");

        repo.replace_all(&[]).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_replace_rolls_back() {
        let db = setup().await;
        let repo = db.quotes();
        let original = vec![item("a", 1), item("b", 2)];
        repo.replace_all(&original).await.unwrap();

        sqlx::query(
            "CREATE TRIGGER reject_item BEFORE INSERT ON quote_items \
             WHEN NEW.item_data LIKE '%Rejeitado%' \
             BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let result = repo.replace_all(&[item("ok", 1), item("Rejeitado", 1)]).await;
        assert!(matches!(result, Err(DbError::QueryFailed(_))));

        assert_eq!(repo.load().await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_corrupt_row_is_reported() {
        let db = setup().await;
        sqlx::query("INSERT INTO quote_items (item_data) VALUES ('not json')")
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.quotes().load().await.unwrap_err();
        assert!(matches!(err, DbError::CorruptRecord { id: 1, .. }));
    }

    #[tokio::test]
    async fn test_legacy_row_loads_with_defaults() {
        let db = setup().await;
        let legacy = r#"{"item_name": "Chaveiro", "total_cost": 2.0, "price": 4.0,
            "breakdown": {"Material": 1.5, "Eletricidade": 0.5},
            "weight_g": 15.0, "print_hours": 0.5, "cost_per_hour": 4.0,
            "material_type": "PLA", "painting": "Não"}"#;
        sqlx::query("INSERT INTO quote_items (item_data) VALUES (?1)")
            .bind(legacy)
            .execute(db.pool())
            .await
            .unwrap();

        let loaded = db.quotes().load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].quantity(), 1);
        assert_eq!(loaded[0].final_price(), 4.0);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let path = std::env::temp_dir().join(format!("printcost-{}.db", uuid::Uuid::new_v4()));
        let items = vec![item("persistente", 2)];

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.quotes().replace_all(&items).await.unwrap();
        db.close().await;

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(db.quotes().load().await.unwrap(), items);
        db.close().await;

        let _ = std::fs::remove_file(&path);
    }
}
