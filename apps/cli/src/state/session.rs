//! # Quote Session
//!
//! The in-memory quote plus the store it is persisted to.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quote Session Operations                             │
//! │                                                                         │
//! │  add / remove / set_quantity / clear                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next = quote.clone(); apply change to next                            │
//! │       │                                                                 │
//! │       ├── change invalid? ──► Err, nothing persisted                   │
//! │       ▼                                                                 │
//! │  store.replace_all(next)                                               │
//! │       │                                                                 │
//! │       ├── store failed? ───► Err, quote unchanged (matches the store)  │
//! │       ▼                                                                 │
//! │  quote = next                                                          │
//! │                                                                         │
//! │  Mutations take &mut self, so persistence calls never overlap.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use printcost_core::{CoreResult, Quote, QuoteItem};
use printcost_db::QuoteStore;
use tracing::info;

use crate::error::AppResult;

/// Current quote backed by a [`QuoteStore`].
#[derive(Debug)]
pub struct QuoteSession<S> {
    store: S,
    quote: Quote,
}

impl<S: QuoteStore> QuoteSession<S> {
    /// Loads the persisted quote.
    pub async fn open(store: S) -> AppResult<Self> {
        let quote = Quote::from_items(store.load().await?);
        info!(items = quote.len(), "Quote session opened");
        Ok(QuoteSession { store, quote })
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn items(&self) -> &[QuoteItem] {
        self.quote.items()
    }

    /// Appends an item.
    pub async fn add(&mut self, item: QuoteItem) -> AppResult<()> {
        self.commit(|quote| {
            quote.push(item);
            Ok(())
        })
        .await
    }

    /// Removes the item at zero-based `position`.
    pub async fn remove(&mut self, position: usize) -> AppResult<QuoteItem> {
        self.commit(|quote| quote.remove(position)).await
    }

    /// Changes the quantity of the item at zero-based `position`.
    pub async fn set_quantity(&mut self, position: usize, quantity: u32) -> AppResult<()> {
        self.commit(|quote| quote.set_quantity(position, quantity))
            .await
    }

    /// Empties the quote.
    pub async fn clear(&mut self) -> AppResult<()> {
        self.commit(|quote| {
            quote.clear();
            Ok(())
        })
        .await
    }

    async fn commit<T>(&mut self, change: impl FnOnce(&mut Quote) -> CoreResult<T>) -> AppResult<T> {
        let mut next = self.quote.clone();
        let output = change(&mut next)?;

        self.store.replace_all(next.items()).await?;
        self.quote = next;

        Ok(output)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use printcost_core::{calculate, ItemDetails, Painting, ParameterSet};
    use printcost_db::{Database, DbConfig, DbError, DbResult};

    use crate::error::ErrorCode;

    /// In-memory store that can be told to fail.
    #[derive(Debug, Clone, Default)]
    struct FlakyStore {
        saved: Arc<Mutex<Vec<QuoteItem>>>,
        fail: Arc<AtomicBool>,
    }

    impl FlakyStore {
        fn saved(&self) -> Vec<QuoteItem> {
            self.saved.lock().unwrap().clone()
        }

        fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }
    }

    impl QuoteStore for FlakyStore {
        async fn load(&self) -> DbResult<Vec<QuoteItem>> {
            Ok(self.saved())
        }

        async fn replace_all(&self, items: &[QuoteItem]) -> DbResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(DbError::QueryFailed("disk I/O error".to_string()));
            }
            *self.saved.lock().unwrap() = items.to_vec();
            Ok(())
        }
    }

    fn item(name: &str, quantity: u32) -> QuoteItem {
        let params = ParameterSet {
            filament_price: 90.0,
            weight_g: 120.0,
            print_hours: 3.0,
            power_w: 220.0,
            energy_rate: 0.7,
            margin_pct: 60.0,
            ..ParameterSet::default()
        };
        let details = ItemDetails::new(name, "PETG", quantity, Painting::Nao).unwrap();
        QuoteItem::new(details, &params, calculate(&params).unwrap())
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let store = FlakyStore::default();
        let mut session = QuoteSession::open(store.clone()).await.unwrap();

        session.add(item("a", 1)).await.unwrap();
        session.add(item("b", 2)).await.unwrap();
        assert_eq!(store.saved().len(), 2);

        session.set_quantity(1, 5).await.unwrap();
        assert_eq!(store.saved()[1].quantity(), 5);

        let removed = session.remove(0).await.unwrap();
        assert_eq!(removed.item_name(), "a");
        assert_eq!(store.saved().len(), 1);

        session.clear().await.unwrap();
        assert!(store.saved().is_empty());
        assert!(session.quote().is_empty());
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_memory_unchanged() {
        let store = FlakyStore::default();
        let mut session = QuoteSession::open(store.clone()).await.unwrap();
        session.add(item("a", 1)).await.unwrap();
        let before = session.quote().clone();

        store.set_failing(true);

        let err = session.add(item("b", 1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(session.set_quantity(0, 9).await.is_err());
        assert!(session.remove(0).await.is_err());
        assert!(session.clear().await.is_err());

        assert_eq!(session.quote(), &before);
        assert_eq!(store.saved(), before.items());
    }

    #[tokio::test]
    async fn test_invalid_change_is_not_persisted() {
        let store = FlakyStore::default();
        let mut session = QuoteSession::open(store.clone()).await.unwrap();
        session.add(item("a", 2)).await.unwrap();

        let err = session.remove(3).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = session.set_quantity(0, 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(session.items()[0].quantity(), 2);
        assert_eq!(store.saved()[0].quantity(), 2);
    }

    #[tokio::test]
    async fn test_open_restores_previous_session() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut first = QuoteSession::open(db.quotes()).await.unwrap();
        first.add(item("Vaso", 2)).await.unwrap();
        first.add(item("Suporte", 1)).await.unwrap();
        let total = first.quote().total();

        let second = QuoteSession::open(db.quotes()).await.unwrap();
        let names: Vec<&str> = second.items().iter().map(QuoteItem::item_name).collect();
        assert_eq!(names, vec!["Vaso", "Suporte"]);
        assert_eq!(second.quote().total(), total);
        assert_eq!(db.quotes().count().await.unwrap(), 2);
    }
}
