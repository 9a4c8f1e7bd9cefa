//! # printcost-db: Quote Store for PrintCost
//!
//! Keeps the current quote in a local SQLite file so it survives restarts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PrintCost Data Flow                              │
//! │                                                                         │
//! │  QuoteSession::add / remove / set_quantity / clear                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   printcost-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  QuoteStore   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ QuoteRepo     │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: <data dir>/printcost/quote.db                         │   │
//! │  │   quote_items(id INTEGER PK AUTOINCREMENT, item_data TEXT)      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use printcost_db::{Database, DbConfig, QuoteStore};
//!
//! let db = Database::new(DbConfig::new("quote.db")).await?;
//! let items = db.quotes().load().await?;
//! db.quotes().replace_all(&items).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::quote::{QuoteRepository, QuoteStore};
