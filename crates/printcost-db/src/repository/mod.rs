//! # Repository Module
//!
//! Quote persistence behind the [`QuoteStore`](quote::QuoteStore) trait.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  QuoteSession (CLI)                                                    │
//! │       │                                                                 │
//! │       │  store.replace_all(&items)                                     │
//! │       ▼                                                                 │
//! │  QuoteStore (trait)                                                    │
//! │  ├── load(&self)                                                       │
//! │  └── replace_all(&self, items)                                         │
//! │       │                                                                 │
//! │       ├──► QuoteRepository (SQLite)                                    │
//! │       └──► test doubles                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod quote;
