//! # State Module
//!
//! What a command needs besides its arguments.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────────────┐    │
//! │  │      AppConfig       │          │   QuoteSession<QuoteStore>   │    │
//! │  │                      │          │                              │    │
//! │  │  • storage path      │────────► │  • current Quote             │    │
//! │  │  • duration format   │  opens   │  • persists every change     │    │
//! │  │  • calc defaults     │          │                              │    │
//! │  │  • report settings   │          │                              │    │
//! │  └──────────────────────┘          └──────────────────────────────┘    │
//! │                                                                         │
//! │  AppConfig is read-only after load.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{
    AppConfig, ConfigError, DefaultsConfig, InputConfig, ReportConfig, StorageConfig,
};
pub use session::QuoteSession;
