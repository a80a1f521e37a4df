//! Configuration for the ledger session
//!
//! Resolves where the settings file lives and loads the user's preferences
//! (default export format, CSV layout handling, log filter).

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
