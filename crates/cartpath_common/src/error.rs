//! Error types for table loading.
//!
//! Runtime lookups never fail; unknown stores and subcategories resolve to
//! the generic/"Other" fallbacks. Errors only exist on the configuration
//! loading path.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("store '{0}' defines no taxonomy rows and no sections")]
    EmptyStore(String),

    #[error("store '{store}' defines section key '{key}' more than once")]
    DuplicateSectionKey { store: String, key: String },
}
