//! Cartpath Common - Shared data model and store tables for the
//! categorization and route-planning engine.
//!
//! Taxonomy and layout tables are plain configuration objects built once
//! and passed into the engine; nothing here reaches for global state.

pub mod category;
pub mod config;
pub mod error;
pub mod item;
pub mod layout;
pub mod normalize;
pub mod taxonomy;

pub use category::{CategoryTree, MainCategory, SubCategory};
pub use config::StoreTables;
pub use error::TableError;
pub use item::{CategoryOverride, ShoppingItem};
pub use layout::{GridPos, LayoutRegistry, StoreLayout, StoreSection};
pub use normalize::{Lemmatizer, PluralFolding, TextNormalizer};
pub use taxonomy::{TaxonomyRegistry, TaxonomyTable, OTHER_LABEL};
