//! Cartpath Engine - turns a flat shopping list into a store-aware route.
//!
//! Pipeline: items -> [`CategorizationEngine`] -> category tree ->
//! [`RoutePlanner`] -> ordered stops -> [`RouteProgress`]. Everything is
//! synchronous and owned by whichever thread owns the shopping session;
//! each pass rebuilds its output from scratch instead of patching state.

pub mod categorize;
pub mod classifier;
pub mod pathfind;
pub mod planner;
pub mod progress;
pub mod session;

pub use categorize::{Categorized, CategorizationEngine, ClassifyWarning};
pub use classifier::{Classifier, ClassifyError, KeywordClassifier};
pub use planner::{PlanStrategy, RoutePlanner, Stop};
pub use progress::{ProgressState, RouteProgress};
pub use session::ShoppingSession;
