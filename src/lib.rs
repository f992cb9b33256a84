//! Financial Formulas Query Service
//!
//! Serves a fixed catalogue of financial formulas over HTTP:
//! - Formula catalogue built once from the bundled library
//! - Name resolution with single-shot correction
//! - Positional parameter binding
//! - Failure-safe formula dispatch

pub mod config;
pub mod engine;
pub mod formulas;
pub mod server;

// Re-exports for convenience
pub use config::ServerConfig;
pub use engine::{QueryEngine, QueryError, RawQuery};
pub use formulas::{Catalogue, FormulaEntry, FormulaSource, StandardFormulas};
