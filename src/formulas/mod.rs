//! Formula Catalogue Module
//!
//! Immutable registry of named financial formulas. The catalogue is built once
//! from a [`FormulaSource`] and shared read-only by every request.

pub mod library;

pub use library::StandardFormulas;

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::info;

/// Literal prefix carried by every canonical formula name
pub const NAME_PREFIX: &str = "Calc";

/// Maximum number of positional parameters a formula accepts
pub const MAX_ARITY: usize = 4;

/// A numeric formula with a fixed number of real-valued parameters
#[derive(Clone, Copy)]
pub enum Formula {
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
    Ternary(fn(f64, f64, f64) -> f64),
    Quaternary(fn(f64, f64, f64, f64) -> f64),
}

impl Formula {
    /// Number of parameters the formula expects
    pub fn arity(&self) -> usize {
        match self {
            Formula::Unary(_) => 1,
            Formula::Binary(_) => 2,
            Formula::Ternary(_) => 3,
            Formula::Quaternary(_) => 4,
        }
    }

    /// Call the formula, or `None` when the argument count does not match its arity.
    pub fn call(&self, args: &[f64]) -> Option<f64> {
        match (self, args) {
            (Formula::Unary(f), &[a]) => Some(f(a)),
            (Formula::Binary(f), &[a, b]) => Some(f(a, b)),
            (Formula::Ternary(f), &[a, b, c]) => Some(f(a, b, c)),
            (Formula::Quaternary(f), &[a, b, c, d]) => Some(f(a, b, c, d)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Formula/{}", self.arity())
    }
}

/// A named formula registered in the catalogue
#[derive(Debug, Clone)]
pub struct FormulaEntry {
    name: String,
    formula: Formula,
}

impl FormulaEntry {
    pub fn new(name: impl Into<String>, formula: Formula) -> Self {
        Self {
            name: name.into(),
            formula,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.formula.arity()
    }

    pub fn formula(&self) -> Formula {
        self.formula
    }

    /// Whether the name follows catalogue conventions: `Calc` prefix, uppercase first letter.
    pub fn has_canonical_name(&self) -> bool {
        is_canonical_name(&self.name)
    }
}

fn is_canonical_name(name: &str) -> bool {
    name.starts_with(NAME_PREFIX)
        && name.chars().next().is_some_and(|c| c.is_uppercase())
        && name.len() > NAME_PREFIX.len()
}

/// Summary of a registered formula, as exposed by the catalogue listing
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FormulaInfo {
    pub name: String,
    pub arity: usize,
}

impl From<&FormulaEntry> for FormulaInfo {
    fn from(entry: &FormulaEntry) -> Self {
        Self {
            name: entry.name.clone(),
            arity: entry.arity(),
        }
    }
}

/// Failures while building the catalogue. All of them are fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("formula source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("formula source supplied no formulas")]
    Empty,
    #[error("formula name '{0}' must start with 'Calc' followed by a formula name")]
    NonCanonicalName(String),
    #[error("formula '{0}' registered more than once")]
    Duplicate(String),
}

/// Supplies the set of named formulas the catalogue is built from
pub trait FormulaSource {
    /// Enumerate every formula this source provides
    fn formulas(&self) -> Result<Vec<FormulaEntry>, CatalogueError>;
}

/// Read-only registry of formulas keyed by exact, case-sensitive name
#[derive(Debug)]
pub struct Catalogue {
    entries: HashMap<String, FormulaEntry>,
}

impl Catalogue {
    /// Build the catalogue from a formula source, validating every entry.
    pub fn build(source: &impl FormulaSource) -> Result<Self, CatalogueError> {
        let formulas = source.formulas()?;
        if formulas.is_empty() {
            return Err(CatalogueError::Empty);
        }

        let mut entries = HashMap::with_capacity(formulas.len());
        for entry in formulas {
            if !entry.has_canonical_name() {
                return Err(CatalogueError::NonCanonicalName(entry.name));
            }
            if entries.contains_key(&entry.name) {
                return Err(CatalogueError::Duplicate(entry.name));
            }
            entries.insert(entry.name.clone(), entry);
        }

        info!("Formula catalogue built with {} formulas", entries.len());
        Ok(Self { entries })
    }

    /// Build the catalogue from the bundled financial formula library
    pub fn standard() -> Result<Self, CatalogueError> {
        Self::build(&StandardFormulas)
    }

    /// Get a formula by exact name
    pub fn lookup(&self, name: &str) -> Option<&FormulaEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All registered names, sorted
    pub fn all_names(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Entries sorted by name
    pub fn entries(&self) -> impl Iterator<Item = &FormulaEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(a: f64, b: f64) -> f64 {
        a + b
    }

    struct FixedSource(Vec<FormulaEntry>);

    impl FormulaSource for FixedSource {
        fn formulas(&self) -> Result<Vec<FormulaEntry>, CatalogueError> {
            Ok(self.0.clone())
        }
    }

    struct MissingSource;

    impl FormulaSource for MissingSource {
        fn formulas(&self) -> Result<Vec<FormulaEntry>, CatalogueError> {
            Err(CatalogueError::SourceUnavailable("library not linked".to_string()))
        }
    }

    #[test]
    fn test_formula_call_checks_arity() {
        let formula = Formula::Binary(add);
        assert_eq!(formula.arity(), 2);
        assert_eq!(formula.call(&[1.0, 2.0]), Some(3.0));
        assert_eq!(formula.call(&[1.0]), None);
        assert_eq!(formula.call(&[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn test_build_and_lookup() {
        let source = FixedSource(vec![FormulaEntry::new("CalcSum", Formula::Binary(add))]);
        let catalogue = Catalogue::build(&source).unwrap();

        assert_eq!(catalogue.len(), 1);
        assert!(catalogue.contains("CalcSum"));
        assert!(!catalogue.contains("calcSum"));
        assert_eq!(catalogue.lookup("CalcSum").map(|e| e.arity()), Some(2));
        assert!(catalogue.lookup("Sum").is_none());
    }

    #[test]
    fn test_build_rejects_non_canonical_names() {
        for name in ["calcSum", "Sum", "Calc", "CALCSum"] {
            let source = FixedSource(vec![FormulaEntry::new(name, Formula::Binary(add))]);
            assert_eq!(
                Catalogue::build(&source).unwrap_err(),
                CatalogueError::NonCanonicalName(name.to_string())
            );
        }
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let source = FixedSource(vec![
            FormulaEntry::new("CalcSum", Formula::Binary(add)),
            FormulaEntry::new("CalcSum", Formula::Binary(add)),
        ]);
        assert_eq!(
            Catalogue::build(&source).unwrap_err(),
            CatalogueError::Duplicate("CalcSum".to_string())
        );
    }

    #[test]
    fn test_build_fails_without_source() {
        assert!(matches!(
            Catalogue::build(&MissingSource),
            Err(CatalogueError::SourceUnavailable(_))
        ));
        assert_eq!(
            Catalogue::build(&FixedSource(Vec::new())).unwrap_err(),
            CatalogueError::Empty
        );
    }

    #[test]
    fn test_standard_catalogue_invariants() {
        let catalogue = Catalogue::standard().unwrap();
        assert!(catalogue.contains("CalcAssets"));

        for entry in catalogue.entries() {
            assert!(entry.name().starts_with(NAME_PREFIX), "{}", entry.name());
            assert!((1..=MAX_ARITY).contains(&entry.arity()), "{}", entry.name());
        }

        let names = catalogue.all_names();
        assert_eq!(names.len(), catalogue.len());
        let listed: Vec<_> = catalogue.entries().map(|e| e.name()).collect();
        assert_eq!(listed, names.into_iter().collect::<Vec<_>>());
    }
}
