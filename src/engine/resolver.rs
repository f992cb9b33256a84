//! Name Resolution
//!
//! Turns a user-supplied formula name into an exact catalogue key. A name that
//! misses is given one deterministic correction: uppercase a lowercase first
//! letter, then prepend `Calc` when the literal prefix is absent. No fuzzy
//! matching and no alternative candidates.

use crate::formulas::{Catalogue, FormulaEntry, NAME_PREFIX};

/// Why a name could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing was entered
    NotProvided,
    /// Something was entered but neither it nor its correction is a formula
    NotFound,
}

/// Outcome of resolving a raw name against the catalogue
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    Resolved {
        entry: &'a FormulaEntry,
        /// The catalogue key that matched (the raw name or its correction)
        name: String,
    },
    Rejected(Rejection),
}

impl Resolution<'_> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }
}

/// Resolve a raw name against the catalogue
pub fn resolve<'a>(raw_name: Option<&str>, catalogue: &'a Catalogue) -> Resolution<'a> {
    let raw_name = match raw_name {
        Some(name) if !name.is_empty() => name,
        _ => return Resolution::Rejected(Rejection::NotProvided),
    };

    if let Some(entry) = catalogue.lookup(raw_name) {
        return Resolution::Resolved {
            entry,
            name: raw_name.to_string(),
        };
    }

    let candidate = correct_name(raw_name);
    match catalogue.lookup(&candidate) {
        Some(entry) => Resolution::Resolved {
            entry,
            name: candidate,
        },
        None => Resolution::Rejected(Rejection::NotFound),
    }
}

/// Single-shot correction of a name: capitalize, then ensure the `Calc` prefix.
///
/// Both steps are case-sensitive, so `"CALCASSETS"` becomes `"CalcCALCASSETS"`.
pub fn correct_name(raw_name: &str) -> String {
    let mut chars = raw_name.chars();
    let capitalized = match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => raw_name.to_string(),
    };

    if capitalized.starts_with(NAME_PREFIX) {
        capitalized
    } else {
        format!("{}{}", NAME_PREFIX, capitalized)
    }
}
