//! Formula Dispatch
//!
//! Invokes a resolved formula with bound arguments. Every failure is captured
//! as an [`InvocationError`]; nothing unwinds past this function.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::formulas::FormulaEntry;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvocationError {
    #[error("{name} expects {expected} parameters, {supplied} supplied")]
    ArityMismatch {
        name: String,
        expected: usize,
        supplied: usize,
    },
    #[error("{name} produced a non-finite result")]
    NonFiniteResult { name: String },
    #[error("{name} panicked during evaluation")]
    Panicked { name: String },
}

/// Result text on success, or the reason the invocation failed
pub type DispatchOutcome = Result<String, InvocationError>;

/// Invoke the formula and render its result in shortest decimal form.
pub fn dispatch(entry: &FormulaEntry, args: &[f64]) -> DispatchOutcome {
    let name = entry.name();
    let formula = entry.formula();

    let value = panic::catch_unwind(AssertUnwindSafe(|| formula.call(args)))
        .map_err(|_| InvocationError::Panicked {
            name: name.to_string(),
        })?
        .ok_or_else(|| InvocationError::ArityMismatch {
            name: name.to_string(),
            expected: formula.arity(),
            supplied: args.len(),
        })?;

    if !value.is_finite() {
        return Err(InvocationError::NonFiniteResult {
            name: name.to_string(),
        });
    }

    Ok(format_result(value))
}

/// Canonical decimal text of a result: `30.0` renders as `30`, `0.5` as `0.5`.
/// Plain positional notation is used at every magnitude, never an exponent.
pub fn format_result(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::{Catalogue, Formula};

    fn explode(_: f64) -> f64 {
        panic!("formula fault")
    }

    fn entry(name: &str) -> FormulaEntry {
        Catalogue::standard()
            .unwrap()
            .lookup(name)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_dispatch_assets() {
        assert_eq!(dispatch(&entry("CalcAssets"), &[10.0, 20.0]), Ok("30".to_string()));
    }

    #[test]
    fn test_dispatch_formats_fractions() {
        assert_eq!(dispatch(&entry("CalcCurrentRatio"), &[1.0, 4.0]), Ok("0.25".to_string()));
        assert_eq!(dispatch(&entry("CalcEquity"), &[10.0, 20.5]), Ok("-10.5".to_string()));
    }

    #[test]
    fn test_dispatch_wrong_arity() {
        let assets = entry("CalcAssets");
        assert_eq!(
            dispatch(&assets, &[10.0]),
            Err(InvocationError::ArityMismatch {
                name: "CalcAssets".to_string(),
                expected: 2,
                supplied: 1,
            })
        );
        assert!(matches!(
            dispatch(&assets, &[1.0, 2.0, 3.0]),
            Err(InvocationError::ArityMismatch { supplied: 3, .. })
        ));
        assert!(matches!(
            dispatch(&assets, &[]),
            Err(InvocationError::ArityMismatch { supplied: 0, .. })
        ));
    }

    #[test]
    fn test_dispatch_domain_error() {
        assert!(matches!(
            dispatch(&entry("CalcCurrentRatio"), &[10.0, 0.0]),
            Err(InvocationError::NonFiniteResult { .. })
        ));
        assert!(matches!(
            dispatch(&entry("CalcPerpetuity"), &[0.0, 0.0]),
            Err(InvocationError::NonFiniteResult { .. })
        ));
    }

    #[test]
    fn test_dispatch_captures_panics() {
        let faulty = FormulaEntry::new("CalcExplode", Formula::Unary(explode));
        assert_eq!(
            dispatch(&faulty, &[1.0]),
            Err(InvocationError::Panicked {
                name: "CalcExplode".to_string()
            })
        );
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let pv = entry("CalcPresentValue");
        let first = dispatch(&pv, &[121.0, 0.1, 2.0]);
        assert!(first.is_ok());
        for _ in 0..10 {
            assert_eq!(dispatch(&pv, &[121.0, 0.1, 2.0]), first);
        }
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(30.0), "30");
        assert_eq!(format_result(0.5), "0.5");
        assert_eq!(format_result(-2.0), "-2");
        assert_eq!(format_result(1234567.125), "1234567.125");
    }

    #[test]
    fn test_format_result_never_uses_exponent() {
        assert_eq!(format_result(1e-7), "0.0000001");
        assert_eq!(format_result(1e21), "1000000000000000000000");

        let huge = format_result(1e300);
        assert_eq!(huge.len(), 301);
        assert!(!huge.contains(['e', 'E']));
    }
}
