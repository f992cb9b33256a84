//! Parameter Binding
//!
//! Converts positional parameters into the argument list handed to a formula.
//! Parameters are taken in order and binding stops at the first absent slot,
//! so `(10, _, 30)` binds as `[10]`. The dropped trailing value is a known
//! quirk kept for compatibility; [`BindingPolicy::Strict`] rejects such gaps
//! instead. Arity is never checked here.

use thiserror::Error;

use crate::formulas::MAX_ARITY;

/// How supplied parameters after a gap are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindingPolicy {
    /// Stop at the first absent slot and ignore anything after it
    #[default]
    FirstGap,
    /// Reject a supplied parameter that follows an absent one
    Strict,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BindError {
    /// 1-based position of a parameter supplied after an absent one
    #[error("parameter p{position} supplied after a missing parameter")]
    Gap { position: usize },
    #[error("parameter p{position} is not a number: '{value}'")]
    Unparsable { position: usize, value: String },
}

/// Bind leading consecutive parameters, stopping at the first gap.
pub fn bind(raw: &[Option<f64>]) -> Vec<f64> {
    raw.iter().take(MAX_ARITY).map_while(|param| *param).collect()
}

/// Bind under the given policy
pub fn bind_with(policy: BindingPolicy, raw: &[Option<f64>]) -> Result<Vec<f64>, BindError> {
    let args = bind(raw);
    if policy == BindingPolicy::Strict {
        let after_gap = raw
            .iter()
            .take(MAX_ARITY)
            .enumerate()
            .skip(args.len())
            .find(|(_, param)| param.is_some());
        if let Some((index, _)) = after_gap {
            return Err(BindError::Gap { position: index + 1 });
        }
    }
    Ok(args)
}

/// Parse textual parameters. Missing or blank text is an absent slot.
pub fn parse_params(raw: &[Option<&str>]) -> Result<Vec<Option<f64>>, BindError> {
    raw.iter()
        .copied()
        .take(MAX_ARITY)
        .enumerate()
        .map(|(index, text)| match text.map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => text.parse::<f64>().map(Some).map_err(|_| BindError::Unparsable {
                position: index + 1,
                value: text.to_string(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_takes_leading_parameters() {
        assert_eq!(bind(&[Some(10.0)]), vec![10.0]);
        assert_eq!(bind(&[Some(10.0), Some(20.0)]), vec![10.0, 20.0]);
        assert_eq!(
            bind(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            vec![1.0, 2.0, 3.0, 4.0]
        );
        assert!(bind(&[]).is_empty());
        assert!(bind(&[None, Some(2.0)]).is_empty());
    }

    #[test]
    fn test_bind_first_gap_wins() {
        assert_eq!(bind(&[Some(10.0), None, Some(30.0)]), vec![10.0]);
        assert_eq!(
            bind_with(BindingPolicy::FirstGap, &[Some(10.0), None, Some(30.0)]),
            Ok(vec![10.0])
        );
    }

    #[test]
    fn test_bind_ignores_slots_past_four() {
        let raw = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)];
        assert_eq!(bind(&raw).len(), MAX_ARITY);
        assert!(bind_with(BindingPolicy::Strict, &raw).is_ok());
    }

    #[test]
    fn test_strict_policy_rejects_gaps() {
        assert_eq!(
            bind_with(BindingPolicy::Strict, &[Some(10.0), None, Some(30.0)]),
            Err(BindError::Gap { position: 3 })
        );
        assert_eq!(
            bind_with(BindingPolicy::Strict, &[Some(10.0), Some(20.0), None, None]),
            Ok(vec![10.0, 20.0])
        );
    }

    #[test]
    fn test_parse_params() {
        assert_eq!(
            parse_params(&[Some("10"), Some(" 2.5 "), None, Some("")]),
            Ok(vec![Some(10.0), Some(2.5), None, None])
        );
        assert_eq!(parse_params(&[Some("-1e3")]), Ok(vec![Some(-1000.0)]));
        assert_eq!(
            parse_params(&[Some("10"), Some("ten")]),
            Err(BindError::Unparsable {
                position: 2,
                value: "ten".to_string()
            })
        );
    }
}
