//! Query Engine Module
//!
//! Resolves a user-supplied formula name, binds its positional parameters and
//! dispatches the call. The pipeline is total: every failure ends the request
//! with one of two fixed messages.
//!
//! ```text
//! Received → NameResolving ─┬─ Rejected ──────────────────────────→ Failed
//!                           └─ Resolved → Binding → Dispatching ─┬─→ Done
//!                                                                └─→ Failed
//! ```

pub mod binder;
pub mod dispatch;
pub mod resolver;

pub use binder::{bind, bind_with, parse_params, BindError, BindingPolicy};
pub use dispatch::{dispatch, format_result, DispatchOutcome, InvocationError};
pub use resolver::{correct_name, resolve, Rejection, Resolution};

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::formulas::Catalogue;

/// Message returned when no formula name was entered
pub const QUERY_NOT_ENTERED: &str = "Error, query not entered";

/// Message returned for every other failure
pub const CHECK_QUERY: &str = "Error, check query name and parameter values";

/// A single request: formula name plus up to four positional parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuery {
    pub name: Option<String>,
    pub params: Vec<Option<f64>>,
}

impl RawQuery {
    pub fn new(name: impl Into<String>, params: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self {
            name: Some(name.into()),
            params: params.into_iter().collect(),
        }
    }
}

/// User-facing classification of a failed query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotProvided,
    NotFound,
    InvocationError,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    #[error("no formula name entered")]
    NotProvided,
    #[error("no formula matches '{name}'")]
    NotFound { name: String },
    #[error(transparent)]
    Binding(#[from] BindError),
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::NotProvided => ErrorKind::NotProvided,
            QueryError::NotFound { .. } => ErrorKind::NotFound,
            QueryError::Binding(_) | QueryError::Invocation(_) => ErrorKind::InvocationError,
        }
    }

    /// The fixed message shown to the user for this error
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::NotProvided => QUERY_NOT_ENTERED,
            ErrorKind::NotFound | ErrorKind::InvocationError => CHECK_QUERY,
        }
    }
}

/// Runs queries against a shared, read-only catalogue
#[derive(Debug, Clone)]
pub struct QueryEngine {
    catalogue: Arc<Catalogue>,
    policy: BindingPolicy,
}

impl QueryEngine {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            catalogue,
            policy: BindingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: BindingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn policy(&self) -> BindingPolicy {
        self.policy
    }

    /// Evaluate a query with numeric parameters
    pub fn evaluate(&self, query: &RawQuery) -> Result<String, QueryError> {
        self.run(query.name.as_deref(), || Ok(query.params.clone()))
    }

    /// Evaluate a query whose parameters are still text. Parameters are only
    /// parsed once the name has resolved, so a bad name is always reported first.
    pub fn evaluate_text(&self, name: Option<&str>, params: &[Option<&str>]) -> Result<String, QueryError> {
        self.run(name, || parse_params(params))
    }

    /// Evaluate and render the outcome as the response text
    pub fn respond(&self, query: &RawQuery) -> String {
        render(self.evaluate(query))
    }

    pub fn respond_text(&self, name: Option<&str>, params: &[Option<&str>]) -> String {
        render(self.evaluate_text(name, params))
    }

    fn run<F>(&self, raw_name: Option<&str>, params: F) -> Result<String, QueryError>
    where
        F: FnOnce() -> Result<Vec<Option<f64>>, BindError>,
    {
        let entry = match resolve(raw_name, &self.catalogue) {
            Resolution::Resolved { entry, name } => {
                if raw_name != Some(name.as_str()) {
                    debug!("Corrected query {:?} to {}", raw_name.unwrap_or_default(), name);
                }
                entry
            }
            Resolution::Rejected(Rejection::NotProvided) => return Err(QueryError::NotProvided),
            Resolution::Rejected(Rejection::NotFound) => {
                let name = raw_name.unwrap_or_default().to_string();
                debug!("No formula matches {:?}", name);
                return Err(QueryError::NotFound { name });
            }
        };

        let args = bind_with(self.policy, &params()?)?;

        dispatch(entry, &args).map_err(|e| {
            warn!("Formula invocation failed: {}", e);
            QueryError::from(e)
        })
    }
}

fn render(outcome: Result<String, QueryError>) -> String {
    outcome.unwrap_or_else(|e| e.user_message().to_string())
}
