//! Unified error types for policy-diff.
//!
//! The pure comparison core is infallible on well-typed input; errors come
//! from loading snapshots, validating clause sets upstream of the differ,
//! configuration and report output.

use crate::model::ClauseId;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for policy-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PolicyDiffError {
    /// Errors while reading a document or clause snapshot
    #[error("Failed to parse policy input: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// A clause set supplied for diffing repeats clause ids
    #[error("Invalid clause set: duplicate clause ids {}", join_ids(.duplicates))]
    InvalidClauseSet { duplicates: Vec<ClauseId> },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Unrecognized snapshot shape: {0}")]
    UnrecognizedShape(String),

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

fn join_ids(ids: &[ClauseId]) -> String {
    ids.iter()
        .map(ClauseId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for policy-diff operations
pub type Result<T> = std::result::Result<T, PolicyDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl PolicyDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a snapshot whose top-level shape is not understood
    pub fn unrecognized_shape(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::parse(context, ParseErrorKind::UnrecognizedShape(detail.into()))
    }

    /// Create a parse error for a field holding the wrong type of value
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        let field = field.into();
        Self::parse(
            format!("{field} in clause snapshot"),
            ParseErrorKind::InvalidValue {
                field,
                message: message.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for PolicyDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for PolicyDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for PolicyDiffError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse(
            "YAML deserialization",
            ParseErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained onto the error's existing context, so the
/// final message reads outermost-first.
///
/// # Example
///
/// ```ignore
/// use policy_diff::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<serde_json::Value> {
///     let content = std::fs::read_to_string(path).context("reading snapshot")?;
///     serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<PolicyDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: PolicyDiffError, new_ctx: &str) -> PolicyDiffError {
    match err {
        PolicyDiffError::Parse {
            context: existing,
            source,
        } => PolicyDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PolicyDiffError::Report {
            context: existing,
            source,
        } => PolicyDiffError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PolicyDiffError::Io {
            path,
            message,
            source,
        } => PolicyDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        PolicyDiffError::Config(msg) => PolicyDiffError::Config(chain_context(new_ctx, &msg)),
        PolicyDiffError::Validation(msg) => {
            PolicyDiffError::Validation(chain_context(new_ctx, &msg))
        }
        // The duplicate list is the whole message; nothing to chain onto.
        other @ PolicyDiffError::InvalidClauseSet { .. } => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| PolicyDiffError::Validation(context.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_clause_set_display() {
        let err = PolicyDiffError::InvalidClauseSet {
            duplicates: vec![ClauseId::from("4.1"), ClauseId::from("6.1")],
        };
        assert_eq!(
            err.to_string(),
            "Invalid clause set: duplicate clause ids 4.1, 6.1"
        );
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = PolicyDiffError::io("/path/to/v2.json", io_err);

        assert!(err.to_string().contains("/path/to/v2.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(PolicyDiffError::unrecognized_shape("base", "a number"))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(PolicyDiffError::Parse { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(PolicyDiffError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_option_context() {
        assert_eq!(Some(42).context_none("missing value").unwrap(), 42);

        match None::<i32>.context_none("missing value") {
            Err(PolicyDiffError::Validation(msg)) => assert_eq!(msg, "missing value"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
