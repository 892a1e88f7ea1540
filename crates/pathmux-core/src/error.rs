//! Core error types for pathmux.
//!
//! This module provides the error enum [`PathmuxError`] covering template
//! compilation, route registration, path resolution, handler dispatch, and
//! configuration loading. Every error is returned synchronously to the caller;
//! nothing is retried or swallowed internally.

use thiserror::Error;

/// The primary error type for pathmux.
///
/// Each variant maps to an HTTP status code via [`PathmuxError::status_code`] so
/// an embedding server can turn a failed lookup or dispatch into a response.
#[derive(Error, Debug)]
pub enum PathmuxError {
    // ── Template compilation ─────────────────────────────────────────

    /// The same parameter label appears more than once in one template.
    #[error("Duplicate parameter '{label}' in template '{template}'")]
    DuplicateParameterName {
        /// The template being compiled.
        template: String,
        /// The label that was repeated.
        label: String,
    },

    /// The template does not produce a valid pattern after substitution.
    #[error("Invalid pattern for template '{template}': {reason}")]
    InvalidPattern {
        /// The template being compiled.
        template: String,
        /// The pattern compiler's explanation.
        reason: String,
    },

    // ── Registration ─────────────────────────────────────────────────

    /// The template string is already registered.
    #[error("Duplicate template: {0}")]
    DuplicateTemplate(String),

    // ── Resolution ───────────────────────────────────────────────────

    /// No registered template matches the path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Two or more templates tie on every ranking key for the path.
    #[error("Ambiguous path '{path}': matched equally by {}", .templates.join(", "))]
    Ambiguous {
        /// The path being resolved.
        path: String,
        /// The tied templates, sorted.
        templates: Vec<String>,
    },

    // ── Dispatch ─────────────────────────────────────────────────────

    /// The matched route does not accept the request method.
    #[error("Method {method} not allowed for '{template}'")]
    MethodNotAllowed {
        /// The request method.
        method: String,
        /// The template of the matched route.
        template: String,
    },

    /// A route handler rejected the request with its own status.
    #[error("Handler error ({status}): {message}")]
    Handler {
        /// The HTTP status chosen by the handler.
        status: u16,
        /// A human-readable message.
        message: String,
    },

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl PathmuxError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `NotFound` -> 404
    /// - `MethodNotAllowed` -> 405
    /// - `Handler` -> the handler's own status
    /// - Everything else -> 500
    ///
    /// Ambiguity is a defect in the route table rather than in the request, so
    /// it is reported as a server error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::MethodNotAllowed { .. } => 405,
            Self::Handler { status, .. } => *status,
            Self::DuplicateParameterName { .. }
            | Self::InvalidPattern { .. }
            | Self::DuplicateTemplate(_)
            | Self::Ambiguous { .. }
            | Self::ConfigurationError(_) => 500,
        }
    }

    /// Returns `true` for errors raised while compiling or registering a template.
    pub const fn is_registration_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateParameterName { .. }
                | Self::InvalidPattern { .. }
                | Self::DuplicateTemplate(_)
        )
    }
}

/// A convenience type alias for `Result<T, PathmuxError>`.
pub type PathmuxResult<T> = Result<T, PathmuxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PathmuxError::NotFound("/x".into()).status_code(), 404);
        assert_eq!(
            PathmuxError::MethodNotAllowed {
                method: "POST".into(),
                template: "/x".into(),
            }
            .status_code(),
            405
        );
        assert_eq!(
            PathmuxError::Handler {
                status: 418,
                message: "teapot".into(),
            }
            .status_code(),
            418
        );
        assert_eq!(
            PathmuxError::Ambiguous {
                path: "/x".into(),
                templates: vec!["/:a".into(), "/:b".into()],
            }
            .status_code(),
            500
        );
        assert_eq!(PathmuxError::DuplicateTemplate("/x".into()).status_code(), 500);
        assert_eq!(PathmuxError::ConfigurationError("x".into()).status_code(), 500);
    }

    #[test]
    fn test_display() {
        let err = PathmuxError::DuplicateParameterName {
            template: "/a/:x/:x".into(),
            label: "x".into(),
        };
        assert_eq!(err.to_string(), "Duplicate parameter 'x' in template '/a/:x/:x'");

        let err = PathmuxError::Ambiguous {
            path: "/some/1".into(),
            templates: vec!["/some/:a".into(), "/some/:b".into()],
        };
        assert_eq!(
            err.to_string(),
            "Ambiguous path '/some/1': matched equally by /some/:a, /some/:b"
        );
    }

    #[test]
    fn test_registration_error_classification() {
        assert!(PathmuxError::DuplicateTemplate("/a".into()).is_registration_error());
        assert!(PathmuxError::InvalidPattern {
            template: "/(".into(),
            reason: "unclosed group".into(),
        }
        .is_registration_error());
        assert!(!PathmuxError::NotFound("/a".into()).is_registration_error());
    }
}
