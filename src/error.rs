//! Error types for the complexity-metrics core.
//!
//! Mirrors the error taxonomy a module/project analysis can raise:
//! malformed input, a zero-cyclomatic maintainability computation, or a
//! module-level failure re-raised with its path attached.

use std::fmt;

/// The error type returned by [`crate::module_analyser::ModuleAnalyser`] and
/// [`crate::project_analyser::ProjectAnalyser`].
#[derive(Debug)]
pub enum CoreError {
    /// The AST or walker passed to `analyse` was missing or malformed, or a
    /// module's `path` was empty.
    InvalidInput {
        /// Description of what was invalid.
        message: String,
    },

    /// Maintainability-index computation was attempted with an average
    /// cyclomatic complexity of zero.
    ZeroCyclomatic,

    /// An error raised during one module's analysis, re-raised by the
    /// project analyser with that module's path attached.
    PropagatedModuleError {
        /// The path of the module whose analysis failed.
        path: String,
        /// The underlying error.
        source: Box<CoreError>,
    },
}

impl CoreError {
    /// Creates a new [`CoreError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Wraps `source` as a [`CoreError::PropagatedModuleError`] for `path`.
    pub fn propagate(path: impl Into<String>, source: CoreError) -> Self {
        Self::PropagatedModuleError {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Returns the name of this error variant, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "InvalidInput",
            Self::ZeroCyclomatic => "ZeroCyclomatic",
            Self::PropagatedModuleError { .. } => "PropagatedModuleError",
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { message } => write!(f, "invalid input: {message}"),
            Self::ZeroCyclomatic => write!(
                f,
                "cannot compute maintainability index: average cyclomatic complexity is zero"
            ),
            Self::PropagatedModuleError { path, source } => {
                write!(f, "{path}: {source}")
            }
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PropagatedModuleError { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the core.
pub type Result<T> = std::result::Result<T, CoreError>;
