//! Error handling for fieldgraph
//!
//! The dependency engine is deliberately permissive: unknown field keys and
//! missing callbacks are skipped, never reported. The only failure the engine
//! itself produces is a dependency cycle. Everything else in this module
//! belongs to the layers around it (registration, schemas, configuration,
//! custom validators).
//!
//! # Architecture
//!
//! - [`FieldError`] - Enumerated error types for every reportable failure
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Library APIs return `Result<T, FieldError>`. File-backed layers (schemas,
//! configuration, CLI) use [`anyhow::Result`] and attach context; use
//! [`user_friendly_error`] to turn either into something printable.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fieldgraph::core::{FieldError, user_friendly_error};
//!
//! let error = FieldError::CircularDependency {
//!     field: "a".to_string(),
//!     chain: "a → b → a".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for fieldgraph operations
///
/// # Error Categories
///
/// ## Dependency Graph
/// - [`CircularDependency`] - A field transitively depends on itself
/// - [`DuplicateField`] - Two registered fields share a key
///
/// ## Validation Rules
/// - [`InvalidRule`] - A rule factory rejected its input
/// - [`UnknownValidator`] - A custom rule has no registered validator
///
/// ## Configuration and Parsing
/// - [`SchemaParseError`] - Form schema file is malformed
/// - [`ConfigError`] - Configuration file issues
///
/// [`CircularDependency`]: FieldError::CircularDependency
/// [`DuplicateField`]: FieldError::DuplicateField
/// [`InvalidRule`]: FieldError::InvalidRule
/// [`UnknownValidator`]: FieldError::UnknownValidator
/// [`SchemaParseError`]: FieldError::SchemaParseError
/// [`ConfigError`]: FieldError::ConfigError
#[derive(Error, Debug, Clone)]
pub enum FieldError {
    /// Circular dependency detected between form fields
    ///
    /// Raised by cycle detection only. Resolution never raises it: a cyclic
    /// configuration that slips through still terminates, it just propagates
    /// in an unspecified order.
    ///
    /// # Fields
    /// - `field`: The dependent key that was found on the active DFS path
    /// - `chain`: The path that closes the cycle, e.g. `a → b → a`
    #[error("Circular dependency detected at field '{field}': {chain}")]
    CircularDependency {
        /// The field key that closes the cycle
        field: String,
        /// String representation of the circular dependency chain
        chain: String,
    },

    /// A field with the same key is already registered
    #[error("Field '{key}' is already registered")]
    DuplicateField {
        /// The duplicated field key
        key: String,
    },

    /// A validation rule was constructed with invalid arguments
    #[error("Invalid validation rule '{rule}': {reason}")]
    InvalidRule {
        /// Name of the rule being constructed
        rule: String,
        /// Why the rule was rejected
        reason: String,
    },

    /// No custom validator registered under this name
    #[error("No validator registered for rule '{name}'")]
    UnknownValidator {
        /// The rule name that was looked up
        name: String,
    },

    /// Form schema parsing error
    #[error("Invalid form schema in {file}: {reason}")]
    SchemaParseError {
        /// Path to the schema that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// Wraps a [`FieldError`] with an optional suggestion (printed in green) and
/// optional details (printed in yellow).
///
/// ```rust,no_run
/// use fieldgraph::core::{ErrorContext, FieldError};
///
/// let ctx = ErrorContext::new(FieldError::DuplicateField { key: "city".to_string() })
///     .with_suggestion("Rename one of the fields")
///     .with_details("Field keys must be unique within a form");
/// ctx.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: FieldError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: FieldError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known [`FieldError`] variants get a tailored suggestion. IO and TOML
/// errors are recognised through the anyhow chain. Anything else is reported
/// with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(field_error) = error.downcast_ref::<FieldError>() {
        return create_error_context(field_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>()
        && io_error.kind() == std::io::ErrorKind::NotFound
    {
        return ErrorContext::new(FieldError::Other {
            message: error.to_string(),
        })
        .with_suggestion("Check that the file exists and the path is correct");
    }

    // Schema parse failures are already SchemaParseError; a bare TOML error
    // here comes from the engine config.
    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return create_error_context(FieldError::ConfigError {
            message: format!("{error}: {toml_error}"),
        });
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(FieldError::Other {
        message,
    })
}

fn create_error_context(error: FieldError) -> ErrorContext {
    match &error {
        FieldError::CircularDependency { chain, .. } => {
            let details = format!(
                "Dependency chain: {chain}. A field cannot depend on itself directly or indirectly"
            );
            ErrorContext::new(error)
                .with_suggestion("Remove one of the depends_on entries along the chain")
                .with_details(details)
        }
        FieldError::DuplicateField { .. } => ErrorContext::new(error)
            .with_suggestion("Rename one of the fields so every key is unique within the form"),
        FieldError::InvalidRule { .. } => ErrorContext::new(error)
            .with_suggestion("Check the arguments passed to the validation rule"),
        FieldError::UnknownValidator { name } => {
            let suggestion =
                format!("Register a validator named '{name}' before running custom rules");
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        FieldError::SchemaParseError { file, .. } => {
            let suggestion = format!(
                "Check {file}: each [[fields]] entry needs a key; reactions live under on.<context>"
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        FieldError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check ~/.fieldgraph/config.toml or the file passed with --config"),
        _ => ErrorContext::new(error),
    }
}
