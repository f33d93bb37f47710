//! Rich diagnostic error types for the testimony generator.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly which resource was
//! exhausted or which call failed, and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the testimony crate.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum TestimonyError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Case(#[from] CaseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),
}

// ---------------------------------------------------------------------------
// Pool errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PoolError {
    #[error("the {what} pool is empty")]
    #[diagnostic(
        code(testimony::pool::empty),
        help(
            "The pool file parsed correctly but contains no entries. \
             Add entries to the TOML file, or fall back to the bundled pool."
        )
    )]
    Empty { what: &'static str },

    #[error("name pool exhausted: {drawn} name(s) already drawn, none remain")]
    #[diagnostic(
        code(testimony::pool::exhausted),
        help(
            "Every name in the working copy has been consumed by this case. \
             Use a larger name pool or request fewer arguments."
        )
    )]
    Exhausted { drawn: usize },

    #[error("failed to read pool file: {path}")]
    #[diagnostic(
        code(testimony::pool::io),
        help("Ensure the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pool \"{what}\": {message}")]
    #[diagnostic(
        code(testimony::pool::parse),
        help("Check the pool TOML syntax against the bundled files under data/pools/.")
    )]
    Parse { what: String, message: String },

    #[error("duplicate name \"{name}\" in pool")]
    #[diagnostic(
        code(testimony::pool::duplicate),
        help("Witness names must be unique; remove the duplicate entry.")
    )]
    DuplicateName { name: String },
}

pub type PoolResult<T> = std::result::Result<T, PoolError>;

// ---------------------------------------------------------------------------
// Case construction errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CaseError {
    #[error("insufficient names: case needs {requested} witnesses, pool has {available}")]
    #[diagnostic(
        code(testimony::case::insufficient_names),
        help(
            "A case never reuses a witness name, so the name pool must hold at \
             least as many names as the case has arguments. Use a larger pool \
             or a smaller shape."
        )
    )]
    InsufficientNames { requested: usize, available: usize },

    #[error("invalid shape: branch lengths must all be at least 1, got {length}")]
    #[diagnostic(
        code(testimony::case::invalid_shape),
        help("A zero-length branch attacks nothing. Remove it from the shape.")
    )]
    InvalidBranch { length: usize },

    #[error("invalid shape: a linear case needs at least one argument")]
    #[diagnostic(
        code(testimony::case::zero_arguments),
        help("Linear shapes count the root witness, so the minimum argument count is 1.")
    )]
    ZeroArguments,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pool(#[from] PoolError),
}

pub type CaseResult<T> = std::result::Result<T, CaseError>;

// ---------------------------------------------------------------------------
// Model backend errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("request to {backend} failed: {message}")]
    #[diagnostic(
        code(testimony::model::request),
        help("Check network connectivity and that the model id is valid for this backend.")
    )]
    Request {
        backend: &'static str,
        message: String,
    },

    #[error("malformed response from {backend}: {message}")]
    #[diagnostic(
        code(testimony::model::malformed),
        help("The API answered but the response body did not have the expected shape.")
    )]
    Malformed {
        backend: &'static str,
        message: String,
    },

    #[error("missing API key: set the {env_var} environment variable")]
    #[diagnostic(
        code(testimony::model::missing_key),
        help("Export the key in your shell before running.")
    )]
    MissingKey { env_var: &'static str },

    #[error("no backend known for model id \"{model_id}\"")]
    #[diagnostic(
        code(testimony::model::unknown),
        help(
            "Model ids containing \"gpt\" or \"o1\" route to OpenAI, \
             \"claude\" to Anthropic, and \"dummy\" to the offline backend."
        )
    )]
    UnknownModel { model_id: String },
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("failed to open {path} for writing")]
    #[diagnostic(
        code(testimony::export::io),
        help("Check that the parent directory exists and is writable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error: {message}")]
    #[diagnostic(
        code(testimony::export::csv),
        help("The record could not be serialized as a CSV row.")
    )]
    Csv { message: String },
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Convenience alias for functions returning testimony results.
pub type TestimonyResult<T> = std::result::Result<T, TestimonyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_error_converts_to_testimony_error() {
        let err = PoolError::Exhausted { drawn: 7 };
        let top: TestimonyError = err.into();
        assert!(matches!(
            top,
            TestimonyError::Pool(PoolError::Exhausted { .. })
        ));
    }

    #[test]
    fn case_error_wraps_pool_error() {
        let pool_err = PoolError::Empty { what: "statement" };
        let case_err: CaseError = pool_err.into();
        assert!(matches!(case_err, CaseError::Pool(PoolError::Empty { .. })));
    }

    #[test]
    fn insufficient_names_message_reports_quantities() {
        let err = CaseError::InsufficientNames {
            requested: 12,
            available: 4,
        };
        let msg = format!("{err}");
        assert!(msg.contains("12"));
        assert!(msg.contains("4"));
    }
}
