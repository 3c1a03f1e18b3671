//! Error types.

use std::io;

/// A violated consistency rule between `param` and `type` directives.
///
/// Every variant names the offending subject and the 1-based line of the
/// directive that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Type directives exist but the document declares no parameters at all.
    #[error("line {line}: type given for `{name}` but no parameters are declared")]
    NoParamError { name: String, line: usize },

    /// A parameter has no type directive while types are enforced.
    #[error("line {line}: parameter `{name}` has no type directive")]
    NoTypeError { name: String, line: usize },

    /// A type directive names a subject that is not a declared parameter.
    #[error("line {line}: type given for `{name}`, which is not a declared parameter")]
    ParamTypeMismatch { name: String, line: usize },
}

impl ValidationError {
    /// Name of the subject the error is about.
    pub fn name(&self) -> &str {
        match self {
            Self::NoParamError { name, .. }
            | Self::NoTypeError { name, .. }
            | Self::ParamTypeMismatch { name, .. } => name,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Self::NoParamError { line, .. }
            | Self::NoTypeError { line, .. }
            | Self::ParamTypeMismatch { line, .. } => *line,
        }
    }
}

/// Errors returned by [`crate::process`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to read input")]
    Read(#[source] io::Error),

    #[error("failed to write output")]
    Write(#[source] io::Error),

    #[error("invalid delimiter {0:?}: must be a single punctuation character such as ':' or '@'")]
    InvalidDelimiter(char),

    #[error("unknown format: {0}. Use markdown or html")]
    UnknownFormat(String),
}
