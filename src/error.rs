//! Error types for the viewer core.
//!
//! Every fallible stage of the pipeline has its own enum so the HTTP layer
//! can map each kind to a distinct status code instead of a blanket 200.

use thiserror::Error;

/// Errors produced while turning an uploaded file into records.
///
/// All of these abort the upload as a whole; a partially loaded file is
/// never stored in the session.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file extension matches none of the supported formats.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The file parsed cleanly but produced zero data rows.
    #[error("the uploaded file contains no records")]
    EmptyInput,

    /// A required column is absent. Named by its canonical spelling.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A field value could not be converted to its declared type.
    #[error("row {row}: field '{field}' cannot be converted to a number")]
    TypeCoercion { row: usize, field: &'static str },

    /// The uploaded bytes are not valid UTF-8 text.
    #[error("the uploaded file is not valid UTF-8")]
    Encoding,

    /// Structurally broken input (bad JSON, torn CSV row).
    #[error("malformed input: {0}")]
    Malformed(String),
}

/// Errors from the filter stage.
#[derive(Debug, Error)]
pub enum FilterError {
    /// `min_price` was given but is not a number.
    #[error("invalid minimum price: '{0}'")]
    InvalidValue(String),
}

/// Errors from the sort stage.
#[derive(Debug, Error)]
pub enum SortError {
    /// The requested sort key is not one of the record fields.
    #[error("unknown sort field: '{0}'")]
    UnknownField(String),
}

/// Anything a single process request can fail with.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Sort(#[from] SortError),
}
