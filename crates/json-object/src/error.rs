//! Error types.
//!
//! Only [`ParseError`] crosses the construction boundary. [`CoercionMiss`] and
//! [`EmbeddedParseMiss`] are recovered locally by the coercion engine and the
//! graph builder.

use thiserror::Error;

use crate::temporal::TemporalError;

/// Fatal construction error for the outer document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
    #[error("document nesting exceeds the depth limit of {0}")]
    TooDeep(usize),
}

/// One candidate type refused one value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoercionMiss {
    #[error("{value} cannot be read as {target}")]
    Incompatible {
        target: &'static str,
        value: &'static str,
    },
    #[error("text {0:?} is not a valid {1}")]
    InvalidText(String, &'static str),
    #[error(transparent)]
    Temporal(#[from] TemporalError),
    #[error("no member of enum {0} matches")]
    NoEnumMember(String),
    #[error("embedded document rejected: {0}")]
    Embedded(#[from] EmbeddedParseMiss),
    #[error("nested construction failed: {0}")]
    Construction(String),
}

/// A text element that does not hold an embedded JSON object.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmbeddedParseMiss {
    #[error("not JSON: {0}")]
    Json(String),
    #[error("embedded JSON is {0}, not an object")]
    NotAnObject(&'static str),
}
