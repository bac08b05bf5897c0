use std::panic::Location;

use thiserror::Error;

/// What went wrong while decoding a raw document node into a builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("expected a JSON object for {0}")]
    NotAnObject(&'static str),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid value for field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Unknown data type {0}")]
    UnknownDataType(String),

    #[error("Unsupported data type {0}")]
    UnsupportedDataType(String),

    #[error("allOf subschema {0} does not resolve to an object schema")]
    NonObjectSubschema(String),
}

/// A decoding failure together with the source location that raised it.
#[derive(Debug, Clone, Error)]
#[error("{kind} (raised at {origin})")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub origin: &'static Location<'static>,
}

impl DecodeError {
    #[track_caller]
    pub fn new(kind: DecodeErrorKind) -> Self {
        Self {
            kind,
            origin: Location::caller(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("invalid version: empty version string")]
    Empty,

    #[error("invalid version `{version}`: component `{component}` is not a non-negative integer")]
    InvalidComponent { version: String, component: String },

    #[error("invalid version: expected {expected}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid context: reference {0} resolved outside of a document build")]
    InvalidContext(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("unsupported reference: {0}")]
    UnsupportedReference(String),

    #[error("unresolved reference: {0}")]
    UnresolvedReference(String),
}

/// Failure of the build pass (builder tree to resolved model).
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document declares neither a `swagger` nor an `openapi` version")]
    UnknownFormat,

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("resolver error: {0}")]
    Resolve(#[from] ResolveError),
}

impl From<BuildError> for ParseError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Decode(e) => ParseError::Decode(e),
            BuildError::Resolve(e) => ParseError::Resolve(e),
        }
    }
}
