//! Swagger 2.0 and OpenAPI 3.0 documents decoded into a typed, fully
//! resolved model.
//!
//! Every in-document `$ref` is resolved once per build and shared through an
//! `Arc`. A reference that would re-enter a component still being built is
//! left as a named [`model::Structure`] with no value, so recursive schemas
//! terminate.

pub mod build;
pub mod config;
pub mod error;
pub mod inspect;
pub mod model;
pub mod openapi3;
pub mod parse;
pub mod swagger2;

pub use build::SpecFormat;
pub use error::{BuildError, DecodeError, ParseError, ResolveError, VersionError};
pub use parse::{Document, from_json, from_value, from_yaml};
