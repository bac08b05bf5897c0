use indexmap::IndexMap;
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeErrorKind};
use crate::model::{Either, OneOrMany, Pointer, Reference};

/// Construction of a builder from a raw document node.
pub trait Decode: Sized {
    fn decode(value: &Value) -> Result<Self, DecodeError>;
}

/// Keyed access to the members of one JSON object node.
///
/// `required` and `nested` fields fail the decode; `optional` leaf fields
/// that do not parse are logged and treated as absent.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'v> {
    node: &'v Map<String, Value>,
    context: &'static str,
}

impl<'v> Fields<'v> {
    #[track_caller]
    pub fn of(value: &'v Value, context: &'static str) -> Result<Self, DecodeError> {
        match value {
            Value::Object(node) => Ok(Self { node, context }),
            _ => Err(DecodeError::new(DecodeErrorKind::NotAnObject(context))),
        }
    }

    pub fn node(&self) -> &'v Map<String, Value> {
        self.node
    }

    pub fn contains(&self, key: &str) -> bool {
        self.raw(key).is_some()
    }

    /// The member under `key`; an explicit `null` counts as absent.
    pub fn raw(&self, key: &str) -> Option<&'v Value> {
        self.node.get(key).filter(|value| !value.is_null())
    }

    #[track_caller]
    pub fn required<T: DeserializeOwned>(&self, key: &str) -> Result<T, DecodeError> {
        match self.raw(key) {
            Some(value) => parse(key, value),
            None => Err(self.missing(key)),
        }
    }

    /// An optional field that must parse when present.
    #[track_caller]
    pub fn strict<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        self.raw(key).map(|value| parse(key, value)).transpose()
    }

    /// An optional leaf field. A value that does not parse is dropped.
    pub fn optional<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.raw(key)?;
        match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!("Ignoring malformed `{key}` on {}: {err}", self.context);
                None
            }
        }
    }

    /// An optional boolean defaulting to `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.optional(key).unwrap_or(false)
    }

    pub fn list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.optional(key).unwrap_or_default()
    }

    #[track_caller]
    pub fn nested<T: Decode>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        self.raw(key).map(T::decode).transpose()
    }

    #[track_caller]
    pub fn required_nested<T: Decode>(&self, key: &str) -> Result<T, DecodeError> {
        match self.raw(key) {
            Some(value) => T::decode(value),
            None => Err(self.missing(key)),
        }
    }

    /// A name-keyed map of nested nodes; absent means empty.
    #[track_caller]
    pub fn nested_map<T: Decode>(&self, key: &str) -> Result<IndexMap<String, T>, DecodeError> {
        match self.raw(key) {
            None => Ok(IndexMap::new()),
            Some(value) => decode_entries(key, value),
        }
    }

    /// A name-keyed map of nested nodes that must be present.
    #[track_caller]
    pub fn required_nested_map<T: Decode>(
        &self,
        key: &str,
    ) -> Result<IndexMap<String, T>, DecodeError> {
        match self.raw(key) {
            None => Err(self.missing(key)),
            Some(value) => decode_entries(key, value),
        }
    }

    /// The required `responses` object, split into numeric status codes and
    /// the `default` entry.
    #[track_caller]
    pub fn responses<T: Decode>(
        &self,
    ) -> Result<(IndexMap<u16, Reference<T>>, Option<Reference<T>>), DecodeError> {
        let entries: IndexMap<String, Reference<T>> = self.required_nested_map("responses")?;
        let mut codes = IndexMap::new();
        let mut default = None;
        for (key, response) in entries {
            if key == "default" {
                default = Some(response);
            } else if let Some(code) = status_code(&key) {
                codes.insert(code, response);
            }
        }
        Ok((codes, default))
    }

    /// A list of nested nodes; absent means empty.
    #[track_caller]
    pub fn nested_list<T: Decode>(&self, key: &str) -> Result<Vec<T>, DecodeError> {
        match self.raw(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items.iter().map(T::decode).collect(),
            Some(_) => Err(invalid(key, "expected an array")),
        }
    }

    /// A `bool` or a nested node, e.g. `additionalProperties`.
    #[track_caller]
    pub fn flag_or_nested<T: Decode>(
        &self,
        key: &str,
        default: bool,
    ) -> Result<Either<bool, T>, DecodeError> {
        match self.raw(key) {
            None => Ok(Either::A(default)),
            Some(Value::Bool(flag)) => Ok(Either::A(*flag)),
            Some(value) => Ok(Either::B(T::decode(value)?)),
        }
    }

    /// A single nested node or a list of them.
    #[track_caller]
    pub fn one_or_many<T: Decode>(&self, key: &str) -> Result<OneOrMany<T>, DecodeError> {
        match self.raw(key) {
            None => Err(self.missing(key)),
            Some(Value::Array(items)) => Ok(OneOrMany::Many(
                items.iter().map(T::decode).collect::<Result<_, _>>()?,
            )),
            Some(value) => Ok(OneOrMany::One(T::decode(value)?)),
        }
    }

    #[track_caller]
    pub(crate) fn missing(&self, key: &str) -> DecodeError {
        DecodeError::new(DecodeErrorKind::MissingField(format!(
            "{key} (in {})",
            self.context
        )))
    }
}

#[track_caller]
fn decode_entries<T: Decode>(key: &str, value: &Value) -> Result<IndexMap<String, T>, DecodeError> {
    match value {
        Value::Object(entries) => entries
            .iter()
            .map(|(name, value)| Ok((name.clone(), T::decode(value)?)))
            .collect(),
        _ => Err(invalid(key, "expected an object")),
    }
}

#[track_caller]
fn parse<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T, DecodeError> {
    T::deserialize(value).map_err(|err| invalid(key, &err.to_string()))
}

#[track_caller]
fn invalid(key: &str, reason: &str) -> DecodeError {
    DecodeError::new(DecodeErrorKind::InvalidField {
        field: key.to_string(),
        reason: reason.to_string(),
    })
}

/// A node carrying a string `$ref` decodes as a pointer; anything else decodes
/// inline.
impl<T: Decode> Decode for Reference<T> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value.get("$ref") {
            Some(Value::String(path)) => Ok(Reference::Pointer(Pointer::new(path.as_str()))),
            Some(other) => Err(invalid("$ref", &format!("expected a string, found {other}"))),
            None => Ok(Reference::Value(T::decode(value)?)),
        }
    }
}

impl<T: Decode> Decode for Pointer<T> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        Fields::of(value, "reference")?
            .required::<String>("$ref")
            .map(Pointer::new)
    }
}

/// Numeric response keys. Ranges such as `2XX` are not representable and
/// are skipped.
pub fn status_code(key: &str) -> Option<u16> {
    match key.parse::<u16>() {
        Ok(code) => Some(code),
        Err(_) => {
            warn!("Skipping response with non-numeric status `{key}`");
            None
        }
    }
}
