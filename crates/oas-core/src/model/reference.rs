use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// An in-document pointer (`#/definitions/Pet`, `#/components/schemas/Pet`)
/// to a reusable component built by `T`.
pub struct Pointer<T> {
    path: String,
    marker: PhantomData<fn() -> T>,
}

impl<T> Pointer<T> {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            marker: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<T> Clone for Pointer<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<T> fmt::Debug for Pointer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pointer").field(&self.path).finish()
    }
}

impl<T> PartialEq for Pointer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

/// Either a pointer to a reusable component or the inline value itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference<T> {
    Pointer(Pointer<T>),
    Value(T),
}

impl<T> Reference<T> {
    pub fn as_pointer(&self) -> Option<&Pointer<T>> {
        match self {
            Reference::Pointer(pointer) => Some(pointer),
            Reference::Value(_) => None,
        }
    }
}

/// A named, resolved component. Every structure resolved from the same name
/// during one build shares the same value.
///
/// `value` is `None` only when the name was reached again while its own
/// resolution was still in flight (a reference cycle).
#[derive(Debug, PartialEq)]
pub struct Structure<T> {
    name: String,
    value: Option<Arc<T>>,
}

impl<T> Structure<T> {
    pub fn new(name: impl Into<String>, value: Option<Arc<T>>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_deref()
    }

    pub fn shared(&self) -> Option<&Arc<T>> {
        self.value.as_ref()
    }

    pub fn into_shared(self) -> Option<Arc<T>> {
        self.value
    }

    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Clone for Structure<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            value: self.value.clone(),
        }
    }
}

// Structures serialize by name only; the named value is serialized once in
// its component table.
impl<T> Serialize for Structure<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Structure", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("resolved", &self.is_resolved())?;
        state.end()
    }
}

/// Write a component table with every value in full. A cycle placeholder
/// left at the top of a table (a self-referencing alias) is written as `null`.
pub(crate) fn serialize_table<T: Serialize, S: Serializer>(
    table: &IndexMap<String, Structure<T>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(table.iter().map(|(name, structure)| (name, structure.value())))
}
