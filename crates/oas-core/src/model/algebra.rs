use serde::{Serialize, Serializer};

use super::reference::Structure;

/// A value of one of two shapes, e.g. `additionalProperties: true` versus a
/// schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Either<A, B> {
    A(A),
    B(B),
}

impl<A, B> Either<A, B> {
    pub fn as_a(&self) -> Option<&A> {
        match self {
            Either::A(a) => Some(a),
            Either::B(_) => None,
        }
    }

    pub fn as_b(&self) -> Option<&B> {
        match self {
            Either::A(_) => None,
            Either::B(b) => Some(b),
        }
    }

    pub fn map_b<C>(self, f: impl FnOnce(B) -> C) -> Either<A, C> {
        match self {
            Either::A(a) => Either::A(a),
            Either::B(b) => Either::B(f(b)),
        }
    }
}

impl<A: Serialize, B: Serialize> Serialize for Either<A, B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Either::A(a) => a.serialize(serializer),
            Either::B(b) => b.serialize(serializer),
        }
    }
}

/// A field that was either written inline or referenced by pointer.
pub type Resolved<T> = Either<T, Structure<T>>;

impl<T> Either<T, Structure<T>> {
    /// The resolved value, whether inline or behind a structure. `None` only
    /// for a cycle placeholder.
    pub fn value(&self) -> Option<&T> {
        match self {
            Either::A(value) => Some(value),
            Either::B(structure) => structure.value(),
        }
    }

    /// Name of the referenced component, if this was a pointer.
    pub fn reference_name(&self) -> Option<&str> {
        self.as_b().map(Structure::name)
    }
}

/// One value, or a homogeneous list of them. For array items a list means a
/// fixed-arity tuple.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, OneOrMany::Many(_))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let items: &[T] = match self {
            OneOrMany::One(item) => std::slice::from_ref(item),
            OneOrMany::Many(items) => items,
        };
        items.iter()
    }

    pub fn try_map<U, E>(&self, mut f: impl FnMut(&T) -> Result<U, E>) -> Result<OneOrMany<U>, E> {
        Ok(match self {
            OneOrMany::One(item) => OneOrMany::One(f(item)?),
            OneOrMany::Many(items) => {
                OneOrMany::Many(items.iter().map(f).collect::<Result<Vec<_>, _>>()?)
            }
        })
    }
}

impl<T: Serialize> Serialize for OneOrMany<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OneOrMany::One(item) => item.serialize(serializer),
            OneOrMany::Many(items) => items.serialize(serializer),
        }
    }
}
