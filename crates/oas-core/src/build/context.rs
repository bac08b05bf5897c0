use std::any::Any;
use std::fmt;

use indexmap::IndexMap;

use super::resolver::ResolverSet;
use crate::error::BuildError;
use crate::model::{Either, OneOrMany, Reference};

/// Which of the two document formats is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecFormat {
    /// Swagger 2.0: `#/definitions/Name`.
    Swagger2,
    /// OpenAPI 3.0.x: `#/components/schemas/Name`.
    OpenApi3,
}

impl fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecFormat::Swagger2 => f.write_str("swagger 2.0"),
            SpecFormat::OpenApi3 => f.write_str("openapi 3.0"),
        }
    }
}

/// The reusable component tables a pointer can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Schemas,
    Parameters,
    Responses,
    SecuritySchemes,
    Examples,
    RequestBodies,
    Headers,
    Links,
    Callbacks,
}

impl ComponentKind {
    /// Path segment naming this table, or `None` when the format has no such
    /// table.
    pub fn segment(self, format: SpecFormat) -> Option<&'static str> {
        match (format, self) {
            (SpecFormat::Swagger2, ComponentKind::Schemas) => Some("definitions"),
            (SpecFormat::Swagger2, ComponentKind::Parameters) => Some("parameters"),
            (SpecFormat::Swagger2, ComponentKind::Responses) => Some("responses"),
            (SpecFormat::Swagger2, _) => None,
            (SpecFormat::OpenApi3, kind) => Some(match kind {
                ComponentKind::Schemas => "schemas",
                ComponentKind::Parameters => "parameters",
                ComponentKind::Responses => "responses",
                ComponentKind::SecuritySchemes => "securitySchemes",
                ComponentKind::Examples => "examples",
                ComponentKind::RequestBodies => "requestBodies",
                ComponentKind::Headers => "headers",
                ComponentKind::Links => "links",
                ComponentKind::Callbacks => "callbacks",
            }),
        }
    }
}

/// Second phase of construction: a builder produces its resolved value.
pub trait Build {
    type Output;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Self::Output, BuildError>;
}

/// A builder stored in a reusable component table and reachable by pointer.
pub trait Component: Build<Output: 'static> + Sized + 'static {
    const KIND: ComponentKind;
}

/// One component table: name to builder (or alias pointer).
pub type Table<C> = IndexMap<String, Reference<C>>;

/// The document being built, as seen by the resolver.
pub trait ComponentSource {
    fn format(&self) -> SpecFormat;

    /// The table for `kind`, as a `Table<C>` for the matching component type.
    fn table(&self, kind: ComponentKind) -> Option<&dyn Any>;
}

/// Everything a builder needs during the build pass: the component tables
/// and the per-build resolver state.
pub struct BuildContext<'a> {
    pub(crate) source: &'a dyn ComponentSource,
    pub(crate) resolvers: ResolverSet,
}

impl<'a> BuildContext<'a> {
    /// A context with no resolver scope; call [`BuildContext::setup`] before
    /// resolving anything.
    pub fn new(source: &'a dyn ComponentSource) -> Self {
        Self {
            source,
            resolvers: ResolverSet::default(),
        }
    }

    pub fn format(&self) -> SpecFormat {
        self.source.format()
    }

    pub fn source(&self) -> &'a dyn ComponentSource {
        self.source
    }

    /// Start a build scope with empty caches.
    pub fn setup(&mut self) {
        self.resolvers.setup();
    }

    /// Drop every cache; resolving afterwards fails until the next setup.
    pub fn teardown(&mut self) {
        self.resolvers.teardown();
    }

    pub fn is_active(&self) -> bool {
        self.resolvers.is_active()
    }
}

impl<T: Build> Build for Option<T> {
    type Output = Option<T::Output>;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Self::Output, BuildError> {
        self.as_ref().map(|builder| builder.build(cx)).transpose()
    }
}

impl<T: Build> Build for Vec<T> {
    type Output = Vec<T::Output>;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Self::Output, BuildError> {
        self.iter().map(|builder| builder.build(cx)).collect()
    }
}

impl<T: Build> Build for IndexMap<String, T> {
    type Output = IndexMap<String, T::Output>;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Self::Output, BuildError> {
        self.iter()
            .map(|(name, builder)| Ok((name.clone(), builder.build(cx)?)))
            .collect()
    }
}

impl<T: Build> Build for OneOrMany<T> {
    type Output = OneOrMany<T::Output>;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Self::Output, BuildError> {
        self.try_map(|builder| builder.build(cx))
    }
}

/// A flag stays as is; the other side is built.
impl<T: Build> Build for Either<bool, T> {
    type Output = Either<bool, T::Output>;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Self::Output, BuildError> {
        Ok(match self {
            Either::A(flag) => Either::A(*flag),
            Either::B(builder) => Either::B(builder.build(cx)?),
        })
    }
}
