use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, trace};

use super::context::{BuildContext, Component, SpecFormat, Table};
use crate::error::{BuildError, ResolveError};
use crate::model::{Either, Pointer, Reference, Resolved, Structure};

/// Resolution state for one component kind within one build: values
/// already built, and names whose build is still in flight.
pub struct Resolver<C: Component> {
    cache: HashMap<String, Arc<C::Output>>,
    resolving: HashSet<String>,
}

impl<C: Component> Default for Resolver<C> {
    fn default() -> Self {
        Self {
            cache: HashMap::new(),
            resolving: HashSet::new(),
        }
    }
}

impl<C: Component> Resolver<C> {
    pub fn cached(&self, name: &str) -> Option<&Arc<C::Output>> {
        self.cache.get(name)
    }

    pub fn is_resolving(&self, name: &str) -> bool {
        self.resolving.contains(name)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// One [`Resolver`] per component kind, alive between `setup` and
/// `teardown`.
#[derive(Default)]
pub struct ResolverSet {
    scope: Option<HashMap<TypeId, Box<dyn Any>>>,
}

impl ResolverSet {
    pub fn setup(&mut self) {
        self.scope = Some(HashMap::new());
    }

    pub fn teardown(&mut self) {
        self.scope = None;
    }

    pub fn is_active(&self) -> bool {
        self.scope.is_some()
    }

    /// The resolver for `C`, created on first use. `path` only labels the
    /// error when no scope is active.
    pub fn resolver<C: Component>(&mut self, path: &str) -> Result<&mut Resolver<C>, ResolveError> {
        let invalid = || ResolveError::InvalidContext(path.to_string());
        self.scope
            .as_mut()
            .ok_or_else(invalid)?
            .entry(TypeId::of::<C>())
            .or_insert_with(|| Box::new(Resolver::<C>::default()))
            .downcast_mut::<Resolver<C>>()
            .ok_or_else(invalid)
    }
}

/// Split a pointer into the component name it designates, checking the path
/// shape for `format` and the table segment for `C`.
pub fn pointer_name<C: Component>(format: SpecFormat, path: &str) -> Result<String, ResolveError> {
    let invalid = || ResolveError::InvalidPath(path.to_string());
    let expected = C::KIND
        .segment(format)
        .ok_or_else(|| ResolveError::UnsupportedReference(path.to_string()))?;

    let segments: Vec<&str> = path.split('/').collect();
    let (segment, name) = match (format, segments.as_slice()) {
        (SpecFormat::Swagger2, ["#", segment, name]) => (*segment, *name),
        (SpecFormat::OpenApi3, ["#", "components", segment, name]) => (*segment, *name),
        _ => return Err(invalid()),
    };
    if segment != expected || name.is_empty() {
        return Err(invalid());
    }
    Ok(name.replace("~1", "/").replace("~0", "~"))
}

/// Resolve a pointer to its named, shared value.
pub fn resolve<C: Component>(
    cx: &mut BuildContext<'_>,
    pointer: &Pointer<C>,
) -> Result<Structure<C::Output>, BuildError> {
    let name = pointer_name::<C>(cx.format(), pointer.path())?;
    trace!("Resolving {} as {:?} `{name}`", pointer.path(), C::KIND);
    resolve_named::<C>(cx, &name)
}

/// Resolve a component by name.
///
/// A cached name returns the cached value. A name that is still being
/// resolved further up the stack returns a structure with no value, and the
/// cycle is not entered again. Otherwise the entry is built, cached and
/// returned; an entry that is itself a pointer is followed, and its value is
/// recorded under this name too.
pub fn resolve_named<'a, C: Component>(
    cx: &mut BuildContext<'a>,
    name: &str,
) -> Result<Structure<C::Output>, BuildError> {
    {
        let resolver = cx.resolvers.resolver::<C>(name)?;
        if let Some(value) = resolver.cached(name) {
            trace!("Cache hit for {:?} `{name}`", C::KIND);
            return Ok(Structure::new(name, Some(Arc::clone(value))));
        }
        if resolver.is_resolving(name) {
            debug!("Cycle detected at {:?} `{name}`; leaving it unresolved here", C::KIND);
            return Ok(Structure::new(name, None));
        }
    }

    let source = cx.source;
    let entry: &'a Reference<C> = source
        .table(C::KIND)
        .and_then(|table| table.downcast_ref::<Table<C>>())
        .ok_or_else(|| ResolveError::UnsupportedReference(name.to_string()))?
        .get(name)
        .ok_or_else(|| ResolveError::UnresolvedReference(name.to_string()))?;

    cx.resolvers.resolver::<C>(name)?.resolving.insert(name.to_string());
    let outcome = match entry {
        Reference::Value(builder) => builder.build(cx).map(|value| Some(Arc::new(value))),
        Reference::Pointer(inner) => resolve::<C>(cx, inner).map(Structure::into_shared),
    };

    let resolver = cx.resolvers.resolver::<C>(name)?;
    resolver.resolving.remove(name);
    let value = outcome?;
    if let Some(value) = &value {
        debug!("Resolved {:?} `{name}`", C::KIND);
        resolver.cache.insert(name.to_string(), Arc::clone(value));
    }
    Ok(Structure::new(name, value))
}

/// Build an inline value, or resolve a pointer to a shared one.
pub fn resolve_reference<C: Component>(
    cx: &mut BuildContext<'_>,
    reference: &Reference<C>,
) -> Result<Resolved<C::Output>, BuildError> {
    match reference {
        Reference::Value(builder) => Ok(Either::A(builder.build(cx)?)),
        Reference::Pointer(pointer) => Ok(Either::B(resolve(cx, pointer)?)),
    }
}

/// [`resolve_reference`] over a name-keyed map.
pub fn resolve_map<C: Component>(
    cx: &mut BuildContext<'_>,
    references: &IndexMap<String, Reference<C>>,
) -> Result<IndexMap<String, Resolved<C::Output>>, BuildError> {
    references
        .iter()
        .map(|(name, reference)| Ok((name.clone(), resolve_reference(cx, reference)?)))
        .collect()
}

/// Force resolution of every entry in `table`, returning each structure in
/// table order.
pub fn resolve_table<C: Component>(
    cx: &mut BuildContext<'_>,
    table: &Table<C>,
) -> Result<IndexMap<String, Structure<C::Output>>, BuildError> {
    debug!("Pre-resolving {} {:?} entries", table.len(), C::KIND);
    table
        .keys()
        .map(|name| Ok((name.clone(), resolve_named::<C>(cx, name)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::build::context::{Build, ComponentKind, ComponentSource};

    /// Builds a copy of its label and counts how often it was asked to.
    struct Counting {
        label: &'static str,
        builds: Rc<Cell<usize>>,
        /// Name resolved from inside this build, to create cycles.
        inner: Option<&'static str>,
    }

    impl Build for Counting {
        type Output = (String, Option<Structure<(String, Option<()>)>>);

        fn build(&self, cx: &mut BuildContext<'_>) -> Result<Self::Output, BuildError> {
            self.builds.set(self.builds.get() + 1);
            let inner = match self.inner {
                Some(name) => {
                    let structure = resolve_named::<Counting>(cx, name)?;
                    Some(Structure::new(
                        structure.name(),
                        structure.value().map(|(label, _)| Arc::new((label.clone(), None))),
                    ))
                }
                None => None,
            };
            Ok((self.label.to_string(), inner))
        }
    }

    impl Component for Counting {
        const KIND: ComponentKind = ComponentKind::Schemas;
    }

    struct Stub {
        format: SpecFormat,
        table: Table<Counting>,
    }

    impl ComponentSource for Stub {
        fn format(&self) -> SpecFormat {
            self.format
        }

        fn table(&self, kind: ComponentKind) -> Option<&dyn Any> {
            (kind == ComponentKind::Schemas).then_some(&self.table as &dyn Any)
        }
    }

    /// A component kind the stub source has no table for.
    struct Header;

    impl Build for Header {
        type Output = ();

        fn build(&self, _cx: &mut BuildContext<'_>) -> Result<(), BuildError> {
            Ok(())
        }
    }

    impl Component for Header {
        const KIND: ComponentKind = ComponentKind::Headers;
    }

    fn stub() -> Stub {
        Stub {
            format: SpecFormat::Swagger2,
            table: Table::new(),
        }
    }

    fn counting(
        label: &'static str,
        builds: &Rc<Cell<usize>>,
        inner: Option<&'static str>,
    ) -> Reference<Counting> {
        Reference::Value(Counting {
            label,
            builds: Rc::clone(builds),
            inner,
        })
    }

    #[test]
    fn resolution_is_built_once_and_shared() {
        let builds = Rc::new(Cell::new(0));
        let mut source = stub();
        source.table.insert("Foo".into(), counting("foo", &builds, None));
        let mut cx = BuildContext::new(&source);
        cx.setup();

        let pointer = Pointer::<Counting>::new("#/definitions/Foo");
        let first = resolve(&mut cx, &pointer).unwrap();
        let second = resolve(&mut cx, &pointer).unwrap();

        assert_eq!(builds.get(), 1);
        assert!(Arc::ptr_eq(first.shared().unwrap(), second.shared().unwrap()));
        assert_eq!(first.name(), "Foo");
    }

    #[test]
    fn cycle_yields_placeholder_then_full_value() {
        let builds = Rc::new(Cell::new(0));
        let mut source = stub();
        source.table.insert("A".into(), counting("a", &builds, Some("B")));
        source.table.insert("B".into(), counting("b", &builds, Some("A")));
        let mut cx = BuildContext::new(&source);
        cx.setup();

        let a = resolve_named::<Counting>(&mut cx, "A").unwrap();
        let (label, b) = a.value().unwrap();
        assert_eq!(label, "a");
        let b = b.as_ref().unwrap();
        assert_eq!(b.name(), "B");
        // B was built while A was in flight, so its link back to A is empty.
        let b_cached = cx.resolvers.resolver::<Counting>("B").unwrap().cached("B").cloned().unwrap();
        let back_to_a = b_cached.1.as_ref().unwrap();
        assert_eq!(back_to_a.name(), "A");
        assert!(!back_to_a.is_resolved());

        // A later, independent lookup sees the finished value.
        let again = resolve_named::<Counting>(&mut cx, "A").unwrap();
        assert!(again.is_resolved());
        assert_eq!(builds.get(), 2);
    }

    #[test]
    fn alias_entries_follow_the_inner_pointer() {
        let builds = Rc::new(Cell::new(0));
        let mut source = stub();
        source.table.insert("Alias".into(), Reference::Pointer(Pointer::new("#/definitions/Target")));
        source.table.insert("Target".into(), counting("target", &builds, None));
        let mut cx = BuildContext::new(&source);
        cx.setup();

        let alias = resolve_named::<Counting>(&mut cx, "Alias").unwrap();
        let target = resolve_named::<Counting>(&mut cx, "Target").unwrap();
        assert_eq!(alias.name(), "Alias");
        assert_eq!(alias.value().unwrap().0, "target");
        assert!(Arc::ptr_eq(alias.shared().unwrap(), target.shared().unwrap()));
        assert_eq!(builds.get(), 1);
    }

    #[test]
    fn self_alias_terminates() {
        let mut source = stub();
        source.table.insert("Loop".into(), Reference::Pointer(Pointer::new("#/definitions/Loop")));
        let mut cx = BuildContext::new(&source);
        cx.setup();

        let looped = resolve_named::<Counting>(&mut cx, "Loop").unwrap();
        assert!(!looped.is_resolved());
        assert!(!cx.resolvers.resolver::<Counting>("Loop").unwrap().is_resolving("Loop"));
    }

    #[test]
    fn resolving_outside_a_scope_fails() {
        let builds = Rc::new(Cell::new(0));
        let mut source = stub();
        source.table.insert("Foo".into(), counting("foo", &builds, None));
        let mut cx = BuildContext::new(&source);

        let err = resolve_named::<Counting>(&mut cx, "Foo").unwrap_err();
        assert!(matches!(err, BuildError::Resolve(ResolveError::InvalidContext(_))));

        cx.setup();
        assert!(resolve_named::<Counting>(&mut cx, "Foo").is_ok());
        cx.teardown();
        assert!(resolve_named::<Counting>(&mut cx, "Foo").is_err());
    }

    #[test]
    fn teardown_discards_cached_values() {
        let builds = Rc::new(Cell::new(0));
        let mut source = stub();
        source.table.insert("Foo".into(), counting("foo", &builds, None));
        let mut cx = BuildContext::new(&source);

        cx.setup();
        resolve_named::<Counting>(&mut cx, "Foo").unwrap();
        cx.teardown();
        cx.setup();
        resolve_named::<Counting>(&mut cx, "Foo").unwrap();
        assert_eq!(builds.get(), 2);
    }

    #[test]
    fn pointer_shapes_are_checked() {
        let name = pointer_name::<Counting>(SpecFormat::Swagger2, "#/definitions/Foo").unwrap();
        assert_eq!(name, "Foo");
        assert_eq!(
            pointer_name::<Counting>(SpecFormat::Swagger2, "#/schemas/Foo"),
            Err(ResolveError::InvalidPath("#/schemas/Foo".into()))
        );
        assert!(pointer_name::<Counting>(SpecFormat::Swagger2, "#/definitions/").is_err());
        assert!(pointer_name::<Counting>(SpecFormat::Swagger2, "#/definitions/A/B").is_err());
        assert!(pointer_name::<Counting>(SpecFormat::Swagger2, "other.json#/definitions/A").is_err());

        let name = pointer_name::<Counting>(SpecFormat::OpenApi3, "#/components/schemas/Foo").unwrap();
        assert_eq!(name, "Foo");
        assert!(pointer_name::<Counting>(SpecFormat::OpenApi3, "#/definitions/Foo").is_err());
        assert!(pointer_name::<Counting>(SpecFormat::OpenApi3, "#/components/responses/Foo").is_err());
    }

    #[test]
    fn pointer_names_are_unescaped() {
        let name = pointer_name::<Counting>(SpecFormat::Swagger2, "#/definitions/a~1b~0c").unwrap();
        assert_eq!(name, "a/b~c");
    }

    #[test]
    fn missing_names_are_unresolved() {
        let source = stub();
        let mut cx = BuildContext::new(&source);
        cx.setup();
        let err = resolve(&mut cx, &Pointer::<Counting>::new("#/definitions/Missing")).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Resolve(ResolveError::UnresolvedReference(name)) if name == "Missing"
        ));
    }

    #[test]
    fn kind_without_a_legacy_table_is_unsupported() {
        let source = stub();
        let mut cx = BuildContext::new(&source);
        cx.setup();
        let err = resolve(&mut cx, &Pointer::<Header>::new("#/headers/Rate")).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Resolve(ResolveError::UnsupportedReference(path))
                if path == "#/headers/Rate"
        ));
    }

    #[test]
    fn source_without_the_table_is_unsupported() {
        let source = Stub {
            format: SpecFormat::OpenApi3,
            table: Table::new(),
        };
        let mut cx = BuildContext::new(&source);
        cx.setup();
        let err =
            resolve(&mut cx, &Pointer::<Header>::new("#/components/headers/Rate")).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Resolve(ResolveError::UnsupportedReference(name)) if name == "Rate"
        ));
    }
}
