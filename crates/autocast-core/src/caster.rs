//! The cast entry point.
//!
//! A cast tries, in order:
//! 1. identity: the value already has the target type, returned as is;
//! 2. a direct edge from the value's type to the target;
//! 3. the shortest multi-step path found by [`PathResolver`].
//!
//! Direct edges are therefore never shadowed by a search result. The final
//! value's type is checked against the target in every case.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;

use crate::config::CastOptions;
use crate::error::CastError;
use crate::graph::ConversionGraph;
use crate::resolver::PathResolver;
use crate::type_key::TypeKey;
use crate::value::DynValue;

/// Resolved paths keyed by `(from, to)`. `None` records a miss.
type PathCache = HashMap<(TypeKey, TypeKey), Option<Vec<TypeKey>>>;

/// A sealed, read-only conversion graph that casts values.
///
/// `Caster` is `Send + Sync`; share it behind an `Arc` to cast from several
/// threads.
pub struct Caster {
    graph: ConversionGraph,
    options: CastOptions,
    paths: RwLock<PathCache>,
}

impl Caster {
    pub(crate) fn new(graph: ConversionGraph, options: CastOptions) -> Self {
        Self {
            graph,
            options,
            paths: RwLock::new(HashMap::new()),
        }
    }

    pub fn graph(&self) -> &ConversionGraph {
        &self.graph
    }

    pub fn options(&self) -> &CastOptions {
        &self.options
    }

    /// Cast `value` into a `U`.
    pub fn cast<T, U>(&self, value: T) -> Result<U, CastError>
    where
        T: Any + Send,
        U: Any + Send,
    {
        self.cast_dyn(DynValue::new(value), TypeKey::of::<U>())?
            .downcast::<U>()
    }

    /// Cast a type-erased value into the type identified by `to`.
    pub fn cast_dyn(&self, value: DynValue, to: TypeKey) -> Result<DynValue, CastError> {
        let from = value.type_key();
        if from == to {
            return Ok(value);
        }

        let result = match self.graph.lookup_direct(from, to) {
            Some(conversion) => conversion.apply(value)?,
            None => {
                let path = self.find_path(from, to)?;
                self.resolver().apply_path(value, &path)?
            }
        };

        if result.type_key() != to {
            return Err(CastError::TypeMismatch {
                expected: to,
                actual: result.type_key(),
            });
        }
        Ok(result)
    }

    /// The chain of types a cast from `from` to `to` goes through, excluding
    /// `from`. A direct edge yields `[to]`; `from == to` yields an empty path.
    pub fn find_path(&self, from: TypeKey, to: TypeKey) -> Result<Vec<TypeKey>, CastError> {
        if from == to {
            return Ok(Vec::new());
        }
        if self.graph.lookup_direct(from, to).is_some() {
            return Ok(vec![to]);
        }
        if !self.options.cache_paths {
            return self.search(from, to);
        }

        if let Some(cached) = self.paths.read().get(&(from, to)) {
            tracing::trace!(%from, %to, "path cache hit");
            return cached
                .clone()
                .ok_or(CastError::NoPathFound { from, to });
        }

        let result = self.search(from, to);
        match &result {
            Ok(path) => {
                self.paths.write().insert((from, to), Some(path.clone()));
            }
            Err(CastError::NoPathFound { .. }) => {
                self.paths.write().insert((from, to), None);
            }
            Err(_) => {}
        }
        result
    }

    /// [`find_path`](Self::find_path) for static types.
    pub fn path_of<A: Any, B: Any>(&self) -> Result<Vec<TypeKey>, CastError> {
        self.find_path(TypeKey::of::<A>(), TypeKey::of::<B>())
    }

    pub fn can_cast(&self, from: TypeKey, to: TypeKey) -> bool {
        self.find_path(from, to).is_ok()
    }

    fn search(&self, from: TypeKey, to: TypeKey) -> Result<Vec<TypeKey>, CastError> {
        let path = self.resolver().find_path(from, to)?;
        tracing::debug!(%from, %to, hops = path.len(), "resolved cast path");
        Ok(path)
    }

    fn resolver(&self) -> PathResolver<'_> {
        PathResolver::new(&self.graph).with_max_hops(self.options.max_hops)
    }
}

impl fmt::Debug for Caster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Caster")
            .field("types", &self.graph.type_count())
            .field("edges", &self.graph.edge_count())
            .field("options", &self.options)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::Conversion;
    use crate::registry::CastRegistry;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct A(i32);
    #[derive(Debug, PartialEq)]
    struct B(i32);
    #[derive(Debug, PartialEq)]
    struct C(i32);

    fn chain() -> CastRegistry {
        let mut registry = CastRegistry::new();
        registry.register(|a: A| B(a.0 + 1)).unwrap();
        registry.register(|b: B| C(b.0 * 10)).unwrap();
        registry
    }

    #[test]
    fn test_identity_skips_graph() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut registry = CastRegistry::new();
        registry
            .register(move |a: A| {
                counter.fetch_add(1, Ordering::SeqCst);
                B(a.0)
            })
            .unwrap();
        registry.register(|b: B| A(b.0)).unwrap();
        let caster = registry.seal();

        let out: A = caster.cast(A(5)).unwrap();
        assert_eq!(out, A(5));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(caster.paths.read().is_empty());
    }

    #[test]
    fn test_direct_edge() {
        let caster = chain().seal();
        let b: B = caster.cast(A(1)).unwrap();
        assert_eq!(b, B(2));
        assert!(caster.paths.read().is_empty(), "direct casts never search");
    }

    #[test]
    fn test_multi_hop() {
        let caster = chain().seal();
        let c: C = caster.cast(A(1)).unwrap();
        assert_eq!(c, C(20));
        assert_eq!(
            caster.path_of::<A, C>().unwrap(),
            vec![TypeKey::of::<B>(), TypeKey::of::<C>()]
        );
    }

    #[test]
    fn test_direct_edge_beats_search() {
        let mut registry = chain();
        registry.register(|a: A| C(a.0 - 100)).unwrap();
        let caster = registry.seal();

        let c: C = caster.cast(A(1)).unwrap();
        assert_eq!(c, C(-99));
        assert_eq!(caster.path_of::<A, C>().unwrap(), vec![TypeKey::of::<C>()]);
    }

    #[test]
    fn test_final_type_checked_on_direct_edge() {
        let mut registry = CastRegistry::new();
        registry
            .register_conversion(Conversion::erased(
                TypeKey::of::<A>(),
                TypeKey::of::<B>(),
                |v| {
                    let a = v.downcast::<A>()?;
                    Ok(DynValue::new(a.0))
                },
            ))
            .unwrap();
        let caster = registry.seal();

        match caster.cast::<A, B>(A(3)) {
            Err(CastError::TypeMismatch { expected, actual }) => {
                assert_eq!(expected, TypeKey::of::<B>());
                assert_eq!(actual, TypeKey::of::<i32>());
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_cache_records_hits_and_misses() {
        let caster = chain().seal();
        assert!(caster.can_cast(TypeKey::of::<A>(), TypeKey::of::<C>()));
        assert!(!caster.can_cast(TypeKey::of::<C>(), TypeKey::of::<A>()));

        let cache = caster.paths.read();
        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.get(&(TypeKey::of::<A>(), TypeKey::of::<C>())),
            Some(&Some(vec![TypeKey::of::<B>(), TypeKey::of::<C>()]))
        );
        assert_eq!(
            cache.get(&(TypeKey::of::<C>(), TypeKey::of::<A>())),
            Some(&None)
        );
    }

    #[test]
    fn test_cache_disabled() {
        let mut registry = CastRegistry::with_options(CastOptions {
            cache_paths: false,
            ..CastOptions::default()
        });
        registry.register(|a: A| B(a.0 + 1)).unwrap();
        registry.register(|b: B| C(b.0 * 10)).unwrap();
        let caster = registry.seal();

        let c: C = caster.cast(A(0)).unwrap();
        assert_eq!(c, C(10));
        assert!(caster.paths.read().is_empty());
    }

    #[test]
    fn test_caster_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Caster>();
    }
}
