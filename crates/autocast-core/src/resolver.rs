//! Shortest conversion path search.
//!
//! [`PathResolver`] runs a breadth-first search over a [`ConversionGraph`],
//! so the path it returns has the fewest conversion steps. Edges carry no
//! weight. Among several shortest paths, the one reached through
//! earlier-registered edges wins, since [`ConversionGraph::edges_from`] yields
//! edges in registration order.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::CastError;
use crate::graph::ConversionGraph;
use crate::type_key::TypeKey;
use crate::value::DynValue;

/// Path search and application over a borrowed graph.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'g> {
    graph: &'g ConversionGraph,
    max_hops: Option<usize>,
}

impl<'g> PathResolver<'g> {
    pub fn new(graph: &'g ConversionGraph) -> Self {
        Self {
            graph,
            max_hops: None,
        }
    }

    /// Limit the search to paths of at most `max_hops` conversions.
    pub fn with_max_hops(mut self, max_hops: Option<usize>) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Find the shortest chain of conversions from `from` to `to`.
    ///
    /// The returned path excludes `from` and ends with `to`. It is empty when
    /// `from == to`; the search does not run in that case.
    pub fn find_path(&self, from: TypeKey, to: TypeKey) -> Result<Vec<TypeKey>, CastError> {
        if from == to {
            return Ok(Vec::new());
        }

        // Nodes are marked visited when enqueued, so each node gets exactly one
        // breadcrumb: the node that discovered it first.
        let mut visited = HashSet::from([from]);
        let mut breadcrumbs: HashMap<TypeKey, TypeKey> = HashMap::new();
        let mut queue = VecDeque::from([(from, 0_usize)]);

        while let Some((node, depth)) = queue.pop_front() {
            if node == to {
                return Ok(reconstruct(&breadcrumbs, from, to));
            }
            if self.max_hops.is_some_and(|max| depth >= max) {
                continue;
            }
            for (next, _) in self.graph.edges_from(node) {
                if visited.insert(next) {
                    breadcrumbs.insert(next, node);
                    queue.push_back((next, depth + 1));
                }
            }
        }

        Err(CastError::NoPathFound { from, to })
    }

    /// Thread `value` through the conversions along `path`.
    ///
    /// Each step's output must be of the type named by the path; otherwise the
    /// whole application fails with [`CastError::TypeMismatch`] and no value
    /// is returned.
    pub fn apply_path(&self, value: DynValue, path: &[TypeKey]) -> Result<DynValue, CastError> {
        let mut current_type = value.type_key();
        let mut current = value;

        for &next in path {
            let conversion = self.graph.lookup_direct(current_type, next).ok_or(
                CastError::NoPathFound {
                    from: current_type,
                    to: next,
                },
            )?;
            current = conversion.apply(current)?;
            if current.type_key() != next {
                return Err(CastError::TypeMismatch {
                    expected: next,
                    actual: current.type_key(),
                });
            }
            tracing::trace!(from = %current_type, to = %next, "applied conversion");
            current_type = next;
        }

        Ok(current)
    }
}

/// Walk breadcrumbs back from `to` until reaching `from`, then reverse.
fn reconstruct(
    breadcrumbs: &HashMap<TypeKey, TypeKey>,
    from: TypeKey,
    to: TypeKey,
) -> Vec<TypeKey> {
    let mut path = vec![to];
    let mut node = to;
    while let Some(&prev) = breadcrumbs.get(&node) {
        if prev == from {
            break;
        }
        path.push(prev);
        node = prev;
    }
    path.reverse();
    path
}

// ===========================================================================
// Tests
// ===========================================================================
