//! The directed graph of registered conversions.
//!
//! Nodes are [`TypeKey`]s, edges are [`Conversion`]s. Both levels of the
//! adjacency map are [`IndexMap`]s, so outgoing edges iterate in registration
//! order. Path search relies on that order to break ties between paths of
//! equal length.

use indexmap::IndexMap;
use serde::Serialize;

use crate::conversion::Conversion;
use crate::error::CastError;
use crate::type_key::TypeKey;

/// Source type → target type → conversion.
#[derive(Debug, Clone, Default)]
pub struct ConversionGraph {
    edges: IndexMap<TypeKey, IndexMap<TypeKey, Conversion>>,
    edge_count: usize,
}

/// Serializable overview of a graph, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub types: Vec<String>,
    pub edges: Vec<EdgeSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeSummary {
    pub from: String,
    pub to: String,
}

impl ConversionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge.
    ///
    /// Rejects self-conversions and a second conversion for an existing
    /// `(from, to)` pair; the graph is left untouched on error.
    pub fn register(&mut self, conversion: Conversion) -> Result<(), CastError> {
        self.check(&conversion)?;

        let (from, to) = (conversion.from(), conversion.to());
        self.edges.entry(from).or_default().insert(to, conversion);
        self.edges.entry(to).or_default();
        self.edge_count += 1;
        Ok(())
    }

    /// Validate an edge without inserting it.
    pub(crate) fn check(&self, conversion: &Conversion) -> Result<(), CastError> {
        let (from, to) = (conversion.from(), conversion.to());
        if from == to {
            return Err(CastError::SelfConversion(from));
        }
        if self.lookup_direct(from, to).is_some() {
            return Err(CastError::DuplicateConversion { from, to });
        }
        Ok(())
    }

    pub fn lookup_direct(&self, from: TypeKey, to: TypeKey) -> Option<&Conversion> {
        self.edges.get(&from).and_then(|targets| targets.get(&to))
    }

    /// Outgoing edges of `node`, in registration order. Empty for unknown nodes.
    pub fn edges_from(&self, node: TypeKey) -> impl Iterator<Item = (TypeKey, &Conversion)> + '_ {
        self.edges
            .get(&node)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(to, conv)| (*to, conv)))
    }

    pub fn contains_type(&self, key: TypeKey) -> bool {
        self.edges.contains_key(&key)
    }

    /// Every type that appears as a source or target, in order of first
    /// appearance.
    pub fn types(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.edges.keys().copied()
    }

    pub fn type_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// All edges, grouped by source type.
    pub fn conversions(&self) -> impl Iterator<Item = &Conversion> + '_ {
        self.edges.values().flat_map(|targets| targets.values())
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            types: self.types().map(|key| key.short_name()).collect(),
            edges: self
                .conversions()
                .map(|conv| EdgeSummary {
                    from: conv.from().short_name(),
                    to: conv.to().short_name(),
                })
                .collect(),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
