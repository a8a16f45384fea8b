//! Registration phase of a caster's lifecycle.
//!
//! [`CastRegistry`] is the only place conversions can be added. Once populated,
//! [`CastRegistry::seal`] consumes it and hands back a read-only [`Caster`],
//! so no registration can interleave with casting.

use std::any::Any;
use std::collections::HashSet;

use crate::caster::Caster;
use crate::config::CastOptions;
use crate::conversion::Conversion;
use crate::error::CastError;
use crate::graph::ConversionGraph;
use crate::table::{self, Castable};

/// Mutable builder for a [`Caster`].
#[derive(Debug, Default)]
pub struct CastRegistry {
    graph: ConversionGraph,
    options: CastOptions,
}

impl CastRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CastOptions) -> Self {
        Self {
            graph: ConversionGraph::new(),
            options,
        }
    }

    /// Register an infallible conversion `A -> B`.
    pub fn register<A, B, F>(&mut self, f: F) -> Result<(), CastError>
    where
        A: Any + Send,
        B: Any + Send,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        self.graph.register(Conversion::new(f))
    }

    /// Register a conversion `A -> B` that may fail.
    pub fn register_fallible<A, B, E, F>(&mut self, f: F) -> Result<(), CastError>
    where
        A: Any + Send,
        B: Any + Send,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(A) -> Result<B, E> + Send + Sync + 'static,
    {
        self.graph.register(Conversion::fallible(f))
    }

    pub fn register_conversion(&mut self, conversion: Conversion) -> Result<(), CastError> {
        self.graph.register(conversion)
    }

    /// Register every conversion declared by `T`.
    ///
    /// All-or-nothing: if any entry is a self-conversion or duplicates an
    /// existing edge (or another entry of the same table), nothing is
    /// registered.
    pub fn register_type<T: Castable>(&mut self) -> Result<(), CastError> {
        let conversions = table::collect::<T>();

        let mut pending = HashSet::with_capacity(conversions.len());
        for conversion in &conversions {
            self.graph.check(conversion)?;
            if !pending.insert((conversion.from(), conversion.to())) {
                return Err(CastError::DuplicateConversion {
                    from: conversion.from(),
                    to: conversion.to(),
                });
            }
        }

        for conversion in conversions {
            self.graph.register(conversion)?;
        }
        Ok(())
    }

    pub fn graph(&self) -> &ConversionGraph {
        &self.graph
    }

    pub fn options(&self) -> &CastOptions {
        &self.options
    }

    /// Finish registration.
    pub fn seal(self) -> Caster {
        Caster::new(self.graph, self.options)
    }
}
