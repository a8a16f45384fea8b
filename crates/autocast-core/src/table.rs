//! Declarative per-type conversion tables.
//!
//! A type lists the conversions it takes part in by implementing [`Castable`]:
//!
//! ```
//! use autocast_core::{CastRegistry, Castable, ConversionTable};
//!
//! struct Minutes(f64);
//! struct Seconds(f64);
//!
//! impl Castable for Minutes {
//!     fn conversions(table: &mut ConversionTable<Self>) {
//!         table
//!             .to(|m: Minutes| Seconds(m.0 * 60.0))
//!             .from(|s: Seconds| Minutes(s.0 / 60.0));
//!     }
//! }
//!
//! let mut registry = CastRegistry::new();
//! registry.register_type::<Minutes>().unwrap();
//! let caster = registry.seal();
//! let secs: Seconds = caster.cast(Minutes(2.0)).unwrap();
//! assert_eq!(secs.0, 120.0);
//! ```

use std::any::Any;
use std::marker::PhantomData;

use crate::conversion::Conversion;

/// A type that declares its own conversions to and from peer types.
pub trait Castable: Any + Send + Sized {
    fn conversions(table: &mut ConversionTable<Self>);
}

/// Conversions collected for the type `T`, in declaration order.
pub struct ConversionTable<T> {
    entries: Vec<Conversion>,
    _owner: PhantomData<fn() -> T>,
}

impl<T: Any + Send> ConversionTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            _owner: PhantomData,
        }
    }

    /// Declare `T -> B`.
    pub fn to<B, F>(&mut self, f: F) -> &mut Self
    where
        B: Any + Send,
        F: Fn(T) -> B + Send + Sync + 'static,
    {
        self.entries.push(Conversion::new(f));
        self
    }

    /// Declare a fallible `T -> B`.
    pub fn try_to<B, E, F>(&mut self, f: F) -> &mut Self
    where
        B: Any + Send,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(T) -> Result<B, E> + Send + Sync + 'static,
    {
        self.entries.push(Conversion::fallible(f));
        self
    }

    /// Declare `A -> T`.
    pub fn from<A, F>(&mut self, f: F) -> &mut Self
    where
        A: Any + Send,
        F: Fn(A) -> T + Send + Sync + 'static,
    {
        self.entries.push(Conversion::new(f));
        self
    }

    /// Declare a fallible `A -> T`.
    pub fn try_from<A, E, F>(&mut self, f: F) -> &mut Self
    where
        A: Any + Send,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(A) -> Result<T, E> + Send + Sync + 'static,
    {
        self.entries.push(Conversion::fallible(f));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_conversions(self) -> Vec<Conversion> {
        self.entries
    }
}

impl<T: Any + Send> Default for ConversionTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect the table declared by `T`.
pub fn collect<T: Castable>() -> Vec<Conversion> {
    let mut table = ConversionTable::<T>::new();
    T::conversions(&mut table);
    table.into_conversions()
}
