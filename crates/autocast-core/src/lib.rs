//! # autocast-core
//!
//! Register conversion functions between pairs of types, then cast values
//! between any two types connected by a chain of registered conversions.
//!
//! Registered conversions form a directed graph over [`TypeKey`]s. A cast
//! returns the value unchanged when it already has the target type, uses a
//! direct conversion when one is registered, and otherwise applies the
//! shortest chain of conversions found by breadth-first search.
//!
//! ```
//! use autocast_core::CastRegistry;
//!
//! let mut registry = CastRegistry::new();
//! registry.register_fallible(|s: String| s.parse::<i64>()).unwrap();
//! registry.register(|i: i64| i != 0).unwrap();
//! let caster = registry.seal();
//!
//! // String -> i64 -> bool
//! let truthy: bool = caster.cast(String::from("7")).unwrap();
//! assert!(truthy);
//! ```

pub mod builtins;
pub mod caster;
pub mod config;
pub mod conversion;
pub mod error;
pub mod graph;
pub mod registry;
pub mod resolver;
pub mod table;
pub mod type_key;
pub mod value;

pub use builtins::Hex;
pub use caster::Caster;
pub use config::CastOptions;
pub use conversion::Conversion;
pub use error::{CastError, ErrorCode};
pub use graph::{ConversionGraph, GraphSummary};
pub use registry::CastRegistry;
pub use resolver::PathResolver;
pub use table::{Castable, ConversionTable};
pub use type_key::TypeKey;
pub use value::DynValue;
