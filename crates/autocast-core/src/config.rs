//! Configuration for path resolution.

use serde::{Deserialize, Serialize};

/// Options applied by a [`Caster`](crate::Caster).
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (`max-hops`, `cache-paths`). Missing
/// fields take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CastOptions {
    /// Longest path, in conversion steps, the search will consider.
    /// Default: unbounded.
    pub max_hops: Option<usize>,
    /// Memoize resolved paths (and misses) per `(from, to)` pair. Default: true.
    pub cache_paths: bool,
}

impl Default for CastOptions {
    fn default() -> Self {
        Self {
            max_hops: None,
            cache_paths: true,
        }
    }
}
