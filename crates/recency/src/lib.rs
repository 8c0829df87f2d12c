//! # recency
//!
//! Fixed-capacity LRU cache with O(1) `get` and `put`.
//!
//! ## Architecture
//! - **Entry store**: slot arena owning keys, values and recency links;
//!   freed slots are reused and carry a generation counter
//! - **Recency list**: intrusive doubly-linked list over store slots,
//!   anchored by two sentinel slots
//! - **Key index**: AHash map from key to store handle
//!
//! ## Example
//! ```
//! use recency::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put(1, "one");
//! cache.put(2, "two");
//! assert_eq!(cache.get(&1), Some(&"one"));
//!
//! cache.put(3, "three"); // evicts 2
//! assert_eq!(cache.get(&2), None);
//! # Ok::<(), recency::ConfigError>(())
//! ```

#![warn(missing_docs)]

mod error;
mod index;
mod list;
mod lru;
mod stats;
mod store;

pub use error::{ConfigError, Result};
pub use lru::LruCache;
pub use stats::CacheStats;
