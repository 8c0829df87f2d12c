//! Error types for recency

use std::fmt;

/// Result type alias for cache construction
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while configuring a cache
///
/// Cache misses are not errors; `get` reports them as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must hold at least one entry
    NonPositiveCapacity(usize),

    /// Capacity exceeds the number of addressable slots
    CapacityTooLarge(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveCapacity(capacity) => {
                write!(f, "Invalid capacity: {} (must be at least 1)", capacity)
            }
            ConfigError::CapacityTooLarge(capacity) => {
                write!(f, "Capacity too large: {} entries", capacity)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
