//! Error types for the solcache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when list configuration parameters are invalid
//!   (zero capacity). Construction is the only fallible operation in the
//!   library; everything else is total over its inputs.
//! - [`InvariantError`]: Returned when internal chain invariants are violated;
//!   debug builds run `check_invariants` after every chain mutation.
//!
//! ## Example Usage
//!
//! ```
//! use solcache::error::ConfigError;
//! use solcache::list::SelfOrganizingList;
//! use solcache::strategy::Strategy;
//!
//! // Fallible constructor for user-configurable parameters
//! let list: Result<SelfOrganizingList<u64>, ConfigError> =
//!     SelfOrganizingList::new(100, Strategy::MoveToFront);
//! assert!(list.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = SelfOrganizingList::<u64>::new(0, Strategy::MoveToFront);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when list configuration parameters are invalid.
///
/// Produced by [`SelfOrganizingList::new`](crate::list::SelfOrganizingList::new)
/// when the capacity bound is zero. Carries a human-readable description of
/// which parameter failed validation.
///
/// # Example
///
/// ```
/// use solcache::list::SelfOrganizingList;
/// use solcache::strategy::Strategy;
///
/// let err = SelfOrganizingList::<u64>::new(0, Strategy::Lru).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal chain invariants are violated.
///
/// Produced by [`Chain::check_invariants`](crate::ds::Chain::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
