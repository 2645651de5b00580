//! solcache: a bounded self-organizing list cache with pluggable
//! reorganization strategies.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod ds;
pub mod error;
pub mod list;
pub mod metrics;
pub mod prelude;
pub mod strategy;
pub mod trace;
