//! Flat re-exports of the crate's public surface.

pub use crate::ds::{Chain, Node, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::list::{SearchResult, SelfOrganizingList};
pub use crate::metrics::{MetricsRecorder, PerformanceReport, RECENT_OPS_CAP};
pub use crate::strategy::Strategy;
pub use crate::trace::{AccessPattern, TraceGenerator};
