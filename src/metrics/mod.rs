//! Operation metrics for the self-organizing list.
//!
//! Split into an event-intake side ([`recorder`]) and a point-in-time
//! snapshot side ([`snapshot`]): the recorder accepts discrete event
//! notifications behind its own lock, and produces [`PerformanceReport`]
//! values on demand without ever touching the list's lock.

pub mod recorder;
pub mod snapshot;

pub use recorder::{MetricsRecorder, RECENT_OPS_CAP};
pub use snapshot::PerformanceReport;
