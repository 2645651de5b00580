//! Point-in-time report produced by the metrics recorder.

use std::fmt;
use std::time::Duration;

use rustc_hash::FxHashMap;

/// A snapshot of cumulative list metrics.
///
/// Produced fresh by [`MetricsRecorder::report`](crate::metrics::MetricsRecorder::report);
/// never updated in place.
#[derive(Debug, Clone)]
pub struct PerformanceReport {
    pub total_searches: u64,
    pub hits: u64,
    pub misses: u64,
    /// `hits * 100 / searches`; 0 when no searches have occurred.
    pub hit_rate: f64,
    /// Mean traversal steps among hits only.
    pub avg_access_cost: f64,
    pub avg_search_time_ms: f64,
    /// Searches divided by wall time since creation or the last clear.
    pub searches_per_second: f64,
    pub insertions: u64,
    pub evictions: u64,
    pub strategy_changes: u64,
    /// Cumulative per-label operation counts; never pruned.
    pub operation_counts: FxHashMap<String, u64>,
    pub uptime: Duration,
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== PERFORMANCE REPORT ===")?;
        writeln!(f, "Uptime: {:.1} seconds", self.uptime.as_secs_f64())?;
        writeln!(
            f,
            "Total Operations: {}",
            self.total_searches + self.insertions + self.evictions
        )?;
        writeln!(
            f,
            "Hit Rate: {:.2}% ({}/{})",
            self.hit_rate, self.hits, self.total_searches
        )?;
        writeln!(f, "Avg Access Cost: {:.2} steps", self.avg_access_cost)?;
        writeln!(f, "Avg Search Time: {:.3} ms", self.avg_search_time_ms)?;
        writeln!(f, "Searches/sec: {:.1}", self.searches_per_second)?;
        writeln!(
            f,
            "Insertions: {}, Evictions: {}",
            self.insertions, self.evictions
        )?;
        writeln!(f, "Strategy Changes: {}", self.strategy_changes)?;

        if !self.operation_counts.is_empty() {
            writeln!(f, "\nOperation Counts:")?;
            let mut counts: Vec<_> = self.operation_counts.iter().collect();
            counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            for (label, count) in counts {
                writeln!(f, "  {:<20}: {}", label, count)?;
            }
        }
        Ok(())
    }
}
