//! Event intake for list metrics.
//!
//! The recorder accumulates cumulative counters, a bounded FIFO log of the
//! most recent operation labels, and a cumulative per-label frequency table
//! that survives log truncation. Every event takes a short exclusive
//! section on the recorder's own mutex, deliberately separate from the
//! list's chain lock: a report can be generated while list operations are
//! in flight. Such reports are internally consistent but not linearizable
//! with list mutations.
//!
//! Lifecycle: created with the list, reset only by an explicit
//! [`clear`](MetricsRecorder::clear) (which also restarts the throughput
//! epoch), otherwise monotonically accumulating.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::metrics::snapshot::PerformanceReport;

/// Maximum number of labels retained in the recent-operation log.
pub const RECENT_OPS_CAP: usize = 100;

#[derive(Debug)]
struct MetricsState {
    searches: u64,
    hits: u64,
    misses: u64,
    total_access_cost: u64,
    total_search_time: Duration,
    insertions: u64,
    evictions: u64,
    strategy_changes: u64,
    recent_ops: VecDeque<String>,
    op_counts: FxHashMap<String, u64>,
    started_at: Instant,
}

impl MetricsState {
    fn new() -> Self {
        Self {
            searches: 0,
            hits: 0,
            misses: 0,
            total_access_cost: 0,
            total_search_time: Duration::ZERO,
            insertions: 0,
            evictions: 0,
            strategy_changes: 0,
            recent_ops: VecDeque::with_capacity(RECENT_OPS_CAP),
            op_counts: FxHashMap::default(),
            started_at: Instant::now(),
        }
    }

    fn record_op(&mut self, label: String) {
        if self.recent_ops.len() == RECENT_OPS_CAP {
            // Oldest label drops from the log; the frequency table keeps it.
            self.recent_ops.pop_front();
        }
        *self.op_counts.entry(label.clone()).or_insert(0) += 1;
        self.recent_ops.push_back(label);
    }

    fn hit_rate(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.hits as f64 * 100.0 / self.searches as f64
        }
    }
}

/// Accumulates operation events and produces on-demand reports.
#[derive(Debug)]
pub struct MetricsRecorder {
    state: Mutex<MetricsState>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MetricsState::new()),
        }
    }

    /// Records a successful search with its traversal cost and latency.
    pub fn record_hit(&self, access_cost: usize, elapsed: Duration) {
        let mut state = self.state.lock();
        state.searches += 1;
        state.hits += 1;
        state.total_access_cost += access_cost as u64;
        state.total_search_time += elapsed;
        state.record_op("HIT".to_string());
    }

    /// Records a failed search with its latency.
    pub fn record_miss(&self, elapsed: Duration) {
        let mut state = self.state.lock();
        state.searches += 1;
        state.misses += 1;
        state.total_search_time += elapsed;
        state.record_op("MISS".to_string());
    }

    pub fn record_insertion(&self) {
        let mut state = self.state.lock();
        state.insertions += 1;
        state.record_op("INSERT".to_string());
    }

    pub fn record_eviction(&self) {
        let mut state = self.state.lock();
        state.evictions += 1;
        state.record_op("EVICT".to_string());
    }

    /// Records a bulk load sized to the offered key count.
    pub fn record_bulk_load(&self, count: usize) {
        let mut state = self.state.lock();
        state.insertions += count as u64;
        state.record_op("BULK_LOAD".to_string());
    }

    pub fn record_strategy_change(&self, strategy_name: &str) {
        let mut state = self.state.lock();
        state.strategy_changes += 1;
        state.record_op(format!("STRATEGY_CHANGE to {}", strategy_name));
    }

    /// Current hit rate in percent; 0 when no searches have occurred.
    pub fn hit_rate(&self) -> f64 {
        self.state.lock().hit_rate()
    }

    /// The newest `count` operation labels, oldest first.
    pub fn recent_operations(&self, count: usize) -> Vec<String> {
        let state = self.state.lock();
        let skip = state.recent_ops.len().saturating_sub(count);
        state.recent_ops.iter().skip(skip).cloned().collect()
    }

    /// Resets every counter, the log, the frequency table, and the
    /// throughput epoch.
    pub fn clear(&self) {
        *self.state.lock() = MetricsState::new();
    }

    /// Produces a point-in-time report.
    pub fn report(&self) -> PerformanceReport {
        let state = self.state.lock();
        let uptime = state.started_at.elapsed();
        let avg_access_cost = if state.hits > 0 {
            state.total_access_cost as f64 / state.hits as f64
        } else {
            0.0
        };
        let avg_search_time_ms = if state.searches > 0 {
            state.total_search_time.as_secs_f64() * 1_000.0 / state.searches as f64
        } else {
            0.0
        };
        let searches_per_second = if state.searches > 0 {
            state.searches as f64 / uptime.as_secs_f64().max(f64::EPSILON)
        } else {
            0.0
        };

        PerformanceReport {
            total_searches: state.searches,
            hits: state.hits,
            misses: state.misses,
            hit_rate: state.hit_rate(),
            avg_access_cost,
            avg_search_time_ms,
            searches_per_second,
            insertions: state.insertions,
            evictions: state.evictions,
            strategy_changes: state.strategy_changes,
            operation_counts: state.op_counts.clone(),
            uptime,
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_law() {
        let recorder = MetricsRecorder::new();
        assert_eq!(recorder.hit_rate(), 0.0);

        recorder.record_hit(1, Duration::ZERO);
        recorder.record_hit(3, Duration::ZERO);
        recorder.record_miss(Duration::ZERO);
        recorder.record_miss(Duration::ZERO);

        let report = recorder.report();
        assert_eq!(report.total_searches, 4);
        assert_eq!(report.hits, 2);
        assert_eq!(report.misses, 2);
        assert_eq!(report.hit_rate, 50.0);
    }

    #[test]
    fn avg_access_cost_counts_hits_only() {
        let recorder = MetricsRecorder::new();
        recorder.record_hit(2, Duration::ZERO);
        recorder.record_hit(4, Duration::ZERO);
        recorder.record_miss(Duration::ZERO);

        let report = recorder.report();
        assert_eq!(report.avg_access_cost, 3.0);
    }

    #[test]
    fn log_caps_at_100_but_counts_survive() {
        let recorder = MetricsRecorder::new();
        for _ in 0..RECENT_OPS_CAP {
            recorder.record_insertion();
        }
        recorder.record_eviction();

        let recent = recorder.recent_operations(RECENT_OPS_CAP + 10);
        assert_eq!(recent.len(), RECENT_OPS_CAP);
        assert_eq!(recent.last().map(String::as_str), Some("EVICT"));
        // One INSERT fell off the log; the frequency table kept all 100.
        assert_eq!(recent.iter().filter(|op| *op == "INSERT").count(), 99);

        let report = recorder.report();
        assert_eq!(report.operation_counts.get("INSERT"), Some(&100));
        assert_eq!(report.operation_counts.get("EVICT"), Some(&1));
    }

    #[test]
    fn recent_operations_returns_newest_oldest_first() {
        let recorder = MetricsRecorder::new();
        recorder.record_insertion();
        recorder.record_hit(1, Duration::ZERO);
        recorder.record_miss(Duration::ZERO);

        assert_eq!(recorder.recent_operations(2), vec!["HIT", "MISS"]);
        assert_eq!(recorder.recent_operations(10), vec!["INSERT", "HIT", "MISS"]);
    }

    #[test]
    fn bulk_load_adds_offered_count() {
        let recorder = MetricsRecorder::new();
        recorder.record_bulk_load(7);
        let report = recorder.report();
        assert_eq!(report.insertions, 7);
        assert_eq!(report.operation_counts.get("BULK_LOAD"), Some(&1));
    }

    #[test]
    fn strategy_change_label_includes_name() {
        let recorder = MetricsRecorder::new();
        recorder.record_strategy_change("Transpose");
        let report = recorder.report();
        assert_eq!(report.strategy_changes, 1);
        assert_eq!(
            report.operation_counts.get("STRATEGY_CHANGE to Transpose"),
            Some(&1)
        );
    }

    #[test]
    fn clear_resets_counters_and_log() {
        let recorder = MetricsRecorder::new();
        recorder.record_hit(1, Duration::ZERO);
        recorder.record_insertion();
        recorder.clear();

        let report = recorder.report();
        assert_eq!(report.total_searches, 0);
        assert_eq!(report.insertions, 0);
        assert_eq!(report.hit_rate, 0.0);
        assert!(report.operation_counts.is_empty());
        assert!(recorder.recent_operations(10).is_empty());
    }

    #[test]
    fn throughput_zero_without_searches() {
        let recorder = MetricsRecorder::new();
        recorder.record_insertion();
        assert_eq!(recorder.report().searches_per_second, 0.0);
    }
}
