//! Application state shared across handlers.
//!
//! The active filter sits behind an `Arc` so handlers clone it out of the
//! lock and evaluate without holding it. Replacing the filter swaps the `Arc`;
//! in-flight evaluations finish against the filter they started with.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use raddec_filter_core::RaddecFilter;
use tokio::sync::RwLock;

/// Shared application state handle.
pub type SharedState = Arc<AppState>;

/// Application state.
#[derive(Debug)]
pub struct AppState {
    filter: RwLock<Arc<RaddecFilter>>,
    filter_path: Option<PathBuf>,
    stats: EvaluationStats,
}

/// Running totals of evaluated raddecs.
#[derive(Debug, Default)]
pub struct EvaluationStats {
    evaluated: AtomicU64,
    passed: AtomicU64,
}

impl EvaluationStats {
    /// Record one verdict.
    pub fn record(&self, passing: bool) {
        self.evaluated.fetch_add(1, Ordering::Relaxed);
        if passing {
            self.passed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Total raddecs evaluated.
    #[must_use]
    pub fn evaluated(&self) -> u64 {
        self.evaluated.load(Ordering::Relaxed)
    }

    /// Raddecs that passed.
    #[must_use]
    pub fn passed(&self) -> u64 {
        self.passed.load(Ordering::Relaxed)
    }
}

impl AppState {
    /// Create new application state.
    ///
    /// `filter_path` is the file the filter was loaded from, used for reloads.
    #[must_use]
    pub fn new(filter: RaddecFilter, filter_path: Option<PathBuf>) -> SharedState {
        Arc::new(Self {
            filter: RwLock::new(Arc::new(filter)),
            filter_path,
            stats: EvaluationStats::default(),
        })
    }

    /// The active filter.
    pub async fn filter(&self) -> Arc<RaddecFilter> {
        Arc::clone(&*self.filter.read().await)
    }

    /// Replace the active filter, returning the new one.
    pub async fn replace_filter(&self, filter: RaddecFilter) -> Arc<RaddecFilter> {
        let filter = Arc::new(filter);
        *self.filter.write().await = Arc::clone(&filter);
        filter
    }

    /// The filter parameter file, if the filter came from one.
    #[must_use]
    pub fn filter_path(&self) -> Option<&Path> {
        self.filter_path.as_deref()
    }

    /// Evaluation counters.
    #[must_use]
    pub const fn stats(&self) -> &EvaluationStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raddec_filter_core::FilterConfig;

    #[test]
    fn test_stats_record() {
        let stats = EvaluationStats::default();
        stats.record(true);
        stats.record(false);
        stats.record(true);
        assert_eq!(stats.evaluated(), 3);
        assert_eq!(stats.passed(), 2);
    }

    #[tokio::test]
    async fn test_replace_filter() {
        let state = AppState::new(RaddecFilter::default(), None);
        let before = state.filter().await;
        assert!(before.active_criteria().is_empty());

        state
            .replace_filter(RaddecFilter::new(FilterConfig::default().with_min_rssi(-70)))
            .await;

        assert!(state.filter().await.has_min_rssi());
        assert!(!before.has_min_rssi());
    }
}
