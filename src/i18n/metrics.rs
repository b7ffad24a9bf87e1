//! Resolution metrics and observability module.
//!
//! Counts how display strings were obtained and how often stored records
//! had to be degraded while parsing. A high fallback rate points at content
//! missing translations; degraded parses point at inconsistent historical data.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Translation metrics counters. Use [`TranslationMetrics::global`] in
/// application code.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Requested language had text
    requested_hits: AtomicUsize,

    /// Fell back to the primary language
    primary_fallbacks: AtomicUsize,

    /// Fell back to some other non-empty language
    other_fallbacks: AtomicUsize,

    /// Value was already plain display text
    plain_passthroughs: AtomicUsize,

    /// Nothing to show
    empty_results: AtomicUsize,

    /// Stored record did not have the expected shape
    degraded_parses: AtomicUsize,
}

static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    /// Get the global translation metrics instance.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(TranslationMetrics::default)
    }

    pub fn record_requested_hit(&self) {
        self.requested_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_primary_fallback(&self) {
        self.primary_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_other_fallback(&self) {
        self.other_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_plain_passthrough(&self) {
        self.plain_passthroughs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_result(&self) {
        self.empty_results.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_degraded_parse(&self) {
        self.degraded_parses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requested_hits(&self) -> usize {
        self.requested_hits.load(Ordering::Relaxed)
    }

    pub fn primary_fallbacks(&self) -> usize {
        self.primary_fallbacks.load(Ordering::Relaxed)
    }

    pub fn other_fallbacks(&self) -> usize {
        self.other_fallbacks.load(Ordering::Relaxed)
    }

    pub fn plain_passthroughs(&self) -> usize {
        self.plain_passthroughs.load(Ordering::Relaxed)
    }

    pub fn empty_results(&self) -> usize {
        self.empty_results.load(Ordering::Relaxed)
    }

    pub fn degraded_parses(&self) -> usize {
        self.degraded_parses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let requested_hits = self.requested_hits();
        let primary_fallbacks = self.primary_fallbacks();
        let other_fallbacks = self.other_fallbacks();
        let plain_passthroughs = self.plain_passthroughs();
        let empty_results = self.empty_results();

        let total_resolutions = requested_hits
            + primary_fallbacks
            + other_fallbacks
            + plain_passthroughs
            + empty_results;
        let fallback_rate = if total_resolutions > 0 {
            ((primary_fallbacks + other_fallbacks) as f64 / total_resolutions as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requested_hits,
            primary_fallbacks,
            other_fallbacks,
            plain_passthroughs,
            empty_results,
            degraded_parses: self.degraded_parses(),
            total_resolutions,
            fallback_rate,
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.requested_hits.store(0, Ordering::Relaxed);
        self.primary_fallbacks.store(0, Ordering::Relaxed);
        self.other_fallbacks.store(0, Ordering::Relaxed);
        self.plain_passthroughs.store(0, Ordering::Relaxed);
        self.empty_results.store(0, Ordering::Relaxed);
        self.degraded_parses.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of the resolution counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub requested_hits: usize,
    pub primary_fallbacks: usize,
    pub other_fallbacks: usize,
    pub plain_passthroughs: usize,
    pub empty_results: usize,
    pub degraded_parses: usize,
    pub total_resolutions: usize,

    /// Share of resolutions served by a fallback language, as a percentage (0-100)
    pub fallback_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_requested_hit() {
        let metrics = TranslationMetrics::default();
        assert_eq!(metrics.requested_hits(), 0);
        metrics.record_requested_hit();
        metrics.record_requested_hit();
        assert_eq!(metrics.requested_hits(), 2);
    }

    #[test]
    fn test_record_fallbacks() {
        let metrics = TranslationMetrics::default();
        metrics.record_primary_fallback();
        metrics.record_other_fallback();
        metrics.record_other_fallback();
        assert_eq!(metrics.primary_fallbacks(), 1);
        assert_eq!(metrics.other_fallbacks(), 2);
    }

    #[test]
    fn test_record_degraded_parse() {
        let metrics = TranslationMetrics::default();
        metrics.record_degraded_parse();
        assert_eq!(metrics.degraded_parses(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = TranslationMetrics::default().report();
        assert_eq!(report.total_resolutions, 0);
        assert_eq!(report.fallback_rate, 0.0);
        assert_eq!(report.degraded_parses, 0);
    }

    #[test]
    fn test_report_fallback_rate() {
        let metrics = TranslationMetrics::default();

        // 2 hits, 1 primary fallback, 1 other fallback = 50% fallback rate
        metrics.record_requested_hit();
        metrics.record_requested_hit();
        metrics.record_primary_fallback();
        metrics.record_other_fallback();

        let report = metrics.report();
        assert_eq!(report.total_resolutions, 4);
        assert_eq!(report.fallback_rate, 50.0);
    }

    #[test]
    fn test_report_plain_and_empty_count_as_resolutions() {
        let metrics = TranslationMetrics::default();
        metrics.record_plain_passthrough();
        metrics.record_empty_result();
        metrics.record_primary_fallback();
        metrics.record_primary_fallback();

        let report = metrics.report();
        assert_eq!(report.total_resolutions, 4);
        assert_eq!(report.fallback_rate, 50.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = TranslationMetrics::default();
        metrics.record_requested_hit();
        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["requested_hits"], 1);
        assert!(json.get("fallback_rate").is_some());
    }

    #[test]
    fn test_reset() {
        let metrics = TranslationMetrics::default();
        metrics.record_requested_hit();
        metrics.record_degraded_parse();
        metrics.reset();
        assert_eq!(metrics.report().total_resolutions, 0);
        assert_eq!(metrics.degraded_parses(), 0);
    }

    // ==================== Singleton Tests ====================

    #[test]
    fn test_global_returns_same_instance() {
        let metrics1 = TranslationMetrics::global();
        let metrics2 = TranslationMetrics::global();
        assert!(std::ptr::eq(metrics1, metrics2));
    }
}
