//! # Application State Management
//!
//! This module holds what every HTTP handler shares: the configuration, the
//! orchestrator wired to its engines, and the metrics counters.
//!
//! ## Key Rust Concepts:
//!
//! ### Arc (Atomically Reference Counted)
//! - **Purpose**: Allows every actix worker to share ownership of the same data
//! - **Memory safety**: Automatically cleans up data when the last reference is dropped
//!
//! ### RwLock (Reader-Writer Lock)
//! - **Purpose**: Allows multiple readers OR one writer at a time
//! - **Why needed**: Every request bumps a counter while `/metrics` reads them all
//!
//! ## What is NOT here:
//! No per-user or per-submission data. Each submission is an independent call
//! into the orchestrator and nothing about it is kept afterwards apart from
//! the counters below.

use crate::config::AppConfig;
use crate::orchestrator::{Orchestrator, Outcome, TranslateError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// The main application state that's shared across all HTTP request handlers.
///
/// ## Thread Safety Pattern:
/// - `config` never changes after startup, so a plain `Arc` is enough
/// - `orchestrator` is immutable and internally `Arc`-based, so it is cloned freely
/// - `metrics` is the only mutable part and sits behind `Arc<RwLock<_>>`
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub orchestrator: Orchestrator,
    pub metrics: Arc<RwLock<AppMetrics>>,
    pub start_time: Instant,
}

/// Counters collected across all HTTP requests.
#[derive(Debug, Default, Clone)]
pub struct AppMetrics {
    /// Total number of HTTP requests processed since server start
    pub request_count: u64,

    /// Total number of 4xx/5xx responses since server start
    pub error_count: u64,

    /// What translation submissions ended as
    pub translations: TranslationMetrics,

    /// Detailed metrics for each API endpoint
    /// Key: endpoint name (e.g., "POST /")
    pub endpoint_metrics: HashMap<String, EndpointMetric>,
}

/// Outcome counters for translation submissions (page and JSON API alike).
#[derive(Debug, Default, Clone)]
pub struct TranslationMetrics {
    /// Submissions that produced a full result
    pub completed: u64,

    /// Submissions rejected because the text was blank
    pub missing_input: u64,

    /// Submissions where an engine failed
    pub failed: u64,

    /// Failures keyed by stage ("translation", "transliteration", "synthesis")
    pub failures_by_stage: HashMap<String, u64>,
}

/// Detailed performance metrics for a specific endpoint.
///
/// ## Performance calculations:
/// - **Average response time**: total_duration_ms / request_count
/// - **Error rate**: error_count / request_count
#[derive(Debug, Default, Clone)]
pub struct EndpointMetric {
    pub request_count: u64,
    pub total_duration_ms: u64,
    pub error_count: u64,
}

impl AppState {
    /// Create the state with production engines built from `config`.
    pub fn new(config: AppConfig) -> Self {
        let orchestrator = Orchestrator::from_config(&config);
        Self::with_orchestrator(config, orchestrator)
    }

    /// Create the state around an already wired orchestrator.
    pub fn with_orchestrator(config: AppConfig, orchestrator: Orchestrator) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator,
            metrics: Arc::new(RwLock::new(AppMetrics::default())),
            start_time: Instant::now(),
        }
    }

    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Increment the total request counter (called by middleware for every request).
    pub fn increment_request_count(&self) {
        let mut metrics = self.metrics.write().unwrap();
        metrics.request_count += 1;
    }

    /// Increment the total error counter (called for any 4xx/5xx response).
    pub fn increment_error_count(&self) {
        let mut metrics = self.metrics.write().unwrap();
        metrics.error_count += 1;
    }

    /// Record detailed metrics for a specific endpoint.
    ///
    /// The first time we see an endpoint, `or_default()` creates a zeroed entry.
    pub fn record_endpoint_request(&self, endpoint: &str, duration_ms: u64, is_error: bool) {
        let mut metrics = self.metrics.write().unwrap();
        let endpoint_metric = metrics.endpoint_metrics.entry(endpoint.to_string()).or_default();

        endpoint_metric.request_count += 1;
        endpoint_metric.total_duration_ms += duration_ms;

        if is_error {
            endpoint_metric.error_count += 1;
        }
    }

    /// Count how a translation submission ended.
    pub fn record_outcome(&self, outcome: &Result<Outcome, TranslateError>) {
        let mut metrics = self.metrics.write().unwrap();
        let translations = &mut metrics.translations;

        match outcome {
            Ok(Outcome::Completed(_)) => translations.completed += 1,
            Ok(Outcome::MissingInput) => translations.missing_input += 1,
            Err(err) => {
                translations.failed += 1;
                *translations
                    .failures_by_stage
                    .entry(err.stage().to_string())
                    .or_default() += 1;
            }
        }
    }

    /// Get a snapshot of current metrics (used for the /metrics endpoint).
    ///
    /// Cloning releases the lock before the response is serialized.
    pub fn get_metrics_snapshot(&self) -> AppMetrics {
        self.metrics.read().unwrap().clone()
    }

    pub fn get_uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl EndpointMetric {
    pub fn average_duration_ms(&self) -> f64 {
        if self.request_count > 0 {
            self.total_duration_ms as f64 / self.request_count as f64
        } else {
            0.0
        }
    }

    /// Error rate between 0.0 and 1.0.
    pub fn error_rate(&self) -> f64 {
        if self.request_count > 0 {
            self.error_count as f64 / self.request_count as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::fake;
    use crate::engines::EngineError;

    #[test]
    fn test_record_outcome_counts_by_stage() {
        let state = AppState::with_orchestrator(AppConfig::default(), fake::orchestrator(false));

        state.record_outcome(&Ok(Outcome::MissingInput));
        state.record_outcome(&Err(TranslateError::Synthesis(EngineError::NothingToSpeak)));
        state.record_outcome(&Err(TranslateError::Synthesis(EngineError::EmptyResult)));

        let snapshot = state.get_metrics_snapshot();
        assert_eq!(snapshot.translations.missing_input, 1);
        assert_eq!(snapshot.translations.failed, 2);
        assert_eq!(snapshot.translations.completed, 0);
        assert_eq!(snapshot.translations.failures_by_stage["synthesis"], 2);
    }

    #[test]
    fn test_endpoint_metric_rates() {
        let state = AppState::with_orchestrator(AppConfig::default(), fake::orchestrator(false));
        state.record_endpoint_request("POST /", 30, false);
        state.record_endpoint_request("POST /", 10, true);

        let snapshot = state.get_metrics_snapshot();
        let metric = &snapshot.endpoint_metrics["POST /"];
        assert_eq!(metric.average_duration_ms(), 20.0);
        assert_eq!(metric.error_rate(), 0.5);
        assert_eq!(EndpointMetric::default().error_rate(), 0.0);
    }
}
