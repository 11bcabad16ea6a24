//! # Health and Metrics Endpoints
//!
//! - `GET /health` - Liveness plus a summary of counters and the engines in use
//! - `GET /api/v1/metrics` - Per-endpoint timings and translation outcomes
//!
//! Neither endpoint calls the remote engines; they only report what this
//! process has observed so far.

use crate::config::AppConfig;
use crate::state::{AppMetrics, AppState, TranslationMetrics};
use actix_web::{web, HttpResponse};
use serde_json::json;

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let metrics = state.get_metrics_snapshot();
    let config = state.get_config();
    let uptime_seconds = state.get_uptime_seconds();

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds,
        "service": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "host": config.server.host,
            "port": config.server.port
        },
        "metrics": {
            "total_requests": metrics.request_count,
            "total_errors": metrics.error_count,
            "error_rate": overall_error_rate(&metrics),
            "translations_completed": metrics.translations.completed,
            "translations_failed": metrics.translations.failed
        },
        "memory": get_memory_info(),
        "engines": engine_info(config),
        "system": get_system_status(&metrics.translations)
    }))
}

pub async fn detailed_metrics(state: web::Data<AppState>) -> HttpResponse {
    let metrics = state.get_metrics_snapshot();
    let uptime_seconds = state.get_uptime_seconds();

    let mut endpoint_stats = Vec::new();
    for (endpoint, metric) in metrics.endpoint_metrics.iter() {
        endpoint_stats.push(json!({
            "endpoint": endpoint,
            "request_count": metric.request_count,
            "error_count": metric.error_count,
            "error_rate": metric.error_rate(),
            "average_duration_ms": metric.average_duration_ms(),
            "total_duration_ms": metric.total_duration_ms
        }));
    }

    let translations = &metrics.translations;

    HttpResponse::Ok().json(json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds,
        "overall": {
            "total_requests": metrics.request_count,
            "total_errors": metrics.error_count,
            "error_rate": overall_error_rate(&metrics),
            "requests_per_second": if uptime_seconds > 0 {
                metrics.request_count as f64 / uptime_seconds as f64
            } else {
                0.0
            }
        },
        "translations": {
            "completed": translations.completed,
            "missing_input": translations.missing_input,
            "failed": translations.failed,
            "failures_by_stage": translations.failures_by_stage
        },
        "endpoints": endpoint_stats,
        "memory": get_memory_info()
    }))
}

fn overall_error_rate(metrics: &AppMetrics) -> f64 {
    if metrics.request_count > 0 {
        metrics.error_count as f64 / metrics.request_count as f64
    } else {
        0.0
    }
}

fn engine_info(config: &AppConfig) -> serde_json::Value {
    json!({
        "translation": {
            "base_url": config.translation.base_url,
            "max_chars": config.translation.max_chars
        },
        "transliteration": {
            "scheme": "itrans",
            "in_process": true
        },
        "speech": {
            "base_url": config.speech.base_url,
            "slow": config.speech.slow
        }
    })
}

fn get_memory_info() -> serde_json::Value {
    #[cfg(target_os = "linux")]
    {
        let pid = std::process::id();
        if let Ok(status) = std::fs::read_to_string(format!("/proc/{}/status", pid)) {
            let mut vm_rss = 0;
            let mut vm_size = 0;

            for line in status.lines() {
                if line.starts_with("VmRSS:") {
                    if let Some(kb_str) = line.split_whitespace().nth(1) {
                        vm_rss = kb_str.parse::<u64>().unwrap_or(0) * 1024;
                    }
                } else if line.starts_with("VmSize:") {
                    if let Some(kb_str) = line.split_whitespace().nth(1) {
                        vm_size = kb_str.parse::<u64>().unwrap_or(0) * 1024;
                    }
                }
            }

            return json!({
                "resident_memory_bytes": vm_rss,
                "virtual_memory_bytes": vm_size,
                "available": true
            });
        }
    }

    json!({
        "resident_memory_bytes": 0,
        "virtual_memory_bytes": 0,
        "available": false,
        "note": "Memory info not available on this platform"
    })
}

/// Upstream health as seen from our side: the share of submissions that
/// reached an engine and failed.
fn get_system_status(translations: &TranslationMetrics) -> serde_json::Value {
    let attempted = translations.completed + translations.failed;
    let failure_rate = if attempted > 0 {
        translations.failed as f64 / attempted as f64
    } else {
        0.0
    };

    let status = if failure_rate > 0.5 {
        "degraded"
    } else if failure_rate > 0.1 {
        "unstable"
    } else {
        "normal"
    };

    json!({
        "status": status,
        "engine_failure_percent": (failure_rate * 100.0).round(),
        "warnings": if failure_rate > 0.5 {
            vec!["Most translations are failing - check the engine endpoints or rate limits"]
        } else {
            vec![]
        }
    })
}
