// file: src/utils/telemetry.rs
// description: health reporting and timing for index loads
// reference: https://docs.rs/chrono

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    fn icon(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "✓",
            HealthStatus::Degraded => "⚠",
            HealthStatus::Unhealthy => "✗",
        }
    }
}

/// Health of one catalogued index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Version label of the checked index
    pub component: String,
    pub status: HealthStatus,
    pub message: Option<String>,
    pub load_time_ms: u64,
}

impl HealthCheck {
    pub fn healthy(component: &str, load_time: Duration) -> Self {
        Self::with_status(component, HealthStatus::Healthy, None, load_time)
    }

    pub fn degraded(component: &str, message: String, load_time: Duration) -> Self {
        Self::with_status(component, HealthStatus::Degraded, Some(message), load_time)
    }

    pub fn unhealthy(component: &str, message: String, load_time: Duration) -> Self {
        Self::with_status(component, HealthStatus::Unhealthy, Some(message), load_time)
    }

    fn with_status(
        component: &str,
        status: HealthStatus,
        message: Option<String>,
        load_time: Duration,
    ) -> Self {
        Self {
            component: component.to_string(),
            status,
            message,
            load_time_ms: load_time.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall_status: HealthStatus,
    pub checks: Vec<HealthCheck>,
    pub generated_at: DateTime<Utc>,
    /// Version of this tool
    pub version: String,
}

impl HealthReport {
    pub fn new(checks: Vec<HealthCheck>, version: String) -> Self {
        let overall_status = if checks.is_empty()
            || checks.iter().any(|c| c.status == HealthStatus::Unhealthy)
        {
            HealthStatus::Unhealthy
        } else if checks.iter().any(|c| c.status == HealthStatus::Degraded) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        Self {
            overall_status,
            checks,
            generated_at: Utc::now(),
            version,
        }
    }

    pub fn count(&self, status: HealthStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    pub fn format(&self) -> String {
        let mut output = format!(
            "{} Index Health: {:?}\n\
             Tool version: {}\n\
             Checked: {}\n\
             Healthy: {} | Degraded: {} | Unhealthy: {}\n\n",
            self.overall_status.icon(),
            self.overall_status,
            self.version,
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.count(HealthStatus::Healthy),
            self.count(HealthStatus::Degraded),
            self.count(HealthStatus::Unhealthy),
        );

        for check in &self.checks {
            output.push_str(&format!(
                "{} {} ({:?}) - {}ms",
                check.status.icon(),
                check.component,
                check.status,
                check.load_time_ms
            ));

            if let Some(ref msg) = check.message {
                output.push_str(&format!("\n  {}", msg));
            }

            output.push('\n');
        }

        output
    }
}

pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        info!("Starting operation: {}", operation);
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Completed operation: {} in {:.2}s",
            self.operation,
            elapsed.as_secs_f64()
        );
        elapsed
    }

    pub fn finish_with_count(self, count: usize) -> PerformanceMetrics {
        let metrics = PerformanceMetrics::new(&self.operation, count, self.elapsed());
        info!("Completed operation: {}", metrics.format());
        metrics
    }

    pub fn warn_if_slow(&self, threshold: Duration, message: &str) {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                "Slow operation [{}]: {} took {:.2}s (threshold: {:.2}s)",
                self.operation,
                message,
                elapsed.as_secs_f64(),
                threshold.as_secs_f64()
            );
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub operation: String,
    pub count: usize,
    pub duration_ms: u64,
    pub throughput: f64, // items per second
}

impl PerformanceMetrics {
    pub fn new(operation: &str, count: usize, duration: Duration) -> Self {
        let duration_secs = duration.as_secs_f64();
        let throughput = if duration_secs > 0.0 {
            count as f64 / duration_secs
        } else {
            0.0
        };

        Self {
            operation: operation.to_string(),
            count,
            duration_ms: duration.as_millis() as u64,
            throughput,
        }
    }

    pub fn format(&self) -> String {
        format!(
            "{}: {} items in {}ms ({:.2} items/sec)",
            self.operation, self.count, self.duration_ms, self.throughput
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_creation() {
        let check = HealthCheck::healthy("v1.0", Duration::from_millis(50));
        assert_eq!(check.component, "v1.0");
        assert_eq!(check.status, HealthStatus::Healthy);
        assert_eq!(check.load_time_ms, 50);
    }

    #[test]
    fn test_health_report_overall_status() {
        let checks = vec![
            HealthCheck::healthy("v1.0", Duration::from_millis(10)),
            HealthCheck::degraded(
                "v0.9",
                "missing tables: alltitles".to_string(),
                Duration::from_millis(12),
            ),
        ];

        let report = HealthReport::new(checks, "0.1.0".to_string());
        assert_eq!(report.overall_status, HealthStatus::Degraded);
        assert_eq!(report.count(HealthStatus::Healthy), 1);
        assert!(report.format().contains("missing tables: alltitles"));
    }

    #[test]
    fn test_empty_report_is_unhealthy() {
        let report = HealthReport::new(Vec::new(), "0.1.0".to_string());
        assert_eq!(report.overall_status, HealthStatus::Unhealthy);
    }

    #[test]
    fn test_performance_metrics() {
        let metrics = PerformanceMetrics::new("load", 100, Duration::from_secs(10));
        assert_eq!(metrics.count, 100);
        assert_eq!(metrics.throughput, 10.0);
        assert!(metrics.format().contains("100 items"));
    }

    #[test]
    fn test_operation_timer() {
        let timer = OperationTimer::new("load");
        std::thread::sleep(Duration::from_millis(10));
        let metrics = timer.finish_with_count(3);
        assert_eq!(metrics.count, 3);
        assert!(metrics.duration_ms >= 10);
    }

    #[test]
    fn test_operation_timer_finish_reports_elapsed() {
        let timer = OperationTimer::new("load v1");
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.finish() >= Duration::from_millis(5));
    }
}
