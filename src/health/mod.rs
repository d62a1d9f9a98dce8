use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "ci-cd-pipeline";

/// Error message reported when the health check itself fails
pub const HEALTH_FAILURE_MESSAGE: &str = "Internal error";

/// Status reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(dead_code)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Error,
}

/// Successful health check payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// RFC 3339 timestamp taken when the request was handled
    pub timestamp: String,
    pub service: String,
}

impl HealthReport {
    /// Build a healthy report stamped with the given time
    pub fn healthy(now: DateTime<Utc>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: now.to_rfc3339(),
            service: SERVICE_NAME.to_string(),
        }
    }
}

/// Payload returned when the health check could not be completed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthFailure {
    pub status: HealthStatus,
    pub error: String,
}

impl Default for HealthFailure {
    fn default() -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            error: HEALTH_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Source of wall-clock time for health reports
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<DateTime<Utc>>;
}

/// Clock backed by the operating system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<DateTime<Utc>> {
        // Measure the current time relative to the epoch
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow!("System clock is set before the Unix epoch: {e}"))?;
        // Convert into a calendar timestamp
        let secs = i64::try_from(elapsed.as_secs())
            .map_err(|e| anyhow!("System clock is out of range: {e}"))?;
        DateTime::from_timestamp(secs, elapsed.subsec_nanos())
            .ok_or_else(|| anyhow!("System clock is out of range: {secs}s"))
    }
}
