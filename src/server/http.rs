use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::debug;

use crate::health::{Clock, HealthReport, SystemClock};
use crate::server::error::ApiError;

/// Greeting returned by the root endpoint
pub const GREETING: &str = "Python CI/CD Demo - Hello World!";

/// State shared with the route handlers
#[derive(Clone)]
pub struct AppState {
    /// Clock used to stamp health reports
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create state with the given clock
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

/// Root endpoint returning the demo greeting
pub async fn home() -> &'static str {
    GREETING
}

/// Health check endpoint for load balancer and orchestrator status checking
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthReport>, ApiError> {
    // Read the wall clock for this request
    let now = state.clock.now().map_err(ApiError::Unhealthy)?;
    // Output debugging information
    debug!(timestamp = %now, "Health check succeeded");
    // Return a freshly built report
    Ok(Json(HealthReport::healthy(now)))
}
