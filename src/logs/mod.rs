use metrics::counter;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Counter incremented for every HTTP request served
pub const TOTAL_REQUESTS: &str = "cicd_demo.total_requests";

/// Counter incremented for every request that ended in an internal failure
pub const TOTAL_ERRORS: &str = "cicd_demo.total_errors";

/// Initialize structured logging and metrics collection
pub fn init_logging_and_metrics(json: bool) {
    // Set up environment filter for log levels
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cicd_demo=info,tower_http=info"));
    // Initialize tracing subscriber with stdout output
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stdout),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stdout),
            )
            .init();
    }
    // Output debugging information
    info!(json, "Logging and tracing initialized");
    // Initialize metrics with default values
    counter!(TOTAL_REQUESTS).absolute(0);
    counter!(TOTAL_ERRORS).absolute(0);
    // Output debugging information
    info!("Metrics collection initialized");
}
