pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init_logging() {
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()));

    tracing_subscriber::registry().with(stdout_layer).init();
}
