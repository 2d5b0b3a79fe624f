//! Checkout runner entry point.

use std::process::ExitCode;

use app::{Config, LogFormat};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(config: &Config) {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();
    init_tracing(&config);

    match app::run(&config).await {
        Ok(summary) => {
            tracing::info!(
                customer_id = %summary.customer_id,
                order_id = %summary.order_id,
                items = summary.item_count,
                total = %summary.total,
                reward_points = summary.reward_points,
                "checkout completed"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "checkout failed");
            ExitCode::FAILURE
        }
    }
}
