use dotenv::dotenv;
use studyhub_server::{AppState, Settings};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> studyhub_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();

    // Load configuration
    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    info!(
        "Connecting to database (environment: {})",
        config.environment
    );

    // A failed connection is logged, not fatal; the process exits cleanly
    // either way, with no retry.
    match AppState::new(config).await {
        Ok(state) => {
            let status = state.db().get_pool_status().await?;
            info!(
                "Database connection established ({} connections, {} idle)",
                status.total_connections, status.idle_connections
            );
            state.shutdown().await?;
        }
        Err(e) => {
            error!("Database connection failed: {}", e);
        }
    }

    Ok(())
}
