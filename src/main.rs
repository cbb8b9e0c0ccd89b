//! Competition Timer - round timer and team scoreboard server
//!
//! This is the main entry point for the competition-timer application.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use competition_timer::{
    api::create_router,
    config::Config,
    repository::SqliteTeamRepository,
    state::{AppOptions, AppState},
    tasks::{tick_driver_task, IntervalScheduler, TICK_PERIOD},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "competition_timer={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting competition-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, database={}",
        config.host, config.port, config.database
    );

    let teams = SqliteTeamRepository::connect(&config.database)
        .await
        .context("opening team database")?;

    // Ticks flow from interval tasks through the driver into the timer
    let (scheduler, tick_rx) = IntervalScheduler::new(TICK_PERIOD);

    let state = Arc::new(AppState::new(
        AppOptions {
            port: config.port,
            host: config.host.clone(),
            sound_command: config.sound_command.clone(),
        },
        Arc::new(teams),
        Arc::new(scheduler),
    ));

    let driver_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_driver_task(driver_state, tick_rx).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /api/timer            - Current timer view");
    info!("  POST /api/timer/set        - Set round length {{minutes, seconds}}");
    info!("  POST /api/timer/start      - Start or resume");
    info!("  POST /api/timer/pause      - Pause");
    info!("  POST /api/timer/stop       - Stop and restore configured time");
    info!("  GET  /api/timer/events     - Server-sent timer events");
    info!("  GET|PUT /api/competition   - Active competition tab");
    info!("  GET  /api/board            - Teams of the active tab");
    info!("  *    /api/fll-teams        - FIRST LEGO League teams");
    info!("  *    /api/robofest-teams   - Robofest teams");
    info!("  GET  /status               - Server status");
    info!("  GET  /health               - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
