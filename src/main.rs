//! Pomodoro Timer - a focus/break countdown with end-of-phase notifications
//!
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use tokio::{
    net::TcpListener,
    sync::{mpsc, watch},
};
use tracing::info;

use pomodoro_timer::{
    api::create_router,
    config::Config,
    services::{DesktopNotifier, LogNotifier, Notifier, TracingProgressRenderer},
    state::AppState,
    tasks::timer_driver_task,
    timer::TimerController,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    let settings = config.settings()?;

    info!("Starting pomodoro-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, focus={}s, break={}s, break_delay={}s",
        config.host,
        config.port,
        settings.focus_duration_seconds(),
        settings.break_duration_seconds(),
        config.break_delay
    );

    let notifier: Arc<dyn Notifier> = if config.no_desktop_notifications {
        Arc::new(LogNotifier)
    } else {
        Arc::new(DesktopNotifier::with_sound(config.notification_sound.clone()))
    };

    let controller = TimerController::new(
        settings,
        config.break_delay(),
        notifier,
        Arc::new(TracingProgressRenderer),
    );

    // Channels between the HTTP layer and the timer driver
    let (command_tx, command_rx) = mpsc::channel(32);
    let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        command_tx,
        snapshot_rx,
    ));

    // Start the timer driver background task
    tokio::spawn(timer_driver_task(controller, command_rx, snapshot_tx));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /focus    - Start a focus phase");
    info!("  POST /pause    - Pause or resume the countdown");
    info!("  POST /reset    - Stop and return to idle");
    info!("  GET  /settings - Show phase lengths");
    info!("  PUT  /settings - Change phase lengths");
    info!("  GET  /status   - Current timer state and clock");
    info!("  GET  /health   - Health check");

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
