//! Signal handling for graceful shutdown

use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{error, info};

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() {
    let mut signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            error!("Failed to register signal handlers: {}", e);
            // Without handlers the process is stopped by the default action
            return std::future::pending().await;
        }
    };

    if let Some(signal) = signals.next().await {
        let name = signal_hook::low_level::signal_name(signal).unwrap_or("unknown");
        info!("Received {}, stopping timer", name);
    }
    signals.handle().close();
}
