#![forbid(unsafe_code)]

use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancel `cancel` on SIGINT or SIGTERM. Returns once either a signal
/// arrived or the token was cancelled elsewhere.
pub async fn cancel_on_signal(cancel: CancellationToken) -> std::io::Result<()> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = interrupt.recv() => info!("SIGINT received, stopping after the current cycle"),
        _ = terminate.recv() => info!("SIGTERM received, stopping after the current cycle"),
        _ = cancel.cancelled() => return Ok(()),
    }
    cancel.cancel();
    Ok(())
}
