//! Graceful shutdown

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install interrupt handler: {0}")]
    Interrupt(#[source] io::Error),

    #[error("failed to install terminate handler: {0}")]
    Terminate(#[source] io::Error),
}

/// Signal that asked the server to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl ShutdownSignal {
    fn as_str(self) -> &'static str {
        match self {
            Self::Interrupt => "interrupt",
            Self::Terminate => "terminate",
        }
    }
}

async fn interrupt() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map_err(ShutdownSignalError::Interrupt)?;

    Ok(ShutdownSignal::Interrupt)
}

#[cfg(unix)]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::Terminate)?
        .recv()
        .await;

    Ok(ShutdownSignal::Terminate)
}

#[cfg(windows)]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::windows::ctrl_close()
        .map_err(ShutdownSignalError::Terminate)?
        .recv()
        .await;

    Ok(ShutdownSignal::Terminate)
}

#[cfg(not(any(unix, windows)))]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    std::future::pending().await
}

/// Wait for an interrupt or terminate signal, then stop accepting connections.
///
/// In-flight requests get `grace` to finish, or as long as they need when `None`. Carts, orders
/// and sessions are dropped with the process.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Option<Duration>,
) -> Result<(), ShutdownSignalError> {
    let received = tokio::select! {
        result = interrupt() => result?,
        result = terminate() => result?,
    };

    info!(
        signal = received.as_str(),
        grace_seconds = grace.map(|grace| grace.as_secs()),
        "shutdown requested; draining in-flight requests"
    );

    handle.stop_graceful(grace);

    Ok(())
}
