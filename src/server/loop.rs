// Server loop module
// Accepts connections until shutdown is signalled, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Interval between checks of the active connection count while draining
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Run the accept loop until `shutdown` is notified.
///
/// Must run inside a `tokio::task::LocalSet`: connections are served on
/// local tasks. After shutdown the listener is closed and in-flight
/// connections get up to `performance.request_timeout` to finish.
pub async fn run_server(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown("stop signal received, closing listener");
                break;
            }
        }
    }

    drop(listener);
    drain_connections(
        &active_connections,
        Duration::from_secs(state.config.performance.request_timeout),
    )
    .await;
    Ok(())
}

/// Wait for active connections to finish, bounded by `deadline`
async fn drain_connections(active: &AtomicUsize, deadline: Duration) {
    let until = tokio::time::Instant::now() + deadline;

    loop {
        let remaining = active.load(Ordering::SeqCst);
        if remaining == 0 {
            logger::log_info("All connections closed");
            return;
        }
        if tokio::time::Instant::now() >= until {
            logger::log_warning(&format!(
                "Drain deadline reached with {remaining} connection(s) still open"
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL).await;
    }
}
