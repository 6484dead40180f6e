//! RESP Server
//!
//! Accept loop for the raw-stream front end.

use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{debug, error, info};

use super::handle_connection;
use crate::state::AppState;

/// Pause after a failed accept, e.g. when the process is out of descriptors.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections forever, serving each on its own task.
///
/// Accept errors are logged and the loop carries on after a short pause; a
/// failing connection never affects the others.
pub async fn serve(listener: TcpListener, state: AppState) {
    if let Ok(addr) = listener.local_addr() {
        info!("RESP server listening on {}", addr);
    }

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                error!(error = %err, "failed to accept RESP connection");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };

        let state = state.clone();
        tokio::spawn(async move {
            match handle_connection(stream, state).await {
                Ok(reply) => debug!(%peer, reply_bytes = reply.len(), "RESP connection closed"),
                Err(err) => debug!(%peer, error = %err, "RESP connection failed"),
            }
        });
    }
}
