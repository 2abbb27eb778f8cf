//! HTTP endpoint the platform posts webhook callbacks to.

use std::future::Future;

use axum::{Router, body::Bytes, extract::State, routing::post};
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

use crate::{
    base::types::Void,
    interaction::{self, ACK, event::InboundEvent},
    lifecycle::EVENTS_PATH,
    runtime::Runtime,
};

/// Build the router serving `POST /events`.
pub fn router(runtime: Runtime) -> Router {
    Router::new().route(EVENTS_PATH, post(handle_events)).with_state(runtime)
}

/// Serve callbacks on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, runtime: Runtime, shutdown: F) -> Void
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Listening for webhook callbacks on {} ...", listener.local_addr()?);

    axum::serve(listener, router(runtime)).with_graceful_shutdown(shutdown).await?;

    Ok(())
}

/// Decode and dispatch one callback.
///
/// The body is decoded by hand so a malformed callback is still acknowledged.
#[instrument(skip_all)]
async fn handle_events(State(runtime): State<Runtime>, body: Bytes) -> &'static str {
    match serde_json::from_slice::<InboundEvent>(&body) {
        Ok(event) => interaction::dispatch(&runtime, event).await,
        Err(err) => {
            warn!("Failed to decode webhook callback: {}", err);
            ACK
        }
    }
}
