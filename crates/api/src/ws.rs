//! Live Alert WebSocket

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::AppState;

/// Upgrade handler for `/ws/alerts`
pub async fn alerts_ws(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one subscriber connection: forward hub frames, push a `"ping"`
/// keep-alive at the configured interval, and unregister on any failure
/// or close.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (id, mut outbound) = state.hub.connect().await;

    let mut keepalive =
        tokio::time::interval(Duration::from_secs(state.config.ping_interval_secs));
    // interval fires immediately; the first ping should wait one period
    keepalive.tick().await;

    loop {
        tokio::select! {
            frame = outbound.recv() => {
                match frame {
                    Some(text) => {
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            _ = keepalive.tick() => {
                if sender.send(Message::Text("ping".to_string())).await.is_err() {
                    break;
                }
            }
            msg = receiver.next() => {
                match msg {
                    // inbound frames only keep the connection alive
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.hub.disconnect(id).await;
    debug!("websocket connection closed");
}
