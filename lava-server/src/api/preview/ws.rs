//! Live preview WebSocket
//!
//! Each connection owns a debounce worker. Incoming snapshots are pushed
//! into it; settled snapshots are rendered and queued on an mpsc channel
//! that the socket loop drains into binary frames.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use card_render::{CardRenderer, CardRequest};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::core::ServerState;

/// Rendered frames waiting for the socket
const OUTBOX_CAPACITY: usize = 8;

/// GET /api/vcard/preview/ws - upgrade to WebSocket
pub async fn handle_preview_ws(
    State(state): State<ServerState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_preview_connection(socket, state))
}

fn error_frame(message: impl std::fmt::Display) -> Message {
    let body = serde_json::json!({ "error": message.to_string() });
    Message::Text(body.to_string().into())
}

async fn render_frame(renderer: &CardRenderer, request: &CardRequest) -> Message {
    match renderer
        .render_png(&request.data, &request.customization, request.mode)
        .await
    {
        Ok(png) => Message::Binary(png.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Live preview render failed");
            error_frame(e)
        }
    }
}

async fn handle_preview_connection(socket: WebSocket, state: ServerState) {
    let session = Uuid::new_v4();
    tracing::info!(%session, "Preview WebSocket connected");

    let (mut ws_sink, mut ws_stream) = socket.split();
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(OUTBOX_CAPACITY);

    let renderer = state.renderer.clone();
    let (snapshots, worker) = card_render::debounce(
        state.config.preview_debounce(),
        move |request: CardRequest| {
            let renderer = renderer.clone();
            let out_tx = out_tx.clone();
            async move {
                let frame = render_frame(&renderer, &request).await;
                // Receiver gone means the socket loop has ended
                let _ = out_tx.send(frame).await;
            }
        },
    );

    loop {
        tokio::select! {
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<CardRequest>(&text) {
                            Ok(request) => snapshots.push(request),
                            Err(e) => {
                                tracing::debug!(%session, "Invalid preview snapshot: {e}");
                                if ws_sink.send(error_frame(format!("Invalid snapshot: {e}"))).await.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!(%session, "Preview WebSocket disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(%session, "Preview WebSocket error: {e}");
                        break;
                    }
                    _ => {} // Binary, Pong
                }
            }

            frame = out_rx.recv() => {
                match frame {
                    Some(frame) => {
                        if ws_sink.send(frame).await.is_err() {
                            tracing::warn!(%session, "Failed to push preview frame");
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    // A snapshot still inside its quiet period has nobody to go to
    drop(snapshots);
    worker.abort();
    let _ = ws_sink.close().await;

    tracing::debug!(%session, "Preview session cleaned up");
}
