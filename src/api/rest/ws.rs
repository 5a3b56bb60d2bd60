use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::SinkExt;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};

use crate::state::AppState;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = BroadcastStream::new(state.status_events_tx.subscribe());

    info!("websocket client connected");

    let send_task = tokio::spawn(async move {
        while let Some(event) = events.next().await {
            let change = match event {
                Ok(change) => change,
                Err(err) => {
                    warn!(error = %err, "websocket client fell behind status events");
                    continue;
                }
            };

            let json = match serde_json::to_string(&change) {
                Ok(json) => json,
                Err(err) => {
                    warn!(error = %err, "failed to serialize status change for ws");
                    continue;
                }
            };

            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let recv_task = tokio::spawn(async move {
        while let Some(Ok(_msg)) = receiver.next().await {}
    });

    run_until_either(send_task, recv_task).await;

    info!("websocket client disconnected");
}

/// Waits for whichever task ends first and aborts the other.
async fn run_until_either<A, B>(mut first: JoinHandle<A>, mut second: JoinHandle<B>) {
    tokio::select! {
        _ = &mut first => second.abort(),
        _ = &mut second => first.abort(),
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;

    use super::run_until_either;

    fn parked_task() -> (tokio::task::JoinHandle<()>, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _alive = tx;
            std::future::pending::<()>().await;
        });
        (handle, rx)
    }

    #[tokio::test]
    async fn closed_reader_stops_the_writer() {
        let (writer, writer_alive) = parked_task();
        let reader = tokio::spawn(async {});

        run_until_either(writer, reader).await;

        assert!(writer_alive.await.is_err());
    }

    #[tokio::test]
    async fn closed_writer_stops_the_reader() {
        let (reader, reader_alive) = parked_task();
        let writer = tokio::spawn(async {});

        run_until_either(writer, reader).await;

        assert!(reader_alive.await.is_err());
    }
}
