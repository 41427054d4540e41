//! WebSocket transport
//!
//! Accepts connections on `/ws` and runs one read loop per connection.
//! Each connection also gets a writer task draining its outbound queue onto
//! the socket, so a slow client only ever stalls its own writer. Whichever
//! half stops first tears down the other and releases the registry entry.

use std::fmt;
use std::net::SocketAddr;

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::broadcast::RelayMessage;
use crate::config::Settings;
use crate::registry::Connection;
use crate::transport::AppState;
use crate::transport::handler::ConnectionHandler;
use crate::transport::http::build_router;
use crate::utils::error::RelayError;

/// Binds the configured address and serves until the listener fails.
pub async fn start_websocket_server(settings: &Settings) -> Result<(), RelayError> {
    let addr = settings.server.address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| RelayError::Bind {
            addr: addr.clone(),
            source,
        })?;

    serve(listener, AppState::new(&settings.relay)).await
}

/// Serves the relay on an already bound listener.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), RelayError> {
    let local_addr = listener.local_addr()?;
    info!("WebSocket server listening on ws://{local_addr}/ws");

    let app = build_router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, peer, state))
}

async fn handle_socket(socket: WebSocket, peer: SocketAddr, state: AppState) {
    let (ws_sender, ws_receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel::<RelayMessage>();

    let connection = Connection::new(Some(peer), tx);
    let mut handler = ConnectionHandler::new(connection, state.broadcaster.clone(), state.prefix());
    handler.open();

    run_connection(ws_sender, ws_receiver, handler, rx).await;
}

/// Pumps one open connection until either half stops, then closes it.
///
/// `rx` is the outbound queue of the handler's connection.
pub(crate) async fn run_connection<S, R, E>(
    mut ws_sender: S,
    mut ws_receiver: R,
    mut handler: ConnectionHandler,
    mut rx: mpsc::UnboundedReceiver<RelayMessage>,
) where
    S: Sink<WsMessage> + Unpin + Send + 'static,
    S::Error: fmt::Display + Send,
    R: Stream<Item = Result<WsMessage, E>> + Unpin,
    E: fmt::Display,
{
    let client_id = handler.id().clone();

    let mut writer = {
        let client_id = client_id.clone();
        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let Err(e) = ws_sender.send(WsMessage::Text(msg.to_string().into())).await {
                    warn!(connection = %client_id, error = %e, "failed to write to socket");
                    break;
                }
            }
            debug!(connection = %client_id, "send loop closed");
        })
    };

    let reader = async {
        while let Some(frame) = ws_receiver.next().await {
            match frame {
                Ok(WsMessage::Text(text)) => {
                    handler.on_text(text.as_str());
                }
                Ok(WsMessage::Binary(bytes)) => {
                    warn!(connection = %client_id, bytes = bytes.len(), "ignoring binary frame");
                }
                // keep reading: the close reply goes out on the next poll
                Ok(WsMessage::Close(_)) => {
                    debug!(connection = %client_id, "close frame received");
                }
                // ping/pong are answered by the transport
                Ok(_) => {}
                Err(e) => {
                    debug!(connection = %client_id, error = %e, "read failed");
                    break;
                }
            }
        }
    };

    tokio::select! {
        _ = reader => {}
        _ = &mut writer => {}
    }

    writer.abort();
    handler.close();
}
