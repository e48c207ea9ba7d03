use crate::channel_connection::server_close_frame;
use crate::{
    ChannelConnection, Connection, ConnectionConfig, ConnectionId, ConnectionInfo,
    Result as WsErrorResult, SessionHandler, SessionState, ShutdownGuard, WsError,
};

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::{Notify, mpsc};
use tokio::time::{Instant, timeout_at};

/// Upper bound on flushing queued frames plus the close frame once a
/// session is closed by the server. A client that stopped reading is dropped
/// after this.
pub const CLOSE_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

/// Drives one accepted WebSocket and turns its events into `SessionHandler` calls
pub struct WebSocketConnection {
    info: ConnectionInfo,
    config: ConnectionConfig,
    handler: Arc<dyn SessionHandler>,
}

impl WebSocketConnection {
    pub fn new(
        info: ConnectionInfo,
        config: ConnectionConfig,
        handler: Arc<dyn SessionHandler>,
    ) -> Self {
        Self {
            info,
            config,
            handler,
        }
    }

    /// Handle the WebSocket connection lifecycle.
    pub async fn handle(
        self,
        socket: WebSocket,
        shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        let (ws_sender, ws_receiver) = socket.split();
        self.run(ws_sender, ws_receiver, shutdown_guard).await
    }

    /// Session loop over an already split socket.
    ///
    /// Always ends with exactly one `on_close`, also after `on_error`.
    pub async fn run<Si, St, E>(
        self,
        ws_sender: Si,
        mut ws_receiver: St,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()>
    where
        Si: Sink<Message> + Unpin + Send + 'static,
        Si::Error: Send,
        St: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
    {
        let connection_id = self.info.connection_id;
        let path_param = self.info.path_param.clone();

        // Bounded channel for outgoing messages (backpressure handling)
        let (tx, rx) = mpsc::channel::<Message>(self.config.send_buffer_size);
        let channel = ChannelConnection::new(self.info, tx);
        let close_signal = channel.close_signal();
        let connection: Arc<dyn Connection> = Arc::new(channel);

        let mut send_task = tokio::spawn(forward_frames(
            rx,
            ws_sender,
            close_signal,
            connection_id,
        ));
        let mut send_task_done = false;

        self.handler
            .on_open(Arc::clone(&connection), &path_param)
            .await;
        let mut state = SessionState::Open;

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            state = state.on_message();
                            self.handler
                                .on_message(text.as_str(), connection.as_ref(), &path_param)
                                .await;
                        }
                        Some(Ok(Message::Binary(data))) => {
                            log::debug!(
                                "Ignoring binary message ({} bytes) from connection {}",
                                data.len(),
                                connection_id
                            );
                        }
                        // Pings are answered by the protocol layer
                        Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                        Some(Ok(Message::Close(_))) => {
                            log::info!("Received close frame from connection {}", connection_id);
                            break Ok(());
                        }
                        Some(Err(e)) => {
                            let err = WsError::transport(format!("WebSocket error: {e}"));
                            state = state.on_error();
                            self.handler.on_error(connection.as_ref(), &err).await;
                            break Err(err);
                        }
                        None => {
                            log::info!("Connection {} closed by client", connection_id);
                            break Ok(());
                        }
                    }
                }

                // Outbound side finished: server-initiated close or dead socket
                _ = &mut send_task => {
                    send_task_done = true;
                    log::debug!("Outbound stream of connection {} finished", connection_id);
                    break Ok(());
                }

                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down connection {} gracefully", connection_id);
                    if let Err(e) = connection.close() {
                        log::warn!("{}", e);
                    }
                    break Ok(());
                }
            }
        };

        log::debug!(
            "Connection {} leaving state {}",
            connection_id,
            state.as_str()
        );
        self.handler.on_close(connection.as_ref()).await;
        state = state.on_close();
        debug_assert!(state.is_terminal());

        // Ending the session closes it from our side too, so the send task
        // stops even while a tick snapshot still holds a sender handle.
        let _ = connection.close();
        drop(connection);
        if !send_task_done {
            let _ = send_task.await;
        }

        result
    }
}

/// Forward queued frames to the socket until the channel ends or the
/// connection is closed; on close, flush what is queued and send a close
/// frame, bounded by `CLOSE_FLUSH_TIMEOUT`.
async fn forward_frames<Si>(
    mut rx: mpsc::Receiver<Message>,
    mut ws_sender: Si,
    close_signal: Arc<Notify>,
    connection_id: ConnectionId,
) where
    Si: Sink<Message> + Unpin,
{
    loop {
        tokio::select! {
            biased;
            _ = close_signal.notified() => break,
            msg = rx.recv() => {
                let Some(msg) = msg else {
                    return;
                };
                // A stalled socket must not hold off the close
                tokio::select! {
                    biased;
                    _ = close_signal.notified() => break,
                    sent = ws_sender.send(msg) => {
                        if sent.is_err() {
                            return;
                        }
                    }
                }
            }
        }
    }

    rx.close();
    let deadline = Instant::now() + CLOSE_FLUSH_TIMEOUT;
    let flushed = timeout_at(deadline, async {
        while let Ok(msg) = rx.try_recv() {
            ws_sender.send(msg).await?;
        }
        ws_sender.send(server_close_frame()).await
    })
    .await;

    match flushed {
        Ok(Ok(())) => log::debug!("Sent close frame to connection {}", connection_id),
        Ok(Err(_)) => log::debug!("Connection {} gone before close frame", connection_id),
        Err(_) => log::warn!(
            "Connection {} did not accept its close frame within {:?}, dropping socket",
            connection_id,
            CLOSE_FLUSH_TIMEOUT
        ),
    }
}
