use crate::{Connection, ConnectionInfo, Result as WsErrorResult, WsError};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::extract::ws::{CloseFrame, Message, close_code};
use tokio::sync::{Notify, mpsc};
use tokio::sync::mpsc::error::TrySendError;

const CLOSE_REASON: &str = "session closed by server";

/// Close frame sent when the server ends a session
pub(crate) fn server_close_frame() -> Message {
    Message::Close(Some(CloseFrame {
        code: close_code::NORMAL,
        reason: CLOSE_REASON.into(),
    }))
}

/// `Connection` backed by the bounded outbound channel of a socket's send task.
///
/// Closing does not go through the channel: a client that stopped reading
/// keeps the buffer full, so `close` raises a separate signal that the send
/// task acts on ahead of any queued frame.
pub struct ChannelConnection {
    info: ConnectionInfo,
    sender: mpsc::Sender<Message>,
    closed: AtomicBool,
    close_signal: Arc<Notify>,
}

impl ChannelConnection {
    pub fn new(info: ConnectionInfo, sender: mpsc::Sender<Message>) -> Self {
        Self {
            info,
            sender,
            closed: AtomicBool::new(false),
            close_signal: Arc::new(Notify::new()),
        }
    }

    /// Fires once `close` has been called; the permit is kept until awaited.
    pub fn close_signal(&self) -> Arc<Notify> {
        Arc::clone(&self.close_signal)
    }

    fn ensure_open(&self) -> WsErrorResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(WsError::send_failed(self.id(), "connection closed"))
        }
    }
}

#[async_trait]
impl Connection for ChannelConnection {
    fn info(&self) -> &ConnectionInfo {
        &self.info
    }

    fn is_open(&self) -> bool {
        !self.closed.load(Ordering::Acquire) && !self.sender.is_closed()
    }

    async fn send_text(&self, text: &str) -> WsErrorResult<()> {
        self.ensure_open()?;

        self.sender
            .send(Message::Text(text.into()))
            .await
            .map_err(|_| WsError::send_failed(self.id(), "connection closed"))
    }

    fn send_text_nowait(&self, text: &str) -> WsErrorResult<()> {
        self.ensure_open()?;

        self.sender
            .try_send(Message::Text(text.into()))
            .map_err(|e| match e {
                TrySendError::Full(_) => {
                    WsError::send_failed(self.id(), "send buffer full, client too slow")
                }
                TrySendError::Closed(_) => WsError::send_failed(self.id(), "connection closed"),
            })
    }

    fn close(&self) -> WsErrorResult<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        if self.sender.is_closed() {
            return Err(WsError::close_failed(self.id(), "socket already gone"));
        }

        self.close_signal.notify_one();
        Ok(())
    }
}
