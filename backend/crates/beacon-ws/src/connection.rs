use crate::{ConnectionId, ConnectionInfo, Result as WsErrorResult};

use async_trait::async_trait;

/// Send capability of one live client session.
///
/// The transport creates one per accepted socket. The registry, the session
/// handler and the broadcast ticker only ever talk to sockets through this.
#[async_trait]
pub trait Connection: Send + Sync {
    fn info(&self) -> &ConnectionInfo;

    fn id(&self) -> ConnectionId {
        self.info().connection_id
    }

    /// False once `close` has been called or the socket went away
    fn is_open(&self) -> bool;

    /// Queue a text frame, waiting for buffer space if needed
    async fn send_text(&self, text: &str) -> WsErrorResult<()>;

    /// Queue a text frame without waiting; fails when the buffer is full
    fn send_text_nowait(&self, text: &str) -> WsErrorResult<()>;

    /// Ask the transport to close the socket. Calling it again is a no-op.
    fn close(&self) -> WsErrorResult<()>;
}
