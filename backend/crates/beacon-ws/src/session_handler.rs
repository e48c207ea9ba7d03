use crate::{Connection, WsError};

use std::sync::Arc;

use async_trait::async_trait;

/// Callbacks the transport invokes for each connection event.
///
/// Calls for different connections may run concurrently; calls for one
/// connection arrive in order (open, messages, then error and/or close).
#[async_trait]
pub trait SessionHandler: Send + Sync {
    async fn on_open(&self, connection: Arc<dyn Connection>, path_param: &str);

    async fn on_message(&self, text: &str, connection: &dyn Connection, path_param: &str);

    async fn on_close(&self, connection: &dyn Connection);

    async fn on_error(&self, connection: &dyn Connection, cause: &WsError);
}
