mod broadcast_ticker;

use crate::{Connection, ConnectionInfo, Result as WsErrorResult, WsError};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

/// In-memory `Connection` that records what was sent and how often it was closed
pub(crate) struct MockConnection {
    info: ConnectionInfo,
    sent: Mutex<Vec<String>>,
    close_calls: AtomicUsize,
    fail_sends: AtomicBool,
    fail_close: AtomicBool,
}

impl MockConnection {
    pub(crate) fn new(path_param: &str) -> Arc<Self> {
        Arc::new(Self {
            info: ConnectionInfo::new(path_param),
            sent: Mutex::new(Vec::new()),
            close_calls: AtomicUsize::new(0),
            fail_sends: AtomicBool::new(false),
            fail_close: AtomicBool::new(false),
        })
    }

    pub(crate) fn failing_sends(path_param: &str) -> Arc<Self> {
        let connection = Self::new(path_param);
        connection.fail_sends.store(true, Ordering::SeqCst);
        connection
    }

    pub(crate) fn failing_close(path_param: &str) -> Arc<Self> {
        let connection = Self::new(path_param);
        connection.fail_close.store(true, Ordering::SeqCst);
        connection
    }

    pub(crate) fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    fn record(&self, text: &str) -> WsErrorResult<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(WsError::send_failed(self.id(), "mock send failure"));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn info(&self) -> &ConnectionInfo {
        &self.info
    }

    fn is_open(&self) -> bool {
        self.close_calls() == 0
    }

    async fn send_text(&self, text: &str) -> WsErrorResult<()> {
        self.record(text)
    }

    fn send_text_nowait(&self, text: &str) -> WsErrorResult<()> {
        self.record(text)
    }

    fn close(&self) -> WsErrorResult<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(WsError::close_failed(self.id(), "mock close failure"));
        }
        Ok(())
    }
}

/// Upcast for APIs taking `Arc<dyn Connection>`
pub(crate) fn as_dyn(connection: &Arc<MockConnection>) -> Arc<dyn Connection> {
    Arc::clone(connection) as Arc<dyn Connection>
}
