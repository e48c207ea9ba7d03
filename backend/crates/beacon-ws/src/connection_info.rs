use crate::ConnectionId;

use chrono::{DateTime, Utc};

/// Information about an active connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    /// Variable segment of the upgrade path (`/ws/{param}`)
    pub path_param: String,
    pub connected_at: DateTime<Utc>,
}

impl ConnectionInfo {
    pub fn new(path_param: impl Into<String>) -> Self {
        Self {
            connection_id: ConnectionId::new(),
            path_param: path_param.into(),
            connected_at: Utc::now(),
        }
    }
}
