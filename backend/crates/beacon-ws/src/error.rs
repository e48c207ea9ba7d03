use crate::ConnectionId;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Send to connection {connection_id} failed: {reason} {location}")]
    SendFailed {
        connection_id: ConnectionId,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Close of connection {connection_id} failed: {reason} {location}")]
    CloseFailed {
        connection_id: ConnectionId,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Transport error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("Connection limit exceeded: {current} connections (max: {max}) {location}")]
    ConnectionLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },
}

impl WsError {
    #[track_caller]
    pub fn send_failed<S: Into<String>>(connection_id: ConnectionId, reason: S) -> Self {
        Self::SendFailed {
            connection_id,
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn close_failed<S: Into<String>>(connection_id: ConnectionId, reason: S) -> Self {
        Self::CloseFailed {
            connection_id,
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn connection_limit_exceeded(current: usize, max: usize) -> Self {
        Self::ConnectionLimitExceeded {
            current,
            max,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SendFailed { .. } => "send_failed",
            Self::CloseFailed { .. } => "close_failed",
            Self::Transport { .. } => "transport",
            Self::ConnectionLimitExceeded { .. } => "connection_limit",
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
