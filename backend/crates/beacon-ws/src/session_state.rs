/// Lifecycle of one connection as seen by the transport.
///
/// `Open -> Messaging -> Closed`; `Errored` can be entered from any
/// non-terminal state and still ends in `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Messaging,
    Errored,
    Closed,
}

impl SessionState {
    pub fn on_message(self) -> Self {
        match self {
            Self::Open | Self::Messaging => Self::Messaging,
            other => other,
        }
    }

    pub fn on_error(self) -> Self {
        match self {
            Self::Closed => Self::Closed,
            _ => Self::Errored,
        }
    }

    pub fn on_close(self) -> Self {
        Self::Closed
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Closed
    }

    /// Label for logs and metrics
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Messaging => "messaging",
            Self::Errored => "errored",
            Self::Closed => "closed",
        }
    }
}
