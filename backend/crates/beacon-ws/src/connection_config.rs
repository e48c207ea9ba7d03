/// Per-connection session settings
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outbound buffer size per connection (bounded to handle backpressure)
    pub send_buffer_size: usize,
    /// Fixed reply sent for every inbound text message
    pub reply_text: String,
    /// Whether a transport error also unregisters the connection
    pub remove_on_error: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 100,
            reply_text: String::from("Hello."),
            remove_on_error: true,
        }
    }
}
