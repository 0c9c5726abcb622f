use std::path::Path;
use std::time::Duration;

use crate::ClientResult;
use crate::chat::{CannedResponder, ChatSession};
use crate::config::Config;

#[derive(Debug, Default)]
pub struct ChatOptions<'a> {
    pub delay_ms: Option<u64>,
    pub home_override: Option<&'a Path>,
}

/// Builds a session with the configured inter-word delay.
pub fn start(options: ChatOptions<'_>) -> ClientResult<ChatSession> {
    let config = Config::load(options.home_override)?;
    let delay_ms = options.delay_ms.unwrap_or(config.chat.word_delay_ms);
    Ok(ChatSession::new(
        CannedResponder::default(),
        Duration::from_millis(delay_ms),
    ))
}
