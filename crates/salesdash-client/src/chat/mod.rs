use std::thread;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

const CANNED_REPLIES: [&str; 10] = [
    "Hey there! Need help? Check out the sales dashboard for this year's numbers.",
    "Hi! What's up? Try `salesdash breakdown --city Tokyo` for a monthly view.",
    "Hello! Need assistance? The dashboard compares every city against last year.",
    "Hey! Got a question? Product categories are one `--by product-category` away.",
    "Hi there! How can I help? Flip to the previous year with `--previous-year-view`.",
    "Hello! Looking for help? `salesdash check <file>` reports rows that need fixes.",
    "Hey! Need assistance? Revenue per city and year lives under `salesdash revenue`.",
    "Hi! Got any data questions? Missing categories show up as unspecified.",
    "Hello! Need help? Add `--json` to any report for machine-readable output.",
    "Hey there! Any questions? Use the contact command to send us a message.",
];

pub type ChatRng = rand::rngs::ThreadRng;

pub fn chat_rng() -> ChatRng {
    rand::thread_rng()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Picks uniformly from a fixed, non-empty reply list.
#[derive(Debug, Clone)]
pub struct CannedResponder {
    replies: Vec<String>,
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self {
            replies: CANNED_REPLIES.iter().map(|value| value.to_string()).collect(),
        }
    }
}

impl CannedResponder {
    /// Returns `None` when `replies` has no non-blank entries.
    pub fn with_replies(replies: Vec<String>) -> Option<Self> {
        let replies = replies
            .into_iter()
            .filter(|reply| !reply.trim().is_empty())
            .collect::<Vec<String>>();
        if replies.is_empty() {
            return None;
        }
        Some(Self { replies })
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.replies
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Yields a reply one `word + " "` token at a time, sleeping `delay` before
/// every token after the first.
#[derive(Debug, Clone)]
pub struct ReplyStream {
    words: Vec<String>,
    next: usize,
    delay: Duration,
}

impl ReplyStream {
    pub fn new(reply: &str, delay: Duration) -> Self {
        Self {
            words: reply.split_whitespace().map(str::to_string).collect(),
            next: 0,
            delay,
        }
    }

    /// Concatenation of every token, without waiting.
    pub fn full_text(&self) -> String {
        self.words.iter().map(|word| format!("{word} ")).collect()
    }
}

impl Iterator for ReplyStream {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let word = self.words.get(self.next)?;
        if self.next > 0 && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.next += 1;
        Some(format!("{word} "))
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    responder: CannedResponder,
    delay: Duration,
    transcript: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new(responder: CannedResponder, delay: Duration) -> Self {
        Self {
            responder,
            delay,
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// Records the user turn and returns the streamed assistant reply. The
    /// assistant turn is recorded with the full reply text. Blank prompts are
    /// ignored.
    pub fn respond<R: Rng + ?Sized>(&mut self, prompt: &str, rng: &mut R) -> Option<ReplyStream> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return None;
        }

        self.transcript.push(ChatTurn {
            role: ChatRole::User,
            content: prompt.to_string(),
        });

        let reply = self.responder.pick(rng).to_string();
        let stream = ReplyStream::new(&reply, self.delay);
        self.transcript.push(ChatTurn {
            role: ChatRole::Assistant,
            content: stream.full_text(),
        });
        Some(stream)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{CannedResponder, ChatRole, ChatSession, ReplyStream};

    #[test]
    fn stream_emits_each_word_with_trailing_space() {
        let tokens = ReplyStream::new("Hi  there!\nHow are you?", Duration::ZERO)
            .collect::<Vec<String>>();
        assert_eq!(tokens, vec!["Hi ", "there! ", "How ", "are ", "you? "]);
    }

    #[test]
    fn responder_rejects_empty_reply_sets() {
        assert!(CannedResponder::with_replies(Vec::new()).is_none());
        assert!(CannedResponder::with_replies(vec!["  ".to_string()]).is_none());
        assert!(CannedResponder::with_replies(vec!["ok".to_string()]).is_some());
    }

    #[test]
    fn picks_only_from_the_fixed_set_and_reaches_several() {
        let responder = CannedResponder::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let reply = responder.pick(&mut rng).to_string();
            assert!(responder.replies().contains(&reply));
            seen.insert(reply);
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn session_records_user_and_assistant_turns() {
        let mut session = ChatSession::new(CannedResponder::default(), Duration::ZERO);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(session.respond("   ", &mut rng).is_none());
        assert!(session.transcript().is_empty());

        let stream = session.respond("What is up?", &mut rng);
        assert!(stream.is_some());
        if let Some(stream) = stream {
            let streamed = stream.collect::<String>();
            let transcript = session.transcript();
            assert_eq!(transcript.len(), 2);
            assert_eq!(transcript[0].role, ChatRole::User);
            assert_eq!(transcript[0].content, "What is up?");
            assert_eq!(transcript[1].role, ChatRole::Assistant);
            assert_eq!(transcript[1].content, streamed);
        }
    }
}
