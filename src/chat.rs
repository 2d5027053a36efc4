use crate::catalog::Librarian;
use crate::model::book::{ChatMessage, ChatRole, ChatTurn};

pub const GREETING: &str = "Good day! I am Eleanor, the head librarian here. \
    How may I assist you in your literary journey today?";

/// A user message waiting for the librarian's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    pub history: Vec<ChatTurn>,
    pub message: String,
}

impl PendingTurn {
    pub async fn run<L: Librarian>(self, librarian: &L) -> String {
        librarian.chat_turn(&self.history, &self.message).await
    }
}

/// Append-only conversation with the librarian persona.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    busy: bool,
    open: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Assistant, GREETING)],
            busy: false,
            open: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Records the user's message and returns the turn to send, or `None`
    /// when the input is blank or a reply is still pending.
    pub fn submit(&mut self, input: &str) -> Option<PendingTurn> {
        if input.trim().is_empty() || self.busy {
            return None;
        }

        let history = self.messages.iter().map(ChatTurn::from).collect();
        self.messages.push(ChatMessage::new(ChatRole::User, input));
        self.busy = true;

        Some(PendingTurn {
            history,
            message: input.to_string(),
        })
    }

    pub fn receive(&mut self, reply: impl Into<String>) {
        self.messages
            .push(ChatMessage::new(ChatRole::Assistant, reply));
        self.busy = false;
    }
}
