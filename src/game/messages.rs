//! Player-facing message log
//!
//! Every mutating engine call takes a `&mut dyn MessageSink` and reports
//! what happened through it. The presentation layer decides how to show it.

use std::collections::VecDeque;

/// Categories for message filtering/coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Combat,
    Item,
    System,
    Warning,
}

/// A message to display in the game log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMessage {
    pub text: String,
    pub category: MessageCategory,
}

impl GameMessage {
    pub fn new(category: MessageCategory, text: impl Into<String>) -> Self {
        Self { text: text.into(), category }
    }
}

/// Receiver for engine progress messages
pub trait MessageSink {
    fn push(&mut self, message: GameMessage);

    fn combat(&mut self, text: String) {
        self.push(GameMessage::new(MessageCategory::Combat, text));
    }

    fn item(&mut self, text: String) {
        self.push(GameMessage::new(MessageCategory::Item, text));
    }

    fn system(&mut self, text: String) {
        self.push(GameMessage::new(MessageCategory::System, text));
    }

    fn warn(&mut self, text: String) {
        self.push(GameMessage::new(MessageCategory::Warning, text));
    }
}

impl<F> MessageSink for F
where
    F: FnMut(&GameMessage),
{
    fn push(&mut self, message: GameMessage) {
        self(&message);
    }
}

/// Buffered message log the front-end drains between prompts
#[derive(Debug, Clone, Default)]
pub struct Messages {
    queue: VecDeque<GameMessage>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take all pending messages, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = GameMessage> + '_ {
        self.queue.drain(..)
    }

    /// Whether any pending message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.queue.iter().any(|m| m.text.contains(needle))
    }
}

impl MessageSink for Messages {
    fn push(&mut self, message: GameMessage) {
        self.queue.push_back(message);
    }
}

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl MessageSink for Discard {
    fn push(&mut self, _message: GameMessage) {}
}
