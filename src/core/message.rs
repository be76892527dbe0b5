//! # Messages
//!
//! A `Message` is one entry of the transcript. Messages are immutable once
//! created; the typing placeholder is a message too, flagged with
//! `is_placeholder`, and is removed rather than edited when a reply lands.

use chrono::{DateTime, Local};

/// Fixed text shown by the typing placeholder instead of message content.
pub const PLACEHOLDER_TEXT: &str = "typing…";

/// Who a message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
    System,
}

/// Horizontal placement of a bubble inside the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleAlign {
    Left,
    Right,
}

impl Role {
    /// Label drawn in the bubble title.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }

    /// User bubbles hug the right edge, everything else the left.
    pub fn alignment(self) -> BubbleAlign {
        match self {
            Role::User => BubbleAlign::Right,
            Role::Assistant | Role::System => BubbleAlign::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub is_placeholder: bool,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            is_placeholder: false,
            created_at: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    /// The "typing…" stand-in for an in-flight reply. Uses the assistant role
    /// so it picks up the assistant palette.
    pub fn placeholder() -> Self {
        Self {
            role: Role::Assistant,
            text: PLACEHOLDER_TEXT.to_string(),
            is_placeholder: true,
            created_at: Local::now(),
        }
    }

    /// Text to draw for this message. Placeholders always show the fixed literal.
    pub fn display_text(&self) -> &str {
        if self.is_placeholder {
            PLACEHOLDER_TEXT
        } else {
            &self.text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_is_right_aligned_others_left() {
        assert_eq!(Role::User.alignment(), BubbleAlign::Right);
        assert_eq!(Role::Assistant.alignment(), BubbleAlign::Left);
        assert_eq!(Role::System.alignment(), BubbleAlign::Left);
    }

    #[test]
    fn placeholder_uses_assistant_role_and_fixed_text() {
        let msg = Message::placeholder();
        assert!(msg.is_placeholder);
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.display_text(), PLACEHOLDER_TEXT);
    }

    #[test]
    fn regular_message_displays_its_text() {
        let msg = Message::system("Welcome!");
        assert!(!msg.is_placeholder);
        assert_eq!(msg.display_text(), "Welcome!");
    }
}
