//! Scripted Conversation
//!
//! The fixed, ordered conversation the animator replays every cycle.
//! A script is validated once at construction and is immutable afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a [`Script`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    /// The script contains no messages
    #[error("script must contain at least one message")]
    Empty,

    /// A message has no visible text
    #[error("scripted message {index} has empty text")]
    EmptyText {
        /// Position of the offending message
        index: usize,
    },
}

/// Who is speaking in a scripted turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The chatbot (left-aligned, "B" avatar)
    Bot,
    /// The customer (right-aligned, "C" avatar)
    User,
}

impl Speaker {
    /// Single-letter avatar label shown next to bubbles
    #[must_use]
    pub fn avatar(self) -> &'static str {
        match self {
            Self::Bot => "B",
            Self::User => "C",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bot => write!(f, "bot"),
            Self::User => write!(f, "user"),
        }
    }
}

/// One line of the scripted conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedMessage {
    /// Who says it
    pub speaker: Speaker,
    /// What is said (never empty)
    pub text: String,
}

impl ScriptedMessage {
    /// Create a bot line
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }

    /// Create a user line
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    /// Length used for typing duration (Unicode scalar values)
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Ordered, non-empty sequence of scripted messages
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Script {
    messages: Vec<ScriptedMessage>,
}

impl Script {
    /// Build a script, rejecting empty scripts and blank lines
    pub fn new(messages: Vec<ScriptedMessage>) -> Result<Self, ScriptError> {
        if messages.is_empty() {
            return Err(ScriptError::Empty);
        }

        if let Some(index) = messages.iter().position(|m| m.text.trim().is_empty()) {
            return Err(ScriptError::EmptyText { index });
        }

        Ok(Self { messages })
    }

    /// The hero-section conversation: bot greets, user asks, bot follows up
    #[must_use]
    pub fn botmatata() -> Self {
        Self {
            messages: vec![
                ScriptedMessage::bot("Hi! How can I assist you today?"),
                ScriptedMessage::user("I need help with my order"),
                ScriptedMessage::bot("What kind of help do you need with your order?"),
            ],
        }
    }

    /// Number of messages (always at least 1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the script has no messages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Message at `index`, if any
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ScriptedMessage> {
        self.messages.get(index)
    }

    /// All messages in order
    #[must_use]
    pub fn messages(&self) -> &[ScriptedMessage] {
        &self.messages
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::botmatata()
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let messages = Vec::<ScriptedMessage>::deserialize(deserializer)?;
        Self::new(messages).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_botmatata_script_shape() {
        let script = Script::botmatata();
        let speakers: Vec<Speaker> = script.messages().iter().map(|m| m.speaker).collect();
        assert_eq!(speakers, vec![Speaker::Bot, Speaker::User, Speaker::Bot]);
        assert_eq!(script.len(), 3);
    }

    #[test]
    fn test_empty_script_rejected() {
        assert_eq!(Script::new(Vec::new()), Err(ScriptError::Empty));
    }

    #[test]
    fn test_blank_text_rejected() {
        let result = Script::new(vec![
            ScriptedMessage::bot("hello"),
            ScriptedMessage::user("   "),
        ]);
        assert_eq!(result, Err(ScriptError::EmptyText { index: 1 }));
    }

    #[test]
    fn test_single_message_script_allowed() {
        let script = Script::new(vec![ScriptedMessage::bot("ping")]).unwrap();
        assert_eq!(script.len(), 1);
        assert!(!script.is_empty());
    }

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(ScriptedMessage::user("¡hola!").char_len(), 6);
    }

    #[test]
    fn test_deserialize_validates() {
        let err = serde_json::from_str::<Script>("[]").unwrap_err();
        assert!(err.to_string().contains("at least one message"));

        let script: Script =
            serde_json::from_str(r#"[{"speaker":"user","text":"hi"}]"#).unwrap();
        assert_eq!(script.get(0), Some(&ScriptedMessage::user("hi")));
    }
}
