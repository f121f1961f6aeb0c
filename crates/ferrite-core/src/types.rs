//! Minimal update model shared between the router and its host.
//!
//! These types carry just enough structure for routing and for addressing
//! outbound actions at the triggering update. Parsing them off the wire is
//! the host's job.

/// Identifier of a chat (private, group, or channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Identifier of a message within a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub i64);

/// An inbound text message.
///
/// `text` may be empty for media-only updates; the router treats an empty
/// text the same as a missing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub chat: ChatId,
    pub text: String,
}

/// An inbound callback query, produced when a user presses an inline button.
///
/// `data` is the payload the router matches against. `message` is the
/// message the button was attached to, when the platform provides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callback {
    pub id: String,
    pub message: Option<Message>,
    pub data: String,
}

/// The answer shown to the user after a callback query is processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackResponse {
    pub text: String,
    pub show_alert: bool,
}

impl CallbackResponse {
    /// A plain toast-style response with the given text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_alert: false,
        }
    }

    /// An alert-style response that requires dismissal.
    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_alert: true,
        }
    }
}

/// A transient status notification displayed in the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Typing,
    UploadingPhoto,
    UploadingDocument,
    RecordingVideo,
}
