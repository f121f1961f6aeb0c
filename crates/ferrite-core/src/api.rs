//! The outbound action surface.
//!
//! [`Api`] enumerates every state-mutating bot action the router and its
//! handlers can perform. Concrete implementations translate these calls into
//! platform requests; test doubles record them.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::types::{CallbackResponse, ChatAction, ChatId, Message, MessageId};

/// The full set of outbound bot actions.
///
/// Every method here has an observable effect on the conversation, which is
/// what makes the surface suitable for decorating: a wrapper that intercepts
/// all of these sees every outward effect a handler emits.
#[async_trait]
pub trait Api: Send + Sync {
    /// Sends a new text message to `chat`.
    async fn send_message(&self, chat: ChatId, text: &str) -> ApiResult<Message>;

    /// Sends a text message to `chat` as a reply to `message`.
    async fn reply_to(&self, chat: ChatId, message: MessageId, text: &str) -> ApiResult<Message>;

    /// Edits the text of an existing message.
    async fn edit_message(&self, chat: ChatId, message: MessageId, text: &str)
    -> ApiResult<Message>;

    /// Deletes a message.
    async fn delete_message(&self, chat: ChatId, message: MessageId) -> ApiResult<()>;

    /// Answers a callback query, dismissing the client-side spinner.
    async fn answer_callback(&self, callback_id: &str, response: CallbackResponse)
    -> ApiResult<()>;

    /// Shows a transient status notification in `chat`.
    async fn send_chat_action(&self, chat: ChatId, action: ChatAction) -> ApiResult<()>;

    /// Forwards a message from one chat to another.
    async fn forward_message(
        &self,
        to: ChatId,
        from: ChatId,
        message: MessageId,
    ) -> ApiResult<Message>;

    /// Pins a message in its chat.
    async fn pin_message(&self, chat: ChatId, message: MessageId) -> ApiResult<()>;

    /// Unpins a message in its chat.
    async fn unpin_message(&self, chat: ChatId, message: MessageId) -> ApiResult<()>;
}

/// A shared Api trait object.
pub type BoxedApi = Arc<dyn Api>;
