//! The inbound update context handed to handlers.
//!
//! One [`Context`] is created per inbound update. It exposes the triggering
//! payload (message text or callback data), the raw [`Api`](crate::Api)
//! surface, and a set of convenience operations that address outbound
//! actions at the triggering update.
//!
//! The convenience operations have default implementations in terms of
//! [`api()`](Context::api), so a host only has to supply the accessors.
//! Decorators override them to observe outbound traffic.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::BoxedApi;
use crate::error::{ApiError, ApiResult};
use crate::types::{Callback, CallbackResponse, ChatAction, ChatId, Message, MessageId};

/// The per-update context consumed by the router and its handlers.
///
/// Classification order matters: a context that somehow carries both a
/// callback and a message is treated as a callback update.
#[async_trait]
pub trait Context: Send + Sync {
    /// The inbound message, if this update is a message update.
    fn message(&self) -> Option<&Message>;

    /// The inbound callback query, if this update is a callback update.
    fn callback(&self) -> Option<&Callback>;

    /// The raw outbound action surface.
    fn api(&self) -> BoxedApi;

    /// The message this update was triggered by: the inbound message itself,
    /// or the message the pressed inline button was attached to.
    fn trigger(&self) -> Option<&Message> {
        match self.callback() {
            Some(callback) => callback.message.as_ref(),
            None => self.message(),
        }
    }

    /// The chat the triggering update belongs to.
    fn chat(&self) -> Option<ChatId> {
        self.trigger().map(|m| m.chat)
    }

    /// Sends a new text message to the triggering chat.
    async fn send(&self, text: &str) -> ApiResult<Message> {
        let chat = self.chat().ok_or(ApiError::MissingSession)?;
        self.api().send_message(chat, text).await
    }

    /// Replies to the triggering message.
    async fn reply(&self, text: &str) -> ApiResult<Message> {
        let (chat, message) = self.addressing()?;
        self.api().reply_to(chat, message, text).await
    }

    /// Edits the triggering message in place.
    async fn edit(&self, text: &str) -> ApiResult<Message> {
        let (chat, message) = self.addressing()?;
        self.api().edit_message(chat, message, text).await
    }

    /// Deletes the triggering message.
    async fn delete(&self) -> ApiResult<()> {
        let (chat, message) = self.addressing()?;
        self.api().delete_message(chat, message).await
    }

    /// Answers the triggering callback query.
    async fn respond(&self, response: CallbackResponse) -> ApiResult<()> {
        let callback = self.callback().ok_or(ApiError::MissingSession)?;
        self.api().answer_callback(&callback.id, response).await
    }

    /// Shows a transient status notification in the triggering chat.
    async fn notify(&self, action: ChatAction) -> ApiResult<()> {
        let chat = self.chat().ok_or(ApiError::MissingSession)?;
        self.api().send_chat_action(chat, action).await
    }

    /// Forwards the triggering message to another chat.
    async fn forward_to(&self, to: ChatId) -> ApiResult<Message> {
        let (chat, message) = self.addressing()?;
        self.api().forward_message(to, chat, message).await
    }

    /// Pins the triggering message.
    async fn pin(&self) -> ApiResult<()> {
        let (chat, message) = self.addressing()?;
        self.api().pin_message(chat, message).await
    }

    /// Unpins the triggering message.
    async fn unpin(&self) -> ApiResult<()> {
        let (chat, message) = self.addressing()?;
        self.api().unpin_message(chat, message).await
    }

    /// Chat and message id of the triggering message, for actions that
    /// target it directly.
    #[doc(hidden)]
    fn addressing(&self) -> ApiResult<(ChatId, MessageId)> {
        self.trigger()
            .map(|m| (m.chat, m.id))
            .ok_or(ApiError::MissingSession)
    }
}

/// A shared Context trait object.
pub type BoxedContext = Arc<dyn Context>;
