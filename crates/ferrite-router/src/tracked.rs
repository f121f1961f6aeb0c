//! Decorators that record whether an update was answered.
//!
//! [`Tracked`] wraps an update [`Context`] and [`TrackedApi`] wraps its raw
//! [`Api`] surface. Both intercept every state-mutating action and flip a
//! shared flag before delegating to the real implementation, yielding one
//! observable boolean per update: "did any handler emit an outward effect".
//!
//! The pair is created per dispatch and never shared across updates. The
//! router itself does not consult the flag; callers opt in through
//! [`Router::dispatch_tracked`](crate::Router::dispatch_tracked) or by
//! wrapping a context themselves.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use ferrite_core::{
    Api, ApiResult, BoxedApi, BoxedContext, Callback, CallbackResponse, ChatAction, ChatId,
    Context, Message, MessageId,
};

/// A context decorator that marks the update as handled on any outbound
/// action.
pub struct Tracked {
    inner: BoxedContext,
    handled: Arc<AtomicBool>,
}

impl Tracked {
    /// Wraps `inner` with a fresh, unset handled flag.
    pub fn new(inner: BoxedContext) -> Self {
        Self {
            inner,
            handled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns `true` once any outbound action has been invoked through this
    /// decorator or through the [`Api`] surface it hands out.
    pub fn was_handled(&self) -> bool {
        self.handled.load(Ordering::SeqCst)
    }

    fn mark_handled(&self) {
        self.handled.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Context for Tracked {
    fn message(&self) -> Option<&Message> {
        self.inner.message()
    }

    fn callback(&self) -> Option<&Callback> {
        self.inner.callback()
    }

    fn api(&self) -> BoxedApi {
        Arc::new(TrackedApi {
            inner: self.inner.api(),
            handled: Arc::clone(&self.handled),
        })
    }

    async fn send(&self, text: &str) -> ApiResult<Message> {
        self.mark_handled();
        self.inner.send(text).await
    }

    async fn reply(&self, text: &str) -> ApiResult<Message> {
        self.mark_handled();
        self.inner.reply(text).await
    }

    async fn edit(&self, text: &str) -> ApiResult<Message> {
        self.mark_handled();
        self.inner.edit(text).await
    }

    async fn delete(&self) -> ApiResult<()> {
        self.mark_handled();
        self.inner.delete().await
    }

    async fn respond(&self, response: CallbackResponse) -> ApiResult<()> {
        self.mark_handled();
        self.inner.respond(response).await
    }

    async fn notify(&self, action: ChatAction) -> ApiResult<()> {
        self.mark_handled();
        self.inner.notify(action).await
    }

    async fn forward_to(&self, to: ChatId) -> ApiResult<Message> {
        self.mark_handled();
        self.inner.forward_to(to).await
    }

    async fn pin(&self) -> ApiResult<()> {
        self.mark_handled();
        self.inner.pin().await
    }

    async fn unpin(&self) -> ApiResult<()> {
        self.mark_handled();
        self.inner.unpin().await
    }
}

/// The raw-surface half of the decorator pair.
///
/// Handed out by [`Tracked::api`] so that handlers going through the raw
/// [`Api`] rather than the context conveniences are observed too.
pub struct TrackedApi {
    inner: BoxedApi,
    handled: Arc<AtomicBool>,
}

impl TrackedApi {
    fn mark_handled(&self) {
        self.handled.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Api for TrackedApi {
    async fn send_message(&self, chat: ChatId, text: &str) -> ApiResult<Message> {
        self.mark_handled();
        self.inner.send_message(chat, text).await
    }

    async fn reply_to(&self, chat: ChatId, message: MessageId, text: &str) -> ApiResult<Message> {
        self.mark_handled();
        self.inner.reply_to(chat, message, text).await
    }

    async fn edit_message(
        &self,
        chat: ChatId,
        message: MessageId,
        text: &str,
    ) -> ApiResult<Message> {
        self.mark_handled();
        self.inner.edit_message(chat, message, text).await
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> ApiResult<()> {
        self.mark_handled();
        self.inner.delete_message(chat, message).await
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        response: CallbackResponse,
    ) -> ApiResult<()> {
        self.mark_handled();
        self.inner.answer_callback(callback_id, response).await
    }

    async fn send_chat_action(&self, chat: ChatId, action: ChatAction) -> ApiResult<()> {
        self.mark_handled();
        self.inner.send_chat_action(chat, action).await
    }

    async fn forward_message(
        &self,
        to: ChatId,
        from: ChatId,
        message: MessageId,
    ) -> ApiResult<Message> {
        self.mark_handled();
        self.inner.forward_message(to, from, message).await
    }

    async fn pin_message(&self, chat: ChatId, message: MessageId) -> ApiResult<()> {
        self.mark_handled();
        self.inner.pin_message(chat, message).await
    }

    async fn unpin_message(&self, chat: ChatId, message: MessageId) -> ApiResult<()> {
        self.mark_handled();
        self.inner.unpin_message(chat, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockContext;

    #[tokio::test]
    async fn flag_starts_unset() {
        let tracked = Tracked::new(MockContext::with_text("/ping"));
        assert!(!tracked.was_handled());
    }

    #[tokio::test]
    async fn inbound_accessors_do_not_set_the_flag() {
        let tracked = Tracked::new(MockContext::with_callback("action:edit"));
        assert!(tracked.callback().is_some());
        assert!(tracked.chat().is_some());
        assert!(!tracked.was_handled());
    }

    #[tokio::test]
    async fn send_sets_the_flag() {
        let ctx = MockContext::with_text("/ping");
        let tracked = Tracked::new(ctx.clone());

        tracked.send("pong").await.unwrap();

        assert!(tracked.was_handled());
        assert_eq!(ctx.sent(), vec!["pong"]);
    }

    #[tokio::test]
    async fn respond_sets_the_flag() {
        let tracked = Tracked::new(MockContext::with_callback("action:edit"));
        tracked.respond(CallbackResponse::text("done")).await.unwrap();
        assert!(tracked.was_handled());
    }

    #[tokio::test]
    async fn pin_sets_the_flag() {
        let tracked = Tracked::new(MockContext::with_text("/pin-me"));
        tracked.pin().await.unwrap();
        assert!(tracked.was_handled());
    }

    #[tokio::test]
    async fn raw_api_surface_sets_the_flag() {
        let ctx = MockContext::with_text("/ping");
        let tracked = Tracked::new(ctx.clone());

        let api = tracked.api();
        api.send_message(ChatId(7), "direct").await.unwrap();

        assert!(tracked.was_handled());
        assert_eq!(ctx.sent(), vec!["direct"]);
    }

    #[tokio::test]
    async fn failed_action_still_sets_the_flag() {
        let ctx = MockContext::with_text("/ping");
        ctx.api.fail_next();
        let tracked = Tracked::new(ctx);

        assert!(tracked.send("pong").await.is_err());
        assert!(tracked.was_handled());
    }
}
