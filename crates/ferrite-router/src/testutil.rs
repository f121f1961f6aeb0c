//! Shared test doubles: a recording api and a mock update context.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use ferrite_core::{
    Api, ApiError, ApiResult, BoxedApi, Callback, CallbackResponse, ChatAction, ChatId, Context,
    Message, MessageId,
};

/// An [`Api`] double that records sent texts and can be told to fail.
#[derive(Default)]
pub struct RecordingApi {
    pub sent: Mutex<Vec<String>>,
    fail_next: AtomicBool,
}

impl RecordingApi {
    /// Makes the next action return `ApiError::NotConnected`.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> ApiResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            Err(ApiError::NotConnected)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Api for RecordingApi {
    async fn send_message(&self, chat: ChatId, text: &str) -> ApiResult<Message> {
        self.check()?;
        self.sent.lock().push(text.to_string());
        Ok(Message {
            id: MessageId(1),
            chat,
            text: text.to_string(),
        })
    }

    async fn reply_to(&self, chat: ChatId, _message: MessageId, text: &str) -> ApiResult<Message> {
        self.send_message(chat, text).await
    }

    async fn edit_message(
        &self,
        chat: ChatId,
        _message: MessageId,
        text: &str,
    ) -> ApiResult<Message> {
        self.send_message(chat, text).await
    }

    async fn delete_message(&self, _chat: ChatId, _message: MessageId) -> ApiResult<()> {
        self.check()
    }

    async fn answer_callback(
        &self,
        _callback_id: &str,
        response: CallbackResponse,
    ) -> ApiResult<()> {
        self.check()?;
        self.sent.lock().push(response.text);
        Ok(())
    }

    async fn send_chat_action(&self, _chat: ChatId, _action: ChatAction) -> ApiResult<()> {
        self.check()
    }

    async fn forward_message(
        &self,
        to: ChatId,
        _from: ChatId,
        message: MessageId,
    ) -> ApiResult<Message> {
        self.check()?;
        Ok(Message {
            id: message,
            chat: to,
            text: String::new(),
        })
    }

    async fn pin_message(&self, _chat: ChatId, _message: MessageId) -> ApiResult<()> {
        self.check()
    }

    async fn unpin_message(&self, _chat: ChatId, _message: MessageId) -> ApiResult<()> {
        self.check()
    }
}

/// A [`Context`] double backed by a [`RecordingApi`].
pub struct MockContext {
    pub message: Option<Message>,
    pub callback: Option<Callback>,
    pub api: Arc<RecordingApi>,
}

impl MockContext {
    /// A message update with the given text.
    pub fn with_text(text: &str) -> Arc<Self> {
        Arc::new(Self {
            message: Some(sample_message(text)),
            callback: None,
            api: Arc::new(RecordingApi::default()),
        })
    }

    /// A callback update with the given payload.
    pub fn with_callback(data: &str) -> Arc<Self> {
        Arc::new(Self {
            message: None,
            callback: Some(Callback {
                id: "cb-1".to_string(),
                message: Some(sample_message("")),
                data: data.to_string(),
            }),
            api: Arc::new(RecordingApi::default()),
        })
    }

    /// An update that carries both kinds of payload.
    pub fn with_both(text: &str, data: &str) -> Arc<Self> {
        Arc::new(Self {
            message: Some(sample_message(text)),
            callback: Some(Callback {
                id: "cb-1".to_string(),
                message: Some(sample_message("")),
                data: data.to_string(),
            }),
            api: Arc::new(RecordingApi::default()),
        })
    }

    /// An update with neither callback data nor message text.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            message: None,
            callback: None,
            api: Arc::new(RecordingApi::default()),
        })
    }

    /// All texts sent through the api so far.
    pub fn sent(&self) -> Vec<String> {
        self.api.sent.lock().clone()
    }
}

fn sample_message(text: &str) -> Message {
    Message {
        id: MessageId(10),
        chat: ChatId(7),
        text: text.to_string(),
    }
}

#[async_trait]
impl Context for MockContext {
    fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    fn callback(&self) -> Option<&Callback> {
        self.callback.as_ref()
    }

    fn api(&self) -> BoxedApi {
        self.api.clone()
    }
}
