//! # Ferrite Core
//!
//! Collaborator abstractions for the ferrite bot router.
//!
//! This crate defines the contract between a bot host and the routing layer:
//!
//! - **Update model**: the minimal inbound types routing needs
//!   ([`Message`], [`Callback`]) plus addressing ids.
//! - **Inbound capability**: the per-update [`Context`] the host constructs
//!   and hands to the router's dispatch entry point.
//! - **Outbound capability**: the [`Api`] action surface handlers use to
//!   emit effects back into the conversation.
//!
//! The transport, polling loop, and wire encoding all live with the host;
//! nothing here performs I/O on its own.

pub mod api;
pub mod context;
pub mod error;
pub mod types;

pub use api::{Api, BoxedApi};
pub use context::{BoxedContext, Context};
pub use error::{ApiError, ApiResult};
pub use types::{Callback, CallbackResponse, ChatAction, ChatId, Message, MessageId};
