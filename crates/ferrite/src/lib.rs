//! # Ferrite
//!
//! A middleware-composing context router for conversational bots.
//!
//! Ferrite maps an inbound update (a text message or a callback payload)
//! to a registered handler, applying a composable middleware chain and
//! falling back to a configurable not-found handler when nothing matches.
//! The transport, polling loop, and wire encoding stay with the host: the
//! host constructs one [`Context`](ferrite_core::Context) per update and
//! calls the root router's dispatch entry point.
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────────────────┐
//! │ Update source│────▶│ Root router │────▶│ exact / pattern handlers │
//! │ (host loop)  │     │  dispatch   │────▶│ (pre-composed middleware)│
//! └──────────────┘     └─────────────┘     └──────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ferrite::prelude::*;
//! use regex::Regex;
//!
//! let router = Router::new();
//!
//! router.handle_fn_text("/start", |ctx| async move {
//!     ctx.send("hi").await?;
//!     Ok(())
//! });
//!
//! router.handle_fn_pattern_callback(Regex::new(r"^page:\d+$")?, paginate);
//!
//! // in the host's update loop:
//! // router.dispatch(ctx).await?;
//! ```

pub use ferrite_core as core;
pub use ferrite_router as router;

/// Prelude module for convenient imports.
pub mod prelude {
    // Router surface - registration and dispatch
    pub use ferrite_router::{
        BoxedRouteHandler, Middleware, RouteError, RouteKind, RouteResult, Router, Tracked,
        handler_fn, middleware_fn,
    };

    // Host-facing contract - context, action surface, update model
    pub use ferrite_core::{
        Api, ApiError, ApiResult, BoxedApi, BoxedContext, Callback, CallbackResponse, ChatAction,
        ChatId, Context, Message, MessageId,
    };
}
