//! # Ferrite Router
//!
//! The routing and dispatch engine for inbound bot updates.
//!
//! An application builds a tree of [`Router`] nodes at startup, registers
//! exact and pattern routes for message text and callback data, and wires
//! the root router's [`dispatch`](Router::dispatch) into its update source.
//! Middleware is a plain handler-to-handler function; each registration
//! composes the node's inherited middleware stack around the handler once
//! and stores the result, so dispatch is a table lookup plus an ordered
//! pattern sweep.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ferrite_router::{Router, middleware_fn};
//! use regex::Regex;
//!
//! let router = Router::new();
//! router.use_middleware(request_logging());
//!
//! router.handle_fn_text("/start", |ctx| async move {
//!     ctx.send("welcome").await?;
//!     Ok(())
//! });
//!
//! router.group(|admin| {
//!     admin.use_middleware(require_admin());
//!     admin.handle_fn_pattern_callback(
//!         Regex::new(r"^admin:").unwrap(),
//!         admin_panel,
//!     );
//! });
//!
//! router.not_found_fn(|ctx| async move {
//!     ctx.send("unknown command").await?;
//!     Ok(())
//! });
//!
//! // Per inbound update, from the host's update loop:
//! // router.dispatch(ctx).await?;
//! ```

pub mod error;
pub mod handler;
pub mod router;
pub mod tracked;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{RouteError, RouteResult};
pub use handler::{
    BoxedRouteHandler, HandlerFn, Middleware, RouteHandler, chain, handler_fn, middleware_fn,
};
pub use router::{RouteKind, Router};
pub use tracked::{Tracked, TrackedApi};
