//! Handler and middleware primitives.
//!
//! A [`RouteHandler`] is the unit the router stores and invokes: one async
//! operation over the update [`Context`](ferrite_core::Context). Middleware
//! is a function from one handler to another, which makes wrapping
//! composable: the router collects a node's effective middleware stack at
//! registration time and folds it around the terminal handler with
//! [`chain`], storing the already-composed result.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use ferrite_core::BoxedContext;

use crate::error::RouteResult;

/// The core trait for route handlers.
///
/// Implement it directly for stateful handlers, or wrap an async closure
/// with [`handler_fn`].
#[async_trait]
pub trait RouteHandler: Send + Sync {
    /// Processes one inbound update.
    async fn serve(&self, ctx: BoxedContext) -> RouteResult<()>;
}

/// A type-erased, shareable handler.
pub type BoxedRouteHandler = Arc<dyn RouteHandler>;

/// A middleware transform: wraps a handler and yields a new handler.
///
/// A transform that never invokes its inner handler short-circuits the
/// chain; returning `Ok(())` from the wrapper signals "handled by denial"
/// and the update is considered claimed.
pub type Middleware = Arc<dyn Fn(BoxedRouteHandler) -> BoxedRouteHandler + Send + Sync>;

/// Adapter that lets a plain async closure act as a [`RouteHandler`].
pub struct HandlerFn<F, Fut> {
    f: F,
    _marker: PhantomData<fn() -> Fut>,
}

#[async_trait]
impl<F, Fut> RouteHandler for HandlerFn<F, Fut>
where
    F: Fn(BoxedContext) -> Fut + Send + Sync,
    Fut: Future<Output = RouteResult<()>> + Send,
{
    async fn serve(&self, ctx: BoxedContext) -> RouteResult<()> {
        (self.f)(ctx).await
    }
}

/// Wraps an async closure into a [`BoxedRouteHandler`].
///
/// # Example
///
/// ```rust,ignore
/// let handler = handler_fn(|ctx: BoxedContext| async move {
///     ctx.send("pong").await?;
///     Ok(())
/// });
/// ```
pub fn handler_fn<F, Fut>(f: F) -> BoxedRouteHandler
where
    F: Fn(BoxedContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RouteResult<()>> + Send + 'static,
{
    Arc::new(HandlerFn {
        f,
        _marker: PhantomData,
    })
}

/// Wraps a handler-to-handler closure into a [`Middleware`].
pub fn middleware_fn<F>(f: F) -> Middleware
where
    F: Fn(BoxedRouteHandler) -> BoxedRouteHandler + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Folds `middlewares` around `endpoint`, onion-style.
///
/// The fold runs from the end of the slice backward, so the transform at
/// index 0 ends up outermost: it executes first on the way in and last on
/// the way out. The transform at the last index immediately wraps the
/// endpoint.
pub fn chain(middlewares: &[Middleware], endpoint: BoxedRouteHandler) -> BoxedRouteHandler {
    let mut wrapped = endpoint;
    for mw in middlewares.iter().rev() {
        wrapped = mw(wrapped);
    }
    wrapped
}
