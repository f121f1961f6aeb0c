//! The router tree: registration, grouping, and dispatch.
//!
//! A [`Router`] is a cheap-clone handle over one node of a hierarchical
//! router tree. Each node owns two exact-match tables and two ordered
//! pattern lists (one pair for message text, one for callback data), its own
//! middleware transforms, and an optional not-found handler. Child nodes
//! created with [`with`](Router::with) or [`group`](Router::group) keep a
//! navigation-only upward link to their parent.
//!
//! Registration composes the node's *effective* middleware stack (ancestor
//! chain, root first, computed fresh on every call) around the supplied
//! handler and stores the already-composed result, both in this node's table
//! and, when a parent exists, in the parent's table as well. A sub-router is
//! usually discarded once its setup closure returns; without that copy the
//! parent, which is the node actually wired to the update source, would
//! never see the sub-router's routes.
//!
//! Dispatch consults only the invoked node's own tables: exact match first
//! (short-circuit), then every matching pattern in registration order, then
//! the nearest not-found handler up the ancestor chain.
//!
//! # Phase separation
//!
//! Registration is expected to finish before the first dispatch. The
//! internal locks make the tree safe to share across tasks, but routes
//! registered concurrently with dispatch may or may not be visible to
//! in-flight updates.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use regex::Regex;
use tracing::{debug, instrument, trace};

use ferrite_core::BoxedContext;

use crate::error::{RouteError, RouteResult};
use crate::handler::{BoxedRouteHandler, Middleware, chain, handler_fn};
use crate::tracked::Tracked;

/// Which kind of inbound payload a route matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Message text.
    Text,
    /// Callback data.
    Callback,
}

/// A compiled pattern and its composed handler. Created at registration,
/// never mutated afterwards.
#[derive(Clone)]
struct PatternRoute {
    pattern: Regex,
    handler: BoxedRouteHandler,
}

/// One node of the router tree.
struct RouterNode {
    /// Navigation-only link to the enclosing node; dangling once the parent
    /// is dropped, which ends the ancestor walk early.
    parent: Weak<RwLock<RouterNode>>,
    /// Transforms contributed at this node only; inherited stacks are
    /// computed on demand, never stored.
    middlewares: Vec<Middleware>,
    exact_text: HashMap<String, BoxedRouteHandler>,
    exact_callback: HashMap<String, BoxedRouteHandler>,
    pattern_text: Vec<PatternRoute>,
    pattern_callback: Vec<PatternRoute>,
    not_found: Option<BoxedRouteHandler>,
}

impl RouterNode {
    fn empty(parent: Weak<RwLock<RouterNode>>) -> Self {
        Self {
            parent,
            middlewares: Vec::new(),
            exact_text: HashMap::new(),
            exact_callback: HashMap::new(),
            pattern_text: Vec::new(),
            pattern_callback: Vec::new(),
            not_found: None,
        }
    }

    fn exact(&self, kind: RouteKind) -> &HashMap<String, BoxedRouteHandler> {
        match kind {
            RouteKind::Text => &self.exact_text,
            RouteKind::Callback => &self.exact_callback,
        }
    }

    fn exact_mut(&mut self, kind: RouteKind) -> &mut HashMap<String, BoxedRouteHandler> {
        match kind {
            RouteKind::Text => &mut self.exact_text,
            RouteKind::Callback => &mut self.exact_callback,
        }
    }

    fn patterns(&self, kind: RouteKind) -> &Vec<PatternRoute> {
        match kind {
            RouteKind::Text => &self.pattern_text,
            RouteKind::Callback => &self.pattern_callback,
        }
    }

    fn patterns_mut(&mut self, kind: RouteKind) -> &mut Vec<PatternRoute> {
        match kind {
            RouteKind::Text => &mut self.pattern_text,
            RouteKind::Callback => &mut self.pattern_callback,
        }
    }
}

/// A handle to one node of the router tree.
///
/// Cloning is cheap and both clones address the same node. See the module
/// docs for the registration/dispatch contract.
#[derive(Clone)]
pub struct Router {
    inner: Arc<RwLock<RouterNode>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Creates a new root router with empty tables.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RouterNode::empty(Weak::new()))),
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Appends a middleware transform to this node's own stack.
    ///
    /// Only registrations made *after* this call pick the transform up;
    /// handlers are composed at registration time and never re-wrapped.
    pub fn use_middleware(&self, middleware: Middleware) {
        self.inner.write().middlewares.push(middleware);
    }

    /// Creates a sub-router with the given inline middleware.
    ///
    /// The child starts with empty tables, links back to this node, and
    /// snapshots this node's currently configured not-found handler.
    pub fn with(&self, middlewares: impl IntoIterator<Item = Middleware>) -> Router {
        let mut node = RouterNode::empty(Arc::downgrade(&self.inner));
        node.middlewares = middlewares.into_iter().collect();
        node.not_found = self.inner.read().not_found.clone();
        Router {
            inner: Arc::new(RwLock::new(node)),
        }
    }

    /// Creates a sub-router and passes it to `f` for scoped registration.
    ///
    /// ```rust,ignore
    /// router.group(|admin| {
    ///     admin.use_middleware(require_admin());
    ///     admin.handle_fn_text("/ban", ban_handler);
    /// });
    /// ```
    pub fn group(&self, f: impl FnOnce(&Router)) -> Router {
        let child = self.with(std::iter::empty());
        f(&child);
        child
    }

    /// Registers a handler for an exact match of `input`.
    ///
    /// The effective middleware stack is composed around `handler` here and
    /// now; re-registering the same key overwrites the previous handler.
    pub fn handle(&self, input: impl Into<String>, handler: BoxedRouteHandler, kind: RouteKind) {
        let composed = chain(&self.collect_middlewares(), handler);
        let key = input.into();

        let parent = {
            let mut node = self.inner.write();
            node.exact_mut(kind).insert(key.clone(), composed.clone());
            node.parent.upgrade()
        };
        if let Some(parent) = parent {
            parent.write().exact_mut(kind).insert(key, composed);
        }
    }

    /// Registers a handler for every input matching `pattern`.
    ///
    /// Pattern routes are evaluated in registration order and several may
    /// match one update.
    pub fn handle_pattern(&self, pattern: Regex, handler: BoxedRouteHandler, kind: RouteKind) {
        let composed = chain(&self.collect_middlewares(), handler);
        let entry = PatternRoute {
            pattern,
            handler: composed,
        };

        let parent = {
            let mut node = self.inner.write();
            node.patterns_mut(kind).push(entry.clone());
            node.parent.upgrade()
        };
        if let Some(parent) = parent {
            parent.write().patterns_mut(kind).push(entry);
        }
    }

    /// Registers an exact text-message route.
    pub fn handle_text(&self, input: impl Into<String>, handler: BoxedRouteHandler) {
        self.handle(input, handler, RouteKind::Text);
    }

    /// Registers an exact callback-data route.
    pub fn handle_callback(&self, input: impl Into<String>, handler: BoxedRouteHandler) {
        self.handle(input, handler, RouteKind::Callback);
    }

    /// Registers a pattern text-message route.
    pub fn handle_pattern_text(&self, pattern: Regex, handler: BoxedRouteHandler) {
        self.handle_pattern(pattern, handler, RouteKind::Text);
    }

    /// Registers a pattern callback-data route.
    pub fn handle_pattern_callback(&self, pattern: Regex, handler: BoxedRouteHandler) {
        self.handle_pattern(pattern, handler, RouteKind::Callback);
    }

    /// Registers an async closure as an exact text-message route.
    pub fn handle_fn_text<F, Fut>(&self, input: impl Into<String>, f: F)
    where
        F: Fn(BoxedContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RouteResult<()>> + Send + 'static,
    {
        self.handle_text(input, handler_fn(f));
    }

    /// Registers an async closure as an exact callback-data route.
    pub fn handle_fn_callback<F, Fut>(&self, input: impl Into<String>, f: F)
    where
        F: Fn(BoxedContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RouteResult<()>> + Send + 'static,
    {
        self.handle_callback(input, handler_fn(f));
    }

    /// Registers an async closure as a pattern text-message route.
    pub fn handle_fn_pattern_text<F, Fut>(&self, pattern: Regex, f: F)
    where
        F: Fn(BoxedContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RouteResult<()>> + Send + 'static,
    {
        self.handle_pattern_text(pattern, handler_fn(f));
    }

    /// Registers an async closure as a pattern callback-data route.
    pub fn handle_fn_pattern_callback<F, Fut>(&self, pattern: Regex, f: F)
    where
        F: Fn(BoxedContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RouteResult<()>> + Send + 'static,
    {
        self.handle_pattern_callback(pattern, handler_fn(f));
    }

    /// Sets the fallback handler invoked when no route matches.
    pub fn not_found(&self, handler: BoxedRouteHandler) {
        self.inner.write().not_found = Some(handler);
    }

    /// Sets an async closure as the fallback handler.
    pub fn not_found_fn<F, Fut>(&self, f: F)
    where
        F: Fn(BoxedContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RouteResult<()>> + Send + 'static,
    {
        self.not_found(handler_fn(f));
    }

    /// Collects the effective middleware stack for this node: every
    /// ancestor's own transforms, root first, this node's last.
    fn collect_middlewares(&self) -> Vec<Middleware> {
        let mut stack: Vec<Middleware> = Vec::new();
        let mut current = Some(Arc::clone(&self.inner));
        while let Some(node) = current {
            let guard = node.read();
            let mut combined = guard.middlewares.clone();
            combined.extend(stack);
            stack = combined;
            current = guard.parent.upgrade();
        }
        stack
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Routes one inbound update to its handler(s).
    ///
    /// Classification checks callback data first, then non-empty message
    /// text. An exact match invokes exactly one handler and never consults
    /// the pattern list. Otherwise every matching pattern handler runs in
    /// registration order; the first failure aborts the sweep and propagates.
    /// If nothing matched, the nearest configured not-found handler up the
    /// ancestor chain runs, or the [`RouteError::NotFound`] sentinel is
    /// returned.
    #[instrument(name = "dispatch", level = "debug", skip_all)]
    pub async fn dispatch(&self, ctx: BoxedContext) -> RouteResult<()> {
        let classified = if let Some(callback) = ctx.callback() {
            Some((RouteKind::Callback, callback.data.clone()))
        } else {
            ctx.message()
                .filter(|m| !m.text.is_empty())
                .map(|m| (RouteKind::Text, m.text.clone()))
        };

        let Some((kind, input)) = classified else {
            trace!("update carries neither callback data nor message text");
            return self.not_found_handler().serve(ctx).await;
        };

        // Handlers are cloned out so no lock guard lives across an await.
        let exact = self.inner.read().exact(kind).get(&input).cloned();
        if let Some(handler) = exact {
            debug!(?kind, %input, "exact route matched");
            return handler.serve(ctx).await;
        }

        let matched: Vec<BoxedRouteHandler> = {
            let node = self.inner.read();
            node.patterns(kind)
                .iter()
                .filter(|route| route.pattern.is_match(&input))
                .map(|route| route.handler.clone())
                .collect()
        };

        if matched.is_empty() {
            debug!(?kind, %input, "no route matched, resolving fallback");
            return self.not_found_handler().serve(ctx).await;
        }

        debug!(?kind, %input, routes = matched.len(), "pattern routes matched");
        for handler in matched {
            handler.serve(Arc::clone(&ctx)).await?;
        }
        Ok(())
    }

    /// Like [`dispatch`](Router::dispatch), but wraps the context in a
    /// [`Tracked`] decorator and reports whether any handler emitted an
    /// outward effect for this update.
    pub async fn dispatch_tracked(&self, ctx: BoxedContext) -> RouteResult<bool> {
        let tracked = Arc::new(Tracked::new(ctx));
        let decorated: BoxedContext = tracked.clone();
        self.dispatch(decorated).await?;
        Ok(tracked.was_handled())
    }

    /// Resolves the not-found handler for this node: the nearest explicitly
    /// configured fallback walking up the ancestor chain, or a default
    /// handler that performs no action and returns [`RouteError::NotFound`].
    pub fn not_found_handler(&self) -> BoxedRouteHandler {
        let mut current = Some(Arc::clone(&self.inner));
        while let Some(node) = current {
            let guard = node.read();
            if let Some(handler) = &guard.not_found {
                return Arc::clone(handler);
            }
            current = guard.parent.upgrade();
        }
        handler_fn(|_ctx| async { Err(RouteError::NotFound) })
    }
}
