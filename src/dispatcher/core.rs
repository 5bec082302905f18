//! Dispatcher core - hot path for HTTP request dispatch.

use std::io;
use tracing::{debug, info, warn};

use crate::error::PatternError;
use crate::router::{CaptureVec, RouteTable};
use crate::server::response::{ResponseBuilder, NOT_FOUND_BODY};
use crate::transport::ResponseSink;

/// Application-supplied HTTP request callback.
///
/// Returns `true` when the request was fully handled (the accumulated
/// response is transmitted) and `false` to decline (nothing is sent by this
/// layer and the engine falls back to its own handling).
pub type HttpHandler = Box<dyn Fn(&Request<'_>, &mut ResponseBuilder) -> bool + Send + Sync>;

/// What the dispatcher reports back to the transport engine for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A response was written by this layer (by a handler or the default
    /// 404); the engine must not produce its own.
    Handled,
    /// The selected handler declined; the engine should apply its fallback
    /// (e.g. serve a static file).
    NotHandled,
}

/// Borrowed view of one incoming request, valid only for the duration of a
/// single dispatch call. Never stored past it.
pub struct Request<'a> {
    captures: &'a CaptureVec,
    method: &'a str,
    query: &'a str,
}

impl<'a> Request<'a> {
    /// Path capture by index. Capture 0 is the whole matched path; higher
    /// indices are the path pattern's groups (empty string for a group that
    /// did not participate in the match).
    #[must_use]
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures.get(index).map(String::as_str)
    }

    /// All path captures.
    #[must_use]
    pub fn captures(&self) -> &CaptureVec {
        self.captures
    }

    /// The whole matched path (capture 0).
    #[must_use]
    pub fn path(&self) -> &str {
        self.captures.first().map(String::as_str).unwrap_or("")
    }

    /// The HTTP method string as received from the engine.
    #[must_use]
    pub fn method(&self) -> &str {
        self.method
    }

    /// Everything after `?` in the request URI, excluding the `?` itself.
    /// Empty when the request carried no query.
    #[must_use]
    pub fn query_string(&self) -> &str {
        self.query
    }
}

/// Routes incoming HTTP requests to registered handlers.
pub struct Dispatcher {
    routes: RouteTable<HttpHandler>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a dispatcher with no registered handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: RouteTable::new(),
        }
    }

    /// Register `handler` for any method on paths matching `path_pattern`.
    pub fn register<F>(&mut self, path_pattern: &str, handler: F) -> Result<(), PatternError>
    where
        F: Fn(&Request<'_>, &mut ResponseBuilder) -> bool + Send + Sync + 'static,
    {
        self.register_for_method(".*", path_pattern, handler)
    }

    /// Register `handler` for methods matching `method_pattern` on paths
    /// matching `path_pattern`. Entries are appended; registration order is
    /// dispatch order.
    pub fn register_for_method<F>(
        &mut self,
        method_pattern: &str,
        path_pattern: &str,
        handler: F,
    ) -> Result<(), PatternError>
    where
        F: Fn(&Request<'_>, &mut ResponseBuilder) -> bool + Send + Sync + 'static,
    {
        self.routes
            .register(Some(method_pattern), path_pattern, Box::new(handler))?;
        info!(
            method_pattern,
            path_pattern,
            total_handlers = self.routes.len(),
            "handler registered"
        );
        Ok(())
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.routes.len()
    }

    /// Dispatch one request.
    ///
    /// Invokes at most one handler: the first entry in registration order
    /// whose method and path patterns both match. See [`DispatchOutcome`]
    /// for the contract with the engine. I/O errors from the sink surface to
    /// the engine unchanged.
    pub fn dispatch(
        &self,
        method: &str,
        path: &str,
        query: &str,
        sink: &mut dyn ResponseSink,
    ) -> io::Result<DispatchOutcome> {
        let Some(m) = self.routes.find(method, path) else {
            warn!(method, path, "no handler matched, serving default 404");
            let mut res = ResponseBuilder::new();
            res.set_status(404, "Not found");
            res.append(NOT_FOUND_BODY);
            res.finalize(sink)?;
            return Ok(DispatchOutcome::Handled);
        };

        let request = Request {
            captures: &m.captures,
            method,
            query,
        };
        let mut res = ResponseBuilder::new();
        let handled = (m.entry.payload())(&request, &mut res);

        if handled {
            debug!(method, path, status = res.status(), "request handled");
        } else {
            debug!(method, path, "handler declined, deferring to engine");
            res.suppress();
        }
        // Finalize unconditionally; a suppressed builder writes nothing.
        res.finalize(sink)?;

        Ok(if handled {
            DispatchOutcome::Handled
        } else {
            DispatchOutcome::NotHandled
        })
    }
}
