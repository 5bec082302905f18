//! # Dispatcher Module
//!
//! HTTP request dispatch: one incoming request, at most one invoked handler.
//!
//! ## Request flow
//!
//! 1. The transport engine delivers `(method, path, query_string)` plus a
//!    per-request [`ResponseSink`](crate::transport::ResponseSink).
//! 2. The dispatcher consults its [`RouteTable`](crate::router::RouteTable)
//!    in registration order and selects the first entry whose method and
//!    path patterns both match.
//! 3. The entry's callback runs with a borrowed [`Request`] view and a fresh
//!    [`ResponseBuilder`](crate::server::ResponseBuilder).
//! 4. `true` finalizes the builder to the sink and reports
//!    [`DispatchOutcome::Handled`]; `false` suppresses the builder and
//!    reports [`DispatchOutcome::NotHandled`] so the engine can fall back to
//!    its own default behavior (typically static file serving).
//!
//! A declined handler never passes control to a later matching entry; this
//! is single-match routing, not a middleware chain. When no entry matches at
//! all, the dispatcher synthesizes a minimal 404 itself and reports
//! `Handled`.

mod core;

pub use core::{DispatchOutcome, Dispatcher, HttpHandler, Request};
