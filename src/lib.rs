//! # portico
//!
//! **portico** is a routing and connection-lifecycle layer placed in front of
//! a generic HTTP/WebSocket transport engine. Application code registers
//! regex-pattern handlers for HTTP requests and for WebSocket connection
//! events; portico mediates between the engine's low-level callback model
//! and a buffered, handler-oriented API.
//!
//! ## Architecture
//!
//! - **[`router`]** - the shared ordered pattern registry: anchored regex
//!   matching, capture extraction, first-match-wins lookup.
//! - **[`dispatcher`]** - HTTP dispatch: at most one handler per request,
//!   buffered response or engine fallback.
//! - **[`server`]** - the [`Server`] façade (registration, inbound engine
//!   events, the scoped global lock) and the [`ResponseBuilder`].
//! - **[`ws`]** - WebSocket lifecycle types and the live client registry.
//! - **[`transport`]** - the boundary traits the embedding engine
//!   implements: a per-request [`ResponseSink`] and a per-connection
//!   [`FrameSink`].
//!
//! The engine underneath owns the sockets: TCP accept, TLS, HTTP parsing,
//! RFC 6455 framing, and worker threading all happen there. portico only
//! consumes its parsed callbacks and its two outbound write primitives.
//!
//! ## Quick start
//!
//! ```
//! use portico::Server;
//!
//! # fn main() -> Result<(), portico::PatternError> {
//! let mut server = Server::new();
//!
//! // HTTP: first matching entry wins, `false` defers to the engine.
//! server.add_handler("/(index.*)?", |_req, _res| false)?;
//! server.add_handler_for("PUT|GET", "/A", |_req, res| {
//!     res.set_status(200, "OK");
//!     res.append("<html><body><h2>This is the A handler</h2></body></html>\n");
//!     true
//! })?;
//!
//! // WebSocket: connect / data / close callbacks per matched path.
//! server.add_websocket_handler(
//!     "/websocket",
//!     |conn| {
//!         conn.send("Hello from the connect handler");
//!     },
//!     |conn, msg| {
//!         let _ = (conn, msg.opcode(), msg.data());
//!     },
//!     |_conn| {},
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! The engine then drives traffic through [`Server::on_http_request`],
//! [`Server::on_ws_connect`], [`Server::on_ws_ready`],
//! [`Server::on_ws_data`], and [`Server::on_ws_close`].
//!
//! ## Broadcasting from outside a callback
//!
//! [`Server::lock`] scopes the global lock for application code that needs
//! to iterate live connections, e.g. a periodic broadcaster:
//!
//! ```ignore
//! let lk = server.lock();
//! for handle in lk.handles() {
//!     if let Some(conn) = lk.connection(handle) {
//!         conn.send("From server: tick");
//!     }
//! }
//! ```
//!
//! ## Concurrency model
//!
//! The engine invokes callbacks on its own worker threads, in parallel
//! across connections and serialized per connection (`on_connect`, then
//! data frames in arrival order, then exactly one `on_close`). The live
//! client registry is the only runtime-mutated shared structure; connects
//! and closes mutate it under the write side of the global lock, data-path
//! lookups and [`Server::lock`] take the read side. Handler tables must be
//! fully populated before traffic begins.
//!
//! Handlers never report failure by panicking or by `Err`: HTTP handlers
//! communicate through their boolean return and `set_status`, and a send on
//! a dead connection yields [`SendOutcome::Closed`](transport::SendOutcome)
//! rather than an error.

pub mod dispatcher;
pub mod error;
pub mod router;
pub mod server;
pub mod transport;
pub mod ws;

pub use dispatcher::{DispatchOutcome, Dispatcher, Request};
pub use error::PatternError;
pub use server::{ResponseBuilder, Server, ServerLock};
pub use transport::{FrameSink, ResponseSink, SendOutcome};
pub use ws::{ConnHandle, Opcode, WsConn, WsMessage};
