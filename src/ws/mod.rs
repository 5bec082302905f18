//! # WebSocket Module
//!
//! Connection lifecycle types and the live client registry.
//!
//! ## Lifecycle
//!
//! Per connection the transport engine guarantees, in order and never
//! interleaved with itself:
//!
//! ```text
//! connect (upgrade matched) -> ready (on_connect ran once) -> data* -> close
//! ```
//!
//! The connect event matches the upgrade path against the registered
//! WebSocket endpoints (first match wins) and inserts a client into the
//! registry under the global lock; close removes it again after `on_close`
//! has run. Between the two, every data frame looks the client up by its
//! [`ConnHandle`].
//!
//! ## The global lock
//!
//! The client registry is the only shared structure mutated at runtime.
//! Connect and close take the write side; data-path lookups and the
//! application-facing [`RegistryGuard`] take the read side. User callbacks
//! always run with the lock released, so a data handler may itself acquire
//! the guard to broadcast, exactly like an external periodic broadcaster.

mod core;
mod registry;

pub use core::{
    CloseHandler, ConnHandle, ConnectHandler, DataHandler, Opcode, WsConn, WsEndpoint, WsMessage,
};
pub use registry::{ClientRegistry, RegistryGuard};
