//! # Server Module
//!
//! The embedding façade: registration API, the transport engine's inbound
//! event surface, and the buffered response builder.

pub mod response;
pub mod service;

pub use response::ResponseBuilder;
pub use service::{Server, ServerLock};
