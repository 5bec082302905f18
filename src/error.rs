//! Error types for portico.
//!
//! Only registration can fail with an `Err`: a method or path pattern that
//! does not compile aborts that registration synchronously. Runtime dispatch
//! outcomes that merely look like failures are ordinary values instead: a
//! routing miss yields the default 404, a declined handler yields
//! [`DispatchOutcome::NotHandled`](crate::dispatcher::DispatchOutcome), and a
//! send to a closed connection yields
//! [`SendOutcome::Closed`](crate::transport::SendOutcome).

use thiserror::Error;

/// A method or path pattern failed to compile at registration time.
///
/// Registration is the startup phase; callers should treat this as fatal to
/// server construction rather than retrying with the same pattern.
#[derive(Debug, Error)]
#[error("invalid pattern `{pattern}`: {source}")]
pub struct PatternError {
    /// The pattern text as supplied by the caller (before anchoring).
    pub pattern: String,
    /// The underlying regex compilation failure.
    #[source]
    pub source: regex::Error,
}
