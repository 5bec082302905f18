//! # Router Module
//!
//! Ordered pattern registry shared by the HTTP and WebSocket handler tables.
//!
//! ## Overview
//!
//! Both handler registries in portico are structurally identical: an
//! append-only, insertion-ordered sequence of regex-keyed entries that is
//! consulted once per incoming event with first-match-wins semantics. This
//! module provides that shape once, as [`RouteTable<T>`] parameterized by the
//! payload type: boxed HTTP callbacks on one side, WebSocket endpoint
//! callback triples on the other.
//!
//! ## Matching semantics
//!
//! - Patterns are compiled eagerly at registration; a pattern that does not
//!   compile fails the registration with [`PatternError`](crate::error::PatternError).
//! - Both method and path patterns are full-string matches, anchored at both
//!   ends. `"/A"` matches exactly `/A`, not `/AB`.
//! - Method matching is case-insensitive (`"PUT|GET"` matches `put`); path
//!   matching is case-sensitive.
//! - On a path match, capture 0 is the whole matched path and captures `i >= 1`
//!   are the path pattern's groups, each either the matched text or empty.
//!
//! ## Ordering
//!
//! Registration order is significant and preserved; duplicate registrations
//! are kept (sequence semantics, not set semantics) and the earlier entry
//! wins dispatch. There is no removal operation.

mod core;

pub use core::{CaptureVec, RouteEntry, RouteMatch, RouteTable, MAX_INLINE_CAPTURES};
