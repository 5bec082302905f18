//! Route table core - hot path for pattern matching.

use regex::{Regex, RegexBuilder};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

use crate::error::PatternError;

/// Maximum number of path captures before heap allocation.
///
/// Capture 0 (the whole path) plus a few groups covers virtually every
/// registered pattern, so the common case stays on the stack.
pub const MAX_INLINE_CAPTURES: usize = 4;

/// Stack-allocated capture storage for the hot path.
///
/// Index 0 is always the whole matched path; indices `i >= 1` hold the path
/// pattern's capture groups, each either the matched text or an empty string
/// for a group that did not participate in the match.
pub type CaptureVec = SmallVec<[String; MAX_INLINE_CAPTURES]>;

/// One registered entry: compiled patterns plus the payload supplied at
/// registration time. Immutable once registered; lifetime = server lifetime.
///
/// Entries are handed out behind `Arc` so that long-lived borrowers (live
/// WebSocket clients) stay valid even if the owning table keeps growing.
pub struct RouteEntry<T> {
    /// Anchored, case-insensitive method matcher. `None` on WebSocket
    /// entries, where the upgrade method is not part of the contract.
    method: Option<Regex>,
    /// Anchored, case-sensitive path matcher.
    path: Regex,
    /// Pattern text as supplied by the caller, for logging.
    method_src: Option<Box<str>>,
    path_src: Box<str>,
    payload: T,
}

impl<T> RouteEntry<T> {
    /// The payload registered with this entry.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// The path pattern text as supplied at registration.
    #[must_use]
    pub fn path_pattern(&self) -> &str {
        &self.path_src
    }

    /// The method pattern text as supplied at registration, if any.
    #[must_use]
    pub fn method_pattern(&self) -> Option<&str> {
        self.method_src.as_deref()
    }
}

/// Result of successfully matching an incoming method/path pair.
pub struct RouteMatch<T> {
    /// The matched entry. Cloning the `Arc` is how connection state keeps a
    /// stable reference to its handler past the dispatch call.
    pub entry: Arc<RouteEntry<T>>,
    /// Path captures; see [`CaptureVec`].
    pub captures: CaptureVec,
}

/// Append-only, insertion-ordered pattern registry.
///
/// Must be fully populated before the transport engine starts delivering
/// traffic; lookups are not serialized against registration (design
/// contract, not enforced by a lock).
pub struct RouteTable<T> {
    entries: Vec<Arc<RouteEntry<T>>>,
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteTable<T> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry, compiling both patterns eagerly.
    ///
    /// A `method_pattern` of `None` matches any method. Fails with
    /// [`PatternError`] if either pattern does not compile; the table is
    /// left unchanged in that case.
    pub fn register(
        &mut self,
        method_pattern: Option<&str>,
        path_pattern: &str,
        payload: T,
    ) -> Result<(), PatternError> {
        let method = method_pattern.map(compile_method).transpose()?;
        let path = compile_path(path_pattern)?;
        self.entries.push(Arc::new(RouteEntry {
            method,
            path,
            method_src: method_pattern.map(Box::from),
            path_src: Box::from(path_pattern),
            payload,
        }));
        Ok(())
    }

    /// Find the first entry, in registration order, whose method and path
    /// patterns both match. At most one entry is ever selected.
    #[must_use]
    pub fn find(&self, method: &str, path: &str) -> Option<RouteMatch<T>> {
        for entry in &self.entries {
            if let Some(m) = &entry.method {
                if !m.is_match(method) {
                    continue;
                }
            }
            if let Some(caps) = entry.path.captures(path) {
                debug!(
                    method,
                    path,
                    pattern = %entry.path_src,
                    "route matched"
                );
                return Some(RouteMatch {
                    entry: Arc::clone(entry),
                    captures: collect_captures(&caps),
                });
            }
        }
        None
    }

    /// Path-only variant of [`find`](Self::find), used by the WebSocket
    /// registry where the upgrade method is not applicable.
    #[must_use]
    pub fn find_path(&self, path: &str) -> Option<RouteMatch<T>> {
        for entry in &self.entries {
            if let Some(caps) = entry.path.captures(path) {
                return Some(RouteMatch {
                    entry: Arc::clone(entry),
                    captures: collect_captures(&caps),
                });
            }
        }
        None
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn collect_captures(caps: &regex::Captures<'_>) -> CaptureVec {
    caps.iter()
        .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string()))
        .collect()
}

/// Compile a method pattern: anchored full-string match, case-insensitive.
fn compile_method(pattern: &str) -> Result<Regex, PatternError> {
    RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(true)
        .build()
        .map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })
}

/// Compile a path pattern: anchored full-string match, case-sensitive.
fn compile_path(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| PatternError {
        pattern: pattern.to_string(),
        source,
    })
}
