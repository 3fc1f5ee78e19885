//! Errors reported by lookups on a [`LazyTree`][crate::LazyTree].

use thiserror::Error;

/// Returned when a lookup has no qualifying element to report. For the soft-aware lookups this
/// includes values that are only present as tombstones.
#[derive(Error, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[error("no such element")]
pub struct NotFound;

/// Shorthand for results of lookups that may come up empty.
pub type Result<T, E = NotFound> = std::result::Result<T, E>;
