//! Chain-walking utilities.
//!
//! Walking is capability-based rather than type-based: the cause link is
//! whatever an error reports through `std::error::Error::source`, so any
//! error type participates in the walk; the kind capability is carried by
//! the crate's own [`Error`] node.

use crate::{Error, Kind};
use std::error::Error as StdError;

/// Follows cause links to the deepest error in the chain - the root cause.
/// An error with no further cause is returned as-is. For the single-hop
/// immediate cause, use `err.source()` directly.
pub fn cause<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    let mut cur = err;
    while let Some(next) = cur.source() {
        cur = next;
    }
    cur
}

/// The kind of the first chain node found walking the cause links, or
/// [`Kind::Internal`] when no node in the chain carries one. A missing
/// classification is never itself an error.
pub fn kind_of(err: &(dyn StdError + 'static)) -> Kind {
    let mut cur = Some(err);
    while let Some(e) = cur {
        if let Some(node) = e.downcast_ref::<Error>() {
            return node.kind();
        }
        cur = e.source();
    }
    Kind::Internal
}

/// The first chain node found walking the cause links. When the chain holds
/// none, a generic unclassified node is synthesized, so the result always
/// answers `kind` and `source` calls.
pub fn unwrap(err: &(dyn StdError + 'static)) -> Error {
    let mut cur = Some(err);
    while let Some(e) = cur {
        if let Some(node) = e.downcast_ref::<Error>() {
            return node.clone();
        }
        cur = e.source();
    }
    Error::msg("internal error or inconsistency")
}

/// Reports whether the chain is classified as `kind`: the first node
/// carrying a non-[`Kind::Internal`] kind decides. `false` for chains with
/// no classification anywhere.
pub fn is(kind: Kind, err: &(dyn StdError + 'static)) -> bool {
    let mut cur = Some(err);
    while let Some(e) = cur {
        if let Some(node) = e.downcast_ref::<Error>() {
            if node.kind() != Kind::Internal {
                return node.kind() == kind;
            }
        }
        cur = e.source();
    }
    false
}
