//! Decorators that add context to an existing error.
//!
//! Every decorator produces a fresh node wrapping the input; the input is
//! never mutated. The kind and op of the wrapped error survive via the
//! builder's pull-up rules, so callers annotate freely without re-stating
//! the classification at every layer.

use crate::{Error, Kind, Op};

/// Annotates `err` with a message. The wrapped error's kind and op remain
/// visible to [`crate::kind_of`] and friends.
pub fn wrap(err: impl Into<anyhow::Error>, message: impl Into<String>) -> Error {
    Error::build().message(message).cause(err).build()
}

/// Same as [`wrap`].
pub fn with_message(err: impl Into<anyhow::Error>, message: impl Into<String>) -> Error {
    wrap(err, message)
}

/// Annotates `err` with the name of the operation being performed. An empty
/// op adds nothing: a chain node is returned unchanged and an external
/// error is merely adopted into a node.
pub fn with_op(err: impl Into<anyhow::Error>, op: impl Into<Op>) -> Error {
    let op = op.into();
    if op.is_empty() {
        return adopt(err);
    }
    Error::build().op(op).cause(err).build()
}

/// Classifies `err`, attaching a kind and a message. This is the boundary
/// call where a raw external error first enters the taxonomy.
pub fn with_kind(err: impl Into<anyhow::Error>, kind: Kind, message: impl Into<String>) -> Error {
    Error::build().kind(kind).message(message).cause(err).build()
}

fn adopt(err: impl Into<anyhow::Error>) -> Error {
    match err.into().downcast::<Error>() {
        Ok(e) => e,
        Err(external) => Error::build().cause(external).build(),
    }
}

/// The decorators of this module, carried over `Result` so call sites can
/// annotate with one method call. `Ok` values pass through untouched.
///
/// ```rust
/// use errkind::{Kind, ResultExt};
///
/// fn lock(name: &str) -> errkind::Result<()> {
///     acquire(name)
///         .with_kind(Kind::Permission, "lease refused")
///         .with_op("locker.Lock")
/// }
/// # fn acquire(_: &str) -> std::io::Result<()> { Ok(()) }
/// ```
pub trait ResultExt<T> {
    /// Annotates the error with a message; no-op on `Ok`.
    fn wrap(self, message: impl Into<String>) -> crate::Result<T>;

    /// Annotates the error with an operation label; no-op on `Ok`.
    fn with_op(self, op: impl Into<Op>) -> crate::Result<T>;

    /// Classifies the error; no-op on `Ok`.
    fn with_kind(self, kind: Kind, message: impl Into<String>) -> crate::Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn wrap(self, message: impl Into<String>) -> crate::Result<T> {
        self.map_err(|e| wrap(e, message))
    }

    fn with_op(self, op: impl Into<Op>) -> crate::Result<T> {
        self.map_err(|e| with_op(e, op))
    }

    fn with_kind(self, kind: Kind, message: impl Into<String>) -> crate::Result<T> {
        self.map_err(|e| with_kind(e, kind, message))
    }
}
