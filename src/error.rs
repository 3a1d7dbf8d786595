//! The error chain node and its builder.

use crate::{Kind, Op};
use once_cell::sync::OnceCell;
use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;
use std::mem;
use std::sync::Arc;

static SEPARATOR: OnceCell<String> = OnceCell::new();

/// Sets the separator placed between rendered error fields for the rest of
/// the process lifetime. Call once at startup, before any error is
/// rendered; returns `false` if a separator was already set.
pub fn set_separator(sep: impl Into<String>) -> bool {
    SEPARATOR.set(sep.into()).is_ok()
}

/// The separator currently in effect. Defaults to `": "`.
pub fn separator() -> &'static str {
    SEPARATOR.get().map(String::as_str).unwrap_or(": ")
}

/// One link of an error chain.
///
/// A node carries an operation label, a failure [`Kind`], a message, and an
/// optional underlying cause. Any field may be left at its zero value, in
/// which case rendering omits it. Nodes are immutable once built; wrapping
/// an error always allocates a new node, so a value held elsewhere (a test
/// variable, an outer caller) is never changed behind its holder's back.
///
/// # Example
///
/// ```rust
/// use errkind::{Error, Kind};
///
/// let err = Error::build()
///     .op("store.Get")
///     .kind(Kind::NotExist)
///     .message("no such bucket")
///     .build();
///
/// assert_eq!(err.kind(), Kind::NotExist);
/// assert_eq!(err.to_string(), "store.Get: item does not exist: no such bucket");
/// ```
#[derive(Clone)]
pub struct Error {
    pub(crate) op: Op,
    pub(crate) kind: Kind,
    pub(crate) message: String,
    pub(crate) cause: Option<Cause>,
    pub(crate) trace: Option<Arc<Backtrace>>,
}

/// The owned link to the next error down the chain: either another node of
/// ours, or an opaque external error we hold but do not own structurally.
#[derive(Clone)]
pub(crate) enum Cause {
    Chain(Box<Error>),
    Opaque(Arc<dyn StdError + Send + Sync + 'static>),
}

impl Cause {
    pub(crate) fn render(&self) -> String {
        match self {
            Cause::Chain(e) => e.to_string(),
            Cause::Opaque(e) => e.to_string(),
        }
    }
}

impl Error {
    /// Starts building an error node. See [`Builder`].
    pub fn build() -> Builder {
        Builder::default()
    }

    /// Creates a classified error with the given kind and message.
    pub fn new(kind: Kind, message: impl Into<String>) -> Error {
        Error {
            op: Op::default(),
            kind,
            message: message.into(),
            cause: None,
            trace: None,
        }
    }

    /// Creates a terminal, message-only error.
    pub fn msg(message: impl Into<String>) -> Error {
        Error::new(Kind::Internal, message)
    }

    /// The operation label, empty when unset.
    pub fn op(&self) -> &Op {
        &self.op
    }

    /// The failure classification. [`Kind::Internal`] means unclassified;
    /// use [`crate::kind_of`] to search the whole chain instead.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The message attached at this node, empty when unset.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.op.is_empty()
            && self.kind == Kind::Internal
            && self.message.is_empty()
            && self.cause.is_none()
    }
}

/// Assembles an [`Error`] from its parts.
///
/// Each setter records one field; calling a setter twice means the last
/// call wins. `build` then merges the node against a wrapped node cause so
/// the same classification never appears twice in a chain (see
/// [`Builder::build`]).
#[derive(Default)]
pub struct Builder {
    op: Op,
    kind: Kind,
    message: String,
    cause: Option<anyhow::Error>,
    trace: bool,
}

impl Builder {
    /// Sets the operation label.
    pub fn op(mut self, op: impl Into<Op>) -> Builder {
        self.op = op.into();
        self
    }

    /// Sets the failure classification.
    pub fn kind(mut self, kind: Kind) -> Builder {
        self.kind = kind;
        self
    }

    /// Sets the message.
    pub fn message(mut self, message: impl Into<String>) -> Builder {
        self.message = message.into();
        self
    }

    /// Sets the underlying cause. An [`Error`] value becomes a chain-node
    /// cause and takes part in the merge rules at `build` time; anything
    /// else is held as an opaque external error.
    pub fn cause(mut self, cause: impl Into<anyhow::Error>) -> Builder {
        self.cause = Some(cause.into());
        self
    }

    /// Captures a backtrace at `build` time. Off by default; the trace is
    /// shown by the `Debug` rendering only.
    pub fn trace(mut self) -> Builder {
        self.trace = true;
        self
    }

    fn is_empty(&self) -> bool {
        self.op.is_empty()
            && self.kind == Kind::Internal
            && self.message.is_empty()
            && self.cause.is_none()
            && !self.trace
    }

    /// Builds the node, applying the merge rules when the cause is itself a
    /// chain node:
    ///
    /// 1. equal kinds: the wrapped node's kind is reset so the same
    ///    classification is not reported twice;
    /// 2. an unclassified outer node pulls the wrapped node's kind up;
    /// 3. an unset outer op pulls the wrapped node's op up;
    /// 4. a trace on the wrapped node migrates outward.
    ///
    /// Building with no fields set is a programmer error: it panics under
    /// debug assertions and otherwise logs the call site and returns a
    /// fallback message error, so error-handling code is never itself a
    /// source of panics in production.
    #[track_caller]
    pub fn build(self) -> Error {
        if self.is_empty() {
            let caller = std::panic::Location::caller();
            debug_assert!(false, "error built with no fields set at {caller}");
            tracing::error!(%caller, "error built with no fields set");
            return Error::msg("error built with no fields set");
        }

        let mut e = Error {
            op: self.op,
            kind: self.kind,
            message: self.message,
            cause: None,
            trace: self.trace.then(|| Arc::new(Backtrace::capture())),
        };
        let Some(cause) = self.cause else {
            return e;
        };
        match cause.downcast::<Error>() {
            Ok(mut prev) => {
                if prev.kind == e.kind {
                    prev.kind = Kind::Internal;
                }
                if e.kind == Kind::Internal {
                    e.kind = mem::replace(&mut prev.kind, Kind::Internal);
                }
                if e.op.is_empty() {
                    e.op = mem::take(&mut prev.op);
                }
                if e.trace.is_none() {
                    e.trace = prev.trace.take();
                }
                e.cause = Some(Cause::Chain(Box::new(prev)));
            }
            Err(external) => {
                let boxed: Box<dyn StdError + Send + Sync + 'static> = external.into();
                e.cause = Some(Cause::Opaque(Arc::from(boxed)));
            }
        }
        e
    }
}

// =============================================================================
// Display - compact, single-line format for logs
// =============================================================================

fn pad(b: &mut String, sep: &str) {
    if !b.is_empty() {
        b.push_str(sep);
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = separator();
        let mut b = String::new();
        if !self.op.is_empty() {
            b.push_str(self.op.as_str());
        }
        if self.kind != Kind::Internal {
            pad(&mut b, sep);
            b.push_str(self.kind.as_str());
        }
        if !self.message.is_empty() {
            pad(&mut b, sep);
            b.push_str(&self.message);
        }
        match &self.cause {
            Some(Cause::Chain(e)) if e.is_zero() => {}
            Some(cause) => {
                pad(&mut b, sep);
                b.push_str(&cause.render());
            }
            None => {}
        }
        if b.is_empty() {
            b.push_str("no error");
        }
        f.write_str(&b)
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.as_str())?;
        if !self.op.is_empty() {
            write!(f, " at {}", self.op)?;
        }
        writeln!(f)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if let Some(cause) = self.source() {
            writeln!(f)?;
            writeln!(f, "    Cause: {}", cause)?;
        }

        if let Some(trace) = &self.trace {
            writeln!(f)?;
            writeln!(f, "    Trace:")?;
            writeln!(f, "{trace}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.cause {
            Some(Cause::Chain(e)) => Some(&**e),
            Some(Cause::Opaque(e)) => Some(&**e),
            None => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => Kind::NotExist,
            std::io::ErrorKind::PermissionDenied => Kind::Permission,
            std::io::ErrorKind::AlreadyExists => Kind::AlreadyExist,
            _ => Kind::IO,
        };
        Error::build().kind(kind).cause(err).build()
    }
}

// =============================================================================
// Matching for tests
// =============================================================================

/// Compares an expected error shape against an actual error.
///
/// Both arguments must be chain nodes or the result is `false`. A zero
/// field on `template` is "don't care"; every non-zero field must be equal
/// on `err`. A chain-node cause recurs; a non-node cause is compared by its
/// rendered string. Intended for asserting expected errors in tests without
/// exact equality:
///
/// ```rust
/// use errkind::{is_match, Error, Kind};
///
/// let err = Error::build()
///     .op("store.Get")
///     .kind(Kind::Permission)
///     .message("denied")
///     .build();
/// assert!(is_match(&Error::new(Kind::Permission, ""), &err));
/// ```
pub fn is_match(template: &(dyn StdError + 'static), err: &(dyn StdError + 'static)) -> bool {
    let (Some(t), Some(e)) = (
        template.downcast_ref::<Error>(),
        err.downcast_ref::<Error>(),
    ) else {
        return false;
    };
    match_nodes(t, e)
}

fn match_nodes(t: &Error, e: &Error) -> bool {
    if !t.op.is_empty() && e.op != t.op {
        return false;
    }
    if t.kind != Kind::Internal && e.kind != t.kind {
        return false;
    }
    if !t.message.is_empty() && e.message != t.message {
        return false;
    }
    match &t.cause {
        None => true,
        Some(Cause::Chain(tc)) => match &e.cause {
            Some(Cause::Chain(ec)) => match_nodes(tc, ec),
            _ => false,
        },
        Some(opaque) => match &e.cause {
            Some(ec) => ec.render() == opaque.render(),
            None => false,
        },
    }
}
