//! Operation labels.

use std::fmt;

/// A free-form label naming the operation that produced or forwarded an
/// error, usually a method name such as `"locker.Lock"`. The empty string
/// means "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Op(String);

impl Op {
    pub fn new(op: impl Into<String>) -> Op {
        Op(op.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Op {
    fn from(op: &str) -> Op {
        Op(op.to_string())
    }
}

impl From<String> for Op {
    fn from(op: String) -> Op {
        Op(op)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
