//! Failure classification.

use std::fmt;

/// The class of a failure, independent of its message text.
///
/// Wire and log values are ordinal: the numbering below is frozen. Never
/// reorder or remove a kind; new kinds are appended at the end only, so
/// serialized values stay comparable across versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    /// Unclassified or internal inconsistency. The zero value; never
    /// printed in a rendered error.
    #[default]
    Internal = 0,
    /// Invalid operation or input.
    Invalid = 1,
    /// Permission denied.
    Permission = 2,
    /// External I/O failure such as a network error.
    IO = 3,
    /// Item already exists.
    AlreadyExist = 4,
    /// Item does not exist.
    NotExist = 5,
}

impl Kind {
    /// Human-readable form used when rendering an error.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Internal => "internal error",
            Kind::Invalid => "invalid operation",
            Kind::Permission => "permission denied",
            Kind::IO => "I/O error",
            Kind::AlreadyExist => "item already exists",
            Kind::NotExist => "item does not exist",
        }
    }

    /// The stable wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Kind::as_u8`]. `None` for values this version does not
    /// know, which a decoder treats as [`Kind::Internal`].
    pub fn from_u8(value: u8) -> Option<Kind> {
        match value {
            0 => Some(Kind::Internal),
            1 => Some(Kind::Invalid),
            2 => Some(Kind::Permission),
            3 => Some(Kind::IO),
            4 => Some(Kind::AlreadyExist),
            5 => Some(Kind::NotExist),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
