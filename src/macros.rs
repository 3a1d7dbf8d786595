//! Formatted variants of the constructors and decorators.

/// Builds a terminal, message-only error from a format string.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::Error::msg(format!($($arg)+))
    };
}

/// [`wrap`](crate::wrap) with a format string.
#[macro_export]
macro_rules! wrap {
    ($err:expr, $($arg:tt)+) => {
        $crate::wrap($err, format!($($arg)+))
    };
}

/// [`with_op`](crate::with_op), optionally annotating with a formatted
/// message as well.
#[macro_export]
macro_rules! with_op {
    ($err:expr, $op:expr) => {
        $crate::with_op($err, $op)
    };
    ($err:expr, $op:expr, $($arg:tt)+) => {
        $crate::with_op($crate::wrap($err, format!($($arg)+)), $op)
    };
}

/// [`with_kind`](crate::with_kind) with a format string.
#[macro_export]
macro_rules! with_kind {
    ($err:expr, $kind:expr, $($arg:tt)+) => {
        $crate::with_kind($err, $kind, format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::{Error, Kind};

    #[test]
    fn test_errorf_formats() {
        let err = errorf!("read error with {} format specifier", 1);
        assert_eq!(err.to_string(), "read error with 1 format specifier");
    }

    #[test]
    fn test_wrap_formats() {
        let err = wrap!(Error::new(Kind::IO, "boom"), "attempt {}", 3);
        assert_eq!(err.to_string(), "I/O error: attempt 3: boom");
    }

    #[test]
    fn test_with_op_with_and_without_message() {
        let err = with_op!(Error::msg("boom"), "store.Get");
        assert_eq!(err.to_string(), "store.Get: boom");

        let err = with_op!(Error::msg("boom"), "store.Get", "key {}", "a1");
        assert_eq!(err.to_string(), "store.Get: key a1: boom");
    }

    #[test]
    fn test_with_kind_formats() {
        let err = with_kind!(Error::msg("boom"), Kind::NotExist, "bucket {}", "b7");
        assert_eq!(err.kind(), Kind::NotExist);
        assert_eq!(err.to_string(), "item does not exist: bucket b7: boom");
    }
}
