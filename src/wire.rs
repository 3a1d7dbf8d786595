//! The JSON wire codec.
//!
//! An error crosses the wire as `{kind, message, cause}`: the stable kind
//! integer, the node's own message, and the *rendered string* of the
//! immediate cause. Chains deeper than one hop collapse into that string -
//! the codec is intentionally lossy, and consumers rely only on the
//! top-level kind and message. Do not try to make it lossless; that would
//! be a breaking wire-format change.

use crate::error::Cause;
use crate::{Error, Kind, Op};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error as StdError;
use std::sync::Arc;

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Ok(Kind::from_u8(value).unwrap_or_else(|| {
            // Forward compatibility: kinds are append-only, so a peer may
            // send a value this version does not know yet.
            tracing::warn!(kind = value, "unknown error kind on the wire");
            Kind::Internal
        }))
    }
}

#[derive(Serialize, Deserialize)]
struct Wire {
    #[serde(default)]
    kind: Kind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    cause: String,
}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Wire {
            kind: self.kind(),
            message: self.message().to_string(),
            cause: self.source().map(|c| c.to_string()).unwrap_or_default(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Error {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = Wire::deserialize(deserializer)?;
        let cause = if wire.cause.is_empty() {
            None
        } else {
            let boxed: Box<dyn StdError + Send + Sync + 'static> = wire.cause.into();
            Some(Cause::Opaque(Arc::from(boxed)))
        };
        Ok(Error {
            op: Op::default(),
            kind: wire.kind,
            message: wire.message,
            cause,
            trace: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{with_kind, with_op};
    use serde_json::json;
    use std::io;

    #[test]
    fn test_encode_single_level() {
        let err = Error::new(Kind::IO, "network unreachable");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value, json!({"kind": 3, "message": "network unreachable"}));
    }

    #[test]
    fn test_encode_unclassified_keeps_the_kind_field() {
        let err = Error::msg("boom");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value, json!({"kind": 0, "message": "boom"}));
    }

    #[test]
    fn test_encode_flattens_the_cause_to_a_string() {
        let root = io::Error::new(io::ErrorKind::ConnectionReset, "tcp connection dropped");
        let e1 = with_kind(root, Kind::IO, "network unreachable");
        let e2 = with_op(e1, "manifest.Fetch");

        let immediate = e2.source().unwrap().to_string();
        let value = serde_json::to_value(&e2).unwrap();
        assert_eq!(value["kind"], json!(3));
        assert_eq!(value["cause"], json!(immediate));
        // The whole remaining chain lives in that one string.
        assert!(immediate.contains("tcp connection dropped"));
    }

    #[test]
    fn test_round_trip_preserves_kind_and_message() {
        let err = Error::new(Kind::NotExist, "no such bucket");
        let encoded = serde_json::to_string(&err).unwrap();
        let decoded: Error = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.kind(), Kind::NotExist);
        assert_eq!(decoded.message(), "no such bucket");
        assert!(decoded.source().is_none());
    }

    #[test]
    fn test_decoded_cause_is_a_terminal_string() {
        let root = io::Error::new(io::ErrorKind::ConnectionReset, "tcp connection dropped");
        let err = with_kind(root, Kind::IO, "network unreachable");
        let immediate = err.source().unwrap().to_string();

        let encoded = serde_json::to_string(&err).unwrap();
        let decoded: Error = serde_json::from_str(&encoded).unwrap();

        let cause = decoded.source().unwrap();
        assert_eq!(cause.to_string(), immediate);
        // Structure is gone: the cause is no longer a chain node.
        assert!(cause.downcast_ref::<Error>().is_none());
        assert!(cause.source().is_none());
    }

    #[test]
    fn test_decode_unknown_kind_falls_back_to_internal() {
        let decoded: Error = serde_json::from_str(r#"{"kind": 42, "message": "from the future"}"#)
            .unwrap();
        assert_eq!(decoded.kind(), Kind::Internal);
        assert_eq!(decoded.message(), "from the future");
    }

    #[test]
    fn test_decode_missing_fields_default() {
        let decoded: Error = serde_json::from_str(r#"{"kind": 2}"#).unwrap();
        assert_eq!(decoded.kind(), Kind::Permission);
        assert_eq!(decoded.message(), "");
        assert!(decoded.source().is_none());
    }

    #[test]
    fn test_kind_serializes_as_a_bare_integer() {
        assert_eq!(serde_json::to_string(&Kind::NotExist).unwrap(), "5");
        let kind: Kind = serde_json::from_str("5").unwrap();
        assert_eq!(kind, Kind::NotExist);
    }
}
