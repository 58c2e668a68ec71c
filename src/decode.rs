//! Format decoders: raw message bytes in, canonical [`Value`] tree out.
//!
//! The four supported wire formats are a closed enum rather than a trait
//! object; [`decode`] dispatches once per message. Each adapter is a thin
//! shim over an existing codec crate (`serde_json`, `ciborium`, `bson`,
//! `rmp-serde`) — all of them deserialize into the same [`Value`] via the
//! manual `Deserialize` impl below, so a logically identical document
//! produces an identical tree no matter which encoding carried it.

use crate::error::DecodeError;
use crate::value::Value;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::str::FromStr;

/// Wire format of a message stream, fixed per parser instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageFormat {
    Json,
    Cbor,
    Bson,
    MessagePack,
}

impl MessageFormat {
    /// All supported formats, in display order.
    pub const ALL: [MessageFormat; 4] = [
        MessageFormat::Json,
        MessageFormat::Cbor,
        MessageFormat::Bson,
        MessageFormat::MessagePack,
    ];

    /// Stable display name, as shown in format pickers and logs.
    pub fn name(&self) -> &'static str {
        match self {
            MessageFormat::Json => "JSON",
            MessageFormat::Cbor => "CBOR",
            MessageFormat::Bson => "BSON",
            MessageFormat::MessagePack => "MessagePack",
        }
    }
}

impl fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MessageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(MessageFormat::Json),
            "cbor" => Ok(MessageFormat::Cbor),
            "bson" => Ok(MessageFormat::Bson),
            "msgpack" | "messagepack" => Ok(MessageFormat::MessagePack),
            other => Err(format!("unknown message format '{}'", other)),
        }
    }
}

/// Decode one message into a canonical value tree.
///
/// Malformed or truncated bytes fail with [`DecodeError::Malformed`]; a
/// document whose root can never contribute a sample (a bare `null`) fails
/// with [`DecodeError::UnsupportedRoot`]. No partial tree is ever returned.
pub fn decode(format: MessageFormat, bytes: &[u8]) -> Result<Value, DecodeError> {
    let value = match format {
        MessageFormat::Json => {
            serde_json::from_slice(bytes).map_err(|e| DecodeError::malformed(format, e))?
        }
        MessageFormat::Cbor => {
            ciborium::de::from_reader(bytes).map_err(|e| DecodeError::malformed(format, e))?
        }
        MessageFormat::Bson => {
            bson::from_slice(bytes).map_err(|e| DecodeError::malformed(format, e))?
        }
        MessageFormat::MessagePack => {
            rmp_serde::from_slice(bytes).map_err(|e| DecodeError::malformed(format, e))?
        }
    };
    if matches!(value, Value::Null) {
        return Err(DecodeError::UnsupportedRoot { format });
    }
    Ok(value)
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any self-describing document value")
            }

            fn visit_bool<E>(self, v: bool) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Number(v as f64))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Number(v as f64))
            }

            fn visit_i128<E>(self, v: i128) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Number(v as f64))
            }

            fn visit_u128<E>(self, v: u128) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Number(v as f64))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Number(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::String(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::String(v))
            }

            // Byte strings (CBOR/BSON/MessagePack binary) have no numeric
            // meaning; map them to Null so the leaf stage drops them.
            fn visit_bytes<E>(self, _v: &[u8]) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Null)
            }

            fn visit_unit<E>(self) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::Array(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut members: Vec<(String, Value)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    // Keys are unique within a level; a duplicate replaces
                    // the earlier entry but keeps its original position.
                    match members.iter_mut().find(|(name, _)| *name == key) {
                        Some(slot) => slot.1 = value,
                        None => members.push((key, value)),
                    }
                }
                Ok(Value::Object(members))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
