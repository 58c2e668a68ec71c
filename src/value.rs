//! Canonical document model shared by all format decoders.
//!
//! Every wire format (JSON, CBOR, BSON, MessagePack) decodes into [`Value`],
//! and the flattening engine consumes only this model. Object members keep
//! their insertion order, so path synthesis is deterministic regardless of
//! which codec produced the tree.
//!
//! A `Value` is immutable once decoded: the flattener never patches the tree,
//! it only walks it (consumed pointer targets are skipped at traversal time,
//! see `flatten`).

use std::fmt;

/// A decoded document node.
///
/// Object members are stored as an ordered `Vec` of `(key, value)` pairs with
/// keys unique within a level (a duplicate key during decode replaces the
/// earlier entry, matching `serde_json` semantics).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Numeric view of this node, or `None` for anything that is not a
    /// number. Booleans are deliberately excluded here: the flattener maps
    /// them to 0/1 at the leaf stage, but timestamp extraction and key-series
    /// emission only accept real numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Object member lookup by key. Returns `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Array element lookup by index. Returns `None` for non-arrays.
    pub fn index(&self, idx: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(idx),
            _ => None,
        }
    }

    /// True for empty arrays, empty objects and empty strings.
    ///
    /// Empty containers short-circuit the flattener so no degenerate series
    /// are ever created for them. Scalars (including `Null`) are not "empty".
    pub fn is_empty_container(&self) -> bool {
        match self {
            Value::Array(items) => items.is_empty(),
            Value::Object(members) => members.is_empty(),
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// The value of the first iterable element of this node: the first
    /// member's value for an object, the first element for an array, the
    /// node itself for scalars. `None` for empty containers and `Null`.
    ///
    /// This is the shape the pointer-mode key policy captures once per
    /// message.
    pub fn first_iterable_value(&self) -> Option<&Value> {
        match self {
            Value::Object(members) => members.first().map(|(_, v)| v),
            Value::Array(items) => items.first(),
            Value::Null => None,
            scalar => Some(scalar),
        }
    }

    /// Textual form used as a path disambiguation key.
    ///
    /// Strings render without quotes (`items[a]`, not `items["a"]`), integral
    /// numbers without a trailing `.0`. Containers fall back to their compact
    /// JSON dump.
    pub fn render_key(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Number(n) => render_number(*n),
            other => other.to_string(),
        }
    }
}

fn render_number(n: f64) -> String {
    // Keys like "7" read better than "7.0"; keep the float form for anything
    // that would lose precision as an integer.
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Compact JSON rendering, used for container-valued disambiguation keys and
/// diagnostics.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&render_number(*n)),
            Value::String(s) => write_json_string(f, s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(members) => {
                f.write_str("{")?;
                for (i, (name, value)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_json_string(f, name)?;
                    write!(f, ":{}", value)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_json_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}
