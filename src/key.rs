//! Key-resolution policy: how the configured `key` string disambiguates
//! array-of-object paths.
//!
//! Two mutually exclusive modes, chosen once when the config is compiled:
//!
//! - **Pointer mode** (`key` starts with `/`): the key names one absolute
//!   location in each message. Its first iterable value is captured once per
//!   message as the key member, and the pointed-to node is excluded from
//!   ordinary traversal.
//! - **Field-name mode** (any other non-empty `key`): every object level
//!   encountered during flattening is searched for a member with that name;
//!   a match becomes the key member for that subtree.
//!
//! A miss in either mode is a policy outcome, not an error — flattening
//! proceeds with plain numeric indexing.

use crate::value::Value;

/// A compiled RFC 6901 JSON pointer (`/hdr/seq` → `["hdr", "seq"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPointer {
    expr: String,
    tokens: Vec<String>,
}

impl JsonPointer {
    /// Compile a pointer expression. Returns `None` unless it starts with
    /// the `/` marker.
    pub fn parse(expr: &str) -> Option<Self> {
        if !expr.starts_with('/') {
            return None;
        }
        let tokens = expr
            .split('/')
            .skip(1)
            .map(|token| token.replace("~1", "/").replace("~0", "~"))
            .collect();
        Some(Self {
            expr: expr.to_owned(),
            tokens,
        })
    }

    /// The original pointer expression.
    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// Unescaped reference tokens, one per descent step.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Resolve the pointer against a document root. Objects are navigated by
    /// member name, arrays by decimal index.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for token in &self.tokens {
            current = match current {
                Value::Object(_) => current.get(token)?,
                Value::Array(_) => current.index(token.parse().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

/// Compiled form of `ParserConfig::key`, fixed for the parser's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyPolicy {
    /// No key configured: arrays use plain numeric indexing.
    None,
    /// Search each object level for a member with this name.
    FieldName(String),
    /// Resolve one absolute location per message.
    Pointer(JsonPointer),
}

impl KeyPolicy {
    /// Derive the policy from the raw `key` config string, exactly once.
    pub fn compile(key: &str) -> Self {
        if key.is_empty() {
            KeyPolicy::None
        } else if let Some(pointer) = JsonPointer::parse(key) {
            KeyPolicy::Pointer(pointer)
        } else {
            KeyPolicy::FieldName(key.to_owned())
        }
    }
}

/// Per-message outcome of pointer-mode resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedKey {
    /// Textual form of the captured value, used as the path suffix.
    pub key_member: String,
    /// The captured value itself when numeric, for key-series emission.
    pub numeric: Option<f64>,
}

/// Resolve a pointer against one message's document and capture the key
/// member: the first member's value for an object target, the first element
/// for an array target, the scalar itself otherwise.
///
/// Any failure (path absent, wrong shape, empty target) yields `None` and
/// pointer mode contributes nothing to this message.
pub fn resolve_pointer_key(pointer: &JsonPointer, root: &Value) -> Option<ResolvedKey> {
    let target = pointer.resolve(root)?;
    let captured = target.first_iterable_value()?;
    Some(ResolvedKey {
        key_member: captured.render_key(),
        numeric: captured.as_f64(),
    })
}
