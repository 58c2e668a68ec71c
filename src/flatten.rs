//! The flattening engine: recursive descent over a canonical value tree,
//! emitting `(path, timestamp, value)` samples into a series sink.
//!
//! Path synthesis joins the topic name with one step per descent:
//! `/member` for object members, `[index]` for array elements. When a
//! disambiguation key member is active the step carries it in brackets
//! instead (`member[key]`, or `[key]` replacing the array index in pointer
//! mode), so elements that would otherwise collide on index get stable,
//! key-based names.
//!
//! Traversal state (`key_member`, depth, the prune path of a consumed
//! pointer target) is threaded explicitly through the recursion — a deeper
//! field-name match applies to its own subtree only and never leaks to
//! siblings of an ancestor. The tree itself is never mutated.

use crate::key::{resolve_pointer_key, KeyPolicy};
use crate::sink::SeriesSink;
use crate::value::Value;

/// Hard cap on traversal depth. Leaves shallower than the cap are still
/// emitted; anything nested deeper is dropped with a warning.
pub const MAX_FLATTEN_DEPTH: usize = 128;

/// One message's flattening pass, configured per parser instance.
pub struct Flattener<'a> {
    topic: &'a str,
    policy: &'a KeyPolicy,
    emit_key_series: bool,
}

impl<'a> Flattener<'a> {
    pub fn new(topic: &'a str, policy: &'a KeyPolicy) -> Self {
        Self {
            topic,
            policy,
            emit_key_series: true,
        }
    }

    /// Whether a numeric key member is also emitted as its own series
    /// (default true).
    pub fn emit_key_series(mut self, emit: bool) -> Self {
        self.emit_key_series = emit;
        self
    }

    /// Flatten one decoded message into the sink. All samples carry the
    /// given timestamp.
    pub fn run<S: SeriesSink>(&self, doc: &Value, timestamp: f64, sink: &mut S) {
        let mut key_member = None;
        let mut prune = None;

        if let KeyPolicy::Pointer(pointer) = self.policy {
            match resolve_pointer_key(pointer, doc) {
                Some(resolved) => {
                    if self.emit_key_series {
                        if let Some(v) = resolved.numeric {
                            let path = format!("{}{}", self.topic, pointer.expr());
                            sink.append(&path, timestamp, v);
                        }
                    }
                    key_member = Some(resolved.key_member);
                    // The pointer target is consumed; exclude it from the
                    // ordinary walk below.
                    prune = Some(pointer.tokens());
                }
                None => tracing::debug!(
                    pointer = pointer.expr(),
                    "pointer key did not resolve, flattening without disambiguation"
                ),
            }
        }

        let mut walk = Walk {
            sink,
            timestamp,
            policy: self.policy,
            emit_key_series: self.emit_key_series,
        };
        walk.node(
            self.topic,
            doc,
            Ctx {
                key_member: key_member.as_deref(),
                depth: 0,
                prune,
            },
        );
    }
}

/// Per-message traversal state, passed down the recursion by value.
#[derive(Clone, Copy)]
struct Ctx<'a> {
    /// Active disambiguation key, if any.
    key_member: Option<&'a str>,
    /// Descent steps taken from the document root.
    depth: usize,
    /// Remaining pointer tokens leading to the consumed pointer target.
    prune: Option<&'a [String]>,
}

struct Walk<'a, S: SeriesSink> {
    sink: &'a mut S,
    timestamp: f64,
    policy: &'a KeyPolicy,
    emit_key_series: bool,
}

impl<S: SeriesSink> Walk<'_, S> {
    fn node(&mut self, prefix: &str, value: &Value, ctx: Ctx<'_>) {
        // Empty containers (and empty strings) never create a series.
        if value.is_empty_container() {
            return;
        }
        match value {
            Value::Array(items) => {
                if ctx.depth >= MAX_FLATTEN_DEPTH {
                    tracing::warn!(path = prefix, "maximum nesting depth reached, dropping subtree");
                    return;
                }
                // In pointer mode a message-wide key replaces the numeric
                // index, but only at the level the pointer disambiguates.
                let pointer_key = match (self.policy, ctx.key_member) {
                    (KeyPolicy::Pointer(_), Some(km)) if ctx.depth == 0 && !km.is_empty() => {
                        Some(km)
                    }
                    _ => None,
                };
                for (i, item) in items.iter().enumerate() {
                    let child_prune = match ctx.prune {
                        Some(tokens) if index_matches(tokens.first(), i) => {
                            if tokens.len() == 1 {
                                continue;
                            }
                            Some(&tokens[1..])
                        }
                        _ => None,
                    };
                    let path = match pointer_key {
                        Some(km) => format!("{}[{}]", prefix, km),
                        None => format!("{}[{}]", prefix, i),
                    };
                    self.node(
                        &path,
                        item,
                        Ctx {
                            key_member: ctx.key_member,
                            depth: ctx.depth + 1,
                            prune: child_prune,
                        },
                    );
                }
            }

            Value::Object(members) => {
                if ctx.depth >= MAX_FLATTEN_DEPTH {
                    tracing::warn!(path = prefix, "maximum nesting depth reached, dropping subtree");
                    return;
                }
                // Field-name mode re-captures the key member at every level
                // that has one; the refreshed value covers this subtree only.
                let refreshed = match self.policy {
                    KeyPolicy::FieldName(name) => value.get(name).map(Value::render_key),
                    _ => None,
                };
                let key_member = refreshed.as_deref().or(ctx.key_member);

                for (name, child) in members {
                    if let KeyPolicy::FieldName(key) = self.policy {
                        if name == key {
                            // Consumed by the key policy; not a sibling leaf.
                            if self.emit_key_series {
                                if let Some(v) = child.as_f64() {
                                    let path = format!("{}/{}", prefix, key);
                                    self.sink.append(&path, self.timestamp, v);
                                }
                            }
                            continue;
                        }
                    }
                    let child_prune = match ctx.prune {
                        Some(tokens) if tokens.first().map(String::as_str) == Some(name.as_str()) => {
                            if tokens.len() == 1 {
                                continue;
                            }
                            Some(&tokens[1..])
                        }
                        _ => None,
                    };
                    let path = match key_member {
                        Some(km) if !km.is_empty() && self.suffix_active(ctx.depth) => {
                            format!("{}/{}[{}]", prefix, name, km)
                        }
                        _ => format!("{}/{}", prefix, name),
                    };
                    self.node(
                        &path,
                        child,
                        Ctx {
                            key_member,
                            depth: ctx.depth + 1,
                            prune: child_prune,
                        },
                    );
                }
            }

            Value::Bool(b) => {
                self.sink
                    .append(prefix, self.timestamp, if *b { 1.0 } else { 0.0 });
            }
            Value::Number(n) => {
                self.sink.append(prefix, self.timestamp, *n);
            }
            // Strings (empty or not) and nulls have no numeric meaning.
            Value::String(_) | Value::Null => {}
        }
    }

    /// Whether an active key member decorates steps at this depth.
    fn suffix_active(&self, depth: usize) -> bool {
        match self.policy {
            // Only the immediate children of the pointer-resolved level get
            // the suffix; deeper descendants keep plain names.
            KeyPolicy::Pointer(_) => depth == 0,
            KeyPolicy::FieldName(_) => true,
            KeyPolicy::None => false,
        }
    }
}

fn index_matches(token: Option<&String>, i: usize) -> bool {
    token.is_some_and(|t| t.parse::<usize>() == Ok(i))
}
