//! Per-topic message parser: decode, timestamp, flatten.
//!
//! One [`MessageParser`] is constructed per topic with a fixed format and
//! config; it is then fed raw message buffers one at a time. A decode
//! failure is isolated to its message — the parser holds no mutable state,
//! so the caller just logs, drops the message and keeps going.

use crate::config::ParserConfig;
use crate::decode::{decode, MessageFormat};
use crate::error::DecodeError;
use crate::flatten::Flattener;
use crate::key::KeyPolicy;
use crate::sink::SeriesSink;
use crate::timestamp::extract_timestamp;

/// Stateless (per message) parser for one topic's message stream.
#[derive(Debug, Clone)]
pub struct MessageParser {
    topic: String,
    format: MessageFormat,
    config: ParserConfig,
    policy: KeyPolicy,
}

impl MessageParser {
    /// Build a parser for a topic. The key policy is compiled from the
    /// config here, exactly once.
    pub fn new(topic: impl Into<String>, format: MessageFormat, config: ParserConfig) -> Self {
        let policy = KeyPolicy::compile(&config.key);
        Self {
            topic: topic.into(),
            format,
            config,
            policy,
        }
    }

    /// Topic name prefixed onto every series path.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn format(&self) -> MessageFormat {
        self.format
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Process one message: decode the bytes, pick the timestamp, flatten
    /// every numeric leaf into the sink.
    ///
    /// Returns the timestamp applied to this message's samples (the
    /// caller-supplied default, unless a root `"timestamp"` member
    /// overrode it).
    pub fn parse<S: SeriesSink>(
        &self,
        bytes: &[u8],
        default_timestamp: f64,
        sink: &mut S,
    ) -> Result<f64, DecodeError> {
        let doc = decode(self.format, bytes)?;
        let timestamp = extract_timestamp(&doc, &self.config, default_timestamp);
        Flattener::new(&self.topic, &self.policy)
            .emit_key_series(self.config.emit_key_series)
            .run(&doc, timestamp, sink);
        Ok(timestamp)
    }
}
