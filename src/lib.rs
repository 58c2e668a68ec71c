//! # plotwire: structured messages in, plot series out
//!
//! Ingests self-describing structured messages (JSON, CBOR, BSON or
//! MessagePack) and flattens each one into named, timestamped numeric
//! samples suitable for time-series plotting.
//!
//! ## Architecture
//!
//! - **Decode**: each format is a thin adapter over an existing codec crate,
//!   all targeting the same canonical [`Value`] tree
//! - **Key policy**: a configured key string disambiguates array-of-object
//!   paths, either as an absolute JSON pointer or a per-object field name
//! - **Flatten**: recursive descent synthesizing `topic/member[key]` paths
//!   and appending `(timestamp, value)` samples to a [`SeriesSink`]
//! - **Sink**: append-only series store; [`MemorySink`] is bundled, host
//!   applications plug in their own
//!
//! The transform is one-way: original document structure is not
//! reconstructible from the emitted series.
//!
//! ## Example
//!
//! ```
//! use plotwire::{MemorySink, MessageFormat, MessageParser, ParserConfig};
//!
//! let parser = MessageParser::new("imu", MessageFormat::Json, ParserConfig::default());
//! let mut sink = MemorySink::new();
//!
//! parser
//!     .parse(br#"{"accel":{"x":0.1,"y":0.2},"valid":true}"#, 1.25, &mut sink)
//!     .unwrap();
//!
//! assert_eq!(sink.series("imu/accel/x").unwrap().last().unwrap().value, 0.1);
//! assert_eq!(sink.series("imu/valid").unwrap().last().unwrap().value, 1.0);
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod flatten;
pub mod key;
pub mod parser;
pub mod sink;
pub mod timestamp;
pub mod value;

// Re-export commonly used types
pub use config::ParserConfig;
pub use decode::{decode, MessageFormat};
pub use error::{DecodeError, PlotWireError, Result};
pub use flatten::Flattener;
pub use key::{JsonPointer, KeyPolicy};
pub use parser::MessageParser;
pub use sink::{MemorySink, Series, SeriesPoint, SeriesSink};
pub use timestamp::extract_timestamp;
pub use value::Value;
