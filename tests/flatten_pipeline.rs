//! End-to-end pipeline tests: raw bytes through `MessageParser` into a
//! `MemorySink`, across all four wire formats.

mod common;

use common::{assert_float_eq, encode};
use plotwire::{
    DecodeError, MemorySink, MessageFormat, MessageParser, ParserConfig,
};
use serde_json::json;

fn parse_all_formats(doc: &serde_json::Value, config: &ParserConfig) -> Vec<MemorySink> {
    MessageFormat::ALL
        .into_iter()
        .map(|format| {
            let parser = MessageParser::new("topic", format, config.clone());
            let mut sink = MemorySink::new();
            parser
                .parse(&encode(format, doc), 1.0, &mut sink)
                .unwrap_or_else(|e| panic!("{} parse failed: {}", format, e));
            sink
        })
        .collect()
}

#[test]
fn every_format_produces_the_same_series() {
    let doc = json!({
        "pos": {"x": 1.5, "y": -2.25},
        "flags": [true, false, true],
        "label": "ignored",
        "count": 17
    });
    let sinks = parse_all_formats(&doc, &ParserConfig::default());

    let expected = [
        "topic/count",
        "topic/flags[0]",
        "topic/flags[1]",
        "topic/flags[2]",
        "topic/pos/x",
        "topic/pos/y",
    ];
    for sink in &sinks {
        assert_eq!(sink.sorted_paths(), expected);
        assert_float_eq(sink.series("topic/pos/x").unwrap().points()[0].value, 1.5, 1e-12);
        assert_float_eq(sink.series("topic/flags[0]").unwrap().points()[0].value, 1.0, 1e-12);
        assert_float_eq(sink.series("topic/flags[1]").unwrap().points()[0].value, 0.0, 1e-12);
    }
}

#[test]
fn field_name_key_works_across_formats() {
    let doc = json!({
        "items": [
            {"id": "a", "v": 1.0},
            {"id": "b", "v": 2.0}
        ]
    });
    let config = ParserConfig {
        key: "id".into(),
        ..Default::default()
    };
    for sink in parse_all_formats(&doc, &config) {
        assert_eq!(
            sink.sorted_paths(),
            ["topic/items[0]/v[a]", "topic/items[1]/v[b]"]
        );
    }
}

#[test]
fn pointer_key_works_across_formats() {
    let doc = json!({"hdr": {"seq": 7.0}, "x": 1.0});
    let config = ParserConfig {
        key: "/hdr/seq".into(),
        ..Default::default()
    };
    for sink in parse_all_formats(&doc, &config) {
        assert_eq!(sink.sorted_paths(), ["topic/hdr/seq", "topic/x[7]"]);
        assert_float_eq(sink.series("topic/hdr/seq").unwrap().points()[0].value, 7.0, 1e-12);
    }
}

#[test]
fn message_timestamp_override_across_formats() {
    let doc = json!({"timestamp": 42.5, "x": 1.0});
    let config = ParserConfig {
        use_message_timestamp: true,
        ..Default::default()
    };
    for sink in parse_all_formats(&doc, &config) {
        let point = sink.series("topic/x").unwrap().points()[0];
        assert_float_eq(point.timestamp, 42.5, 1e-12);
    }
}

#[test]
fn default_timestamp_used_when_disabled() {
    let doc = json!({"timestamp": 42.5, "x": 1.0});
    for sink in parse_all_formats(&doc, &ParserConfig::default()) {
        let point = sink.series("topic/x").unwrap().points()[0];
        assert_float_eq(point.timestamp, 1.0, 1e-12);
    }
}

#[test]
fn malformed_messages_are_skipped_not_fatal() {
    let parser = MessageParser::new("topic", MessageFormat::Cbor, ParserConfig::default());
    let mut sink = MemorySink::new();

    // Truncated CBOR map header
    let err = parser.parse(&[0xa5, 0x61], 0.0, &mut sink).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed { .. }));
    assert!(sink.is_empty());

    // Stream recovers on the next message
    let ok = encode(MessageFormat::Cbor, &json!({"v": 3.0}));
    parser.parse(&ok, 1.0, &mut sink).unwrap();
    assert_eq!(sink.sorted_paths(), ["topic/v"]);
}

#[test]
fn consecutive_messages_append_to_the_same_series() {
    let parser = MessageParser::new("topic", MessageFormat::Json, ParserConfig::default());
    let mut sink = MemorySink::new();

    for (i, v) in [10.0, 20.0, 30.0].iter().enumerate() {
        let msg = format!(r#"{{"v":{}}}"#, v);
        parser.parse(msg.as_bytes(), i as f64, &mut sink).unwrap();
    }

    let series = sink.series("topic/v").unwrap();
    assert_eq!(series.len(), 3);
    let values: Vec<f64> = series.points().iter().map(|p| p.value).collect();
    assert_eq!(values, [10.0, 20.0, 30.0]);
    let stamps: Vec<f64> = series.points().iter().map(|p| p.timestamp).collect();
    assert_eq!(stamps, [0.0, 1.0, 2.0]);
}

#[test]
fn distinct_topics_never_share_series() {
    let mut sink = MemorySink::new();
    let doc = br#"{"v":1.0}"#;

    MessageParser::new("a", MessageFormat::Json, ParserConfig::default())
        .parse(doc, 0.0, &mut sink)
        .unwrap();
    MessageParser::new("b", MessageFormat::Json, ParserConfig::default())
        .parse(doc, 0.0, &mut sink)
        .unwrap();

    assert_eq!(sink.sorted_paths(), ["a/v", "b/v"]);
}
