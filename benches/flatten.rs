//! Benchmarks for decode + flatten throughput
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use plotwire::{MemorySink, MessageFormat, MessageParser, ParserConfig};

/// Build a telemetry-shaped document with `width` array entries.
fn telemetry_doc(width: usize) -> serde_json::Value {
    let channels: Vec<serde_json::Value> = (0..width)
        .map(|i| {
            serde_json::json!({
                "id": format!("ch{}", i),
                "value": i as f64 * 0.5,
                "ok": i % 2 == 0,
                "range": {"min": -1.0, "max": 1.0}
            })
        })
        .collect();
    serde_json::json!({
        "timestamp": 123.456,
        "hdr": {"seq": 42, "source": "bench"},
        "channels": channels
    })
}

fn encode(format: MessageFormat, doc: &serde_json::Value) -> Vec<u8> {
    match format {
        MessageFormat::Json => serde_json::to_vec(doc).unwrap(),
        MessageFormat::Cbor => {
            let mut bytes = Vec::new();
            ciborium::ser::into_writer(doc, &mut bytes).unwrap();
            bytes
        }
        MessageFormat::Bson => bson::to_vec(doc).unwrap(),
        MessageFormat::MessagePack => rmp_serde::to_vec_named(doc).unwrap(),
    }
}

fn bench_parse_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_message");
    let doc = telemetry_doc(32);

    for format in MessageFormat::ALL {
        let bytes = encode(format, &doc);
        let parser = MessageParser::new("bench", format, ParserConfig::default());

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format), &bytes, |b, bytes| {
            b.iter(|| {
                let mut sink = MemorySink::new();
                parser.parse(black_box(bytes), 1.0, &mut sink).unwrap();
                black_box(sink.len())
            });
        });
    }
    group.finish();
}

fn bench_key_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_modes");
    let doc = telemetry_doc(32);
    let bytes = encode(MessageFormat::Json, &doc);
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    let configs = [
        ("no_key", ParserConfig::default()),
        (
            "field_name",
            ParserConfig {
                key: "id".into(),
                ..Default::default()
            },
        ),
        (
            "pointer",
            ParserConfig {
                key: "/hdr/seq".into(),
                ..Default::default()
            },
        ),
    ];

    for (name, config) in configs {
        let parser = MessageParser::new("bench", MessageFormat::Json, config);
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut sink = MemorySink::new();
                parser.parse(black_box(&bytes), 1.0, &mut sink).unwrap();
                black_box(sink.len())
            });
        });
    }
    group.finish();
}

fn bench_document_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_width");

    for width in [8, 64, 256] {
        let bytes = encode(MessageFormat::MessagePack, &telemetry_doc(width));
        let parser = MessageParser::new("bench", MessageFormat::MessagePack, ParserConfig::default());

        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &bytes, |b, bytes| {
            b.iter(|| {
                let mut sink = MemorySink::new();
                parser.parse(black_box(bytes), 1.0, &mut sink).unwrap();
                black_box(sink.len())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_formats,
    bench_key_modes,
    bench_document_width
);
criterion_main!(benches);
