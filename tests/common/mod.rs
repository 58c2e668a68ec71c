//! Shared helpers for integration tests.

#![allow(dead_code)] // Not every test binary uses every helper

use plotwire::MessageFormat;

/// Assert two floats are within `epsilon` of each other.
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "expected {} ~= {} (epsilon {})",
        a,
        b,
        epsilon
    );
}

/// Encode a logical document into the given wire format.
///
/// BSON can only carry a document at the top level, so callers using all
/// four formats should stick to object roots.
pub fn encode(format: MessageFormat, doc: &serde_json::Value) -> Vec<u8> {
    match format {
        MessageFormat::Json => serde_json::to_vec(doc).expect("json encode"),
        MessageFormat::Cbor => {
            let mut bytes = Vec::new();
            ciborium::ser::into_writer(doc, &mut bytes).expect("cbor encode");
            bytes
        }
        MessageFormat::Bson => bson::to_vec(doc).expect("bson encode"),
        MessageFormat::MessagePack => rmp_serde::to_vec_named(doc).expect("msgpack encode"),
    }
}
