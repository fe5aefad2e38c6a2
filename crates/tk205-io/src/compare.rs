//! Structural comparison and fingerprinting of document trees.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Whether `a` and `b` have the same shape with numbers equal within
/// relative tolerance `rel_tol`. Integers and floats compare by value.
pub fn near_equal(a: &Value, b: &Value, rel_tol: f64) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => numbers_near(x, y, rel_tol),
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| near_equal(x, y, rel_tol))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| near_equal(x, y, rel_tol)))
        }
        _ => a == b,
    }
}

fn numbers_near(x: f64, y: f64, rel_tol: f64) -> bool {
    if x == y {
        return true;
    }
    (x - y).abs() <= rel_tol * x.abs().max(y.abs())
}

/// SHA-256 of the compact JSON rendering with object keys sorted, as
/// lowercase hex. Independent of the source file's key order and format.
pub fn document_digest(document: &Value) -> String {
    let mut hasher = Sha256::new();
    feed(&mut hasher, document);
    format!("{:x}", hasher.finalize())
}

fn feed(hasher: &mut Sha256, value: &Value) {
    match value {
        Value::Array(items) => {
            hasher.update(b"[");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    hasher.update(b",");
                }
                feed(hasher, item);
            }
            hasher.update(b"]");
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            hasher.update(b"{");
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    hasher.update(b",");
                }
                hasher.update(Value::from(key.as_str()).to_string().as_bytes());
                hasher.update(b":");
                feed(hasher, item);
            }
            hasher.update(b"}");
        }
        scalar => hasher.update(scalar.to_string().as_bytes()),
    }
}
