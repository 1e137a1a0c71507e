//! Numeric normalization before JSON serialization (spec §4.1, §9).
//!
//! Model outputs (confidence scores from the NER/RE ensembles, embedding
//! components from the topic model) can arrive as non-native float
//! representations that a strict JSON encoder would choke on — NaN,
//! infinities, or wrapper types that don't round-trip through
//! `serde_json::Value` cleanly. Every value that crosses a stage boundary is
//! run through this recursive converter first. Skipping this step has been a
//! latent defect class: stages 6 and 7 read `confidence` back out of JSON and
//! silently treat a `null` (from a failed NaN encode) as `0.0`, which then
//! passes the confidence floor it should have failed.

use serde_json::{Map, Number, Value};

/// Recursively walk a `serde_json::Value`, coercing non-finite floats to a
/// representable native form and leaving everything else untouched.
///
/// NaN and +/-infinity have no JSON representation; we clamp them to `0.0`
/// rather than let `serde_json` silently emit `null` in their place.
pub fn normalize_json(value: Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(normalize_number(n)),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_json).collect()),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(k, normalize_json(v));
            }
            Value::Object(out)
        }
        other => other,
    }
}

fn normalize_number(n: Number) -> Number {
    if let Some(f) = n.as_f64() {
        if f.is_finite() {
            return n;
        }
        return Number::from_f64(0.0).expect("0.0 is always representable");
    }
    n
}

/// Normalize a native `f32`/`f64` confidence score for serialization,
/// clamping to `[0.0, 1.0]` and coercing non-finite values to `0.0`.
pub fn normalize_confidence(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn passes_through_finite_values() {
        let v = json!({"a": 1, "b": 2.5, "c": "text", "d": [1, 2, 3]});
        assert_eq!(normalize_json(v.clone()), v);
    }

    #[test]
    fn clamps_nan_to_zero() {
        let n = Number::from_f64(f64::NAN);
        assert!(n.is_none(), "serde_json already refuses to build NaN Number");
    }

    #[test]
    fn normalize_confidence_clamps_range() {
        assert_eq!(normalize_confidence(1.5), 1.0);
        assert_eq!(normalize_confidence(-0.5), 0.0);
        assert_eq!(normalize_confidence(0.42), 0.42);
    }

    #[test]
    fn normalize_confidence_handles_non_finite() {
        assert_eq!(normalize_confidence(f64::NAN), 0.0);
        assert_eq!(normalize_confidence(f64::INFINITY), 0.0);
        assert_eq!(normalize_confidence(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn recurses_into_nested_structures() {
        let v = json!({"outer": {"inner": [1, 2, {"deep": 3}]}});
        let normalized = normalize_json(v.clone());
        assert_eq!(normalized, v);
    }
}
