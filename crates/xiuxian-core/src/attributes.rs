//! Player attribute blob accessor.
//!
//! Attributes are stored as a JSON object. Reading never fails: a missing
//! blob, a blob that is not an object, or a recognized key that is not a
//! number all fall back to the default of `1.0`. Unrecognized keys are
//! carried in [`PlayerAttributes::extra`] and written back unchanged.

use serde_json::{Map, Value};
use xiuxian_types::{DEFAULT_ATTRIBUTE, PlayerAttributes};

/// Blob key for luck.
pub const LUCK_KEY: &str = "luck";
/// Blob key for the cultivation growth rate.
pub const CULTIVATION_RATE_KEY: &str = "cultivationRate";
/// Blob key for the spirit growth rate.
pub const SPIRIT_RATE_KEY: &str = "spiritRate";

/// Decode an attribute blob.
pub fn decode(blob: Option<&Value>) -> PlayerAttributes {
    let Some(Value::Object(map)) = blob else {
        return PlayerAttributes::default();
    };

    let mut attrs = PlayerAttributes::default();
    for (key, value) in map {
        match key.as_str() {
            LUCK_KEY => attrs.luck = value.as_f64().unwrap_or(DEFAULT_ATTRIBUTE),
            CULTIVATION_RATE_KEY => {
                attrs.cultivation_rate = value.as_f64().unwrap_or(DEFAULT_ATTRIBUTE);
            }
            SPIRIT_RATE_KEY => attrs.spirit_rate = value.as_f64().unwrap_or(DEFAULT_ATTRIBUTE),
            _ => {
                attrs.extra.insert(key.clone(), value.clone());
            }
        }
    }
    attrs
}

/// Encode the full attribute map, recognized keys included.
pub fn encode(attrs: &PlayerAttributes) -> Value {
    let mut map: Map<String, Value> = attrs
        .extra
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    map.insert(LUCK_KEY.to_owned(), number(attrs.luck));
    map.insert(CULTIVATION_RATE_KEY.to_owned(), number(attrs.cultivation_rate));
    map.insert(SPIRIT_RATE_KEY.to_owned(), number(attrs.spirit_rate));
    Value::Object(map)
}

/// Non-finite values cannot be represented in JSON; store the default.
fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .or_else(|| serde_json::Number::from_f64(DEFAULT_ATTRIBUTE))
        .map_or(Value::Null, Value::Number)
}

/// Luck from a player's attributes. Negative or non-finite luck reads as 0.
pub fn luck(attrs: &PlayerAttributes) -> f64 {
    if attrs.luck.is_finite() {
        attrs.luck.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_blob_uses_defaults() {
        let attrs = decode(None);
        assert_eq!(attrs, PlayerAttributes::default());
        assert!((attrs.luck - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn garbage_blob_uses_defaults() {
        assert_eq!(decode(Some(&json!("not json"))), PlayerAttributes::default());
        assert_eq!(decode(Some(&json!([1, 2]))), PlayerAttributes::default());
    }

    #[test]
    fn recognized_keys_are_typed() {
        let attrs = decode(Some(&json!({"luck": 2.5, "spiritRate": 1.05})));
        assert!((attrs.luck - 2.5).abs() < f64::EPSILON);
        assert!((attrs.spirit_rate - 1.05).abs() < f64::EPSILON);
        assert!((attrs.cultivation_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_numeric_recognized_key_defaults() {
        let attrs = decode(Some(&json!({"luck": "lots"})));
        assert!((attrs.luck - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_keys_survive_round_trip() {
        let blob = json!({"luck": 3.0, "attack": 12, "titles": ["a", "b"]});
        let encoded = encode(&decode(Some(&blob)));
        assert_eq!(encoded["attack"], 12);
        assert_eq!(encoded["titles"], json!(["a", "b"]));
        assert_eq!(encoded["luck"], 3.0);
        assert_eq!(encoded["spiritRate"], 1.0);
        assert_eq!(encoded["cultivationRate"], 1.0);
    }

    #[test]
    fn luck_is_never_negative() {
        let attrs = PlayerAttributes {
            luck: -2.0,
            ..PlayerAttributes::default()
        };
        assert!(luck(&attrs).abs() < f64::EPSILON);
    }
}
