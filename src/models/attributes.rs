use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-supplied description of the person being styled.
///
/// Values are kept exactly as sent; only `season` and `skinHex` are checked,
/// and only for presence. Serializes back with the same camelCase keys in a
/// fixed order, skipping absent or null fields, so it can be handed to the
/// model as the user turn.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_confidence: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_hex: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_tone_bucket: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undertone: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<Value>,
}

impl AttributeInput {
    /// Picks the attribute keys out of a decoded body. Anything that is not
    /// an object counts as an empty one.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(_) => serde_json::from_value(body).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// `season` and `skinHex` must be present and truthy.
    pub fn has_required_fields(&self) -> bool {
        is_truthy(&self.season) && is_truthy(&self.skin_hex)
    }
}

/// Truthiness as a JSON-speaking caller expects it: null, false, 0 and ""
/// are falsy, everything else (including empty arrays and objects) is not.
fn is_truthy(field: &Option<Value>) -> bool {
    match field {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requires_truthy_season_and_skin_hex() {
        let full = AttributeInput::from_body(json!({"season": "winter", "skinHex": "#c68642"}));
        assert!(full.has_required_fields());

        let numeric_season = AttributeInput::from_body(json!({"season": 4, "skinHex": "#fff"}));
        assert!(numeric_season.has_required_fields());

        for falsy in [json!(null), json!(""), json!(0), json!(false)] {
            let input = AttributeInput::from_body(json!({"season": falsy, "skinHex": "#c68642"}));
            assert!(!input.has_required_fields());
        }

        let no_season = AttributeInput::from_body(json!({"skinHex": "#c68642"}));
        assert!(!no_season.has_required_fields());

        assert!(!AttributeInput::default().has_required_fields());
    }

    #[test]
    fn non_object_body_is_empty() {
        for body in [json!(null), json!([1, 2]), json!("winter"), json!(7)] {
            assert_eq!(AttributeInput::from_body(body), AttributeInput::default());
        }
    }

    #[test]
    fn user_turn_keeps_original_values_in_fixed_order() {
        let input = AttributeInput::from_body(json!({
            "season": "autumn",
            "favouriteColour": "teal",
            "undertone": null,
            "skinHex": "#8d5524",
            "genderConfidence": 0.92,
            "age": "31"
        }));

        let encoded = serde_json::to_string(&input).unwrap();
        assert_eq!(
            encoded,
            r##"{"age":"31","genderConfidence":0.92,"skinHex":"#8d5524","season":"autumn"}"##
        );
    }
}
