use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Palette {
    pub primary: String,
    pub accent: String,
    pub neutral: String,
}

/// The head-to-toe answer the model is asked to produce.
///
/// Model output is relayed as-is; this type only describes what a well-formed
/// answer looks like.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct OutfitResponse {
    pub headwear: String,
    pub top: String,
    pub midlayer: String,
    pub bottoms: String,
    pub footwear: String,
    pub accessories: String,
    pub palette: Palette,
    pub rationale: String,
}

impl OutfitResponse {
    /// Returns `true` when `value` has every key with the expected type.
    pub fn conforms(value: &Value) -> bool {
        Self::deserialize(value).is_ok()
    }
}
