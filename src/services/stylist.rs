use serde_json::{json, Value};

use crate::{
    clients::openai::CompletionBackend,
    error::{AppError, Result},
    models::{attributes::AttributeInput, outfit::OutfitResponse},
};

pub const SYSTEM_PROMPT: &str = "You are a fashion stylist. Return concise, practical head-to-toe outfit suggestions as strict JSON.
Consider age, gender, skin tone bucket (light/medium/deep), undertone (warm/cool/neutral), season.
No brand names. Fabrics must fit the season. Output keys:
- headwear, top, midlayer, bottoms, footwear, accessories
- palette: { \"primary\": hex, \"accent\": hex, \"neutral\": hex }
- rationale";

/// Asks the model for an outfit and returns the body to relay with a 200.
///
/// Parsed model JSON is returned unchanged, whatever its shape. Content that
/// is not JSON comes back wrapped as `{error, raw}` rather than as an error.
pub async fn recommend(backend: &dyn CompletionBackend, input: &AttributeInput) -> Result<Value> {
    if !input.has_required_fields() {
        return Err(AppError::MissingFields);
    }

    let user = serde_json::to_string(input).map_err(anyhow::Error::from)?;
    let text = backend.complete(SYSTEM_PROMPT, &user).await?;

    Ok(parse_model_output(text))
}

fn parse_model_output(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => {
            if !OutfitResponse::conforms(&value) {
                tracing::warn!("Model output does not match the outfit shape; relaying as-is");
            }
            value
        }
        Err(e) => {
            tracing::warn!(error = %e, "Model returned non-JSON content");
            json!({ "error": "LLM returned non-JSON", "raw": text })
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Canned backend that records every prompt pair it receives.
    pub(crate) struct StubBackend {
        reply: Box<dyn Fn() -> Result<String> + Send + Sync>,
        pub calls: Mutex<Vec<(String, String)>>,
    }

    impl StubBackend {
        pub fn replying(text: &str) -> Self {
            let text = text.to_string();
            Self { reply: Box::new(move || Ok(text.clone())), calls: Mutex::new(Vec::new()) }
        }

        pub fn failing(detail: &str) -> Self {
            let detail = detail.to_string();
            Self {
                reply: Box::new(move || Err(AppError::Upstream(detail.clone()))),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(&self, system: &str, user: &str) -> Result<String> {
            self.calls.lock().unwrap().push((system.to_string(), user.to_string()));
            (self.reply)()
        }
    }

    fn valid_input() -> AttributeInput {
        AttributeInput {
            season: Some("winter".into()),
            skin_hex: Some("#c68642".into()),
            undertone: Some("warm".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn missing_fields_never_reach_backend() {
        let stub = StubBackend::replying("{}");
        let input = AttributeInput { season: Some("winter".into()), ..Default::default() };

        let err = recommend(&stub, &input).await.unwrap_err();
        assert!(matches!(err, AppError::MissingFields));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn sends_fixed_prompt_and_serialized_attributes() {
        let stub = StubBackend::replying("{}");
        recommend(&stub, &valid_input()).await.unwrap();

        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, SYSTEM_PROMPT);
        assert_eq!(
            calls[0].1,
            r##"{"skinHex":"#c68642","undertone":"warm","season":"winter"}"##
        );
    }

    #[tokio::test]
    async fn relays_parsed_json_unchanged() {
        let stub = StubBackend::replying(
            r##"{"top":"wool sweater","palette":{"primary":"#222222","accent":"#c0392b","neutral":"#eeeeee"}}"##,
        );
        let out = recommend(&stub, &valid_input()).await.unwrap();
        assert_eq!(
            out,
            json!({
                "top": "wool sweater",
                "palette": {"primary": "#222222", "accent": "#c0392b", "neutral": "#eeeeee"}
            })
        );
    }

    #[tokio::test]
    async fn wraps_non_json_content() {
        let stub = StubBackend::replying("sorry, I cannot help");
        let out = recommend(&stub, &valid_input()).await.unwrap();
        assert_eq!(out, json!({"error": "LLM returned non-JSON", "raw": "sorry, I cannot help"}));
    }

    #[tokio::test]
    async fn upstream_error_propagates() {
        let stub = StubBackend::failing("rate limited");
        let err = recommend(&stub, &valid_input()).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(ref d) if d == "rate limited"));
    }
}
