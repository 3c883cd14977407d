//! Gemini generateContent backend
//!
//! Sends a single structured-output request per call. The response schema
//! pins the shape to `{ recommendations: [{ career, reason }] }`; an absent
//! or null `recommendations` field is treated as an empty list.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use super::traits::{Recommendation, RecommendationBackend};
use crate::error::ProviderError;

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables consulted for the API key, in order
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Configuration for the Gemini backend
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Model name, e.g. `gemini-2.5-flash`
    pub model: String,
    /// API base URL (overridable for testing against a local server)
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Backend that calls the Gemini generateContent API
pub struct GeminiBackend {
    http: reqwest::Client,
    api_key: Option<String>,
    config: GeminiConfig,
}

impl GeminiBackend {
    /// Create a backend with an explicit API key (or none)
    ///
    /// A missing key is not an error here: it surfaces as
    /// [`ProviderError::MissingApiKey`] on the first call, which the
    /// client layer folds into the fallback card.
    pub fn new(api_key: Option<String>, config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            config,
        }
    }

    /// Create a backend reading the API key from the process environment
    pub fn from_env(config: GeminiConfig) -> Self {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .filter(|key| !key.is_empty());
        Self::new(api_key, config)
    }
}

#[async_trait]
impl RecommendationBackend for GeminiBackend {
    async fn generate(&mut self, prompt: &str) -> Result<Vec<Recommendation>, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        debug!(model = %self.config.model, "Requesting recommendations from Gemini");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        parse_response(body)
    }
}

/// Build the generateContent request body for a prompt
fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        },
    })
}

/// The structured-output schema for recommendations
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "description": "A list of 3-5 career recommendations.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "career": {
                            "type": "STRING",
                            "description": "The name of the recommended career.",
                        },
                        "reason": {
                            "type": "STRING",
                            "description": "A brief, 1-2 sentence explanation of why this career is a good fit based on the answers.",
                        },
                    },
                    "required": ["career", "reason"],
                },
            },
        },
        "required": ["recommendations"],
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// The schema-shaped JSON document Gemini returns as candidate text
#[derive(Debug, Deserialize)]
struct RecommendationDocument {
    #[serde(default)]
    recommendations: Option<Vec<Recommendation>>,
}

/// Extract and validate the recommendation list from a response
///
/// Shape violations map to [`ProviderError::MalformedResponse`] so they
/// take the same fallback path as transport errors.
fn parse_response(body: GenerateResponse) -> Result<Vec<Recommendation>, ProviderError> {
    let text = body
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| {
            ProviderError::MalformedResponse("response contains no candidate text".to_string())
        })?;

    let document: RecommendationDocument = serde_json::from_str(&text)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    Ok(document.recommendations.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_text(text: &str) -> GenerateResponse {
        serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
        .unwrap()
    }

    // ==================== Request Shape Tests ====================

    #[test]
    fn request_body_embeds_prompt_text() {
        let body = request_body("hello counselor");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            json!("hello counselor")
        );
    }

    #[test]
    fn request_body_asks_for_json_output() {
        let body = request_body("p");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            json!("application/json")
        );
    }

    #[test]
    fn response_schema_requires_career_and_reason() {
        let schema = response_schema();
        let required = &schema["properties"]["recommendations"]["items"]["required"];
        assert_eq!(required, &json!(["career", "reason"]));
    }

    // ==================== Response Parsing Tests ====================

    #[test]
    fn parse_response_extracts_recommendations() {
        let body = response_with_text(
            r#"{"recommendations": [{"career": "Engineer", "reason": "Logical."}]}"#,
        );
        let recs = parse_response(body).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].career, "Engineer");
    }

    #[test]
    fn parse_response_empty_recommendations_is_not_an_error() {
        let body = response_with_text(r#"{"recommendations": []}"#);
        let recs = parse_response(body).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn parse_response_missing_recommendations_field_is_empty_list() {
        let body = response_with_text(r#"{}"#);
        let recs = parse_response(body).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn parse_response_null_recommendations_is_empty_list() {
        let body = response_with_text(r#"{"recommendations": null}"#);
        let recs = parse_response(body).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn parse_response_without_candidates_is_malformed() {
        let body: GenerateResponse = serde_json::from_value(json!({ "candidates": [] })).unwrap();
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn parse_response_with_non_json_text_is_malformed() {
        let body = response_with_text("I refuse to answer in JSON.");
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn parse_response_with_wrong_typed_fields_is_malformed() {
        let body = response_with_text(r#"{"recommendations": [{"career": 42, "reason": []}]}"#);
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    // ==================== Construction Tests ====================

    #[test]
    fn default_config_uses_flash_model() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn generate_without_api_key_fails_fast() {
        let mut backend = GeminiBackend::new(None, GeminiConfig::default());
        let err = backend.generate("prompt").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey));
    }
}
