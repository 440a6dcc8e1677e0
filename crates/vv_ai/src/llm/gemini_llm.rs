use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vv_core::error::{excerpt, AppError};

use super::{Llm, ModelRequest, ModelResponse};
use crate::gemini::GeminiClient;

#[derive(Debug, Clone)]
pub struct GeminiLlm {
    client: GeminiClient,
}

impl GeminiLlm {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum RequestPart<'a> {
    Text(&'a str),
    InlineData(InlineData<'a>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    // Thought summaries are not part of the answer.
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
    // Older responses carry the same citations under this name.
    #[serde(default)]
    grounding_attributions: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    #[serde(default)]
    uri: Option<String>,
}

fn build_request(request: &ModelRequest) -> GenerateContentRequest<'_> {
    let mut parts = vec![RequestPart::Text(&request.prompt)];
    if let Some(media) = request.media.as_ref() {
        parts.push(RequestPart::InlineData(InlineData {
            mime_type: &media.mime_type,
            data: &media.data_base64,
        }));
    }
    let tools = if request.web_search {
        vec![Tool {
            google_search: serde_json::Map::new(),
        }]
    } else {
        Vec::new()
    };
    let generation_config = request
        .response_schema
        .as_ref()
        .map(|schema| GenerationConfig {
            response_mime_type: "application/json",
            response_schema: schema,
        });
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts,
        }],
        tools,
        generation_config,
    }
}

/// Pull the answer text and grounding citations out of a `generateContent` response.
pub(crate) fn decode_response(resp: GenerateContentResponse) -> Result<ModelResponse, AppError> {
    if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(
            AppError::new("MODEL_RESPONSE_BLOCKED", "The AI model refused the request.")
                .with_details(format!("block_reason={reason}")),
        );
    }
    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(AppError::new(
            "MODEL_RESPONSE_EMPTY",
            "The AI model returned no candidates.",
        ));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();
    if text.trim().is_empty() {
        let mut err = AppError::new(
            "MODEL_RESPONSE_EMPTY",
            "The AI model returned an empty response.",
        );
        if let Some(reason) = candidate.finish_reason {
            err = err.with_details(format!("finish_reason={reason}"));
        }
        return Err(err);
    }

    let grounding_urls = candidate
        .grounding_metadata
        .map(|g| {
            g.grounding_chunks
                .into_iter()
                .chain(g.grounding_attributions)
                .filter_map(|c| c.web.and_then(|w| w.uri))
                .filter(|u| !u.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Ok(ModelResponse {
        text,
        grounding_urls,
    })
}

impl Llm for GeminiLlm {
    fn generate(&self, model: &str, request: &ModelRequest) -> Result<ModelResponse, AppError> {
        let url = self.client.generate_content_url(model);
        let body = serde_json::to_value(build_request(request)).map_err(|e| {
            AppError::new("MODEL_CALL_FAILED", "Failed to encode model request")
                .with_details(e.to_string())
        })?;
        debug!(
            model,
            web_search = request.web_search,
            has_media = request.media.is_some(),
            native_schema = request.response_schema.is_some(),
            "calling generateContent"
        );

        let resp = ureq::post(&url)
            .set("x-goog-api-key", self.client.api_key())
            .timeout(self.client.timeout())
            .send_json(body);

        match resp {
            Ok(r) => {
                let v: GenerateContentResponse = r.into_json().map_err(|e| {
                    AppError::new("MODEL_CALL_FAILED", "Failed to decode model response")
                        .with_details(e.to_string())
                })?;
                decode_response(v)
            }
            Err(ureq::Error::Status(status, r)) => {
                let body = r.into_string().unwrap_or_default();
                warn!(status, "generateContent returned an error status");
                Err(AppError::new("MODEL_CALL_FAILED", "Model request failed")
                    .with_details(format!("status={status}; body={}", excerpt(&body, 500)))
                    .with_retryable(status == 429 || status >= 500))
            }
            Err(e) => Err(
                AppError::new("MODEL_CALL_FAILED", "Failed to reach the model endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
