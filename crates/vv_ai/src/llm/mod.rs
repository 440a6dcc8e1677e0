use vv_core::domain::MediaPayload;
use vv_core::error::AppError;

pub mod gemini_llm;

/// Media attached to a model request as inline data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMedia {
    pub mime_type: String,
    pub data_base64: String,
}

impl From<&MediaPayload> for InlineMedia {
    fn from(p: &MediaPayload) -> Self {
        Self {
            mime_type: p.mime_type.clone(),
            data_base64: p.data_base64.clone(),
        }
    }
}

/// One model round trip: prompt, optional inline media, optional native response schema
/// and the web-search tool switch.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub prompt: String,
    pub media: Option<InlineMedia>,
    pub response_schema: Option<serde_json::Value>,
    pub web_search: bool,
}

impl ModelRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            media: None,
            response_schema: None,
            web_search: false,
        }
    }

    pub fn with_media(mut self, media: InlineMedia) -> Self {
        self.media = Some(media);
        self
    }

    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelResponse {
    pub text: String,
    /// Citation URLs from the response's grounding metadata, in response order.
    pub grounding_urls: Vec<String>,
}

/// Remote generative model. Implementations make exactly one call per `generate` and
/// never retry.
pub trait Llm {
    fn generate(&self, model: &str, request: &ModelRequest) -> Result<ModelResponse, AppError>;
}
