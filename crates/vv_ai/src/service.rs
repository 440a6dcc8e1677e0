use tracing::info;
use vv_core::domain::{
    AudioAuthenticatorInput, AudioAuthenticatorOutput, ImageVerifierInput, ImageVerifierOutput,
    NewsSleuthInput, NewsSleuthOutput, VideoIntegrityInput, VideoIntegrityOutput,
};
use vv_core::error::{AnalysisError, AppError};

use crate::analysis;
use crate::config::VeritasConfig;
use crate::fetch::HttpArticleFetcher;
use crate::gemini::GeminiClient;
use crate::llm::gemini_llm::GeminiLlm;
use crate::resolve::HttpUrlResolver;

/// Production wiring: Gemini model, HTTP redirect resolver and article fetcher.
///
/// Construction is the startup step; it fails when the configuration is incomplete.
/// The value holds no per-request state and can serve any number of requests.
#[derive(Debug, Clone)]
pub struct Veritas {
    model: String,
    llm: GeminiLlm,
    resolver: HttpUrlResolver,
    fetcher: HttpArticleFetcher,
}

impl Veritas {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_config(&VeritasConfig::from_env()?)
    }

    pub fn from_config(config: &VeritasConfig) -> Result<Self, AppError> {
        let client = GeminiClient::new(&config.api_base, &config.api_key, config.http_timeout)?;
        info!(model = %config.model, api_base = %client.base_url(), "analysis service ready");
        Ok(Self {
            model: config.model.clone(),
            llm: GeminiLlm::new(client),
            resolver: HttpUrlResolver::new(config.http_timeout),
            fetcher: HttpArticleFetcher::new(config.http_timeout),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn news_sleuth(&self, input: &NewsSleuthInput) -> Result<NewsSleuthOutput, AnalysisError> {
        analysis::news_sleuth_analysis(
            &self.llm,
            &self.model,
            &self.resolver,
            Some(&self.fetcher),
            input,
        )
    }

    pub fn image_verifier(
        &self,
        input: &ImageVerifierInput,
    ) -> Result<ImageVerifierOutput, AnalysisError> {
        analysis::image_verifier_analysis(&self.llm, &self.model, input)
    }

    pub fn audio_authenticator(
        &self,
        input: &AudioAuthenticatorInput,
    ) -> Result<AudioAuthenticatorOutput, AnalysisError> {
        analysis::audio_authenticator_analysis(&self.llm, &self.model, input)
    }

    pub fn video_integrity(
        &self,
        input: &VideoIntegrityInput,
    ) -> Result<VideoIntegrityOutput, AnalysisError> {
        analysis::video_integrity_analysis(&self.llm, &self.model, input)
    }
}
