//! Caller-facing analysis pipelines.
//!
//! Every pipeline is one sequential chain: validate input, render the prompt, call the
//! model once, validate the answer against the modality's output contract. The article
//! pipeline additionally builds its source list. Failures never escape as panics; they
//! come back as an [`AnalysisError`].

use serde::de::DeserializeOwned;
use time::{Date, OffsetDateTime};
use tracing::{info, warn};
use vv_core::domain::{
    ArticleRequest, AudioAuthenticatorInput, AudioAuthenticatorOutput, ImageVerifierInput,
    ImageVerifierOutput, MediaRequest, NewsSleuthInput, NewsSleuthOutput, VideoIntegrityInput,
    VideoIntegrityOutput,
};
use vv_core::error::{AnalysisError, AnalysisErrorKind, AppError};
use vv_core::policy::RealityCheckPolicy;
use vv_core::schema::{
    ContractValidator, OutputContract, OutputRegime, AUDIO_AUTHENTICATOR_OUTPUT,
    IMAGE_VERIFIER_OUTPUT, NEWS_SLEUTH_OUTPUT, VIDEO_INTEGRITY_OUTPUT,
};
use vv_core::validate::{
    validate_audio_input, validate_image_input, validate_news_sleuth_input, validate_video_input,
};

use crate::fetch::ArticleFetcher;
use crate::llm::{Llm, ModelRequest};
use crate::resolve::{build_source_list, UrlResolver};

pub mod prompts;

fn to_analysis_error(kind: AnalysisErrorKind, err: AppError) -> AnalysisError {
    warn!(
        kind = kind.as_str(),
        code = %err.code,
        details = err.details.as_deref().unwrap_or(""),
        "analysis failed"
    );
    AnalysisError::from_app_error(kind, err)
}

/// Article credibility analysis with the default reality-check policy and today's date.
pub fn news_sleuth_analysis(
    llm: &dyn Llm,
    model: &str,
    resolver: &dyn UrlResolver,
    fetcher: Option<&dyn ArticleFetcher>,
    input: &NewsSleuthInput,
) -> Result<NewsSleuthOutput, AnalysisError> {
    news_sleuth_analysis_with_policy(
        llm,
        model,
        resolver,
        fetcher,
        input,
        &RealityCheckPolicy::default(),
        OffsetDateTime::now_utc().date(),
    )
}

pub fn news_sleuth_analysis_with_policy(
    llm: &dyn Llm,
    model: &str,
    resolver: &dyn UrlResolver,
    fetcher: Option<&dyn ArticleFetcher>,
    input: &NewsSleuthInput,
    policy: &RealityCheckPolicy,
    today: Date,
) -> Result<NewsSleuthOutput, AnalysisError> {
    run_news_sleuth(llm, model, resolver, fetcher, input, policy, today)
        .map_err(|e| to_analysis_error(AnalysisErrorKind::ApiExecutionFailed, e))
}

fn run_news_sleuth(
    llm: &dyn Llm,
    model: &str,
    resolver: &dyn UrlResolver,
    fetcher: Option<&dyn ArticleFetcher>,
    input: &NewsSleuthInput,
    policy: &RealityCheckPolicy,
    today: Date,
) -> Result<NewsSleuthOutput, AppError> {
    let mut req = validate_news_sleuth_input(input)?;
    info!(
        modality = "article",
        language = req.language.code(),
        has_text = req.text.is_some(),
        has_url = req.url.is_some(),
        has_headline = req.headline.is_some(),
        "starting analysis"
    );

    if let Some(fetcher) = fetcher {
        fill_text_from_url(fetcher, &mut req);
    }

    let prompt = prompts::news_sleuth_prompt(&req, policy, today);
    let response = llm.generate(model, &ModelRequest::text(prompt).with_web_search(true))?;

    let mut output: NewsSleuthOutput =
        ContractValidator::new(&NEWS_SLEUTH_OUTPUT, OutputRegime::Freeform).parse(&response.text)?;
    policy.check(&output)?;

    output.sources = build_source_list(
        resolver,
        &response.grounding_urls,
        &output.reasoning,
        &output.sources,
    );
    info!(
        modality = "article",
        verdict = output.verdict.as_str(),
        score = output.overall_score,
        sources = output.sources.len(),
        "analysis complete"
    );
    Ok(output)
}

/// Pull the article body when only a URL was given. Failures leave the request as is.
fn fill_text_from_url(fetcher: &dyn ArticleFetcher, req: &mut ArticleRequest) {
    let Some(url) = req.url.as_deref() else {
        return;
    };
    if req.text.is_some() {
        return;
    }
    match fetcher.fetch_article_text(url) {
        Ok(text) if !text.trim().is_empty() => req.text = Some(text),
        Ok(_) => warn!(url, "article page had no text; continuing without it"),
        Err(e) => warn!(url, code = %e.code, "article fetch failed; continuing without it"),
    }
}

fn run_media<T: DeserializeOwned>(
    llm: &dyn Llm,
    model: &str,
    req: &MediaRequest,
    prompt: String,
    contract: &'static OutputContract,
) -> Result<T, AppError> {
    info!(
        modality = req.modality.as_str(),
        language = req.language.code(),
        mime_type = %req.payload.mime_type,
        bytes = req.payload.byte_len,
        sha256 = %req.payload.sha256_hex(),
        "starting analysis"
    );
    let request = ModelRequest::text(prompt)
        .with_media((&req.payload).into())
        .with_response_schema(contract.to_model_schema());
    let response = llm.generate(model, &request)?;
    ContractValidator::new(contract, OutputRegime::Native).parse(&response.text)
}

pub fn image_verifier_analysis(
    llm: &dyn Llm,
    model: &str,
    input: &ImageVerifierInput,
) -> Result<ImageVerifierOutput, AnalysisError> {
    let run = || -> Result<ImageVerifierOutput, AppError> {
        let req = validate_image_input(input)?;
        let out: ImageVerifierOutput = run_media(
            llm,
            model,
            &req,
            prompts::image_verifier_prompt(&req),
            &IMAGE_VERIFIER_OUTPUT,
        )?;
        info!(
            modality = "image",
            verdict = out.verdict.as_str(),
            score = out.confidence_score,
            text_detected = out.text_analysis.is_some(),
            "analysis complete"
        );
        Ok(out)
    };
    run().map_err(|e| to_analysis_error(AnalysisErrorKind::FlowExecutionFailed, e))
}

pub fn audio_authenticator_analysis(
    llm: &dyn Llm,
    model: &str,
    input: &AudioAuthenticatorInput,
) -> Result<AudioAuthenticatorOutput, AnalysisError> {
    let run = || -> Result<AudioAuthenticatorOutput, AppError> {
        let req = validate_audio_input(input)?;
        let out: AudioAuthenticatorOutput = run_media(
            llm,
            model,
            &req,
            prompts::audio_authenticator_prompt(&req),
            &AUDIO_AUTHENTICATOR_OUTPUT,
        )?;
        info!(
            modality = "audio",
            verdict = out.verdict.as_str(),
            score = out.overall_score,
            speech_detected = out.speech.is_some(),
            "analysis complete"
        );
        Ok(out)
    };
    run().map_err(|e| to_analysis_error(AnalysisErrorKind::FlowExecutionFailed, e))
}

pub fn video_integrity_analysis(
    llm: &dyn Llm,
    model: &str,
    input: &VideoIntegrityInput,
) -> Result<VideoIntegrityOutput, AnalysisError> {
    let run = || -> Result<VideoIntegrityOutput, AppError> {
        let req = validate_video_input(input)?;
        let out: VideoIntegrityOutput = run_media(
            llm,
            model,
            &req,
            prompts::video_integrity_prompt(&req),
            &VIDEO_INTEGRITY_OUTPUT,
        )?;
        info!(
            modality = "video",
            verdict = out.analysis.verdict.as_str(),
            score = out.analysis.confidence_score,
            speech_detected = out.analysis.audio_text_analysis.is_some(),
            "analysis complete"
        );
        Ok(out)
    };
    run().map_err(|e| to_analysis_error(AnalysisErrorKind::FlowExecutionFailed, e))
}
