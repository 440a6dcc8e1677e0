use url::Url;

use crate::domain::{
    ArticleRequest, AudioAuthenticatorInput, ImageVerifierInput, Language, MediaPayload,
    MediaRequest, Modality, NewsSleuthInput, VideoIntegrityInput,
};
use crate::error::AppError;

fn present(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Absolute `http`/`https` URL check shared by request validation and source cleanup.
pub fn is_absolute_web_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host_str().is_some(),
        Err(_) => false,
    }
}

/// Validate an article request: at least one of text, URL or headline, and a valid language.
pub fn validate_news_sleuth_input(input: &NewsSleuthInput) -> Result<ArticleRequest, AppError> {
    let language = Language::parse(&input.language)?;
    let text = present(&input.article_text);
    let url = present(&input.article_url);
    let headline = present(&input.article_headline);

    if text.is_none() && url.is_none() && headline.is_none() {
        return Err(AppError::new(
            "INPUT_ARTICLE_EMPTY",
            "One of article text, URL, or headline must be provided.",
        ));
    }
    if let Some(u) = url.as_deref() {
        if !is_absolute_web_url(u) {
            return Err(AppError::new(
                "INPUT_ARTICLE_URL_INVALID",
                "articleUrl must be an absolute http(s) URL",
            )
            .with_details(format!("articleUrl={u}")));
        }
    }

    Ok(ArticleRequest {
        text,
        url,
        headline,
        language,
    })
}

/// Validate a media request: well-formed base64 data URI of the modality's MIME family.
pub fn validate_media_input(
    modality: Modality,
    data_uri: &str,
    language: &str,
) -> Result<MediaRequest, AppError> {
    let Some(family) = modality.mime_family() else {
        return Err(AppError::new(
            "INPUT_MODALITY_INVALID",
            "article requests do not carry media",
        ));
    };
    let language = Language::parse(language)?;
    let payload = MediaPayload::from_data_uri(data_uri)?;
    if payload.mime_family() != family {
        return Err(AppError::new(
            "INPUT_MEDIA_TYPE_MISMATCH",
            format!("{} analysis requires a {family}/* data URI", modality.as_str()),
        )
        .with_details(format!("mime_type={}", payload.mime_type)));
    }
    Ok(MediaRequest {
        modality,
        payload,
        language,
    })
}

pub fn validate_image_input(input: &ImageVerifierInput) -> Result<MediaRequest, AppError> {
    validate_media_input(Modality::Image, &input.image_data_uri, &input.language)
}

pub fn validate_audio_input(input: &AudioAuthenticatorInput) -> Result<MediaRequest, AppError> {
    validate_media_input(Modality::Audio, &input.audio_data_uri, &input.language)
}

pub fn validate_video_input(input: &VideoIntegrityInput) -> Result<MediaRequest, AppError> {
    validate_media_input(Modality::Video, &input.video_data_uri, &input.language)
}
