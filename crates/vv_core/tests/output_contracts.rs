use pretty_assertions::assert_eq;
use serde_json::json;
use vv_core::domain::{
    ArticleVerdict, AudioAuthenticatorOutput, AudioVerdict, ImageVerifierOutput,
    NewsSleuthOutput, PremiseCheck, SpeechAnalysis, VideoIntegrityOutput, VideoVerdict,
};
use vv_core::schema::{
    ContractValidator, OutputRegime, AUDIO_AUTHENTICATOR_OUTPUT, IMAGE_VERIFIER_OUTPUT,
    NEWS_SLEUTH_OUTPUT, VIDEO_INTEGRITY_OUTPUT,
};

fn article_json() -> serde_json::Value {
    json!({
        "overallScore": 82,
        "verdict": "Likely Real",
        "premiseCheck": "Factual",
        "summary": "Consistent with wire reports.",
        "biases": "None detected.",
        "flaggedContent": [],
        "reasoning": "Matches two independent outlets.",
        "sources": ["https://wire.example/story"]
    })
}

fn image_json() -> serde_json::Value {
    json!({
        "verdict": "Likely Authentic",
        "confidenceScore": 12,
        "isAiGenerated": false,
        "isManipulated": false,
        "isMisleadingContext": false,
        "context": "Photo of a flooded street.",
        "report": "Lighting and shadows are consistent."
    })
}

fn audio_json() -> serde_json::Value {
    json!({
        "overallScore": 20,
        "verdict": "Likely Authentic",
        "summary": "Natural recording.",
        "reasoning": "Breath sounds and room tone are consistent.",
        "detectedText": null,
        "speechAnalysis": null
    })
}

fn video_json() -> serde_json::Value {
    json!({
        "analysis": {
            "confidenceScore": 91,
            "verdict": "Likely Manipulated/AI-Generated",
            "summary": "Face swap artifacts around the jawline.",
            "deepfake": true,
            "videoManipulation": false,
            "syntheticVoice": false,
            "fullyAiGenerated": false,
            "satireParody": false,
            "misleadingContext": false
        }
    })
}

fn native(contract: &'static vv_core::schema::OutputContract) -> ContractValidator {
    ContractValidator::new(contract, OutputRegime::Native)
}

#[test]
fn valid_outputs_parse_into_typed_results() {
    let article: NewsSleuthOutput = native(&NEWS_SLEUTH_OUTPUT)
        .parse(&article_json().to_string())
        .expect("article");
    assert_eq!(article.verdict, ArticleVerdict::LikelyReal);
    assert_eq!(article.premise_check, PremiseCheck::Factual);
    assert_eq!(article.overall_score, 82.0);

    let image: ImageVerifierOutput = native(&IMAGE_VERIFIER_OUTPUT)
        .parse(&image_json().to_string())
        .expect("image");
    assert_eq!(image.text_analysis, None);

    let audio: AudioAuthenticatorOutput = native(&AUDIO_AUTHENTICATOR_OUTPUT)
        .parse(&audio_json().to_string())
        .expect("audio");
    assert_eq!(audio.verdict, AudioVerdict::LikelyAuthentic);
    assert_eq!(audio.speech, None);

    let video: VideoIntegrityOutput = native(&VIDEO_INTEGRITY_OUTPUT)
        .parse(&video_json().to_string())
        .expect("video");
    assert_eq!(video.analysis.verdict, VideoVerdict::LikelyManipulatedOrAi);
    assert!(video.analysis.deepfake);
    assert_eq!(video.analysis.audio_text_analysis, None);
}

#[test]
fn verdict_outside_vocabulary_is_rejected_for_every_modality() {
    let mut article = article_json();
    article["verdict"] = json!("Probably True");
    let err = native(&NEWS_SLEUTH_OUTPUT)
        .parse::<NewsSleuthOutput>(&article.to_string())
        .expect_err("article verdict");
    assert_eq!(err.code, "MODEL_OUTPUT_CONTRACT_VIOLATION");
    assert!(err.details.unwrap_or_default().contains("$.verdict"));

    let mut image = image_json();
    image["verdict"] = json!("Fake");
    let err = native(&IMAGE_VERIFIER_OUTPUT)
        .parse::<ImageVerifierOutput>(&image.to_string())
        .expect_err("image verdict");
    assert_eq!(err.code, "MODEL_OUTPUT_CONTRACT_VIOLATION");

    let mut audio = audio_json();
    audio["verdict"] = json!("Synthetic");
    let err = native(&AUDIO_AUTHENTICATOR_OUTPUT)
        .parse::<AudioAuthenticatorOutput>(&audio.to_string())
        .expect_err("audio verdict");
    assert_eq!(err.code, "MODEL_OUTPUT_CONTRACT_VIOLATION");

    let mut video = video_json();
    video["analysis"]["verdict"] = json!("Deepfake");
    let err = native(&VIDEO_INTEGRITY_OUTPUT)
        .parse::<VideoIntegrityOutput>(&video.to_string())
        .expect_err("video verdict");
    assert_eq!(err.code, "MODEL_OUTPUT_CONTRACT_VIOLATION");
    assert!(err.details.unwrap_or_default().contains("$.analysis.verdict"));
}

#[test]
fn score_outside_range_is_rejected() {
    let mut article = article_json();
    article["overallScore"] = json!(140);
    let err = native(&NEWS_SLEUTH_OUTPUT)
        .parse::<NewsSleuthOutput>(&article.to_string())
        .expect_err("score");
    assert_eq!(
        err.details.as_deref(),
        Some("$.overallScore: 140 is outside [0, 100]")
    );
}

#[test]
fn wrong_types_and_missing_fields_are_all_reported() {
    let mut image = image_json();
    image["isAiGenerated"] = json!("no");
    image.as_object_mut().expect("object").remove("report");
    let err = native(&IMAGE_VERIFIER_OUTPUT)
        .parse::<ImageVerifierOutput>(&image.to_string())
        .expect_err("types");
    let details = err.details.unwrap_or_default();
    assert!(details.contains("$.isAiGenerated: expected boolean, got string"), "{details}");
    assert!(details.contains("$.report: missing required field"), "{details}");
}

#[test]
fn missing_article_sources_default_to_empty() {
    let mut article = article_json();
    article.as_object_mut().expect("object").remove("sources");
    let out: NewsSleuthOutput = native(&NEWS_SLEUTH_OUTPUT)
        .parse(&article.to_string())
        .expect("no sources");
    assert!(out.sources.is_empty());
}

#[test]
fn detected_text_populates_the_sub_object() {
    let mut image = image_json();
    image["textAnalysis"] = json!({
        "detectedText": "BREAKING: dam bursts",
        "analysis": "Caption contradicts the scene."
    });
    let out: ImageVerifierOutput = native(&IMAGE_VERIFIER_OUTPUT)
        .parse(&image.to_string())
        .expect("text");
    let text = out.text_analysis.expect("present");
    assert_eq!(text.detected_text, "BREAKING: dam bursts");
}

#[test]
fn blank_or_null_text_sub_objects_are_absent() {
    let mut image = image_json();
    image["textAnalysis"] = json!({ "detectedText": "  ", "analysis": "" });
    let out: ImageVerifierOutput = native(&IMAGE_VERIFIER_OUTPUT)
        .parse(&image.to_string())
        .expect("blank text");
    assert_eq!(out.text_analysis, None);
    let rendered = serde_json::to_value(&out).expect("serialize");
    assert!(rendered.get("textAnalysis").is_none());

    let mut video = video_json();
    video["analysis"]["audioTextAnalysis"] = json!(null);
    let out: VideoIntegrityOutput = native(&VIDEO_INTEGRITY_OUTPUT)
        .parse(&video.to_string())
        .expect("null text");
    assert_eq!(out.analysis.audio_text_analysis, None);
}

#[test]
fn audio_speech_pairs_transcript_and_analysis() {
    let mut audio = audio_json();
    audio["detectedText"] = json!("We will open the dam at noon.");
    audio["speechAnalysis"] = json!("Plausible municipal announcement.");
    let out: AudioAuthenticatorOutput = native(&AUDIO_AUTHENTICATOR_OUTPUT)
        .parse(&audio.to_string())
        .expect("speech");
    assert_eq!(
        out.speech,
        Some(SpeechAnalysis {
            detected_text: "We will open the dam at noon.".to_string(),
            speech_analysis: "Plausible municipal announcement.".to_string(),
        })
    );

    // Round trip back to the two nullable wire fields.
    let wire = serde_json::to_value(&out).expect("serialize");
    assert_eq!(wire["detectedText"], json!("We will open the dam at noon."));
    assert_eq!(wire["speechAnalysis"], json!("Plausible municipal announcement."));
}

#[test]
fn audio_without_speech_serializes_nulls() {
    let out: AudioAuthenticatorOutput = native(&AUDIO_AUTHENTICATOR_OUTPUT)
        .parse(&audio_json().to_string())
        .expect("no speech");
    let wire = serde_json::to_value(&out).expect("serialize");
    assert_eq!(wire["detectedText"], json!(null));
    assert_eq!(wire["speechAnalysis"], json!(null));
}

#[test]
fn half_filled_audio_speech_is_rejected() {
    let mut audio = audio_json();
    audio["detectedText"] = json!("Hello");
    let err = native(&AUDIO_AUTHENTICATOR_OUTPUT)
        .parse::<AudioAuthenticatorOutput>(&audio.to_string())
        .expect_err("half pair");
    assert_eq!(err.code, "MODEL_OUTPUT_CONTRACT_VIOLATION");
    assert!(err
        .details
        .unwrap_or_default()
        .contains("speechAnalysis is null"));
}

#[test]
fn native_regime_does_not_repair_prose() {
    let raw = format!("Here you go: {}", image_json());
    let err = native(&IMAGE_VERIFIER_OUTPUT)
        .parse::<ImageVerifierOutput>(&raw)
        .expect_err("prose");
    assert_eq!(err.code, "MODEL_OUTPUT_INVALID_JSON");

    let ok: ImageVerifierOutput =
        ContractValidator::new(&IMAGE_VERIFIER_OUTPUT, OutputRegime::Freeform)
            .parse(&raw)
            .expect("freeform repairs");
    assert_eq!(ok.confidence_score, 12.0);
}
