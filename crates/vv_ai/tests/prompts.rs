use time::{Date, Month};
use vv_ai::analysis::prompts::{
    audio_authenticator_prompt, image_verifier_prompt, news_sleuth_prompt, video_integrity_prompt,
};
use vv_core::domain::{ArticleVerdict, ImageVerifierInput, Modality, NewsSleuthInput};
use vv_core::policy::RealityCheckPolicy;
use vv_core::validate::{validate_image_input, validate_media_input, validate_news_sleuth_input};

fn article(language: &str) -> vv_core::domain::ArticleRequest {
    validate_news_sleuth_input(&NewsSleuthInput {
        article_text: Some("The bridge collapsed overnight.".to_string()),
        article_url: Some("https://news.example/bridge".to_string()),
        article_headline: Some("Bridge collapses".to_string()),
        language: language.to_string(),
    })
    .unwrap()
}

fn today() -> Date {
    Date::from_calendar_date(2026, Month::October, 19).unwrap()
}

#[test]
fn article_prompt_embeds_date_policy_and_schema() {
    let p = news_sleuth_prompt(&article("en"), &RealityCheckPolicy::default(), today());
    assert!(p.contains("as of today, 2026-10-19 (UTC)"));
    assert!(p.contains("'overallScore' MUST be below 40."));
    assert!(p.contains("MUST be one of 'Likely Fake', 'Satire/Parody', 'Uncertain'."));
    assert!(p.contains("Metadata Discrepancy"));
    assert!(p.contains("\"premiseCheck\""));
    assert!(p.contains("JSON Schema: {"));
    assert!(p.contains("Full Text: The bridge collapsed overnight."));
    assert!(p.contains("Headline: Bridge collapses"));
    assert!(p.contains("URL: https://news.example/bridge"));
    assert!(p.contains("English (en)"));
}

#[test]
fn article_prompt_follows_a_tuned_policy() {
    let policy = RealityCheckPolicy {
        score_ceiling: 25.0,
        constrained_verdicts: vec![ArticleVerdict::LikelyFake],
    };
    let p = news_sleuth_prompt(&article("en"), &policy, today());
    assert!(p.contains("'overallScore' MUST be below 25."));
    assert!(!p.contains("below 40"));
    assert!(p.contains("MUST be one of 'Likely Fake'. It"));
    assert!(!p.contains("'Satire/Parody'"));
}

#[test]
fn language_rule_names_translated_and_verbatim_fields() {
    let p = news_sleuth_prompt(&article("hi"), &RealityCheckPolicy::default(), today());
    assert!(p.contains("CRITICAL LANGUAGE RULE"));
    assert!(p.contains("Hindi (hi)"));
    assert!(p.contains("'reasoning'"));

    let unknown = news_sleuth_prompt(&article("zz"), &RealityCheckPolicy::default(), today());
    assert!(unknown.contains("in zz."));
}

#[test]
fn image_prompt_lists_forensic_criteria() {
    let req = validate_image_input(&ImageVerifierInput {
        image_data_uri: "data:image/webp;base64,UklGRg==".to_string(),
        language: "fr".to_string(),
    })
    .unwrap();
    let p = image_verifier_prompt(&req);
    assert!(p.contains("attached image (image/webp)"));
    assert!(p.contains("Anatomical impossibilities"));
    assert!(p.contains("omit 'textAnalysis' from your output entirely"));
    assert!(p.contains("French (fr)"));
}

#[test]
fn audio_prompt_requires_nulls_without_speech() {
    let req = validate_media_input(
        Modality::Audio,
        "data:audio/ogg;codecs=opus;base64,T2dnUw==",
        "hi",
    )
    .unwrap();
    let p = audio_authenticator_prompt(&req);
    assert!(p.contains(
        "Write every narrative field ('summary', 'reasoning', 'speechAnalysis') in Hindi (hi)."
    ));
    assert!(p.contains("source material: 'verdict', 'overallScore', 'detectedText'."));
    assert!(p.contains("audio/ogg;codecs=opus"));
    assert!(p.contains("set BOTH 'detectedText' and 'speechAnalysis' to null"));
    assert!(p.contains("Frequency spectrum"));
    assert!(p.contains("\"too perfect\" syndrome"));
}

#[test]
fn video_prompt_covers_flags_and_bias() {
    let req =
        validate_media_input(Modality::Video, "data:video/webm;base64,GkXfow==", "en").unwrap();
    let p = video_integrity_prompt(&req);
    for flag in [
        "'deepfake'",
        "'videoManipulation'",
        "'syntheticVoice'",
        "'fullyAiGenerated'",
        "'satireParody'",
        "'misleadingContext'",
    ] {
        assert!(p.contains(flag), "missing {flag}");
    }
    assert!(p.contains("a false alarm is preferable to a missed fake"));
}
