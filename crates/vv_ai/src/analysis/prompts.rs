use time::Date;
use vv_core::domain::{ArticleRequest, Language, MediaRequest};
use vv_core::policy::RealityCheckPolicy;
use vv_core::schema::NEWS_SLEUTH_OUTPUT;

fn quoted_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|s| format!("'{s}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Narrative fields follow the caller's language; categorical and verbatim fields never do.
fn language_directive(language: &Language, narrative: &[&str], verbatim: &[&str]) -> String {
    format!(
        "CRITICAL LANGUAGE RULE: Write every narrative field ({narrative}) in {label}. \
Do NOT translate the following fields; keep them exactly as specified by the schema or as \
found in the source material: {verbatim}.",
        narrative = quoted_list(narrative),
        label = language.prompt_label(),
        verbatim = quoted_list(verbatim),
    )
}

fn article_info(req: &ArticleRequest) -> String {
    let mut info = String::new();
    if let Some(text) = req.text.as_deref() {
        info.push_str(&format!("Full Text: {text}\n"));
    }
    if let Some(headline) = req.headline.as_deref() {
        info.push_str(&format!("Headline: {headline}\n"));
    }
    if let Some(url) = req.url.as_deref() {
        info.push_str(&format!("URL: {url}\n"));
    }
    info
}

/// Article credibility prompt. The answer is freeform text containing one JSON object,
/// so the output contract is embedded as JSON Schema.
pub fn news_sleuth_prompt(
    req: &ArticleRequest,
    policy: &RealityCheckPolicy,
    today: Date,
) -> String {
    let ceiling = policy.score_ceiling;
    let allowed = quoted_list(&policy.constrained_labels());
    let schema = NEWS_SLEUTH_OUTPUT.to_json_schema().to_string();
    let language = language_directive(
        &req.language,
        &["summary", "biases", "flaggedContent", "reasoning"],
        &["verdict", "premiseCheck", "overallScore", "sources"],
    );
    let info = article_info(req);

    format!(
        r#"You are a world-class investigative journalist and fact-checker. Assess the credibility of the article below against real-world facts as of today, {today} (UTC).

REALITY CHECK (highest priority):
Decide first whether the article's SUBSTANTIVE claims describe events that are set in the future, are hypothetical, or rest on factually false premises. Judge the claims themselves, not the metadata around them.
- If they do, set 'premiseCheck' to 'Hypothetical/Non-Factual' and:
  1) 'verdict' MUST be one of {allowed}. It can NEVER be 'Likely Real'.
  2) 'overallScore' MUST be below {ceiling}.
  3) 'flaggedContent' MUST contain an entry stating that the article is based on a hypothetical or non-factual premise, naming that premise.
  4) 'reasoning' MUST state clearly that the core premise is not true in present reality.
- EXCEPTION: a metadata-only error (for example a publication date that is slightly off, near but not far in the past or future) is NOT a hypothetical premise. If the substantive claims are verifiable, set 'premiseCheck' to 'Metadata Discrepancy', note the discrepancy in 'flaggedContent', and judge the verdict on the substantive claims alone.
- Use 'Factual' when the substantive claims check out and 'Unverifiable' when you found no evidence either way.

ANALYSIS WORKFLOW:
1) You MUST use the Google Search tool to find corroborating or contradicting sources.
2) If an article URL is provided, your first search MUST be that URL. Otherwise search for the key claims.
3) In 'reasoning', you MUST cite the specific URLs of the sources you found.
4) In 'sources', you MUST list every URL you referenced. Use an empty array if there were none.
5) Identify biases (political, commercial, other), sensationalism and logical fallacies.

{language}

OUTPUT FORMAT:
Your entire response MUST be a single valid JSON object that adheres to this JSON Schema. Do not add any other text, explanations, or markdown code fences.
JSON Schema: {schema}

Article Info:
{info}"#
    )
}

/// Image forensics prompt; the image travels as inline data next to this text.
pub fn image_verifier_prompt(req: &MediaRequest) -> String {
    let language = language_directive(
        &req.language,
        &["report", "context", "textAnalysis.analysis"],
        &["verdict", "confidenceScore", "textAnalysis.detectedText"],
    );
    let mime = &req.payload.mime_type;

    format!(
        r#"You are a multi-disciplinary digital forensics expert who combines the skills of an image analyst and a fake-news investigator.

Perform a two-part analysis of the attached image ({mime}).

{language}

PART 1: IMAGE FORENSICS
Decide whether the image is authentic, AI-generated, or digitally manipulated. Examine:
- Unnatural textures or details (skin, hair, backgrounds).
- Inconsistent lighting, shadows, or reflections.
- Anatomical impossibilities (extra fingers, impossible proportions).
- Warping, cloning, or compression artifacts around edited regions.
When the evidence is ambiguous, lean toward 'Likely AI-Generated/Manipulated' or 'Uncertain' rather than 'Likely Authentic'. A false alarm is preferable to a missed fake.
Then:
1) Choose 'verdict': 'Likely Authentic', 'Likely AI-Generated/Manipulated', or 'Uncertain'.
2) Give 'confidenceScore' (0-100) for that verdict.
3) Set 'isAiGenerated' and 'isManipulated' explicitly.
4) Use your knowledge and reverse-image-search ability to describe what the image depicts in 'context', or state that no context could be found.
5) Decide whether the image could be used misleadingly (an old photo presented as new, a different location, a different event) and set 'isMisleadingContext'.
6) Justify every finding in 'report'.

PART 2: TEXT ANALYSIS (ONLY IF TEXT IS PRESENT)
First check whether the image contains significant text (a headline, a sign, a social media post).
- If it does NOT, omit 'textAnalysis' from your output entirely. Do not send empty strings or placeholders.
- If it does:
  a) Put the exact extracted text in 'textAnalysis.detectedText'.
  b) Act as a fake-news analyst: is it a known fake headline? Does it use sensational language, logical fallacies, or misinformation?
  c) Put your findings in 'textAnalysis.analysis', explaining why the text may be authentic, fake, or misleading.
"#
    )
}

/// Audio forensics prompt; the clip travels as inline data next to this text.
pub fn audio_authenticator_prompt(req: &MediaRequest) -> String {
    let language = language_directive(
        &req.language,
        &["summary", "reasoning", "speechAnalysis"],
        &["verdict", "overallScore", "detectedText"],
    );
    let mime = &req.payload.mime_type;

    format!(
        r#"You are a digital forensics expert with a vigilant focus on advanced AI-generated and manipulated audio (including output from state-of-the-art voice cloning platforms), and a second, equally critical specialty in misinformation detection.

Perform a two-part analysis of the attached audio clip ({mime}).

{language}

PART 1: AUDIO FORENSICS (AUTHENTICITY)
Prefer false positives over false negatives: if you detect ANY subtle sign of synthesis or manipulation, the verdict MUST be 'Potential AI/Manipulation'.
- 'overallScore': confidence (0-100) in the audio's authenticity; lower means more suspicious.
- 'verdict': 'Likely Authentic', 'Potential AI/Manipulation', or 'Uncertain'.
- 'summary': one concise sentence with your primary technical finding and the core reason for the verdict.
- 'reasoning': detailed, granular reasoning. You MUST address every criterion below with concrete observations:
  1) Background noise / room tone: unnatural absence of variation, repeating loops, overly clean or consistent room tone, noise that sounds added or over-processed.
  2) Speaker tone and prosody: robotic tendencies, overly perfect or inconsistent emotional inflection, unnatural emphasis, missing human imperfections (breaths, slight pitch drift, vocal fry, throat clearing).
  3) Cadence and pacing: unnaturally even rhythm, overly precise pauses, timing without human spontaneity, speech that sounds stitched together.
  4) Frequency spectrum and audio fingerprinting: unusual frequency cutoffs, overly smooth or flat spectral profiles, repeating spectral patterns, missing harmonic richness of natural speech.
  5) Overall cohesion and "too perfect" syndrome: say explicitly whether the audio is unnaturally clean compared with a genuine recording of similar content, and point to missing organic imperfections.

PART 2: SPEECH ANALYSIS (ONLY IF SPEECH IS PRESENT)
Listen for discernible speech.
- If there is NO speech (music, noise, or silence), set BOTH 'detectedText' and 'speechAnalysis' to null. Never use empty strings.
- If there is speech:
  a) 'detectedText': the full, precise transcription.
  b) 'speechAnalysis': act as a misinformation analyst. If the content is misleading, explain what is misleading, why, and how it could manipulate perception (song lyrics quoted as a real statement, satire presented as fact, statements taken out of context). If it is neutral or factual, answer "There are no immediately misleading contexts in the transcript, but the content discusses..." followed by a brief objective summary of the topic.
"#
    )
}

/// Video forensics prompt; the video travels as inline data next to this text.
pub fn video_integrity_prompt(req: &MediaRequest) -> String {
    let language = language_directive(
        &req.language,
        &["analysis.summary", "analysis.audioTextAnalysis.analysis"],
        &[
            "analysis.verdict",
            "analysis.confidenceScore",
            "all boolean fields",
            "analysis.audioTextAnalysis.detectedText",
        ],
    );
    let mime = &req.payload.mime_type;

    format!(
        r#"You are a multi-disciplinary digital forensics expert combining video analysis with audio and text investigation.

Perform a two-part analysis of the attached video ({mime}). Put all findings under 'analysis'.

{language}

PART 1: VISUAL AND AUDIO FORENSICS
Determine whether the video is a deepfake, manipulated, fully AI-generated, satire/parody, carries a synthetic voice, or is presented in a misleading context. When the evidence is ambiguous, lean toward flagging the video as suspicious; a false alarm is preferable to a missed fake.
Visual analysis:
- Visual artifacts, unnatural movement, inconsistent lighting, face or lip-sync warping, and other signs of manipulation.
Audio analysis (critical for synthetic voice detection):
- Cadence and intonation: is the speech unnatural, too perfect, or missing normal human emotion?
- Background noise: is the audio unnaturally sterile, missing the ambient sound of a real recording?
- Digital artifacts: robotic tones, distortions, or unusual frequencies.
- Breathing and pauses: are breaths missing or unnatural?
Contextual analysis:
- Use your knowledge to decide whether the video is presented in a misleading context (wrong time or place).
Then:
1) Set 'deepfake', 'videoManipulation', 'syntheticVoice', 'fullyAiGenerated', 'satireParody' and 'misleadingContext'.
2) Choose 'verdict': 'Likely Authentic', 'Likely Manipulated/AI-Generated', or 'Uncertain'.
3) Give 'confidenceScore' (0-100) reflecting how certain you are of your findings, whether the video is real or fake.
4) Write a short 'summary' that is consistent with the flags (if 'syntheticVoice' is true, do not describe the audio as natural-sounding).

PART 2: SPOKEN TEXT ANALYSIS (ONLY IF SPEECH IS PRESENT)
Listen to the audio track for discernible speech.
- If there is NO speech, omit 'audioTextAnalysis' entirely. Do not send empty strings or placeholders.
- If there is speech:
  a) Put the full transcription in 'audioTextAnalysis.detectedText'.
  b) Act as a fake-news analyst: does it contain misinformation, conspiracy theories, or manipulative language?
  c) Put your findings in 'audioTextAnalysis.analysis', explaining why the spoken content may be credible, fake, or misleading.
"#
    )
}
