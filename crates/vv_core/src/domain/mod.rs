use serde::{Deserialize, Deserializer, Serialize};

mod language;
mod media;

pub use language::Language;
pub use media::MediaPayload;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Article,
    Image,
    Audio,
    Video,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Article => "article",
            Modality::Image => "image",
            Modality::Audio => "audio",
            Modality::Video => "video",
        }
    }

    /// Top-level MIME family a media payload must belong to. Articles carry no media.
    pub fn mime_family(&self) -> Option<&'static str> {
        match self {
            Modality::Article => None,
            Modality::Image => Some("image"),
            Modality::Audio => Some("audio"),
            Modality::Video => Some("video"),
        }
    }
}

// ---------------------------------------------------------------------------
// Caller-facing inputs (wire shape). Validation turns these into the typed
// requests below; see `crate::validate`.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsSleuthInput {
    pub article_text: Option<String>,
    pub article_url: Option<String>,
    pub article_headline: Option<String>,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageVerifierInput {
    pub image_data_uri: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AudioAuthenticatorInput {
    pub audio_data_uri: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoIntegrityInput {
    pub video_data_uri: String,
    pub language: String,
}

/// Validated article request. At least one of the three content fields is `Some` and
/// non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRequest {
    pub text: Option<String>,
    pub url: Option<String>,
    pub headline: Option<String>,
    pub language: Language,
}

/// Validated media request (image, audio or video).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub modality: Modality,
    pub payload: MediaPayload,
    pub language: Language,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

macro_rules! closed_vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($label),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

closed_vocabulary!(
    /// Final judgment on a news article.
    ArticleVerdict {
        LikelyReal => "Likely Real",
        LikelyFake => "Likely Fake",
        Uncertain => "Uncertain",
        Propaganda => "Propaganda/Disinformation",
        SatireParody => "Satire/Parody",
        SponsoredContent => "Sponsored Content",
        OpinionAnalysis => "Opinion/Analysis",
    }
);

closed_vocabulary!(
    /// The model's classification of the article's substantive premise.
    PremiseCheck {
        Factual => "Factual",
        MetadataDiscrepancy => "Metadata Discrepancy",
        HypotheticalOrFalse => "Hypothetical/Non-Factual",
        Unverifiable => "Unverifiable",
    }
);

closed_vocabulary!(
    ImageVerdict {
        LikelyAuthentic => "Likely Authentic",
        LikelyAiOrManipulated => "Likely AI-Generated/Manipulated",
        Uncertain => "Uncertain",
    }
);

closed_vocabulary!(
    AudioVerdict {
        LikelyAuthentic => "Likely Authentic",
        PotentialAiOrManipulation => "Potential AI/Manipulation",
        Uncertain => "Uncertain",
    }
);

closed_vocabulary!(
    VideoVerdict {
        LikelyAuthentic => "Likely Authentic",
        LikelyManipulatedOrAi => "Likely Manipulated/AI-Generated",
        Uncertain => "Uncertain",
    }
);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsSleuthOutput {
    pub overall_score: f64,
    pub verdict: ArticleVerdict,
    pub premise_check: PremiseCheck,
    pub summary: String,
    pub biases: String,
    pub flagged_content: Vec<String>,
    pub reasoning: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Text (or transcribed speech) found inside a media item, plus its credibility analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub detected_text: String,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageVerifierOutput {
    pub verdict: ImageVerdict,
    pub confidence_score: f64,
    pub is_ai_generated: bool,
    pub is_manipulated: bool,
    pub is_misleading_context: bool,
    pub context: String,
    pub report: String,
    #[serde(
        default,
        deserialize_with = "detected_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_analysis: Option<TextAnalysis>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpeechAnalysis {
    pub detected_text: String,
    pub speech_analysis: String,
}

/// Audio result. On the wire speech is two nullable fields (`detectedText`,
/// `speechAnalysis`); in Rust it is one optional value so "no speech" cannot be confused
/// with "speech with empty transcript".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "AudioWire", into = "AudioWire")]
pub struct AudioAuthenticatorOutput {
    pub overall_score: f64,
    pub verdict: AudioVerdict,
    pub summary: String,
    pub reasoning: String,
    pub speech: Option<SpeechAnalysis>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AudioWire {
    overall_score: f64,
    verdict: AudioVerdict,
    summary: String,
    reasoning: String,
    #[serde(default)]
    detected_text: Option<String>,
    #[serde(default)]
    speech_analysis: Option<String>,
}

impl TryFrom<AudioWire> for AudioAuthenticatorOutput {
    type Error = String;

    fn try_from(w: AudioWire) -> Result<Self, Self::Error> {
        let speech = match (non_blank(w.detected_text), non_blank(w.speech_analysis)) {
            (Some(detected_text), Some(speech_analysis)) => Some(SpeechAnalysis {
                detected_text,
                speech_analysis,
            }),
            (None, None) => None,
            // A transcript without analysis (or the reverse) is a half-filled placeholder.
            (Some(_), None) => {
                return Err("detectedText is present but speechAnalysis is null".to_string())
            }
            (None, Some(_)) => {
                return Err("speechAnalysis is present but detectedText is null".to_string())
            }
        };
        Ok(Self {
            overall_score: w.overall_score,
            verdict: w.verdict,
            summary: w.summary,
            reasoning: w.reasoning,
            speech,
        })
    }
}

impl From<AudioAuthenticatorOutput> for AudioWire {
    fn from(o: AudioAuthenticatorOutput) -> Self {
        let (detected_text, speech_analysis) = match o.speech {
            Some(s) => (Some(s.detected_text), Some(s.speech_analysis)),
            None => (None, None),
        };
        Self {
            overall_score: o.overall_score,
            verdict: o.verdict,
            summary: o.summary,
            reasoning: o.reasoning,
            detected_text,
            speech_analysis,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoIntegrityAnalysis {
    pub confidence_score: f64,
    pub verdict: VideoVerdict,
    pub summary: String,
    pub deepfake: bool,
    pub video_manipulation: bool,
    pub synthetic_voice: bool,
    pub fully_ai_generated: bool,
    pub satire_parody: bool,
    pub misleading_context: bool,
    #[serde(
        default,
        deserialize_with = "detected_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub audio_text_analysis: Option<TextAnalysis>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoIntegrityOutput {
    pub analysis: VideoIntegrityAnalysis,
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// A text sub-object with a blank `detectedText` means nothing was detected.
fn detected_or_absent<'de, D>(deserializer: D) -> Result<Option<TextAnalysis>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<TextAnalysis> = Option::deserialize(deserializer)?;
    Ok(v.filter(|t| !t.detected_text.trim().is_empty()))
}
