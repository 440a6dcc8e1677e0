use super::{FieldKind, FieldSpec, OutputContract};
use crate::domain::{ArticleVerdict, AudioVerdict, ImageVerdict, PremiseCheck, VideoVerdict};

const SCORE: FieldKind = FieldKind::Number {
    min: 0.0,
    max: 100.0,
};

pub static NEWS_SLEUTH_OUTPUT: OutputContract = OutputContract {
    name: "news_sleuth",
    fields: &[
        FieldSpec {
            name: "overallScore",
            kind: SCORE,
            required: true,
            description: "A credibility score from 0 to 100. Must respect the REALITY CHECK ceiling when the premise is hypothetical or non-factual.",
        },
        FieldSpec {
            name: "verdict",
            kind: FieldKind::Enum(ArticleVerdict::VALUES),
            required: true,
            description: "The final judgment. Restricted by the REALITY CHECK rules when the core premise is not factually true in the present.",
        },
        FieldSpec {
            name: "premiseCheck",
            kind: FieldKind::Enum(PremiseCheck::VALUES),
            required: true,
            description: "Classification of the article's substantive claims: 'Hypothetical/Non-Factual' for future-dated, hypothetical or false premises; 'Metadata Discrepancy' when only metadata such as the publish date is off; 'Unverifiable' when no evidence either way was found.",
        },
        FieldSpec {
            name: "summary",
            kind: FieldKind::String,
            required: true,
            description: "A brief summary of the article's main points.",
        },
        FieldSpec {
            name: "biases",
            kind: FieldKind::String,
            required: true,
            description: "An analysis of any detected biases (e.g., political, commercial).",
        },
        FieldSpec {
            name: "flaggedContent",
            kind: FieldKind::StringArray,
            required: true,
            description: "A list of specific issues found. MUST include a note if the article is based on a hypothetical or future event.",
        },
        FieldSpec {
            name: "reasoning",
            kind: FieldKind::String,
            required: true,
            description: "The reasoning behind the overall verdict and score. You MUST cite the specific URLs of the sources you find via the search tool within this field.",
        },
        FieldSpec {
            name: "sources",
            kind: FieldKind::StringArray,
            required: false,
            description: "A list of all URLs to sources you checked and cited for credibility analysis. If no sources were found or used, return an empty array.",
        },
    ],
};

const TEXT_ANALYSIS_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "detectedText",
        kind: FieldKind::String,
        required: true,
        description: "The exact text extracted from the image.",
    },
    FieldSpec {
        name: "analysis",
        kind: FieldKind::String,
        required: true,
        description: "A detailed report of your findings about the text.",
    },
];

pub static IMAGE_VERIFIER_OUTPUT: OutputContract = OutputContract {
    name: "image_verifier",
    fields: &[
        FieldSpec {
            name: "verdict",
            kind: FieldKind::Enum(ImageVerdict::VALUES),
            required: true,
            description: "The final judgment on the image's authenticity.",
        },
        FieldSpec {
            name: "confidenceScore",
            kind: SCORE,
            required: true,
            description: "A score from 0-100 indicating the confidence in the verdict.",
        },
        FieldSpec {
            name: "isAiGenerated",
            kind: FieldKind::Boolean,
            required: true,
            description: "Set to true if the image is likely AI-generated.",
        },
        FieldSpec {
            name: "isManipulated",
            kind: FieldKind::Boolean,
            required: true,
            description: "Set to true if the image is likely digitally manipulated.",
        },
        FieldSpec {
            name: "isMisleadingContext",
            kind: FieldKind::Boolean,
            required: true,
            description: "Set to true if the image is presented in a misleading context.",
        },
        FieldSpec {
            name: "context",
            kind: FieldKind::String,
            required: true,
            description: "Context about the image, if found.",
        },
        FieldSpec {
            name: "report",
            kind: FieldKind::String,
            required: true,
            description: "A detailed report justifying the forensics verdict.",
        },
        FieldSpec {
            name: "textAnalysis",
            kind: FieldKind::Object(TEXT_ANALYSIS_FIELDS),
            required: false,
            description: "Analysis of any text detected in the image. Omit entirely when the image contains no significant text.",
        },
    ],
};

pub static AUDIO_AUTHENTICATOR_OUTPUT: OutputContract = OutputContract {
    name: "audio_authenticator",
    fields: &[
        FieldSpec {
            name: "overallScore",
            kind: SCORE,
            required: true,
            description: "A confidence score (0-100) on the audio's authenticity.",
        },
        FieldSpec {
            name: "verdict",
            kind: FieldKind::Enum(AudioVerdict::VALUES),
            required: true,
            description: "Your definitive final judgment.",
        },
        FieldSpec {
            name: "summary",
            kind: FieldKind::String,
            required: true,
            description: "A concise, single-sentence summary of your primary technical findings and the core reason for your verdict.",
        },
        FieldSpec {
            name: "reasoning",
            kind: FieldKind::String,
            required: true,
            description: "Detailed, granular reasoning behind your technical verdict, analyzing criteria like background noise, speaker tone, cadence, and frequency spectrum.",
        },
        FieldSpec {
            name: "detectedText",
            kind: FieldKind::NullableString,
            required: true,
            description: "The full, precise transcription of the speech. If no speech is detected, this is null.",
        },
        FieldSpec {
            name: "speechAnalysis",
            kind: FieldKind::NullableString,
            required: true,
            description: "Scrutiny of the transcribed text for misleading content. If no speech is detected, this is null.",
        },
    ],
};

const AUDIO_TEXT_ANALYSIS_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "detectedText",
        kind: FieldKind::String,
        required: true,
        description: "The full transcription of the speech.",
    },
    FieldSpec {
        name: "analysis",
        kind: FieldKind::String,
        required: true,
        description: "A detailed report of your findings about the spoken content, explaining why it might be credible, fake, or misleading.",
    },
];

const VIDEO_ANALYSIS_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "confidenceScore",
        kind: SCORE,
        required: true,
        description: "A confidence score (0-100) in the video's authenticity.",
    },
    FieldSpec {
        name: "verdict",
        kind: FieldKind::Enum(VideoVerdict::VALUES),
        required: true,
        description: "The final judgment on the video's authenticity.",
    },
    FieldSpec {
        name: "summary",
        kind: FieldKind::String,
        required: true,
        description: "A brief summary of your forensic analysis findings.",
    },
    FieldSpec {
        name: "deepfake",
        kind: FieldKind::Boolean,
        required: true,
        description: "Set to true if deepfake elements are detected, otherwise false.",
    },
    FieldSpec {
        name: "videoManipulation",
        kind: FieldKind::Boolean,
        required: true,
        description: "Set to true if general video manipulations (CGI, edits) are detected, otherwise false.",
    },
    FieldSpec {
        name: "syntheticVoice",
        kind: FieldKind::Boolean,
        required: true,
        description: "Set to true if voice cloning or synthetic speech is detected, otherwise false.",
    },
    FieldSpec {
        name: "fullyAiGenerated",
        kind: FieldKind::Boolean,
        required: true,
        description: "Set to true if the entire video appears to be AI-generated, otherwise false.",
    },
    FieldSpec {
        name: "satireParody",
        kind: FieldKind::Boolean,
        required: true,
        description: "Set to true if the video is likely intended as satire or parody, otherwise false.",
    },
    FieldSpec {
        name: "misleadingContext",
        kind: FieldKind::Boolean,
        required: true,
        description: "Set to true if the video is presented in a misleading context, otherwise false.",
    },
    FieldSpec {
        name: "audioTextAnalysis",
        kind: FieldKind::Object(AUDIO_TEXT_ANALYSIS_FIELDS),
        required: false,
        description: "Analysis of the spoken text. Omit entirely when no speech is detected.",
    },
];

pub static VIDEO_INTEGRITY_OUTPUT: OutputContract = OutputContract {
    name: "video_integrity",
    fields: &[FieldSpec {
        name: "analysis",
        kind: FieldKind::Object(VIDEO_ANALYSIS_FIELDS),
        required: true,
        description: "The forensic analysis of the video.",
    }],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_contract_carries_a_closed_verdict() {
        for c in [&NEWS_SLEUTH_OUTPUT, &IMAGE_VERIFIER_OUTPUT, &AUDIO_AUTHENTICATOR_OUTPUT] {
            assert!(matches!(
                c.field("verdict").map(|f| f.kind),
                Some(FieldKind::Enum(_))
            ));
        }
        let Some(FieldKind::Object(inner)) =
            VIDEO_INTEGRITY_OUTPUT.field("analysis").map(|f| f.kind)
        else {
            panic!("video analysis must be an object");
        };
        assert!(inner
            .iter()
            .any(|f| f.name == "verdict" && matches!(f.kind, FieldKind::Enum(_))));
    }

    #[test]
    fn article_descriptions_leave_the_reality_check_to_the_policy() {
        // The prompt renders ceiling and allowed verdicts from a tunable policy.
        for f in NEWS_SLEUTH_OUTPUT.fields {
            for label in ArticleVerdict::VALUES {
                assert!(
                    !f.description.contains(&format!("'{label}'")),
                    "{} description names verdict {label}",
                    f.name
                );
            }
            assert!(!f.description.contains("40"), "{} names a score ceiling", f.name);
        }
    }
}
