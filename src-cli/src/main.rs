use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;
use vv_ai::service::Veritas;
use vv_core::domain::{
    AudioAuthenticatorInput, ImageVerifierInput, NewsSleuthInput, VideoIntegrityInput,
};
use vv_core::error::{AnalysisError, AppError};

#[derive(Parser, Debug)]
#[command(name = "veritas")]
#[command(author, version, about = "Credibility and authenticity analysis for news, images, audio and video")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// ISO 639-1 code for narrative fields of the report
    #[arg(short, long, global = true, default_value = "en")]
    lang: String,

    /// Print compact JSON instead of pretty JSON
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assess the credibility of a news article
    Article {
        /// Article body text
        #[arg(long, conflicts_with = "text_file")]
        text: Option<String>,

        /// Read the article body from a file
        #[arg(long)]
        text_file: Option<PathBuf>,

        /// Article URL (its text is fetched when no body is given)
        #[arg(long)]
        url: Option<String>,

        /// Article headline
        #[arg(long)]
        headline: Option<String>,
    },

    /// Check an image for AI generation or manipulation
    Image(MediaArgs),

    /// Check an audio clip for synthetic or manipulated speech
    Audio(MediaArgs),

    /// Check a video for deepfakes and manipulation
    Video(MediaArgs),
}

#[derive(clap::Args, Debug)]
struct MediaArgs {
    /// Media file to analyze
    path: PathBuf,

    /// MIME type override (inferred from the file extension otherwise)
    #[arg(long)]
    mime: Option<String>,
}

const MIME_BY_EXTENSION: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("heic", "image/heic"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("flac", "audio/flac"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
];

fn mime_for(path: &Path, explicit: Option<&str>) -> Result<String, AppError> {
    if let Some(m) = explicit {
        return Ok(m.to_string());
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    MIME_BY_EXTENSION
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, m)| m.to_string())
        .ok_or_else(|| {
            AppError::new("INPUT_MIME_UNKNOWN", "Cannot infer MIME type; pass --mime")
                .with_details(format!("path={}", path.display()))
        })
}

fn data_uri(args: &MediaArgs) -> Result<String, AppError> {
    let mime = mime_for(&args.path, args.mime.as_deref())?;
    let bytes = fs::read(&args.path).map_err(|e| {
        AppError::new("INPUT_FILE_UNREADABLE", "Failed to read media file")
            .with_details(format!("path={}; err={e}", args.path.display()))
    })?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Outcome of one command: a report, a typed analysis failure, or a local failure that
/// happened before the pipeline ran.
enum Outcome {
    Report(serde_json::Value),
    Failed(AnalysisError),
}

fn to_report<T: Serialize>(r: Result<T, AnalysisError>) -> Result<Outcome, AppError> {
    match r {
        Ok(v) => serde_json::to_value(v).map(Outcome::Report).map_err(|e| {
            AppError::new("OUTPUT_ENCODE_FAILED", "Failed to encode report")
                .with_details(e.to_string())
        }),
        Err(e) => Ok(Outcome::Failed(e)),
    }
}

fn run(veritas: &Veritas, args: &Args) -> Result<Outcome, AppError> {
    let language = args.lang.clone();
    match &args.command {
        Command::Article {
            text,
            text_file,
            url,
            headline,
        } => {
            let article_text = match text_file {
                Some(p) => Some(fs::read_to_string(p).map_err(|e| {
                    AppError::new("INPUT_FILE_UNREADABLE", "Failed to read article text")
                        .with_details(format!("path={}; err={e}", p.display()))
                })?),
                None => text.clone(),
            };
            to_report(veritas.news_sleuth(&NewsSleuthInput {
                article_text,
                article_url: url.clone(),
                article_headline: headline.clone(),
                language,
            }))
        }
        Command::Image(m) => to_report(veritas.image_verifier(&ImageVerifierInput {
            image_data_uri: data_uri(m)?,
            language,
        })),
        Command::Audio(m) => to_report(veritas.audio_authenticator(&AudioAuthenticatorInput {
            audio_data_uri: data_uri(m)?,
            language,
        })),
        Command::Video(m) => to_report(veritas.video_integrity(&VideoIntegrityInput {
            video_data_uri: data_uri(m)?,
            language,
        })),
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    match rendered {
        Ok(s) => println!("{s}"),
        Err(e) => error!(err = %e, "failed to render output"),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Missing credentials are a startup failure, not a per-request one.
    let veritas = match Veritas::from_env() {
        Ok(v) => v,
        Err(e) => {
            error!(code = %e.code, "{}", e.message);
            print_json(&e, args.compact);
            return ExitCode::from(2);
        }
    };

    match run(&veritas, &args) {
        Ok(Outcome::Report(v)) => {
            print_json(&v, args.compact);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Failed(e)) => {
            print_json(&e, args.compact);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(code = %e.code, "{}", e.message);
            print_json(&e, args.compact);
            ExitCode::FAILURE
        }
    }
}
