use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Media decoded from a `data:<mime>;base64,<payload>` URI.
///
/// The payload is kept in its Base64 form because that is what the model API accepts
/// inline; `byte_len` is the decoded size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    pub mime_type: String,
    pub data_base64: String,
    pub byte_len: usize,
}

impl MediaPayload {
    pub fn from_data_uri(uri: &str) -> Result<Self, AppError> {
        let invalid = |msg: &str| {
            AppError::new("INPUT_DATA_URI_INVALID", msg.to_string())
                .with_details("expected data:<mimetype>;base64,<encoded_data>")
        };

        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| invalid("data URI must start with 'data:'"))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| invalid("data URI is missing the ',' payload separator"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("data URI must declare ';base64' encoding"))?;
        // Parameters such as `;codecs=opus` may sit between the type and `;base64`.
        let essence = mime_type.split(';').next().unwrap_or_default().trim();
        let Some((family, subtype)) = essence.split_once('/') else {
            return Err(invalid("data URI MIME type must be <type>/<subtype>"));
        };
        if family.is_empty() || subtype.is_empty() {
            return Err(invalid("data URI MIME type must be <type>/<subtype>"));
        }
        if data.is_empty() {
            return Err(AppError::new(
                "INPUT_MEDIA_EMPTY",
                "data URI carries an empty payload",
            ));
        }

        let decoded = STANDARD.decode(data).map_err(|e| {
            AppError::new("INPUT_DATA_URI_INVALID", "data URI payload is not valid base64")
                .with_details(e.to_string())
        })?;
        if decoded.is_empty() {
            return Err(AppError::new(
                "INPUT_MEDIA_EMPTY",
                "data URI carries an empty payload",
            ));
        }

        Ok(Self {
            mime_type: mime_type.to_ascii_lowercase(),
            data_base64: data.to_string(),
            byte_len: decoded.len(),
        })
    }

    /// `image`, `audio`, `video`, ...
    pub fn mime_family(&self) -> &str {
        self.mime_type.split('/').next().unwrap_or_default()
    }

    /// Content fingerprint for logs; media bytes are never logged.
    pub fn sha256_hex(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.data_base64.as_bytes());
        hex::encode(hasher.finalize())
    }
}
