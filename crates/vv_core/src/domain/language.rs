use std::fmt;

use crate::error::AppError;

/// ISO 639-1 language code used to localize narrative output fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language(String);

const KNOWN: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bn", "Bengali"),
    ("de", "German"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("hi", "Hindi"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("mr", "Marathi"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("ur", "Urdu"),
    ("zh", "Chinese"),
];

impl Language {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let code = raw.trim().to_ascii_lowercase();
        if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(AppError::new(
                "INPUT_LANGUAGE_INVALID",
                "language must be a two-letter ISO 639-1 code",
            )
            .with_details(format!("language={raw:?}")));
        }
        Ok(Self(code))
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn english_name(&self) -> Option<&'static str> {
        KNOWN
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, name)| *name)
    }

    /// Rendering used inside prompts, e.g. `Hindi (hi)` or the bare code when unknown.
    pub fn prompt_label(&self) -> String {
        match self.english_name() {
            Some(name) => format!("{name} ({})", self.0),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Language;

    #[test]
    fn normalizes_case_and_whitespace() {
        let lang = Language::parse(" HI ").expect("parse");
        assert_eq!(lang.code(), "hi");
        assert_eq!(lang.prompt_label(), "Hindi (hi)");
    }

    #[test]
    fn rejects_non_iso_codes() {
        for raw in ["", "e", "eng", "en-US", "1a", "éé"] {
            let err = Language::parse(raw).expect_err(raw);
            assert_eq!(err.code, "INPUT_LANGUAGE_INVALID");
        }
    }

    #[test]
    fn unknown_code_renders_bare() {
        assert_eq!(Language::parse("sw").unwrap().prompt_label(), "sw");
    }
}
