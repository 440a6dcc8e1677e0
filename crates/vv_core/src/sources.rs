use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::validate::is_absolute_web_url;

/// Grounding redirect gateway used by the search tool's citations.
pub const GROUNDING_REDIRECT_PREFIX: &str =
    "https://vertexaisearch.cloud.google.com/grounding-api-redirect/";

const SHORTENER_HOSTS: &[&str] = &[
    "bit.ly",
    "buff.ly",
    "goo.gl",
    "ow.ly",
    "t.co",
    "tinyurl.com",
];

/// True when the URL only points at another URL and should be resolved.
pub fn is_redirect_gateway(url: &str) -> bool {
    if url.starts_with(GROUNDING_REDIRECT_PREFIX) {
        return true;
    }
    match Url::parse(url) {
        Ok(u) => u
            .host_str()
            .map(|h| h.trim_start_matches("www."))
            .is_some_and(|h| SHORTENER_HOSTS.contains(&h)),
        Err(_) => false,
    }
}

fn url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://[^\s)]+").expect("url pattern compiles"))
}

/// URL-shaped substrings of narrative text, in order of appearance, without duplicates.
/// Trailing sentence punctuation is not part of the URL.
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for m in url_pattern().find_iter(text) {
        let url = m
            .as_str()
            .trim_end_matches(['.', ',', ';', ':', '!', '?', '\'', '"', ']']);
        if seen.insert(url) {
            out.push(url.to_string());
        }
    }
    out
}

/// Candidate URLs before redirect resolution.
///
/// Grounding citations come first; the reasoning text is scanned only when the model
/// returned no grounding citations. URLs the model listed itself are always appended.
pub fn collect_candidates(
    grounding_urls: &[String],
    reasoning: &str,
    model_sources: &[String],
) -> Vec<String> {
    let mut out: Vec<String> = grounding_urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect();
    if out.is_empty() {
        out = extract_urls(reasoning);
    }
    out.extend(
        model_sources
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string),
    );
    out
}

/// Final source list: absolute web URLs only, exact-match deduplicated, first-seen order.
pub fn finalize_sources<I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|u| {
            let keep = is_absolute_web_url(u);
            if !keep {
                debug!(url = %u, "dropping non-absolute source");
            }
            keep
        })
        .filter(|u| seen.insert(u.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_gateways_and_shorteners() {
        assert!(is_redirect_gateway(
            "https://vertexaisearch.cloud.google.com/grounding-api-redirect/AbC123"
        ));
        assert!(is_redirect_gateway("https://bit.ly/3xyz"));
        assert!(is_redirect_gateway("http://www.tinyurl.com/abc"));
        assert!(!is_redirect_gateway("https://www.reuters.com/world/"));
        assert!(!is_redirect_gateway("not a url"));
    }

    #[test]
    fn trims_sentence_punctuation() {
        let urls = extract_urls("See https://a.example/x. Also (https://b.example/y), done");
        assert_eq!(urls, vec!["https://a.example/x", "https://b.example/y"]);
    }
}
