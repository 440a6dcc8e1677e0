use std::time::Duration;

use scraper::{Html, Selector};
use tracing::debug;
use vv_core::error::AppError;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Elements that never carry article text.
const NOISE: &str = "script, style, noscript, .ad, .advert, .sidebar, .footer, .header, .nav, \
.menu, .related-posts, .comments, .social-share, .author-bio, .cookie-notice, .ad-container, \
[class*=\"-ad-\"], [id*=\"-ad-\"]";

/// Tried in order; `body` is the last resort.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".post-content",
    ".entry-content",
    ".article-body",
    "[itemprop=\"articleBody\"]",
    "main[role=\"main\"]",
    "#content",
    "body",
];

/// Fetches a page and returns its main article text.
pub trait ArticleFetcher {
    fn fetch_article_text(&self, url: &str) -> Result<String, AppError>;
}

#[derive(Debug, Clone)]
pub struct HttpArticleFetcher {
    agent: ureq::Agent,
}

impl HttpArticleFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .user_agent(BROWSER_USER_AGENT)
                .build(),
        }
    }
}

impl ArticleFetcher for HttpArticleFetcher {
    fn fetch_article_text(&self, url: &str) -> Result<String, AppError> {
        let resp = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => {
                AppError::new("ARTICLE_FETCH_FAILED", "Article page returned an error status")
                    .with_details(format!("status={status}; url={url}"))
            }
            other => AppError::new("ARTICLE_FETCH_FAILED", "Failed to fetch article page")
                .with_details(other.to_string())
                .with_retryable(true),
        })?;
        let html = resp.into_string().map_err(|e| {
            AppError::new("ARTICLE_FETCH_FAILED", "Failed to read article page")
                .with_details(e.to_string())
        })?;
        debug!(url, bytes = html.len(), "fetched article page");

        extract_article_text(&html).ok_or_else(|| {
            AppError::new("ARTICLE_NO_CONTENT", "Could not find main article content")
                .with_details(format!("url={url}"))
        })
    }
}

/// Main text of an HTML page, whitespace-collapsed. `None` when nothing readable remains.
pub fn extract_article_text(html: &str) -> Option<String> {
    let mut doc = Html::parse_document(html);

    let noise = Selector::parse(NOISE).ok()?;
    let noisy: Vec<_> = doc.select(&noise).map(|el| el.id()).collect();
    for id in noisy {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }

    for raw in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        if let Some(el) = doc.select(&selector).next() {
            let text = el
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            return (!text.is_empty()).then_some(text);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::extract_article_text;

    #[test]
    fn prefers_article_and_drops_noise() {
        let html = r#"<html><head><style>p{}</style></head><body>
            <nav class="nav">Home | World</nav>
            <article>
              <h1>Dam opens</h1>
              <script>track()</script>
              <p>The   new dam opened
                 on Monday.</p>
              <div class="ad">Buy now</div>
              <div class="social-share">Share</div>
            </article>
            <footer class="footer">(c) 2026</footer>
        </body></html>"#;
        assert_eq!(
            extract_article_text(html).as_deref(),
            Some("Dam opens The new dam opened on Monday.")
        );
    }

    #[test]
    fn falls_back_to_body() {
        let html = "<html><body><div>Only body text</div></body></html>";
        assert_eq!(extract_article_text(html).as_deref(), Some("Only body text"));
    }

    #[test]
    fn empty_content_is_none() {
        assert_eq!(extract_article_text("<html><body>   </body></html>"), None);
    }
}
