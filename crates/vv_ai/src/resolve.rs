use std::time::Duration;

use rayon::prelude::*;
use tracing::{debug, warn};
use vv_core::error::AppError;
use vv_core::sources::{collect_candidates, finalize_sources, is_redirect_gateway};

/// Follows a redirect/shortener URL to its final destination.
pub trait UrlResolver: Send + Sync {
    fn resolve(&self, url: &str) -> Result<String, AppError>;
}

/// HEAD request that follows redirects and reports the final URL.
#[derive(Debug, Clone)]
pub struct HttpUrlResolver {
    agent: ureq::Agent,
}

impl HttpUrlResolver {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .redirects(10)
                .build(),
        }
    }
}

impl UrlResolver for HttpUrlResolver {
    fn resolve(&self, url: &str) -> Result<String, AppError> {
        match self.agent.head(url).call() {
            Ok(r) => Ok(r.get_url().to_string()),
            // Some sites refuse HEAD but the redirect chain was still followed.
            Err(ureq::Error::Status(_, r)) if r.get_url() != url => Ok(r.get_url().to_string()),
            Err(e) => Err(AppError::new("SOURCE_RESOLVE_FAILED", "Failed to resolve URL")
                .with_details(format!("url={url}; err={e}"))
                .with_retryable(true)),
        }
    }
}

fn resolve_one(resolver: &dyn UrlResolver, url: String) -> String {
    if !is_redirect_gateway(&url) {
        return url;
    }
    match resolver.resolve(&url) {
        Ok(resolved) if !resolved.trim().is_empty() => {
            debug!(from = %url, to = %resolved, "resolved redirect");
            resolved
        }
        Ok(_) => url,
        Err(e) => {
            warn!(url = %url, code = %e.code, "keeping unresolved source URL");
            url
        }
    }
}

/// Upper bound on simultaneous redirect lookups for one article.
const MAX_RESOLVE_THREADS: usize = 32;

/// Resolve every redirect URL concurrently. Output order matches input order; a URL that
/// cannot be resolved is returned unchanged.
///
/// Lookups are blocking HEAD requests, so they run on a pool sized to the candidate list
/// rather than on the CPU-sized global pool.
pub fn resolve_all(resolver: &dyn UrlResolver, urls: Vec<String>) -> Vec<String> {
    if urls.is_empty() {
        return urls;
    }
    let threads = urls.len().clamp(1, MAX_RESOLVE_THREADS);
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(|| {
            urls.into_par_iter()
                .map(|u| resolve_one(resolver, u))
                .collect()
        }),
        Err(e) => {
            warn!(err = %e, "resolver pool unavailable; resolving sequentially");
            urls.into_iter().map(|u| resolve_one(resolver, u)).collect()
        }
    }
}

/// Final deduplicated source list for an article analysis. Never fails.
pub fn build_source_list(
    resolver: &dyn UrlResolver,
    grounding_urls: &[String],
    reasoning: &str,
    model_sources: &[String],
) -> Vec<String> {
    let candidates = collect_candidates(grounding_urls, reasoning, model_sources);
    finalize_sources(resolve_all(resolver, candidates))
}
