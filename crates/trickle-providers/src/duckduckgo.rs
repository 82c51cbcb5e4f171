//! DuckDuckGo Lite fallback: text-only search page, no API key required.
//!
//! The body is streamed and cut off after the response budget, so a slow
//! or oversized page never costs more than one answer's worth of bandwidth.

use async_trait::async_trait;
use futures::StreamExt;
use std::time::Duration;
use trickle_core::config::WebConfig;
use trickle_core::error::{Result, TrickleError};
use trickle_core::traits::{FallbackOutcome, FallbackProvider};

const MAX_SNIPPETS: usize = 3;
const MAX_PARAGRAPHS: usize = 5;
/// Extracted text is cut to this many characters before `...`.
pub const MAX_TEXT_CHARS: usize = 5000;

pub struct DuckDuckGoLite {
    client: reqwest::Client,
    endpoint: String,
    max_download: usize,
}

impl DuckDuckGoLite {
    pub fn new(web: &WebConfig, timeout: Duration, max_download: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(web.user_agent.as_str())
            .timeout(timeout)
            .build()
            .map_err(|e| TrickleError::Http(format!("HTTP client error: {e}")))?;
        Ok(Self {
            client,
            endpoint: web.endpoint.clone(),
            max_download,
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!("{}?q={}", self.endpoint, urlencoding::encode(query))
    }

    /// Download at most `max_download` bytes of the result page.
    async fn fetch(&self, query: &str) -> std::result::Result<String, reqwest::Error> {
        let response = self
            .client
            .get(self.search_url(query))
            .send()
            .await?
            .error_for_status()?;

        let mut body: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk?);
            if body.len() >= self.max_download {
                body.truncate(self.max_download);
                break;
            }
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl FallbackProvider for DuckDuckGoLite {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, query: &str) -> FallbackOutcome {
        match self.fetch(query).await {
            Ok(html) => {
                let texts = extract_texts(&html);
                if texts.is_empty() {
                    tracing::debug!("Web search returned no usable text for: {query}");
                    FallbackOutcome::NoResults
                } else {
                    FallbackOutcome::found(limit_text(&texts.join(" ")))
                }
            }
            Err(e) if e.is_timeout() => {
                tracing::warn!("⚠️ Web search timed out: {e}");
                FallbackOutcome::Timeout
            }
            Err(e) => {
                tracing::warn!("⚠️ Web search failed: {e}");
                FallbackOutcome::Unavailable(e.to_string())
            }
        }
    }
}

/// Result snippets if the page has any, otherwise paragraph text.
pub fn extract_texts(html: &str) -> Vec<String> {
    let snippets = parse_snippets(html, MAX_SNIPPETS);
    if !snippets.is_empty() {
        return snippets;
    }
    parse_paragraphs(html, MAX_PARAGRAPHS)
}

fn parse_snippets(html: &str, max: usize) -> Vec<String> {
    html.split("result-snippet")
        .skip(1)
        .filter_map(|segment| extract_between(segment, ">", "</td>"))
        .map(|inner| clean_text(&inner))
        .filter(|text| !text.is_empty())
        .take(max)
        .collect()
}

fn parse_paragraphs(html: &str, max: usize) -> Vec<String> {
    html.split("<p")
        .skip(1)
        // "<pre", "<param" and friends are not paragraphs
        .filter(|segment| segment.starts_with('>') || segment.starts_with(char::is_whitespace))
        .take(max)
        .filter_map(|segment| extract_between(segment, ">", "</p>"))
        .map(|inner| clean_text(&inner))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Cap extracted text at [`MAX_TEXT_CHARS`] characters.
pub fn limit_text(text: &str) -> String {
    if text.chars().count() > MAX_TEXT_CHARS {
        let mut cut: String = text.chars().take(MAX_TEXT_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

/// Strip tags, decode common entities, collapse whitespace.
fn clean_text(fragment: &str) -> String {
    let mut stripped = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => stripped.push(c),
            _ => {}
        }
    }
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_between(text: &str, start: &str, end: &str) -> Option<String> {
    let start_idx = text.find(start)? + start.len();
    let remaining = &text[start_idx..];
    let end_idx = remaining.find(end)?;
    Some(remaining[..end_idx].to_string())
}
