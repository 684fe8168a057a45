//! Loader — fetches a job-posting page and reduces it to its body text.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::errors::AppError;

/// Page-fetch seam. Returns the raw HTML body for a syntactically valid URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, AppError>;
}

/// Plain reqwest-backed fetcher. No reachability check happens before the
/// call; failures surface as `Fetch` errors when the request runs.
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, AppError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!("page returned status {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))
    }
}

/// Fetches `url` and returns the page's primary textual content.
///
/// Fails with `Validation` on a malformed URL and `Fetch` when the request
/// fails or the page yields no text; the caller aborts the remaining steps.
pub async fn load(fetcher: &dyn PageFetcher, url: &str) -> Result<String, AppError> {
    let url = Url::parse(url.trim())
        .map_err(|e| AppError::Validation(format!("invalid job URL: {e}")))?;

    let html = fetcher.fetch(&url).await?;
    let text = extract_page_text(&html);

    if text.is_empty() {
        return Err(AppError::Fetch(
            "page contained no textual content".to_string(),
        ));
    }

    Ok(text)
}

/// Extracts visible text from an HTML document, whitespace-collapsed.
/// Falls back to the whole document when there is no `<body>`.
pub fn extract_page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let body = Selector::parse("body").expect("static selector");

    let raw: String = match document.select(&body).next() {
        Some(element) => element.text().collect(),
        None => document.root_element().text().collect(),
    };

    collapse_whitespace(&raw)
}

fn collapse_whitespace(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    buf.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubFetcher {
        html: &'static str,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, _url: &Url) -> Result<String, AppError> {
            Ok(self.html.to_string())
        }
    }

    #[test]
    fn test_extract_page_text_collapses_whitespace() {
        let html = "<html><body><h1>Rust   Engineer</h1>\n<p>Build\n\nservices</p></body></html>";
        assert_eq!(extract_page_text(html), "Rust Engineer Build services");
    }

    #[test]
    fn test_extract_page_text_skips_markup() {
        let html = "<body><div><span>alpha</span><span>beta</span></div></body>";
        assert_eq!(extract_page_text(html), "alphabeta");
    }

    #[tokio::test]
    async fn test_load_returns_nonempty_text_for_nonempty_html() {
        let fetcher = StubFetcher {
            html: "<html><body><p>Senior Rust Engineer, remote.</p></body></html>",
        };
        let text = load(&fetcher, "https://jobs.example/rust").await.unwrap();
        assert_eq!(text, "Senior Rust Engineer, remote.");
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_url() {
        let fetcher = StubFetcher { html: "<p>hi</p>" };
        let err = load(&fetcher, "not a url").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_load_fails_on_empty_page_body() {
        let fetcher = StubFetcher {
            html: "<html><body>   \n\t </body></html>",
        };
        let err = load(&fetcher, "https://jobs.example/blank")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Fetch(_)));
    }
}
