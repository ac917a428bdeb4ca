// src/fetch.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::{debug, instrument};
use url::Url;

/// GET `url` and return the body as text. Non-2xx statuses are errors.
#[instrument(level = "info", skip(client))]
pub fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let url = Url::parse(url).with_context(|| format!("parsing URL {}", url))?;
    let body = client
        .get(url.clone())
        .send()
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .with_context(|| format!("Reading text from {}", url))?;
    debug!(bytes = body.len(), "fetched page");
    Ok(body)
}


#[cfg(test)]
mod tests {
    use super::test_server::serve_once;
    use super::*;

    #[test]
    fn returns_body_text() {
        let url = serve_once("200 OK", "<html><body>ok</body></html>".to_string());
        let body = fetch_page(&Client::new(), &url).unwrap();
        assert_eq!(body, "<html><body>ok</body></html>");
    }

    #[test]
    fn error_status_is_fatal() {
        let url = serve_once("404 Not Found", "gone".to_string());
        let err = fetch_page(&Client::new(), &url).unwrap_err();
        assert!(format!("{:#}", err).contains("Non-success status"));
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(fetch_page(&Client::new(), "not a url").is_err());
    }
}
