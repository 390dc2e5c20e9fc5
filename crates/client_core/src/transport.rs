use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::SPLIT_ENDPOINT_PATH,
    protocol::{SplitPdfRequest, SplitPdfResponse, SplitResult},
};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::SplitError;

/// Remote page splitter.
#[async_trait]
pub trait SplitApi: Send + Sync {
    async fn split(&self, request: &SplitPdfRequest) -> Result<SplitResult, SplitError>;
}

pub struct HttpSplitClient {
    http: Client,
    endpoint: Url,
}

impl HttpSplitClient {
    pub fn new(server_url: &str) -> Result<Self, SplitError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, SplitError> {
        Ok(Self {
            http,
            endpoint: split_endpoint(server_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn split_endpoint(server_url: &str) -> Result<Url, SplitError> {
    let base = server_url.trim().trim_end_matches('/');
    let invalid = |reason: String| SplitError::InvalidServerUrl {
        url: server_url.to_string(),
        reason,
    };

    let url = Url::parse(&format!("{base}{SPLIT_ENDPOINT_PATH}"))
        .map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

#[async_trait]
impl SplitApi for HttpSplitClient {
    async fn split(&self, request: &SplitPdfRequest) -> Result<SplitResult, SplitError> {
        debug!(
            endpoint = %self.endpoint,
            payload_chars = request.pdf_base64.len(),
            "sending split request"
        );
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        // Failure bodies arrive with 4xx/5xx codes, so the status alone
        // decides nothing; only the body does.
        let status = response.status();
        let body = response.bytes().await?;
        let parsed: SplitPdfResponse =
            serde_json::from_slice(&body).map_err(|err| SplitError::UnexpectedBody {
                status: status.as_u16(),
                reason: err.to_string(),
            })?;

        let result = parsed.into_result()?;
        match &result {
            SplitResult::Split { total_pages, pages } => {
                info!(
                    status = status.as_u16(),
                    total_pages,
                    returned_pages = pages.len(),
                    "split request succeeded"
                );
            }
            SplitResult::Rejected { error } => {
                warn!(status = status.as_u16(), %error, "split request rejected by server");
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_joined_onto_trimmed_base() {
        let url = split_endpoint(" http://127.0.0.1:5000/ ").expect("valid url");
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/split-pdf");
    }

    #[test]
    fn keeps_base_path_prefix() {
        let url = split_endpoint("https://tools.example.com/splitter").expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://tools.example.com/splitter/api/split-pdf"
        );
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = split_endpoint("ftp://example.com").expect_err("ftp rejected");
        assert!(matches!(err, SplitError::InvalidServerUrl { .. }));
    }

    #[test]
    fn rejects_garbage_urls() {
        assert!(split_endpoint("not a url").is_err());
    }
}
