//! Loading of the passenger source text, from disk or over HTTP.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use tracing::debug;

use crate::error::PipelineError;

/// Issues a GET for `url` and returns the response body as text.
///
/// Non-success statuses are reported as [`PipelineError::FetchFailed`].
pub async fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String, PipelineError> {
    let parsed = url.parse().map_err(|e| PipelineError::fetch(url, e))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| PipelineError::fetch(url, e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(PipelineError::fetch(url, format!("HTTP status {status}")));
    }

    resp.text().await.map_err(|e| PipelineError::fetch(url, e))
}

/// Loads passenger data from a local file path or fetches it over HTTP.
#[tracing::instrument]
pub async fn load_source(source: &str) -> Result<String, PipelineError> {
    let text = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_text(&client, source).await?
    } else {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| PipelineError::fetch(source, e))?
    };
    debug!(bytes = text.len(), "Source loaded");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", std::env::temp_dir().display(), name)
    }

    #[tokio::test]
    async fn test_load_source_reads_local_file() {
        let path = temp_path("passenger_survival_fetch_local.csv");
        std::fs::write(&path, "PassengerId,Survived\n1,1\n").unwrap();

        let text = load_source(&path).await.unwrap();
        assert!(text.starts_with("PassengerId"));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_source_missing_file_is_fetch_failure() {
        let path = temp_path("passenger_survival_does_not_exist.csv");
        let _ = std::fs::remove_file(&path);

        let err = load_source(&path).await.unwrap_err();
        assert!(matches!(err, PipelineError::FetchFailed { .. }));
    }

    #[tokio::test]
    async fn test_fetch_text_rejects_invalid_url() {
        let client = BasicClient::new();
        let err = fetch_text(&client, "http://").await.unwrap_err();
        assert!(matches!(err, PipelineError::FetchFailed { .. }));
    }
}
