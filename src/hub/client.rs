//! Minimal Hugging Face Hub client for one dataset file.
//!
//! Reads go through the `resolve` endpoint, where a 404 is the distinguished
//! "no dataset yet" outcome. Writes go through the NDJSON commit endpoint as
//! a whole-file replace; atomicity of the replace is the Hub's.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::json;

use crate::config::Settings;
use crate::error::{Result, SyncError};

const REVISION: &str = "main";
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct HubClient {
    client: Client,
    endpoint: String,
    repo_id: String,
    filename: String,
    token: String,
}

impl HubClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.hub_endpoint.clone(),
            repo_id: settings.repo_id.clone(),
            filename: settings.filename.clone(),
            token: settings.token.clone(),
        })
    }

    fn resolve_url(&self) -> String {
        format!(
            "{}/datasets/{}/resolve/{}/{}",
            self.endpoint, self.repo_id, REVISION, self.filename
        )
    }

    fn commit_url(&self) -> String {
        format!(
            "{}/api/datasets/{}/commit/{}",
            self.endpoint, self.repo_id, REVISION
        )
    }

    /// Download the dataset file, or `None` if the repository or file does
    /// not exist yet.
    pub async fn download_file(&self) -> Result<Option<String>> {
        let response = self
            .client
            .get(self.resolve_url())
            .bearer_auth(&self.token)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.text().await?)),
            status => Err(SyncError::Access(format!(
                "download of {} from {} failed with {}",
                self.filename, self.repo_id, status
            ))),
        }
    }

    /// Replace the dataset file in a single commit.
    pub async fn upload_file(&self, content: &str, message: &str) -> Result<()> {
        let response = self
            .client
            .post(self.commit_url())
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(commit_payload(&self.filename, content, message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Upload(format!(
                "commit to {} rejected with {}: {}",
                self.repo_id, status, body
            )));
        }
        Ok(())
    }
}

/// Build the two-operation NDJSON commit body: a header line carrying the
/// commit summary, then the base64-encoded file content.
fn commit_payload(filename: &str, content: &str, message: &str) -> String {
    let header = json!({
        "key": "header",
        "value": { "summary": message, "description": "" }
    });
    let file = json!({
        "key": "file",
        "value": {
            "path": filename,
            "content": BASE64.encode(content),
            "encoding": "base64"
        }
    });
    format!("{header}\n{file}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(endpoint: &str) -> Settings {
        Settings {
            latitude: 12.9716,
            longitude: 77.5946,
            timezone: chrono_tz::Asia::Kolkata,
            repo_id: "user/repo".to_string(),
            filename: "weather_data.csv".to_string(),
            hub_endpoint: endpoint.to_string(),
            archive_endpoint: "http://unused.invalid".to_string(),
            token: "hf_test".to_string(),
        }
    }

    #[test]
    fn test_commit_payload_is_two_json_lines() {
        let payload = commit_payload("weather_data.csv", "a,b\n1,2\n", "Update weather data");
        let lines: Vec<&str> = payload.lines().collect();
        assert_eq!(lines.len(), 2);

        let header: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(header["key"], "header");
        assert_eq!(header["value"]["summary"], "Update weather data");

        let file: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(file["key"], "file");
        assert_eq!(file["value"]["path"], "weather_data.csv");
        let decoded = BASE64
            .decode(file["value"]["content"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, b"a,b\n1,2\n");
    }

    #[tokio::test]
    async fn test_download_missing_file_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/datasets/user/repo/resolve/main/weather_data.csv"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = HubClient::new(&settings(&server.uri())).unwrap();
        assert_eq!(client.download_file().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_download_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/datasets/user/repo/resolve/main/weather_data.csv"))
            .and(header("authorization", "Bearer hf_test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("date,humidity_percent,pressure_hpa\n"))
            .mount(&server)
            .await;

        let client = HubClient::new(&settings(&server.uri())).unwrap();
        let body = client.download_file().await.unwrap().unwrap();
        assert!(body.starts_with("date,"));
    }

    #[tokio::test]
    async fn test_download_auth_failure_is_access_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/datasets/user/repo/resolve/main/weather_data.csv"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = HubClient::new(&settings(&server.uri())).unwrap();
        let err = client.download_file().await.unwrap_err();
        assert!(matches!(err, SyncError::Access(_)));
    }

    #[tokio::test]
    async fn test_upload_posts_ndjson_commit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/datasets/user/repo/commit/main"))
            .and(header("content-type", "application/x-ndjson"))
            .and(header("authorization", "Bearer hf_test"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = HubClient::new(&settings(&server.uri())).unwrap();
        client
            .upload_file("date,humidity_percent,pressure_hpa\n", "Update weather data: 2024-03-14")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_rejection_is_upload_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/datasets/user/repo/commit/main"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = HubClient::new(&settings(&server.uri())).unwrap();
        let err = client.upload_file("x", "msg").await.unwrap_err();
        assert!(matches!(err, SyncError::Upload(_)));
    }
}
