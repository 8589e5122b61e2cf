//! Async client for the beat-annotation backend.
//!
//! Speaks the same `/api` contract as the browser panel, so the CLI can list
//! catalogs, read the beat table, and record beats against a running server.

use beatmark_core::api::{ApiConfig, BeatSubmission, RecordResponse};
use beatmark_core::BeatTable;
use thiserror::Error;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

pub struct BeatmarkClient {
    http: reqwest::Client,
    api: ApiConfig,
}

impl BeatmarkClient {
    /// `server` is the backend origin, e.g. `http://127.0.0.1:5000`.
    pub fn new(server: &str) -> Self {
        Self::with_http(reqwest::Client::new(), server)
    }

    pub fn with_http(http: reqwest::Client, server: &str) -> Self {
        let api = ApiConfig::new(format!("{}/api", server.trim_end_matches('/')));
        Self { http, api }
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn audio_url(&self, filename: &str) -> String {
        self.api.audio_url(filename)
    }

    async fn get(&self, url: String) -> Result<reqwest::Response, ClientError> {
        log::debug!("GET {}", url);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status { url, status: resp.status().as_u16() });
        }
        Ok(resp)
    }

    pub async fn wav_files(&self) -> Result<Vec<String>, ClientError> {
        Ok(self.get(self.api.wav_files_url()).await?.json().await?)
    }

    /// A `null` scene list comes back as empty.
    pub async fn scenes(&self) -> Result<Vec<String>, ClientError> {
        let scenes: Option<Vec<String>> = self.get(self.api.scenes_url()).await?.json().await?;
        Ok(scenes.unwrap_or_default())
    }

    pub async fn beats(&self) -> Result<BeatTable, ClientError> {
        Ok(self.get(self.api.beats_url()).await?.json().await?)
    }

    /// Record a beat. Rejections (`ok: false`) are returned as a response,
    /// not an error, since the backend reports them with HTTP 400 and a body.
    pub async fn record(&self, scene: &str, time: f64) -> Result<RecordResponse, ClientError> {
        let url = self.api.beats_url();
        log::debug!("POST {} scene={} time={}", url, scene, time);
        let body = BeatSubmission { scene: scene.to_string(), time };
        let resp = self.http.post(&url).json(&body).send().await?;
        let status = resp.status();
        match resp.json::<RecordResponse>().await {
            Ok(r) => Ok(r),
            Err(_) if !status.is_success() => {
                Err(ClientError::Status { url, status: status.as_u16() })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_api_urls_from_origin() {
        let client = BeatmarkClient::new("http://localhost:5000/");
        assert_eq!(client.api().beats_url(), "http://localhost:5000/api/beats");
        assert_eq!(
            client.audio_url("第一幕.wav"),
            "http://localhost:5000/api/audio/%E7%AC%AC%E4%B8%80%E5%B9%95.wav"
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_an_http_error() {
        // Bind then drop a listener so the port is known to be closed.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = BeatmarkClient::new(&format!("http://127.0.0.1:{port}"));
        let err = client.scenes().await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }
}
