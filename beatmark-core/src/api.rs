//! Wire contract of the beat backend.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "/api";

/// Where the backend endpoints live, relative to the page or absolute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base: DEFAULT_API_BASE.to_string() }
    }
}

impl ApiConfig {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { base: base.trim_end_matches('/').to_string() }
    }

    pub fn wav_files_url(&self) -> String {
        format!("{}/wav-files", self.base)
    }

    pub fn scenes_url(&self) -> String {
        format!("{}/scenes", self.base)
    }

    pub fn beats_url(&self) -> String {
        format!("{}/beats", self.base)
    }

    /// The filename is percent-encoded as a single path segment.
    pub fn audio_url(&self, filename: &str) -> String {
        format!("{}/audio/{}", self.base, urlencoding::encode(filename))
    }
}

/// Body of `POST /api/beats`. `time` is the unrounded playback position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeatSubmission {
    pub scene: String,
    pub time: f64,
}

/// Reply to `POST /api/beats`. Only `ok` and `error` are guaranteed; the
/// rest is echoed back by the backend on success.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beat_row: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_col: Option<usize>,
}

impl RecordResponse {
    pub fn success(scene: &str, time: &str, beat_row: usize, scene_col: usize) -> Self {
        Self {
            ok: true,
            error: None,
            scene: Some(scene.to_string()),
            time: Some(time.to_string()),
            beat_row: Some(beat_row),
            scene_col: Some(scene_col),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { ok: false, error: Some(error.into()), ..Default::default() }
    }
}

/// Parse the `/api/wav-files` body. `null` is rejected like any other
/// malformed list.
pub fn parse_wav_files(body: &str) -> Result<Vec<String>, String> {
    serde_json::from_str(body).map_err(|e| format!("wav list: {e}"))
}

/// Parse the `/api/scenes` body; `null` means no scenes.
pub fn parse_scenes(body: &str) -> Result<Vec<String>, String> {
    serde_json::from_str::<Option<Vec<String>>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| format!("scene list: {e}"))
}
