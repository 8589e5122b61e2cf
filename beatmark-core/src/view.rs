//! View state of the annotation panel and the reducer that drives it.
//!
//! The browser layer translates DOM and media events into [`Event`]s, feeds
//! them through [`update`], and carries out the returned [`Effect`]s. Results
//! of those effects (fetch replies, timer expiry) come back as events.

use crate::api::{ApiConfig, BeatSubmission, RecordResponse};
use crate::catalog::{render_options, CatalogKind, SelectOption};
use crate::feedback::{
    feedback_class, recorded_message, Feedback, FEEDBACK_CLEAR_MS, MSG_NETWORK_ERROR,
    MSG_SELECT_SCENE, MSG_WRITE_FAILED,
};
use crate::format::{format_secs, ZERO_TIME};
use crate::table::BeatTable;

/// Seek range used while no audio is loaded.
pub const SEEK_DEFAULT_MAX: f64 = 100.0;

pub const PLAY_LABEL: &str = "▶ 播放";
pub const PAUSE_LABEL: &str = "⏸ 暫停";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeekBar {
    pub value: f64,
    pub max: f64,
}

impl Default for SeekBar {
    fn default() -> Self {
        Self { value: 0.0, max: SEEK_DEFAULT_MAX }
    }
}

/// A beat submission awaiting the backend's reply.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingRecord {
    pub scene: String,
    pub time_text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub api: ApiConfig,
    pub selected_file: String,
    pub selected_scene: String,
    pub seek: SeekBar,
    pub elapsed_text: String,
    pub total_text: String,
    /// Set while the pointer is held on the seek bar.
    pub dragging: bool,
    pub has_source: bool,
    pub playing: bool,
    pub beat_count: usize,
    pub feedback: Option<Feedback>,
    pub pending_record: Option<PendingRecord>,
    wav_catalog: Result<Vec<String>, String>,
    scene_catalog: Result<Vec<String>, String>,
    recount_token: u64,
    feedback_token: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Started,
    CatalogLoaded { kind: CatalogKind, result: Result<Vec<String>, String> },
    FileSelected(String),
    MetadataLoaded { duration: f64 },
    TimeUpdate { current: f64 },
    Ended,
    SeekPressed,
    SeekReleased,
    SeekInput(String),
    PlayPauseClicked,
    MediaPlayed,
    MediaPaused,
    SceneSelected(String),
    BeatsLoaded { token: u64, result: Result<BeatTable, String> },
    RecordClicked { current_time: f64 },
    RecordFinished(Result<RecordResponse, String>),
    FeedbackExpired { token: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadCatalog(CatalogKind),
    SetSource { url: String },
    ClearSource,
    Seek(f64),
    Play,
    Pause,
    FetchBeats { token: u64 },
    SubmitBeat(BeatSubmission),
    ClearFeedbackAfter { token: u64, delay_ms: u32 },
}

/// Advance `state` by one event.
pub fn update(mut state: ViewState, event: Event) -> (ViewState, Vec<Effect>) {
    let mut effects = Vec::new();
    state.apply(event, &mut effects);
    (state, effects)
}

impl ViewState {
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            selected_file: String::new(),
            selected_scene: String::new(),
            seek: SeekBar::default(),
            elapsed_text: ZERO_TIME.to_string(),
            total_text: ZERO_TIME.to_string(),
            dragging: false,
            has_source: false,
            playing: false,
            beat_count: 0,
            feedback: None,
            pending_record: None,
            wav_catalog: Ok(Vec::new()),
            scene_catalog: Ok(Vec::new()),
            recount_token: 0,
            feedback_token: 0,
        }
    }

    pub fn wav_options(&self) -> Vec<SelectOption> {
        render_options(&self.wav_catalog, CatalogKind::WavFiles.placeholder(), &self.selected_file)
    }

    pub fn scene_options(&self) -> Vec<SelectOption> {
        render_options(&self.scene_catalog, CatalogKind::Scenes.placeholder(), &self.selected_scene)
    }

    /// Button text and accessible label for the transport toggle.
    pub fn play_button(&self) -> (&'static str, &'static str) {
        if self.playing {
            (PAUSE_LABEL, "暫停")
        } else {
            (PLAY_LABEL, "播放")
        }
    }

    pub fn beat_count_text(&self) -> String {
        self.beat_count.to_string()
    }

    pub fn feedback_text(&self) -> &str {
        self.feedback.as_ref().map(|f| f.text.as_str()).unwrap_or("")
    }

    pub fn feedback_class(&self) -> &'static str {
        feedback_class(self.feedback.as_ref())
    }

    pub fn record_disabled(&self) -> bool {
        self.pending_record.is_some()
    }

    /// Token the most recent recount was issued with.
    pub fn recount_token(&self) -> u64 {
        self.recount_token
    }

    fn scene_key(&self) -> &str {
        self.selected_scene.trim()
    }

    fn apply(&mut self, event: Event, fx: &mut Vec<Effect>) {
        match event {
            Event::Started => {
                fx.push(Effect::LoadCatalog(CatalogKind::WavFiles));
                fx.push(Effect::LoadCatalog(CatalogKind::Scenes));
            }
            Event::CatalogLoaded { kind, result } => self.catalog_loaded(kind, result),
            Event::FileSelected(file) => self.select_file(file, fx),
            Event::MetadataLoaded { duration } => {
                if duration.is_finite() {
                    self.seek = SeekBar { value: 0.0, max: duration };
                    self.total_text = format_secs(duration);
                }
            }
            Event::TimeUpdate { current } => {
                if !self.dragging {
                    self.seek.value = current;
                    self.elapsed_text = format_secs(current);
                }
            }
            Event::Ended => {
                self.seek.value = 0.0;
                self.elapsed_text = ZERO_TIME.to_string();
                self.playing = false;
            }
            Event::SeekPressed => self.dragging = true,
            Event::SeekReleased => self.dragging = false,
            Event::SeekInput(raw) => {
                if let Ok(t) = raw.trim().parse::<f64>() {
                    if t.is_finite() {
                        self.seek.value = t;
                        self.elapsed_text = format_secs(t);
                        fx.push(Effect::Seek(t));
                    }
                }
            }
            Event::PlayPauseClicked => {
                if self.has_source {
                    fx.push(if self.playing { Effect::Pause } else { Effect::Play });
                }
            }
            Event::MediaPlayed => self.playing = true,
            Event::MediaPaused => self.playing = false,
            Event::SceneSelected(scene) => {
                self.selected_scene = scene;
                self.recount(fx);
            }
            Event::BeatsLoaded { token, result } => self.beats_loaded(token, result),
            Event::RecordClicked { current_time } => self.record(current_time, fx),
            Event::RecordFinished(result) => self.record_finished(result, fx),
            Event::FeedbackExpired { token } => {
                if token == self.feedback_token {
                    self.feedback = None;
                }
            }
        }
    }

    fn catalog_loaded(&mut self, kind: CatalogKind, result: Result<Vec<String>, String>) {
        match &result {
            Ok(names) => log::info!("{:?}: {} entries", kind, names.len()),
            Err(e) => log::warn!("{:?} failed to load: {}", kind, e),
        }
        let failed = result.is_err();
        match kind {
            CatalogKind::WavFiles => {
                self.wav_catalog = result;
                if failed {
                    self.selected_file.clear();
                }
            }
            CatalogKind::Scenes => {
                self.scene_catalog = result;
                if failed {
                    self.selected_scene.clear();
                }
            }
        }
    }

    fn select_file(&mut self, file: String, fx: &mut Vec<Effect>) {
        if file.is_empty() {
            self.selected_file.clear();
            self.has_source = false;
            self.playing = false;
            self.seek = SeekBar::default();
            self.elapsed_text = ZERO_TIME.to_string();
            self.total_text = ZERO_TIME.to_string();
            fx.push(Effect::ClearSource);
            return;
        }
        let url = self.api.audio_url(&file);
        log::info!("Loading {} from {}", file, url);
        self.selected_file = file;
        self.has_source = true;
        fx.push(Effect::SetSource { url });
    }

    fn recount(&mut self, fx: &mut Vec<Effect>) {
        // Bumped even without a fetch so an older in-flight reply is dropped.
        self.recount_token += 1;
        if self.scene_key().is_empty() {
            self.beat_count = 0;
            return;
        }
        fx.push(Effect::FetchBeats { token: self.recount_token });
    }

    fn beats_loaded(&mut self, token: u64, result: Result<BeatTable, String>) {
        if token != self.recount_token {
            log::debug!(
                "Dropping stale beat count reply {} (latest {})",
                token,
                self.recount_token
            );
            return;
        }
        self.beat_count = match result {
            Ok(table) => table.count_beats(self.scene_key()),
            Err(e) => {
                log::warn!("Beat count unavailable: {}", e);
                0
            }
        };
    }

    fn record(&mut self, current_time: f64, fx: &mut Vec<Effect>) {
        let scene = self.scene_key().to_string();
        if scene.is_empty() {
            self.set_feedback(Feedback::error(MSG_SELECT_SCENE));
            return;
        }
        if self.pending_record.is_some() {
            log::debug!("Ignoring record click while a submission is pending");
            return;
        }
        self.pending_record = Some(PendingRecord {
            scene: scene.clone(),
            time_text: format_secs(current_time),
        });
        fx.push(Effect::SubmitBeat(BeatSubmission { scene, time: current_time }));
    }

    fn record_finished(&mut self, result: Result<RecordResponse, String>, fx: &mut Vec<Effect>) {
        let pending = self.pending_record.take();
        match result {
            Ok(resp) if resp.ok => {
                let (scene, time_text) = match pending {
                    Some(p) => (p.scene, p.time_text),
                    None => (resp.scene.unwrap_or_default(), resp.time.unwrap_or_default()),
                };
                log::info!("Recorded beat {} at {}", scene, time_text);
                self.set_feedback(Feedback::success(recorded_message(&scene, &time_text)));
                self.recount(fx);
                fx.push(Effect::ClearFeedbackAfter {
                    token: self.feedback_token,
                    delay_ms: FEEDBACK_CLEAR_MS,
                });
            }
            Ok(resp) => {
                let msg = resp
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| MSG_WRITE_FAILED.to_string());
                log::warn!("Beat rejected: {}", msg);
                self.set_feedback(Feedback::error(msg));
            }
            Err(e) => {
                log::error!("Beat submission failed: {}", e);
                self.set_feedback(Feedback::error(MSG_NETWORK_ERROR));
            }
        }
    }

    fn set_feedback(&mut self, feedback: Feedback) {
        self.feedback_token += 1;
        self.feedback = Some(feedback);
    }
}
