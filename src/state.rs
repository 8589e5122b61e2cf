use leptos::prelude::*;
use leptos::html::Audio;
use wasm_bindgen_futures::spawn_local;
use beatmark_core::api::{self, BeatSubmission};
use beatmark_core::catalog::CatalogKind;
use beatmark_core::{update, Effect, Event, ViewState};
use crate::net;

#[derive(Clone, Copy)]
pub struct AppState {
    pub view: RwSignal<ViewState>,
    pub audio_ref: NodeRef<Audio>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: RwSignal::new(ViewState::default()),
            audio_ref: NodeRef::new(),
        }
    }

    fn audio(&self) -> Option<web_sys::HtmlAudioElement> {
        self.audio_ref.get_untracked()
    }

    /// Current playback position, or 0 before any audio element exists.
    pub fn current_time(&self) -> f64 {
        self.audio().map(|a| a.current_time()).unwrap_or(0.0)
    }
}

/// Run one event through the reducer, then carry out its effects.
pub fn dispatch(state: AppState, event: Event) {
    let mut effects = Vec::new();
    state.view.update(|v| {
        let (next, fx) = update(std::mem::take(v), event);
        *v = next;
        effects = fx;
    });
    for effect in effects {
        run_effect(state, effect);
    }
}

fn run_effect(state: AppState, effect: Effect) {
    let endpoints = state.view.with_untracked(|v| v.api.clone());
    match effect {
        Effect::LoadCatalog(kind) => {
            spawn_local(async move {
                let result = match kind {
                    CatalogKind::WavFiles => net::fetch_text(&endpoints.wav_files_url())
                        .await
                        .and_then(|body| api::parse_wav_files(&body)),
                    CatalogKind::Scenes => net::fetch_text(&endpoints.scenes_url())
                        .await
                        .and_then(|body| api::parse_scenes(&body)),
                };
                dispatch(state, Event::CatalogLoaded { kind, result });
            });
        }
        Effect::SetSource { url } => {
            if let Some(audio) = state.audio() {
                audio.set_src(&url);
                audio.load();
            }
        }
        Effect::ClearSource => {
            if let Some(audio) = state.audio() {
                let _ = audio.remove_attribute("src");
                audio.load();
            }
        }
        Effect::Seek(t) => {
            if let Some(audio) = state.audio() {
                audio.set_current_time(t);
            }
        }
        Effect::Play => {
            let Some(audio) = state.audio() else { return };
            match audio.play() {
                Ok(promise) => spawn_local(async move {
                    if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        log::warn!("play() rejected: {:?}", e);
                    }
                }),
                Err(e) => log::warn!("play() failed: {:?}", e),
            }
        }
        Effect::Pause => {
            if let Some(audio) = state.audio() {
                if let Err(e) = audio.pause() {
                    log::warn!("pause() failed: {:?}", e);
                }
            }
        }
        Effect::FetchBeats { token } => {
            spawn_local(async move {
                let result = net::fetch_json(&endpoints.beats_url()).await;
                dispatch(state, Event::BeatsLoaded { token, result });
            });
        }
        Effect::SubmitBeat(submission) => {
            spawn_local(async move {
                let result = submit_beat(&endpoints.beats_url(), &submission).await;
                dispatch(state, Event::RecordFinished(result));
            });
        }
        Effect::ClearFeedbackAfter { token, delay_ms } => {
            spawn_local(async move {
                net::sleep_ms(delay_ms as i32).await;
                dispatch(state, Event::FeedbackExpired { token });
            });
        }
    }
}

async fn submit_beat(
    url: &str,
    submission: &BeatSubmission,
) -> Result<api::RecordResponse, String> {
    let body = serde_json::to_string(submission).map_err(|e| e.to_string())?;
    let text = net::post_json(url, &body).await?;
    serde_json::from_str(&text).map_err(|e| format!("record reply: {e}"))
}
