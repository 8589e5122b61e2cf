use leptos::prelude::*;
use wasm_bindgen::JsCast;
use beatmark_core::catalog::CatalogKind;
use beatmark_core::Event;
use crate::state::{dispatch, AppState};
use crate::components::catalog_select::CatalogSelect;

fn event_target_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|el| el.value())
        .unwrap_or_default()
}

/// WAV picker, hidden `<audio>` element, and the transport row.
#[component]
pub fn PlayControls() -> impl IntoView {
    let state = expect_context::<AppState>();

    let media = move |f: fn(&web_sys::HtmlAudioElement) -> Event| {
        move |_: web_sys::Event| {
            if let Some(audio) = state.audio_ref.get_untracked() {
                dispatch(state, f(&audio));
            }
        }
    };

    let play_button = move || state.view.with(|v| v.play_button());
    let seek_max = move || state.view.with(|v| v.seek.max.to_string());
    let seek_value = move || state.view.with(|v| v.seek.value.to_string());

    view! {
        <div class="play-controls">
            <div class="setting-row">
                <label class="setting-label" for="wav-select">"音檔"</label>
                <CatalogSelect kind=CatalogKind::WavFiles id="wav-select" />
            </div>

            <audio
                node_ref=state.audio_ref
                preload="metadata"
                on:loadedmetadata=media(|a| Event::MetadataLoaded { duration: a.duration() })
                on:timeupdate=media(|a| Event::TimeUpdate { current: a.current_time() })
                on:ended=media(|_| Event::Ended)
                on:play=media(|_| Event::MediaPlayed)
                on:pause=media(|_| Event::MediaPaused)
            ></audio>

            <div class="transport">
                <button
                    id="btn-play-pause"
                    class="layer-btn"
                    aria-label=move || play_button().1
                    on:click=move |_| dispatch(state, Event::PlayPauseClicked)
                >{move || play_button().0}</button>
                <input
                    id="seek"
                    type="range"
                    class="seek-range"
                    min="0"
                    step="0.001"
                    prop:max=seek_max
                    prop:value=seek_value
                    on:pointerdown=move |_| dispatch(state, Event::SeekPressed)
                    on:pointerup=move |_| dispatch(state, Event::SeekReleased)
                    on:pointercancel=move |_| dispatch(state, Event::SeekReleased)
                    on:input=move |ev| dispatch(state, Event::SeekInput(event_target_value(&ev)))
                />
                <span class="time-display">
                    <span id="time-current">
                        {move || state.view.with(|v| v.elapsed_text.clone())}
                    </span>
                    " / "
                    <span id="time-total">{move || state.view.with(|v| v.total_text.clone())}</span>
                </span>
            </div>
        </div>
    }
}
