use leptos::prelude::*;
use beatmark_core::catalog::CatalogKind;
use beatmark_core::Event;
use crate::state::{dispatch, AppState};
use crate::components::catalog_select::CatalogSelect;

#[component]
pub fn BeatRecorder() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_record = move |_: web_sys::MouseEvent| {
        let current_time = state.current_time();
        dispatch(state, Event::RecordClicked { current_time });
    };

    view! {
        <div class="recorder">
            <div class="setting-row">
                <label class="setting-label" for="scene-select">"Scene"</label>
                <CatalogSelect kind=CatalogKind::Scenes id="scene-select" />
            </div>
            <button
                id="beat-counter"
                class="beat-counter"
                disabled=move || state.view.with(|v| v.record_disabled())
                on:click=on_record
                title="Record the current playback time for this scene"
            >
                <span class="beat-counter-label">"記錄 Beat"</span>
                <span id="beat-count" class="beat-count">
                    {move || state.view.with(|v| v.beat_count_text())}
                </span>
            </button>
            <div
                id="record-feedback"
                class=move || state.view.with(|v| v.feedback_class())
            >{move || state.view.with(|v| v.feedback_text().to_string())}</div>
        </div>
    }
}
