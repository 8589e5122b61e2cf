use leptos::prelude::*;
use beatmark_core::Event;
use crate::state::{dispatch, AppState};
use crate::components::beat_recorder::BeatRecorder;
use crate::components::play_controls::PlayControls;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(state);

    // Catalogs load once, after the first render.
    Effect::new(move || dispatch(state, Event::Started));

    view! {
        <div class="app">
            <div class="toolbar">
                <span class="toolbar-brand"><b>"beat"</b><i>"mark"</i></span>
            </div>
            <PlayControls />
            <BeatRecorder />
        </div>
    }
}
