use leptos::prelude::*;
use wasm_bindgen::JsCast;
use beatmark_core::catalog::CatalogKind;
use beatmark_core::Event;
use crate::state::{dispatch, AppState};

fn select_value(ev: &web_sys::Event) -> Option<String> {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        .map(|el| el.value())
}

/// A selector fed by one of the backend catalogs (WAV files or scenes).
#[component]
pub fn CatalogSelect(kind: CatalogKind, id: &'static str) -> impl IntoView {
    let state = expect_context::<AppState>();

    // Memoised so playback ticks don't rebuild the option list.
    let options = Memo::new(move |_| {
        state.view.with(|v| match kind {
            CatalogKind::WavFiles => v.wav_options(),
            CatalogKind::Scenes => v.scene_options(),
        })
    });

    let on_change = move |ev: web_sys::Event| {
        let Some(value) = select_value(&ev) else { return };
        let event = match kind {
            CatalogKind::WavFiles => Event::FileSelected(value),
            CatalogKind::Scenes => Event::SceneSelected(value),
        };
        dispatch(state, event);
    };

    view! {
        <select id=id class="setting-select" on:change=on_change>
            {move || options.get().into_iter().map(|opt| view! {
                <option value=opt.value selected=opt.selected>{opt.label}</option>
            }).collect_view()}
        </select>
    }
}
