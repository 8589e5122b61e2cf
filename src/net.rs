use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

async fn response_text(resp: web_sys::Response) -> Result<String, String> {
    let text = JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("text: {e:?}"))?;
    text.as_string().ok_or("Not a string".to_string())
}

async fn send(request: js_sys::Promise) -> Result<web_sys::Response, String> {
    let resp_value = JsFuture::from(request)
        .await
        .map_err(|e| format!("fetch error: {e:?}"))?;
    resp_value
        .dyn_into()
        .map_err(|_| "Response cast failed".to_string())
}

/// GET `url` and return the body, failing on non-2xx.
pub async fn fetch_text(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("No window")?;
    let resp = send(window.fetch_with_str(url)).await?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    response_text(resp).await
}

pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let body = fetch_text(url).await?;
    serde_json::from_str(&body).map_err(|e| format!("{url}: {e}"))
}

/// POST a JSON body and return the reply body whatever the status; the
/// backend reports rejections as JSON with a 4xx status.
pub async fn post_json(url: &str, body: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("No window")?;

    let headers = web_sys::Headers::new().map_err(|e| format!("{e:?}"))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{e:?}"))?;
    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));
    let request = web_sys::Request::new_with_str_and_init(url, &init)
        .map_err(|e| format!("request: {e:?}"))?;

    let resp = send(window.fetch_with_request(&request)).await?;
    log::debug!("POST {} -> {}", url, resp.status());
    response_text(resp).await
}

/// Resolve after `ms` milliseconds via setTimeout.
pub async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let Some(win) = web_sys::window() else { return };
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(), ms,
        );
    });
    let _ = JsFuture::from(promise).await;
}
