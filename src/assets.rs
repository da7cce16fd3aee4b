use folio_core::assets::{LoadProgress, LoadState};
use folio_core::error::AssetError;
use folio_core::scene::SceneManifest;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub async fn fetch_manifest(window: &web::Window, url: &str) -> Result<SceneManifest, AssetError> {
    let fetch_err = |e: JsValue| AssetError::Fetch {
        url: url.to_string(),
        message: format!("{:?}", e),
    };
    let resp_val = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(fetch_err)?;
    let resp: web::Response = resp_val.dyn_into().map_err(fetch_err)?;
    if !resp.ok() {
        return Err(AssetError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let body = JsFuture::from(resp.text().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?;
    let text = body.as_string().ok_or_else(|| AssetError::Fetch {
        url: url.to_string(),
        message: "response body is not text".into(),
    })?;
    Ok(SceneManifest::from_json(&text)?)
}

/// Fetch the subject in the background. The load state resolves exactly once
/// and the progress counter settles whatever the outcome.
pub fn spawn_subject_load(
    window: web::Window,
    url: &'static str,
    subject: Rc<RefCell<LoadState<SceneManifest>>>,
    progress: Rc<RefCell<LoadProgress>>,
) {
    spawn_local(async move {
        let result = fetch_manifest(&window, url).await;
        match &result {
            Ok(m) => log::info!("[assets] {} loaded ({} nodes)", url, m.root.node_count()),
            Err(e) => log::warn!("[assets] {} failed, keeping stand-in: {}", url, e),
        }
        *subject.borrow_mut() = LoadState::from_result(result);
        progress.borrow_mut().settle();
    });
}
