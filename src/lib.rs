#![cfg(target_arch = "wasm32")]
use crate::constants::{BOOT_ASSET_COUNT, CANVAS_ID, HERO_MANIFEST_URL, SCROLL_ROOT_ID};
use folio_core::assets::{LoadProgress, LoadState};
use folio_core::constants::{
    DPR_MAX, DPR_MIN, MOBILE_MAX_WIDTH, STAR_COUNT, STAR_DEPTH, STAR_RADIUS, STAR_SEED,
};
use folio_core::driver::CameraRig;
use folio_core::loading::LoadingGate;
use folio_core::stage;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod scroll;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let scroll_root = document
        .get_element_by_id(SCROLL_ROOT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", SCROLL_ROOT_ID))?;

    // Camera path for the mount-time viewport; resizes rebuild on a flip.
    let rig = Rc::new(RefCell::new(CameraRig::new()));
    let width = dom::viewport_width(&window).unwrap_or(MOBILE_MAX_WIDTH);
    rig.borrow_mut().resize(width);

    let progress = Rc::new(RefCell::new(LoadProgress::new(BOOT_ASSET_COUNT)));
    let subject = Rc::new(RefCell::new(LoadState::default()));
    assets::spawn_subject_load(
        window.clone(),
        HERO_MANIFEST_URL,
        subject.clone(),
        progress.clone(),
    );
    overlay::set_progress(&document, progress.borrow().percent());

    let gate = Rc::new(RefCell::new(LoadingGate::default()));
    let canvas_dirty = Rc::new(Cell::new(true));
    let mut subscriptions = Vec::new();
    subscriptions.extend(events::wire_resize(&window, rig.clone(), canvas_dirty.clone()));
    subscriptions.extend(events::wire_nav(&window, &document, &scroll_root));
    subscriptions.extend(events::wire_enter(&document, gate.clone()));

    let chime = audio::ChimePlayer::new().map(|p| Rc::new(RefCell::new(p)));
    if let Some(player) = &chime {
        if !player.borrow_mut().try_autoplay() {
            events::wire_chime_unlock(&window, player.clone());
        }
    }

    // Size the backing store before the surface is created.
    dom::sync_canvas_backing_size(&canvas, dom::clamped_dpr(&window, DPR_MIN, DPR_MAX));
    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("continuing without WebGPU; overlay and audio stay live");
    }

    let stars = stage::star_instances(&stage::star_field(
        STAR_COUNT,
        STAR_RADIUS,
        STAR_DEPTH,
        STAR_SEED,
    ));
    let mut ctx = frame::FrameContext::new(
        window,
        document,
        canvas,
        scroll_root,
        rig,
        gate,
        progress,
        subject,
        canvas_dirty,
        gpu,
        stars,
    );
    ctx.chime = chime;
    ctx.subscriptions = subscriptions;
    frame::start_loop(Rc::new(RefCell::new(ctx)));
    Ok(())
}
