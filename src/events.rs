use crate::audio::ChimePlayer;
use crate::constants::{NAV_CONTACT_ID, NAV_CONTACT_PAGE, NAV_PROJECTS_ID, NAV_PROJECTS_PAGE};
use crate::dom::{self, Subscription};
use crate::{overlay, scroll};
use folio_core::driver::CameraRig;
use folio_core::loading::LoadingGate;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Window resize: reclassify the viewport (rebuilding the camera path on a
/// flip) and flag the canvas for a backing-size sync on the next frame.
pub fn wire_resize(
    window: &web::Window,
    rig: Rc<RefCell<CameraRig>>,
    canvas_dirty: Rc<Cell<bool>>,
) -> Option<Subscription> {
    let win = window.clone();
    let sub = Subscription::listen(window, "resize", move |_| {
        canvas_dirty.set(true);
        if let Some(width) = dom::viewport_width(&win) {
            rig.borrow_mut().resize(width);
        }
    });
    match sub {
        Ok(s) => Some(s),
        Err(e) => {
            log::error!("[events] resize listener error: {:?}", e);
            None
        }
    }
}

/// First click or keypress unlocks audio and plays the chime. Both
/// listeners are removed after whichever fires first.
pub fn wire_chime_unlock(window: &web::Window, player: Rc<RefCell<ChimePlayer>>) {
    if player.borrow().has_played() {
        return;
    }
    let subs: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
    for event in ["click", "keydown"] {
        let player = player.clone();
        let subs_inner = subs.clone();
        let sub = Subscription::listen(window, event, move |_| {
            player.borrow_mut().unlock();
            // Drop after this handler returns; a closure cannot free itself.
            let done = std::mem::take(&mut *subs_inner.borrow_mut());
            spawn_local(async move {
                drop(done);
                log::debug!("[events] audio unlock listeners removed");
            });
        });
        match sub {
            Ok(s) => subs.borrow_mut().push(s),
            Err(e) => log::warn!("[events] {} unlock listener error: {:?}", event, e),
        }
    }
}

/// "View Projects" and "Contact Me" scroll to their pages.
pub fn wire_nav(
    window: &web::Window,
    document: &web::Document,
    scroll_root: &web::Element,
) -> Vec<Subscription> {
    [(NAV_PROJECTS_ID, NAV_PROJECTS_PAGE), (NAV_CONTACT_ID, NAV_CONTACT_PAGE)]
        .into_iter()
        .filter_map(|(id, page)| {
            let win = window.clone();
            let root = scroll_root.clone();
            dom::on_click(document, id, move || {
                let vh = dom::viewport_height(&win).unwrap_or(0.0);
                scroll::scroll_to_page(&root, page, vh);
            })
        })
        .collect()
}

/// Enter button: leave the loading screen once the gate allows it.
pub fn wire_enter(
    document: &web::Document,
    gate: Rc<RefCell<LoadingGate>>,
) -> Option<Subscription> {
    let doc = document.clone();
    dom::on_click(document, crate::constants::ENTER_BUTTON_ID, move || {
        if gate.borrow_mut().start() {
            overlay::hide_loading_screen(&doc);
            log::info!("[loading] entered experience");
        }
    })
}
