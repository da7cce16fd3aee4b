use crate::constants::{
    ACT_ATTRIBUTE, ENTER_BUTTON_ID, LOADING_BAR_ID, LOADING_PERCENT_ID, LOADING_SCREEN_ID,
    OVERLAY_ID,
};
use folio_core::timeline::Act;
use web_sys as web;

#[inline]
fn set_display(document: &web::Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        if visible {
            _ = cl.remove_1("hidden");
            _ = el.set_attribute("style", "");
        } else {
            _ = cl.add_1("hidden");
            _ = el.set_attribute("style", "display:none");
        }
    }
}

/// Loading bar width and the numeric percentage next to it.
pub fn set_progress(document: &web::Document, percent: f32) {
    let pct = percent.clamp(0.0, 100.0);
    if let Some(el) = document.get_element_by_id(LOADING_BAR_ID) {
        _ = el.set_attribute("style", &format!("width:{:.0}%", pct));
    }
    if let Some(el) = document.get_element_by_id(LOADING_PERCENT_ID) {
        el.set_text_content(Some(&format!("{:.0}%", pct)));
    }
}

#[inline]
pub fn reveal_enter_button(document: &web::Document) {
    set_display(document, ENTER_BUTTON_ID, true);
}

#[inline]
pub fn hide_loading_screen(document: &web::Document) {
    set_display(document, LOADING_SCREEN_ID, false);
}

/// Mirror the current act onto the overlay so CSS can highlight sections.
pub fn set_act(document: &web::Document, act: Option<Act>) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        match act {
            Some(a) => {
                _ = el.set_attribute(ACT_ATTRIBUTE, a.name());
            }
            None => {
                _ = el.remove_attribute(ACT_ATTRIBUTE);
            }
        }
    }
}
