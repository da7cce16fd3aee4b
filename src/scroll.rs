use folio_core::scroll::{page_top, raw_offset};
use web_sys as web;

/// Current normalised offset of the scroll container.
#[inline]
pub fn read_offset(el: &web::Element) -> f32 {
    raw_offset(
        el.scroll_top() as f64,
        el.scroll_height() as f64,
        el.client_height() as f64,
    )
}

/// Smooth-scroll the container so page `page` sits at the top.
pub fn scroll_to_page(el: &web::Element, page: u32, viewport_height: f64) {
    let opts = web::ScrollToOptions::new();
    opts.set_top(page_top(page, viewport_height));
    opts.set_behavior(web::ScrollBehavior::Smooth);
    el.scroll_to_with_scroll_to_options(&opts);
}
