use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// An event listener that is removed again when dropped.
pub struct Subscription {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Subscription {
    pub fn listen(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Click listener on an element by id. Missing elements are logged and
/// skipped; the page still works without them.
pub fn on_click(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) -> Option<Subscription> {
    let Some(el) = document.get_element_by_id(element_id) else {
        log::warn!("[dom] #{} not found; click handler skipped", element_id);
        return None;
    };
    match Subscription::listen(&el, "click", move |_| handler()) {
        Ok(sub) => Some(sub),
        Err(e) => {
            log::error!("[dom] #{} click listener error: {:?}", element_id, e);
            None
        }
    }
}

/// CSS pixel width of the viewport.
pub fn viewport_width(window: &web::Window) -> Option<f64> {
    window.inner_width().ok().and_then(|v| v.as_f64())
}

pub fn viewport_height(window: &web::Window) -> Option<f64> {
    window.inner_height().ok().and_then(|v| v.as_f64())
}

/// Match the canvas backing store to its CSS size times `dpr`. Returns the
/// new size in physical pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, dpr: f64) -> (u32, u32) {
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    if canvas.width() != w_px || canvas.height() != h_px {
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

/// Device pixel ratio clamped into `[min, max]`.
pub fn clamped_dpr(window: &web::Window, min: f64, max: f64) -> f64 {
    window.device_pixel_ratio().clamp(min, max)
}
