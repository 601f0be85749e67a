use hero_core::{GeometryKind, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::*;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn hero_canvas(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(HERO_CANVAS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

fn fallback_image(document: &web::Document) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(FALLBACK_IMAGE_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// `navigator.gpu` exists. Says nothing about whether an adapter will be granted.
pub fn has_webgpu(window: &web::Window) -> bool {
    js_sys::Reflect::get(&window.navigator(), &"gpu".into())
        .map(|gpu| !gpu.is_undefined() && !gpu.is_null())
        .unwrap_or(false)
}

/// Geometry requested by the page through `data-geometry`, if any.
pub fn geometry_override(canvas: &web::HtmlCanvasElement) -> Option<GeometryKind> {
    let raw = canvas.get_attribute(GEOMETRY_ATTRIBUTE)?;
    match raw.parse::<GeometryKind>() {
        Ok(kind) => Some(kind),
        Err(e) => {
            log::warn!("ignoring {GEOMETRY_ATTRIBUTE}: {e}");
            None
        }
    }
}

/// Keep the static image visible: drop any fade and force full opacity.
pub fn show_fallback(document: &web::Document) {
    if let Some(img) = fallback_image(document) {
        _ = img.class_list().remove_1(FALLBACK_FADE_CLASS);
        _ = img.style().set_property("opacity", FALLBACK_VISIBLE_OPACITY);
    }
}

/// Fade the static image out and show the live canvas.
pub fn reveal(document: &web::Document, canvas: &web::HtmlCanvasElement) {
    _ = canvas.class_list().add_1(CANVAS_ACTIVE_CLASS);
    _ = canvas.style().set_property("display", CANVAS_VISIBLE_DISPLAY);
    if let Some(img) = fallback_image(document) {
        _ = img.class_list().add_1(FALLBACK_FADE_CLASS);
    }
}

/// Width of the `.featured` container, or of the canvas parent when the page
/// has no such container. `None` while layout reports nothing useful.
pub fn container_width(
    document: &web::Document,
    canvas: Option<&web::HtmlCanvasElement>,
) -> Option<f64> {
    let container = document
        .query_selector(CONTAINER_SELECTOR)
        .ok()
        .flatten()
        .or_else(|| canvas.and_then(|c| c.parent_element()))?;
    let width = container.client_width();
    (width > 0).then_some(width as f64)
}

/// Size the canvas in CSS pixels and its backing store in device pixels.
pub fn apply_canvas_size(
    canvas: &web::HtmlCanvasElement,
    viewport: Viewport,
    pixel_ratio: f64,
) -> (u32, u32) {
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
    let (w_px, h_px) = viewport.backing_size(pixel_ratio);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}
