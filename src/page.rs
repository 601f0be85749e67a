use hero_core::HostPage;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

/// A JS callback filled in once the hero it drives exists.
pub type CallbackSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

#[derive(Clone, Default)]
pub struct CallbackSlots {
    pub frame: CallbackSlot,
    pub reveal: CallbackSlot,
}

/// The browser page as seen by the hero state machine.
pub struct WebPage {
    window: web::Window,
    document: web::Document,
    canvas: Option<web::HtmlCanvasElement>,
    slots: CallbackSlots,
    frame_handle: Option<i32>,
    reveal_handle: Option<i32>,
}

impl WebPage {
    pub fn new(
        window: web::Window,
        document: web::Document,
        canvas: Option<web::HtmlCanvasElement>,
        slots: CallbackSlots,
    ) -> Self {
        Self {
            window,
            document,
            canvas,
            slots,
            frame_handle: None,
            reveal_handle: None,
        }
    }
}

impl HostPage for WebPage {
    fn request_frame(&mut self) {
        let slot = self.slots.frame.borrow();
        let Some(cb) = slot.as_ref() else {
            log::warn!("frame requested before the tick callback was installed");
            return;
        };
        match self
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
        {
            Ok(handle) => self.frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            _ = self.window.cancel_animation_frame(handle);
        }
        // a reveal still pending at teardown would only be ignored
        if let Some(handle) = self.reveal_handle.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn schedule_reveal(&mut self, delay_ms: u32) {
        let slot = self.slots.reveal.borrow();
        let Some(cb) = slot.as_ref() else {
            return;
        };
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay_ms as i32,
            ) {
            Ok(handle) => self.reveal_handle = Some(handle),
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
    }

    fn reveal_canvas(&mut self) {
        self.reveal_handle = None;
        if let Some(canvas) = &self.canvas {
            dom::reveal(&self.document, canvas);
        }
    }

    fn show_fallback(&mut self) {
        dom::show_fallback(&self.document);
    }

    fn container_width(&self) -> Option<f64> {
        dom::container_width(&self.document, self.canvas.as_ref())
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }
}
