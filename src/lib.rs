#![cfg(target_arch = "wasm32")]
use hero_core::{Capabilities, HeroAnimation, HeroConfig, HeroError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod frame;
mod page;
mod render;

use page::{CallbackSlots, WebPage};
use render::GpuRenderer;

pub(crate) type WebHero = HeroAnimation<WebPage, GpuRenderer>;

fn wire_global_error_log(window: &web::Window) {
    let closure = Closure::wrap(Box::new(move |e: web::ErrorEvent| {
        log::error!(
            "uncaught error: {} ({}:{}:{})",
            e.message(),
            e.filename(),
            e.lineno(),
            e.colno()
        );
    }) as Box<dyn FnMut(web::ErrorEvent)>);
    _ = window.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-wireframe starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                dom::show_fallback(&document);
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    wire_global_error_log(&window);

    let canvas = dom::hero_canvas(&document);
    let capabilities = Capabilities {
        canvas: canvas.is_some(),
        gpu: dom::has_webgpu(&window),
    };

    let mut config = HeroConfig::default();
    if let Some(kind) = canvas.as_ref().and_then(dom::geometry_override) {
        config = config.with_geometry(kind);
    }

    let slots = CallbackSlots::default();
    let page = WebPage::new(window.clone(), document, canvas.clone(), slots.clone());
    let hero: Rc<RefCell<WebHero>> = Rc::new(RefCell::new(HeroAnimation::new(config, page)));
    frame::install_callbacks(&hero, &slots);

    let prepared = {
        let mut rng = StdRng::from_entropy();
        match hero.borrow_mut().begin(capabilities, &mut rng) {
            Ok(prepared) => prepared,
            // already logged, fallback left in place
            Err(_) => return Ok(()),
        }
    };
    frame::wire_canvas_resize(&hero);
    frame::wire_teardown(&hero);

    let Some(canvas) = canvas else {
        return Ok(());
    };
    // No borrow of `hero` is held across this await.
    let built = GpuRenderer::new(canvas, &prepared).await;
    let mut hero = hero.borrow_mut();
    match built {
        Ok(renderer) => {
            if let Err(e) = hero.attach(renderer) {
                log::warn!("renderer ready too late: {e}");
            }
        }
        Err(e) => hero.fail(&HeroError::Construction(format!("{e:#}"))),
    }
    Ok(())
}
