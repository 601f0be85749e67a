use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::TEARDOWN_EVENTS;
use crate::page::CallbackSlots;
use crate::WebHero;

/// Fill the tick and reveal slots. Callbacks only hold a `Weak` to the hero
/// so the page's copies of them never keep it alive.
pub fn install_callbacks(hero: &Rc<RefCell<WebHero>>, slots: &CallbackSlots) {
    let hero_tick = Rc::downgrade(hero);
    *slots.frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        with_hero(&hero_tick, |h| h.frame(instant::now()));
    }) as Box<dyn FnMut()>));

    let hero_reveal = Rc::downgrade(hero);
    *slots.reveal.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        with_hero(&hero_reveal, |h| h.on_reveal_timer());
    }) as Box<dyn FnMut()>));
}

pub fn wire_canvas_resize(hero: &Rc<RefCell<WebHero>>) {
    let hero_resize = Rc::downgrade(hero);
    let resize_closure = Closure::wrap(Box::new(move || {
        with_hero(&hero_resize, |h| h.resize());
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

pub fn wire_teardown(hero: &Rc<RefCell<WebHero>>) {
    let Some(window) = web::window() else {
        return;
    };
    for event in TEARDOWN_EVENTS {
        let hero_unload = Rc::downgrade(hero);
        let closure = Closure::wrap(Box::new(move || {
            with_hero(&hero_unload, |h| h.dispose());
        }) as Box<dyn FnMut()>);
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn with_hero(hero: &Weak<RefCell<WebHero>>, f: impl FnOnce(&mut WebHero)) {
    let Some(hero) = hero.upgrade() else {
        return;
    };
    // No borrow outlives a synchronous call, so this only trips on re-entrant dispatch.
    let Ok(mut h) = hero.try_borrow_mut() else {
        log::warn!("hero re-entered from a callback; skipping");
        return;
    };
    f(&mut h);
}
