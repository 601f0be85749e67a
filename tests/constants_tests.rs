// Host-side checks of the page contract constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_plain_identifiers() {
    for id in [HERO_CANVAS_ID, FALLBACK_IMAGE_ID] {
        assert!(!id.is_empty());
        assert!(
            id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "id {id:?} would need escaping in a selector"
        );
    }
    assert_ne!(HERO_CANVAS_ID, FALLBACK_IMAGE_ID);
}

#[test]
fn container_selector_is_a_class_selector() {
    assert!(CONTAINER_SELECTOR.starts_with('.'));
    assert!(!CONTAINER_SELECTOR[1..].contains(char::is_whitespace));
}

#[test]
fn geometry_attribute_is_a_data_attribute() {
    assert!(GEOMETRY_ATTRIBUTE.starts_with("data-"));
    assert_eq!(GEOMETRY_ATTRIBUTE, GEOMETRY_ATTRIBUTE.to_ascii_lowercase());
}

#[test]
fn toggled_classes_are_distinct_single_tokens() {
    for class in [CANVAS_ACTIVE_CLASS, FALLBACK_FADE_CLASS] {
        assert!(!class.is_empty() && !class.contains(' '));
    }
    assert_ne!(CANVAS_ACTIVE_CLASS, FALLBACK_FADE_CLASS);
}

#[test]
fn fallback_is_fully_opaque_when_shown() {
    let opacity: f64 = FALLBACK_VISIBLE_OPACITY.parse().expect("numeric opacity");
    assert_eq!(opacity, 1.0);
    assert_ne!(CANVAS_VISIBLE_DISPLAY, "none");
}

#[test]
fn teardown_listens_for_unload() {
    assert!(TEARDOWN_EVENTS.contains(&"beforeunload"));
}
