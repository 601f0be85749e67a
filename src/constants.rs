/// Page contract for the hero banner.
///
/// Element ids, class names and attribute names the wasm module expects the
/// hosting page to provide. Keeping them here keeps string literals out of
/// the DOM plumbing.
// Render target; carries the optional geometry override attribute
pub const HERO_CANVAS_ID: &str = "hero-canvas";
pub const GEOMETRY_ATTRIBUTE: &str = "data-geometry";

// Static image shown until (or instead of) the animation
pub const FALLBACK_IMAGE_ID: &str = "hero-fallback";

// Layout container whose width bounds the canvas
pub const CONTAINER_SELECTOR: &str = ".featured";

// Classes toggled on reveal / failure
pub const CANVAS_ACTIVE_CLASS: &str = "active";
pub const FALLBACK_FADE_CLASS: &str = "fade-out";

// Inline styles applied alongside the classes, for pages without the stylesheet
pub const CANVAS_VISIBLE_DISPLAY: &str = "block";
pub const FALLBACK_VISIBLE_OPACITY: &str = "1";

// Window events that end the animation
pub const TEARDOWN_EVENTS: [&str; 2] = ["beforeunload", "pagehide"];
