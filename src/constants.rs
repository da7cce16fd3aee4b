// Page wiring constants for the web front-end.
//
// Element ids, asset URLs and overlay timing live here so the DOM contract
// with `index.html` is visible in one place.

// Canvas and scroll container
pub const CANVAS_ID: &str = "app-canvas";
pub const SCROLL_ROOT_ID: &str = "scroll-root";

// Loading screen
pub const LOADING_SCREEN_ID: &str = "loading-screen";
pub const LOADING_BAR_ID: &str = "loading-bar";
pub const LOADING_PERCENT_ID: &str = "loading-percent";
pub const ENTER_BUTTON_ID: &str = "enter-button";

// Overlay navigation; pages are multiples of the viewport height
pub const NAV_PROJECTS_ID: &str = "nav-projects";
pub const NAV_CONTACT_ID: &str = "nav-contact";
pub const NAV_PROJECTS_PAGE: u32 = 2;
pub const NAV_CONTACT_PAGE: u32 = 4;

// Attribute on the overlay root that mirrors the current act
pub const OVERLAY_ID: &str = "overlay";
pub const ACT_ATTRIBUTE: &str = "data-act";

// Subject manifest
pub const HERO_MANIFEST_URL: &str = "/models/hero.json";
// Assets requested during boot (subject manifest only)
pub const BOOT_ASSET_COUNT: u32 = 1;

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp long stalls (tab switches)

// Chime noise buffer length (seconds of audio)
pub const CHIME_NOISE_SEC: f32 = 3.0;
