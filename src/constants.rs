pub const FPS: u32 = 60;                      // Frames per second for the runner and preview
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const VIEWPORT_WIDTH: f32 = 1280.0;       // Default simulated viewport width (px)
pub const VIEWPORT_HEIGHT: f32 = 720.0;       // Default simulated viewport height (px)

// --- Carousel ---
pub const CAROUSEL_INTERVAL_MS: u64 = 4000;   // Autoplay period

// --- Intro timeline (delays from timeline start) ---
pub const PARTICLE_COUNT: usize = 30;         // Flowers in the stream
pub const PARTICLE_STREAM_MS: u64 = 1500;     // Time over which flowers are spawned
pub const PARTICLE_LIFETIME_MS: u64 = 3000;   // Flower removal delay after creation
pub const LOGO_REVEAL_MS: u64 = 2000;         // Scene 2
pub const LOGO_RELOCATE_MS: u64 = 4500;       // Scene 3
pub const NAV_LINK_DELAY_MS: u64 = 100;       // Nav background fade before links
pub const NAV_LINK_STAGGER_MS: u64 = 100;     // Between consecutive nav links

// --- Scroll reveal ---
pub const REVEAL_THRESHOLD: f32 = 0.1;        // Fraction of element area in view
pub const TROPHY_DURATION_MS: u64 = 1000;
pub const TROPHY_STAGGER_MS: u64 = 200;
pub const TROPHY_TEXT_LEAD_MS: u64 = 200;     // Texts start this much before trophies land
pub const TROPHY_TEXT_STAGGER_MS: u64 = 100;
pub const TROPHY_TEXT_DURATION_MS: u64 = 500;

// --- Element ids ---
pub const PARTICLE_CONTAINER_ID: &str = "flower-particles-container";
pub const HEADER_ID: &str = "main-header";
pub const LOGO_ID: &str = "blossoms-logo";
pub const COLLAGE_LOGO_ID: &str = "collage-logo-container";
pub const NAV_ID: &str = "main-nav";
pub const HERO_ID: &str = "hero";
pub const CARD_STACK_ID: &str = "event-card-stack";
pub const CARD_NEXT_ID: &str = "card-stack-next";
pub const CARD_PREV_ID: &str = "card-stack-prev";
pub const CARD_DOTS_ID: &str = "card-stack-dots";
pub const DETAILS_TITLE_ID: &str = "event-details-title";
pub const DETAILS_TEXT_ID: &str = "event-details-text";
pub const ACHIEVEMENTS_ID: &str = "achievements";

// --- Class names ---
pub const MENU_CLASS: &str = "hamburger-menu";
pub const MENU_TOGGLE_CLASS: &str = "hamburger-menu-toggle";
pub const SHOW_CLASS: &str = "show";
pub const SLIDE_CLASS: &str = "carousel-slide";
pub const SLIDE_NEXT_CLASS: &str = "carousel-next";
pub const SLIDE_PREV_CLASS: &str = "carousel-prev";
pub const MONTH_BUTTON_CLASS: &str = "nav-btn";
pub const MONTH_PANEL_CLASS: &str = "calendar-flashcard";
pub const ACTIVE_CLASS: &str = "active";
pub const CARD_CLASS: &str = "card-stack_item";
pub const CARD_DETAILS_CLASS: &str = "card-details";
pub const DOT_CLASS: &str = "card-stack-dot";
pub const IS_ACTIVE_CLASS: &str = "is-active";
pub const IS_PREV_CLASS: &str = "is-prev";
pub const IS_NEXT_CLASS: &str = "is-next";
pub const PARTICLE_CLASS: &str = "flower-particle";
pub const LOGO_CENTER_CLASS: &str = "logo-center";
pub const ANIMATION_ELEMENT_CLASS: &str = "animation-element";
pub const VISIBLE_CLASS: &str = "visible";
pub const ANIMATE_ON_SCROLL_CLASS: &str = "animate-on-scroll";
pub const IS_VISIBLE_CLASS: &str = "is-visible";
pub const IS_ANIMATED_CLASS: &str = "is-animated";
pub const TROPHY_CARD_CLASS: &str = "trophy-card";
pub const TROPHY_IMAGE_CLASS: &str = "trophy-image";

pub const MONTH_ATTRIBUTE: &str = "data-month";
pub const TRANSFORM_PROPERTY: &str = "transform";

pub const PARTICLE_COLORS: [&str; 2] = ["var(--primary-pink)", "var(--darker-pink)"];
