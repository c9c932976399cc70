use std::time::Duration;

pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Default frames per second

pub const SLIDE_PERIOD: Duration = Duration::from_millis(3800); // Auto-advance interval
pub const CARD_TRANSITION: f32 = 0.5;         // Fade/scale of a card entering or leaving (seconds)
pub const COUNTER_DURATION: Duration = Duration::from_millis(900);

// Hero tagline timings
pub const TYPE_DELAY: Duration = Duration::from_millis(200);          // Before the first character
pub const TYPING_SPEED: Duration = Duration::from_millis(35);         // Per character typed
pub const DELETING_SPEED: Duration = Duration::from_millis(20);       // Per character deleted
pub const PAUSE_AFTER_TYPED: Duration = Duration::from_millis(600);
pub const PAUSE_AFTER_DELETED: Duration = Duration::from_millis(150);

pub const TAGLINES: [&str; 10] = [
    "Build",
    "Innovate",
    "Scale",
    "Design",
    "Optimize",
    "Automate",
    "Secure",
    "Integrate",
    "Analyze",
    "Deliver",
];
