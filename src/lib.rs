//! Auto-advancing project carousel.
//!
//! [`SlideshowController`] is the core: a timer-driven slide index with
//! pause, manual navigation and change observers. The remaining modules
//! hold the pieces the showcase window builds around it.

pub mod config;
pub mod constants;
pub mod controller;
pub mod counter;
pub mod details;
pub mod error;
pub mod observer;
pub mod project;
pub mod state;
pub mod typewriter;

pub use controller::SlideshowController;
pub use error::CarouselError;
pub use observer::Subscription;
pub use state::ControllerState;
