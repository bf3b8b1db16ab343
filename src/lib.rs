//! Horizontal carousel widget for the browser, compiled to WebAssembly.
//!
//! Slides sit on a rail clipped by a viewport; arrows, bullets, drag
//! gestures, autoplay and resize reconciliation all move between them
//! through one shared commit path, so exactly one offset wins per input and
//! the active marking always matches the chosen slide.

pub mod autoplay;
pub mod config;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod resize;
pub mod track;

mod dom;
mod widget;

pub use config::{
    Animation, ArrowBuilder, ArrowSide, BulletBuilder, Options, SlideSource,
    DEFAULT_SLIDE_SELECTOR,
};
pub use error::{CarouselError, Result};
pub use widget::Carousel;
