use web_sys::Element;

use crate::autoplay;
use crate::error::{CarouselError, Result};

/// Slide contents gathered when neither explicit elements nor a selector is
/// configured.
pub const DEFAULT_SLIDE_SELECTOR: &str = ".railcar-slide-content";

/// How the rail moves between slides. In `Plain` mode no rail offset is
/// maintained and dragging is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Plain,
    Slide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowSide {
    Previous,
    Next,
}

/// Where the slide contents come from. The two variants are mutually
/// exclusive by construction.
pub enum SlideSource {
    Elements(Vec<Element>),
    Selector(String),
}

impl Default for SlideSource {
    fn default() -> Self {
        SlideSource::Selector(DEFAULT_SLIDE_SELECTOR.to_string())
    }
}

/// Custom renderer for an arrow; receives the side it points to.
pub type ArrowBuilder = Box<dyn Fn(ArrowSide) -> Element>;

/// Custom renderer for a bullet; receives the slide index it targets.
pub type BulletBuilder = Box<dyn Fn(usize) -> Element>;

/// Construction options for [`crate::Carousel`]. Missing builders fall back
/// to the built-in renderers (empty arrow buttons, numeric bullet labels).
pub struct Options {
    pub slides: SlideSource,
    pub full_width_slide: bool,
    pub animation: Animation,
    pub draggable: bool,
    pub arrows: bool,
    pub arrow_builder: Option<ArrowBuilder>,
    pub bullets: bool,
    pub bullet_builder: Option<BulletBuilder>,
    /// Positive whole milliseconds; autoplay starts at construction when set.
    pub autoplay_delay: Option<f64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            slides: SlideSource::default(),
            full_width_slide: true,
            animation: Animation::Slide,
            draggable: true,
            arrows: false,
            arrow_builder: None,
            bullets: false,
            bullet_builder: None,
            autoplay_delay: None,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<()> {
        if self.draggable && self.animation != Animation::Slide {
            return Err(CarouselError::Configuration(
                "draggable requires the slide animation".to_string(),
            ));
        }
        if let Some(delay) = self.autoplay_delay {
            autoplay::validate_delay(delay)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn dragging_without_slide_animation_is_rejected() {
        let options = Options {
            animation: Animation::Plain,
            draggable: true,
            ..Options::default()
        };
        assert!(matches!(
            options.validate(),
            Err(CarouselError::Configuration(_))
        ));
    }

    #[test]
    fn plain_animation_without_dragging_is_accepted() {
        let options = Options {
            animation: Animation::Plain,
            draggable: false,
            ..Options::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn autoplay_delay_is_validated_at_construction() {
        let options = Options {
            autoplay_delay: Some(-5.0),
            ..Options::default()
        };
        assert!(matches!(
            options.validate(),
            Err(CarouselError::Validation(_))
        ));
    }
}
