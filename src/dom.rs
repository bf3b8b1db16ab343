//! The widget's DOM chrome: viewport, rail, slide wrappers, arrows and
//! bullets, plus the inline style writes the state machine drives. Styling
//! beyond what the widget needs to function is left to the host's CSS.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::{ArrowSide, SlideSource};
use crate::error::{CarouselError, Result};

pub const WIDGET_CLASS: &str = "railcar";
pub const VIEWPORT_CLASS: &str = "railcar-viewport";
pub const RAIL_CLASS: &str = "railcar-rail";
pub const SLIDE_CLASS: &str = "railcar-slide";
pub const ARROWS_CLASS: &str = "railcar-arrows";
pub const ARROW_CLASS: &str = "railcar-arrow";
pub const BULLETS_CLASS: &str = "railcar-bullets";
pub const BULLET_CLASS: &str = "railcar-bullet";
pub const ACTIVE_CLASS: &str = "active";

const RAIL_TRANSITION: &str = "transform 0.3s ease-out";

/// The fixed elements built at construction. Arrows and bullets come and go,
/// so the widget layer owns those separately.
pub(crate) struct Chrome {
    pub document: Document,
    pub root: Element,
    pub viewport: Element,
    pub rail: Element,
    pub slides: Vec<Element>,
}

impl Chrome {
    pub(crate) fn build(
        document: &Document,
        container: &Element,
        contents: Vec<Element>,
    ) -> Result<Self> {
        let viewport = create_div(document, VIEWPORT_CLASS)?;
        set_style(&viewport, "overflow", "hidden");
        let rail = create_div(document, RAIL_CLASS)?;
        set_style(&rail, "display", "flex");

        let mut slides = Vec::with_capacity(contents.len());
        for content in &contents {
            let slide = create_div(document, SLIDE_CLASS)?;
            set_style(&slide, "flex", "0 0 auto");
            let _ = slide.append_child(content);
            let _ = rail.append_child(&slide);
            slides.push(slide);
        }

        let _ = viewport.append_child(&rail);
        let _ = container.class_list().add_1(WIDGET_CLASS);
        let _ = container.append_child(&viewport);

        let chrome = Self {
            document: document.clone(),
            root: container.clone(),
            viewport,
            rail,
            slides,
        };
        chrome.set_transition(true);
        Ok(chrome)
    }

    pub(crate) fn apply_offset(&self, offset: f64) {
        set_style(&self.rail, "transform", &format!("translateX({offset:.1}px)"));
    }

    /// Plain mode maintains no rail offset, so a leftover transform from
    /// slide mode must not keep displacing the rail.
    pub(crate) fn clear_offset(&self) {
        clear_style(&self.rail, "transform");
    }

    /// The rail transition is off while a drag tracks the pointer and back
    /// on for committed moves.
    pub(crate) fn set_transition(&self, enabled: bool) {
        let value = if enabled { RAIL_TRANSITION } else { "none" };
        set_style(&self.rail, "transition", value);
    }

    pub(crate) fn mark_active(&self, bullets: &[Element], index: usize) {
        for (i, slide) in self.slides.iter().enumerate() {
            toggle_class(slide, ACTIVE_CLASS, i == index);
        }
        for (i, bullet) in bullets.iter().enumerate() {
            toggle_class(bullet, ACTIVE_CLASS, i == index);
        }
    }

    /// Full-width mode sizes every slide to the viewport and the rail to the
    /// whole sequence; `None` hands sizing back to the host's CSS.
    pub(crate) fn apply_full_width(&self, slide_width: Option<f64>) {
        match slide_width {
            Some(width) => {
                for slide in &self.slides {
                    set_style(slide, "width", &format!("{width:.0}px"));
                }
                let total = width * self.slides.len() as f64;
                set_style(&self.rail, "width", &format!("{total:.0}px"));
            }
            None => {
                for slide in &self.slides {
                    clear_style(slide, "width");
                }
                clear_style(&self.rail, "width");
            }
        }
    }
}

/// Gathers the slide contents named by the configuration. At least one slide
/// is required.
pub(crate) fn collect_slides(document: &Document, source: SlideSource) -> Result<Vec<Element>> {
    let contents = match source {
        SlideSource::Elements(elements) => elements,
        SlideSource::Selector(selector) => {
            let nodes = document.query_selector_all(&selector).map_err(|_| {
                CarouselError::Configuration(format!("invalid slide selector {selector:?}"))
            })?;
            let mut elements = Vec::with_capacity(nodes.length() as usize);
            for i in 0..nodes.length() {
                if let Some(element) = nodes.get(i).and_then(|node| node.dyn_into::<Element>().ok())
                {
                    elements.push(element);
                }
            }
            elements
        }
    };
    if contents.is_empty() {
        return Err(CarouselError::Configuration(
            "at least one slide is required".to_string(),
        ));
    }
    Ok(contents)
}

/// Built-in arrow renderer: an empty button, sided by class.
pub(crate) fn default_arrow(document: &Document, side: ArrowSide) -> Result<Element> {
    let side_class = match side {
        ArrowSide::Previous => "railcar-arrow-previous",
        ArrowSide::Next => "railcar-arrow-next",
    };
    let arrow = create_element(document, "button", ARROW_CLASS)?;
    let _ = arrow.class_list().add_1(side_class);
    Ok(arrow)
}

/// Built-in bullet renderer: a button labelled with the 1-based slide number.
pub(crate) fn default_bullet(document: &Document, index: usize) -> Result<Element> {
    let bullet = create_element(document, "button", BULLET_CLASS)?;
    bullet.set_text_content(Some(&(index + 1).to_string()));
    Ok(bullet)
}

pub(crate) fn create_div(document: &Document, class: &str) -> Result<Element> {
    create_element(document, "div", class)
}

fn create_element(document: &Document, tag: &str, class: &str) -> Result<Element> {
    let element = document.create_element(tag).map_err(|_| {
        CarouselError::Configuration(format!("failed to create <{tag}> element"))
    })?;
    element.set_class_name(class);
    Ok(element)
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

fn clear_style(element: &Element, property: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().remove_property(property);
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    if on {
        let _ = element.class_list().add_1(class);
    } else {
        let _ = element.class_list().remove_1(class);
    }
}
