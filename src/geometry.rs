use web_sys::Element;

use crate::error::{CarouselError, Result};

/// Live layout measurements, in screen coordinates. No caching: layout can
/// change between calls, so every call re-measures.
pub trait Geometry {
    fn slide_count(&self) -> usize;
    fn viewport_width(&self) -> f64;
    fn viewport_left(&self) -> f64;
    fn rail_left(&self) -> f64;
    fn slide_left(&self, index: usize) -> Result<f64>;
}

/// Probe over the widget's live DOM elements.
pub(crate) struct DomGeometry<'a> {
    pub viewport: &'a Element,
    pub rail: &'a Element,
    pub slides: &'a [Element],
}

impl Geometry for DomGeometry<'_> {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn viewport_width(&self) -> f64 {
        self.viewport.get_bounding_client_rect().width()
    }

    fn viewport_left(&self) -> f64 {
        self.viewport.get_bounding_client_rect().left()
    }

    fn rail_left(&self) -> f64 {
        self.rail.get_bounding_client_rect().left()
    }

    fn slide_left(&self, index: usize) -> Result<f64> {
        let slide = self.slides.get(index).ok_or(CarouselError::Index {
            index,
            count: self.slides.len(),
        })?;
        Ok(slide.get_bounding_client_rect().left())
    }
}

/// Test double with mutable positions. Models a rail laid out at the
/// viewport's origin with a translateX transform applied: the measured rail
/// left is `origin + offset`, and slide `i` sits `slide_offsets[i]` pixels
/// into the rail.
#[cfg(test)]
pub(crate) struct FakeGeometry {
    pub origin: f64,
    pub viewport_width: f64,
    pub offset: f64,
    pub slide_offsets: Vec<f64>,
}

#[cfg(test)]
impl FakeGeometry {
    /// `count` slides, each `width` pixels wide, rail at rest.
    pub(crate) fn evenly(count: usize, width: f64) -> Self {
        Self {
            origin: 0.0,
            viewport_width: width,
            offset: 0.0,
            slide_offsets: (0..count).map(|i| i as f64 * width).collect(),
        }
    }

    pub(crate) fn apply(&mut self, commit: &crate::track::Commit) {
        if let Some(offset) = commit.offset {
            self.offset = offset;
        }
    }
}

#[cfg(test)]
impl Geometry for FakeGeometry {
    fn slide_count(&self) -> usize {
        self.slide_offsets.len()
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn viewport_left(&self) -> f64 {
        self.origin
    }

    fn rail_left(&self) -> f64 {
        self.origin + self.offset
    }

    fn slide_left(&self, index: usize) -> Result<f64> {
        let within = self
            .slide_offsets
            .get(index)
            .ok_or(CarouselError::Index {
                index,
                count: self.slide_offsets.len(),
            })?;
        Ok(self.origin + self.offset + within)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_probe_rejects_out_of_range_index() {
        let fake = FakeGeometry::evenly(3, 100.0);
        assert!(matches!(
            fake.slide_left(3),
            Err(CarouselError::Index { index: 3, count: 3 })
        ));
    }

    #[test]
    fn fake_probe_remeasures_after_layout_change() {
        let mut fake = FakeGeometry::evenly(3, 100.0);
        assert_eq!(fake.slide_left(1).unwrap(), 100.0);
        fake.offset = -100.0;
        assert_eq!(fake.slide_left(1).unwrap(), 0.0);
    }
}
