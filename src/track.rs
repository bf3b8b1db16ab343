use crate::config::Animation;
use crate::error::{CarouselError, Result};
use crate::geometry::Geometry;

/// Outcome of a committed transition, applied to the DOM by the widget
/// layer: re-mark the active slide/bullet, and move the rail when an offset
/// was computed (slide animation only).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commit {
    pub index: usize,
    pub offset: Option<f64>,
}

/// The slide-position state machine: active index, rail offset, autoplay
/// suppression and animation mode. Every index mutation, whatever the input
/// source, goes through [`Track::commit`].
#[derive(Debug)]
pub struct Track {
    index: usize,
    count: usize,
    offset: f64,
    animation: Animation,
    suppress_autoplay: bool,
}

impl Track {
    pub fn new(count: usize, animation: Animation) -> Self {
        Self {
            index: 0,
            count,
            offset: 0.0,
            animation,
            suppress_autoplay: false,
        }
    }

    pub fn active_index(&self) -> usize {
        self.index
    }

    pub fn slide_count(&self) -> usize {
        self.count
    }

    pub fn rail_offset(&self) -> f64 {
        self.offset
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn set_animation(&mut self, animation: Animation) {
        self.animation = animation;
    }

    /// Advance one slide, wrapping past the end.
    pub fn next(&mut self, geometry: &impl Geometry) -> Result<Commit> {
        let index = (self.index + 1) % self.count;
        self.commit(index, geometry)
    }

    /// Go back one slide, wrapping past the start.
    pub fn previous(&mut self, geometry: &impl Geometry) -> Result<Commit> {
        let index = (self.index + self.count - 1) % self.count;
        self.commit(index, geometry)
    }

    pub fn go_to(&mut self, index: usize, geometry: &impl Geometry) -> Result<Commit> {
        if index >= self.count {
            return Err(CarouselError::Range {
                index,
                count: self.count,
            });
        }
        self.commit(index, geometry)
    }

    /// The single commit-transition step. Sets the autoplay suppression
    /// flag, and in slide mode computes the rail offset as
    /// `rail_left - slide_left(index)`, both measured before the mutation;
    /// the current transform cancels out of the subtraction, so the result
    /// lands the slide flush with the viewport's left edge.
    pub fn commit(&mut self, index: usize, geometry: &impl Geometry) -> Result<Commit> {
        let offset = match self.animation {
            Animation::Slide => Some(geometry.rail_left() - geometry.slide_left(index)?),
            Animation::Plain => None,
        };
        self.suppress_autoplay = true;
        self.index = index;
        if let Some(offset) = offset {
            self.offset = offset;
        }
        Ok(Commit { index, offset })
    }

    /// Rail offset written directly during a drag, with no index change.
    /// Counts as user activity, so it suppresses the next autoplay tick.
    pub fn set_live_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.suppress_autoplay = true;
    }

    /// One autoplay tick: a suppressed tick consumes the flag and skips the
    /// advance (the slide already moved under the user's action); an
    /// advancing tick must not suppress the tick after it, so the flag its
    /// own commit sets is cleared again.
    pub fn autoplay_tick(&mut self, geometry: &impl Geometry) -> Result<Option<Commit>> {
        if std::mem::take(&mut self.suppress_autoplay) {
            return Ok(None);
        }
        let commit = self.next(geometry)?;
        self.suppress_autoplay = false;
        Ok(Some(commit))
    }

    /// Clears a pending suppression, e.g. after the initial alignment commit
    /// so a configured autoplay starts ticking immediately.
    pub fn clear_autoplay_suppression(&mut self) {
        self.suppress_autoplay = false;
    }

    #[cfg(test)]
    pub(crate) fn autoplay_suppressed(&self) -> bool {
        self.suppress_autoplay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FakeGeometry;

    fn slide_track(count: usize) -> (Track, FakeGeometry) {
        (
            Track::new(count, Animation::Slide),
            FakeGeometry::evenly(count, 100.0),
        )
    }

    #[test]
    fn next_wraps_at_the_end() {
        let (mut track, mut geo) = slide_track(3);
        for expected in [1, 2, 0, 1] {
            let commit = track.next(&geo).unwrap();
            geo.apply(&commit);
            assert_eq!(track.active_index(), expected);
        }
    }

    #[test]
    fn previous_wraps_at_the_start() {
        let (mut track, mut geo) = slide_track(3);
        let commit = track.previous(&geo).unwrap();
        geo.apply(&commit);
        assert_eq!(track.active_index(), 2);
        let commit = track.previous(&geo).unwrap();
        geo.apply(&commit);
        assert_eq!(track.active_index(), 1);
    }

    #[test]
    fn single_slide_navigation_stays_put() {
        let (mut track, geo) = slide_track(1);
        assert_eq!(track.next(&geo).unwrap().index, 0);
        assert_eq!(track.previous(&geo).unwrap().index, 0);
    }

    #[test]
    fn go_to_out_of_range_fails_and_leaves_state_untouched() {
        let (mut track, geo) = slide_track(3);
        let err = track.go_to(3, &geo).unwrap_err();
        assert!(matches!(err, CarouselError::Range { index: 3, count: 3 }));
        assert_eq!(track.active_index(), 0);
        assert_eq!(track.rail_offset(), 0.0);
    }

    #[test]
    fn settled_commit_puts_active_slide_at_viewport_left() {
        let (mut track, mut geo) = slide_track(5);
        let commit = track.go_to(3, &geo).unwrap();
        geo.apply(&commit);
        assert_eq!(geo.slide_left(3).unwrap(), geo.viewport_left());

        // Still true when committing from a mid-drag rail position.
        track.set_live_offset(-123.4);
        geo.offset = -123.4;
        let commit = track.go_to(1, &geo).unwrap();
        geo.apply(&commit);
        assert_eq!(geo.slide_left(1).unwrap(), geo.viewport_left());
    }

    #[test]
    fn plain_mode_commit_skips_offset_math() {
        let mut track = Track::new(3, Animation::Plain);
        let geo = FakeGeometry::evenly(3, 100.0);
        let commit = track.go_to(2, &geo).unwrap();
        assert_eq!(commit, Commit { index: 2, offset: None });
        assert_eq!(track.rail_offset(), 0.0);
    }

    #[test]
    fn manual_transition_suppresses_exactly_one_autoplay_tick() {
        let (mut track, mut geo) = slide_track(4);
        let commit = track.next(&geo).unwrap();
        geo.apply(&commit);
        assert_eq!(track.active_index(), 1);

        // The suppressed tick consumes the flag without advancing.
        assert!(track.autoplay_tick(&geo).unwrap().is_none());
        assert_eq!(track.active_index(), 1);

        // Every following tick advances.
        for expected in [2, 3, 0] {
            let commit = track.autoplay_tick(&geo).unwrap().unwrap();
            geo.apply(&commit);
            assert_eq!(track.active_index(), expected);
        }
    }

    #[test]
    fn live_drag_offset_suppresses_autoplay() {
        let (mut track, geo) = slide_track(3);
        track.clear_autoplay_suppression();
        track.set_live_offset(-12.0);
        assert!(track.autoplay_suppressed());
        assert_eq!(track.rail_offset(), -12.0);
        assert!(track.autoplay_tick(&geo).unwrap().is_none());
    }
}
