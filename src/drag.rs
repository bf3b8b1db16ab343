use crate::error::Result;
use crate::geometry::Geometry;

/// Identity of the input driving a drag. Mouse and touch listeners are both
/// registered, but move/end events only count when this identity matches, so
/// the two sources are exclusive through the single session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerId {
    Mouse,
    Touch(i32),
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    pointer: PointerId,
    start_x: f64,
    entry_offset: f64,
}

/// The drag state machine: Idle -> Dragging -> Idle, with at most one
/// session at a time. Events for any other identity, or for a session that
/// already closed, are no-ops.
#[derive(Debug, Default)]
pub struct Arbiter {
    session: Option<DragSession>,
}

impl Arbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Idle -> Dragging. Returns false when a session is already active and
    /// the start is ignored.
    pub fn begin(&mut self, pointer: PointerId, start_x: f64, entry_offset: f64) -> bool {
        if self.session.is_some() {
            log::debug!("drag start ignored, session already active");
            return false;
        }
        self.session = Some(DragSession {
            pointer,
            start_x,
            entry_offset,
        });
        true
    }

    /// Live rail offset for a matching move: the offset at entry plus how
    /// far the pointer travelled. None for untracked identities.
    pub fn update(&self, pointer: PointerId, current_x: f64) -> Option<f64> {
        let session = self.session.as_ref()?;
        if session.pointer != pointer {
            return None;
        }
        Some(session.entry_offset + (current_x - session.start_x))
    }

    /// Dragging -> Idle. Returns true when this event closed the session;
    /// an end for another identity or an already-closed session is a no-op.
    pub fn finish(&mut self, pointer: PointerId) -> bool {
        match self.session {
            Some(session) if session.pointer == pointer => {
                self.session = None;
                true
            }
            _ => false,
        }
    }

    /// Force-ends whatever session is active, whoever owns it. Used when
    /// dragging is disabled or the animation mode changes mid-drag.
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }
}

/// Drag-end threshold rule: scanning slides first to second-to-last, commit
/// the earliest one whose left edge is still at or right of the viewport's
/// left edge; when every one of them has scrolled past, commit the last.
/// Both sides are rounded to whole pixels and an exact tie qualifies.
pub fn resolve_drop_index(geometry: &impl Geometry) -> Result<usize> {
    let count = geometry.slide_count();
    let viewport_left = geometry.viewport_left().round();
    for index in 0..count.saturating_sub(1) {
        if geometry.slide_left(index)?.round() >= viewport_left {
            return Ok(index);
        }
    }
    Ok(count.saturating_sub(1))
}
