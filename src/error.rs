use thiserror::Error;

pub type Result<T> = std::result::Result<T, CarouselError>;

/// Everything a carousel operation can fail with. All variants are raised
/// synchronously to the caller of the offending operation; transient input
/// anomalies (stale gesture events, duplicate drag starts, stopping an idle
/// autoplay) are no-ops, not errors.
#[derive(Debug, Error)]
pub enum CarouselError {
    /// Invalid or contradictory construction options.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Navigation to an index outside the slide sequence.
    #[error("slide index {index} out of range (slide count {count})")]
    Range { index: usize, count: usize },

    /// Autoplay delay that is not a positive whole number of milliseconds.
    #[error("autoplay delay must be a positive whole number of milliseconds, got {0}")]
    Validation(f64),

    /// Geometry probe for a slide outside the sequence. Unreachable while the
    /// active-index invariant holds; seeing it means a state-machine bug.
    #[error("geometry probe for slide {index} out of range (slide count {count})")]
    Index { index: usize, count: usize },
}
