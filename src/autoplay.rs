use crate::error::{CarouselError, Result};

/// An autoplay delay must be a positive, finite, whole number of
/// milliseconds. The validated value narrows to the `u32` the browser
/// interval timer takes.
pub fn validate_delay(delay_ms: f64) -> Result<u32> {
    if !delay_ms.is_finite()
        || delay_ms <= 0.0
        || delay_ms.fract() != 0.0
        || delay_ms > f64::from(u32::MAX)
    {
        return Err(CarouselError::Validation(delay_ms));
    }
    Ok(delay_ms as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_whole_milliseconds() {
        assert_eq!(validate_delay(1000.0).unwrap(), 1000);
        assert_eq!(validate_delay(1.0).unwrap(), 1);
    }

    #[test]
    fn rejects_zero_and_negative_delays() {
        assert!(matches!(
            validate_delay(0.0),
            Err(CarouselError::Validation(_))
        ));
        assert!(matches!(
            validate_delay(-5.0),
            Err(CarouselError::Validation(_))
        ));
    }

    #[test]
    fn rejects_fractional_and_non_finite_delays() {
        assert!(validate_delay(99.5).is_err());
        assert!(validate_delay(f64::NAN).is_err());
        assert!(validate_delay(f64::INFINITY).is_err());
    }
}
