/// Quiescence window for resize reconciliation, in milliseconds.
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

/// Deadline model behind the debounced resize reconciliation. Every signal
/// restarts the window (cancel-then-reschedule); only a timer that survives
/// to the last deadline fires, so a burst of signals reconciles once.
#[derive(Debug, Default)]
pub struct Debounce {
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn signal(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + f64::from(RESIZE_DEBOUNCE_MS));
    }

    /// True exactly once per window, when the deadline has passed.
    pub fn due(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Milliseconds left until the pending deadline. A timer that fires a
    /// hair before the clock deadline uses this to finish the remainder
    /// instead of dropping the pass.
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.deadline.map(|deadline| (deadline - now_ms).max(0.0))
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: f64 = RESIZE_DEBOUNCE_MS as f64;

    #[test]
    fn burst_of_signals_fires_once() {
        let mut debounce = Debounce::new();
        for i in 0..10 {
            debounce.signal(f64::from(i) * 10.0);
        }
        // The early deadlines were superseded by later signals.
        assert!(!debounce.due(90.0 + WINDOW - 1.0));
        assert!(debounce.due(90.0 + WINDOW));
        assert!(!debounce.due(90.0 + WINDOW * 2.0));
    }

    #[test]
    fn fires_at_the_exact_deadline() {
        let mut debounce = Debounce::new();
        debounce.signal(1000.0);
        assert!(!debounce.due(1000.0 + WINDOW - 0.1));
        assert!(debounce.due(1000.0 + WINDOW));
    }

    #[test]
    fn cancel_clears_the_pending_window() {
        let mut debounce = Debounce::new();
        debounce.signal(0.0);
        assert!(debounce.pending());
        debounce.cancel();
        assert!(!debounce.pending());
        assert!(!debounce.due(WINDOW * 10.0));
    }

    #[test]
    fn idle_debounce_never_fires() {
        let mut debounce = Debounce::new();
        assert!(!debounce.due(1e12));
    }

    #[test]
    fn early_timer_keeps_the_window_and_reports_the_remainder() {
        // A timer callback arriving just before the clock deadline must not
        // consume the window: `due` stays false and `remaining_ms` carries
        // the wait still owed, so the pass is rescheduled, not dropped.
        let mut debounce = Debounce::new();
        debounce.signal(1000.0);
        let early = 1000.0 + WINDOW - 2.0;
        assert!(!debounce.due(early));
        assert!(debounce.pending());
        assert_eq!(debounce.remaining_ms(early), Some(2.0));
        assert!(debounce.due(1000.0 + WINDOW));
        assert_eq!(debounce.remaining_ms(1000.0 + WINDOW), None);
    }

    #[test]
    fn remaining_clamps_past_the_deadline() {
        let mut debounce = Debounce::new();
        debounce.signal(0.0);
        assert_eq!(debounce.remaining_ms(WINDOW + 50.0), Some(0.0));
        debounce.cancel();
        assert_eq!(debounce.remaining_ms(0.0), None);
    }
}
