use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Collapses bursts of events into a single recomputation.
///
/// Call [`Debouncer::trigger`] for every event and poll
/// [`Debouncer::ready`]; it fires once the window has passed since the
/// latest event. Time is passed in so callers decide the clock.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    pending_since: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending_since: None,
        }
    }

    /// Records an event at `now`, restarting the window.
    pub fn trigger(&mut self, now: Instant) {
        self.pending_since = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// True once per burst, when the window has elapsed at `now`.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.saturating_duration_since(since) >= self.window => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until [`Self::ready`] fires, if an event is pending.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending_since
            .map(|since| self.window.saturating_sub(now.saturating_duration_since(since)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_fires_once_after_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.trigger(start);
        debouncer.trigger(start + Duration::from_millis(100));
        debouncer.trigger(start + Duration::from_millis(300));

        assert!(!debouncer.ready(start + Duration::from_millis(600)));
        assert!(debouncer.ready(start + Duration::from_millis(700)));
        assert!(!debouncer.ready(start + Duration::from_millis(800)));
    }

    #[test]
    fn idle_debouncer_never_fires() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        assert!(!debouncer.is_pending());
        assert!(!debouncer.ready(Instant::now()));
        assert_eq!(debouncer.remaining(Instant::now()), None);
    }

    #[test]
    fn remaining_counts_down() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.trigger(start);

        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(150)),
            Some(Duration::from_millis(250))
        );
        assert_eq!(
            debouncer.remaining(start + Duration::from_secs(1)),
            Some(Duration::ZERO)
        );
    }
}
