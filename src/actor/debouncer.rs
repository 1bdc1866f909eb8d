use std::time::Duration;

use tokio::time::Instant;

/// Pure debouncer: only handles timing.
///
/// Every request restarts the quiet period; a pass is due once no request
/// has arrived for the whole period.
pub(super) struct Debouncer {
    quiet_period: Duration,
    last_request: Option<Instant>,
}

impl Debouncer {
    pub(super) fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            last_request: None,
        }
    }

    pub(super) fn set_quiet_period(&mut self, quiet_period: Duration) {
        self.quiet_period = quiet_period;
    }

    /// Record a request, restarting the quiet period.
    pub(super) fn touch(&mut self) {
        self.last_request = Some(Instant::now());
    }

    /// Whether a request is waiting for its quiet period to end.
    pub(super) fn is_armed(&self) -> bool {
        self.last_request.is_some()
    }

    pub(super) fn is_ready(&self) -> bool {
        self.last_request
            .is_some_and(|last| last.elapsed() >= self.quiet_period)
    }

    /// Disarm and return `true` if the quiet period has elapsed.
    pub(super) fn take_if_ready(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.last_request = None;
        true
    }

    /// Precise sleep duration until next possible ready time.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(last) = self.last_request else {
            return Duration::from_secs(86400);
        };

        self.quiet_period
            .saturating_sub(last.elapsed())
            .max(Duration::from_millis(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(250);

    #[tokio::test(start_paused = true)]
    async fn test_idle_debouncer_is_not_armed() {
        let mut debouncer = Debouncer::new(QUIET);
        assert!(!debouncer.is_armed());
        assert!(!debouncer.take_if_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_quiet_period() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.touch();
        assert!(debouncer.is_armed());
        assert!(!debouncer.is_ready());
        assert_eq!(debouncer.sleep_duration(), QUIET);

        tokio::time::advance(Duration::from_millis(250)).await;
        assert!(debouncer.take_if_ready());
        assert!(!debouncer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_touch_restarts_quiet_period() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.touch();
        tokio::time::advance(Duration::from_millis(200)).await;
        debouncer.touch();
        tokio::time::advance(Duration::from_millis(200)).await;

        assert!(!debouncer.take_if_ready());
        assert_eq!(debouncer.sleep_duration(), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_quiet_period_applies_to_pending_request() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.touch();
        tokio::time::advance(Duration::from_millis(50)).await;

        debouncer.set_quiet_period(Duration::from_millis(40));
        assert_eq!(debouncer.sleep_duration(), Duration::from_millis(1));
        assert!(debouncer.take_if_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_never_zero() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.touch();
        assert_eq!(debouncer.sleep_duration(), Duration::from_millis(1));
        assert!(debouncer.is_ready());
    }
}
