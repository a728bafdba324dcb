use std::time::{Duration, Instant};

/// Auto-refresh interval between cycles.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    AutoRefreshing,
}

/// Cooperative repeating timer driving the refresh cycle.
///
/// The owning event loop calls [`RefreshScheduler::poll`] on every pass; a
/// tick fires only when one is armed and due, then re-arms itself one
/// interval later. Stopping disarms the pending tick, so cancellation is
/// observed at tick boundaries and never interrupts a cycle already
/// running. Ticks are serialized by the single-threaded loop; no two
/// cycles overlap.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    state: SchedulerState,
    interval: Duration,
    next_tick: Option<Instant>,
}

impl RefreshScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: SchedulerState::Idle,
            interval,
            next_tick: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_auto(&self) -> bool {
        self.state == SchedulerState::AutoRefreshing
    }

    /// Idle → AutoRefreshing. The first tick is due immediately, so turning
    /// the toggle on refreshes right away and then settles into the
    /// interval.
    pub fn start(&mut self, now: Instant) {
        self.state = SchedulerState::AutoRefreshing;
        self.next_tick = Some(now);
    }

    /// AutoRefreshing → Idle. Disarms the pending tick; a no-op when
    /// nothing is armed.
    pub fn stop(&mut self) {
        self.state = SchedulerState::Idle;
        self.next_tick = None;
    }

    /// True when an armed tick is due. Fires at most once per call and
    /// re-arms for `now + interval`. Never fires while Idle.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state != SchedulerState::AutoRefreshing {
            return false;
        }
        match self.next_tick {
            Some(due) if due <= now => {
                self.next_tick = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Toggle-button label for the current state.
    pub fn label(&self) -> &'static str {
        match self.state {
            SchedulerState::Idle => "Start Auto-Refresh (5s)",
            SchedulerState::AutoRefreshing => "Stop Auto-Refresh",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_with_nothing_armed() {
        let mut scheduler = RefreshScheduler::new(REFRESH_INTERVAL);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(!scheduler.poll(Instant::now()));
    }

    #[test]
    fn start_fires_an_immediate_tick_then_waits_an_interval() {
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(5));
        let t0 = Instant::now();

        scheduler.start(t0);
        assert!(scheduler.poll(t0));
        // Re-armed: nothing due until a full interval has elapsed.
        assert!(!scheduler.poll(t0 + Duration::from_secs(4)));
        assert!(scheduler.poll(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn stop_before_first_tick_means_zero_fired_ticks() {
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(5));
        let t0 = Instant::now();

        scheduler.start(t0);
        scheduler.stop();

        assert!(!scheduler.poll(t0));
        assert!(!scheduler.poll(t0 + Duration::from_secs(60)));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn stop_when_idle_is_a_no_op() {
        let mut scheduler = RefreshScheduler::new(REFRESH_INTERVAL);
        scheduler.stop();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(!scheduler.poll(Instant::now()));
    }

    #[test]
    fn cancellation_is_observed_at_the_tick_boundary() {
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(5));
        let t0 = Instant::now();

        scheduler.start(t0);
        assert!(scheduler.poll(t0));
        // Toggled off mid-interval: the already-armed tick never fires.
        scheduler.stop();
        assert!(!scheduler.poll(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn label_tracks_the_toggle_state() {
        let mut scheduler = RefreshScheduler::new(REFRESH_INTERVAL);
        assert_eq!(scheduler.label(), "Start Auto-Refresh (5s)");
        scheduler.start(Instant::now());
        assert_eq!(scheduler.label(), "Stop Auto-Refresh");
        scheduler.stop();
        assert_eq!(scheduler.label(), "Start Auto-Refresh (5s)");
    }
}
