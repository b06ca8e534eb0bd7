use std::time::{Duration, Instant};

/// Periodic tick source polled from the game loop.
pub struct Clock {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Clock {
    pub fn new(interval_ms: u64) -> Self {
        Clock { interval: Duration::from_millis(interval_ms), next_tick: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_tick = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    /// The tick already scheduled keeps its deadline.
    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval = Duration::from_millis(interval_ms);
    }

    /// Fires at most once per call. The next tick is scheduled from `now`,
    /// missed ticks are dropped.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(deadline) if now >= deadline => {
                self.next_tick = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_stopped_clock_never_fires() {
        let start = Instant::now();
        let mut clock = Clock::new(120);
        assert!(!clock.poll(start + ms(10_000)));
    }

    #[test]
    fn test_fires_after_interval() {
        let start = Instant::now();
        let mut clock = Clock::new(120);
        clock.start(start);

        assert!(!clock.poll(start + ms(119)));
        assert!(clock.poll(start + ms(120)));
        assert!(!clock.poll(start + ms(121)));
        assert!(clock.poll(start + ms(240)));
    }

    #[test]
    fn test_interval_change_applies_to_next_tick() {
        let start = Instant::now();
        let mut clock = Clock::new(120);
        clock.start(start);
        clock.set_interval(40);

        // The in-flight tick still waits the old interval
        assert!(!clock.poll(start + ms(40)));
        assert!(clock.poll(start + ms(120)));
        assert!(clock.poll(start + ms(160)));
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let start = Instant::now();
        let mut clock = Clock::new(20);
        clock.start(start);
        clock.stop();
        assert!(!clock.poll(start + ms(100)));

        clock.start(start + ms(100));
        assert!(clock.poll(start + ms(120)));
    }
}
