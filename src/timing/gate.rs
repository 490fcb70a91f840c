use std::time::{Duration, Instant};

/// Says when the next game tick is due, independent of the frame rate
#[derive(Debug, Clone)]
pub struct TickGate {
    interval: Duration,
    last_fired: Instant,
}

impl TickGate {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last_fired: start,
        }
    }

    /// True once at least one interval has passed since the last time this
    /// returned true. Fires at most once per call, so a long stall yields a
    /// single tick rather than a burst.
    pub fn is_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_fired) >= self.interval {
            self.last_fired = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_interval() {
        let start = Instant::now();
        let mut gate = TickGate::starting_at(Duration::from_millis(200), start);

        assert!(!gate.is_due(start));
        assert!(!gate.is_due(start + Duration::from_millis(199)));
        assert!(gate.is_due(start + Duration::from_millis(200)));
    }

    #[test]
    fn test_rearms_after_firing() {
        let start = Instant::now();
        let mut gate = TickGate::starting_at(Duration::from_millis(200), start);

        assert!(gate.is_due(start + Duration::from_millis(250)));
        assert!(!gate.is_due(start + Duration::from_millis(300)));
        assert!(gate.is_due(start + Duration::from_millis(450)));
    }

    #[test]
    fn test_long_stall_fires_once() {
        let start = Instant::now();
        let mut gate = TickGate::starting_at(Duration::from_millis(200), start);
        let late = start + Duration::from_secs(5);

        assert!(gate.is_due(late));
        assert!(!gate.is_due(late));
    }

    #[test]
    fn test_one_second_of_frames_makes_five_ticks() {
        let start = Instant::now();
        let mut gate = TickGate::starting_at(Duration::from_millis(200), start);
        let frame = Duration::from_millis(20);

        let ticks = (1..=50u32)
            .filter(|i| gate.is_due(start + frame * *i))
            .count();

        assert_eq!(ticks, 5);
    }
}
