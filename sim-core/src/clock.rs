use serde::Serialize;

/// Which rule a tick applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Growth,
    Prune,
}

/// Day counter deciding between growth and prune ticks.
///
/// The phase is derived from the counter and never stored: it is
/// [`Phase::Prune`] exactly when `day == cycle_period`. Only growth ticks
/// advance the counter, so once the prune day is reached the clock stays
/// there unless it was built with `reset_after_prune`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationClock {
    day: u32,
    cycle_period: u32,
    prune_threshold: usize,
    reset_after_prune: bool,
}

impl SimulationClock {
    pub fn new(cycle_period: u32, prune_threshold: usize, reset_after_prune: bool) -> Self {
        Self {
            day: 0,
            cycle_period,
            prune_threshold,
            reset_after_prune,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn cycle_period(&self) -> u32 {
        self.cycle_period
    }

    pub fn prune_threshold(&self) -> usize {
        self.prune_threshold
    }

    pub fn phase(&self) -> Phase {
        if self.day == self.cycle_period {
            Phase::Prune
        } else {
            Phase::Growth
        }
    }

    /// Whether a prune tick should still remove from a field of `count` markers.
    pub fn should_prune(&self, count: usize) -> bool {
        count > self.prune_threshold
    }

    /// Records a completed growth tick.
    pub fn advance(&mut self) {
        self.day = self.day.saturating_add(1);
    }

    /// Records a completed prune tick. Leaves the counter alone unless
    /// the clock resets after pruning.
    pub fn finish_prune(&mut self) {
        if self.reset_after_prune {
            self.day = 0;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_day(&mut self, day: u32) {
        self.day = day;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_until_cycle_period_then_prune() {
        let mut clock = SimulationClock::new(3, 1, false);
        for _ in 0..3 {
            assert_eq!(clock.phase(), Phase::Growth);
            clock.advance();
        }
        assert_eq!(clock.day(), 3);
        assert_eq!(clock.phase(), Phase::Prune);
    }

    #[test]
    fn prune_is_sticky_without_reset() {
        let mut clock = SimulationClock::new(2, 1, false);
        clock.advance();
        clock.advance();
        for _ in 0..5 {
            clock.finish_prune();
            assert_eq!(clock.phase(), Phase::Prune);
        }
        assert_eq!(clock.day(), 2);
    }

    #[test]
    fn reset_after_prune_restarts_growth() {
        let mut clock = SimulationClock::new(2, 1, true);
        clock.advance();
        clock.advance();
        assert_eq!(clock.phase(), Phase::Prune);
        clock.finish_prune();
        assert_eq!(clock.day(), 0);
        assert_eq!(clock.phase(), Phase::Growth);
    }

    #[test]
    fn zero_period_starts_in_prune() {
        let clock = SimulationClock::new(0, 1, false);
        assert_eq!(clock.phase(), Phase::Prune);
    }

    #[test]
    fn prune_threshold_is_strict() {
        let clock = SimulationClock::new(16, 1, false);
        assert!(!clock.should_prune(0));
        assert!(!clock.should_prune(1));
        assert!(clock.should_prune(2));
    }
}
