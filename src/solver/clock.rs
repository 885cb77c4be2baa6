//! Simulation clock
//!
//! Tracks the fixed time step and the number of completed steps. Time is
//! always derived as `step_index · dt` rather than accumulated, so that the
//! clock after `m` steps is exactly the product and carries no summed
//! rounding error.

/// Fixed-step clock of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    dt: f64,
    step_index: usize,
}

impl SimulationClock {
    /// Clock at step 0 with time step `dt` \[s\].
    pub fn new(dt: f64) -> Self {
        Self { dt, step_index: 0 }
    }

    /// Time step \[s\].
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Index of the next step to run (= number of completed steps).
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Time at the start of the next step, `m · dt` \[s\].
    pub fn current_time(&self) -> f64 {
        self.time_at(self.step_index)
    }

    /// Time at the start of step `m` \[s\].
    pub fn time_at(&self, m: usize) -> f64 {
        m as f64 * self.dt
    }

    /// Count one completed step.
    pub fn advance(&mut self) {
        self.step_index += 1;
    }

    /// Back to step 0.
    pub fn reset(&mut self) {
        self.step_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances_by_index() {
        let mut clock = SimulationClock::new(0.1);
        assert_eq!(clock.current_time(), 0.0);

        for _ in 0..100 {
            clock.advance();
        }

        assert_eq!(clock.step_index(), 100);
        // Product, not a sum of 100 increments
        assert_eq!(clock.current_time(), 100.0 * 0.1);

        clock.reset();
        assert_eq!(clock.step_index(), 0);
    }
}
