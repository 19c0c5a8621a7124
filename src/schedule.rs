//! Learning-rate schedules.
//!
//! A schedule maps the current learning rate and the cost history to the rate used for
//! the next epoch. It runs once per epoch, right after the epoch's cost is recorded.

use std::fmt;

use crate::{CostHistory, Error, Result};

/// Signature of a user-supplied schedule: `(current_rate, history) -> next_rate`.
pub type RateFn = fn(f32, &CostHistory) -> f32;

#[derive(Clone, Copy)]
pub enum LrSchedule {
    /// Hill-climbing heuristic: multiply by `decay` when the latest cost rose above the
    /// previous one, otherwise by `growth`. No convergence guarantee.
    Adaptive { growth: f32, decay: f32 },
    /// Keep the initial learning rate.
    Constant,
    /// Any other policy.
    Custom(RateFn),
}

impl fmt::Debug for LrSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LrSchedule::Adaptive { growth, decay } => f
                .debug_struct("Adaptive")
                .field("growth", growth)
                .field("decay", decay)
                .finish(),
            LrSchedule::Constant => f.write_str("Constant"),
            LrSchedule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Default for LrSchedule {
    fn default() -> Self {
        Self::adaptive()
    }
}

impl LrSchedule {
    /// Halve on a cost increase, grow by 5% otherwise.
    pub const fn adaptive() -> Self {
        LrSchedule::Adaptive {
            growth: 1.05,
            decay: 0.5,
        }
    }

    pub fn validate(self) -> Result<()> {
        if let LrSchedule::Adaptive { growth, decay } = self {
            if !(growth.is_finite() && growth > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "adaptive growth must be finite and > 0, got {growth}"
                )));
            }
            if !(decay.is_finite() && decay > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "adaptive decay must be finite and > 0, got {decay}"
                )));
            }
        }
        Ok(())
    }

    /// Learning rate for the next epoch.
    pub fn next_rate(self, rate: f32, history: &CostHistory) -> f32 {
        match self {
            LrSchedule::Adaptive { growth, decay } => {
                match (history.latest(), history.previous()) {
                    (Some(latest), Some(previous)) if latest > previous => rate * decay,
                    (Some(_), Some(_)) => rate * growth,
                    _ => rate,
                }
            }
            LrSchedule::Constant => rate,
            LrSchedule::Custom(f) => f(rate, history),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_is_a_noop_until_two_costs_exist() {
        let mut h = CostHistory::new();
        assert_eq!(LrSchedule::adaptive().next_rate(0.3, &h), 0.3);
        h.record(5.0);
        assert_eq!(LrSchedule::adaptive().next_rate(0.3, &h), 0.3);
    }

    #[test]
    fn adaptive_grows_on_decrease_and_halves_on_increase() {
        let schedule = LrSchedule::adaptive();
        let mut h = CostHistory::new();
        h.record(5.0);
        h.record(3.0);
        let rate = schedule.next_rate(0.1, &h);
        assert_eq!(rate, 0.1 * 1.05);

        h.record(6.0);
        assert_eq!(schedule.next_rate(rate, &h), rate / 2.0);
    }

    #[test]
    fn adaptive_grows_on_equal_cost() {
        let mut h = CostHistory::new();
        h.record(2.0);
        h.record(2.0);
        assert_eq!(LrSchedule::adaptive().next_rate(1.0, &h), 1.05);
    }

    #[test]
    fn custom_schedule_receives_history() {
        fn by_epoch(rate: f32, h: &CostHistory) -> f32 {
            rate / (h.len() as f32 + 1.0)
        }
        let mut h = CostHistory::new();
        h.record(1.0);
        assert_eq!(LrSchedule::Custom(by_epoch).next_rate(1.0, &h), 0.5);
    }

    #[test]
    fn validate_rejects_non_positive_factors() {
        assert!(
            LrSchedule::Adaptive {
                growth: 1.05,
                decay: 0.0
            }
            .validate()
            .is_err()
        );
        assert!(
            LrSchedule::Adaptive {
                growth: f32::NAN,
                decay: 0.5
            }
            .validate()
            .is_err()
        );
        assert!(LrSchedule::Constant.validate().is_ok());
    }
}
