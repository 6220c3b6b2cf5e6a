//! Five-report cadence driving the deferred button reset.
//!
//! Every call to [`Cadence::tick`] counts one synthesized report. On every
//! fifth report the cadence either consumes a pending reset request or, if
//! none is pending, advances two toggles. The toggles have no effect on
//! the report.

/// Number of reports per cadence period.
pub const CADENCE_PERIOD: u8 = 5;

/// Outcome of one cadence tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CadenceEvent {
    /// Below the threshold, nothing happened.
    Counting,
    /// Threshold reached with a reset pending. The caller must clear the
    /// buttons and the request; the toggles were left alone.
    ResetDue,
    /// Threshold reached, toggles advanced.
    Toggled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cadence {
    count: u8,
    phase: bool,
    sub_phase: bool,
}

impl Cadence {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            phase: true,
            sub_phase: true,
        }
    }

    /// Count one report.
    pub fn tick(&mut self, reset_requested: bool) -> CadenceEvent {
        self.count += 1;
        if self.count < CADENCE_PERIOD {
            return CadenceEvent::Counting;
        }
        self.count = 0;

        if reset_requested {
            return CadenceEvent::ResetDue;
        }

        self.phase = !self.phase;
        if !self.phase {
            self.sub_phase = !self.sub_phase;
        }
        CadenceEvent::Toggled
    }

    /// Reports counted in the current period.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.count
    }

    /// Toggle flipped on every period without a pending reset.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> bool {
        self.phase
    }

    /// Toggle flipped whenever `phase` flips to false.
    #[inline]
    #[must_use]
    pub const fn sub_phase(&self) -> bool {
        self.sub_phase
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_below_threshold() {
        let mut cadence = Cadence::new();
        for expected in 1..CADENCE_PERIOD {
            assert_eq!(cadence.tick(false), CadenceEvent::Counting);
            assert_eq!(cadence.count(), expected);
        }
        assert!(cadence.phase());
        assert!(cadence.sub_phase());
    }

    #[test]
    fn test_first_period_flips_both() {
        let mut cadence = Cadence::new();
        for _ in 1..CADENCE_PERIOD {
            cadence.tick(false);
        }
        assert_eq!(cadence.tick(false), CadenceEvent::Toggled);
        assert_eq!(cadence.count(), 0);
        // phase went true -> false, so sub_phase flipped as well
        assert!(!cadence.phase());
        assert!(!cadence.sub_phase());
    }

    #[test]
    fn test_second_period_flips_phase_only() {
        let mut cadence = Cadence::new();
        for _ in 0..2 * CADENCE_PERIOD {
            cadence.tick(false);
        }
        assert!(cadence.phase());
        assert!(!cadence.sub_phase());
        assert_eq!(cadence.count(), 0);
    }

    #[test]
    fn test_reset_due_leaves_toggles() {
        let mut cadence = Cadence::new();
        for _ in 1..CADENCE_PERIOD {
            assert_eq!(cadence.tick(true), CadenceEvent::Counting);
        }
        assert_eq!(cadence.tick(true), CadenceEvent::ResetDue);
        assert_eq!(cadence.count(), 0);
        assert!(cadence.phase());
        assert!(cadence.sub_phase());
    }
}
