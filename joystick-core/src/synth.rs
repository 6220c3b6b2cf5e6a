//! Report synthesis.

use joystick_proto::{report_bits, Axes, Buttons, InputReport};
use log::debug;

use crate::cadence::CadenceEvent;
use crate::state::ControllerState;

/// Build a report from a button mask and axes, without touching any state.
#[must_use]
pub fn build_report(buttons: Buttons, axes: &Axes) -> InputReport {
    let mut report = InputReport::zeroed();
    report.buttons = report_bits(buttons);
    report.lx = axes.lx;
    report.ly = axes.ly;
    report.rx = axes.rx;
    report.ry = axes.ry;
    report
}

/// Produce the next report and advance the cadence.
///
/// The returned report reflects the state before the cadence step; a reset
/// consumed at the threshold only shows up in later reports.
pub fn synthesize(state: &mut ControllerState) -> InputReport {
    let report = build_report(state.buttons, &state.axes);

    if state.cadence.tick(state.reset_request) == CadenceEvent::ResetDue {
        debug!("cadence threshold: releasing all buttons");
        state.buttons.clear();
        state.reset_request = false;
    }

    report
}

impl ControllerState {
    /// Shorthand for [`synthesize`].
    #[inline]
    pub fn next_report(&mut self) -> InputReport {
        synthesize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadence::CADENCE_PERIOD;
    use joystick_proto::CommandDecoder;

    fn feed(state: &mut ControllerState, bytes: &[u8]) {
        let mut decoder = CommandDecoder::new();
        for &byte in bytes {
            if let Some(command) = decoder.push_byte(byte) {
                state.apply(command);
            }
        }
    }

    #[test]
    fn test_report_copies_state() {
        let mut state = ControllerState::new();
        feed(&mut state, b"AQSL010020SR030040");
        let report = synthesize(&mut state);
        assert_eq!(report.buttons, 0x04 | 0x40);
        assert_eq!(
            (report.lx, report.ly, report.rx, report.ry),
            (10, 20, 30, 40)
        );
    }

    #[test]
    fn test_default_report() {
        let mut state = ControllerState::new();
        let report = synthesize(&mut state);
        assert_eq!(report.buttons, 0);
        assert_eq!(
            (report.lx, report.ly, report.rx, report.ry),
            (127, 127, 127, 127)
        );
    }

    #[test]
    fn test_idle_state_builds_neutral_report() {
        let report = build_report(Buttons::NONE, &Axes::CENTERED);
        assert_eq!(report, InputReport::NEUTRAL);
        assert_eq!(synthesize(&mut ControllerState::new()), InputReport::NEUTRAL);
    }

    #[test]
    fn test_reset_then_single_button() {
        let mut state = ControllerState::new();
        feed(&mut state, b"ABUY");
        assert_eq!(synthesize(&mut state).buttons, 0x01);
    }

    #[test]
    fn test_full_period_without_reset() {
        let mut state = ControllerState::new();
        feed(&mut state, b"X");
        let before = *state.cadence();
        for _ in 0..CADENCE_PERIOD {
            synthesize(&mut state);
        }
        assert_eq!(state.cadence().count(), 0);
        assert_eq!(state.cadence().phase(), !before.phase());
        let sub_flipped = state.cadence().sub_phase() != before.sub_phase();
        assert_eq!(sub_flipped, !state.cadence().phase());
        assert_eq!(state.buttons, Buttons::X);
    }

    #[test]
    fn test_pending_reset_consumed_at_threshold() {
        let mut state = ControllerState::new();
        feed(&mut state, b"AB");
        // Move into the middle of a period first.
        synthesize(&mut state);
        synthesize(&mut state);
        let before = *state.cadence();
        state.request_reset();

        for _ in 0..CADENCE_PERIOD - 3 {
            let report = synthesize(&mut state);
            assert_eq!(report.buttons, 0x06);
            assert!(state.reset_requested());
        }
        // The threshold report still carries the old buttons.
        assert_eq!(synthesize(&mut state).buttons, 0x06);

        assert!(state.buttons.is_empty());
        assert!(!state.reset_requested());
        assert_eq!(state.cadence().count(), 0);
        assert_eq!(state.cadence().phase(), before.phase());
        assert_eq!(state.cadence().sub_phase(), before.sub_phase());
        assert_eq!(synthesize(&mut state).buttons, 0);
    }

    #[test]
    fn test_next_report_matches_synthesize() {
        let mut a = ControllerState::new();
        let mut b = ControllerState::new();
        feed(&mut a, b"P");
        feed(&mut b, b"P");
        assert_eq!(a.next_report(), synthesize(&mut b));
        assert_eq!(a, b);
    }
}
