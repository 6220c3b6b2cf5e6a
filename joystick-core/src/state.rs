//! The single owned aggregate of everything the emulator remembers.

use joystick_proto::{Axes, Buttons, Command};

use crate::cadence::Cadence;

/// Complete controller state.
///
/// Created once at start-up. Input sources mutate buttons and axes through
/// [`apply`](Self::apply); the report synthesizer reads them and drives the
/// cadence and the reset request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    pub buttons: Buttons,
    pub axes: Axes,
    pub(crate) reset_request: bool,
    pub(crate) cadence: Cadence,
}

impl ControllerState {
    /// No buttons, sticks centered, cadence at the start of a period.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buttons: Buttons::NONE,
            axes: Axes::CENTERED,
            reset_request: false,
            cadence: Cadence::new(),
        }
    }

    /// Apply one decoded command.
    ///
    /// Returns `false` for [`Command::Unknown`], which changes nothing.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::SetButton { button, pressed } => self.buttons.set(button.mask(), pressed),
            Command::SetStick { stick, x, y } => self.axes.set_stick(stick, x, y),
            Command::Reset => self.buttons.clear(),
            Command::Unknown(_) => return false,
        }
        true
    }

    /// Ask for the buttons to be released at the next cadence threshold.
    #[inline]
    pub fn request_reset(&mut self) {
        self.reset_request = true;
    }

    /// True while a reset request is waiting for the cadence threshold.
    #[inline]
    #[must_use]
    pub const fn reset_requested(&self) -> bool {
        self.reset_request
    }

    #[inline]
    #[must_use]
    pub const fn cadence(&self) -> &Cadence {
        &self.cadence
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joystick_proto::{CommandDecoder, LogicalButton, Stick};

    fn feed(state: &mut ControllerState, bytes: &[u8]) {
        let mut decoder = CommandDecoder::new();
        for &byte in bytes {
            if let Some(command) = decoder.push_byte(byte) {
                state.apply(command);
            }
        }
    }

    #[test]
    fn test_defaults() {
        let state = ControllerState::new();
        assert!(state.buttons.is_empty());
        assert_eq!(state.axes, Axes::CENTERED);
        assert!(!state.reset_requested());
        assert_eq!(state.cadence().count(), 0);
    }

    #[test]
    fn test_commands_apply_in_order() {
        let mut state = ControllerState::new();
        feed(&mut state, b"AB!AX+!+");
        assert_eq!(state.buttons, Buttons::B | Buttons::X);
    }

    #[test]
    fn test_release_of_unpressed_button_is_noop() {
        let mut state = ControllerState::new();
        feed(&mut state, b"!Y");
        assert!(state.buttons.is_empty());
    }

    #[test]
    fn test_reset_clears_only_buttons() {
        let mut state = ControllerState::new();
        feed(&mut state, b"ABLRQPSR200050U");
        assert!(state.buttons.is_empty());
        assert_eq!(state.axes.rx, 200);
        assert_eq!(state.axes.ry, 50);
        assert_eq!(state.axes.lx, 127);
    }

    #[test]
    fn test_stick_commands() {
        let mut state = ControllerState::new();
        feed(&mut state, b"SL123045");
        assert_eq!((state.axes.lx, state.axes.ly), (123, 45));
        feed(&mut state, b"SL256000");
        assert_eq!((state.axes.lx, state.axes.ly), (0, 0));
    }

    #[test]
    fn test_apply_reports_unknown() {
        let mut state = ControllerState::new();
        assert!(!state.apply(Command::Unknown(b'?')));
        assert!(state.apply(Command::SetButton {
            button: LogicalButton::Home,
            pressed: true,
        }));
        assert!(state.apply(Command::SetStick {
            stick: Stick::Right,
            x: 1,
            y: 2,
        }));
        assert_eq!(state.buttons, Buttons::HOME);
    }
}
