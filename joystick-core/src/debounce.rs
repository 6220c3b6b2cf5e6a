//! Digital-port input source with a simple rolling debounce.
//!
//! Two 8-bit ports are sampled on every poll. Each port keeps its last four
//! samples packed into a `u32`; a pin only changes its debounced level once
//! all four samples agree. This is a quick filter, not a robust debounce:
//! it adds a fixed four-poll latency and nothing else.
//!
//! Pins are active low (pulled up, switch to ground), so logical button `i`
//! is pressed when bit `i` of the combined debounced word is 0. Port B
//! provides bits 0-7 and port D bits 8-15.

use joystick_proto::Buttons;

use crate::input::{InputError, InputSource};
use crate::state::ControllerState;

/// Samples that must agree before a pin changes level.
pub const DEBOUNCE_SAMPLES: usize = 4;

/// Raw access to the two button ports.
pub trait DigitalPorts {
    /// Read both ports, port B first.
    fn sample(&mut self) -> [u8; 2];
}

/// Rolling debounce over two 8-bit ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortDebouncer {
    history: [u32; 2],
    state: u16,
}

impl PortDebouncer {
    /// Start with every pin high (released) and a matching history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            history: [u32::MAX; 2],
            state: u16::MAX,
        }
    }

    /// Push one raw sample per port and return the debounced word.
    pub fn update(&mut self, raw: [u8; 2]) -> u16 {
        for (port, sample) in raw.into_iter().enumerate() {
            let history = (self.history[port] << 8) | u32::from(sample);
            self.history[port] = history;

            let [a, b, c, d] = history.to_le_bytes();
            let all_high = a & b & c & d;
            let any_high = a | b | c | d;

            let shift = port * 8;
            let previous = (self.state >> shift) as u8;
            let next = (previous & any_high) | all_high;
            self.state = (self.state & !(0x00FF << shift)) | (u16::from(next) << shift);
        }
        self.state
    }

    /// Debounced pin levels, port B in the low byte.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> u16 {
        self.state
    }
}

impl Default for PortDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

/// Input source reading buttons from debounced digital ports.
///
/// Owns the whole button mask: every poll replaces it. Axes are never
/// touched.
pub struct DebouncedDigitalSource<P> {
    ports: P,
    debouncer: PortDebouncer,
}

impl<P: DigitalPorts> DebouncedDigitalSource<P> {
    #[must_use]
    pub fn new(ports: P) -> Self {
        Self {
            ports,
            debouncer: PortDebouncer::new(),
        }
    }

    /// Debounced pin levels from the last poll.
    #[must_use]
    pub fn levels(&self) -> u16 {
        self.debouncer.state()
    }
}

impl<P: DigitalPorts> InputSource for DebouncedDigitalSource<P> {
    fn poll(&mut self, state: &mut ControllerState) -> Result<usize, InputError> {
        let levels = self.debouncer.update(self.ports.sample());
        let pressed = Buttons(!levels);

        if pressed == state.buttons {
            return Ok(0);
        }
        state.buttons = pressed;
        Ok(1)
    }

    fn is_connected(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::collections::VecDeque;

    use super::*;
    use joystick_proto::Axes;

    struct ScriptedPorts {
        samples: VecDeque<[u8; 2]>,
        idle: [u8; 2],
    }

    impl ScriptedPorts {
        fn new(samples: &[[u8; 2]]) -> Self {
            Self {
                samples: samples.iter().copied().collect(),
                idle: [0xFF, 0xFF],
            }
        }
    }

    impl DigitalPorts for ScriptedPorts {
        fn sample(&mut self) -> [u8; 2] {
            self.samples.pop_front().unwrap_or(self.idle)
        }
    }

    #[test]
    fn test_idle_ports_release_everything() {
        let mut debouncer = PortDebouncer::new();
        assert_eq!(debouncer.update([0xFF, 0xFF]), 0xFFFF);
    }

    #[test]
    fn test_level_changes_after_four_samples() {
        let mut debouncer = PortDebouncer::new();
        // Pin 2 on port B pulled low.
        for _ in 0..DEBOUNCE_SAMPLES - 1 {
            assert_eq!(debouncer.update([0xFB, 0xFF]), 0xFFFF);
        }
        assert_eq!(debouncer.update([0xFB, 0xFF]), 0xFFFB);
    }

    #[test]
    fn test_bounce_does_not_change_level() {
        let mut debouncer = PortDebouncer::new();
        for sample in [0xFE, 0xFF, 0xFE, 0xFE, 0xFF, 0xFE] {
            assert_eq!(debouncer.update([0xFF, sample]), 0xFFFF);
        }
    }

    #[test]
    fn test_release_also_debounced() {
        let mut debouncer = PortDebouncer::new();
        for _ in 0..DEBOUNCE_SAMPLES {
            debouncer.update([0xFF, 0x7F]);
        }
        assert_eq!(debouncer.state(), 0x7FFF);
        for _ in 0..DEBOUNCE_SAMPLES - 1 {
            assert_eq!(debouncer.update([0xFF, 0xFF]), 0x7FFF);
        }
        assert_eq!(debouncer.update([0xFF, 0xFF]), 0xFFFF);
    }

    #[test]
    fn test_source_maps_low_pins_to_buttons() {
        // Port B pin 2 (A) and port D pin 4 (Home) held low.
        let held = [0xFB, 0xEF];
        let mut source = DebouncedDigitalSource::new(ScriptedPorts::new(&[held; 4]));
        let mut state = ControllerState::new();

        for _ in 0..DEBOUNCE_SAMPLES - 1 {
            assert_eq!(source.poll(&mut state), Ok(0));
        }
        assert_eq!(source.poll(&mut state), Ok(1));
        assert_eq!(state.buttons, Buttons::A | Buttons::HOME);
        assert_eq!(state.axes, Axes::CENTERED);
        assert_eq!(source.levels(), 0xEFFB);
    }

    #[test]
    fn test_source_overwrites_serial_buttons() {
        let mut source = DebouncedDigitalSource::new(ScriptedPorts::new(&[]));
        let mut state = ControllerState::new();
        state.buttons = Buttons::X;
        assert_eq!(source.poll(&mut state), Ok(1));
        assert!(state.buttons.is_empty());
    }
}
