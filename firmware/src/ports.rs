//! GPIO button ports for the debounced digital input mode.

use embassy_rp::gpio::Input;
use joystick_core::DigitalPorts;

/// Sixteen pulled-up inputs split into two 8-bit ports.
///
/// `port_b[i]` becomes bit `i` of the first byte, `port_d[i]` bit `i` of
/// the second.
pub struct GpioPorts<'d> {
    port_b: [Input<'d>; 8],
    port_d: [Input<'d>; 8],
}

impl<'d> GpioPorts<'d> {
    pub fn new(port_b: [Input<'d>; 8], port_d: [Input<'d>; 8]) -> Self {
        Self { port_b, port_d }
    }
}

fn pack(pins: &[Input<'_>; 8]) -> u8 {
    pins.iter()
        .enumerate()
        .fold(0u8, |byte, (bit, pin)| byte | (u8::from(pin.is_high()) << bit))
}

impl DigitalPorts for GpioPorts<'_> {
    fn sample(&mut self) -> [u8; 2] {
        [pack(&self.port_b), pack(&self.port_d)]
    }
}
