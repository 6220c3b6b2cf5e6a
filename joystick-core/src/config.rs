//! Runtime behaviour configuration.

use joystick_proto::InvalidStickPolicy;

/// Where button state comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputMode {
    /// ASCII command stream on the UART.
    #[default]
    Serial,
    /// Two 8-bit digital ports through the debounce sampler.
    DebouncedDigital,
}

/// Emulator configuration.
///
/// Customize this at compile-time by creating your own const.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Input source used by the poll loop.
    pub input_mode: InputMode,
    /// UART baud rate (8N1).
    pub baudrate: u32,
    /// Echo every received byte back on the UART.
    pub echo: bool,
    /// Handling of `S` frames with a selector other than `L`/`R`.
    pub invalid_stick: InvalidStickPolicy,
    /// Drop a partially received frame after this many consecutive poll
    /// cycles without new bytes. `None` waits forever.
    pub stale_frame_polls: Option<u32>,
}

/// Default configuration: serial input at 115200 baud 8N1 with echo.
pub const DEFAULT_CONFIG: Config = Config {
    input_mode: InputMode::Serial,
    baudrate: 115_200,
    echo: true,
    invalid_stick: InvalidStickPolicy::ResetButtons,
    stale_frame_polls: None,
};

impl Default for Config {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}
