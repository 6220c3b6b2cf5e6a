//! Serial-driven Pokken Tournament Pro Pad emulator for RP2040.
//!
//! This crate provides the board side of the emulator: USB HID output with
//! the HORI descriptor, UART plumbing for the command stream, GPIO ports for
//! the debounced input mode and a `log` to defmt bridge.

#![no_std]

// Re-export core types for convenience
pub use joystick_core::{
    synthesize, BridgeError, Config, ControllerState, DebouncedDigitalSource, InputError,
    InputMode, InputSource, JoystickBridge, OutputError, OutputSink, SelectedSource,
    SerialCommandSource, DEFAULT_CONFIG,
};
pub use joystick_proto::{Axes, Buttons, Command, CommandDecoder, InputReport, OutputReport};

pub mod logger;
pub mod ports;
pub mod uart_io;
pub mod usb_output;

pub use ports::GpioPorts;
pub use uart_io::{pump_rx, PipeReader, RxPipe, UartWriter};
pub use usb_output::{
    configure_usb_hid, LastReport, PokkenRequestHandler, UsbHidOutput, USB_PID, USB_VID,
};
