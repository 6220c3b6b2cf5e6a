//! Platform-agnostic controller state, report synthesis, and I/O traits.
//!
//! This crate holds everything the emulator does that does not depend on a
//! particular chip. It can be used both in embedded `no_std` environments
//! and on host for testing.
//!
//! # Overview
//!
//! - [`state`]: The owned controller state ([`ControllerState`])
//! - [`cadence`]: Five-report cadence with the deferred reset ([`Cadence`])
//! - [`synth`]: Report synthesis ([`synthesize`])
//! - [`input`]: Input source trait ([`InputSource`], [`SelectedSource`])
//! - [`serial`]: Serial command input ([`SerialCommandSource`])
//! - [`debounce`]: Debounced digital-port input ([`DebouncedDigitalSource`])
//! - [`output`]: Report transport trait ([`OutputSink`])
//! - [`bridge`]: The cooperative poll loop ([`JoystickBridge`])
//! - [`config`]: Behaviour configuration ([`Config`], [`DEFAULT_CONFIG`])
//!
//! # Example
//!
//! ```rust
//! use joystick_core::{synthesize, ControllerState};
//! use joystick_proto::CommandDecoder;
//!
//! let mut state = ControllerState::new();
//! let mut decoder = CommandDecoder::new();
//! for &byte in b"ABUY" {
//!     if let Some(command) = decoder.push_byte(byte) {
//!         state.apply(command);
//!     }
//! }
//! assert_eq!(synthesize(&mut state).buttons, 0x01);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! Diagnostics go through the `log` facade; the binary picks the backend.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod cadence;
pub mod config;
pub mod debounce;
pub mod input;
pub mod output;
pub mod serial;
pub mod state;
pub mod synth;

// Re-export main types at crate root
pub use bridge::{BridgeError, JoystickBridge};
pub use cadence::{Cadence, CadenceEvent, CADENCE_PERIOD};
pub use config::{Config, InputMode, DEFAULT_CONFIG};
pub use debounce::{DebouncedDigitalSource, DigitalPorts, PortDebouncer, DEBOUNCE_SAMPLES};
pub use input::{InputError, InputSource, SelectedSource};
pub use output::{OutputError, OutputSink};
pub use serial::{SerialCommandSource, BAD_INPUT_DIAGNOSTIC};
pub use state::ControllerState;
pub use synth::{build_report, synthesize};
