//! Serial command protocol and report types for the Pokken joystick emulator.
//!
//! This crate provides the protocol-level pieces of the emulator:
//!
//! - **Types**: Core data structures for controller state
//!   - [`Buttons`] - Logical button bitmask
//!   - [`LogicalButton`] - The 16 semantic buttons
//!   - [`Axes`] / [`Stick`] - Analog stick bytes
//!
//! - **Mapping**: [`BUTTON_MAP`] from logical buttons to report bits
//!
//! - **Decoding**: Turn incoming serial bytes into [`Command`]s
//!   - [`CommandDecoder`] - Streaming, one byte at a time
//!   - [`parse_axis_field()`] - Axis field conversion
//!
//! - **Reports**: [`InputReport`] and [`OutputReport`] for the USB transport
//!
//! # Protocol Format
//!
//! Plain ASCII, no line endings or checksums:
//!
//! ```text
//! [!]Y [!]B [!]A [!]X [!]L [!]R [!]Q [!]P [!]- [!]+   press (release with !)
//! S<L|R><xxx><yyy>                                    stick X/Y, 3 digits each
//! U                                                   release all buttons
//! ```
//!
//! # Example
//!
//! ```
//! use joystick_proto::{Command, CommandDecoder, Stick};
//!
//! let mut decoder = CommandDecoder::new();
//! let mut last = None;
//! for &byte in b"SL123045" {
//!     last = decoder.push_byte(byte).or(last);
//! }
//! assert_eq!(last, Some(Command::SetStick { stick: Stick::Left, x: 123, y: 45 }));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod decoder;
pub mod mapping;
pub mod report;
pub mod types;

// Re-export types at crate root for convenience
pub use decoder::{
    parse_axis_field, Command, CommandDecoder, InvalidStickPolicy, AXIS_FIELD_LEN, INVERT_MARKER,
    RESET_TOKEN, STICK_TOKEN,
};
pub use mapping::{button_for_token, report_bit, report_bits, BUTTON_MAP};
pub use report::{InputReport, OutputReport};
pub use types::{Axes, Buttons, LogicalButton, Stick};
