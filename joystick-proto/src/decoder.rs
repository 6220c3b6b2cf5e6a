//! Byte-at-a-time decoder for the serial command protocol.
//!
//! # Frames
//!
//! ```text
//! [!]Y  [!]B  [!]A  [!]X  [!]L  [!]R  [!]Q  [!]P  [!]-  [!]+
//! S<L|R><xxx><yyy>
//! U
//! ```
//!
//! - A button letter presses the button; with the `!` prefix it releases it.
//! - `S` is followed by a stick selector and two 3-byte decimal fields (X
//!   then Y). Each field is converted like C `atoi` and truncated to 8 bits.
//! - `U` releases every button.
//! - Anything else decodes to [`Command::Unknown`].
//!
//! The decoder never blocks: a partially received frame is kept until more
//! bytes arrive or [`CommandDecoder::reset`] is called.

use heapless::Vec;

use crate::mapping::button_for_token;
use crate::types::{LogicalButton, Stick};

/// Prefix that turns a button press into a release.
pub const INVERT_MARKER: u8 = b'!';

/// Stick update token.
pub const STICK_TOKEN: u8 = b'S';

/// Release-all token.
pub const RESET_TOKEN: u8 = b'U';

/// Width of each decimal axis field.
pub const AXIS_FIELD_LEN: usize = 3;

/// One decoded frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum Command {
    /// Press (`pressed == true`) or release a single button.
    SetButton { button: LogicalButton, pressed: bool },
    /// Replace both axes of one stick.
    SetStick { stick: Stick, x: u8, y: u8 },
    /// Release every button.
    Reset,
    /// Byte that does not start a known frame.
    Unknown(u8),
}

/// What to do with an `S` frame whose selector is neither `L` nor `R`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidStickPolicy {
    /// Treat the frame as `U`, silently.
    #[default]
    ResetButtons,
    /// Report the selector byte as [`Command::Unknown`].
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecoderState {
    Idle,
    Inverted,
    StickSelector,
    AxisX { selector: u8 },
    AxisY { selector: u8, x: u8 },
}

/// Streaming command decoder.
///
/// Feed it one byte at a time with [`push_byte`](Self::push_byte).
pub struct CommandDecoder {
    state: DecoderState,
    field: Vec<u8, AXIS_FIELD_LEN>,
    invalid_stick: InvalidStickPolicy,
}

impl CommandDecoder {
    /// Create a decoder with the default stick policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(InvalidStickPolicy::default())
    }

    /// Create a decoder with an explicit policy for unknown stick selectors.
    #[must_use]
    pub fn with_policy(invalid_stick: InvalidStickPolicy) -> Self {
        Self {
            state: DecoderState::Idle,
            field: Vec::new(),
            invalid_stick,
        }
    }

    /// Drop any partially received frame.
    pub fn reset(&mut self) {
        self.state = DecoderState::Idle;
        self.field.clear();
    }

    /// True while a frame has been started but not completed.
    #[inline]
    #[must_use]
    pub fn is_mid_frame(&self) -> bool {
        self.state != DecoderState::Idle
    }

    /// Feed a byte to the decoder.
    ///
    /// Returns `Some(command)` when the byte completes a frame.
    pub fn push_byte(&mut self, byte: u8) -> Option<Command> {
        match self.state {
            DecoderState::Idle => self.start_frame(byte, false),
            DecoderState::Inverted => {
                self.state = DecoderState::Idle;
                self.start_frame(byte, true)
            }
            DecoderState::StickSelector => {
                self.field.clear();
                self.state = DecoderState::AxisX { selector: byte };
                None
            }
            DecoderState::AxisX { selector } => {
                if let Some(x) = self.push_field(byte) {
                    self.state = DecoderState::AxisY { selector, x };
                }
                None
            }
            DecoderState::AxisY { selector, x } => {
                let y = self.push_field(byte)?;
                self.state = DecoderState::Idle;
                Some(self.finish_stick(selector, x, y))
            }
        }
    }

    fn start_frame(&mut self, byte: u8, inverted: bool) -> Option<Command> {
        match byte {
            INVERT_MARKER if !inverted => {
                self.state = DecoderState::Inverted;
                None
            }
            STICK_TOKEN => {
                self.state = DecoderState::StickSelector;
                None
            }
            RESET_TOKEN => Some(Command::Reset),
            _ => Some(match button_for_token(byte) {
                Some(button) => Command::SetButton {
                    button,
                    pressed: !inverted,
                },
                None => Command::Unknown(byte),
            }),
        }
    }

    fn push_field(&mut self, byte: u8) -> Option<u8> {
        // Emptied as soon as it fills, so there is always room.
        let _ = self.field.push(byte);
        if !self.field.is_full() {
            return None;
        }
        let value = parse_axis_field(&self.field);
        self.field.clear();
        Some(value)
    }

    fn finish_stick(&self, selector: u8, x: u8, y: u8) -> Command {
        let stick = match selector {
            b'L' => Stick::Left,
            b'R' => Stick::Right,
            _ => {
                return match self.invalid_stick {
                    InvalidStickPolicy::ResetButtons => Command::Reset,
                    InvalidStickPolicy::Reject => Command::Unknown(selector),
                }
            }
        };
        Command::SetStick { stick, x, y }
    }
}

impl Default for CommandDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert an axis field to a byte.
///
/// Follows C `atoi`: leading whitespace is skipped, one optional sign is
/// accepted, digits are read up to the first non-digit, and no digits at
/// all yields 0. The result wraps to 8 bits, so `256` becomes 0 and `-1`
/// becomes 255.
#[must_use]
pub fn parse_axis_field(field: &[u8]) -> u8 {
    let mut bytes = field.iter().copied().skip_while(|&b| is_c_space(b)).peekable();

    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let magnitude = bytes
        .take_while(u8::is_ascii_digit)
        .fold(0i32, |acc, digit| acc * 10 + i32::from(digit - b'0'));

    let value = if negative { -magnitude } else { magnitude };
    value as u8
}

/// Whitespace as C `isspace` sees it in the "C" locale.
#[inline]
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}
