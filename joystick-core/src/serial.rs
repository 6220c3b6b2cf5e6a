//! Serial command input source.
//!
//! Reads the ASCII command protocol from any `embedded-io` byte stream,
//! decodes it with [`CommandDecoder`] and applies the commands to the
//! controller state. Every consumed byte is echoed back on the TX side
//! (when enabled) and unknown bytes produce a `Bad input!` diagnostic, so
//! the pad can be driven by hand from a terminal.

use embedded_io::{Read, ReadReady, Write};
use joystick_proto::{Command, CommandDecoder};
use log::{trace, warn};

use crate::config::{Config, DEFAULT_CONFIG};
use crate::input::{io_error, InputError, InputSource};
use crate::state::ControllerState;

/// Written to the serial TX for every undecodable byte.
pub const BAD_INPUT_DIAGNOSTIC: &[u8] = b"\r\nBad input!\r\n";

/// Input source decoding serial commands.
pub struct SerialCommandSource<R, W> {
    rx: R,
    tx: W,
    decoder: CommandDecoder,
    echo: bool,
    stale_frame_polls: Option<u32>,
    /// Consecutive polls that found no bytes while a frame was open.
    idle_polls: u32,
}

impl<R, W> SerialCommandSource<R, W> {
    /// Create a source with [`DEFAULT_CONFIG`].
    #[must_use]
    pub fn new(rx: R, tx: W) -> Self {
        Self::with_config(rx, tx, &DEFAULT_CONFIG)
    }

    /// Create a source using the serial settings of `config`.
    #[must_use]
    pub fn with_config(rx: R, tx: W, config: &Config) -> Self {
        Self {
            rx,
            tx,
            decoder: CommandDecoder::with_policy(config.invalid_stick),
            echo: config.echo,
            stale_frame_polls: config.stale_frame_polls,
            idle_polls: 0,
        }
    }

    /// Get the decoder, e.g. to check for a partially received frame.
    #[inline]
    #[must_use]
    pub fn decoder(&self) -> &CommandDecoder {
        &self.decoder
    }

    /// Get a mutable reference to the receive half.
    pub fn rx_mut(&mut self) -> &mut R {
        &mut self.rx
    }

    /// Get a reference to the transmit half.
    pub fn tx(&self) -> &W {
        &self.tx
    }

    /// Decompose the source into its receive and transmit halves.
    pub fn into_parts(self) -> (R, W) {
        (self.rx, self.tx)
    }

    /// Count a poll and drop the open frame once it has gone stale.
    fn track_open_frame(&mut self, received: bool) {
        if received || !self.decoder.is_mid_frame() {
            self.idle_polls = 0;
            return;
        }

        self.idle_polls = self.idle_polls.saturating_add(1);
        if let Some(limit) = self.stale_frame_polls {
            if self.idle_polls >= limit {
                warn!("discarding partial frame after {} idle polls", self.idle_polls);
                self.decoder.reset();
                self.idle_polls = 0;
            }
        }
    }
}

impl<R: Read + ReadReady, W: Write> SerialCommandSource<R, W> {
    /// Read one byte if one is available without waiting.
    fn read_available(&mut self) -> Result<Option<u8>, InputError> {
        if !self.rx.read_ready().map_err(io_error)? {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        let n = self.rx.read(&mut byte).map_err(io_error)?;
        Ok((n == 1).then_some(byte[0]))
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), InputError> {
        self.tx.write_all(bytes).map_err(io_error)
    }
}

impl<R: Read + ReadReady, W: Write> InputSource for SerialCommandSource<R, W> {
    fn poll(&mut self, state: &mut ControllerState) -> Result<usize, InputError> {
        let mut applied = 0;
        let mut received = false;
        // First TX failure, reported once the drain is done.
        let mut write_error = None;

        while let Some(byte) = self.read_available()? {
            received = true;
            let command = self.decoder.push_byte(byte);

            if self.echo {
                if let Err(e) = self.write(&[byte]) {
                    write_error = write_error.or(Some(e));
                }
            }

            let Some(command) = command else {
                continue;
            };
            trace!("command: {:?}", command);

            if state.apply(command) {
                applied += 1;
            } else if let Command::Unknown(byte) = command {
                warn!("bad input byte 0x{:02x}", byte);
                if let Err(e) = self.write(BAD_INPUT_DIAGNOSTIC) {
                    write_error = write_error.or(Some(e));
                }
            }
        }

        self.track_open_frame(received);
        match write_error {
            Some(e) => Err(e),
            None => Ok(applied),
        }
    }

    fn is_connected(&self) -> bool {
        // UART is always "connected" if we have the peripheral
        true
    }
}
