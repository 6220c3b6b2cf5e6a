//! UART plumbing for the serial command source.
//!
//! A receive task moves bytes from the DMA UART into a [`Pipe`]; the bridge
//! side drains the pipe without waiting. Echo and diagnostics are written
//! back with blocking writes.

use defmt::warn;
use embassy_rp::uart::{Async, Error as UartError, UartRx, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};

/// Bytes buffered between the receive task and the bridge.
pub const RX_PIPE_SIZE: usize = 64;

/// Pipe carrying received bytes.
pub type RxPipe = Pipe<CriticalSectionRawMutex, RX_PIPE_SIZE>;

/// Move received bytes into the pipe forever.
///
/// Line errors are logged and the offending byte dropped.
pub async fn pump_rx(mut rx: UartRx<'static, Async>, pipe: &'static RxPipe) -> ! {
    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => {
                pipe.write_all(&byte).await;
            }
            Err(e) => warn!("UART receive error: {:?}", e),
        }
    }
}

/// Non-blocking reader over the receive pipe.
pub struct PipeReader {
    pipe: &'static RxPipe,
}

impl PipeReader {
    pub fn new(pipe: &'static RxPipe) -> Self {
        Self { pipe }
    }
}

impl ErrorType for PipeReader {
    type Error = ErrorKind;
}

impl Read for PipeReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        // An empty pipe reads as zero bytes; callers check `read_ready` first.
        Ok(self.pipe.try_read(buf).unwrap_or(0))
    }
}

impl ReadReady for PipeReader {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pipe.is_empty())
    }
}

/// Blocking writer for echo and diagnostics.
pub struct UartWriter {
    tx: UartTx<'static, Async>,
}

impl UartWriter {
    pub fn new(tx: UartTx<'static, Async>) -> Self {
        Self { tx }
    }
}

fn uart_error_kind(e: UartError) -> ErrorKind {
    match e {
        UartError::Framing | UartError::Parity => ErrorKind::InvalidData,
        UartError::Break => ErrorKind::ConnectionReset,
        _ => ErrorKind::Other,
    }
}

impl ErrorType for UartWriter {
    type Error = ErrorKind;
}

impl Write for UartWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.tx.blocking_write(buf).map_err(uart_error_kind)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush().map_err(uart_error_kind)
    }
}
