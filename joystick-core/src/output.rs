//! Output sink trait and error types.

use core::future::Future;
use joystick_proto::{InputReport, OutputReport};

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Endpoint disabled by the host.
    Disabled,
}

/// The report transport (USB HID on the real device).
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait OutputSink {
    /// Deliver an input report to the host.
    ///
    /// May block until the host polls for it.
    fn send(&mut self, report: &InputReport) -> impl Future<Output = Result<(), OutputError>>;

    /// Take an output report from the host if one has arrived. Never waits.
    fn receive_output(&mut self) -> Option<OutputReport>;

    /// Check if the host is ready to accept input reports.
    fn is_ready(&self) -> bool;

    /// Wait until [`is_ready`](Self::is_ready) holds.
    fn wait_ready(&mut self) -> impl Future<Output = ()>;
}
