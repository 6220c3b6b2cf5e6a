//! Input source trait and error types.

use crate::config::InputMode;
use crate::state::ControllerState;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// UART/communication I/O error.
    Io,
    /// UART framing or data error.
    Framing,
    /// Connection lost.
    Disconnected,
}

/// Map an `embedded-io` error onto [`InputError`].
///
/// A helper function instead of a `From` impl, since the error type is a
/// generic parameter.
#[inline]
pub(crate) fn io_error<E: embedded_io::Error>(e: E) -> InputError {
    use embedded_io::ErrorKind;

    match e.kind() {
        ErrorKind::InvalidData => InputError::Framing,
        ErrorKind::NotConnected
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::BrokenPipe => InputError::Disconnected,
        _ => InputError::Io,
    }
}

/// A source of controller state changes.
///
/// Sources never wait for input: [`poll`](Self::poll) takes whatever is
/// available right now, applies it and returns.
pub trait InputSource {
    /// Drain currently available input into `state`.
    ///
    /// Returns the number of state changes applied.
    fn poll(&mut self, state: &mut ControllerState) -> Result<usize, InputError>;

    /// Check if the input source is connected/ready.
    fn is_connected(&self) -> bool;
}

/// Either of two input sources, chosen at start-up from [`InputMode`].
pub enum SelectedSource<S, D> {
    /// Serial command stream.
    Serial(S),
    /// Debounced digital ports.
    Digital(D),
}

impl<S, D> SelectedSource<S, D> {
    /// Build the source named by `mode`, constructing only that one.
    pub fn for_mode(mode: InputMode, serial: impl FnOnce() -> S, digital: impl FnOnce() -> D) -> Self {
        match mode {
            InputMode::Serial => Self::Serial(serial()),
            InputMode::DebouncedDigital => Self::Digital(digital()),
        }
    }

    /// Mode of the active source.
    #[must_use]
    pub fn mode(&self) -> InputMode {
        match self {
            Self::Serial(_) => InputMode::Serial,
            Self::Digital(_) => InputMode::DebouncedDigital,
        }
    }
}

impl<S: InputSource, D: InputSource> InputSource for SelectedSource<S, D> {
    fn poll(&mut self, state: &mut ControllerState) -> Result<usize, InputError> {
        match self {
            Self::Serial(source) => source.poll(state),
            Self::Digital(source) => source.poll(state),
        }
    }

    fn is_connected(&self) -> bool {
        match self {
            Self::Serial(source) => source.is_connected(),
            Self::Digital(source) => source.is_connected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joystick_proto::Buttons;

    struct Fixed(Buttons);

    impl InputSource for Fixed {
        fn poll(&mut self, state: &mut ControllerState) -> Result<usize, InputError> {
            state.buttons = self.0;
            Ok(1)
        }

        fn is_connected(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_for_mode_builds_only_selected() {
        let source: SelectedSource<Fixed, Fixed> = SelectedSource::for_mode(
            InputMode::DebouncedDigital,
            || panic!("serial source must not be built"),
            || Fixed(Buttons::HOME),
        );
        assert_eq!(source.mode(), InputMode::DebouncedDigital);
    }

    #[test]
    fn test_selected_source_delegates() {
        let mut source: SelectedSource<Fixed, Fixed> =
            SelectedSource::for_mode(InputMode::Serial, || Fixed(Buttons::A), || Fixed(Buttons::B));
        let mut state = ControllerState::new();
        assert_eq!(source.poll(&mut state), Ok(1));
        assert_eq!(state.buttons, Buttons::A);
        assert!(source.is_connected());
    }

    #[test]
    fn test_io_error_mapping() {
        use embedded_io::ErrorKind;

        assert_eq!(io_error(ErrorKind::InvalidData), InputError::Framing);
        assert_eq!(io_error(ErrorKind::BrokenPipe), InputError::Disconnected);
        assert_eq!(io_error(ErrorKind::Other), InputError::Io);
    }
}
