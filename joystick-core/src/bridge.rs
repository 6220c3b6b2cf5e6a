//! JoystickBridge: the cooperative poll loop tying input, state and output.

use joystick_proto::InputReport;
use log::{trace, warn};

use crate::input::{InputError, InputSource};
use crate::output::{OutputError, OutputSink};
use crate::state::ControllerState;
use crate::synth::synthesize;

/// Drives one input source and one output sink around a [`ControllerState`].
///
/// Each cycle:
/// 1. drains whatever input is available into the state,
/// 2. accepts (and discards) one pending output report,
/// 3. if the sink is ready, synthesizes exactly one report and sends it.
///
/// Everything runs in the caller's task, so the state needs no locking.
///
/// # Error Handling
///
/// An input error does not skip the report: the last known state is still
/// the most recent one. The error is returned after the report went out.
pub struct JoystickBridge<I, O> {
    input: I,
    output: O,
    state: ControllerState,
}

impl<I: InputSource, O: OutputSink> JoystickBridge<I, O> {
    /// Create a new bridge with a fresh controller state.
    pub fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            state: ControllerState::new(),
        }
    }

    /// Run the bridge indefinitely.
    ///
    /// Suspends while the sink is not ready. This method never returns
    /// under normal operation.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.process_when_ready().await;
        }
    }

    /// Wait for the sink to become ready, then run one poll cycle.
    pub async fn process_when_ready(&mut self) -> Result<Option<InputReport>, BridgeError> {
        if !self.output.is_ready() {
            self.output.wait_ready().await;
        }
        self.process_one().await
    }

    /// Run a single poll cycle.
    ///
    /// Returns the delivered report, or `None` if the sink was not ready.
    pub async fn process_one(&mut self) -> Result<Option<InputReport>, BridgeError> {
        let input_result = self.input.poll(&mut self.state);
        if let Err(e) = input_result {
            warn!("input error: {:?}", e);
        }

        if let Some(report) = self.output.receive_output() {
            trace!("ignoring output report {:?}", report);
        }

        if !self.output.is_ready() {
            input_result.map_err(BridgeError::Input)?;
            return Ok(None);
        }

        let report = synthesize(&mut self.state);
        self.output
            .send(&report)
            .await
            .map_err(BridgeError::Output)?;

        input_result.map_err(BridgeError::Input)?;
        Ok(Some(report))
    }

    /// Get a reference to the controller state.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Get a mutable reference to the controller state.
    pub fn state_mut(&mut self) -> &mut ControllerState {
        &mut self.state
    }

    /// Get a reference to the input source.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get a mutable reference to the input source.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get a reference to the output sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Decompose the bridge into its input and output components.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the input source.
    Input(InputError),
    /// Error from the output sink.
    Output(OutputError),
}
