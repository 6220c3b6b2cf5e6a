//! USB HID output posing as a HORI Pokken Tournament Pro Pad.

use core::cell::Cell;
use core::task::Poll;

use defmt::warn;
use embassy_futures::poll_once;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_usb::class::hid::{
    HidBootProtocol, HidReader, HidReaderWriter, HidSubclass, HidWriter, ReportId,
    RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use joystick_core::{OutputError, OutputSink};
use joystick_proto::{InputReport, OutputReport};

/// USB vendor ID of HORI CO., LTD.
pub const USB_VID: u16 = 0x0F0D;

/// USB product ID of the Pokken Tournament Pro Pad.
pub const USB_PID: u16 = 0x0092;

/// Interrupt endpoint packet size.
pub const ENDPOINT_SIZE: u16 = 64;

/// Pokken Tournament Pro Pad report descriptor.
///
/// 16 buttons, a 4-bit hat, four 8-bit axes and one vendor byte in, eight
/// vendor bytes out.
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (16 buttons) ---
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x35, 0x00, //   Physical Minimum (0)
    0x45, 0x01, //   Physical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x10, //   Report Count (16)
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x10, //   Usage Maximum (Button 16)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Hat switch + padding ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x25, 0x07, //   Logical Maximum (7)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x65, 0x14, //   Unit (Degrees)
    0x09, 0x39, //   Usage (Hat Switch)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant)
    //
    // --- Sticks ---
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x46, 0xFF, 0x00, //   Physical Maximum (255)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Vendor byte ---
    0x06, 0x00, 0xFF, //   Usage Page (Vendor Defined 0xFF00)
    0x09, 0x20, //   Usage (0x20)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Output report ---
    0x0A, 0x21, 0x26, //   Usage (0x2621)
    0x95, 0x08, //   Report Count (8)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// Last report delivered on the IN endpoint, shared with the control
/// request handler. Holds the neutral report until the first one goes out.
pub struct LastReport(Mutex<CriticalSectionRawMutex, Cell<[u8; InputReport::SIZE]>>);

impl LastReport {
    #[must_use]
    pub const fn new() -> Self {
        Self(Mutex::new(Cell::new(InputReport::NEUTRAL.as_bytes())))
    }

    pub fn store(&self, bytes: [u8; InputReport::SIZE]) {
        self.0.lock(|cell| cell.set(bytes));
    }

    #[must_use]
    pub fn load(&self) -> [u8; InputReport::SIZE] {
        self.0.lock(Cell::get)
    }
}

impl Default for LastReport {
    fn default() -> Self {
        Self::new()
    }
}

type UsbDriver<'d> = Driver<'d, USB>;

/// USB HID output.
///
/// Wraps the embassy-usb HID reader/writer pair: input reports go out on
/// the IN endpoint, output reports are drained from the OUT endpoint and
/// handed back to the caller without interpretation.
pub struct UsbHidOutput<'d> {
    reader: HidReader<'d, UsbDriver<'d>, { OutputReport::SIZE }>,
    writer: HidWriter<'d, UsbDriver<'d>, { InputReport::SIZE }>,
    last: &'d LastReport,
    ready: bool,
}

impl<'d> UsbHidOutput<'d> {
    /// Create a new USB HID output from a configured HID reader/writer.
    pub fn new(
        hid: HidReaderWriter<'d, UsbDriver<'d>, { OutputReport::SIZE }, { InputReport::SIZE }>,
        last: &'d LastReport,
    ) -> Self {
        let (reader, writer) = hid.split();
        Self {
            reader,
            writer,
            last,
            ready: false,
        }
    }
}

impl OutputSink for UsbHidOutput<'_> {
    async fn send(&mut self, report: &InputReport) -> Result<(), OutputError> {
        let bytes = report.as_bytes();
        self.writer.write(&bytes).await.map_err(|e| match e {
            EndpointError::Disabled => {
                self.ready = false;
                OutputError::Disabled
            }
            EndpointError::BufferOverflow => OutputError::Io,
        })?;
        self.last.store(bytes);
        Ok(())
    }

    fn receive_output(&mut self) -> Option<OutputReport> {
        let mut buf = [0u8; OutputReport::SIZE];
        match poll_once(self.reader.read(&mut buf)) {
            Poll::Ready(Ok(len)) => Some(OutputReport::from_bytes(&buf[..len])),
            Poll::Ready(Err(e)) => {
                warn!("Output report read failed: {:?}", e);
                None
            }
            Poll::Pending => None,
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    /// Wait until the device is configured by the host.
    async fn wait_ready(&mut self) {
        self.writer.ready().await;
        self.ready = true;
    }
}

/// HID control request handler.
///
/// GET_REPORT is answered with the last report sent on the IN endpoint;
/// SET_REPORT data is accepted and dropped.
pub struct PokkenRequestHandler {
    last: &'static LastReport,
}

impl PokkenRequestHandler {
    #[must_use]
    pub const fn new(last: &'static LastReport) -> Self {
        Self { last }
    }
}

impl RequestHandler for PokkenRequestHandler {
    fn get_report(&mut self, _id: ReportId, buf: &mut [u8]) -> Option<usize> {
        let report = self.last.load();
        let out = buf.get_mut(..report.len())?;
        out.copy_from_slice(&report);
        Some(report.len())
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID reader/writer pair for [`UsbHidOutput`].
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut State<'d>,
    handler: &'d mut PokkenRequestHandler,
) -> HidReaderWriter<'d, UsbDriver<'d>, { OutputReport::SIZE }, { InputReport::SIZE }> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(handler),
        poll_ms: 5,
        max_packet_size: ENDPOINT_SIZE,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };

    HidReaderWriter::new(builder, state, config)
}
