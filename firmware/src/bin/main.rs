#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{UART1, USB};
use embassy_rp::uart::{Async, Config as UartConfig, Uart, UartRx};
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use log::LevelFilter;
use pokken_joystick_rp2040::{
    configure_usb_hid, logger, pump_rx, DebouncedDigitalSource, GpioPorts, InputMode,
    JoystickBridge, LastReport, OutputSink, PipeReader, PokkenRequestHandler, RxPipe,
    SelectedSource, SerialCommandSource, UartWriter, UsbHidOutput, DEFAULT_CONFIG, USB_PID,
    USB_VID,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

type Source = SelectedSource<
    SerialCommandSource<PipeReader, UartWriter>,
    DebouncedDigitalSource<GpioPorts<'static>>,
>;

/// Received UART bytes waiting for the bridge.
static RX_PIPE: RxPipe = RxPipe::new();

/// Last delivered report, answered on GET_REPORT.
static LAST_REPORT: LastReport = LastReport::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();
static REQUEST_HANDLER: StaticCell<PokkenRequestHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pokken joystick starting...");
    logger::init(LevelFilter::Info);

    let p = embassy_rp::init(embassy_rp::config::Config::default());
    let config = DEFAULT_CONFIG;

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.baudrate;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();

    // --- Input source (button ports pulled up, active low) ---
    let input = SelectedSource::for_mode(
        config.input_mode,
        || {
            SerialCommandSource::with_config(PipeReader::new(&RX_PIPE), UartWriter::new(tx), &config)
        },
        || {
            let port_b = [
                Input::new(p.PIN_0, Pull::Up),
                Input::new(p.PIN_1, Pull::Up),
                Input::new(p.PIN_2, Pull::Up),
                Input::new(p.PIN_3, Pull::Up),
                Input::new(p.PIN_4, Pull::Up),
                Input::new(p.PIN_5, Pull::Up),
                Input::new(p.PIN_6, Pull::Up),
                Input::new(p.PIN_7, Pull::Up),
            ];
            let port_d = [
                Input::new(p.PIN_10, Pull::Up),
                Input::new(p.PIN_11, Pull::Up),
                Input::new(p.PIN_12, Pull::Up),
                Input::new(p.PIN_13, Pull::Up),
                Input::new(p.PIN_14, Pull::Up),
                Input::new(p.PIN_15, Pull::Up),
                Input::new(p.PIN_16, Pull::Up),
                Input::new(p.PIN_17, Pull::Up),
            ];
            DebouncedDigitalSource::new(GpioPorts::new(port_b, port_d))
        },
    );

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some("HORI CO.,LTD.");
    usb_config.product = Some("POKKEN CONTROLLER");
    usb_config.max_power = 250;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let handler = REQUEST_HANDLER.init(PokkenRequestHandler::new(&LAST_REPORT));
    let hid = configure_usb_hid(&mut builder, hid_state, handler);

    // Build the USB device
    let usb_device = builder.build();

    let usb_output = UsbHidOutput::new(hid, &LAST_REPORT);
    let bridge = JoystickBridge::new(input, usb_output);

    // On-board LED for error indication
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    if config.input_mode == InputMode::Serial {
        spawner.spawn(uart_rx_task(rx).unwrap());
    }
    spawner.spawn(bridge_task(bridge, led).unwrap());

    info!("Pokken joystick initialized, waiting for host...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// UART receive task - feeds the command pipe.
#[embassy_executor::task]
async fn uart_rx_task(rx: UartRx<'static, Async>) {
    pump_rx(rx, &RX_PIPE).await;
}

/// Bridge task - polls input and delivers one report per IN slot.
#[embassy_executor::task]
async fn bridge_task(
    mut bridge: JoystickBridge<Source, UsbHidOutput<'static>>,
    mut led: Output<'static>,
) {
    loop {
        if !bridge.output().is_ready() {
            info!("Waiting for USB host...");
        }
        if let Err(e) = bridge.process_when_ready().await {
            error!("Bridge error: {:?}", e);
            led.toggle();
        }
    }
}
