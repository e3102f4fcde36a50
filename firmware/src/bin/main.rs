#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel as AdcChannel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_time::Timer;
use uart_pin_bridge::config::{DEVICE_BAUD, HOST_BAUD, REPORT_INTERVAL_MS, STARTUP_BANNER};
use uart_pin_bridge::{
    uart_rx_task, Bridge, BridgeConfig, RpPinSampler, RxQueue, SerialLink, UartLink, UptimeClock,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART0_IRQ => embassy_rp::uart::InterruptHandler<UART0>;
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

/// Inbound byte queues, one per serial link. The RX tasks fill them; the
/// bridge loop drains them without ever waiting.
static HOST_RX: RxQueue = RxQueue::new();
static DEVICE_RX: RxQueue = RxQueue::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("UART pin bridge starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Host link: UART0 on GPIO 0/1 ---
    let mut host_config = UartConfig::default();
    host_config.baudrate = HOST_BAUD;

    let host_uart = Uart::new(
        p.UART0,
        p.PIN_0, // TX
        p.PIN_1, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        host_config,
    );
    let (host_tx, host_rx) = host_uart.split();

    // --- Device link: UART1 on GPIO 8/9 ---
    let mut device_config = UartConfig::default();
    device_config.baudrate = DEVICE_BAUD;

    let device_uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH2,
        p.DMA_CH3,
        device_config,
    );
    let (device_tx, device_rx) = device_uart.split();

    spawner.spawn(uart_rx_task(host_rx, HOST_RX.sender())).unwrap();
    spawner.spawn(uart_rx_task(device_rx, DEVICE_RX.sender())).unwrap();

    // --- Pin sampling ---
    // Digital channels map onto GPIO 0-13; the slots for GPIOs claimed
    // by the two UARTs stay empty and read low.
    let digital = [
        None, // GPIO 0: host UART TX
        None, // GPIO 1: host UART RX
        Some(Input::new(p.PIN_2, Pull::Down)),
        Some(Input::new(p.PIN_3, Pull::Down)),
        Some(Input::new(p.PIN_4, Pull::Down)),
        Some(Input::new(p.PIN_5, Pull::Down)),
        Some(Input::new(p.PIN_6, Pull::Down)),
        Some(Input::new(p.PIN_7, Pull::Down)),
        None, // GPIO 8: device UART TX
        None, // GPIO 9: device UART RX
        Some(Input::new(p.PIN_10, Pull::Down)),
        Some(Input::new(p.PIN_11, Pull::Down)),
        Some(Input::new(p.PIN_12, Pull::Down)),
        Some(Input::new(p.PIN_13, Pull::Down)),
    ];

    // Analog channels A0-A3 on the four ADC inputs; A4/A5 read zero
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let analog = [
        Some(AdcChannel::new_pin(p.PIN_26, Pull::None)),
        Some(AdcChannel::new_pin(p.PIN_27, Pull::None)),
        Some(AdcChannel::new_pin(p.PIN_28, Pull::None)),
        Some(AdcChannel::new_pin(p.PIN_29, Pull::None)),
        None,
        None,
    ];
    let sampler = RpPinSampler::new(digital, adc, analog);

    let host_link = UartLink::new(HOST_RX.receiver(), host_tx);
    let device_link = UartLink::new(DEVICE_RX.receiver(), device_tx);

    let bridge = Bridge::new(
        host_link,
        device_link,
        sampler,
        UptimeClock,
        BridgeConfig {
            report_interval_ms: REPORT_INTERVAL_MS,
        },
    );

    spawner.spawn(bridge_task(bridge)).unwrap();

    info!("UART pin bridge initialized, relaying...");
}

/// The cooperative bridge loop: tick, flush staged output, yield.
#[embassy_executor::task]
async fn bridge_task(mut bridge: Bridge<UartLink, UartLink, RpPinSampler, UptimeClock>) {
    bridge.host_mut().write_all(STARTUP_BANNER);

    loop {
        bridge.tick();
        bridge.host_mut().flush().await;
        bridge.device_mut().flush().await;
        Timer::after_millis(1).await;
    }
}
