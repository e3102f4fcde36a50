//! GPIO/ADC pin sampling on the RP2040.

use embassy_rp::adc::{Adc, Blocking, Channel as AdcChannel};
use embassy_rp::gpio::Input;
use pinbridge_core::{PinSampler, ANALOG_CHANNEL_COUNT, DIGITAL_CHANNEL_COUNT};

/// Samples the monitored channels from real pins.
///
/// Digital channels map index-for-index onto GPIO 0-13; slots whose GPIO
/// is claimed by a UART (or otherwise unavailable) are `None` and read
/// low. Analog channels 0-3 map onto the four ADC inputs (GPIO 26-29);
/// channels 4 and 5 have no hardware behind them and read zero. Reads
/// never fail: an ADC conversion error degrades to zero like an absent
/// pin.
pub struct RpPinSampler {
    digital: [Option<Input<'static>>; DIGITAL_CHANNEL_COUNT],
    adc: Adc<'static, Blocking>,
    analog: [Option<AdcChannel<'static>>; ANALOG_CHANNEL_COUNT],
}

impl RpPinSampler {
    pub fn new(
        digital: [Option<Input<'static>>; DIGITAL_CHANNEL_COUNT],
        adc: Adc<'static, Blocking>,
        analog: [Option<AdcChannel<'static>>; ANALOG_CHANNEL_COUNT],
    ) -> Self {
        Self {
            digital,
            adc,
            analog,
        }
    }
}

impl PinSampler for RpPinSampler {
    fn read_digital(&mut self, index: u8) -> bool {
        match self.digital.get(index as usize) {
            Some(Some(pin)) => pin.is_high(),
            _ => false,
        }
    }

    fn read_analog(&mut self, index: u8) -> u16 {
        match self.analog.get_mut(index as usize) {
            Some(Some(channel)) => self.adc.blocking_read(channel).unwrap_or(0),
            _ => 0,
        }
    }
}
