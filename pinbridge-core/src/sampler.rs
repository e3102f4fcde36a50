//! Pin sampling seam.

/// Access to the pin values behind the monitored channels.
///
/// Implementations read the actual hardware (GPIO levels, ADC
/// conversions) or synthetic fixtures under test. Sampling has no
/// failure mode: a read always yields some value, and a channel that is
/// not physically present simply reads as low / zero.
pub trait PinSampler {
    /// Current level of digital channel `index`.
    fn read_digital(&mut self, index: u8) -> bool;

    /// Raw ADC conversion result for analog channel `index`.
    fn read_analog(&mut self, index: u8) -> u16;
}
