use crate::bitclock::DEFAULT_NUDGE;
use crate::decoder::DcsDecoder;

/// Builds a DCS decoder
///
/// The only mandatory parameter is the input sampling rate. The
/// remaining knobs default to values that track the historical
/// decoder behavior; the API of this builder is stable, but the
/// default values are not and may be revised in any minor release.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct DcsDecoderBuilder {
    input_rate: u32,
    clock_nudge: f32,
}

impl DcsDecoderBuilder {
    /// New decoder builder
    ///
    /// `input_rate` is the audio sampling rate in Hz. Rates from
    /// 8 kHz to 96 kHz are well-supported; rates below about twice
    /// the 134.4 Hz bit rate leave the bit slicer with nothing to
    /// work with and will never confirm a code.
    pub fn new(input_rate: u32) -> Self {
        Self {
            input_rate,
            clock_nudge: DEFAULT_NUDGE,
        }
    }

    /// Clock recovery nudge (fraction of a bit period)
    ///
    /// At every zero crossing of the filtered signal, the bit phase
    /// is pulled by this fraction of a bit toward alignment. Larger
    /// values track faster clock error but are more disturbed by
    /// noise-induced crossings.
    pub fn with_clock_nudge(&mut self, nudge: f32) -> &mut Self {
        self.clock_nudge = f32::clamp(nudge, 0.0, 0.25);
        self
    }

    /// Build a decoder
    ///
    /// The decoder is immediately ready to process samples.
    pub fn build(&self) -> DcsDecoder {
        DcsDecoder::from(self)
    }

    /// Input sampling rate (Hz)
    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    /// Clock recovery nudge (fraction of a bit period)
    pub fn clock_nudge(&self) -> f32 {
        self.clock_nudge
    }
}

impl std::default::Default for DcsDecoderBuilder {
    fn default() -> Self {
        Self::new(16000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let builder = DcsDecoderBuilder::default();
        assert_eq!(builder.input_rate(), 16000);
        assert_eq!(builder.clock_nudge(), DEFAULT_NUDGE);
    }

    #[test]
    fn test_clamps() {
        let mut builder = DcsDecoderBuilder::new(22050);
        builder.with_clock_nudge(5.0);
        assert_eq!(builder.clock_nudge(), 0.25);
        builder.with_clock_nudge(-1.0);
        assert_eq!(builder.clock_nudge(), 0.0);

        let decoder = builder.build();
        assert_eq!(decoder.input_rate(), 22050);
    }
}
