//! Subaudible tone isolation filter

use crate::waveform::TONE_CUTOFF_HZ;

/// First-order IIR low-pass filter
///
/// Isolates the sub-300 Hz band in which the DCS tone lives,
/// suppressing the voice band above it. The filter computes
///
/// ```txt
/// y[n] = α·x[n] + (1 − α)·y[n−1]
/// ```
///
/// with `α = 1 − e^(−2π·fc/fs)`. The coefficient is fixed at
/// construction time and the filter is numerically benign for
/// sampling rates in the 8 kHz – 96 kHz range.
#[derive(Clone, Debug)]
pub struct LowPass {
    // filter coefficient, in (0, 1)
    alpha: f32,

    // previous output sample (feedback)
    state: f32,
}

impl LowPass {
    /// New low-pass filter at the DCS tone cutoff
    ///
    /// Creates the filter for the given `input_rate`, in Hz.
    pub fn new(input_rate: u32) -> Self {
        Self::with_cutoff(TONE_CUTOFF_HZ, input_rate)
    }

    /// New low-pass filter with an arbitrary cutoff
    ///
    /// `cutoff` is the -3 dB point, in Hz. It should be well below
    /// half the `input_rate`.
    pub fn with_cutoff(cutoff: f32, input_rate: u32) -> Self {
        let alpha = 1.0f32 - f32::exp(-2.0 * std::f32::consts::PI * cutoff / input_rate as f32);
        Self { alpha, state: 0.0 }
    }

    /// Reset to zero initial conditions
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    /// Filter one input sample
    ///
    /// Returns the filtered output. The output is retained as
    /// feedback for the next call.
    #[inline]
    pub fn filter(&mut self, input: f32) -> f32 {
        self.state = self.alpha * input + (1.0 - self.alpha) * self.state;
        self.state
    }

    /// Filter coefficient α
    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}
