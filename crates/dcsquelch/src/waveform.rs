//! DCS waveform parameters

/// DCS bit rate (Hz)
///
/// DCS is a continuous NRZ bitstream at 134.4 bits per second,
/// transmitted below the voice band.
pub const BIT_RATE_HZ: f32 = 134.4;

/// DCS tone band edge (Hz)
///
/// The DCS signal lives below approximately 300 Hz. The receive
/// chain isolates this band with a first-order low-pass filter at
/// this cutoff.
pub const TONE_CUTOFF_HZ: f32 = 300.0;

/// Length of one DCS word, in bits
pub const WORD_BITS: u32 = 23;

/// DCS bit period at the given sampling rate, in fractional samples
pub fn samples_per_bit(input_rate: u32) -> f32 {
    input_rate as f32 / BIT_RATE_HZ
}

/// Very simple NRZ modulator
///
/// Repeats the 23-bit `codeword` as a ±1.0 NRZ waveform at the DCS
/// bit rate for `num_samples` samples. One bits are emitted as +1.0
/// and zero bits as -1.0. If `msb_first` is set, bit 22 of the
/// codeword is transmitted first; otherwise bit 0 is.
///
/// This method is designed for use in tests.
#[cfg(test)]
pub fn modulate_nrz(codeword: u32, msb_first: bool, input_rate: u32, num_samples: usize) -> Vec<f32> {
    let bits: Vec<u32> = if msb_first {
        (0..WORD_BITS).rev().map(|i| (codeword >> i) & 1).collect()
    } else {
        (0..WORD_BITS).map(|i| (codeword >> i) & 1).collect()
    };

    let spb = samples_per_bit(input_rate);
    (0..num_samples)
        .map(|i| {
            let bit = bits[(i as f32 / spb) as usize % WORD_BITS as usize];
            if bit == 1 {
                1.0f32
            } else {
                -1.0f32
            }
        })
        .collect()
}
