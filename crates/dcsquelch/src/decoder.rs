//! DCS decoder chain

#[cfg(not(test))]
use log::debug;

#[cfg(test)]
use std::println as debug;

use crate::bitclock::BitClock;
use crate::builder::DcsDecoderBuilder;
use crate::codes::{classify, CodeDetect};
use crate::filter::LowPass;
use crate::golay::SyndromeTable;
use crate::window::BitWindows;

/// Receives confirmed code detections
///
/// Implementations are invoked synchronously from inside
/// [`DcsDecoder::process_samples`], on the caller's thread, once per
/// bit boundary at which the confirmed code is still present. Treat
/// every call as a "code present now" pulse rather than an edge: a
/// squelch holding a tail timer open should reload the timer on each
/// call.
///
/// Any `FnMut(CodeDetect)` closure is a `CodeSink`.
pub trait CodeSink {
    /// Called for each confirmed detection
    fn code_detected(&mut self, detect: CodeDetect);
}

impl<F> CodeSink for F
where
    F: FnMut(CodeDetect),
{
    fn code_detected(&mut self, detect: CodeDetect) {
        self(detect)
    }
}

// sink used when nothing is bound
struct NullSink;

impl CodeSink for NullSink {
    fn code_detected(&mut self, _detect: CodeDetect) {}
}

/// Streaming DCS decoder
///
/// Turns a stream of audio samples into confirmed
/// [`CodeDetect`] events. The chain, per input sample:
///
/// 1. low-pass filtering to isolate the sub-300 Hz DCS band;
/// 2. zero-crossing bit clock recovery and integrate-and-dump
///    slicing at 134.4 bits per second;
///
/// and per recovered bit:
///
/// 3. both sliding 23-bit windows advance;
/// 4. each window is Golay-corrected and its cyclic class resolved
///    to a canonical recognized code, either polarity;
/// 5. two consecutive matching resolutions confirm the code, after
///    which every further matching bit re-reports it.
///
/// A window that required error correction can only re-affirm the
/// code already being tracked; introducing a different code takes a
/// window that is a codeword as received. Bit boundaries that
/// resolve to nothing walk the confirmation counter back toward
/// zero, so isolated bad bits do not drop an established detection.
///
/// The decoder is single-threaded; wrap separate instances for
/// separate audio streams. Events are delivered in input order to
/// the bound [`CodeSink`] (or one supplied per call). Rebinding the
/// sink from inside a callback is not supported.
pub struct DcsDecoder {
    lowpass: LowPass,
    clock: BitClock,
    windows: BitWindows,

    // confirmation state
    last: Option<CodeDetect>,
    confirm_count: u32,

    input_rate: u32,
    input_sample_counter: u64,

    sink: Option<Box<dyn CodeSink>>,
}

impl DcsDecoder {
    /// Bind the event sink
    ///
    /// Replaces any previous binding. The sink is invoked from
    /// inside [`process_samples`](DcsDecoder::process_samples).
    pub fn bind_sink<S>(&mut self, sink: S)
    where
        S: CodeSink + 'static,
    {
        self.sink = Some(Box::new(sink));
    }

    /// Remove the event sink, if any
    pub fn unbind_sink(&mut self) {
        self.sink = None;
    }

    /// Process audio samples
    ///
    /// Runs the full chain over `samples`, invoking the bound sink
    /// zero or more times before returning. Sample magnitudes do
    /// not matter (every decision is sign-based), but the samples
    /// must be at the decoder's input rate.
    pub fn process_samples(&mut self, samples: &[f32]) {
        match self.sink.take() {
            Some(mut sink) => {
                self.process_samples_with(samples, sink.as_mut());
                self.sink = Some(sink);
            }
            None => self.process_samples_with(samples, &mut NullSink),
        }
    }

    /// Process audio samples into a caller-provided sink
    ///
    /// Identical to [`process_samples`](DcsDecoder::process_samples)
    /// but delivers events to `sink` instead of the bound sink. This
    /// lets a wrapper own the decoder and still observe events
    /// without shared state.
    pub fn process_samples_with(&mut self, samples: &[f32], sink: &mut dyn CodeSink) {
        for &sample in samples {
            self.input_sample_counter = self.input_sample_counter.wrapping_add(1);
            let filtered = self.lowpass.filter(sample);
            if let Some(bit) = self.clock.input(filtered) {
                self.windows.push(bit);
                self.bit_boundary(sink);
            }
        }
    }

    /// Input sampling rate (Hz)
    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    /// Lifetime total of input samples processed
    pub fn input_sample_counter(&self) -> u64 {
        self.input_sample_counter
    }

    /// Clear all DSP state and reset to zero initial conditions
    ///
    /// The sink binding is kept.
    pub fn reset(&mut self) {
        self.lowpass.reset();
        self.clock.reset();
        self.windows.reset();
        self.last = None;
        self.confirm_count = 0;
        self.input_sample_counter = 0;
    }

    // One recovered bit: resolve the windows and update the
    // confirmation state, emitting if confirmed.
    fn bit_boundary(&mut self, sink: &mut dyn CodeSink) {
        match self.resolve_windows() {
            Some(detect) if self.last == Some(detect) => {
                self.confirm_count += 1;
                if self.confirm_count == 2 {
                    debug!(
                        "[{:<14}]: confirmed {}",
                        self.input_sample_counter, detect
                    );
                }
                if self.confirm_count >= 2 {
                    sink.code_detected(detect);
                }
            }
            Some(detect) => {
                self.last = Some(detect);
                self.confirm_count = 1;
            }
            None => {
                if self.confirm_count == 1 {
                    if let Some(lost) = self.last {
                        debug!("[{:<14}]: lost {}", self.input_sample_counter, lost);
                    }
                }
                self.confirm_count = self.confirm_count.saturating_sub(1);
            }
        }
    }

    // Resolve both windows to at most one detection.
    //
    // A resolution matching the tracked code wins outright. Among
    // the rest, only windows received as exact codewords compete,
    // and the smallest code is kept. Corrected windows never
    // introduce a new code: for any input the corrector lands on
    // *some* codeword, and on periodic input it lands on the same
    // one every bit, so an acquisition path through corrections
    // would confirm phantom codes.
    fn resolve_windows(&self) -> Option<CodeDetect> {
        let table = SyndromeTable::shared();
        let mut acquired: Option<CodeDetect> = None;

        for window in [self.windows.reversed(), self.windows.straight()] {
            let Some((codeword, error)) = table.correct(window) else {
                continue;
            };
            let Some(detect) = classify(codeword) else {
                continue;
            };
            if self.last == Some(detect) {
                return Some(detect);
            }
            if error == 0 && acquired.map_or(true, |best| detect < best) {
                acquired = Some(detect);
            }
        }

        acquired
    }
}

impl From<&DcsDecoderBuilder> for DcsDecoder {
    /// Create the decoder from its builder
    fn from(cfg: &DcsDecoderBuilder) -> Self {
        Self {
            lowpass: LowPass::new(cfg.input_rate()),
            clock: BitClock::new(cfg.input_rate(), cfg.clock_nudge()),
            windows: BitWindows::new(),
            last: None,
            confirm_count: 0,
            input_rate: cfg.input_rate(),
            input_sample_counter: 0,
            sink: None,
        }
    }
}

impl std::fmt::Debug for DcsDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DcsDecoder")
            .field("lowpass", &self.lowpass)
            .field("clock", &self.clock)
            .field("windows", &self.windows)
            .field("last", &self.last)
            .field("confirm_count", &self.confirm_count)
            .field("input_rate", &self.input_rate)
            .field("input_sample_counter", &self.input_sample_counter)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
