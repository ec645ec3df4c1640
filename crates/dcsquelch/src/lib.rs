//! # dcsquelch: Digital Coded Squelch detection
//!
//! This crate provides a streaming decoder for
//! [Digital Coded Squelch](https://en.wikipedia.org/wiki/Continuous_Tone-Coded_Squelch_System#Digital-Coded_Squelch)
//! (DCS, also marketed as DPL or DTCS) and an audio squelch gate
//! driven by it. It can detect which DCS code is present on a
//! received FM channel and pass audio through only while a chosen
//! code is being transmitted.
//!
//! ## Example
//!
//! You will first need demodulated *baseband audio* from a radio
//! receiver: the same audio you would listen to, before any
//! high-pass filtering strips the subaudible band. An audio "line
//! out" jack or a software-defined radio both work; sampling the
//! sound card is beyond the scope of this crate (try
//! [cpal](https://crates.io/crates/cpal)). Mix stereo signals down
//! to mono first.
//!
//! ```
//! use dcsquelch::{CodeDetect, DcsDecoderBuilder};
//!
//! // create a decoder at your audio sampling rate
//! let mut decoder = DcsDecoderBuilder::new(16000).build();
//!
//! // deliver confirmed detections to any FnMut(CodeDetect)
//! decoder.bind_sink(|detect: CodeDetect| {
//!     println!("code present: {}", detect);
//! });
//!
//! // push mono f32 samples as they arrive; the sink fires from
//! // inside process_samples()
//! let audio = vec![0.0f32; 1024];
//! decoder.process_samples(&audio);
//! ```
//!
//! To gate audio instead of just detecting, use
//! [`DcsSquelch`]:
//!
//! ```
//! use dcsquelch::DcsSquelch;
//!
//! let mut gate = DcsSquelch::new(16000, "D023N".parse().unwrap(), 250.0);
//!
//! let input = vec![0.0f32; 1024];
//! let mut output = vec![0.0f32; 1024];
//! gate.process(&input, &mut output);
//! // output now contains input where the gate is open, zeros elsewhere
//! ```
//!
//! Sample amplitude does not matter; every decision in the chain is
//! sign-based. Samples must be at the rate the decoder was built
//! with, and a decoder instance must stay on one audio stream.
//!
//! ## Background
//!
//! DCS transmits a continuous 134.4 bit/s NRZ bitstream underneath
//! the voice audio, below roughly 300 Hz. Each 23-bit word is a
//! systematic (23,12) Golay codeword carrying a 9-bit code number;
//! the words repeat back to back for as long as the transmitter is
//! keyed. Receivers mute their audio until they hear their own code,
//! so squelch groups on a shared channel ignore each other's traffic.
//!
//! Codes are written as three octal digits: `D023`, or `D023N` when
//! the signal polarity is inverted. Because the Golay code is cyclic
//! and the words repeat without framing, several designators name
//! the same on-air bit sequence; this crate always reports the
//! canonical member of each such class (see
//! [`CodeDetect::normalized`]).
//!
//! Decoded detections are *pulses*, reported at every bit once a
//! code is confirmed. Consumers such as the squelch gate refresh a
//! hold-open tail from each pulse rather than tracking edges.

mod bitclock;
mod builder;
mod codes;
mod decoder;
mod filter;
pub mod golay;
mod squelch;
mod waveform;
mod window;

pub use builder::DcsDecoderBuilder;
pub use codes::{CodeDetect, DcsCode, UnknownCodeErr, NUM_CODES};
pub use decoder::{CodeSink, DcsDecoder};
pub use squelch::DcsSquelch;
pub use waveform::{samples_per_bit, BIT_RATE_HZ, TONE_CUTOFF_HZ};
