//! Sample pump: squelch-gate or monitor the input audio
//!
//! The input iterator yields `i16` samples until the source is
//! exhausted. In the default (gate) mode, audio is pushed through a
//! [`DcsSquelch`] in fixed-size buffers and the gated result is
//! written to standard output. In `--monitor` mode there is no audio
//! output; newly confirmed code designators are printed instead.

use std::io::{self, Write};

use anyhow::Context;
use byteorder::{NativeEndian, WriteBytesExt};
use log::info;

use dcsquelch::{CodeDetect, DcsDecoderBuilder, DcsSquelch};

use crate::cli::Args;

/// Samples per processing buffer
const CHUNK: usize = 1024;

/// Run the application
///
/// Consumes the `input` iterator until it is exhausted, then
/// returns.
pub fn run<I>(args: &Args, input: I) -> anyhow::Result<()>
where
    I: Iterator<Item = i16>,
{
    if args.monitor {
        monitor(args, input)
    } else {
        gate(args, input)
    }
}

// Report each newly confirmed code on stdout
fn monitor<I>(args: &Args, mut input: I) -> anyhow::Result<()>
where
    I: Iterator<Item = i16>,
{
    let mut decoder = DcsDecoderBuilder::new(args.rate).build();

    let quiet = args.quiet;
    let mut current: Option<CodeDetect> = None;
    decoder.bind_sink(move |detect: CodeDetect| {
        if current != Some(detect) {
            current = Some(detect);
            info!("confirmed {}", detect);
            if !quiet {
                println!("{}", detect);
            }
        }
    });

    let mut buf = [0.0f32; CHUNK];
    loop {
        let n = fill(&mut buf, &mut input);
        if n == 0 {
            break;
        }
        decoder.process_samples(&buf[..n]);
    }

    Ok(())
}

// Gate the input audio to stdout
fn gate<I>(args: &Args, mut input: I) -> anyhow::Result<()>
where
    I: Iterator<Item = i16>,
{
    let mut squelch = DcsSquelch::new(args.rate, args.code, args.tail);

    let stdout = io::stdout();
    let mut audio_out = io::BufWriter::new(stdout.lock());

    let mut inbuf = [0.0f32; CHUNK];
    let mut outbuf = [0.0f32; CHUNK];
    let mut was_open = false;

    loop {
        let n = fill(&mut inbuf, &mut input);
        if n == 0 {
            break;
        }

        squelch.process(&inbuf[..n], &mut outbuf[..n]);

        if squelch.is_open() != was_open {
            was_open = squelch.is_open();
            if was_open {
                info!("squelch open: {}", squelch.target());
            } else {
                info!("squelch closed");
            }
        }

        for &sample in &outbuf[..n] {
            audio_out
                .write_i16::<NativeEndian>(sample as i16)
                .context("unable to write audio output")?;
        }
    }

    audio_out.flush().context("unable to flush audio output")?;
    Ok(())
}

// Fill `buf` from the iterator; returns how many samples landed
fn fill<I>(buf: &mut [f32], input: &mut I) -> usize
where
    I: Iterator<Item = i16>,
{
    let mut count = 0;
    for slot in buf.iter_mut() {
        match input.next() {
            Some(sample) => {
                *slot = sample as f32;
                count += 1;
            }
            None => break,
        }
    }
    count
}
