use clap::Parser;

use dcsquelch::CodeDetect;

/// Standard input filename
const STDIN_FILE: &str = "-";

const USAGE_SHORT: &str = r#"
This program accepts raw PCM samples in signed 16-bit (i16) format, at the given sampling --rate, and gates them through a Digital Coded Squelch keyed to --code. Gated audio is written to standard output in the same format.

See --help for more details.

ALWAYS TEST YOUR SQUELCH SETUP!
"#;

const USAGE_LONG: &str = r#"
This program accepts raw PCM samples in signed 16-bit (i16) format, at the given sampling --rate, and gates them through a Digital Coded Squelch keyed to --code. Audio passes through (and is written to standard output as i16) only while the code is present, plus a --tail of a few hundred milliseconds. The input must be baseband receiver audio that still contains the subaudible band; do not high-pass it first.

You can pipe in an audio file with sox

    sox input.wav -t raw -r 16k -e signed -b 16 -c 1 - \
        | dcsdec -r 16000 -c D023N > gated.raw

or monitor a channel for whatever codes are in use:

    rtl_fm -f 446.00625M -s 16000 | dcsdec -r 16000 --monitor

Codes are written in the usual octal designator notation: "023",
"D023", or "D023N" for inverted polarity. Some designators name the
same on-air sequence; dcsdec reports and matches the canonical one.

ALWAYS TEST YOUR SQUELCH SETUP!
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None, max_term_width = 100)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
pub struct Args {
    /// Log more (repeat for even more: -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print nothing at all, not even detected codes
    #[arg(short, long)]
    pub quiet: bool,

    /// Sampling rate (Hz)
    ///
    /// Set to the sampling rate of your audio source. If sampling
    /// from a sound card, use the card's native rate. Avoid
    /// resampling the audio.
    #[arg(short, long, default_value_t = 16000)]
    pub rate: u32,

    /// Target DCS code designator (e.g. "D023" or "023N")
    #[arg(short, long, default_value = "D023")]
    pub code: CodeDetect,

    /// Squelch tail (milliseconds)
    ///
    /// How long the gate stays open after the code disappears.
    #[arg(long, default_value_t = 250.0)]
    pub tail: f32,

    /// Read audio from this file instead of stdin
    ///
    /// Raw mono PCM, signed 16-bit native-endian, at --rate. Pass
    /// "-" for standard input.
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    pub file: String,

    /// Report detected codes instead of gating audio
    ///
    /// No audio is written. Each newly confirmed code designator is
    /// printed on its own line. Useful for discovering which code a
    /// channel uses.
    #[arg(short, long)]
    pub monitor: bool,
}

impl Args {
    /// True when --file names standard input
    pub fn input_is_stdin(&self) -> bool {
        self.file == STDIN_FILE
    }
}
