use std::io::{self, IsTerminal};

use anyhow::{bail, Context};
use byteorder::{NativeEndian, ReadBytesExt};
use clap::Parser;
use log::{info, LevelFilter};

mod app;
mod cli;

use cli::Args;

fn main() {
    // clap handles usage errors, --help, and --version itself
    let args = Args::parse();
    init_logging(&args);

    if let Err(err) = run(&args) {
        eprintln!("dcsdec: {:#}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut source = open_input(args)?;

    // pump i16 samples out of the source until EOF or a read error
    app::run(
        args,
        std::iter::from_fn(move || source.read_i16::<NativeEndian>().ok()),
    )
}

// Logging defaults to the -v count; RUST_LOG overrides it entirely.
// --quiet disables logging no matter what.
fn init_logging(args: &Args) {
    if args.quiet {
        return;
    }

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(spec) => {
            builder.parse_filters(&spec);
        }
        Err(_) => {
            builder.filter_level(level);
        }
    }
    builder.init();
}

// Open --file, or standard input for "-". Reading samples from an
// interactive terminal is never what anyone wants.
fn open_input(args: &Args) -> anyhow::Result<Box<dyn io::BufRead>> {
    if !args.input_is_stdin() {
        let file = std::fs::File::open(&args.file)
            .with_context(|| format!("cannot open --file \"{}\"", args.file))?;
        info!("reading raw PCM from \"{}\"", args.file);
        return Ok(Box::new(io::BufReader::new(file)));
    }

    if io::stdin().is_terminal() {
        bail!(
            "standard input is a terminal, not an audio stream.\n\n\
             Pipe raw PCM into this program, e.g. from sox, parec, or\n\
             rtl_fm. See --help for examples."
        );
    }

    info!("reading raw PCM from standard input");
    Ok(Box::new(io::BufReader::new(io::stdin().lock())))
}
