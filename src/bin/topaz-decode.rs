//! Command-line driver for the Topaz page-stream decoder.
//!
//! Converts a `page*.dat`/`glyphs*.dat` file to its XML description
//! using the accompanying `dict0000.dat` string table. Use the
//! upstream unencryption/decompression tooling first to produce these
//! `.dat` files from a Topaz e-book -- that stage is out of scope here.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use topaz_xml::{from_data, get_xml, Dictionary};

#[derive(Parser)]
#[command(
    name = "topaz-decode",
    about = "Decode a Topaz page*.dat/glyphs*.dat stream to XML"
)]
struct Args {
    /// Path to dict0000.dat
    dictionary_path: PathBuf,

    /// Path to the page/glyph/stylesheet stream to decode
    page_path: PathBuf,

    /// Turn on debug traces to stdout
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Output the flattened XML page description only
    #[arg(long = "flat-xml")]
    flat_xml: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .init();

    match run(&args) {
        Ok(xml) => {
            println!("{}", xml);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> topaz_xml::Result<String> {
    let dict = Dictionary::load_file(&args.dictionary_path)?;
    if args.flat_xml {
        from_data(&dict, &args.page_path)
    } else {
        get_xml(&dict, &args.page_path)
    }
}
