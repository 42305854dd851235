//! `cdefgen` - generate the cdef interface description from engine headers.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use gdbind_cdefgen::{Options, PointerWidth, generate};

/// Generate the cdef description file from the engine's GDNative headers.
#[derive(Parser, Debug)]
#[command(name = "cdefgen", version)]
struct Cli {
    /// Path to the engine's GDNative include directory.
    gdnative: PathBuf,

    /// Output file.
    #[arg(short, long, default_value = "cdef.gen.h")]
    output: PathBuf,

    /// Target pointer width.
    #[arg(short, long, value_enum, default_value_t)]
    bits: PointerWidth,

    /// Preprocessor command.
    #[arg(long, default_value = "cpp")]
    cpp: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let opts = Options {
        gdnative_dir: cli.gdnative,
        output: cli.output.clone(),
        bits: cli.bits,
        cpp: cli.cpp,
    };
    generate(&opts).with_context(|| format!("generating {}", cli.output.display()))?;
    Ok(())
}
