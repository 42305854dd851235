//! Offline cdef generator.
//!
//! Converts the engine's GDNative header into the textual interface
//! description an FFI loader consumes. The downstream format cannot evaluate
//! expressions, so the tool's real work is cooking: every compile-time
//! integer expression inside an enum declaration is evaluated into a literal,
//! and `sizeof(void*)` becomes the literal word size for the target pointer
//! width.
//!
//! This runs once, offline, as a build step. The output file is written
//! atomically so a failed run never leaves a corrupt description behind.

pub mod cursor;
pub mod emit;
pub mod enums;
pub mod error;
pub mod expr;
pub mod preprocess;

use std::path::PathBuf;

use log::info;

pub use emit::PointerWidth;
pub use error::CdefError;

/// Name of the generated API header inside the GDNative include directory.
const API_HEADER: &str = "gdnative_api_struct.gen.h";

/// Everything one generation run needs.
#[derive(Debug, Clone)]
pub struct Options {
    /// Path to the engine's GDNative include directory.
    pub gdnative_dir: PathBuf,
    /// Output file path.
    pub output: PathBuf,
    /// Target pointer width.
    pub bits: PointerWidth,
    /// Preprocessor command, possibly with leading arguments (e.g. `cc -E`).
    pub cpp: String,
}

/// Run one full generation: preprocess, cook, write atomically.
pub fn generate(opts: &Options) -> Result<(), CdefError> {
    let header = opts.gdnative_dir.join(API_HEADER);
    info!("preprocessing {}", header.display());

    let preprocessed = preprocess::Preprocessor::new(&opts.cpp)
        .include_dir(&opts.gdnative_dir)
        .run(&header)?;

    let cooked = emit::cook(&preprocessed, opts.bits)?;

    info!("writing {}", opts.output.display());
    emit::write_atomic(&opts.output, &cooked)
}
