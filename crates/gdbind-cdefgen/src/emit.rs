//! Final assembly and atomic output.

use std::io::Write;
use std::path::Path;

use regex::Regex;

use crate::enums::cook_enums;
use crate::error::CdefError;

/// Banner prepended to every generated description.
pub const BANNER: &str = "\
/********************************************************/
/*            AUTOGENERATED by gdbind-cdefgen           */
/********************************************************/";

/// Target pointer width for `sizeof(void*)` substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PointerWidth {
    #[value(name = "32")]
    Bits32,
    #[default]
    #[value(name = "64")]
    Bits64,
}

impl PointerWidth {
    /// `sizeof(void*)` in bytes, as a literal.
    pub fn word_size(self) -> &'static str {
        match self {
            PointerWidth::Bits32 => "4",
            PointerWidth::Bits64 => "8",
        }
    }
}

/// Cook preprocessed source into the final description text.
///
/// Drops everything before the first engine declaration (the preprocessor
/// emits host libc typedefs first, and those only produce downstream parse
/// errors), rewrites enum initializers to literals, substitutes
/// `sizeof(void*)` with the target word size, and prepends the banner.
pub fn cook(preprocessed: &str, bits: PointerWidth) -> Result<String, CdefError> {
    let first_engine_line = preprocessed
        .lines()
        .position(|line| line.to_ascii_lowercase().contains("godot"))
        .ok_or(CdefError::NoEngineDeclarations)?;

    let body: Vec<&str> = preprocessed.lines().skip(first_engine_line).collect();
    let body = cook_enums(&body.join("\n"));

    // The downstream loader cannot evaluate sizeof either.
    let sizeof_re = Regex::new(r"sizeof *\( *void *\* *\)").expect("static regex");
    let body = sizeof_re.replace_all(&body, bits.word_size());

    Ok(format!("{BANNER}\n{body}\n"))
}

/// Write the description atomically: temp file in the target directory,
/// then rename over the destination.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), CdefError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|source| CdefError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
