//! External C preprocessor invocation.
//!
//! The headers need a real preprocessing pass before cooking (includes,
//! macro expansion). The command is configurable because build environments
//! disagree on what the preprocessor is called (`cpp`, `cc -E`, ...); the
//! whole string splits on whitespace, first word is the program.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::CdefError;

/// Configured preprocessor invocation.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    command: String,
    include_dirs: Vec<PathBuf>,
}

impl Preprocessor {
    /// Create a preprocessor from its command string.
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            include_dirs: Vec::new(),
        }
    }

    /// Add an include directory.
    pub fn include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    /// Preprocess `header` and return the resulting source text.
    pub fn run(&self, header: &Path) -> Result<String, CdefError> {
        let mut words = self.command.split_whitespace();
        let program = words.next().unwrap_or("cpp");

        let mut cmd = Command::new(program);
        cmd.args(words);
        // Compiler attributes mean nothing to the downstream loader.
        cmd.arg("-D__attribute__(x)=");
        for dir in &self.include_dirs {
            cmd.arg("-I").arg(dir);
        }
        cmd.arg(header);

        debug!("running {cmd:?}");
        let output = cmd.output().map_err(|source| CdefError::PreprocessorSpawn {
            command: self.command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(CdefError::Preprocessor {
                command: self.command.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_preprocessor_is_a_spawn_error() {
        let pre = Preprocessor::new("definitely-not-a-preprocessor-7f3a");
        let err = pre.run(Path::new("whatever.h")).unwrap_err();
        assert!(matches!(err, CdefError::PreprocessorSpawn { .. }));
    }
}
