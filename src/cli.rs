//! Command-line interface definitions for grategen.

use std::path::PathBuf;

use clap::Parser;

/// Cross-cage syscall wrapper generator.
#[derive(Parser)]
#[command(name = "grategen", version, about)]
pub struct Cli {
    /// Emission mode: "0" emits weak header declarations, any other value
    /// emits wrapper function bodies.
    pub mode: String,

    /// Syscall definition file to read (default: syscalls).
    #[arg(long)]
    pub defs: Option<PathBuf>,

    /// clang-format style profile (default: file).
    #[arg(long)]
    pub style: Option<String>,

    /// Print raw generated text without running clang-format.
    #[arg(long)]
    pub no_format: bool,

    /// Suppress progress diagnostics; print only errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable per-definition diagnostics on stderr.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// What to emit for each definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
    /// Weak forward declarations for a header.
    Declarations,
    /// Marshalling wrapper bodies.
    Wrappers,
}

impl Cli {
    /// The run mode selected by the positional argument.
    pub fn emit_mode(&self) -> EmitMode {
        if self.mode == "0" {
            EmitMode::Declarations
        } else {
            EmitMode::Wrappers
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(mode: &str) -> Cli {
        Cli {
            mode: mode.to_string(),
            defs: None,
            style: None,
            no_format: false,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn zero_selects_declarations() {
        assert_eq!(cli("0").emit_mode(), EmitMode::Declarations);
    }

    #[test]
    fn anything_else_selects_wrappers() {
        assert_eq!(cli("1").emit_mode(), EmitMode::Wrappers);
        assert_eq!(cli("header").emit_mode(), EmitMode::Wrappers);
    }
}
