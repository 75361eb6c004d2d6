//! Cross-cage syscall wrapper generator.
//!
//! Reads a flat-text syscall definition grammar and emits C marshalling
//! wrappers ("grates") that carry raw slot-based calls across the cage
//! boundary, staging IN/OUT buffers through the cage copy primitive.
//!
//! Pipeline: read definitions → parse → emit per definition →
//!           clang-format → stdout.

mod cli;
mod config;
mod emit;
mod fmt;
mod model;
mod parse;
mod verbose;

use anyhow::{Context, Result};
use clap::Parser;

use cli::EmitMode;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    verbose::init(args.quiet, args.verbose);

    let cfg = config::resolve(&args)?;

    let source = std::fs::read_to_string(&cfg.defs)
        .with_context(|| format!("failed to read {}", cfg.defs.display()))?;
    let defs = parse::parse_defs(&source)
        .with_context(|| format!("failed to parse {}", cfg.defs.display()))?;
    verbose::dprintln!(
        "parsed {} syscall definitions from {}",
        defs.len(),
        cfg.defs.display()
    );

    let mode = args.emit_mode();
    for def in &defs {
        verbose::vprintln!("  emitting {}", def.name);
        let code = match mode {
            EmitMode::Declarations => emit::weak_declaration(def),
            EmitMode::Wrappers => emit::wrapper_function(def),
        };
        let text = if cfg.format {
            fmt::clang_format(&code, &cfg.style)?
        } else {
            code
        };
        println!("{text}");
    }

    Ok(())
}
