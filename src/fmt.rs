//! Pretty-printing of generated C source via `clang-format`.
//!
//! Purely cosmetic: the raw emitted text is already valid C, so callers may
//! bypass this step entirely with `--no-format`. A missing or failing
//! formatter aborts the whole run.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};

/// Pipe `source` through `clang-format --style=<style>` and return the
/// formatted text.
///
/// The subprocess is synchronous and run to completion; there is no timeout.
pub fn clang_format(source: &str, style: &str) -> Result<String> {
    let mut child = Command::new("clang-format")
        .arg(format!("--style={style}"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to run clang-format (is it installed?)")?;

    let mut stdin = child
        .stdin
        .take()
        .context("failed to open clang-format stdin")?;
    stdin
        .write_all(source.as_bytes())
        .context("failed to write to clang-format stdin")?;
    drop(stdin);

    let output = child
        .wait_with_output()
        .context("failed to wait for clang-format")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "clang-format exited with {}:\n{}",
            output.status,
            stderr.trim_end()
        );
    }

    String::from_utf8(output.stdout).context("clang-format produced non-UTF-8 output")
}
