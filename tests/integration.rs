//! Integration tests for the grategen binary.
//!
//! These tests invoke the compiled binary as a subprocess against fixture
//! definition files, with formatting disabled so the output is byte-stable
//! without clang-format installed. They are marked `#[ignore]` because they
//! require the grategen binary to be pre-built.
//!
//! Run with: `cargo test --test integration -- --ignored`

use std::path::PathBuf;
use std::process::Command;

/// Locate the compiled grategen binary.
///
/// `cargo test` places the test binary under `target/debug/deps/`. The main
/// binary lives one level up at `target/debug/grategen`.
fn grategen_binary() -> PathBuf {
    let mut path = std::env::current_exe().expect("could not determine test binary path");
    // Go up from deps/ directory to debug/.
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("grategen");
    path
}

/// Path to a fixture definition file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn run_grategen(mode: &str, defs: &str) -> std::process::Output {
    Command::new(grategen_binary())
        .arg(mode)
        .arg("--no-format")
        .arg("--defs")
        .arg(fixture(defs))
        .output()
        .expect("failed to execute grategen")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn emits_one_wrapper_per_definition() {
    let output = run_grategen("1", "syscalls");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "grategen failed (exit={:?}):\nstderr:\n{stderr}",
        output.status.code(),
    );

    for name in ["open", "close", "read", "write"] {
        assert_eq!(
            stdout.matches(&format!("int {name}_grate(uint64_t cageid")).count(),
            1,
            "expected exactly one wrapper for {name}",
        );
    }
    assert!(stdout.contains("int ret = open_syscall(cageid, pathname, flags, mode);"));
    assert!(stdout.contains("void* buf = malloc(count);"));
    // Headers are not emitted in wrapper mode.
    assert!(!stdout.contains("__attribute__((weak))"));
}

#[test]
#[ignore]
fn emits_one_declaration_per_definition() {
    let output = run_grategen("0", "syscalls");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "grategen failed (exit={:?}):\nstderr:\n{stderr}",
        output.status.code(),
    );

    assert_eq!(stdout.matches("__attribute__((weak))").count(), 4);
    assert!(stdout.contains(
        "__attribute__((weak)) int open_syscall(int cageid, char* pathname, int flags, mode_t mode);"
    ));
    assert!(stdout.contains("__attribute__((weak)) int close_syscall(int cageid, int fd);"));
    assert!(!stdout.contains("_grate("));
}

#[test]
#[ignore]
fn orphan_argument_fails_with_no_output() {
    let output = run_grategen("1", "orphan");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "expected failure, got success");
    assert!(stdout.is_empty(), "expected no output, got:\n{stdout}");
    assert!(
        stderr.contains("argument line before any"),
        "unexpected stderr:\n{stderr}",
    );
}
