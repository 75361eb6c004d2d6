//! Parser for the syscall definition grammar.
//!
//! The grammar is line oriented: a line containing `=` opens a new
//! definition (the name is everything left of the `=`, the remainder is
//! ignored), and each tab-separated three-field line below it declares one
//! argument as `MODE<TAB>TYPE<TAB>NAME[SIZE]`. Lines with any other field
//! count are skipped, which is how blank lines and comments get through.

use std::fmt;

use crate::model::{ArgDef, MAX_ARGS, Mode, SizeSpec, SyscallDef};

/// Errors produced while parsing a definition file.
///
/// Any of these aborts the run before output is produced.
#[derive(Debug)]
pub enum DefsError {
    /// An argument line appeared before the first `name =` header.
    OrphanArgument { line: usize },
    /// A name-spec did not match `IDENT` or `IDENT[SIZE]`.
    MalformedArgument { line: usize, spec: String },
    /// The mode field was not one of `N`, `IN`, `OUT`.
    UnknownMode { line: usize, mode: String },
    /// A definition declared more arguments than the wrapper has slots.
    TooManyArguments { line: usize, syscall: String },
    /// Two definitions share a name within one run.
    DuplicateSyscall { line: usize, syscall: String },
}

impl fmt::Display for DefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrphanArgument { line } => {
                write!(f, "line {line}: argument line before any `name =` header")
            }
            Self::MalformedArgument { line, spec } => {
                write!(
                    f,
                    "line {line}: malformed argument name `{spec}` (expected IDENT or IDENT[SIZE])"
                )
            }
            Self::UnknownMode { line, mode } => {
                write!(f, "line {line}: unknown mode `{mode}` (expected N, IN, or OUT)")
            }
            Self::TooManyArguments { line, syscall } => {
                write!(f, "line {line}: `{syscall}` declares more than {MAX_ARGS} arguments")
            }
            Self::DuplicateSyscall { line, syscall } => {
                write!(f, "line {line}: duplicate syscall definition `{syscall}`")
            }
        }
    }
}

impl std::error::Error for DefsError {}

/// Parse the full definition text into an ordered definition list.
pub fn parse_defs(source: &str) -> Result<Vec<SyscallDef>, DefsError> {
    let mut defs: Vec<SyscallDef> = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;

        // Header lines win over everything else, even tab-separated ones.
        if let Some((name, _rest)) = raw.split_once('=') {
            let name = name.trim().to_string();
            if defs.iter().any(|d| d.name == name) {
                return Err(DefsError::DuplicateSyscall { line, syscall: name });
            }
            defs.push(SyscallDef { name, args: Vec::new() });
            continue;
        }

        let fields: Vec<&str> = raw.trim().split('\t').collect();
        if fields.len() != 3 {
            continue;
        }
        let (mode, ty, name_spec) = (fields[0], fields[1], fields[2]);

        let Some(def) = defs.last_mut() else {
            return Err(DefsError::OrphanArgument { line });
        };
        if def.args.len() == MAX_ARGS {
            return Err(DefsError::TooManyArguments { line, syscall: def.name.clone() });
        }

        let (name, size) =
            parse_name_spec(name_spec).ok_or_else(|| DefsError::MalformedArgument {
                line,
                spec: name_spec.to_string(),
            })?;

        let mode = match mode {
            "N" => Mode::Value,
            "IN" => Mode::In(size),
            "OUT" => Mode::Out(size),
            other => {
                return Err(DefsError::UnknownMode { line, mode: other.to_string() });
            }
        };

        def.args.push(ArgDef { mode, ty: ty.to_string(), name });
    }

    Ok(defs)
}

/// Split a name-spec into the identifier and optional bracketed size.
///
/// Accepts `IDENT` and `IDENT[SIZE]`, with whitespace allowed around either
/// part. The size expression is trimmed and otherwise copied verbatim; an
/// empty `[]` counts as no size at all.
fn parse_name_spec(spec: &str) -> Option<(String, SizeSpec)> {
    let spec = spec.trim();

    let mut end = 0;
    for (i, c) in spec.char_indices() {
        let ok = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if !ok {
            break;
        }
        end = i + c.len_utf8();
    }
    if end == 0 {
        return None;
    }
    let name = spec[..end].to_string();

    let rest = spec[end..].trim_start();
    if rest.is_empty() {
        return Some((name, SizeSpec::Implicit));
    }

    let inner = rest.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return Some((name, SizeSpec::Implicit));
    }
    Some((name, SizeSpec::Explicit(inner.to_string())))
}
