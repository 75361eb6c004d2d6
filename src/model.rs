//! Descriptor types for the syscall marshalling DSL.
//!
//! These types represent parsed definition-file entries before code
//! generation. The definition list is threaded as a plain value from the
//! parser to the emitter; nothing is shared between runs.

/// Raw argument slots available in every wrapper signature.
pub const MAX_ARGS: usize = 6;

/// Transfer mode of one argument across the cage boundary.
///
/// Closed over the three grammar keywords, so an unhandled mode is a
/// compile-time error in the emitter rather than a silent no-op. Buffer
/// sizes live inside the `In`/`Out` variants; a pass-by-value argument
/// cannot carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// `N`: pass-by-value scalar, no cross-cage copy.
    Value,
    /// `IN`: caller-owned buffer, staged into the callee cage before the call.
    In(SizeSpec),
    /// `OUT`: callee-owned buffer, copied back to the caller after the call.
    Out(SizeSpec),
}

/// Staging buffer size for an `IN`/`OUT` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeSpec {
    /// Bracketed size expression from the grammar, copied verbatim.
    Explicit(String),
    /// No bracketed size given; the default length applies.
    Implicit,
}

impl SizeSpec {
    /// Staging buffer length in bytes when the grammar gives none.
    pub const DEFAULT_LEN: &'static str = "256";

    /// The size expression as it is spelled in generated code.
    pub fn expr(&self) -> &str {
        match self {
            SizeSpec::Explicit(expr) => expr,
            SizeSpec::Implicit => Self::DEFAULT_LEN,
        }
    }

    /// Copy-type tag passed to `copy_data_between_cages`.
    ///
    /// `0` marks an explicitly sized copy, `1` the implicit default. The
    /// copy primitive picks its bounds policy from this tag; the value is
    /// opaque on this side of the boundary.
    pub fn copy_type(&self) -> u8 {
        match self {
            SizeSpec::Explicit(_) => 0,
            SizeSpec::Implicit => 1,
        }
    }
}

/// One declared argument of a syscall definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgDef {
    pub mode: Mode,
    /// Native C type spelling, copied verbatim into generated code.
    pub ty: String,
    /// Local variable name in the generated wrapper.
    pub name: String,
}

/// A parsed syscall definition.
///
/// Argument order is positional: the k-th declared argument (1-based) binds
/// raw slot `arg<k>` of the fixed six-slot wrapper signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyscallDef {
    pub name: String,
    pub args: Vec<ArgDef>,
}
