//! C code emission for grate wrappers and weak declarations.
//!
//! Each definition expands to one `<name>_grate` wrapper with a fixed
//! thirteen-word signature (caller cage id plus six value/cage slot pairs)
//! and one weakly linked `<name>_syscall` forward declaration. Prologue and
//! epilogue fragments are derived per transfer mode, processing arguments in
//! reverse declared order with slot numbers counting down from the declared
//! arity. That ordering is part of the cage runtime's calling convention and
//! also lets a bracketed size expression refer to scalar arguments declared
//! after the buffer it sizes.
//!
//! The emitted text is valid C on its own; `clang-format` only normalizes
//! layout.

use crate::model::{MAX_ARGS, Mode, SizeSpec, SyscallDef};

/// Render the marshalling wrapper for one definition.
///
/// The wrapper fast-rejects with `-1` when the weak native symbol is absent,
/// otherwise it reconstructs each argument from its raw slot, calls
/// `<name>_syscall`, runs the copy-back/free epilogue, and propagates the
/// return value.
pub fn wrapper_function(def: &SyscallDef) -> String {
    let mut pre = String::new();
    let mut post = String::new();

    for (idx, arg) in def.args.iter().enumerate().rev() {
        let slot = idx + 1;
        match &arg.mode {
            Mode::Value => {
                pre.push_str(&format!("{} {} = arg{};\n", arg.ty, arg.name, slot));
            }
            Mode::In(size) => {
                pre.push_str(&staging_alloc(&arg.ty, &arg.name, size));
                pre.push_str(&copy_in(&arg.name, slot, size));
                post.push_str(&format!("free({});\n", arg.name));
            }
            Mode::Out(size) => {
                pre.push_str(&staging_alloc(&arg.ty, &arg.name, size));
                post.push_str(&copy_out(&arg.name, slot, size));
            }
        }
    }

    let mut call_args = String::from("cageid");
    for arg in &def.args {
        call_args.push_str(", ");
        call_args.push_str(&arg.name);
    }

    format!(
        "int {name}_grate(uint64_t cageid{slots}) {{\n\
         if (!{name}_syscall) {{\n\
         return -1;\n\
         }}\n\
         {pre}\
         int ret = {name}_syscall({call_args});\n\
         {post}\
         return ret;\n\
         }}\n",
        name = def.name,
        slots = slot_params(),
    )
}

/// Render the weakly linked forward declaration for the native syscall.
///
/// Builds lacking the implementation still link: the weak symbol resolves
/// to null and the wrapper takes its fast-reject path.
pub fn weak_declaration(def: &SyscallDef) -> String {
    let mut params = String::from("int cageid");
    for arg in &def.args {
        params.push_str(&format!(", {} {}", arg.ty, arg.name));
    }
    format!("__attribute__((weak)) int {}_syscall({});\n", def.name, params)
}

/// The six fixed value/cage parameter pairs shared by every wrapper.
fn slot_params() -> String {
    let mut params = String::new();
    for slot in 1..=MAX_ARGS {
        params.push_str(&format!(", uint64_t arg{slot}, uint64_t arg{slot}cage"));
    }
    params
}

/// Declare and allocate a staging buffer.
///
/// Allocation failure is fatal to the compartment process, matching the
/// severity contract of the cage host.
fn staging_alloc(ty: &str, name: &str, size: &SizeSpec) -> String {
    format!(
        "{ty} {name} = malloc({size});\n\
         if ({name} == NULL) {{\n\
         perror(\"malloc failed\");\n\
         exit(EXIT_FAILURE);\n\
         }}\n",
        size = size.expr(),
    )
}

/// Stage a caller-owned buffer into the local cage before the call.
fn copy_in(name: &str, slot: usize, size: &SizeSpec) -> String {
    format!(
        "copy_data_between_cages(thiscage, arg{slot}cage, arg{slot}, arg{slot}cage, \
         (uint64_t){name}, thiscage, {size}, {copy_type});\n",
        size = size.expr(),
        copy_type = size.copy_type(),
    )
}

/// Copy an output buffer back to the caller, then release it.
///
/// The copy-back only happens when the caller passed a destination; the
/// staging buffer is freed either way.
fn copy_out(name: &str, slot: usize, size: &SizeSpec) -> String {
    format!(
        "if (arg{slot} != 0) {{\n\
         copy_data_between_cages(thiscage, arg{slot}cage, (uint64_t){name}, thiscage, \
         arg{slot}, arg{slot}cage, {size}, {copy_type});\n\
         }}\n\
         free({name});\n",
        size = size.expr(),
        copy_type = size.copy_type(),
    )
}
