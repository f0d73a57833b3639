//! Reset trampoline.
//!
//! The linker places `_enter` at the reset vector. It runs with no stack and an undefined `gp`,
//! so it may not touch memory at all: it loads both registers from link-provided addresses and
//! jumps, never calls, into `_start_rust`.
//!
//! `gp` must be loaded with relaxation disabled. Otherwise the linker is free to rewrite
//! `la gp, __global_pointer$` into a `gp`-relative add, which reads the very register it is
//! supposed to initialize.

macro_rules! trampoline {
    () => {
        concat!(
            ".section .text.init.enter, \"ax\"\n",
            ".global _enter\n",
            ".type _enter, @function\n",
            "_enter:\n",
            "    .option push\n",
            "    .option norelax\n",
            "    la gp, __global_pointer$\n",
            "    .option pop\n",
            "    la sp, _stack_top\n",
            "    tail _start_rust\n",
            ".size _enter, . - _enter\n",
        )
    };
}

/// Assembly of the trampoline, exactly as assembled for the target.
pub const TRAMPOLINE: &str = trampoline!();

#[cfg(all(
    any(target_arch = "riscv32", target_arch = "riscv64"),
    target_os = "none",
    feature = "rt"
))]
core::arch::global_asm!(trampoline!());
