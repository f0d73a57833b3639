//! Runtime for freestanding programs on a single-core RISC-V accelerator.
//!
//! Control goes reset vector → [`riscv::entry`] → [`rt::init`] → `main` → [`rt::halt`]. The
//! [`platform`] module supplies what a TVM-compiled model calls back into, and [`driver`] the byte
//! port to the host.

#![cfg_attr(target_os = "none", no_std)]

// The boot guard, the workspace and every `spin` lock need compare-and-swap: rv64gc, rv32imac and
// friends, not rv32imc.
#[cfg(all(target_os = "none", not(target_has_atomic = "32")))]
compile_error!("hpc-rt needs atomic compare-and-swap (the RISC-V `A` extension)");

extern crate alloc;

pub mod collab;
pub mod common;
pub mod cores;
pub mod driver;
pub mod platform;
pub mod riscv;
pub mod rt;

#[cfg(test)]
mod tests;

#[doc(hidden)]
pub use paste;

pub use rt::halt::{halt, Core, Hart};
