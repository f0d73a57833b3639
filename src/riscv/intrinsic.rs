#![allow(dead_code)]

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
use core::arch::asm;
use core::ptr::{read_volatile, write_volatile};

/* Some useful functions for `RISC-V`. */

/// Stalls the hart until an interrupt may need servicing. With interrupts left disabled this is
/// a low-power park that never ends.
#[inline(always)]
pub fn wait_for_interrupt() {
    #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
    unsafe {
        asm!("wfi", options(nomem, nostack, preserves_flags));
    }
    #[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
    core::hint::spin_loop();
}

#[cfg(target_arch = "riscv64")]
pub fn read_cycle() -> u64 {
    let ret: u64;
    unsafe {
        asm!("rdcycle {}", out(reg) ret, options(nomem, nostack, preserves_flags));
    }
    ret
}

// The upper half may carry between the two reads; retry until it is stable.
#[cfg(target_arch = "riscv32")]
pub fn read_cycle() -> u64 {
    loop {
        let (hi, lo, hi2): (u32, u32, u32);
        unsafe {
            asm!("rdcycleh {}", out(reg) hi, options(nomem, nostack, preserves_flags));
            asm!("rdcycle {}", out(reg) lo, options(nomem, nostack, preserves_flags));
            asm!("rdcycleh {}", out(reg) hi2, options(nomem, nostack, preserves_flags));
        }
        if hi == hi2 {
            return ((hi as u64) << 32) | lo as u64;
        }
    }
}

#[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
pub fn read_cycle() -> u64 {
    0
}

// For `get/put_*`, there's no need for fences: single hart, and device memory is mapped
// uncached. Volatile keeps every access, in order, exactly once.

/// # Safety
///
/// `address` must be a readable byte of device or normal memory.
#[inline(always)]
pub unsafe fn get_u8(address: usize) -> u8 {
    read_volatile(address as *const u8)
}

/// # Safety
///
/// `address` must be a writable byte of device or normal memory.
#[inline(always)]
pub unsafe fn put_u8(address: usize, value: u8) {
    write_volatile(address as *mut u8, value)
}

pub mod addr {
    // HPC view of APB UART0. The host link and the console share it.
    #[cfg(target_pointer_width = "64")]
    pub const UART0_ADDR: usize = 0x1_FFF0_0000;
    #[cfg(not(target_pointer_width = "64"))]
    pub const UART0_ADDR: usize = 0xFFF0_0000;
}
