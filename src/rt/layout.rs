//! Addresses the linker script defines. Only their addresses are meaningful; none of them may be
//! read as a value.

#[cfg(target_os = "none")]
use super::init::LoadImage;
use super::init::{Environment, Region};

/// Every symbol the runtime binds to, besides `_enter` which it defines itself.
pub const REQUIRED_SYMBOLS: [&str; 10] = [
    "__global_pointer$",
    "_sidata",
    "_sdata",
    "_edata",
    "_sbss",
    "_ebss",
    "_sheap",
    "_eheap",
    "_sstack",
    "_stack_top",
];

#[cfg(target_os = "none")]
mod symbols {
    extern "C" {
        pub static mut _sidata: u8;
        pub static mut _sdata: u8;
        pub static mut _edata: u8;
        pub static mut _sbss: u8;
        pub static mut _ebss: u8;
        pub static mut _sheap: u8;
        pub static mut _eheap: u8;
    }
}

/// `.data` and `.bss` as placed by the linker.
#[cfg(target_os = "none")]
pub fn environment() -> Environment {
    use core::ptr::addr_of_mut;
    use symbols::*;

    unsafe {
        Environment {
            bss: Region::new(addr_of_mut!(_sbss), addr_of_mut!(_ebss)),
            data: Some(LoadImage {
                source: addr_of_mut!(_sidata) as *const u8,
                target: Region::new(addr_of_mut!(_sdata), addr_of_mut!(_edata)),
            }),
        }
    }
}

/// The heap reserved by the linker, `[_sheap, _eheap)`.
#[cfg(target_os = "none")]
pub fn heap_region() -> Region {
    use core::ptr::addr_of_mut;
    use symbols::*;

    unsafe { Region::new(addr_of_mut!(_sheap), addr_of_mut!(_eheap)) }
}

// Hosted builds have no linker-provided regions.
#[cfg(not(target_os = "none"))]
pub fn environment() -> Environment {
    Environment {
        bss: empty(),
        data: None,
    }
}

#[cfg(not(target_os = "none"))]
pub fn heap_region() -> Region {
    empty()
}

#[cfg(not(target_os = "none"))]
fn empty() -> Region {
    unsafe { Region::new(core::ptr::null_mut(), core::ptr::null_mut()) }
}
