use core::ptr;
use core::sync::atomic::{AtomicU32, Ordering};

use super::halt::{halt_on, Core};

/// A `[start, end)` span of memory described by the linker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    start: *mut u8,
    end: *mut u8,
}

impl Region {
    /// # Safety
    ///
    /// `start..end` must be writable memory owned by nothing else while the region is in use,
    /// with `start <= end`.
    pub const unsafe fn new(start: *mut u8, end: *mut u8) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> *mut u8 {
        self.start
    }

    pub fn len(&self) -> usize {
        (self.end as usize).saturating_sub(self.start as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fills the region with zeros, one volatile byte at a time so the compiler can neither
    /// elide it nor turn it into a `memset` call before the environment is ready.
    ///
    /// # Safety
    ///
    /// See [`Region::new`].
    pub unsafe fn zero(&self) {
        for i in 0..self.len() {
            ptr::write_volatile(self.start.add(i), 0);
        }
    }
}

/// Initialized data stored at `source` and run from `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadImage {
    pub source: *const u8,
    pub target: Region,
}

impl LoadImage {
    pub fn in_place(&self) -> bool {
        self.source == self.target.start as *const u8
    }

    /// # Safety
    ///
    /// `source` must be readable for `target.len()` bytes and must not overlap `target` unless
    /// it is the same address.
    pub unsafe fn copy(&self) {
        if self.in_place() {
            return;
        }
        for i in 0..self.target.len() {
            let byte = ptr::read_volatile(self.source.add(i));
            ptr::write_volatile(self.target.start.add(i), byte);
        }
    }
}

/// What the initializer has to set up before calling the entry point.
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    pub bss: Region,
    pub data: Option<LoadImage>,
}

// Written once the initializer has started. Any other value, including whatever RAM holds at
// power-on, counts as cold.
const WARM: u32 = 0xB007_ED42;

/// Lets the initializer run once per reset.
///
/// The guard must live outside `.data` and `.bss`: both are rewritten by the initializer, and
/// `.data` is not even valid before the copy. The runtime places it in `.uninit`, which the linker
/// script reserves without loading or clearing it.
pub struct BootGuard(AtomicU32);

impl BootGuard {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// `true` unless an earlier caller already entered.
    pub fn enter(&self) -> bool {
        self.0.swap(WARM, Ordering::AcqRel) != WARM
    }
}

impl Default for BootGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Prepares `env` and runs `entry`, returning its status.
///
/// # Safety
///
/// Must run before anything reads `.data` or `.bss`, and at most once.
pub unsafe fn initialize<F: FnOnce() -> i32>(env: &Environment, entry: F) -> i32 {
    if let Some(image) = &env.data {
        image.copy();
    }
    env.bss.zero();
    entry()
}

/// Body of `_start_rust`: a second arrival (a jump back to `_enter`, a stray reset vector)
/// parks instead of clearing live state.
///
/// # Safety
///
/// See [`initialize`].
pub unsafe fn start<C, F>(core: &C, guard: &BootGuard, env: &Environment, entry: F) -> !
where
    C: Core + ?Sized,
    F: FnOnce() -> i32,
{
    if !guard.enter() {
        halt_on(core, -1)
    }
    let code = initialize(env, entry);
    halt_on(core, code)
}

#[cfg(all(target_os = "none", feature = "rt"))]
mod boot {
    use super::{start, BootGuard};
    use crate::rt::halt::Hart;
    use crate::rt::layout;

    extern "C" {
        fn main() -> i32;
    }

    #[link_section = ".uninit.hpc_rt.boot_guard"]
    static BOOT_GUARD: BootGuard = BootGuard::new();

    #[no_mangle]
    pub unsafe extern "C" fn _start_rust() -> ! {
        start(&Hart, &BOOT_GUARD, &layout::environment(), || main())
    }
}
