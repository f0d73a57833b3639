use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, Ordering};

use aligned::{Aligned, A16};

/// A statically reserved, 16-byte-aligned scratch area that is handed out once.
///
/// AOT-compiled models size their scratch memory at compile time; placing it in a static keeps it
/// out of the heap and lets the linker account for it.
pub struct Workspace<const N: usize> {
    buf: UnsafeCell<Aligned<A16, [u8; N]>>,
    claimed: AtomicBool,
}

// Only one `&mut` to the buffer is ever produced, guarded by `claimed`.
unsafe impl<const N: usize> Sync for Workspace<N> {}

impl<const N: usize> Workspace<N> {
    pub const fn new() -> Self {
        Self {
            buf: UnsafeCell::new(Aligned([0; N])),
            claimed: AtomicBool::new(false),
        }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// The whole buffer, the first time only.
    pub fn claim(&'static self) -> Option<&'static mut [u8]> {
        if self.claimed.swap(true, Ordering::AcqRel) {
            return None;
        }
        let buf = unsafe { &mut *self.buf.get() };
        Some(buf.as_mut_slice())
    }
}

impl<const N: usize> Default for Workspace<N> {
    fn default() -> Self {
        Self::new()
    }
}
