use alloc::alloc::{alloc, dealloc};
use core::alloc::Layout;
use core::mem::size_of;
use core::ptr::NonNull;

use spin::Mutex;

use super::error::TvmError;
use crate::cores::arena::Arena;

/// Smallest block ever handed out; zero-byte requests are rounded up to it.
pub const MIN_ALLOCATION: usize = size_of::<i32>();

// Room for the block size in front of every system allocation. Keeps payloads 16-byte aligned.
const HEADER: usize = 16;

/// Where platform allocations come from.
pub enum HeapBacking {
    /// The global allocator.
    System,
    /// A fixed region, usually a claimed [`Workspace`](crate::cores::workspace::Workspace).
    Arena(&'static mut [u8]),
}

impl Default for HeapBacking {
    fn default() -> Self {
        Self::System
    }
}

pub enum Heap {
    System,
    Arena(Mutex<Arena<'static>>),
}

impl Heap {
    pub fn new(backing: HeapBacking) -> Self {
        match backing {
            HeapBacking::System => Self::System,
            HeapBacking::Arena(region) => Self::Arena(Mutex::new(Arena::new(region))),
        }
    }

    pub fn allocate(&self, size: usize) -> Result<NonNull<u8>, TvmError> {
        let size = size.max(MIN_ALLOCATION);
        match self {
            Heap::System => {
                let layout = system_layout(size)?;
                let base = NonNull::new(unsafe { alloc(layout) }).ok_or(TvmError::PlatformNoMemory)?;
                unsafe {
                    (base.as_ptr() as *mut usize).write(layout.size());
                    Ok(NonNull::new_unchecked(base.as_ptr().add(HEADER)))
                }
            }
            Heap::Arena(arena) => arena
                .lock()
                .allocate(size, HEADER)
                .ok_or(TvmError::PlatformNoMemory),
        }
    }

    /// # Safety
    ///
    /// `ptr` must come from [`Heap::allocate`] on this heap and not have been freed. Arena heaps
    /// detect foreign pointers; the system heap cannot.
    pub unsafe fn free(&self, ptr: NonNull<u8>) -> Result<(), TvmError> {
        match self {
            Heap::System => {
                let base = ptr.as_ptr().sub(HEADER);
                let total = (base as *const usize).read();
                let layout = Layout::from_size_align_unchecked(total, HEADER);
                dealloc(base, layout);
                Ok(())
            }
            Heap::Arena(arena) => match arena.lock().release(ptr) {
                Ok(_) => Ok(()),
                Err(err) => {
                    log::warn!("rejected free: {}", err);
                    Err(TvmError::PlatformStackAllocBadFree)
                }
            },
        }
    }

    /// Bytes in use, when the backing keeps count.
    pub fn in_use(&self) -> Option<usize> {
        match self {
            Heap::System => None,
            Heap::Arena(arena) => Some(arena.lock().in_use()),
        }
    }
}

fn system_layout(size: usize) -> Result<Layout, TvmError> {
    let total = size.checked_add(HEADER).ok_or(TvmError::PlatformNoMemory)?;
    Layout::from_size_align(total, HEADER).map_err(|_| TvmError::PlatformNoMemory)
}
