use core::alloc::{GlobalAlloc, Layout};
use core::ptr::{self, NonNull};
use core::slice;

use spin::{Mutex, Once};

use crate::cores::arena::Arena;
use crate::rt::layout::heap_region;

/// `#[global_allocator]` over the heap the linker reserves.
struct LinkHeap {
    arena: Once<Mutex<Arena<'static>>>,
}

#[global_allocator]
static LINK_HEAP: LinkHeap = LinkHeap { arena: Once::new() };

impl LinkHeap {
    fn arena(&self) -> &Mutex<Arena<'static>> {
        self.arena.call_once(|| {
            let region = heap_region();
            // The linker hands this region to the allocator and nothing else.
            let bytes = unsafe { slice::from_raw_parts_mut(region.start(), region.len()) };
            Mutex::new(Arena::new(bytes))
        })
    }
}

unsafe impl GlobalAlloc for LinkHeap {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        match self.arena().lock().allocate(layout.size(), layout.align()) {
            Some(ptr) => ptr.as_ptr(),
            None => ptr::null_mut(),
        }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _: Layout) {
        if let Some(ptr) = NonNull::new(ptr) {
            if let Err(err) = self.arena().lock().release(ptr) {
                log::error!("global heap: {}", err);
            }
        }
    }
}
