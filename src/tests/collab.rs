use std::cell::Cell;
use std::ffi::c_void;
use std::ptr;

use crate::collab::{execute, Accelerator, Executor};
use crate::platform::error::TvmError;

struct Fixed {
    status: i32,
    seen: Cell<Option<(*mut c_void, *mut c_void)>>,
}

impl Executor for Fixed {
    unsafe fn run(&self, inputs: *mut c_void, outputs: *mut c_void) -> i32 {
        self.seen.set(Some((inputs, outputs)));
        self.status
    }
}

#[test]
fn success_passes_buffers_through() {
    let executor = Fixed {
        status: 0,
        seen: Cell::new(None),
    };
    let (mut a, mut b) = (1u32, 2u32);
    let inputs = (&mut a as *mut u32).cast();
    let outputs = (&mut b as *mut u32).cast();
    assert_eq!(unsafe { execute(&executor, inputs, outputs) }, Ok(()));
    assert_eq!(executor.seen.get(), Some((inputs, outputs)));
}

#[test]
fn any_nonzero_status_is_a_check_failure() {
    for status in [1, -1, 0x500] {
        let executor = Fixed {
            status,
            seen: Cell::new(None),
        };
        assert_eq!(
            unsafe { execute(&executor, ptr::null_mut(), ptr::null_mut()) },
            Err(TvmError::PlatformCheckFailure)
        );
    }
}

struct CountingAccelerator(Cell<u32>);

impl Accelerator for CountingAccelerator {
    fn init(&self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn accelerator_is_usable_as_a_trait_object() {
    let accel = CountingAccelerator(Cell::new(0));
    let dyn_accel: &dyn Accelerator = &accel;
    dyn_accel.init();
    assert_eq!(accel.0.get(), 1);
}
