use crate::riscv::intrinsic::wait_for_interrupt;

/// Something that can be parked. Hardware harts idle on `wfi`; tests supply their own.
pub trait Core {
    /// Waits once. Returning is allowed; the caller just waits again.
    fn idle(&self);
}

/// The hart this code runs on.
pub struct Hart;

impl Core for Hart {
    #[inline(always)]
    fn idle(&self) {
        wait_for_interrupt();
    }
}

/// Parks `core` forever. The code is accepted for symmetry with C `exit` and not reported
/// anywhere: normal completion and abort look the same from outside.
pub fn halt_on<C: Core + ?Sized>(core: &C, _code: i32) -> ! {
    loop {
        core.idle();
    }
}

pub fn halt(code: i32) -> ! {
    halt_on(&Hart, code)
}

/// C exit path (`exit`, `abort` in newlib-style libcs) lands here.
#[cfg(all(target_os = "none", feature = "rt"))]
#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn _Exit(code: i32) -> ! {
    halt(code)
}
