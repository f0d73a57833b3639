//! Code this crate calls but does not own: the compiled inference graph and the accelerator
//! driver. Each sits behind a trait so applications and tests can substitute their own.

use core::ffi::c_void;

use crate::platform::error::TvmError;

/// Runs one inference over caller-owned input and output structs.
pub trait Executor {
    /// Zero on success, as the generated C code reports it.
    ///
    /// # Safety
    ///
    /// `inputs` and `outputs` must point to the structs the graph was compiled for.
    unsafe fn run(&self, inputs: *mut c_void, outputs: *mut c_void) -> i32;
}

/// Runs `executor`, turning a non-zero status into an error.
///
/// # Safety
///
/// See [`Executor::run`].
pub unsafe fn execute<E: Executor + ?Sized>(
    executor: &E,
    inputs: *mut c_void,
    outputs: *mut c_void,
) -> Result<(), TvmError> {
    match executor.run(inputs, outputs) {
        0 => Ok(()),
        status => {
            log::error!("inference failed with status {}", status);
            Err(TvmError::PlatformCheckFailure)
        }
    }
}

/// Hardware that must be brought up before the first inference.
pub trait Accelerator {
    fn init(&self);
}

#[cfg(feature = "tvm")]
mod tvm {
    use core::ffi::c_void;

    use super::{execute, Executor};
    use crate::platform::abort;

    extern "C" {
        fn tvmgen_default_run(inputs: *mut c_void, outputs: *mut c_void) -> i32;
    }

    /// The AOT executor TVM generates as `tvmgen_default`.
    pub struct TvmgenDefault;

    impl Executor for TvmgenDefault {
        unsafe fn run(&self, inputs: *mut c_void, outputs: *mut c_void) -> i32 {
            tvmgen_default_run(inputs, outputs)
        }
    }

    /// C entry for callers that expect the runtime to own failure handling.
    ///
    /// # Safety
    ///
    /// See [`Executor::run`].
    #[no_mangle]
    pub unsafe extern "C" fn TVMExecute(inputs: *mut c_void, outputs: *mut c_void) {
        if let Err(err) = execute(&TvmgenDefault, inputs, outputs) {
            abort(err.code())
        }
    }
}

#[cfg(feature = "tvm")]
pub use tvm::{TVMExecute, TvmgenDefault};

#[cfg(feature = "dla")]
mod dla {
    use super::Accelerator;

    extern "C" {
        fn dla_init();
    }

    /// The deep learning accelerator next to this core.
    pub struct Dla;

    impl Accelerator for Dla {
        fn init(&self) {
            log::info!("initializing DLA");
            unsafe { dla_init() }
        }
    }
}

#[cfg(feature = "dla")]
pub use dla::Dla;
