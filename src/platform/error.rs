use thiserror::Error;

/// `tvm_crt_error_t` as seen from C.
#[allow(non_camel_case_types)]
pub type tvm_crt_error_t = i32;

pub const NO_ERROR: tvm_crt_error_t = 0;

// Codes are `category << 8 | index`, matching `tvm/runtime/crt/error_codes.h`.
const CATEGORY_FUNCTION_CALL: i32 = 0x01;
const CATEGORY_PLATFORM: i32 = 0x05;

const fn code(category: i32, index: i32) -> i32 {
    (category << 8) | index
}

/// Errors the platform layer reports to TVM.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TvmError {
    #[error("output buffer too small")]
    BufferTooSmall = code(CATEGORY_FUNCTION_CALL, 4),
    #[error("platform check failed")]
    PlatformCheckFailure = code(CATEGORY_PLATFORM, 0),
    #[error("platform already initialized")]
    PlatformMemoryManagerInitialized = code(CATEGORY_PLATFORM, 1),
    #[error("platform shut down")]
    PlatformShutdown = code(CATEGORY_PLATFORM, 2),
    #[error("out of memory")]
    PlatformNoMemory = code(CATEGORY_PLATFORM, 3),
    #[error("timer in bad state")]
    PlatformTimerBadState = code(CATEGORY_PLATFORM, 4),
    #[error("freed memory was not allocated here")]
    PlatformStackAllocBadFree = code(CATEGORY_PLATFORM, 5),
}

impl TvmError {
    pub const fn code(self) -> tvm_crt_error_t {
        self as i32
    }
}

/// Collapses a Rust result into the integer TVM expects.
pub fn status<T>(result: Result<T, TvmError>) -> tvm_crt_error_t {
    match result {
        Ok(_) => NO_ERROR,
        Err(err) => err.code(),
    }
}
