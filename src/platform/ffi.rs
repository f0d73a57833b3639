//! The platform under the names the TVM C runtime links against.
//!
//! `TVMLogf` and `TVMPlatformFormatMessage` take C variadics, which stable Rust cannot define or
//! expand. They receive the format string only and pass it through verbatim.

#![allow(non_snake_case)]

use core::ffi::{c_char, c_void, CStr};
use core::ptr;

use super::error::{status, tvm_crt_error_t, TvmError, NO_ERROR};
use super::{abort, platform, DLDevice};

#[no_mangle]
pub extern "C" fn TVMPlatformInitialize() -> tvm_crt_error_t {
    platform();
    NO_ERROR
}

/// # Safety
///
/// `out_ptr` must be null or valid for a pointer-sized write.
#[no_mangle]
pub unsafe extern "C" fn TVMPlatformMemoryAllocate(
    num_bytes: usize,
    dev: DLDevice,
    out_ptr: *mut *mut c_void,
) -> tvm_crt_error_t {
    if out_ptr.is_null() {
        return TvmError::PlatformCheckFailure.code();
    }
    match platform().allocate(num_bytes, dev) {
        Ok(block) => {
            *out_ptr = block.as_ptr().cast();
            NO_ERROR
        }
        Err(err) => {
            *out_ptr = ptr::null_mut();
            err.code()
        }
    }
}

/// # Safety
///
/// `ptr` must be null or a live block from [`TVMPlatformMemoryAllocate`].
#[no_mangle]
pub unsafe extern "C" fn TVMPlatformMemoryFree(ptr: *mut c_void, dev: DLDevice) -> tvm_crt_error_t {
    status(platform().free(ptr.cast(), dev))
}

#[no_mangle]
pub extern "C" fn TVMPlatformAbort(code: tvm_crt_error_t) -> ! {
    abort(code)
}

#[no_mangle]
pub extern "C" fn TVMPlatformTimerStart() -> tvm_crt_error_t {
    platform().timer_start();
    NO_ERROR
}

/// # Safety
///
/// `elapsed_time_seconds` must be null or valid for an `f64` write.
#[no_mangle]
pub unsafe extern "C" fn TVMPlatformTimerStop(elapsed_time_seconds: *mut f64) -> tvm_crt_error_t {
    if let Some(seconds) = platform().timer_stop() {
        if !elapsed_time_seconds.is_null() {
            *elapsed_time_seconds = seconds;
        }
    }
    NO_ERROR
}

/// # Safety
///
/// `buffer` must be null with `num_bytes == 0`, or valid for `num_bytes` writes.
#[no_mangle]
pub unsafe extern "C" fn TVMPlatformGenerateRandom(
    buffer: *mut u8,
    num_bytes: usize,
) -> tvm_crt_error_t {
    if num_bytes == 0 {
        return NO_ERROR;
    }
    if buffer.is_null() {
        return TvmError::PlatformCheckFailure.code();
    }
    platform().fill_random(core::slice::from_raw_parts_mut(buffer, num_bytes));
    NO_ERROR
}

/// Copies `fmt` into `out_buf`, truncated to fit and always NUL-terminated. Like `vsnprintf`,
/// returns the length of the full message, so a result `>= out_buf_size_bytes` means truncation.
///
/// # Safety
///
/// `out_buf` must be valid for `out_buf_size_bytes` writes; `fmt` must be null or a C string.
#[no_mangle]
pub unsafe extern "C" fn TVMPlatformFormatMessage(
    out_buf: *mut c_char,
    out_buf_size_bytes: usize,
    fmt: *const c_char,
    _args: *mut c_void,
) -> usize {
    let text = if fmt.is_null() {
        &[][..]
    } else {
        CStr::from_ptr(fmt).to_bytes()
    };
    if out_buf.is_null() || out_buf_size_bytes == 0 {
        return text.len();
    }
    let written = text.len().min(out_buf_size_bytes - 1);
    ptr::copy_nonoverlapping(text.as_ptr(), out_buf as *mut u8, written);
    *out_buf.add(written) = 0;
    text.len()
}

/// # Safety
///
/// `msg` must be null or a C string.
#[no_mangle]
pub unsafe extern "C" fn TVMLogf(msg: *const c_char) {
    if msg.is_null() {
        return;
    }
    match CStr::from_ptr(msg).to_str() {
        Ok(text) => log::debug!("{}", text.trim_end()),
        Err(_) => log::debug!("{:?}", CStr::from_ptr(msg)),
    }
}
