//! Services the TVM C runtime expects from its host: memory, abort, timing, logging and
//! randomness. [`Platform`] holds the state; [`ffi`] exposes it under the C names.

pub mod error;
pub mod ffi;
pub mod heap;
#[cfg(all(target_os = "none", feature = "global-heap"))]
mod rust_allocator;
pub mod timer;

use core::ptr::NonNull;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use spin::{Mutex, Once};

use self::error::TvmError;
use self::heap::{Heap, HeapBacking};
use self::timer::{Stopwatch, TimeSource};
use crate::rt::halt::{halt_on, Core};

/// Chosen once by the application before the first platform call.
pub struct PlatformConfig {
    pub heap: HeapBacking,
    /// Without a time source the timer reports nothing.
    pub timer: Option<TimeSource>,
    pub rng_seed: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            heap: HeapBacking::System,
            timer: None,
            rng_seed: 0xdeadbeef,
        }
    }
}

pub struct Platform {
    heap: Heap,
    stopwatch: Mutex<Stopwatch>,
    rng: Mutex<SmallRng>,
}

/// The device a buffer is for. Only the host CPU exists here.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DLDevice {
    pub device_type: i32,
    pub device_id: i32,
}

/// `kDLCPU`.
pub const K_DL_CPU: i32 = 1;

impl DLDevice {
    pub const fn cpu() -> Self {
        Self {
            device_type: K_DL_CPU,
            device_id: 0,
        }
    }
}

impl Platform {
    pub fn new(config: PlatformConfig) -> Self {
        Self {
            heap: Heap::new(config.heap),
            stopwatch: Mutex::new(Stopwatch::new(config.timer)),
            rng: Mutex::new(SmallRng::seed_from_u64(config.rng_seed)),
        }
    }

    /// `size` 0 is served as a minimal block. `device` is accepted and ignored.
    pub fn allocate(&self, size: usize, _device: DLDevice) -> Result<NonNull<u8>, TvmError> {
        let ptr = self.heap.allocate(size);
        if ptr.is_err() {
            log::warn!("platform allocation of {} bytes failed", size);
        }
        ptr
    }

    /// Null is ignored.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must come from [`Platform::allocate`] and not have been freed.
    pub unsafe fn free(&self, ptr: *mut u8, _device: DLDevice) -> Result<(), TvmError> {
        match NonNull::new(ptr) {
            Some(ptr) => self.heap.free(ptr),
            None => Ok(()),
        }
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn timer_start(&self) {
        self.stopwatch.lock().start();
    }

    pub fn timer_stop(&self) -> Option<f64> {
        self.stopwatch.lock().stop()
    }

    pub fn fill_random(&self, buf: &mut [u8]) {
        self.rng.lock().fill_bytes(buf);
    }
}

static PLATFORM: Once<Platform> = Once::new();

/// Installs the process-wide platform. Only the first call takes effect.
pub fn install(config: PlatformConfig) -> Result<&'static Platform, TvmError> {
    let mut fresh = false;
    let platform = PLATFORM.call_once(|| {
        fresh = true;
        Platform::new(config)
    });
    if fresh {
        Ok(platform)
    } else {
        Err(TvmError::PlatformMemoryManagerInitialized)
    }
}

/// The installed platform, installing the default one if nothing was installed yet.
pub fn platform() -> &'static Platform {
    PLATFORM.call_once(|| Platform::new(PlatformConfig::default()))
}

/// Fatal error: never returns, whatever `code` is.
pub fn abort(code: i32) -> ! {
    log::error!("platform abort: {:#x}", code);
    #[cfg(not(target_os = "none"))]
    {
        std::process::exit(-1)
    }
    #[cfg(target_os = "none")]
    {
        abort_on(&crate::rt::halt::Hart, code)
    }
}

/// Parks `core`. Bare-metal [`abort`] goes through here.
pub fn abort_on<C: Core + ?Sized>(core: &C, code: i32) -> ! {
    halt_on(core, code)
}
