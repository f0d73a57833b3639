mod boot;
mod collab;
mod port;
mod workspace;

use std::cell::Cell;
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};

use parking_lot::Mutex;

use crate::driver::port::ByteRegister;
use crate::driver::CharDevice;
use crate::rt::halt::Core;

/// Panic payload a [`MockCore`] unwinds with once it has idled enough.
#[derive(Debug)]
pub struct Parked;

/// A core that counts its idle cycles and bails out of the idle loop after `limit` of them.
pub struct MockCore {
    idles: Cell<usize>,
    limit: usize,
}

impl MockCore {
    pub fn new(limit: usize) -> Self {
        Self {
            idles: Cell::new(0),
            limit,
        }
    }

    pub fn idles(&self) -> usize {
        self.idles.get()
    }
}

impl Core for MockCore {
    fn idle(&self) {
        let n = self.idles.get() + 1;
        self.idles.set(n);
        if n >= self.limit {
            std::panic::panic_any(Parked);
        }
    }
}

/// Runs `f`, which must never return, and checks that it ended up parked.
pub fn expect_parked<F: FnOnce()>(f: F) {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => panic!("returned instead of parking"),
        Err(payload) => assert!(payload.downcast_ref::<Parked>().is_some(), "unexpected panic"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Load(u8),
    Store(u8),
}

/// A device register that records every access. Loads are served from `input`, then from the
/// last stored value.
#[derive(Default)]
pub struct RecordingRegister {
    accesses: Mutex<Vec<Access>>,
    input: Mutex<VecDeque<u8>>,
    latch: Mutex<u8>,
}

impl RecordingRegister {
    pub fn with_input(input: &[u8]) -> Self {
        let register = Self::default();
        register.input.lock().extend(input);
        register
    }

    pub fn set_latch(&self, value: u8) {
        *self.latch.lock() = value;
    }

    pub fn accesses(&self) -> Vec<Access> {
        self.accesses.lock().clone()
    }

    pub fn stored(&self) -> Vec<u8> {
        self.accesses
            .lock()
            .iter()
            .filter_map(|access| match access {
                Access::Store(value) => Some(*value),
                Access::Load(_) => None,
            })
            .collect()
    }
}

impl ByteRegister for RecordingRegister {
    fn load(&self) -> u8 {
        let value = match self.input.lock().pop_front() {
            Some(value) => value,
            None => *self.latch.lock(),
        };
        self.accesses.lock().push(Access::Load(value));
        value
    }

    fn store(&self, value: u8) {
        *self.latch.lock() = value;
        self.accesses.lock().push(Access::Store(value));
    }
}

/// A character device that keeps everything written to it.
#[derive(Default)]
pub struct RecordingDevice {
    written: Mutex<Vec<u8>>,
    input: Mutex<VecDeque<u8>>,
}

impl RecordingDevice {
    pub fn with_input(input: &[u8]) -> Self {
        let device = Self::default();
        device.input.lock().extend(input);
        device
    }

    pub fn written(&self) -> Vec<u8> {
        self.written.lock().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.written()).into_owned()
    }
}

impl CharDevice for RecordingDevice {
    fn init(&self) {}

    fn put_char(&self, c: u8) {
        self.written.lock().push(c);
    }

    fn get_char(&self) -> u8 {
        self.input.lock().pop_front().unwrap_or(0)
    }
}
