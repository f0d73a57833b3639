//! Byte-wide device register access and the exact-count transfers built on it.
use thiserror::Error;

use crate::riscv::intrinsic::{addr::UART0_ADDR, get_u8, put_u8};

use super::CharDevice;

/// Default address of the host byte port.
pub const HOST_PORT_ADDR: usize = UART0_ADDR;

/// One byte-wide location with side effects on every access.
pub trait ByteRegister {
    fn load(&self) -> u8;
    fn store(&self, value: u8);
}

/// A register at a fixed physical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmioRegister {
    addr: usize,
}

impl MmioRegister {
    /// # Safety
    ///
    /// `addr` must be a byte-accessible device register for as long as the value is used.
    pub const unsafe fn new(addr: usize) -> Self {
        Self { addr }
    }

    pub const fn addr(&self) -> usize {
        self.addr
    }
}

impl ByteRegister for MmioRegister {
    fn load(&self) -> u8 {
        unsafe { get_u8(self.addr) }
    }

    fn store(&self, value: u8) {
        unsafe { put_u8(self.addr, value) }
    }
}

/// How a byte reaches the register.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Plain store.
    #[default]
    Store,
    /// Read, OR in the byte, store. Only correct for registers that clear themselves after each
    /// transmitted byte.
    Merge,
}

/// A [`CharDevice`] made of a single data register, without status polling.
pub struct DevicePort<R> {
    register: R,
    mode: WriteMode,
}

impl<R: ByteRegister> DevicePort<R> {
    pub const fn new(register: R, mode: WriteMode) -> Self {
        Self { register, mode }
    }

    pub fn register(&self) -> &R {
        &self.register
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }
}

impl<R: ByteRegister> CharDevice for DevicePort<R> {
    // Firmware on the host side has already configured the line.
    fn init(&self) {}

    fn put_char(&self, c: u8) {
        match self.mode {
            WriteMode::Store => self.register.store(c),
            WriteMode::Merge => self.register.store(self.register.load() | c),
        }
    }

    fn get_char(&self) -> u8 {
        self.register.load()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortError {
    #[error("transfer of {length} bytes does not fit a buffer of {capacity}")]
    ShortBuffer { length: usize, capacity: usize },
}

fn check(length: usize, capacity: usize) -> Result<(), PortError> {
    if length > capacity {
        return Err(PortError::ShortBuffer { length, capacity });
    }
    Ok(())
}

/// Writes `buf[..length]` one byte at a time, in order.
pub fn transfer_out<D: CharDevice + ?Sized>(
    device: &D,
    buf: &[u8],
    length: usize,
) -> Result<(), PortError> {
    check(length, buf.len())?;
    for &byte in &buf[..length] {
        device.put_char(byte);
    }
    Ok(())
}

/// Fills `buf[..length]` one byte at a time, in order. The rest of `buf` is not touched.
pub fn transfer_in<D: CharDevice + ?Sized>(
    device: &D,
    buf: &mut [u8],
    length: usize,
) -> Result<(), PortError> {
    check(length, buf.len())?;
    for byte in &mut buf[..length] {
        *byte = device.get_char();
    }
    Ok(())
}
