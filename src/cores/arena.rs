//! A first-fit allocator over one caller-supplied byte region.
//!
//! The region is cut into 16-byte granules. Its tail holds one bit per granule, set while the
//! granule is in use. Every block starts with a header granule that records how many granules the
//! block spans (header included), so `release` needs only the pointer.
//!
//! ```text
//! | hdr | payload ... | hdr | payload | ... free ... | bitmap |
//! ```
use core::marker::PhantomData;
use core::mem::size_of;
use core::ptr::NonNull;

use bitvec::prelude::*;
use thiserror::Error;

use crate::common::padding;

/// Allocation unit, and the alignment every payload gets for free.
pub const GRANULE: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    #[error("{0:#x} was not handed out by this arena")]
    Foreign(usize),
    #[error("block at {0:#x} has a damaged header or was already released")]
    Corrupt(usize),
}

pub struct Arena<'a> {
    base: NonNull<u8>,
    granules: usize,
    used: &'a mut BitSlice<u8, Lsb0>,
    in_use: usize,
    _region: PhantomData<&'a mut [u8]>,
}

// The arena is the only owner of its region.
unsafe impl Send for Arena<'_> {}

impl<'a> Arena<'a> {
    pub fn new(region: &'a mut [u8]) -> Self {
        let skip = padding(region.as_ptr() as usize, GRANULE).min(region.len());
        let region = &mut region[skip..];
        // 16 bytes of data plus one bit of bookkeeping per granule.
        let granules = region.len().saturating_mul(8).saturating_sub(7) / (GRANULE * 8 + 1);
        let bitmap_len = (granules + 7) / 8;
        let split = region.len() - bitmap_len;
        let (data, bits) = region.split_at_mut(split);

        let used = &mut bits.view_bits_mut::<Lsb0>()[..granules];
        used.fill(false);
        Self {
            base: NonNull::new(data.as_mut_ptr()).unwrap_or(NonNull::dangling()),
            granules,
            used,
            in_use: 0,
            _region: PhantomData,
        }
    }

    /// Bytes that could be handed out if the arena were empty, headers excluded.
    pub fn capacity(&self) -> usize {
        self.granules.saturating_sub(1) * GRANULE
    }

    /// Bytes currently reserved, headers included.
    pub fn in_use(&self) -> usize {
        self.in_use * GRANULE
    }

    fn payload(&self, start: usize) -> *mut u8 {
        unsafe { self.base.as_ptr().add((start + 1) * GRANULE) }
    }

    /// Finds room for `size` bytes aligned to `align` (a power of two). `None` when nothing fits.
    pub fn allocate(&mut self, size: usize, align: usize) -> Option<NonNull<u8>> {
        if !align.is_power_of_two() {
            return None;
        }
        let need = size.checked_add(GRANULE - 1)? / GRANULE;
        let need = need.max(1).checked_add(1)?;
        if need > self.granules {
            return None;
        }

        let mut start = 0;
        while start + need <= self.granules {
            let skew = padding(self.payload(start) as usize, align);
            if skew != 0 {
                // Payloads only move in whole granules, so larger alignments skip ahead.
                start += (skew + GRANULE - 1) / GRANULE;
                continue;
            }
            if start + need > self.granules {
                break;
            }
            match self.used[start..start + need].last_one() {
                Some(taken) => start += taken + 1,
                None => {
                    self.used[start..start + need].fill(true);
                    self.in_use += need;
                    unsafe {
                        (self.base.as_ptr().add(start * GRANULE) as *mut usize).write(need);
                    }
                    return NonNull::new(self.payload(start));
                }
            }
        }
        None
    }

    /// Returns a block to the arena and reports how many payload bytes it held.
    pub fn release(&mut self, ptr: NonNull<u8>) -> Result<usize, ArenaError> {
        let addr = ptr.as_ptr() as usize;
        let offset = addr
            .checked_sub(self.base.as_ptr() as usize)
            .ok_or(ArenaError::Foreign(addr))?;
        if offset < GRANULE || offset % GRANULE != 0 || offset >= self.granules * GRANULE {
            return Err(ArenaError::Foreign(addr));
        }

        let start = offset / GRANULE - 1;
        let need = unsafe { (self.base.as_ptr().add(start * GRANULE) as *const usize).read() };
        let end = start.checked_add(need).ok_or(ArenaError::Corrupt(addr))?;
        if need < 2 || end > self.granules || !self.used[start..end].all() {
            return Err(ArenaError::Corrupt(addr));
        }

        self.used[start..end].fill(false);
        // Poison the header so a second release of the same pointer is caught.
        unsafe {
            (self.base.as_ptr().add(start * GRANULE) as *mut usize).write(0);
        }
        self.in_use -= need;
        Ok((need - 1) * GRANULE)
    }
}

const _: () = assert!(size_of::<usize>() <= GRANULE);
