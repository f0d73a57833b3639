//! Build-time memory layout of the accelerator core.
//!
//! The runtime never checks addresses at run time: a wrong stack top or global pointer corrupts
//! everything silently. All of them come from here instead, are validated before a linker script
//! is emitted, and the script carries `ASSERT`s for what can only be checked at link time.

mod env;
mod script;
pub mod symbols;

use thiserror::Error;

pub use env::{
    ENV_VARS, HEAP_SIZE_VAR, RAM_LENGTH_VAR, RAM_ORIGIN_VAR, ROM_LENGTH_VAR, ROM_ORIGIN_VAR,
    STACK_SIZE_VAR,
};

/// File name of the rendered linker script.
pub const SCRIPT_NAME: &str = "link.x";

/// Stack pointer and region alignment required by the RISC-V psABI.
pub const ALIGNMENT: u64 = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("{name} has zero length")]
    EmptyRegion { name: &'static str },
    #[error("{name} = {value:#x} is not aligned to {align} bytes")]
    Misaligned {
        name: &'static str,
        value: u64,
        align: u64,
    },
    #[error("{name} extends past the end of the address space")]
    Overflow { name: &'static str },
    #[error("stack and heap need {required:#x} bytes but RAM only has {available:#x}")]
    DoesNotFit { required: u64, available: u64 },
    #[error("ROM [{rom_start:#x}, {rom_end:#x}) overlaps RAM [{ram_start:#x}, {ram_end:#x})")]
    Overlap {
        rom_start: u64,
        rom_end: u64,
        ram_start: u64,
        ram_end: u64,
    },
    #[error("{var}={value:?} is not a valid address or size")]
    InvalidNumber { var: &'static str, value: String },
    #[error("HPC_RT_ROM_ORIGIN and HPC_RT_ROM_LENGTH must be set together")]
    IncompleteRom,
}

/// A contiguous range of the physical address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Memory {
    pub origin: u64,
    pub length: u64,
}

impl Memory {
    pub const fn new(origin: u64, length: u64) -> Self {
        Self { origin, length }
    }

    fn end(&self, name: &'static str) -> Result<u64, LayoutError> {
        self.origin
            .checked_add(self.length)
            .ok_or(LayoutError::Overflow { name })
    }

    fn check(&self, name: &'static str) -> Result<u64, LayoutError> {
        if self.length == 0 {
            return Err(LayoutError::EmptyRegion { name });
        }
        check_aligned(name, self.origin)?;
        self.end(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLayout {
    /// Where code runs from and where `.data`, `.bss`, heap and stack live.
    pub ram: Memory,
    /// When present, code, read-only data and the initialized-data load image are placed here and
    /// `.data` is copied to RAM at boot. When absent, everything is linked in place in RAM.
    pub rom: Option<Memory>,
    pub stack_size: u64,
    pub heap_size: u64,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self {
            // HPC view of the external SDRAM.
            ram: Memory::new(0x1_0000_0000, 0x1000_0000),
            rom: None,
            stack_size: 0x1_0000,
            heap_size: 0x100_0000,
        }
    }
}

impl MemoryLayout {
    pub fn validate(&self) -> Result<(), LayoutError> {
        let ram_end = self.ram.check("RAM")?;
        check_aligned("stack size", self.stack_size)?;
        check_aligned("heap size", self.heap_size)?;
        if self.stack_size == 0 {
            return Err(LayoutError::EmptyRegion { name: "stack" });
        }

        let required = self
            .stack_size
            .checked_add(self.heap_size)
            .ok_or(LayoutError::Overflow { name: "stack + heap" })?;
        if required > self.ram.length {
            return Err(LayoutError::DoesNotFit {
                required,
                available: self.ram.length,
            });
        }

        if let Some(rom) = self.rom {
            let rom_end = rom.check("ROM")?;
            if rom.origin < ram_end && self.ram.origin < rom_end {
                return Err(LayoutError::Overlap {
                    rom_start: rom.origin,
                    rom_end,
                    ram_start: self.ram.origin,
                    ram_end,
                });
            }
        }
        Ok(())
    }

    /// Validates the layout and renders the linker script for it.
    pub fn render(&self) -> Result<String, LayoutError> {
        self.validate()?;
        Ok(script::render(self))
    }
}

fn check_aligned(name: &'static str, value: u64) -> Result<(), LayoutError> {
    if value % ALIGNMENT != 0 {
        return Err(LayoutError::Misaligned {
            name,
            value,
            align: ALIGNMENT,
        });
    }
    Ok(())
}
