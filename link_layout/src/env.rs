use crate::{LayoutError, Memory, MemoryLayout};

pub const RAM_ORIGIN_VAR: &str = "HPC_RT_RAM_ORIGIN";
pub const RAM_LENGTH_VAR: &str = "HPC_RT_RAM_LENGTH";
pub const ROM_ORIGIN_VAR: &str = "HPC_RT_ROM_ORIGIN";
pub const ROM_LENGTH_VAR: &str = "HPC_RT_ROM_LENGTH";
pub const STACK_SIZE_VAR: &str = "HPC_RT_STACK_SIZE";
pub const HEAP_SIZE_VAR: &str = "HPC_RT_HEAP_SIZE";

pub const ENV_VARS: [&str; 6] = [
    RAM_ORIGIN_VAR,
    RAM_LENGTH_VAR,
    ROM_ORIGIN_VAR,
    ROM_LENGTH_VAR,
    STACK_SIZE_VAR,
    HEAP_SIZE_VAR,
];

impl MemoryLayout {
    /// Reads the layout from the process environment, falling back to the defaults for every
    /// variable that is not set.
    pub fn from_env() -> Result<Self, LayoutError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self, LayoutError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |var: &'static str, default: u64| -> Result<u64, LayoutError> {
            match lookup(var) {
                Some(value) => parse_number(var, &value),
                None => Ok(default),
            }
        };

        let ram = Memory::new(
            number(RAM_ORIGIN_VAR, defaults.ram.origin)?,
            number(RAM_LENGTH_VAR, defaults.ram.length)?,
        );
        let rom = match (lookup(ROM_ORIGIN_VAR), lookup(ROM_LENGTH_VAR)) {
            (Some(origin), Some(length)) => Some(Memory::new(
                parse_number(ROM_ORIGIN_VAR, &origin)?,
                parse_number(ROM_LENGTH_VAR, &length)?,
            )),
            (None, None) => None,
            _ => return Err(LayoutError::IncompleteRom),
        };

        Ok(Self {
            ram,
            rom,
            stack_size: number(STACK_SIZE_VAR, defaults.stack_size)?,
            heap_size: number(HEAP_SIZE_VAR, defaults.heap_size)?,
        })
    }
}

/// Accepts `0x`-prefixed hex or decimal, with `_` separators.
pub(crate) fn parse_number(var: &'static str, value: &str) -> Result<u64, LayoutError> {
    let cleaned: String = value.trim().chars().filter(|c| *c != '_').collect();
    let parsed = match cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => cleaned.parse::<u64>(),
    };
    parsed.map_err(|_| LayoutError::InvalidNumber {
        var,
        value: value.to_owned(),
    })
}
