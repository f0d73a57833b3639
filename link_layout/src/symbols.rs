//! Names shared between the linker script and the runtime's `extern` declarations.

/// ELF entry, the reset trampoline.
pub const ENTRY: &str = "_enter";
pub const GLOBAL_POINTER: &str = "__global_pointer$";
pub const DATA_LOAD: &str = "_sidata";
pub const DATA_START: &str = "_sdata";
pub const DATA_END: &str = "_edata";
pub const BSS_START: &str = "_sbss";
pub const BSS_END: &str = "_ebss";
pub const HEAP_START: &str = "_sheap";
pub const HEAP_END: &str = "_eheap";
pub const STACK_BOTTOM: &str = "_sstack";
pub const STACK_TOP: &str = "_stack_top";

/// Every symbol the rendered script assigns.
pub const DEFINED: [&str; 10] = [
    GLOBAL_POINTER,
    DATA_LOAD,
    DATA_START,
    DATA_END,
    BSS_START,
    BSS_END,
    HEAP_START,
    HEAP_END,
    STACK_BOTTOM,
    STACK_TOP,
];
