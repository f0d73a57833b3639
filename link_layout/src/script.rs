use crate::symbols::*;
use crate::MemoryLayout;

// Absolute reach of a `gp`-relative access.
const GP_REACH: u64 = 0x800;

pub(crate) fn render(layout: &MemoryLayout) -> String {
    let mut memory = format!(
        "  RAM (rwx) : ORIGIN = {:#x}, LENGTH = {:#x}\n",
        layout.ram.origin, layout.ram.length
    );
    let (text_region, data_placement) = match layout.rom {
        Some(rom) => {
            memory.push_str(&format!(
                "  ROM (rx) : ORIGIN = {:#x}, LENGTH = {:#x}\n",
                rom.origin, rom.length
            ));
            ("ROM", "> RAM AT > ROM")
        }
        None => ("RAM", "> RAM"),
    };

    format!(
        r#"/* Generated by link_layout. Do not edit. */
OUTPUT_ARCH(riscv)
ENTRY({ENTRY})

MEMORY
{{
{memory}}}

SECTIONS
{{
  .text :
  {{
    KEEP(*(.text.init.enter))
    *(.text.init .text.init.*)
    *(.text .text.*)
  }} > {text_region}

  .rodata : ALIGN(16)
  {{
    *(.srodata .srodata.*)
    *(.rodata .rodata.*)
    . = ALIGN(16);
  }} > {text_region}

  .data : ALIGN(16)
  {{
    {DATA_START} = .;
    *(.sdata .sdata.* .sdata2 .sdata2.*)
    *(.data .data.*)
    . = ALIGN(16);
    {DATA_END} = .;
  }} {data_placement}
  {DATA_LOAD} = LOADADDR(.data);

  PROVIDE({GLOBAL_POINTER} = MIN({DATA_START} + {GP_REACH:#x}, MAX({DATA_END} - {GP_REACH:#x}, {DATA_START})));

  .bss (NOLOAD) : ALIGN(16)
  {{
    {BSS_START} = .;
    *(.sbss .sbss.* .bss .bss.*)
    . = ALIGN(16);
    {BSS_END} = .;
  }} > RAM

  /* Neither loaded nor cleared: holds state that must survive the boot sequence itself. */
  .uninit (NOLOAD) : ALIGN(16)
  {{
    *(.uninit .uninit.*)
    . = ALIGN(16);
  }} > RAM

  .heap (NOLOAD) : ALIGN(16)
  {{
    {HEAP_START} = .;
    . += {heap:#x};
    {HEAP_END} = .;
  }} > RAM

  .stack (NOLOAD) : ALIGN(16)
  {{
    {STACK_BOTTOM} = .;
    . += {stack:#x};
    . = ALIGN(16);
    {STACK_TOP} = .;
  }} > RAM

  /DISCARD/ :
  {{
    *(.eh_frame .eh_frame_hdr)
  }}
}}

ASSERT({DATA_END} >= {DATA_START}, "link_layout: .data ends before it starts");
ASSERT({BSS_END} >= {BSS_START}, "link_layout: .bss ends before it starts");
ASSERT({HEAP_END} <= {STACK_BOTTOM}, "link_layout: heap runs into the stack");
ASSERT({STACK_TOP} % 16 == 0, "link_layout: stack top is not 16-byte aligned");
ASSERT({STACK_TOP} <= ORIGIN(RAM) + LENGTH(RAM), "link_layout: stack top is outside RAM");
"#,
        heap = layout.heap_size,
        stack = layout.stack_size,
    )
}
