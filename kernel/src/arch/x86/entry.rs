// =============================================================================
// BumpBoot — Entry Trampoline
// =============================================================================
//
// The bootloader jumps to `_start` in 32-bit protected mode with paging off,
// interrupts disabled and NO usable stack. Before any Rust runs we:
//   1. Point ESP at the top of a .bss boot stack
//   2. Pass EAX (loader magic) and EBX (info block) to kmain as cdecl args
//   3. Should kmain ever return, park the CPU
//
// =============================================================================

use crate::config::BOOT_STACK_SIZE;

core::arch::global_asm!(
    ".section .bss.boot_stack, \"aw\", @nobits",
    ".p2align 4",
    "boot_stack_bottom:",
    ".skip {stack_size}",
    "boot_stack_top:",
    "",
    ".section .text._start, \"ax\"",
    ".global _start",
    "_start:",
    "    mov esp, offset boot_stack_top",
    // Two pushes plus the return address; keep ESP 16-byte aligned at the call.
    "    sub esp, 8",
    "    push ebx",
    "    push eax",
    "    call {kmain}",
    "2:",
    "    cli",
    "    hlt",
    "    jmp 2b",
    stack_size = const BOOT_STACK_SIZE,
    kmain = sym crate::kmain,
);
