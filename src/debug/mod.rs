// Debug module - inspection tools built on the side-effect-free bus face
//
// The per-instruction execution trace lives on the CPU itself
// (`Cpu::trace`); this module holds the standalone disassembler.

mod disassembler;

pub use disassembler::{disassemble_instruction, disassemble_range, DisassembledInstruction};
