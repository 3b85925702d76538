// Table-driven 6502 disassembler
//
// Reads through `Bus::peek`, so disassembling the PPU register window or
// a live machine never perturbs emulation state.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::opcodes::OPCODE_TABLE;

/// One decoded instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledInstruction {
    /// Address of the opcode byte
    pub address: u16,
    /// Opcode plus operand bytes (1-3)
    pub bytes: Vec<u8>,
    /// Mnemonic ("???" for illegal opcodes)
    pub mnemonic: &'static str,
    /// Formatted operand, empty for implied mode
    pub operand: String,
}

impl DisassembledInstruction {
    /// Total instruction length in bytes
    pub fn byte_len(&self) -> u16 {
        self.bytes.len() as u16
    }
}

impl std::fmt::Display for DisassembledInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let raw: Vec<String> = self.bytes.iter().map(|b| format!("{:02X}", b)).collect();
        if self.operand.is_empty() {
            write!(f, "{:04X}  {:<8}  {}", self.address, raw.join(" "), self.mnemonic)
        } else {
            write!(
                f,
                "{:04X}  {:<8}  {} {}",
                self.address,
                raw.join(" "),
                self.mnemonic,
                self.operand
            )
        }
    }
}

/// Decode the instruction at `address`
pub fn disassemble_instruction(bus: &Bus, address: u16) -> DisassembledInstruction {
    let opcode = bus.peek(address);
    let info = &OPCODE_TABLE[opcode as usize];
    let operand_len = info.mode.operand_len();

    let mut bytes = vec![opcode];
    for i in 1..=operand_len {
        bytes.push(bus.peek(address.wrapping_add(i)));
    }

    let b1 = bus.peek(address.wrapping_add(1));
    let b2 = bus.peek(address.wrapping_add(2));
    let word = ((b2 as u16) << 8) | b1 as u16;

    let operand = match info.mode {
        AddressingMode::Implied => String::new(),
        AddressingMode::Accumulator => "A".to_string(),
        AddressingMode::Immediate => format!("#${:02X}", b1),
        AddressingMode::ZeroPage => format!("${:02X}", b1),
        AddressingMode::ZeroPageX => format!("${:02X},X", b1),
        AddressingMode::ZeroPageY => format!("${:02X},Y", b1),
        AddressingMode::Relative => {
            let offset = b1 as i8 as i16;
            let target = address.wrapping_add(2).wrapping_add(offset as u16);
            format!("${:04X}", target)
        }
        AddressingMode::Absolute => format!("${:04X}", word),
        AddressingMode::AbsoluteX => format!("${:04X},X", word),
        AddressingMode::AbsoluteY => format!("${:04X},Y", word),
        AddressingMode::Indirect => format!("(${:04X})", word),
        AddressingMode::IndexedIndirect => format!("(${:02X},X)", b1),
        AddressingMode::IndirectIndexed => format!("(${:02X}),Y", b1),
    };

    DisassembledInstruction {
        address,
        bytes,
        mnemonic: info.mnemonic,
        operand,
    }
}

/// Decode instructions from `start` until `end` (exclusive) is reached or
/// passed
pub fn disassemble_range(bus: &Bus, start: u16, end: u16) -> Vec<DisassembledInstruction> {
    let mut instructions = Vec::new();
    let mut address = start;
    while address < end {
        let instruction = disassemble_instruction(bus, address);
        let len = instruction.byte_len();
        instructions.push(instruction);
        match address.checked_add(len) {
            Some(next) => address = next,
            None => break,
        }
    }
    instructions
}
