// 256-entry opcode decode table
//
// Every opcode byte maps to an (operation, addressing mode, base cycles)
// triple plus a flag saying whether an indexed page cross adds a cycle.
// Stores and read-modify-write instructions use the same indexed address
// computation as loads but never pay the penalty, so the flag lives here
// rather than in the addressing mode itself.
//
// Opcodes outside the official set decode to no-ops that consume the
// cycle counts real hardware exhibits; the one exception is $EB, a
// hardware duplicate of SBC. These entries are enough to run the common
// test ROMs, which only lean on a fixed group of unofficials.

use super::addressing::AddressingMode;

/// Instruction operations, dispatched by `execute`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
    /// Illegal opcode treated as a no-op
    Xxx,
}

/// One decode table entry
pub struct OpcodeInfo {
    /// Mnemonic for disassembly ("???" for illegal opcodes)
    pub mnemonic: &'static str,
    /// Operation to perform
    pub op: Op,
    /// Addressing mode
    pub mode: AddressingMode,
    /// Base cycle count
    pub cycles: u8,
    /// Page cross on an indexed mode adds one cycle
    pub page_penalty: bool,
}

use AddressingMode::*;

/// Ordinary entry without a page-cross penalty
const fn op(mnemonic: &'static str, op: Op, mode: AddressingMode, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        op,
        mode,
        cycles,
        page_penalty: false,
    }
}

/// Entry whose indexed address computation can cost one extra cycle
const fn opx(mnemonic: &'static str, op: Op, mode: AddressingMode, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        op,
        mode,
        cycles,
        page_penalty: true,
    }
}

/// Illegal opcode: pure no-op with the tabulated cycle count
const fn ill(cycles: u8) -> OpcodeInfo {
    op("???", Op::Xxx, Implied, cycles)
}

/// Unofficial NOP duplicate with the tabulated cycle count
const fn skip(cycles: u8) -> OpcodeInfo {
    op("???", Op::Nop, Implied, cycles)
}

/// The decode table, indexed by opcode byte
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeInfo; 256] = [
    // 0x00
    op("BRK", Op::Brk, Implied, 7), op("ORA", Op::Ora, IndexedIndirect, 6), ill(2), ill(8),
    skip(3), op("ORA", Op::Ora, ZeroPage, 3), op("ASL", Op::Asl, ZeroPage, 5), ill(5),
    op("PHP", Op::Php, Implied, 3), op("ORA", Op::Ora, Immediate, 2), op("ASL", Op::Asl, Accumulator, 2), ill(2),
    skip(4), op("ORA", Op::Ora, Absolute, 4), op("ASL", Op::Asl, Absolute, 6), ill(6),
    // 0x10
    op("BPL", Op::Bpl, Relative, 2), opx("ORA", Op::Ora, IndirectIndexed, 5), ill(2), ill(8),
    skip(4), op("ORA", Op::Ora, ZeroPageX, 4), op("ASL", Op::Asl, ZeroPageX, 6), ill(6),
    op("CLC", Op::Clc, Implied, 2), opx("ORA", Op::Ora, AbsoluteY, 4), skip(2), ill(7),
    skip(4), opx("ORA", Op::Ora, AbsoluteX, 4), op("ASL", Op::Asl, AbsoluteX, 7), ill(7),
    // 0x20
    op("JSR", Op::Jsr, Absolute, 6), op("AND", Op::And, IndexedIndirect, 6), ill(2), ill(8),
    op("BIT", Op::Bit, ZeroPage, 3), op("AND", Op::And, ZeroPage, 3), op("ROL", Op::Rol, ZeroPage, 5), ill(5),
    op("PLP", Op::Plp, Implied, 4), op("AND", Op::And, Immediate, 2), op("ROL", Op::Rol, Accumulator, 2), ill(2),
    op("BIT", Op::Bit, Absolute, 4), op("AND", Op::And, Absolute, 4), op("ROL", Op::Rol, Absolute, 6), ill(6),
    // 0x30
    op("BMI", Op::Bmi, Relative, 2), opx("AND", Op::And, IndirectIndexed, 5), ill(2), ill(8),
    skip(4), op("AND", Op::And, ZeroPageX, 4), op("ROL", Op::Rol, ZeroPageX, 6), ill(6),
    op("SEC", Op::Sec, Implied, 2), opx("AND", Op::And, AbsoluteY, 4), skip(2), ill(7),
    skip(4), opx("AND", Op::And, AbsoluteX, 4), op("ROL", Op::Rol, AbsoluteX, 7), ill(7),
    // 0x40
    op("RTI", Op::Rti, Implied, 6), op("EOR", Op::Eor, IndexedIndirect, 6), ill(2), ill(8),
    skip(3), op("EOR", Op::Eor, ZeroPage, 3), op("LSR", Op::Lsr, ZeroPage, 5), ill(5),
    op("PHA", Op::Pha, Implied, 3), op("EOR", Op::Eor, Immediate, 2), op("LSR", Op::Lsr, Accumulator, 2), ill(2),
    op("JMP", Op::Jmp, Absolute, 3), op("EOR", Op::Eor, Absolute, 4), op("LSR", Op::Lsr, Absolute, 6), ill(6),
    // 0x50
    op("BVC", Op::Bvc, Relative, 2), opx("EOR", Op::Eor, IndirectIndexed, 5), ill(2), ill(8),
    skip(4), op("EOR", Op::Eor, ZeroPageX, 4), op("LSR", Op::Lsr, ZeroPageX, 6), ill(6),
    op("CLI", Op::Cli, Implied, 2), opx("EOR", Op::Eor, AbsoluteY, 4), skip(2), ill(7),
    skip(4), opx("EOR", Op::Eor, AbsoluteX, 4), op("LSR", Op::Lsr, AbsoluteX, 7), ill(7),
    // 0x60
    op("RTS", Op::Rts, Implied, 6), op("ADC", Op::Adc, IndexedIndirect, 6), ill(2), ill(8),
    skip(3), op("ADC", Op::Adc, ZeroPage, 3), op("ROR", Op::Ror, ZeroPage, 5), ill(5),
    op("PLA", Op::Pla, Implied, 4), op("ADC", Op::Adc, Immediate, 2), op("ROR", Op::Ror, Accumulator, 2), ill(2),
    op("JMP", Op::Jmp, Indirect, 5), op("ADC", Op::Adc, Absolute, 4), op("ROR", Op::Ror, Absolute, 6), ill(6),
    // 0x70
    op("BVS", Op::Bvs, Relative, 2), opx("ADC", Op::Adc, IndirectIndexed, 5), ill(2), ill(8),
    skip(4), op("ADC", Op::Adc, ZeroPageX, 4), op("ROR", Op::Ror, ZeroPageX, 6), ill(6),
    op("SEI", Op::Sei, Implied, 2), opx("ADC", Op::Adc, AbsoluteY, 4), skip(2), ill(7),
    skip(4), opx("ADC", Op::Adc, AbsoluteX, 4), op("ROR", Op::Ror, AbsoluteX, 7), ill(7),
    // 0x80
    skip(2), op("STA", Op::Sta, IndexedIndirect, 6), skip(2), ill(6),
    op("STY", Op::Sty, ZeroPage, 3), op("STA", Op::Sta, ZeroPage, 3), op("STX", Op::Stx, ZeroPage, 3), ill(3),
    op("DEY", Op::Dey, Implied, 2), skip(2), op("TXA", Op::Txa, Implied, 2), ill(2),
    op("STY", Op::Sty, Absolute, 4), op("STA", Op::Sta, Absolute, 4), op("STX", Op::Stx, Absolute, 4), ill(4),
    // 0x90
    op("BCC", Op::Bcc, Relative, 2), op("STA", Op::Sta, IndirectIndexed, 6), ill(2), ill(6),
    op("STY", Op::Sty, ZeroPageX, 4), op("STA", Op::Sta, ZeroPageX, 4), op("STX", Op::Stx, ZeroPageY, 4), ill(4),
    op("TYA", Op::Tya, Implied, 2), op("STA", Op::Sta, AbsoluteY, 5), op("TXS", Op::Txs, Implied, 2), ill(5),
    skip(5), op("STA", Op::Sta, AbsoluteX, 5), ill(5), ill(5),
    // 0xA0
    op("LDY", Op::Ldy, Immediate, 2), op("LDA", Op::Lda, IndexedIndirect, 6), op("LDX", Op::Ldx, Immediate, 2), ill(6),
    op("LDY", Op::Ldy, ZeroPage, 3), op("LDA", Op::Lda, ZeroPage, 3), op("LDX", Op::Ldx, ZeroPage, 3), ill(3),
    op("TAY", Op::Tay, Implied, 2), op("LDA", Op::Lda, Immediate, 2), op("TAX", Op::Tax, Implied, 2), ill(2),
    op("LDY", Op::Ldy, Absolute, 4), op("LDA", Op::Lda, Absolute, 4), op("LDX", Op::Ldx, Absolute, 4), ill(4),
    // 0xB0
    op("BCS", Op::Bcs, Relative, 2), opx("LDA", Op::Lda, IndirectIndexed, 5), ill(2), ill(5),
    op("LDY", Op::Ldy, ZeroPageX, 4), op("LDA", Op::Lda, ZeroPageX, 4), op("LDX", Op::Ldx, ZeroPageY, 4), ill(4),
    op("CLV", Op::Clv, Implied, 2), opx("LDA", Op::Lda, AbsoluteY, 4), op("TSX", Op::Tsx, Implied, 2), ill(4),
    opx("LDY", Op::Ldy, AbsoluteX, 4), opx("LDA", Op::Lda, AbsoluteX, 4), opx("LDX", Op::Ldx, AbsoluteY, 4), ill(4),
    // 0xC0
    op("CPY", Op::Cpy, Immediate, 2), op("CMP", Op::Cmp, IndexedIndirect, 6), skip(2), ill(8),
    op("CPY", Op::Cpy, ZeroPage, 3), op("CMP", Op::Cmp, ZeroPage, 3), op("DEC", Op::Dec, ZeroPage, 5), ill(5),
    op("INY", Op::Iny, Implied, 2), op("CMP", Op::Cmp, Immediate, 2), op("DEX", Op::Dex, Implied, 2), ill(2),
    op("CPY", Op::Cpy, Absolute, 4), op("CMP", Op::Cmp, Absolute, 4), op("DEC", Op::Dec, Absolute, 6), ill(6),
    // 0xD0
    op("BNE", Op::Bne, Relative, 2), opx("CMP", Op::Cmp, IndirectIndexed, 5), ill(2), ill(8),
    skip(4), op("CMP", Op::Cmp, ZeroPageX, 4), op("DEC", Op::Dec, ZeroPageX, 6), ill(6),
    op("CLD", Op::Cld, Implied, 2), opx("CMP", Op::Cmp, AbsoluteY, 4), op("NOP", Op::Nop, Implied, 2), ill(7),
    skip(4), opx("CMP", Op::Cmp, AbsoluteX, 4), op("DEC", Op::Dec, AbsoluteX, 7), ill(7),
    // 0xE0
    op("CPX", Op::Cpx, Immediate, 2), op("SBC", Op::Sbc, IndexedIndirect, 6), skip(2), ill(8),
    op("CPX", Op::Cpx, ZeroPage, 3), op("SBC", Op::Sbc, ZeroPage, 3), op("INC", Op::Inc, ZeroPage, 5), ill(5),
    op("INX", Op::Inx, Implied, 2), op("SBC", Op::Sbc, Immediate, 2), op("NOP", Op::Nop, Implied, 2), op("???", Op::Sbc, Implied, 2),
    op("CPX", Op::Cpx, Absolute, 4), op("SBC", Op::Sbc, Absolute, 4), op("INC", Op::Inc, Absolute, 6), ill(6),
    // 0xF0
    op("BEQ", Op::Beq, Relative, 2), opx("SBC", Op::Sbc, IndirectIndexed, 5), ill(2), ill(8),
    skip(4), op("SBC", Op::Sbc, ZeroPageX, 4), op("INC", Op::Inc, ZeroPageX, 6), ill(6),
    op("SED", Op::Sed, Implied, 2), opx("SBC", Op::Sbc, AbsoluteY, 4), op("NOP", Op::Nop, Implied, 2), ill(7),
    skip(4), opx("SBC", Op::Sbc, AbsoluteX, 4), op("INC", Op::Inc, AbsoluteX, 7), ill(7),
];
