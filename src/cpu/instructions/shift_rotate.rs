// Shift and rotate instructions
//
// Each comes in an accumulator form and a read-modify-write memory form;
// the dispatcher passes `acc` based on the decoded addressing mode.

use crate::bus::Bus;
use crate::cpu::{flags, Cpu};

impl Cpu {
    /// ASL - arithmetic shift left; carry takes the old bit 7
    pub(crate) fn asl(&mut self, bus: &mut Bus, acc: bool) {
        let value = if acc { self.a } else { self.read_operand(bus) };
        let result = value << 1;
        self.update_flag(flags::CARRY, value & 0x80 != 0);
        self.update_zero_and_negative_flags(result);
        if acc {
            self.a = result;
        } else {
            bus.write(self.eff_addr, result);
        }
    }

    /// LSR - logical shift right; carry takes the old bit 0
    pub(crate) fn lsr(&mut self, bus: &mut Bus, acc: bool) {
        let value = if acc { self.a } else { self.read_operand(bus) };
        let result = value >> 1;
        self.update_flag(flags::CARRY, value & 0x01 != 0);
        self.update_zero_and_negative_flags(result);
        if acc {
            self.a = result;
        } else {
            bus.write(self.eff_addr, result);
        }
    }

    /// ROL - rotate left through carry
    pub(crate) fn rol(&mut self, bus: &mut Bus, acc: bool) {
        let value = if acc { self.a } else { self.read_operand(bus) };
        let carry_in = if self.get_flag(flags::CARRY) { 1 } else { 0 };
        let result = (value << 1) | carry_in;
        self.update_flag(flags::CARRY, value & 0x80 != 0);
        self.update_zero_and_negative_flags(result);
        if acc {
            self.a = result;
        } else {
            bus.write(self.eff_addr, result);
        }
    }

    /// ROR - rotate right through carry
    pub(crate) fn ror(&mut self, bus: &mut Bus, acc: bool) {
        let value = if acc { self.a } else { self.read_operand(bus) };
        let carry_in = if self.get_flag(flags::CARRY) { 0x80 } else { 0 };
        let result = (value >> 1) | carry_in;
        self.update_flag(flags::CARRY, value & 0x01 != 0);
        self.update_zero_and_negative_flags(result);
        if acc {
            self.a = result;
        } else {
            bus.write(self.eff_addr, result);
        }
    }
}
