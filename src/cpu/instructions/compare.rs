// Compare instructions
//
// CMP/CPX/CPY set carry when the register is >= the operand and Z/N from
// the 8-bit difference; no register is modified.

use crate::bus::Bus;
use crate::cpu::{flags, Cpu};

impl Cpu {
    pub(crate) fn cmp(&mut self, bus: &mut Bus) {
        let value = self.read_operand(bus);
        self.compare(self.a, value);
    }

    pub(crate) fn cpx(&mut self, bus: &mut Bus) {
        let value = self.read_operand(bus);
        self.compare(self.x, value);
    }

    pub(crate) fn cpy(&mut self, bus: &mut Bus) {
        let value = self.read_operand(bus);
        self.compare(self.y, value);
    }

    fn compare(&mut self, register: u8, value: u8) {
        let diff = register.wrapping_sub(value);
        self.update_flag(flags::CARRY, register >= value);
        self.update_zero_and_negative_flags(diff);
    }
}
