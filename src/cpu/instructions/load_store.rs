// Load and store instructions

use crate::bus::Bus;
use crate::cpu::Cpu;

impl Cpu {
    /// LDA - load the accumulator (flags: Z, N)
    pub(crate) fn lda(&mut self, bus: &mut Bus) {
        self.a = self.read_operand(bus);
        self.update_zero_and_negative_flags(self.a);
    }

    /// LDX - load the X register (flags: Z, N)
    pub(crate) fn ldx(&mut self, bus: &mut Bus) {
        self.x = self.read_operand(bus);
        self.update_zero_and_negative_flags(self.x);
    }

    /// LDY - load the Y register (flags: Z, N)
    pub(crate) fn ldy(&mut self, bus: &mut Bus) {
        self.y = self.read_operand(bus);
        self.update_zero_and_negative_flags(self.y);
    }

    /// STA - store the accumulator; no flags
    pub(crate) fn sta(&mut self, bus: &mut Bus) {
        bus.write(self.eff_addr, self.a);
    }

    /// STX - store the X register; no flags
    pub(crate) fn stx(&mut self, bus: &mut Bus) {
        bus.write(self.eff_addr, self.x);
    }

    /// STY - store the Y register; no flags
    pub(crate) fn sty(&mut self, bus: &mut Bus) {
        bus.write(self.eff_addr, self.y);
    }
}
