// CPU fetch/execute loop and trace formatting
//
// `tick` is the unit of progress: it burns down the cycle budget of the
// instruction in flight and performs the whole next instruction in the
// tick where the budget hits zero. `step` is the instruction-granular
// wrapper the debugger and the test harness drive.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::opcodes::{Op, OPCODE_TABLE};
use crate::cpu::{flags, Cpu};

impl Cpu {
    /// Advance the CPU by one tick
    ///
    /// While an instruction is in flight this only decrements the cycle
    /// countdown. When the countdown reaches zero the next opcode is
    /// fetched, decoded and executed in full, and the countdown is
    /// reloaded with its cycle cost (page-cross and branch penalties
    /// included) minus the current tick.
    pub fn tick(&mut self, bus: &mut Bus) {
        if self.cycles > 0 {
            self.cycles -= 1;
            return;
        }

        let opcode = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        self.set_flag(flags::UNUSED);

        let info = &OPCODE_TABLE[opcode as usize];
        self.cycles = info.cycles;

        let page_crossed = self.resolve_address(info.mode, bus);
        if page_crossed && info.page_penalty {
            self.cycles += 1;
        }

        self.dispatch(info.op, info.mode, bus);
        self.set_flag(flags::UNUSED);

        self.total_cycles += self.cycles as u64;
        // The fetch itself consumes the first cycle of the instruction
        self.cycles -= 1;
    }

    /// Run one complete instruction, finishing any instruction already in
    /// flight first
    ///
    /// Returns the number of ticks consumed.
    pub fn step(&mut self, bus: &mut Bus) -> u32 {
        let mut ticks = 0;
        while self.cycles > 0 {
            self.tick(bus);
            ticks += 1;
        }
        self.tick(bus);
        ticks += 1;
        while self.cycles > 0 {
            self.tick(bus);
            ticks += 1;
        }
        ticks
    }

    /// Execute the operation for an already-resolved addressing mode
    fn dispatch(&mut self, op: Op, mode: AddressingMode, bus: &mut Bus) {
        let acc = mode == AddressingMode::Accumulator;
        match op {
            // Loads and stores
            Op::Lda => self.lda(bus),
            Op::Ldx => self.ldx(bus),
            Op::Ldy => self.ldy(bus),
            Op::Sta => self.sta(bus),
            Op::Stx => self.stx(bus),
            Op::Sty => self.sty(bus),

            // Register transfers
            Op::Tax => self.tax(),
            Op::Tay => self.tay(),
            Op::Txa => self.txa(),
            Op::Tya => self.tya(),
            Op::Tsx => self.tsx(),
            Op::Txs => self.txs(),

            // Arithmetic
            Op::Adc => self.adc(bus),
            Op::Sbc => self.sbc(bus),
            Op::Inc => self.inc(bus),
            Op::Dec => self.dec(bus),
            Op::Inx => self.inx(),
            Op::Iny => self.iny(),
            Op::Dex => self.dex(),
            Op::Dey => self.dey(),

            // Bitwise
            Op::And => self.and(bus),
            Op::Ora => self.ora(bus),
            Op::Eor => self.eor(bus),
            Op::Bit => self.bit(bus),

            // Shifts and rotates
            Op::Asl => self.asl(bus, acc),
            Op::Lsr => self.lsr(bus, acc),
            Op::Rol => self.rol(bus, acc),
            Op::Ror => self.ror(bus, acc),

            // Compares
            Op::Cmp => self.cmp(bus),
            Op::Cpx => self.cpx(bus),
            Op::Cpy => self.cpy(bus),

            // Branches
            Op::Bcc => self.bcc(),
            Op::Bcs => self.bcs(),
            Op::Beq => self.beq(),
            Op::Bne => self.bne(),
            Op::Bmi => self.bmi(),
            Op::Bpl => self.bpl(),
            Op::Bvc => self.bvc(),
            Op::Bvs => self.bvs(),

            // Jumps, subroutines and interrupt returns
            Op::Jmp => self.jmp(),
            Op::Jsr => self.jsr(bus),
            Op::Rts => self.rts(bus),
            Op::Brk => self.brk(bus),
            Op::Rti => self.rti(bus),

            // Stack
            Op::Pha => self.pha(bus),
            Op::Php => self.php(bus),
            Op::Pla => self.pla(bus),
            Op::Plp => self.plp(bus),

            // Flag manipulation
            Op::Clc => self.clear_flag(flags::CARRY),
            Op::Cld => self.clear_flag(flags::DECIMAL),
            Op::Cli => self.clear_flag(flags::INTERRUPT_DISABLE),
            Op::Clv => self.clear_flag(flags::OVERFLOW),
            Op::Sec => self.set_flag(flags::CARRY),
            Op::Sed => self.set_flag(flags::DECIMAL),
            Op::Sei => self.set_flag(flags::INTERRUPT_DISABLE),

            // No-ops, official and otherwise
            Op::Nop | Op::Xxx => {}
        }
    }

    /// Format the state before the next instruction as one nestest-style
    /// log line:
    ///
    /// ```text
    /// C000  4C F5 C5  JMP $C5F5     A:00 X:00 Y:00 P:24 SP:FD CYC:7
    /// ```
    ///
    /// Uses `Bus::peek` throughout so tracing never perturbs PPU register
    /// state.
    pub fn trace(&self, bus: &Bus) -> String {
        let opcode = bus.peek(self.pc);
        let info = &OPCODE_TABLE[opcode as usize];
        let len = info.mode.operand_len();

        let mut raw = format!("{:02X}", opcode);
        for i in 1..=len {
            raw.push_str(&format!(" {:02X}", bus.peek(self.pc.wrapping_add(i))));
        }

        let operand = self.format_operand(bus, info.mode);
        let disasm = if operand.is_empty() {
            info.mnemonic.to_string()
        } else {
            format!("{} {}", info.mnemonic, operand)
        };

        format!(
            "{:04X}  {:<8}  {:<12}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc, raw, disasm, self.a, self.x, self.y, self.status, self.sp, self.total_cycles
        )
    }

    fn format_operand(&self, bus: &Bus, mode: AddressingMode) -> String {
        let b1 = bus.peek(self.pc.wrapping_add(1));
        let b2 = bus.peek(self.pc.wrapping_add(2));
        let word = ((b2 as u16) << 8) | b1 as u16;
        match mode {
            AddressingMode::Implied => String::new(),
            AddressingMode::Accumulator => "A".to_string(),
            AddressingMode::Immediate => format!("#${:02X}", b1),
            AddressingMode::ZeroPage => format!("${:02X}", b1),
            AddressingMode::ZeroPageX => format!("${:02X},X", b1),
            AddressingMode::ZeroPageY => format!("${:02X},Y", b1),
            // Branch targets are shown resolved, as nestest logs do
            AddressingMode::Relative => {
                let offset = b1 as i8 as i16;
                let target = self.pc.wrapping_add(2).wrapping_add(offset as u16);
                format!("${:04X}", target)
            }
            AddressingMode::Absolute => format!("${:04X}", word),
            AddressingMode::AbsoluteX => format!("${:04X},X", word),
            AddressingMode::AbsoluteY => format!("${:04X},Y", word),
            AddressingMode::Indirect => format!("(${:04X})", word),
            AddressingMode::IndexedIndirect => format!("(${:02X},X)", b1),
            AddressingMode::IndirectIndexed => format!("(${:02X}),Y", b1),
        }
    }
}
