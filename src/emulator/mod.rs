// Emulator module - system scheduler and quality-of-life features
//
// Owns the bus, CPU and PPU, and drives them in the fixed 1:3 ratio: the
// PPU advances every system tick, the CPU every third. NMI requests
// latched by the PPU are delivered at the end of the same tick.

mod config;
mod save_state;
mod screenshot;

pub use config::{ConfigError, EmulatorConfig, SaveStateConfig, ScreenshotConfig, TraceConfig};
pub use save_state::{SaveState, SaveStateError};
pub use screenshot::{save_screenshot, ScreenshotError};

use crate::bus::Bus;
use crate::cartridge::{Cartridge, INesError};
use crate::cpu::Cpu;
use crate::display::FrameBuffer;
use crate::ppu::Ppu;
use std::path::{Path, PathBuf};

/// Complete machine: bus, processors, and the tick phase between them
pub struct Emulator {
    cpu: Cpu,
    ppu: Ppu,
    bus: Bus,

    /// System ticks since reset; the CPU runs when `ticks % 3 == 0`
    ticks: u64,

    config: EmulatorConfig,
    rom_path: Option<PathBuf>,
}

impl Emulator {
    /// Create an emulator with no cartridge and the on-disk (or default)
    /// configuration
    pub fn new() -> Self {
        Emulator {
            cpu: Cpu::new(),
            ppu: Ppu::new(),
            bus: Bus::new(),
            ticks: 0,
            config: EmulatorConfig::load_or_default(),
            rom_path: None,
        }
    }

    /// Load an iNES file, attach it and reset the machine
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), INesError> {
        let path = path.as_ref();
        let cartridge = Cartridge::from_ines_file(path)?;
        self.rom_path = Some(path.to_path_buf());
        self.insert_cartridge(cartridge);
        Ok(())
    }

    /// Attach an already-parsed cartridge and reset the machine
    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.bus.attach(cartridge);
        self.reset();
    }

    /// Reset button: reseed CPU, PPU and register state; RAM and ROM
    /// contents survive
    pub fn reset(&mut self) {
        self.bus.regs.reset();
        self.cpu.reset(&mut self.bus);
        self.ppu.reset();
        self.ticks = 0;
    }

    /// Advance the system by one tick (one PPU dot)
    ///
    /// The PPU always steps; the CPU steps on every third tick; a pending
    /// NMI is delivered after the processors have run.
    pub fn tick(&mut self) {
        self.ppu.tick(&mut self.bus);
        if self.ticks % 3 == 0 {
            self.cpu.tick(&mut self.bus);
        }
        if self.ppu.nmi_pending() {
            self.ppu.clear_nmi();
            self.cpu.nmi(&mut self.bus);
        }
        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Run until the PPU finishes the frame, then keep ticking until the
    /// CPU reaches an instruction boundary
    pub fn run_frame(&mut self) -> &FrameBuffer {
        while !self.ppu.frame_complete() {
            self.tick();
        }
        while self.cpu.cycles != 0 {
            self.tick();
        }
        self.ppu.clear_frame_complete();
        self.ppu.frame()
    }

    /// Advance the whole system until the CPU completes exactly one more
    /// instruction
    pub fn step_instruction(&mut self) {
        // Reach the next fetch (total_cycles moves when it happens), then
        // drain the instruction's countdown
        let fetched_at = self.cpu.total_cycles;
        while self.cpu.total_cycles == fetched_at {
            self.tick();
        }
        while self.cpu.cycles != 0 {
            self.tick();
        }
    }

    /// Save the machine state to the numbered slot
    pub fn save_state(&self, slot: u8) -> Result<PathBuf, SaveStateError> {
        let state = SaveState::capture(self);
        state.save_to_slot(slot, &self.config.save_state, self.rom_path.as_deref())
    }

    /// Restore the machine state from the numbered slot
    pub fn load_state(&mut self, slot: u8) -> Result<(), SaveStateError> {
        let state =
            SaveState::load_from_slot(slot, &self.config.save_state, self.rom_path.as_deref())?;
        state.apply(self);
        Ok(())
    }

    /// Write the last frame as a PNG into the configured directory
    pub fn screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        save_screenshot(
            self.ppu.frame(),
            &self.config.screenshot.directory,
            self.rom_path.as_deref(),
        )
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn frame(&self) -> &FrameBuffer {
        self.ppu.frame()
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EmulatorConfig {
        &mut self.config
    }

    /// System ticks since reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
