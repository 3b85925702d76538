// Save states
//
// Serializes the complete machine state (CPU registers, PPU pipeline,
// register block, RAM/VRAM/palette contents) as versioned JSON. ROM data
// is deliberately excluded; a save state only makes sense against the
// cartridge it was taken from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::config::SaveStateConfig;
use super::Emulator;

/// Current save state format version
const SAVE_STATE_VERSION: u32 = 1;

/// Errors that can occur during save state operations
#[derive(Debug)]
pub enum SaveStateError {
    /// I/O error
    Io(io::Error),
    /// Serialization/deserialization error
    Serialization(serde_json::Error),
    /// The file was produced by an incompatible core version
    VersionMismatch { expected: u32, found: u32 },
    /// The requested slot is outside the configured range
    InvalidSlot(u8),
}

impl fmt::Display for SaveStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStateError::Io(e) => write!(f, "I/O error: {}", e),
            SaveStateError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SaveStateError::VersionMismatch { expected, found } => {
                write!(f, "Version mismatch: expected {}, found {}", expected, found)
            }
            SaveStateError::InvalidSlot(slot) => write!(f, "Invalid save slot {}", slot),
        }
    }
}

impl std::error::Error for SaveStateError {}

impl From<io::Error> for SaveStateError {
    fn from(e: io::Error) -> Self {
        SaveStateError::Io(e)
    }
}

impl From<serde_json::Error> for SaveStateError {
    fn from(e: serde_json::Error) -> Self {
        SaveStateError::Serialization(e)
    }
}

/// CPU register snapshot
#[derive(Serialize, Deserialize)]
struct CpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: u8,
    cycles: u8,
    total_cycles: u64,
}

/// PPU pipeline snapshot
#[derive(Serialize, Deserialize)]
struct PpuState {
    scanline: u16,
    dot: u16,
    shift_pattern_lo: u16,
    shift_pattern_hi: u16,
    shift_attr_lo: u16,
    shift_attr_hi: u16,
    next_tile_id: u8,
    next_tile_attr: u8,
    next_tile_lo: u8,
    next_tile_hi: u8,
    nmi_pending: bool,
    frame: u64,
}

/// Memory-mapped register block snapshot
#[derive(Serialize, Deserialize)]
struct RegisterState {
    ctrl: u8,
    mask: u8,
    status: u8,
    oam_addr: u8,
    oam_data: u8,
    v: u16,
    t: u16,
    fine_x: u8,
    write_latch: bool,
    read_buffer: u8,
}

/// Complete serializable machine snapshot
#[derive(Serialize, Deserialize)]
pub struct SaveState {
    version: u32,
    ticks: u64,
    cpu: CpuState,
    ppu: PpuState,
    regs: RegisterState,
    ram: Vec<u8>,
    vram: Vec<u8>,
    palette_ram: Vec<u8>,
}

impl SaveState {
    /// Snapshot the current machine state
    pub fn capture(emulator: &Emulator) -> Self {
        let cpu = &emulator.cpu;
        let ppu = &emulator.ppu;
        let bus = &emulator.bus;

        SaveState {
            version: SAVE_STATE_VERSION,
            ticks: emulator.ticks,
            cpu: CpuState {
                a: cpu.a,
                x: cpu.x,
                y: cpu.y,
                sp: cpu.sp,
                pc: cpu.pc,
                status: cpu.status,
                cycles: cpu.cycles,
                total_cycles: cpu.total_cycles,
            },
            ppu: PpuState {
                scanline: ppu.scanline,
                dot: ppu.dot,
                shift_pattern_lo: ppu.bg_shift_pattern_lo,
                shift_pattern_hi: ppu.bg_shift_pattern_hi,
                shift_attr_lo: ppu.bg_shift_attr_lo,
                shift_attr_hi: ppu.bg_shift_attr_hi,
                next_tile_id: ppu.bg_next_tile_id,
                next_tile_attr: ppu.bg_next_tile_attr,
                next_tile_lo: ppu.bg_next_tile_lo,
                next_tile_hi: ppu.bg_next_tile_hi,
                nmi_pending: ppu.nmi_pending,
                frame: ppu.frame,
            },
            regs: RegisterState {
                ctrl: bus.regs.ctrl,
                mask: bus.regs.mask,
                status: bus.regs.status,
                oam_addr: bus.regs.oam_addr,
                oam_data: bus.regs.oam_data,
                v: bus.regs.v.raw(),
                t: bus.regs.t.raw(),
                fine_x: bus.regs.fine_x,
                write_latch: bus.regs.write_latch,
                read_buffer: bus.regs.read_buffer,
            },
            ram: bus.ram.to_vec(),
            vram: bus.vram.to_vec(),
            palette_ram: bus.palette_ram.to_vec(),
        }
    }

    /// Restore the snapshot into the machine
    pub fn apply(&self, emulator: &mut Emulator) {
        let cpu = &mut emulator.cpu;
        cpu.a = self.cpu.a;
        cpu.x = self.cpu.x;
        cpu.y = self.cpu.y;
        cpu.sp = self.cpu.sp;
        cpu.pc = self.cpu.pc;
        cpu.status = self.cpu.status;
        cpu.cycles = self.cpu.cycles;
        cpu.total_cycles = self.cpu.total_cycles;

        let ppu = &mut emulator.ppu;
        ppu.scanline = self.ppu.scanline;
        ppu.dot = self.ppu.dot;
        ppu.bg_shift_pattern_lo = self.ppu.shift_pattern_lo;
        ppu.bg_shift_pattern_hi = self.ppu.shift_pattern_hi;
        ppu.bg_shift_attr_lo = self.ppu.shift_attr_lo;
        ppu.bg_shift_attr_hi = self.ppu.shift_attr_hi;
        ppu.bg_next_tile_id = self.ppu.next_tile_id;
        ppu.bg_next_tile_attr = self.ppu.next_tile_attr;
        ppu.bg_next_tile_lo = self.ppu.next_tile_lo;
        ppu.bg_next_tile_hi = self.ppu.next_tile_hi;
        ppu.nmi_pending = self.ppu.nmi_pending;
        ppu.frame = self.ppu.frame;

        let bus = &mut emulator.bus;
        bus.regs.ctrl = self.regs.ctrl;
        bus.regs.mask = self.regs.mask;
        bus.regs.status = self.regs.status;
        bus.regs.oam_addr = self.regs.oam_addr;
        bus.regs.oam_data = self.regs.oam_data;
        bus.regs.v.set_raw(self.regs.v);
        bus.regs.t.set_raw(self.regs.t);
        bus.regs.fine_x = self.regs.fine_x;
        bus.regs.write_latch = self.regs.write_latch;
        bus.regs.read_buffer = self.regs.read_buffer;

        copy_into(&mut bus.ram, &self.ram);
        copy_into(&mut bus.vram, &self.vram);
        copy_into(&mut bus.palette_ram, &self.palette_ram);

        emulator.ticks = self.ticks;
    }

    /// Serialize into the numbered slot file
    pub fn save_to_slot(
        &self,
        slot: u8,
        config: &SaveStateConfig,
        rom_path: Option<&Path>,
    ) -> Result<PathBuf, SaveStateError> {
        if slot >= config.slots {
            return Err(SaveStateError::InvalidSlot(slot));
        }
        fs::create_dir_all(&config.directory)?;
        let path = config.directory.join(slot_file_name(slot, rom_path));
        let json = serde_json::to_string(self)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Load and validate the numbered slot file
    pub fn load_from_slot(
        slot: u8,
        config: &SaveStateConfig,
        rom_path: Option<&Path>,
    ) -> Result<Self, SaveStateError> {
        if slot >= config.slots {
            return Err(SaveStateError::InvalidSlot(slot));
        }
        let path = config.directory.join(slot_file_name(slot, rom_path));
        let json = fs::read_to_string(path)?;
        let state: SaveState = serde_json::from_str(&json)?;
        if state.version != SAVE_STATE_VERSION {
            return Err(SaveStateError::VersionMismatch {
                expected: SAVE_STATE_VERSION,
                found: state.version,
            });
        }
        Ok(state)
    }
}

fn slot_file_name(slot: u8, rom_path: Option<&Path>) -> String {
    let stem = rom_path
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("state");
    format!("{}.slot{}.json", stem, slot)
}

fn copy_into(target: &mut [u8], source: &[u8]) {
    let len = target.len().min(source.len());
    target[..len].copy_from_slice(&source[..len]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{Cartridge, Mirroring};

    fn emulator_with_cart() -> Emulator {
        let mut prg = vec![0xEA; 16 * 1024];
        prg[0x3FFC] = 0x00;
        prg[0x3FFD] = 0x80;
        let mut emulator = Emulator::new();
        emulator.insert_cartridge(Cartridge {
            prg_rom: prg,
            chr_rom: vec![0; 8 * 1024],
            mapper: 0,
            mirroring: Mirroring::Horizontal,
            has_battery: false,
        });
        emulator
    }

    #[test]
    fn capture_apply_round_trip() {
        let mut emulator = emulator_with_cart();
        for _ in 0..50_000 {
            emulator.tick();
        }
        emulator.bus_mut().write(0x0042, 0xA5);

        let state = SaveState::capture(&emulator);
        let json = serde_json::to_string(&state).unwrap();

        // A fresh machine plus the snapshot equals the original
        let mut restored = emulator_with_cart();
        let state: SaveState = serde_json::from_str(&json).unwrap();
        state.apply(&mut restored);

        assert_eq!(restored.cpu().pc, emulator.cpu().pc);
        assert_eq!(restored.cpu().total_cycles, emulator.cpu().total_cycles);
        assert_eq!(restored.ppu().scanline(), emulator.ppu().scanline());
        assert_eq!(restored.ppu().dot(), emulator.ppu().dot());
        assert_eq!(restored.ticks(), emulator.ticks());
        assert_eq!(restored.bus_mut().read(0x0042), 0xA5);

        // Both machines stay in lockstep afterwards
        for _ in 0..10_000 {
            emulator.tick();
            restored.tick();
        }
        assert_eq!(restored.cpu().pc, emulator.cpu().pc);
        assert_eq!(restored.ppu().dot(), emulator.ppu().dot());
    }

    #[test]
    fn slot_round_trip_and_version_check() {
        let emulator = emulator_with_cart();
        let state = SaveState::capture(&emulator);
        let config = SaveStateConfig {
            slots: 2,
            directory: std::env::temp_dir().join("famicore-save-tests"),
        };

        let path = state.save_to_slot(1, &config, None).unwrap();
        let loaded = SaveState::load_from_slot(1, &config, None).unwrap();
        assert_eq!(loaded.version, SAVE_STATE_VERSION);

        // A tampered version field is refused on load
        let json = fs::read_to_string(&path)
            .unwrap()
            .replace("\"version\":1", "\"version\":99");
        fs::write(&path, json).unwrap();
        assert!(matches!(
            SaveState::load_from_slot(1, &config, None),
            Err(SaveStateError::VersionMismatch {
                expected: SAVE_STATE_VERSION,
                found: 99
            })
        ));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn invalid_slot_is_rejected() {
        let emulator = emulator_with_cart();
        let state = SaveState::capture(&emulator);
        let config = SaveStateConfig {
            slots: 2,
            directory: std::env::temp_dir().join("famicore-tests"),
        };
        assert!(matches!(
            state.save_to_slot(5, &config, None),
            Err(SaveStateError::InvalidSlot(5))
        ));
    }
}
