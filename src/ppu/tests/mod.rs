//! PPU unit tests, split by concern
//!
//! Everything drives the PPU the way the scheduler does: one `tick`
//! against a bus built from a programmatic cartridge.

use super::*;
use crate::bus::Bus;
use crate::cartridge::{Cartridge, Mirroring};

mod rendering;

/// Bus with a CHR-RAM cartridge so tests can compose pattern tables
pub(crate) fn test_bus() -> Bus {
    let mut bus = Bus::new();
    bus.attach(Cartridge {
        prg_rom: vec![0; 16 * 1024],
        chr_rom: Vec::new(),
        mapper: 0,
        mirroring: Mirroring::Horizontal,
        has_battery: false,
    });
    bus
}

/// Tick until the PPU sits at exactly (scanline, dot), not yet processed
pub(crate) fn advance_to(ppu: &mut Ppu, bus: &mut Bus, scanline: u16, dot: u16) {
    let mut guard = 2 * constants::DOTS_PER_FRAME;
    while !(ppu.scanline() == scanline && ppu.dot() == dot) {
        ppu.tick(bus);
        guard -= 1;
        assert!(guard > 0, "never reached ({}, {})", scanline, dot);
    }
}

/// Run n ticks
pub(crate) fn run_dots(ppu: &mut Ppu, bus: &mut Bus, n: u32) {
    for _ in 0..n {
        ppu.tick(bus);
    }
}

/// Fill every nametable entry with `tile` and the attribute tables with
/// `attr`, then store an all-`pixel` tile pattern for it
pub(crate) fn fill_background(bus: &mut Bus, tile: u8, attr: u8, pixel: u8) {
    for offset in 0..0x03C0u16 {
        bus.ppu_write(0x2000 + offset, tile);
        bus.ppu_write(0x2400 + offset, tile);
    }
    for offset in 0x03C0..0x0400u16 {
        bus.ppu_write(0x2000 + offset, attr);
        bus.ppu_write(0x2400 + offset, attr);
    }

    let lo = if pixel & 0x01 != 0 { 0xFF } else { 0x00 };
    let hi = if pixel & 0x02 != 0 { 0xFF } else { 0x00 };
    let base = (tile as u16) << 4;
    for row in 0..8 {
        bus.ppu_write(base + row, lo);
        bus.ppu_write(base + row + 8, hi);
    }
}
