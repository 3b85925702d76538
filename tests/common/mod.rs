// Shared helpers for ROM-driven integration tests

#![allow(dead_code)]

use famicore::{Cartridge, Mirroring};
use std::fs;
use std::path::Path;

/// Load an iNES file, returning None (with a note on stderr) when the ROM
/// is not checked out locally
pub fn load_optional_rom(path: &str) -> Option<Vec<u8>> {
    match fs::read(Path::new(path)) {
        Ok(bytes) => Some(bytes),
        Err(_) => {
            eprintln!("skipping: test ROM {} not present", path);
            None
        }
    }
}

/// 16KB NROM cartridge built around a program placed at $8000
///
/// The reset vector points at the program start. The NMI and IRQ vectors
/// point at a handler at $9000 that increments $11 and returns.
pub fn program_cartridge(program: &[u8]) -> Cartridge {
    let mut prg = vec![0xEA; 16 * 1024];
    prg[..program.len()].copy_from_slice(program);
    prg[0x1000] = 0xE6; // INC $11
    prg[0x1001] = 0x11;
    prg[0x1002] = 0x40; // RTI
    prg[0x3FFA] = 0x00;
    prg[0x3FFB] = 0x90;
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;
    prg[0x3FFE] = 0x00;
    prg[0x3FFF] = 0x90;
    Cartridge {
        prg_rom: prg,
        chr_rom: vec![0; 8 * 1024],
        mapper: 0,
        mirroring: Mirroring::Horizontal,
        has_battery: false,
    }
}
