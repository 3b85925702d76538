// Cartridge module - iNES container loading
//
// Parses the iNES file format and hands the raw PRG/CHR data plus the
// header-derived configuration (mirroring, battery, mapper number) to the
// bus. Only NROM-sized images are accepted: PRG-ROM of 16KB or 32KB and
// CHR of 0KB (CHR-RAM) or 8KB.
//
// # iNES Layout
//
// ```text
// Offset  Size   Contents
// 0       4      Signature: $4E $45 $53 $1A ("NES" + MS-DOS EOF)
// 4       1      PRG-ROM bank count (16KB units)
// 5       1      CHR-ROM bank count (8KB units)
// 6       1      Flags 6: mirroring, battery, trainer, four-screen, mapper low nibble
// 7       1      Flags 7: VS/PlayChoice, NES 2.0 marker, mapper high nibble
// 8-15    8      Mostly unused by this core
// 16      512    Optional trainer (skipped when flags 6 bit 2 is set)
// ...            PRG-ROM banks, then CHR-ROM banks
// ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// iNES signature: "NES" followed by the MS-DOS end-of-file marker
const INES_SIGNATURE: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

/// Size of the iNES header in bytes
const HEADER_SIZE: usize = 16;

/// Size of the optional trainer blob in bytes
const TRAINER_SIZE: usize = 512;

/// Size of one PRG-ROM bank (16KB)
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// Size of one CHR bank (8KB)
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// Nametable mirroring arrangement
///
/// Dictates how the 4KB logical nametable space maps onto the 2KB of
/// physical VRAM. `SingleScreen` cannot be expressed by an iNES header
/// (it is normally switched by a mapper) but the bus supports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    SingleScreen,
    FourScreen,
}

/// Errors that can occur while loading an iNES image
#[derive(Debug)]
pub enum INesError {
    /// I/O error reading the file
    Io(io::Error),
    /// The first four bytes did not match the iNES signature
    InvalidSignature,
    /// The file ended before the declared PRG/CHR data
    Truncated,
    /// PRG-ROM size other than 16KB or 32KB
    UnsupportedPrgSize(usize),
    /// CHR size other than 0KB (CHR-RAM) or 8KB
    UnsupportedChrSize(usize),
    /// Mapper other than 0 (NROM)
    UnsupportedMapper(u8),
}

impl fmt::Display for INesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            INesError::Io(e) => write!(f, "I/O error: {}", e),
            INesError::InvalidSignature => write!(f, "Not an iNES file (bad signature)"),
            INesError::Truncated => write!(f, "File is shorter than the declared ROM data"),
            INesError::UnsupportedPrgSize(kb) => {
                write!(f, "Unsupported PRG-ROM size: {}KB (expected 16KB or 32KB)", kb)
            }
            INesError::UnsupportedChrSize(kb) => {
                write!(f, "Unsupported CHR size: {}KB (expected 0KB or 8KB)", kb)
            }
            INesError::UnsupportedMapper(n) => write!(f, "Mapper {} is not supported", n),
        }
    }
}

impl std::error::Error for INesError {}

impl From<io::Error> for INesError {
    fn from(e: io::Error) -> Self {
        INesError::Io(e)
    }
}

/// Decoded iNES header
#[derive(Debug, Clone, Copy)]
pub struct INesHeader {
    /// Number of 16KB PRG-ROM banks
    pub prg_banks: u8,
    /// Number of 8KB CHR-ROM banks (0 means the cartridge uses CHR-RAM)
    pub chr_banks: u8,
    /// Mapper number assembled from both flag nibbles
    pub mapper: u8,
    /// Nametable arrangement (four-screen overrides the mirroring bit)
    pub mirroring: Mirroring,
    /// Cartridge has battery-backed PRG-RAM at $6000-$7FFF
    pub has_battery: bool,
    /// A 512-byte trainer precedes the PRG data
    pub has_trainer: bool,
}

impl INesHeader {
    /// Decode the 16-byte iNES header
    ///
    /// # Errors
    /// Returns `INesError::InvalidSignature` when the magic bytes are wrong
    /// and `INesError::Truncated` when fewer than 16 bytes are available.
    pub fn parse(bytes: &[u8]) -> Result<Self, INesError> {
        if bytes.len() < HEADER_SIZE {
            return Err(INesError::Truncated);
        }
        if bytes[0..4] != INES_SIGNATURE {
            return Err(INesError::InvalidSignature);
        }

        let flags6 = bytes[6];
        let flags7 = bytes[7];

        // Four-screen takes precedence over the horizontal/vertical bit
        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        Ok(INesHeader {
            prg_banks: bytes[4],
            chr_banks: bytes[5],
            mapper: (flags7 & 0xF0) | (flags6 >> 4),
            mirroring,
            has_battery: flags6 & 0x02 != 0,
            has_trainer: flags6 & 0x04 != 0,
        })
    }
}

/// A loaded cartridge: raw ROM data plus the header-derived configuration
pub struct Cartridge {
    /// PRG-ROM data (16KB or 32KB)
    pub prg_rom: Vec<u8>,
    /// CHR data (8KB); empty when the cartridge provides CHR-RAM instead
    pub chr_rom: Vec<u8>,
    /// Mapper number from the header (always 0 for images this core accepts)
    pub mapper: u8,
    /// Nametable arrangement
    pub mirroring: Mirroring,
    /// Battery-backed PRG-RAM flag from the header
    pub has_battery: bool,
}

impl Cartridge {
    /// Load a cartridge from raw iNES file contents
    ///
    /// Validates the signature and sizes, skips an optional trainer, and
    /// extracts the PRG/CHR data.
    pub fn from_ines_bytes(bytes: &[u8]) -> Result<Self, INesError> {
        let header = INesHeader::parse(bytes)?;

        if header.mapper != 0 {
            return Err(INesError::UnsupportedMapper(header.mapper));
        }

        let prg_size = header.prg_banks as usize * PRG_BANK_SIZE;
        let chr_size = header.chr_banks as usize * CHR_BANK_SIZE;

        if prg_size != PRG_BANK_SIZE && prg_size != 2 * PRG_BANK_SIZE {
            return Err(INesError::UnsupportedPrgSize(prg_size / 1024));
        }
        if chr_size != 0 && chr_size != CHR_BANK_SIZE {
            return Err(INesError::UnsupportedChrSize(chr_size / 1024));
        }

        let mut offset = HEADER_SIZE;
        if header.has_trainer {
            offset += TRAINER_SIZE;
        }

        if bytes.len() < offset + prg_size + chr_size {
            return Err(INesError::Truncated);
        }

        let prg_rom = bytes[offset..offset + prg_size].to_vec();
        let chr_rom = bytes[offset + prg_size..offset + prg_size + chr_size].to_vec();

        Ok(Cartridge {
            prg_rom,
            chr_rom,
            mapper: header.mapper,
            mirroring: header.mirroring,
            has_battery: header.has_battery,
        })
    }

    /// Load a cartridge from an iNES file on disk
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, INesError> {
        let bytes = fs::read(path)?;
        Self::from_ines_bytes(&bytes)
    }

    /// PRG-ROM size in kilobytes
    pub fn prg_kb(&self) -> usize {
        self.prg_rom.len() / 1024
    }

    /// CHR size in kilobytes (0 for CHR-RAM cartridges)
    pub fn chr_kb(&self) -> usize {
        self.chr_rom.len() / 1024
    }

    /// Whether the cartridge supplies writable CHR-RAM instead of CHR-ROM
    pub fn uses_chr_ram(&self) -> bool {
        self.chr_rom.is_empty()
    }
}
