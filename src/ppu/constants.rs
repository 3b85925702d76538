// PPU timing and address constants

/// Dots per scanline (0-340)
pub const DOTS_PER_SCANLINE: u16 = 341;

/// Scanlines per frame (0-261)
pub const SCANLINES_PER_FRAME: u16 = 262;

/// Dots in a full frame with no odd-frame skip
pub const DOTS_PER_FRAME: u32 = DOTS_PER_SCANLINE as u32 * SCANLINES_PER_FRAME as u32;

/// First scanline that emits pixels
pub const FIRST_VISIBLE_SCANLINE: u16 = 0;

/// Last scanline that emits pixels
pub const LAST_VISIBLE_SCANLINE: u16 = 239;

/// Idle line between rendering and vertical blank
pub const POSTRENDER_SCANLINE: u16 = 240;

/// Scanline whose dot 1 sets the VBlank flag
pub const VBLANK_SCANLINE: u16 = 241;

/// Last idle vertical blank scanline
pub const LAST_VBLANK_SCANLINE: u16 = 260;

/// Pre-render scanline that primes the pipeline for the next frame
pub const PRERENDER_SCANLINE: u16 = 261;

/// Base of the nametable address space
pub const NAMETABLE_BASE: u16 = 0x2000;

/// Base of the attribute tables within each nametable
pub const ATTRIBUTE_BASE: u16 = 0x23C0;

/// Base of palette RAM on the pattern bus
pub const PALETTE_BASE: u16 = 0x3F00;
