// famicore - a cycle-approximate NES core
//
// The crate is headless: it turns cartridge bytes into 256x240 frames of
// palette indices, one `Emulator::run_frame` at a time. Windowing, audio
// and input belong to frontends.

// Public modules
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod debug;
pub mod display;
pub mod emulator;
pub mod ppu;

// Re-export the main types for convenience
pub use bus::Bus;
pub use cartridge::{Cartridge, INesError, INesHeader, Mirroring};
pub use cpu::Cpu;
pub use debug::{disassemble_instruction, disassemble_range, DisassembledInstruction};
pub use display::{FrameBuffer, MASTER_PALETTE, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use emulator::{Emulator, EmulatorConfig, SaveState, SaveStateError, ScreenshotError};
pub use ppu::Ppu;
