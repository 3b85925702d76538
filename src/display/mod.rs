// Display module - frame buffer and master palette
//
// The core emits palette indices, one per visible dot; turning them into
// RGB pixels is the frontend's job, helped by the conversion functions
// here.

mod framebuffer;
mod palette;

pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
pub use palette::{palette_to_rgb, palette_to_rgba, rgb_to_rgba, MASTER_PALETTE};
