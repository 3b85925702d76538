// Screenshots
//
// Expands the palette-indexed frame buffer through the master palette and
// writes it as an RGB PNG with a timestamped name.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::display::{palette_to_rgb, FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Errors that can occur while saving a screenshot
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),
    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save the frame as `<dir>/<rom-name>/screenshot_<timestamp>.png`
///
/// Returns the path of the written file.
pub fn save_screenshot(
    frame: &FrameBuffer,
    directory: &Path,
    rom_path: Option<&Path>,
) -> Result<PathBuf, ScreenshotError> {
    let target_dir = match rom_path.and_then(|p| p.file_stem()) {
        Some(stem) => directory.join(stem),
        None => directory.join("default"),
    };
    fs::create_dir_all(&target_dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = target_dir.join(format!("screenshot_{}.png", timestamp));

    write_png(&path, &frame_to_rgb(frame))?;
    Ok(path)
}

/// Expand palette indices to packed RGB888
fn frame_to_rgb(frame: &FrameBuffer) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(frame.as_slice().len() * 3);
    for &index in frame.as_slice() {
        let color = palette_to_rgb(index);
        rgb.push(((color >> 16) & 0xFF) as u8);
        rgb.push(((color >> 8) & 0xFF) as u8);
        rgb.push((color & 0xFF) as u8);
    }
    rgb
}

fn write_png(path: &Path, rgb: &[u8]) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let writer = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(rgb)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_expansion_matches_palette() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(0, 0, 0x00); // 0x666666
        let rgb = frame_to_rgb(&frame);
        assert_eq!(rgb.len(), SCREEN_WIDTH * SCREEN_HEIGHT * 3);
        assert_eq!(&rgb[0..3], &[0x66, 0x66, 0x66]);
    }

    #[test]
    fn writes_a_png_file() {
        let frame = FrameBuffer::new();
        let dir = std::env::temp_dir().join("famicore-screenshot-test");
        let path = save_screenshot(&frame, &dir, None).unwrap();
        assert!(path.exists());
        // PNG signature
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        let _ = fs::remove_file(path);
    }
}
