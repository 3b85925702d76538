//! Background pixel output

use super::*;

/// Run complete frames and return the index at (x, y) afterwards
fn render_frames(ppu: &mut Ppu, bus: &mut Bus, frames: u32) {
    for _ in 0..frames {
        ppu.clear_frame_complete();
        while !ppu.frame_complete() {
            ppu.tick(bus);
        }
    }
}

#[test]
fn backdrop_color_with_rendering_disabled() {
    let mut ppu = Ppu::new();
    let mut bus = test_bus();
    bus.ppu_write(0x3F00, 0x2A);

    render_frames(&mut ppu, &mut bus, 1);
    assert_eq!(ppu.frame().get_pixel(0, 0), 0x2A);
    assert_eq!(ppu.frame().get_pixel(128, 120), 0x2A);
    assert_eq!(ppu.frame().get_pixel(255, 239), 0x2A);
}

#[test]
fn solid_tile_renders_through_palette_zero() {
    let mut ppu = Ppu::new();
    let mut bus = test_bus();

    // Tile 1 everywhere, attribute 0, every pixel value 3
    fill_background(&mut bus, 1, 0x00, 3);
    bus.ppu_write(0x3F03, 0x21);
    bus.write(0x2001, 0x08);

    // Second frame: the first runs before the pre-render line has primed
    // the fetch pipeline
    render_frames(&mut ppu, &mut bus, 2);
    assert_eq!(ppu.frame().get_pixel(100, 100), 0x21);
    assert_eq!(ppu.frame().get_pixel(32, 8), 0x21);
    assert_eq!(ppu.frame().get_pixel(240, 200), 0x21);
}

#[test]
fn attribute_byte_selects_palette() {
    let mut ppu = Ppu::new();
    let mut bus = test_bus();

    // Attribute 0x55: every quadrant uses palette 1
    fill_background(&mut bus, 1, 0x55, 3);
    bus.ppu_write(0x3F03, 0x21); // palette 0 entry, must not be used
    bus.ppu_write(0x3F07, 0x15); // palette 1, pixel 3
    bus.write(0x2001, 0x08);

    render_frames(&mut ppu, &mut bus, 2);
    assert_eq!(ppu.frame().get_pixel(100, 100), 0x15);
}

#[test]
fn transparent_pixels_fall_back_to_backdrop() {
    let mut ppu = Ppu::new();
    let mut bus = test_bus();

    // Tile 0 with empty planes: pixel value 0 -> $3F00
    fill_background(&mut bus, 0, 0x00, 0);
    bus.ppu_write(0x3F00, 0x0C);
    bus.write(0x2001, 0x08);

    render_frames(&mut ppu, &mut bus, 2);
    assert_eq!(ppu.frame().get_pixel(100, 100), 0x0C);
}

#[test]
fn ctrl_selects_background_pattern_table() {
    let mut ppu = Ppu::new();
    let mut bus = test_bus();

    fill_background(&mut bus, 1, 0x00, 3);
    // Move the tile's planes to the second pattern table; wipe the first
    for row in 0..8u16 {
        bus.ppu_write(0x0010 + row, 0x00);
        bus.ppu_write(0x0018 + row, 0x00);
        bus.ppu_write(0x1010 + row, 0xFF);
        bus.ppu_write(0x1018 + row, 0xFF);
    }
    bus.ppu_write(0x3F00, 0x0D);
    bus.ppu_write(0x3F03, 0x21);
    bus.write(0x2000, 0x10); // CTRL.bgTable = 1
    bus.write(0x2001, 0x08);

    render_frames(&mut ppu, &mut bus, 2);
    assert_eq!(ppu.frame().get_pixel(100, 100), 0x21);

    // With the table bit clear the same tile reads empty planes
    let mut ppu = Ppu::new();
    bus.write(0x2000, 0x00);
    render_frames(&mut ppu, &mut bus, 2);
    assert_eq!(ppu.frame().get_pixel(100, 100), 0x0D);
}

#[test]
fn color_indices_are_masked_to_six_bits() {
    let mut ppu = Ppu::new();
    let mut bus = test_bus();
    bus.ppu_write(0x3F00, 0xEA); // upper bits must not escape

    render_frames(&mut ppu, &mut bus, 1);
    assert_eq!(ppu.frame().get_pixel(10, 10), 0x2A);
}
