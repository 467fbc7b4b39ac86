/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Addresses wrap at the 12-bit boundary.
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// ROMs are loaded here and execution starts here.
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry, borrow, shifted-out bit and collision flag.
pub const FLAG_REGISTER: usize = 0xF;

pub const STACK_DEPTH: usize = 16;

pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// A lit framebuffer cell; every bit is set so a renderer can use it as a color directly.
pub const PIXEL_ON: u32 = 0xFFFF_FFFF;
pub const PIXEL_OFF: u32 = 0x0000_0000;

/// Default host cycle period in nanoseconds (500Hz).
pub const CLOCK_SPEED: u64 = 2_000_000;

/// Where the font glyphs live in memory.
pub const FONT_START: u16 = 0x50;

/// Each glyph is 5 rows of 8 pixels.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Font
/// Built-in sprites for the hexadecimal digits 0..F.
///
/// Each byte is one row with the most significant bit as the leftmost pixel, so
/// the glyph for `0` reads:
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
