use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SET, FONT_START, KEY_COUNT, MEMORY_SIZE,
    PIXEL_OFF, PROGRAM_START, REGISTER_COUNT, STACK_DEPTH,
};

/// The FrameBuffer is a flat, row-major 64x32 grid of `PIXEL_ON`/`PIXEL_OFF` cells.
pub type FrameBuffer = [u32; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// The held status of each key on the hexadecimal keypad 0..F.
pub type Keypad = [bool; KEY_COUNT];

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is overwritten as a flag by arithmetic, shifts and draws
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) an 8-bit stack pointer; the index of the next free stack slot
///
/// Timers
/// - 2 8-bit timers (delay & sound), each decremented once per cycle while nonzero
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the font
///     - 0x200.. holds the loaded ROM
/// - 64x32 frame buffer
///
/// ## Input
/// - the held status of keys 0..F, written by the host between cycles
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub keys: Keypad,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font_start = FONT_START as usize;
        memory[font_start..font_start + FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [PIXEL_OFF; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            keys: [false; KEY_COUNT],
            draw_flag: false,
        }
    }

    /// Reads a byte, wrapping addresses past the end of memory back to 0x000.
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDRESS_MASK) as usize]
    }

    /// Writes a byte, wrapping addresses past the end of memory back to 0x000.
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.memory[(addr & ADDRESS_MASK) as usize] = value;
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> u16 {
        let left = u16::from(self.read_byte(self.pc));
        let right = u16::from(self.read_byte(self.pc.wrapping_add(1)));
        left << 8 | right
    }

    /// Pushes a return address, or returns `None` if all 16 slots are in use.
    pub fn push(&mut self, addr: u16) -> Option<()> {
        let slot = self.stack.get_mut(self.sp as usize)?;
        *slot = addr;
        self.sp += 1;
        Some(())
    }

    /// Pops the most recent return address, or returns `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<u16> {
        self.sp = self.sp.checked_sub(1)?;
        Some(self.stack[self.sp as usize])
    }

    /// Whether the pixel at `(x, y)` is lit. Coordinates wrap around the screen edges.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.frame_buffer[pixel_index(x, y)] != PIXEL_OFF
    }

    /// Whether `key` is held. Only the low nibble of `key` is considered.
    pub fn key_held(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// The frame buffer offset of `(x, y)` after wrapping both coordinates.
pub fn pixel_index(x: usize, y: usize) -> usize {
    (y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + (x % DISPLAY_WIDTH)
}
