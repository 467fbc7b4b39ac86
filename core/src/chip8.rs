use std::io::Read;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{ADDRESS_MASK, KEY_COUNT, MAX_ROM_SIZE, PROGRAM_START};
use crate::error::{Fault, LoadError};
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, Keypad, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`, including the keypad the host writes into
///  - the random number generator used by `RND`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the machine by one cycle
/// - inspecting its frame buffer for rendering by some display
/// - polling the sound timer for some speaker
pub struct Chip8 {
    state: State,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A Chip-8 whose `RND` results are reproducible for a given `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Chip8 {
            state: State::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Copies a rom into memory at 0x200.
    ///
    /// Nothing else about the machine changes, so loading again simply overwrites the program.
    /// A rom too large to fit below 0x1000 is rejected without touching memory.
    ///
    /// # Arguments
    /// * `rom` the raw program bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge { size: rom.len() });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        log::info!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        reader.read_to_end(&mut rom)?;
        self.load_rom(&rom)
    }

    /// Returns the machine to its power-on state. The rom has to be loaded again.
    pub fn reset(&mut self) {
        self.state = State::new();
    }

    /// Advances the machine by a single cycle
    /// - fetches the opcode at pc and moves pc past it
    /// - decodes and executes it
    /// - decrements the delay and sound timers
    ///
    /// A fault leaves the machine exactly as it was before the cycle.
    pub fn cycle(&mut self) -> Result<(), Fault> {
        let op = self.state.fetch();
        let instruction = Instruction::decode(op);
        log::trace!(
            "{:03X}: {:04X} {:<16} v{:02X?} i{:03X} sp{}",
            self.state.pc,
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i,
            self.state.sp
        );

        let fetched = State {
            pc: self.state.pc.wrapping_add(0x2) & ADDRESS_MASK,
            ..self.state
        };
        let mut next = instruction.execute(&fetched, &mut self.rng)?;

        next.delay_timer = next.delay_timer.saturating_sub(1);
        if next.sound_timer > 0 {
            next.sound_timer -= 1;
            if next.sound_timer == 0 {
                log::debug!("sound timer expired");
            }
        }

        self.state = next;
        Ok(())
    }

    /// Returns the FrameBuffer if the display should be redrawn, once per change
    pub fn get_frame(&mut self) -> Option<&FrameBuffer> {
        if std::mem::take(&mut self.state.draw_flag) {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// The current FrameBuffer regardless of whether it changed
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        if let Some(held) = self.state.keys.get_mut(key as usize) {
            *held = true;
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        if let Some(held) = self.state.keys.get_mut(key as usize) {
            *held = false;
        }
    }

    /// Direct access to the keypad for hosts that sample every key at once
    pub fn keys_mut(&mut self) -> &mut Keypad {
        &mut self.state.keys
    }

    /// Whether the host should currently be emitting a tone
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Releases every key
    pub fn release_all(&mut self) {
        self.state.keys = [false; KEY_COUNT];
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
