//! A Chip-8 interpreter.
//!
//! [`Chip8`] owns the whole machine. A host loads a program with [`Chip8::load_rom`], then calls
//! [`Chip8::cycle`] at whatever rate it likes, writing key state in between cycles and reading
//! the frame buffer and sound timer back out.

pub use chip8::Chip8;
pub use constants::CLOCK_SPEED;
pub use error::{Fault, LoadError};
pub use instruction::Instruction;
pub use state::{FrameBuffer, Keypad, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
