use thiserror::Error;

use crate::constants::MAX_ROM_SIZE;

/// Failure to place a program into memory. Memory is never touched when this is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM is {size} bytes but only {max} bytes fit in memory", max = MAX_ROM_SIZE)]
    RomTooLarge { size: usize },

    #[error("unable to read ROM")]
    Io(#[from] std::io::Error),
}

/// A condition that stops a cycle from completing.
///
/// When a cycle faults the machine is left exactly as it was before the cycle began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("stack overflow calling {target:#05X} from {pc:#05X}")]
    StackOverflow { pc: u16, target: u16 },

    #[error("stack underflow returning from {pc:#05X}")]
    StackUnderflow { pc: u16 },
}
