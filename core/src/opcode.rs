/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, fetched big-endian. The top nibble selects an instruction
/// or a family of instructions; four families (0, 8, E, F) are further split by a secondary key.
/// - `[n___]` family; applies to all opcodes
/// - `[___n]` secondary key for families 0, 8 and E
/// - `[__kk]` secondary key for family F
///
/// Nibbles not used to select the operation carry its operands.
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` an immediate byte assigned to and/or compared with Vx
/// - `[_x__]` the register Vx or the last register of the range V0..Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a sprite height
pub trait Opcode {
    /// `[f___]`
    fn family(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn family(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
