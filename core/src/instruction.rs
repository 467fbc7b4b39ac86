use std::fmt;

use rand::RngCore;

use crate::error::Fault;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A decoded instruction word with its operands.
///
/// Register operands are the 4-bit indices taken from the opcode's `x`/`y` nibbles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SkipEq(u8, u8),
    /// 4xkk
    SkipNe(u8, u8),
    /// 5xy0
    SkipRegEq(u8, u8),
    /// 6xkk
    Load(u8, u8),
    /// 7xkk
    Add(u8, u8),
    /// 8xy0
    Move(u8, u8),
    /// 8xy1
    Or(u8, u8),
    /// 8xy2
    And(u8, u8),
    /// 8xy3
    Xor(u8, u8),
    /// 8xy4
    AddReg(u8, u8),
    /// 8xy5
    Sub(u8, u8),
    /// 8xy6
    ShiftRight(u8),
    /// 8xy7
    SubN(u8, u8),
    /// 8xyE
    ShiftLeft(u8),
    /// 9xy0
    SkipRegNe(u8, u8),
    /// Annn
    LoadIndex(u16),
    /// Bnnn
    JumpOffset(u16),
    /// Cxkk
    Random(u8, u8),
    /// Dxyn
    Draw(u8, u8, u8),
    /// Ex9E
    SkipPressed(u8),
    /// ExA1
    SkipReleased(u8),
    /// Fx07
    ReadDelay(u8),
    /// Fx0A
    WaitKey(u8),
    /// Fx15
    SetDelay(u8),
    /// Fx18
    SetSound(u8),
    /// Fx1E
    AddIndex(u8),
    /// Fx29
    LoadGlyph(u8),
    /// Fx33
    StoreBcd(u8),
    /// Fx55
    StoreRegisters(u8),
    /// Fx65
    LoadRegisters(u8),
    /// Any word with no assigned meaning; executes as a no-op.
    Unknown(u16),
}

impl Instruction {
    /// Selects the Instruction for an opcode.
    ///
    /// The family nibble is matched first. Families 0, 8 and E are then split on the low nibble
    /// and family F on the low byte, mirroring how the instruction set itself is laid out.
    pub fn decode(op: u16) -> Self {
        use Instruction::*;

        let (x, y) = (op.x(), op.y());
        match op.family() {
            0x0 => match op.n() {
                0x0 => Clear,
                0xE => Return,
                _ => Unknown(op),
            },
            0x1 => Jump(op.nnn()),
            0x2 => Call(op.nnn()),
            0x3 => SkipEq(x, op.kk()),
            0x4 => SkipNe(x, op.kk()),
            0x5 => SkipRegEq(x, y),
            0x6 => Load(x, op.kk()),
            0x7 => Add(x, op.kk()),
            0x8 => match op.n() {
                0x0 => Move(x, y),
                0x1 => Or(x, y),
                0x2 => And(x, y),
                0x3 => Xor(x, y),
                0x4 => AddReg(x, y),
                0x5 => Sub(x, y),
                0x6 => ShiftRight(x),
                0x7 => SubN(x, y),
                0xE => ShiftLeft(x),
                _ => Unknown(op),
            },
            0x9 => SkipRegNe(x, y),
            0xA => LoadIndex(op.nnn()),
            0xB => JumpOffset(op.nnn()),
            0xC => Random(x, op.kk()),
            0xD => Draw(x, y, op.n()),
            0xE => match op.n() {
                0xE => SkipPressed(x),
                0x1 => SkipReleased(x),
                _ => Unknown(op),
            },
            0xF => match op.kk() {
                0x07 => ReadDelay(x),
                0x0A => WaitKey(x),
                0x15 => SetDelay(x),
                0x18 => SetSound(x),
                0x1E => AddIndex(x),
                0x29 => LoadGlyph(x),
                0x33 => StoreBcd(x),
                0x55 => StoreRegisters(x),
                0x65 => LoadRegisters(x),
                _ => Unknown(op),
            },
            // the family is a single nibble
            _ => Unknown(op),
        }
    }

    /// Runs the instruction against `state` and returns the state that follows it.
    ///
    /// `state.pc` must already point past this instruction.
    pub fn execute<R: RngCore>(self, state: &State, rng: &mut R) -> Result<State, Fault> {
        use Instruction::*;

        let next = match self {
            Clear => clr(state),
            Return => rts(state)?,
            Jump(nnn) => jump(state, nnn),
            Call(nnn) => call(state, nnn)?,
            SkipEq(x, kk) => ske(state, x, kk),
            SkipNe(x, kk) => skne(state, x, kk),
            SkipRegEq(x, y) => skre(state, x, y),
            Load(x, kk) => load(state, x, kk),
            Add(x, kk) => add(state, x, kk),
            Move(x, y) => mv(state, x, y),
            Or(x, y) => or(state, x, y),
            And(x, y) => and(state, x, y),
            Xor(x, y) => xor(state, x, y),
            AddReg(x, y) => addr(state, x, y),
            Sub(x, y) => sub(state, x, y),
            ShiftRight(x) => shr(state, x),
            SubN(x, y) => subn(state, x, y),
            ShiftLeft(x) => shl(state, x),
            SkipRegNe(x, y) => skrne(state, x, y),
            LoadIndex(nnn) => loadi(state, nnn),
            JumpOffset(nnn) => jumpi(state, nnn),
            Random(x, kk) => rand(state, x, kk, rng),
            Draw(x, y, n) => draw(state, x, y, n),
            SkipPressed(x) => skpr(state, x),
            SkipReleased(x) => skup(state, x),
            ReadDelay(x) => moved(state, x),
            WaitKey(x) => keyd(state, x),
            SetDelay(x) => loads(state, x),
            SetSound(x) => ld(state, x),
            AddIndex(x) => addi(state, x),
            LoadGlyph(x) => ldspr(state, x),
            StoreBcd(x) => bcd(state, x),
            StoreRegisters(x) => stor(state, x),
            LoadRegisters(x) => read(state, x),
            Unknown(op) => {
                log::debug!("ignoring unassigned opcode {:04X}", op);
                *state
            }
        };
        Ok(next)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(nnn) => write!(f, "JP {:03X}", nnn),
            Call(nnn) => write!(f, "CALL {:03X}", nnn),
            SkipEq(x, kk) => write!(f, "SE V{:X}, {:02X}", x, kk),
            SkipNe(x, kk) => write!(f, "SNE V{:X}, {:02X}", x, kk),
            SkipRegEq(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            Load(x, kk) => write!(f, "LD V{:X}, {:02X}", x, kk),
            Add(x, kk) => write!(f, "ADD V{:X}, {:02X}", x, kk),
            Move(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(x) => write!(f, "SHR V{:X}", x),
            SubN(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(x) => write!(f, "SHL V{:X}", x),
            SkipRegNe(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(nnn) => write!(f, "LD I, {:03X}", nnn),
            JumpOffset(nnn) => write!(f, "JP V0, {:03X}", nnn),
            Random(x, kk) => write!(f, "RND V{:X}, {:02X}", x, kk),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {:X}", x, y, n),
            SkipPressed(x) => write!(f, "SKP V{:X}", x),
            SkipReleased(x) => write!(f, "SKNP V{:X}", x),
            ReadDelay(x) => write!(f, "LD V{:X}, DT", x),
            WaitKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            SetSound(x) => write!(f, "LD ST, V{:X}", x),
            AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            LoadGlyph(x) => write!(f, "LD F, V{:X}", x),
            StoreBcd(x) => write!(f, "LD B, V{:X}", x),
            StoreRegisters(x) => write!(f, "LD [I], V{:X}", x),
            LoadRegisters(x) => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "??? {:04X}", op),
        }
    }
}
