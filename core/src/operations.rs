//! One handler per opcode.
//!
//! Every handler takes the state as it stood after the program counter was advanced past the
//! current instruction and returns the state that follows it. Handlers that write both a
//! destination register and VF write VF last, so the flag wins when Vx is VF.

use rand::{Rng, RngCore};

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, FONT_GLYPH_SIZE, FONT_START,
    PIXEL_OFF, PIXEL_ON,
};
use crate::error::Fault;
use crate::state::{pixel_index, State};

/// The address of the instruction that is executing; pc has already moved past it.
fn current_instruction(state: &State) -> u16 {
    state.pc.wrapping_sub(0x2) & ADDRESS_MASK
}

/// pc += 2 when `condition` holds
fn skip_if(state: &State, condition: bool) -> State {
    if condition {
        State {
            pc: state.pc.wrapping_add(0x2) & ADDRESS_MASK,
            ..*state
        }
    } else {
        *state
    }
}

/// Vx = value, then VF = flag
fn with_flag(state: &State, x: u8, value: u8, flag: bool) -> State {
    let mut v = state.v;
    v[x as usize] = value;
    v[FLAG_REGISTER] = u8::from(flag);
    State { v, ..*state }
}

/// clear
pub fn clr(state: &State) -> State {
    State {
        frame_buffer: [PIXEL_OFF; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    }
}

/// PC = STACK.pop()
pub fn rts(state: &State) -> Result<State, Fault> {
    let mut next = *state;
    next.pc = next.pop().ok_or(Fault::StackUnderflow {
        pc: current_instruction(state),
    })?;
    Ok(next)
}

/// PC = addr
pub fn jump(state: &State, addr: u16) -> State {
    State { pc: addr, ..*state }
}

/// STACK.push(PC); PC = addr
pub fn call(state: &State, addr: u16) -> Result<State, Fault> {
    let mut next = *state;
    next.push(state.pc).ok_or(Fault::StackOverflow {
        pc: current_instruction(state),
        target: addr,
    })?;
    next.pc = addr;
    Ok(next)
}

/// if Vx == kk then pc += 2
pub fn ske(state: &State, x: u8, kk: u8) -> State {
    skip_if(state, state.v[x as usize] == kk)
}

/// if Vx != kk then pc += 2
pub fn skne(state: &State, x: u8, kk: u8) -> State {
    skip_if(state, state.v[x as usize] != kk)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &State, x: u8, y: u8) -> State {
    skip_if(state, state.v[x as usize] == state.v[y as usize])
}

/// Vx = kk
pub fn load(state: &State, x: u8, kk: u8) -> State {
    let mut v = state.v;
    v[x as usize] = kk;
    State { v, ..*state }
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it, VF is untouched
pub fn add(state: &State, x: u8, kk: u8) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(kk);
    State { v, ..*state }
}

/// Vx = Vy
pub fn mv(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State { v, ..*state }
}

/// Vx |= Vy
pub fn or(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] |= v[y as usize];
    State { v, ..*state }
}

/// Vx &= Vy
pub fn and(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] &= v[y as usize];
    State { v, ..*state }
}

/// Vx ^= Vy
pub fn xor(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] ^= v[y as usize];
    State { v, ..*state }
}

/// Vx += Vy; VF = carry
pub fn addr(state: &State, x: u8, y: u8) -> State {
    let (res, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    with_flag(state, x, res, carry)
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &State, x: u8, y: u8) -> State {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    with_flag(state, x, vx.wrapping_sub(vy), vx > vy)
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(state: &State, x: u8) -> State {
    let vx = state.v[x as usize];
    with_flag(state, x, vx >> 1, vx & 0x1 == 0x1)
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &State, x: u8, y: u8) -> State {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    with_flag(state, x, vy.wrapping_sub(vx), vy > vx)
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(state: &State, x: u8) -> State {
    let vx = state.v[x as usize];
    with_flag(state, x, vx << 1, vx & 0x80 == 0x80)
}

/// if Vx != Vy then pc +=2
pub fn skrne(state: &State, x: u8, y: u8) -> State {
    skip_if(state, state.v[x as usize] != state.v[y as usize])
}

/// I = addr
pub fn loadi(state: &State, addr: u16) -> State {
    State { i: addr, ..*state }
}

/// PC = V0 + addr
pub fn jumpi(state: &State, addr: u16) -> State {
    State {
        pc: (u16::from(state.v[0x0]) + addr) & ADDRESS_MASK,
        ..*state
    }
}

/// Vx = rand_byte & kk
pub fn rand<R: RngCore>(state: &State, x: u8, kk: u8, rng: &mut R) -> State {
    let rand_byte: u8 = rng.gen();
    let mut v = state.v;
    v[x as usize] = rand_byte & kk;
    State { v, ..*state }
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position Vx, Vy on the FrameBuffer.
/// The origin and every pixel past the right or bottom edge wrap around the screen.
/// Sets VF if any lit pixel is erased.
pub fn draw(state: &State, x: u8, y: u8, n: u8) -> State {
    let mut next = *state;
    let origin_x = state.v[x as usize] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[y as usize] as usize % DISPLAY_HEIGHT;

    // Reset the flag (used for collision detection)
    next.v[FLAG_REGISTER] = 0x0;

    for row in 0..n {
        let sprite = state.read_byte(state.i.wrapping_add(u16::from(row)));
        for bit in 0..8 {
            if sprite & (0x80 >> bit) == 0 {
                continue;
            }
            let cell = &mut next.frame_buffer[pixel_index(origin_x + bit, origin_y + row as usize)];
            if *cell == PIXEL_ON {
                next.v[FLAG_REGISTER] = 0x1;
            }
            *cell ^= PIXEL_ON;
        }
    }

    next.draw_flag = true;
    next
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &State, x: u8) -> State {
    skip_if(state, state.key_held(state.v[x as usize]))
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &State, x: u8) -> State {
    skip_if(state, !state.key_held(state.v[x as usize]))
}

/// Vx = DT
pub fn moved(state: &State, x: u8) -> State {
    let mut v = state.v;
    v[x as usize] = state.delay_timer;
    State { v, ..*state }
}

/// Vx = first held key, else run this instruction again next cycle
pub fn keyd(state: &State, x: u8) -> State {
    match state.keys.iter().position(|&held| held) {
        Some(key) => {
            let mut v = state.v;
            v[x as usize] = key as u8;
            State { v, ..*state }
        }
        None => State {
            pc: current_instruction(state),
            ..*state
        },
    }
}

/// DT = Vx
pub fn loads(state: &State, x: u8) -> State {
    State {
        delay_timer: state.v[x as usize],
        ..*state
    }
}

/// ST = Vx
pub fn ld(state: &State, x: u8) -> State {
    State {
        sound_timer: state.v[x as usize],
        ..*state
    }
}

/// I += Vx
pub fn addi(state: &State, x: u8) -> State {
    State {
        i: state.i.wrapping_add(u16::from(state.v[x as usize])) & ADDRESS_MASK,
        ..*state
    }
}

/// I = address of the font glyph for the low nibble of Vx
pub fn ldspr(state: &State, x: u8) -> State {
    let digit = u16::from(state.v[x as usize] & 0xF);
    State {
        i: FONT_START + digit * FONT_GLYPH_SIZE,
        ..*state
    }
}

/// mem[I..I+3] = bcd(Vx)
/// Store the decimal digits of Vx in memory starting at address I, hundreds first
pub fn bcd(state: &State, x: u8) -> State {
    let vx = state.v[x as usize];
    let mut next = *state;
    for (offset, digit) in [vx / 100, vx / 10 % 10, vx % 10].iter().enumerate() {
        next.write_byte(state.i.wrapping_add(offset as u16), *digit);
    }
    next
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &State, x: u8) -> State {
    let mut next = *state;
    for r in 0..=x {
        next.write_byte(state.i.wrapping_add(u16::from(r)), state.v[r as usize]);
    }
    next
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &State, x: u8) -> State {
    let mut v = state.v;
    for r in 0..=x {
        v[r as usize] = state.read_byte(state.i.wrapping_add(u16::from(r)));
    }
    State { v, ..*state }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FONT_SET, PROGRAM_START};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A fresh state as a handler sees it: pc already moved past the instruction at 0x200.
    fn advanced() -> State {
        State {
            pc: PROGRAM_START + 0x2,
            ..State::new()
        }
    }

    fn lit(state: &State) -> usize {
        state.frame_buffer.iter().filter(|&&cell| cell == PIXEL_ON).count()
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = advanced();
        state.frame_buffer[0] = PIXEL_ON;
        state.frame_buffer[2047] = PIXEL_ON;
        let state = clr(&state);
        assert_eq!(lit(&state), 0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = advanced();
        state.sp = 0x1;
        state.stack[0x0] = 0x0ABC;
        let state = rts(&state).unwrap();
        assert_eq!(state.sp, 0x0);
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_00ee_ret_underflows() {
        let state = advanced();
        assert_eq!(
            rts(&state).err(),
            Some(Fault::StackUnderflow { pc: PROGRAM_START })
        );
    }

    #[test]
    fn test_1nnn_jp() {
        let state = jump(&advanced(), 0x0ABC);
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let state = call(&advanced(), 0x0123).unwrap();
        assert_eq!(state.sp, 0x1);
        assert_eq!(state.stack[0x0], 0x0202);
        assert_eq!(state.pc, 0x0123);
    }

    #[test]
    fn test_2nnn_call_overflows() {
        let mut state = advanced();
        state.sp = 16;
        assert_eq!(
            call(&state, 0x0300).err(),
            Some(Fault::StackOverflow {
                pc: PROGRAM_START,
                target: 0x0300
            })
        );
    }

    #[test]
    fn test_3xkk_se_skips() {
        let mut state = advanced();
        state.v[0x1] = 0x11;
        assert_eq!(ske(&state, 0x1, 0x11).pc, 0x0204);
    }

    #[test]
    fn test_3xkk_se_doesntskip() {
        assert_eq!(ske(&advanced(), 0x1, 0x11).pc, 0x0202);
    }

    #[test]
    fn test_4xkk_sne_skips() {
        assert_eq!(skne(&advanced(), 0x1, 0x11).pc, 0x0204);
    }

    #[test]
    fn test_4xkk_sne_doesntskip() {
        let mut state = advanced();
        state.v[0x1] = 0x11;
        assert_eq!(skne(&state, 0x1, 0x11).pc, 0x0202);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut state = advanced();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        assert_eq!(skre(&state, 0x1, 0x2).pc, 0x0204);
    }

    #[test]
    fn test_5xy0_se_doesntskip() {
        let mut state = advanced();
        state.v[0x1] = 0x11;
        assert_eq!(skre(&state, 0x1, 0x2).pc, 0x0202);
    }

    #[test]
    fn test_6xkk_ld() {
        let state = load(&advanced(), 0x1, 0x22);
        assert_eq!(state.v[0x1], 0x22);
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut state = advanced();
        state.v[0x1] = 0xFF;
        state.v[0xF] = 0x7;
        let state = add(&state, 0x1, 0x02);
        assert_eq!(state.v[0x1], 0x01);
        assert_eq!(state.v[0xF], 0x7);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = advanced();
        state.v[0x2] = 0x1;
        assert_eq!(mv(&state, 0x1, 0x2).v[0x1], 0x1);
    }

    #[test]
    fn test_8xy1_8xy2_8xy3_bitwise() {
        let mut state = advanced();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        assert_eq!(or(&state, 0x1, 0x2).v[0x1], 0x7);
        assert_eq!(and(&state, 0x1, 0x2).v[0x1], 0x2);
        assert_eq!(xor(&state, 0x1, 0x2).v[0x1], 0x5);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = advanced();
        state.v[0x1] = 200;
        state.v[0x2] = 100;
        let state = addr(&state, 0x1, 0x2);
        assert_eq!(state.v[0x1], 44);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut state = advanced();
        state.v[0x1] = 10;
        state.v[0x2] = 20;
        let state = addr(&state, 0x1, 0x2);
        assert_eq!(state.v[0x1], 30);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy4_flag_overwrites_vf_destination() {
        let mut state = advanced();
        state.v[0xF] = 0xFF;
        state.v[0x1] = 0x01;
        let state = addr(&state, 0xF, 0x1);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut state = advanced();
        state.v[0x1] = 5;
        state.v[0x2] = 10;
        let state = sub(&state, 0x1, 0x2);
        assert_eq!(state.v[0x1], 251);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy5_sub_noborrow() {
        let mut state = advanced();
        state.v[0x1] = 10;
        state.v[0x2] = 5;
        let state = sub(&state, 0x1, 0x2);
        assert_eq!(state.v[0x1], 5);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_equal_clears_flag() {
        let mut state = advanced();
        state.v[0x1] = 7;
        state.v[0x2] = 7;
        let state = sub(&state, 0x1, 0x2);
        assert_eq!(state.v[0x1], 0);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy6_shr() {
        let mut state = advanced();
        state.v[0x1] = 0b0000_0011;
        let shifted = shr(&state, 0x1);
        assert_eq!(shifted.v[0x1], 0b0000_0001);
        assert_eq!(shifted.v[0xF], 0x1);

        state.v[0x1] = 0b0000_0010;
        let shifted = shr(&state, 0x1);
        assert_eq!(shifted.v[0x1], 0b0000_0001);
        assert_eq!(shifted.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy7_subn() {
        let mut state = advanced();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x33;
        let state = subn(&state, 0x1, 0x2);
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy7_subn_borrow() {
        let mut state = advanced();
        state.v[0x1] = 0x12;
        state.v[0x2] = 0x11;
        let state = subn(&state, 0x1, 0x2);
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl() {
        let mut state = advanced();
        state.v[0x1] = 0xFF;
        let shifted = shl(&state, 0x1);
        assert_eq!(shifted.v[0x1], 0xFE);
        assert_eq!(shifted.v[0xF], 0x1);

        state.v[0x1] = 0x4;
        let shifted = shl(&state, 0x1);
        assert_eq!(shifted.v[0x1], 0x8);
        assert_eq!(shifted.v[0xF], 0x0);
    }

    #[test]
    fn test_9xy0_sne() {
        let mut state = advanced();
        state.v[0x1] = 0x11;
        assert_eq!(skrne(&state, 0x1, 0x2).pc, 0x0204);
        state.v[0x2] = 0x11;
        assert_eq!(skrne(&state, 0x1, 0x2).pc, 0x0202);
    }

    #[test]
    fn test_annn_ld() {
        assert_eq!(loadi(&advanced(), 0x0ABC).i, 0x0ABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = advanced();
        state.v[0x0] = 0x2;
        assert_eq!(jumpi(&state, 0x0ABC).pc, 0x0ABE);
    }

    #[test]
    fn test_bnnn_jp_wraps() {
        let mut state = advanced();
        state.v[0x0] = 0x10;
        assert_eq!(jumpi(&state, 0x0FF8).pc, 0x0008);
    }

    #[test]
    fn test_cxkk_rnd_masks() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..64 {
            let state = rand(&advanced(), 0x1, 0x0F, &mut rng);
            assert_eq!(state.v[0x1] & 0xF0, 0x0);
        }
        let state = rand(&advanced(), 0x1, 0x00, &mut rng);
        assert_eq!(state.v[0x1], 0x0);
    }

    #[test]
    fn test_cxkk_rnd_is_seeded() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..8 {
            assert_eq!(
                rand(&advanced(), 0x1, 0xFF, &mut a).v[0x1],
                rand(&advanced(), 0x1, 0xFF, &mut b).v[0x1]
            );
        }
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = advanced();
        state.v[0x0] = 0x1;
        state.i = FONT_START;
        // Draw the 0 glyph with a 1x 1y offset
        let state = draw(&state, 0x0, 0x0, 5);
        let rows = [0xF0u8, 0x90, 0x90, 0x90, 0xF0];
        for (dy, row) in rows.iter().enumerate() {
            for dx in 0..8 {
                let expected = row & (0x80 >> dx) != 0;
                assert_eq!(state.pixel(1 + dx, 1 + dy), expected);
            }
        }
        assert_eq!(lit(&state), 14);
        assert_eq!(state.v[0xF], 0x0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_dxyn_drw_collides() {
        let mut state = advanced();
        state.frame_buffer[0] = PIXEL_ON;
        state.i = FONT_START;
        let state = draw(&state, 0x0, 0x0, 1);
        assert_eq!(state.v[0xF], 0x1);
        assert!(!state.pixel(0, 0));
    }

    #[test]
    fn test_dxyn_drw_xors() {
        let mut state = advanced();
        // 0 1 0 1 -> Set
        state.frame_buffer[2..6].copy_from_slice(&[PIXEL_OFF, PIXEL_ON, PIXEL_OFF, PIXEL_ON]);
        state.memory[0x300] = 0b1100_0000;
        state.i = 0x300;
        state.v[0x0] = 2;
        // 1 1 0 0 -> Draw xor
        let state = draw(&state, 0x0, 0x1, 1);
        assert_eq!(
            state.frame_buffer[2..6],
            [PIXEL_ON, PIXEL_OFF, PIXEL_OFF, PIXEL_ON]
        );
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_dxyn_drw_twice_restores() {
        let mut state = advanced();
        state.v[0x1] = 10;
        state.v[0x2] = 12;
        state.i = FONT_START + 5 * 0xA;
        let before = state.frame_buffer;
        let once = draw(&state, 0x1, 0x2, 5);
        let twice = draw(&once, 0x1, 0x2, 5);
        assert_eq!(twice.frame_buffer[..], before[..]);
        assert_eq!(twice.v[0xF], 0x1);
        let thrice = draw(&twice, 0x1, 0x2, 5);
        assert_eq!(thrice.frame_buffer[..], once.frame_buffer[..]);
        assert_eq!(thrice.v[0xF], 0x0);
    }

    #[test]
    fn test_dxyn_drw_wraps_origin() {
        let mut state = advanced();
        state.v[0x0] = 64 + 3;
        state.v[0x1] = 32 + 4;
        state.memory[0x300] = 0x80;
        state.i = 0x300;
        let state = draw(&state, 0x0, 0x1, 1);
        assert!(state.pixel(3, 4));
        assert_eq!(lit(&state), 1);
    }

    #[test]
    fn test_dxyn_drw_wraps_pixels_past_edges() {
        let mut state = advanced();
        state.v[0x0] = 62;
        state.v[0x1] = 31;
        state.memory[0x300..0x302].copy_from_slice(&[0xF0, 0x80]);
        state.i = 0x300;
        let state = draw(&state, 0x0, 0x1, 2);
        assert!(state.pixel(62, 31));
        assert!(state.pixel(63, 31));
        assert!(state.pixel(0, 31));
        assert!(state.pixel(1, 31));
        assert!(state.pixel(62, 0));
        assert_eq!(lit(&state), 5);
    }

    #[test]
    fn test_dxyn_drw_reads_sprite_past_end_of_memory() {
        let mut state = advanced();
        state.memory[0xFFF] = 0x80;
        state.memory[0x000] = 0x80;
        state.i = 0xFFF;
        let state = draw(&state, 0x0, 0x0, 2);
        assert!(state.pixel(0, 0));
        assert!(state.pixel(0, 1));
    }

    #[test]
    fn test_dxyn_drw_vf_origin_read_before_reset() {
        let mut state = advanced();
        state.v[0xF] = 5;
        state.memory[0x300] = 0x80;
        state.i = 0x300;
        let state = draw(&state, 0xF, 0xF, 1);
        assert!(state.pixel(5, 5));
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_ex9e_skp() {
        let mut state = advanced();
        state.v[0x1] = 0xE;
        assert_eq!(skpr(&state, 0x1).pc, 0x0202);
        state.keys[0xE] = true;
        assert_eq!(skpr(&state, 0x1).pc, 0x0204);
    }

    #[test]
    fn test_exa1_sknp() {
        let mut state = advanced();
        state.v[0x1] = 0xE;
        assert_eq!(skup(&state, 0x1).pc, 0x0204);
        state.keys[0xE] = true;
        assert_eq!(skup(&state, 0x1).pc, 0x0202);
    }

    #[test]
    fn test_ex9e_skp_uses_low_nibble() {
        let mut state = advanced();
        state.v[0x1] = 0x13;
        state.keys[0x3] = true;
        assert_eq!(skpr(&state, 0x1).pc, 0x0204);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = advanced();
        state.delay_timer = 0xF;
        assert_eq!(moved(&state, 0x1).v[0x1], 0xF);
    }

    #[test]
    fn test_fx0a_ld_waits_without_key() {
        let state = keyd(&advanced(), 0x1);
        assert_eq!(state.pc, PROGRAM_START);
        assert_eq!(state.v[0x1], 0x0);
    }

    #[test]
    fn test_fx0a_ld_takes_lowest_held_key() {
        let mut state = advanced();
        state.keys[0x9] = true;
        state.keys[0x4] = true;
        let state = keyd(&state, 0x1);
        assert_eq!(state.pc, 0x0202);
        assert_eq!(state.v[0x1], 0x4);
    }

    #[test]
    fn test_fx15_fx18_ld() {
        let mut state = advanced();
        state.v[0x1] = 0xF;
        assert_eq!(loads(&state, 0x1).delay_timer, 0xF);
        assert_eq!(ld(&state, 0x1).sound_timer, 0xF);
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = advanced();
        state.i = 0x1;
        state.v[0x1] = 0x1;
        assert_eq!(addi(&state, 0x1).i, 0x2);
    }

    #[test]
    fn test_fx1e_add_wraps() {
        let mut state = advanced();
        state.i = 0xFFE;
        state.v[0x1] = 0x4;
        assert_eq!(addi(&state, 0x1).i, 0x002);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = advanced();
        state.v[0x1] = 0x2;
        let state = ldspr(&state, 0x1);
        assert_eq!(state.i, 0x5A);
        assert_eq!(state.memory[0x5A..0x5F], FONT_SET[10..15]);
    }

    #[test]
    fn test_fx29_ld_uses_low_nibble() {
        let mut state = advanced();
        state.v[0x1] = 0x1F;
        assert_eq!(ldspr(&state, 0x1).i, FONT_START + 5 * 0xF);
    }

    #[test]
    fn test_fx33_ld() {
        let mut state = advanced();
        state.v[0x1] = 156;
        state.i = 0x300;
        let state = bcd(&state, 0x1);
        assert_eq!(state.memory[0x300..0x303], [1, 5, 6]);
    }

    #[test]
    fn test_fx33_ld_wraps() {
        let mut state = advanced();
        state.v[0x1] = 255;
        state.i = 0xFFE;
        let state = bcd(&state, 0x1);
        assert_eq!(state.memory[0xFFE..], [2, 5]);
        assert_eq!(state.memory[0x000], 5);
    }

    #[test]
    fn test_fx55_ld() {
        let mut state = advanced();
        state.i = 0x300;
        state.v[0x0..0x6].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5, 0x6]);
        let state = stor(&state, 0x4);
        assert_eq!(state.memory[0x300..0x306], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx55_ld_wraps() {
        let mut state = advanced();
        state.i = 0xFFF;
        state.v[0x0..0x2].copy_from_slice(&[0xAA, 0xBB]);
        let state = stor(&state, 0x1);
        assert_eq!(state.memory[0xFFF], 0xAA);
        assert_eq!(state.memory[0x000], 0xBB);
    }

    #[test]
    fn test_fx65_ld() {
        let mut state = advanced();
        state.i = 0x300;
        state.memory[0x300..0x305].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        let state = read(&state, 0x3);
        assert_eq!(state.v[0x0..0x5], [0x1, 0x2, 0x3, 0x4, 0x0]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx65_ld_wraps() {
        let mut state = advanced();
        state.i = 0xFFF;
        state.memory[0xFFF] = 0xAA;
        state.memory[0x000] = 0xBB;
        let state = read(&state, 0x1);
        assert_eq!(state.v[0x0..0x2], [0xAA, 0xBB]);
    }
}
