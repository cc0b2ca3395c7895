//! Modified-immediate expansion for the A32 and T32 encodings.
//!
//! The carry-in never changes the constant. It only passes through to the
//! carry-out when the encoding applies no rotation.

use crate::bits::{bit32, bit32_set, bits32};
use crate::shift::ShiftResult;

/// ARMExpandImm_C over `imm12` (`rotate:imm8`, bits [11:0]).
///
/// The constant is `imm8` rotated right by twice the 4-bit rotate field.
/// Bits above 11 are ignored, so the whole instruction word may be passed.
pub fn arm_expand_imm_c(imm12: u32, carry_in: bool) -> ShiftResult {
    let imm8 = bits32(imm12, 7, 0);
    let amount = 2 * bits32(imm12, 11, 8);
    if amount == 0 {
        return ShiftResult::new(imm8, carry_in);
    }
    let value = imm8.rotate_right(amount);
    ShiftResult::new(value, bit32_set(value, 31))
}

pub fn arm_expand_imm(imm12: u32) -> u32 {
    arm_expand_imm_c(imm12, false).value
}

/// ThumbExpandImm_C over a 32-bit T32 instruction word.
///
/// Gathers `i:imm3:imm8` from bits 26, [14:12] and [7:0] and expands it
/// with [`thumb_expand_imm12_c`].
pub fn thumb_expand_imm_c(word: u32, carry_in: bool) -> ShiftResult {
    thumb_expand_imm12_c(thumb_imm12(word), carry_in)
}

pub fn thumb_expand_imm(word: u32) -> u32 {
    thumb_expand_imm_c(word, false).value
}

/// Expands an already assembled T32 `imm12`.
///
/// | imm12[11:10] | imm12[9:8] | constant                        |
/// |--------------|------------|---------------------------------|
/// | 00           | 00         | `000000XY`                      |
/// | 00           | 01         | `00XY00XY`                      |
/// | 00           | 10         | `XY00XY00`                      |
/// | 00           | 11         | `XYXYXYXY`                      |
/// | otherwise    | -          | `1:imm12[6:0]` ror `imm12[11:7]` |
pub fn thumb_expand_imm12_c(imm12: u32, carry_in: bool) -> ShiftResult {
    let imm8 = bits32(imm12, 7, 0);
    if bits32(imm12, 11, 10) == 0 {
        let value = match bits32(imm12, 9, 8) {
            0 => imm8,
            1 => (imm8 << 16) | imm8,
            2 => (imm8 << 24) | (imm8 << 8),
            _ => (imm8 << 24) | (imm8 << 16) | (imm8 << 8) | imm8,
        };
        return ShiftResult::new(value, carry_in);
    }
    let unrotated = 0x80 | bits32(imm12, 6, 0);
    // imm12[11:10] != 0 puts the amount in 8..=31
    let value = unrotated.rotate_right(bits32(imm12, 11, 7));
    ShiftResult::new(value, bit32_set(value, 31))
}

/// `ZeroExtend(i:imm3:imm8, 32)` from a T32 instruction word.
pub fn thumb_imm12(word: u32) -> u32 {
    let i = bit32(word, 26);
    let imm3 = bits32(word, 14, 12);
    let imm8 = bits32(word, 7, 0);
    (i << 11) | (imm3 << 8) | imm8
}

/// `ZeroExtend(imm7:'00', 32)`: the low 7 bits scaled to a word offset.
pub fn thumb_imm_scaled(word: u32) -> u32 {
    bits32(word, 6, 0) * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_rotation_wraps_low_bits_to_top() {
        // 0x81 ror 2
        assert_eq!(arm_expand_imm(0x181), 0x4000_0020);
    }

    #[test]
    fn thumb_rotated_form_sets_top_bit_of_imm8() {
        // imm12 = 0x400: amount 8, unrotated 0x80
        assert_eq!(thumb_expand_imm12_c(0x400, false), ShiftResult::new(0x8000_0000, true));
        // imm12 = 0xFFF: amount 31, unrotated 0xFF
        assert_eq!(thumb_expand_imm12_c(0xFFF, false), ShiftResult::new(0x1FE, false));
    }
}
