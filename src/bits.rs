//! Bit-field extraction over instruction words.
//!
//! Positions are inclusive and counted from bit 0. A range with `msb < lsb`
//! or a position past the top of the word is a caller bug and panics.

use crate::error::{contract_violation, OperandError};

/// Returns `value[msb:lsb]`, right-aligned.
#[inline]
#[track_caller]
pub fn bits32(value: u32, msb: u32, lsb: u32) -> u32 {
    if msb >= 32 || lsb > msb {
        contract_violation(OperandError::InvalidBitRange { msb, lsb });
    }
    let width = msb - lsb + 1;
    let mask = if width == 32 { u32::MAX } else { (1u32 << width) - 1 };
    (value >> lsb) & mask
}

/// Returns `value[pos]` as 0 or 1.
#[inline]
#[track_caller]
pub fn bit32(value: u32, pos: u32) -> u32 {
    bits32(value, pos, pos)
}

/// `bit32` as a flag.
#[inline]
#[track_caller]
pub fn bit32_set(value: u32, pos: u32) -> bool {
    bit32(value, pos) == 1
}

/// Returns `value[msb:lsb]` from a 64-bit source, truncated to 32 bits.
///
/// The field may be at most 32 bits wide.
#[inline]
#[track_caller]
pub fn unsigned_bits64(value: u64, msb: u32, lsb: u32) -> u32 {
    if msb >= 64 || lsb > msb || msb - lsb >= 32 {
        contract_violation(OperandError::InvalidBitRange { msb, lsb });
    }
    let width = msb - lsb + 1;
    let mask = if width == 32 { u32::MAX as u64 } else { (1u64 << width) - 1 };
    ((value >> lsb) & mask) as u32
}

/// Sign-extends the low `width` bits of `value` to a full word.
#[inline]
pub fn sign_extend32(value: u32, width: u32) -> u32 {
    assert!((1..=32).contains(&width), "invalid sign-extension width {width}");
    let s = 32 - width;
    ((value << s) as i32 >> s) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fields() {
        assert_eq!(bits32(0xABCD_1234, 15, 8), 0x12);
        assert_eq!(bits32(0xABCD_1234, 31, 0), 0xABCD_1234);
        assert_eq!(bits32(0xABCD_1234, 31, 28), 0xA);
        assert_eq!(bit32(0x8000_0000, 31), 1);
        assert_eq!(bit32(0x8000_0000, 30), 0);
        assert!(bit32_set(0x4, 2));
    }

    #[test]
    fn extracts_from_64_bits() {
        let v = 0xFFFF_FFFF_8000_0000u64;
        assert_eq!(unsigned_bits64(v, 35, 4), 0xF800_0000);
        assert_eq!(unsigned_bits64(v, 63, 32), 0xFFFF_FFFF);
    }

    #[test]
    fn sign_extends() {
        assert_eq!(sign_extend32(0x80, 8), 0xFFFF_FF80);
        assert_eq!(sign_extend32(0x7F, 8), 0x7F);
        assert_eq!(sign_extend32(0x1234_5678, 32), 0x1234_5678);
    }

    #[test]
    #[should_panic(expected = "invalid bit range")]
    fn reversed_range_panics() {
        let _ = bits32(0, 3, 4);
    }

    #[test]
    #[should_panic(expected = "invalid bit range")]
    fn out_of_word_panics() {
        let _ = bit32(0, 32);
    }
}
