//! Shift-type decoding and the barrel shifter.
//!
//! Every carry-producing primitive returns a [`ShiftResult`]; the carry-out
//! is never folded into the value or left for the caller to recompute,
//! since each shift kind takes it from a different bit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bits::{bit32_set, bits32, unsigned_bits64};
use crate::error::{contract_violation, OperandError};

/// Shift applied to a register operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    /// Logical shift left.
    Lsl,
    /// Logical shift right.
    Lsr,
    /// Arithmetic shift right.
    Asr,
    /// Rotate right.
    Ror,
    /// Rotate right by one through the carry flag.
    Rrx,
}

impl ShiftType {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            ShiftType::Lsl => "lsl",
            ShiftType::Lsr => "lsr",
            ShiftType::Asr => "asr",
            ShiftType::Ror => "ror",
            ShiftType::Rrx => "rrx",
        }
    }

    /// Maps the 2-bit `type` field of a register-shifted operand.
    /// Register-specified shifts never select `Rrx`.
    pub fn from_reg_code(code: u32) -> Result<Self, OperandError> {
        match code {
            0 => Ok(ShiftType::Lsl),
            1 => Ok(ShiftType::Lsr),
            2 => Ok(ShiftType::Asr),
            3 => Ok(ShiftType::Ror),
            _ => Err(OperandError::InvalidShiftType { code }),
        }
    }

    /// Maps the `type`/`imm5` pair of an immediate-shifted operand to its
    /// kind and effective amount.
    pub fn from_imm_code(code: u32, imm5: u32) -> Result<ImmShift, OperandError> {
        let (kind, amount) = match code {
            0 => (ShiftType::Lsl, imm5),
            // lsr/asr #32 is encoded as #0
            1 => (ShiftType::Lsr, if imm5 == 0 { 32 } else { imm5 }),
            2 => (ShiftType::Asr, if imm5 == 0 { 32 } else { imm5 }),
            3 if imm5 == 0 => (ShiftType::Rrx, 1),
            3 => (ShiftType::Ror, imm5),
            _ => return Err(OperandError::InvalidShiftType { code }),
        };
        Ok(ImmShift { kind, amount })
    }

    /// Inclusive range of amounts accepted by the carry-producing primitive.
    pub const fn amount_range(self) -> (u32, u32) {
        match self {
            ShiftType::Lsl | ShiftType::Ror => (1, 31),
            ShiftType::Lsr | ShiftType::Asr => (1, 32),
            ShiftType::Rrx => (1, 1),
        }
    }
}

impl TryFrom<u32> for ShiftType {
    type Error = OperandError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_reg_code(code)
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A decoded immediate shift: the kind plus its effective amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImmShift {
    pub kind: ShiftType,
    pub amount: u32,
}

impl fmt::Display for ImmShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ShiftType::Rrx => f.write_str("rrx"),
            kind => write!(f, "{kind} #{}", self.amount),
        }
    }
}

/// Value produced by the shifter together with the resulting carry flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftResult {
    pub value: u32,
    pub carry: bool,
}

impl ShiftResult {
    #[inline]
    pub const fn new(value: u32, carry: bool) -> Self {
        Self { value, carry }
    }
}

pub fn try_decode_imm_shift(code: u32, imm5: u32) -> Result<ImmShift, OperandError> {
    ShiftType::from_imm_code(code, imm5)
}

/// DecodeImmShift: panics if `code` is not a 2-bit value.
#[track_caller]
pub fn decode_imm_shift(code: u32, imm5: u32) -> ImmShift {
    match ShiftType::from_imm_code(code, imm5) {
        Ok(shift) => shift,
        Err(err) => contract_violation(err),
    }
}

/// Effective amount only, for callers that already know the kind.
#[track_caller]
pub fn decode_imm_shift_amount(code: u32, imm5: u32) -> u32 {
    decode_imm_shift(code, imm5).amount
}

pub fn try_decode_reg_shift(code: u32) -> Result<ShiftType, OperandError> {
    ShiftType::from_reg_code(code)
}

/// DecodeRegShift: panics if `code` is not a 2-bit value.
#[track_caller]
pub fn decode_reg_shift(code: u32) -> ShiftType {
    match ShiftType::from_reg_code(code) {
        Ok(kind) => kind,
        Err(err) => contract_violation(err),
    }
}

fn check_amount(kind: ShiftType, amount: u32) -> Result<(), OperandError> {
    let (lo, hi) = kind.amount_range();
    if amount < lo || amount > hi {
        return Err(match kind {
            ShiftType::Rrx => OperandError::RrxAmount { amount },
            kind => OperandError::AmountOutOfRange { kind, amount },
        });
    }
    Ok(())
}

#[inline]
#[track_caller]
fn require_amount(kind: ShiftType, amount: u32) {
    if let Err(err) = check_amount(kind, amount) {
        contract_violation(err);
    }
}

/// LSL_C, `1 <= amount < 32`.
#[inline]
#[track_caller]
pub fn lsl_c(value: u32, amount: u32) -> ShiftResult {
    require_amount(ShiftType::Lsl, amount);
    ShiftResult::new(value << amount, bit32_set(value, 32 - amount))
}

/// LSR_C, `1 <= amount <= 32`.
#[inline]
#[track_caller]
pub fn lsr_c(value: u32, amount: u32) -> ShiftResult {
    require_amount(ShiftType::Lsr, amount);
    let carry = bit32_set(value, amount - 1);
    // a shift by the full width clears the word
    ShiftResult::new(value.checked_shr(amount).unwrap_or(0), carry)
}

/// ASR_C, `1 <= amount <= 32`.
#[inline]
#[track_caller]
pub fn asr_c(value: u32, amount: u32) -> ShiftResult {
    require_amount(ShiftType::Asr, amount);
    let carry = bit32_set(value, amount - 1);
    let extended = value as i32 as i64 as u64;
    ShiftResult::new(unsigned_bits64(extended, amount + 31, amount), carry)
}

/// ROR_C, `1 <= amount < 32`. The carry is bit 31 of the rotated word.
#[inline]
#[track_caller]
pub fn ror_c(value: u32, amount: u32) -> ShiftResult {
    require_amount(ShiftType::Ror, amount);
    let result = value.rotate_right(amount);
    ShiftResult::new(result, bit32_set(result, 31))
}

/// RRX_C: `carry_in` enters at bit 31, bit 0 leaves as the carry.
#[inline]
pub fn rrx_c(value: u32, carry_in: bool) -> ShiftResult {
    let result = ((carry_in as u32) << 31) | bits32(value, 31, 1);
    ShiftResult::new(result, bit32_set(value, 0))
}

#[inline]
#[track_caller]
pub fn lsl(value: u32, amount: u32) -> u32 {
    if amount == 0 {
        return value;
    }
    lsl_c(value, amount).value
}

#[inline]
#[track_caller]
pub fn lsr(value: u32, amount: u32) -> u32 {
    if amount == 0 {
        return value;
    }
    lsr_c(value, amount).value
}

#[inline]
#[track_caller]
pub fn asr(value: u32, amount: u32) -> u32 {
    if amount == 0 {
        return value;
    }
    asr_c(value, amount).value
}

#[inline]
#[track_caller]
pub fn ror(value: u32, amount: u32) -> u32 {
    if amount == 0 {
        return value;
    }
    ror_c(value, amount).value
}

#[inline]
pub fn rrx(value: u32, carry_in: bool) -> u32 {
    rrx_c(value, carry_in).value
}

/// Shift_C without the panics: out-of-range amounts come back as errors.
pub fn try_shift_c(
    value: u32,
    kind: ShiftType,
    amount: u32,
    carry_in: bool,
) -> Result<ShiftResult, OperandError> {
    if amount == 0 {
        return Ok(ShiftResult::new(value, carry_in));
    }
    check_amount(kind, amount)?;
    Ok(dispatch(value, kind, amount, carry_in))
}

/// Shift_C.
///
/// A zero amount leaves both the value and the carry untouched, whatever
/// the kind. Otherwise `amount` must lie in [`ShiftType::amount_range`]
/// for `kind` (exactly 1 for `Rrx`); anything else panics.
#[track_caller]
pub fn shift_c(value: u32, kind: ShiftType, amount: u32, carry_in: bool) -> ShiftResult {
    match try_shift_c(value, kind, amount, carry_in) {
        Ok(res) => res,
        Err(err) => contract_violation(err),
    }
}

/// Shift: `shift_c` with the carry-out dropped.
#[track_caller]
pub fn shift(value: u32, kind: ShiftType, amount: u32, carry_in: bool) -> u32 {
    shift_c(value, kind, amount, carry_in).value
}

fn dispatch(value: u32, kind: ShiftType, amount: u32, carry_in: bool) -> ShiftResult {
    match kind {
        ShiftType::Lsl => lsl_c(value, amount),
        ShiftType::Lsr => lsr_c(value, amount),
        ShiftType::Asr => asr_c(value, amount),
        ShiftType::Ror => ror_c(value, amount),
        ShiftType::Rrx => rrx_c(value, carry_in),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asr_replicates_sign() {
        assert_eq!(asr(0x8000_0000, 4), 0xF800_0000);
        assert_eq!(asr(0x8000_0000, 32), 0xFFFF_FFFF);
        assert_eq!(asr(0x7FFF_FFFF, 32), 0);
    }

    #[test]
    fn amount_ranges_match_primitives() {
        assert!(check_amount(ShiftType::Lsl, 32).is_err());
        assert!(check_amount(ShiftType::Lsr, 32).is_ok());
        assert!(check_amount(ShiftType::Asr, 33).is_err());
        assert!(check_amount(ShiftType::Ror, 32).is_err());
        assert_eq!(
            check_amount(ShiftType::Rrx, 2),
            Err(OperandError::RrxAmount { amount: 2 })
        );
    }

    #[test]
    fn renders_imm_shift() {
        assert_eq!(decode_imm_shift(0, 3).to_string(), "lsl #3");
        assert_eq!(decode_imm_shift(2, 0).to_string(), "asr #32");
        assert_eq!(decode_imm_shift(3, 0).to_string(), "rrx");
    }
}
