use crate::shift::ShiftType;

/// Operand fields that no valid encoding can produce.
///
/// The infallible decoders panic with these messages; the `try_*` entry
/// points hand them back instead.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandError {
    #[error("invalid shift type {code:#x} (expected 0..=3)")]
    InvalidShiftType { code: u32 },
    #[error("invalid bit range [{msb}:{lsb}]")]
    InvalidBitRange { msb: u32, lsb: u32 },
    #[error("rrx requires a shift amount of 1, got {amount}")]
    RrxAmount { amount: u32 },
    #[error("shift amount {amount} out of range for {kind}")]
    AmountOutOfRange { kind: ShiftType, amount: u32 },
}

/// Aborts on a caller bug. Valid encodings never get here.
#[cold]
#[track_caller]
pub(crate) fn contract_violation(err: OperandError) -> ! {
    panic!("{err}")
}
