pub mod bits;
pub mod error;
pub mod imm;
pub mod reg;
pub mod shift;

pub use error::OperandError;
pub use imm::{
    arm_expand_imm, arm_expand_imm_c, thumb_expand_imm, thumb_expand_imm12_c, thumb_expand_imm_c,
    thumb_imm12, thumb_imm_scaled,
};
pub use reg::bad_reg;
pub use shift::{
    decode_imm_shift, decode_reg_shift, shift, shift_c, try_shift_c, ImmShift, ShiftResult,
    ShiftType,
};
