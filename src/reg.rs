/// Stack pointer.
pub const SP: u32 = 13;
/// Link register.
pub const LR: u32 = 14;
/// Program counter.
pub const PC: u32 = 15;

/// BadReg: true for SP and PC, which many T32 register fields may not name.
#[inline]
pub fn bad_reg(n: u32) -> bool {
    n == SP || n == PC
}
