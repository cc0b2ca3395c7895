use arm_operand::bad_reg;
use arm_operand::reg::{LR, PC, SP};

#[test]
fn sp_and_pc_are_bad() {
    assert!(bad_reg(13));
    assert!(bad_reg(15));
    assert!(bad_reg(SP));
    assert!(bad_reg(PC));
}

#[test]
fn general_registers_and_lr_are_allowed() {
    for n in 0..=12 {
        assert!(!bad_reg(n), "r{n}");
    }
    assert!(!bad_reg(14));
    assert!(!bad_reg(LR));
}
