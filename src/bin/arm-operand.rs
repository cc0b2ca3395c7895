use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use arm_operand::shift::{try_decode_imm_shift, try_decode_reg_shift};
use arm_operand::{
    arm_expand_imm_c, bad_reg, thumb_expand_imm_c, thumb_imm12, thumb_imm_scaled, try_shift_c,
    ShiftResult, ShiftType,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Decode ARM/Thumb shifter and immediate operands", long_about = None)]
struct Cli {
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the barrel shifter on a value
    Shift {
        /// Operand value (hex or dec)
        #[arg(value_parser = parse_u32)]
        value: u32,
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Shift amount (hex or dec)
        #[arg(long, value_parser = parse_u32, default_value = "0")]
        amount: u32,
        /// Carry flag before the shift
        #[arg(long)]
        carry: bool,
    },
    /// Decode an immediate shift from its type and imm5 fields
    ImmShift {
        #[arg(value_parser = parse_u32)]
        ty: u32,
        #[arg(value_parser = parse_u32)]
        imm5: u32,
    },
    /// Decode a register shift from its type field
    RegShift {
        #[arg(value_parser = parse_u32)]
        ty: u32,
    },
    /// Expand an A32 modified immediate (rotate:imm8)
    ArmImm {
        #[arg(value_parser = parse_u32)]
        imm12: u32,
        #[arg(long)]
        carry: bool,
    },
    /// Expand the modified immediate of a T32 instruction word
    ThumbImm {
        #[arg(value_parser = parse_u32)]
        word: u32,
        #[arg(long)]
        carry: bool,
    },
    /// Extract the plain i:imm3:imm8 immediate of a T32 instruction word
    ThumbImm12 {
        #[arg(value_parser = parse_u32)]
        word: u32,
    },
    /// Extract imm7 scaled by 4 from a T32 instruction word
    ThumbImmScaled {
        #[arg(value_parser = parse_u32)]
        word: u32,
    },
    /// Check whether a register number is SP or PC
    BadReg {
        #[arg(value_parser = parse_u32)]
        reg: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg { Lsl, Lsr, Asr, Ror, Rrx }

impl From<KindArg> for ShiftType {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Lsl => ShiftType::Lsl,
            KindArg::Lsr => ShiftType::Lsr,
            KindArg::Asr => ShiftType::Asr,
            KindArg::Ror => ShiftType::Ror,
            KindArg::Rrx => ShiftType::Rrx,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum Report {
    Carry(ShiftResult),
    Value { value: u32 },
    Shift { kind: ShiftType, amount: Option<u32>, text: String },
    Flag { bad: bool },
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

fn run(cmd: Command) -> Result<Report> {
    let report = match cmd {
        Command::Shift { value, kind, amount, carry } => {
            let kind = ShiftType::from(kind);
            debug!(value, %kind, amount, carry, "shift");
            let res = try_shift_c(value, kind, amount, carry)
                .with_context(|| format!("cannot apply {kind} #{amount}"))?;
            Report::Carry(res)
        }
        Command::ImmShift { ty, imm5 } => {
            anyhow::ensure!(imm5 < 32, "imm5 {imm5} does not fit in 5 bits");
            debug!(ty, imm5, "decode immediate shift");
            let s = try_decode_imm_shift(ty, imm5)?;
            Report::Shift { kind: s.kind, amount: Some(s.amount), text: s.to_string() }
        }
        Command::RegShift { ty } => {
            debug!(ty, "decode register shift");
            let kind = try_decode_reg_shift(ty)?;
            Report::Shift { kind, amount: None, text: kind.to_string() }
        }
        Command::ArmImm { imm12, carry } => {
            anyhow::ensure!(imm12 <= 0xFFF, "imm12 {imm12:#x} does not fit in 12 bits");
            debug!(imm12, carry, "expand A32 immediate");
            Report::Carry(arm_expand_imm_c(imm12, carry))
        }
        Command::ThumbImm { word, carry } => {
            debug!(word, carry, "expand T32 immediate");
            Report::Carry(thumb_expand_imm_c(word, carry))
        }
        Command::ThumbImm12 { word } => Report::Value { value: thumb_imm12(word) },
        Command::ThumbImmScaled { word } => Report::Value { value: thumb_imm_scaled(word) },
        Command::BadReg { reg } => {
            anyhow::ensure!(reg < 16, "register number {reg} out of range");
            Report::Flag { bad: bad_reg(reg) }
        }
    };
    Ok(report)
}

fn render_text(report: &Report) -> String {
    match report {
        Report::Carry(r) => format!("value: {:#010x}\ncarry: {}", r.value, r.carry as u8),
        Report::Value { value } => format!("value: {value:#010x}"),
        Report::Shift { text, .. } => text.clone(),
        Report::Flag { bad } => format!("bad: {bad}"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let report = run(cli.cmd)?;
    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => println!("{}", render_text(&report)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u32_hex_and_dec() {
        assert_eq!(parse_u32("0x10").unwrap(), 16);
        assert_eq!(parse_u32("0XfF").unwrap(), 255);
        assert_eq!(parse_u32(" 42 ").unwrap(), 42);
        assert!(parse_u32("0xzz").is_err());
    }

    #[test]
    fn cli_shift_reports_carry() {
        let cli = Cli::try_parse_from(["arm-operand", "shift", "0x1", "--kind", "rrx", "--amount", "1", "--carry"]).unwrap();
        let text = render_text(&run(cli.cmd).unwrap());
        assert_eq!(text, "value: 0x80000000\ncarry: 1");
    }

    #[test]
    fn cli_rejects_bad_amount_without_panicking() {
        let cli = Cli::try_parse_from(["arm-operand", "shift", "1", "--kind", "lsl", "--amount", "32"]).unwrap();
        assert!(run(cli.cmd).is_err());
    }

    #[test]
    fn cli_json_shift_decode() {
        let cli = Cli::try_parse_from(["arm-operand", "--format", "json", "imm-shift", "1", "0"]).unwrap();
        let json = serde_json::to_value(run(cli.cmd).unwrap()).unwrap();
        assert_eq!(json["kind"], "lsr");
        assert_eq!(json["amount"], 32);
        assert_eq!(json["text"], "lsr #32");
    }

    #[test]
    fn cli_arm_imm_text() {
        let cli = Cli::try_parse_from(["arm-operand", "arm-imm", "0x4FF"]).unwrap();
        assert_eq!(render_text(&run(cli.cmd).unwrap()), "value: 0xff000000\ncarry: 1");
    }
}
