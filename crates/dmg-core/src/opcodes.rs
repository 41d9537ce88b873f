//! Deterministic opcode classification and the immutable dispatch tables.
//!
//! Two disjoint 256-entry tables cover the instruction set: the base table,
//! and the extended table selected by the 0xCB escape byte. Both are built
//! once at compile time; any slot not assigned here is undefined by
//! definition.

use crate::registers::{Reg16, Reg8};

/// Escape byte selecting the extended opcode table.
pub const EXTENDED_OPCODE_PREFIX: u8 = 0xCB;

/// Bitwise operations on the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum LogicOp {
    And,
    Or,
    Xor,
}

/// Operand source for accumulator logic instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicSource {
    /// A named 8-bit register.
    Reg(Reg8),
    /// The byte addressed by `HL`.
    HlIndirect,
    /// The byte following the opcode.
    Immediate,
}

/// A register or `(HL)`-indirect operand location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand8 {
    /// A named 8-bit register.
    Reg(Reg8),
    /// The byte addressed by `HL`.
    HlIndirect,
}

/// Conditions over the flag register for conditional control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Condition {
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

/// One decoded instruction, tagged by family.
///
/// Instances never persist between steps; handlers receive a copy out of
/// the dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `NOP`.
    Nop,
    /// `LD r,d8` — register from the operand byte.
    LdRegImm(Reg8),
    /// `LD r,r'` — register copy; self-load is a legal no-op.
    LdRegReg {
        /// Destination register.
        dst: Reg8,
        /// Source register.
        src: Reg8,
    },
    /// `LD r,(HL)` — register from the byte addressed by `HL`.
    LdRegFromHl(Reg8),
    /// `LD (HL),r` — byte addressed by `HL` from a register.
    LdHlFromReg(Reg8),
    /// `LD (HL),d8` — byte addressed by `HL` from the operand byte.
    LdHlImm,
    /// `LD A,(BC)` / `LD A,(DE)` — accumulator through a pair pointer.
    LdAFromPair(Reg16),
    /// `LD (BC),A` / `LD (DE),A` — pair pointer target from the accumulator.
    LdPairFromA(Reg16),
    /// `LD rr,d16` — pair from the little-endian word operand.
    LdPairImm(Reg16),
    /// `LD SP,d16` — stack pointer from the little-endian word operand.
    LdSpImm,
    /// `LD SP,HL` — stack pointer from the pair, no memory access.
    LdSpHl,
    /// `AND/OR/XOR A` with a register, `(HL)`, or an immediate byte.
    Logic(LogicOp, LogicSource),
    /// 8-bit increment with wraparound.
    Inc(Operand8),
    /// `CPL` — accumulator complement.
    ComplementA,
    /// `CCF` — carry complement.
    ComplementCarry,
    /// `SCF` — set carry.
    SetCarry,
    /// `JP a16` — unconditional absolute jump.
    JumpAbsolute,
    /// `JR r8` / `JR cc,r8` — relative jump over a signed operand byte.
    JumpRelative(Option<Condition>),
    /// `CALL a16` — push the return address, jump to the word operand.
    Call,
    /// `BIT b,r` / `BIT b,(HL)` — single-bit test (extended table).
    BitTest {
        /// Bit position, 0..=7.
        bit: u8,
        /// Operand location.
        operand: Operand8,
    },
}

/// Decodes a 3-bit operand field; field value 6 selects `(HL)` and yields
/// `None`.
const fn reg_from_field(bits: u8) -> Option<Reg8> {
    match bits {
        0 => Some(Reg8::B),
        1 => Some(Reg8::C),
        2 => Some(Reg8::D),
        3 => Some(Reg8::E),
        4 => Some(Reg8::H),
        5 => Some(Reg8::L),
        7 => Some(Reg8::A),
        _ => None,
    }
}

const fn operand_from_field(bits: u8) -> Operand8 {
    match reg_from_field(bits) {
        Some(reg) => Operand8::Reg(reg),
        None => Operand8::HlIndirect,
    }
}

/// `0x40..=0x7F`: destination field in bits 5..3, source field in bits 2..0.
const fn decode_copy_grid(opcode: u8) -> Option<Instruction> {
    let dst = reg_from_field((opcode >> 3) & 0x07);
    let src = reg_from_field(opcode & 0x07);
    match (dst, src) {
        (Some(dst), Some(src)) => Some(Instruction::LdRegReg { dst, src }),
        (Some(dst), None) => Some(Instruction::LdRegFromHl(dst)),
        (None, Some(src)) => Some(Instruction::LdHlFromReg(src)),
        (None, None) => None,
    }
}

/// `0xA0..=0xB7`: operation selected by bits 5..3, operand by bits 2..0.
const fn decode_logic_grid(opcode: u8) -> Option<Instruction> {
    let op = match (opcode >> 3) & 0x07 {
        4 => LogicOp::And,
        5 => LogicOp::Xor,
        6 => LogicOp::Or,
        _ => return None,
    };
    let source = match reg_from_field(opcode & 0x07) {
        Some(reg) => LogicSource::Reg(reg),
        None => LogicSource::HlIndirect,
    };
    Some(Instruction::Logic(op, source))
}

/// Classifies a base-table opcode. `None` means undefined.
#[must_use]
pub const fn decode_base(opcode: u8) -> Option<Instruction> {
    // The copy grid has a hole at 0x76 (the HALT slot; interrupts are out
    // of scope for this core).
    if opcode == 0x76 {
        return None;
    }
    if matches!(opcode, 0x40..=0x7F) {
        return decode_copy_grid(opcode);
    }
    if matches!(opcode, 0xA0..=0xB7) {
        return decode_logic_grid(opcode);
    }

    match opcode {
        0x00 => Some(Instruction::Nop),
        0x01 => Some(Instruction::LdPairImm(Reg16::BC)),
        0x11 => Some(Instruction::LdPairImm(Reg16::DE)),
        0x21 => Some(Instruction::LdPairImm(Reg16::HL)),
        0x31 => Some(Instruction::LdSpImm),
        0x02 => Some(Instruction::LdPairFromA(Reg16::BC)),
        0x12 => Some(Instruction::LdPairFromA(Reg16::DE)),
        0x0A => Some(Instruction::LdAFromPair(Reg16::BC)),
        0x1A => Some(Instruction::LdAFromPair(Reg16::DE)),
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x3E => {
            match reg_from_field((opcode >> 3) & 0x07) {
                Some(reg) => Some(Instruction::LdRegImm(reg)),
                None => None,
            }
        }
        0x36 => Some(Instruction::LdHlImm),
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x3C => {
            match reg_from_field((opcode >> 3) & 0x07) {
                Some(reg) => Some(Instruction::Inc(Operand8::Reg(reg))),
                None => None,
            }
        }
        0x34 => Some(Instruction::Inc(Operand8::HlIndirect)),
        0x18 => Some(Instruction::JumpRelative(None)),
        0x20 => Some(Instruction::JumpRelative(Some(Condition::NotZero))),
        0x28 => Some(Instruction::JumpRelative(Some(Condition::Zero))),
        0x30 => Some(Instruction::JumpRelative(Some(Condition::NotCarry))),
        0x38 => Some(Instruction::JumpRelative(Some(Condition::Carry))),
        0x2F => Some(Instruction::ComplementA),
        0x37 => Some(Instruction::SetCarry),
        0x3F => Some(Instruction::ComplementCarry),
        0xE6 => Some(Instruction::Logic(LogicOp::And, LogicSource::Immediate)),
        0xEE => Some(Instruction::Logic(LogicOp::Xor, LogicSource::Immediate)),
        0xF6 => Some(Instruction::Logic(LogicOp::Or, LogicSource::Immediate)),
        0xC3 => Some(Instruction::JumpAbsolute),
        0xCD => Some(Instruction::Call),
        0xF9 => Some(Instruction::LdSpHl),
        _ => None,
    }
}

/// Classifies an extended-table opcode. `None` means undefined.
#[must_use]
pub const fn decode_extended(opcode: u8) -> Option<Instruction> {
    match opcode {
        0x40..=0x7F => Some(Instruction::BitTest {
            bit: (opcode >> 3) & 0x07,
            operand: operand_from_field(opcode & 0x07),
        }),
        _ => None,
    }
}

const fn build_base_table() -> [Option<Instruction>; 256] {
    let mut table = [None; 256];
    let mut opcode: usize = 0;
    while opcode < 256 {
        #[allow(clippy::cast_possible_truncation)]
        {
            table[opcode] = decode_base(opcode as u8);
        }
        opcode += 1;
    }
    table
}

const fn build_extended_table() -> [Option<Instruction>; 256] {
    let mut table = [None; 256];
    let mut opcode: usize = 0;
    while opcode < 256 {
        #[allow(clippy::cast_possible_truncation)]
        {
            table[opcode] = decode_extended(opcode as u8);
        }
        opcode += 1;
    }
    table
}

/// Immutable base dispatch table, built once at compile time.
pub static BASE_OPCODES: [Option<Instruction>; 256] = build_base_table();

/// Immutable extended (0xCB-prefixed) dispatch table, built once at compile
/// time.
pub static EXTENDED_OPCODES: [Option<Instruction>; 256] = build_extended_table();

/// Looks up an opcode in the base table.
#[must_use]
pub fn lookup_base(opcode: u8) -> Option<Instruction> {
    BASE_OPCODES[usize::from(opcode)]
}

/// Looks up an opcode in the extended table.
#[must_use]
pub fn lookup_extended(opcode: u8) -> Option<Instruction> {
    EXTENDED_OPCODES[usize::from(opcode)]
}
