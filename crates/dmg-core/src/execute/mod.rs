//! Fetch-decode-execute pipeline over the immutable dispatch tables.
//!
//! Each call to [`step_one`] performs one complete boundary-to-boundary
//! instruction: fetch (two bytes when 0xCB-prefixed), table lookup, handler
//! execution, cycle-cost report. No partial progress is retained across
//! calls.

mod flags;

use crate::fault::{OpcodeByte, UndefinedOpcode};
use crate::machine::{Machine, StepOutcome};
use crate::memory::Memory;
use crate::opcodes::{
    lookup_base, lookup_extended, Condition, Instruction, LogicOp, LogicSource, Operand8,
    EXTENDED_OPCODE_PREFIX,
};
use crate::registers::{Flag, Reg8, Reg16, Registers};
use crate::timing::{cycle_cost, CycleCostKind};

/// Executes exactly one instruction.
///
/// The program counter always advances past the fetched opcode bytes,
/// including on the undefined path; the [`UndefinedOpcode`] payload carries
/// the address the opcode was fetched from.
pub fn step_one(machine: &mut Machine) -> StepOutcome {
    let fetch_pc = machine.regs.pc();
    let opcode = fetch8(&mut machine.regs, &machine.memory);

    let (entry, fetched) = if opcode == EXTENDED_OPCODE_PREFIX {
        let extended = fetch8(&mut machine.regs, &machine.memory);
        (lookup_extended(extended), OpcodeByte::Extended(extended))
    } else {
        (lookup_base(opcode), OpcodeByte::Base(opcode))
    };

    match entry {
        Some(instr) => StepOutcome::Retired {
            cycles: execute_instruction(instr, &mut machine.regs, &mut machine.memory),
        },
        None => StepOutcome::Undefined(UndefinedOpcode {
            opcode: fetched,
            pc: fetch_pc,
        }),
    }
}

/// Reads the byte at `PC` and advances `PC` by one. The counter wraps; a
/// wrapped fetch is counter arithmetic, not an out-of-range access.
fn fetch8(regs: &mut Registers, memory: &Memory) -> u8 {
    let pc = regs.pc();
    let byte = memory.read8(pc);
    regs.set_pc(pc.wrapping_add(1));
    byte
}

/// Reads the little-endian word operand at `PC` and advances `PC` by two.
fn fetch_word(regs: &mut Registers, memory: &Memory) -> u16 {
    let low = fetch8(regs, memory);
    let high = fetch8(regs, memory);
    u16::from_le_bytes([low, high])
}

fn execute_instruction(instr: Instruction, regs: &mut Registers, memory: &mut Memory) -> u8 {
    match instr {
        Instruction::Nop => cycle_cost(CycleCostKind::Nop),
        Instruction::LdRegImm(dst) => {
            let value = fetch8(regs, memory);
            regs.set_reg8(dst, value);
            cycle_cost(CycleCostKind::LoadRegImm)
        }
        Instruction::LdRegReg { dst, src } => {
            let value = regs.reg8(src);
            regs.set_reg8(dst, value);
            cycle_cost(CycleCostKind::LoadRegReg)
        }
        Instruction::LdRegFromHl(dst) => {
            let value = memory.read8(regs.pair(Reg16::HL));
            regs.set_reg8(dst, value);
            cycle_cost(CycleCostKind::LoadViaPair)
        }
        Instruction::LdHlFromReg(src) => {
            memory.write8(regs.pair(Reg16::HL), regs.reg8(src));
            cycle_cost(CycleCostKind::LoadViaPair)
        }
        Instruction::LdHlImm => {
            let value = fetch8(regs, memory);
            memory.write8(regs.pair(Reg16::HL), value);
            cycle_cost(CycleCostKind::LoadHlImm)
        }
        Instruction::LdAFromPair(pair) => {
            let value = memory.read8(regs.pair(pair));
            regs.set_reg8(Reg8::A, value);
            cycle_cost(CycleCostKind::LoadViaPair)
        }
        Instruction::LdPairFromA(pair) => {
            memory.write8(regs.pair(pair), regs.reg8(Reg8::A));
            cycle_cost(CycleCostKind::LoadViaPair)
        }
        Instruction::LdPairImm(pair) => {
            let value = fetch_word(regs, memory);
            regs.set_pair(pair, value);
            cycle_cost(CycleCostKind::LoadPairImm)
        }
        Instruction::LdSpImm => {
            let value = fetch_word(regs, memory);
            regs.set_sp(value);
            cycle_cost(CycleCostKind::LoadPairImm)
        }
        Instruction::LdSpHl => {
            regs.set_sp(regs.pair(Reg16::HL));
            cycle_cost(CycleCostKind::LoadSpFromHl)
        }
        Instruction::Logic(op, source) => execute_logic(op, source, regs, memory),
        Instruction::Inc(target) => execute_increment(target, regs, memory),
        Instruction::ComplementA => {
            let value = !regs.reg8(Reg8::A);
            regs.set_reg8(Reg8::A, value);
            regs.set_flag(Flag::Subtract, true);
            regs.set_flag(Flag::HalfCarry, true);
            cycle_cost(CycleCostKind::ComplementA)
        }
        Instruction::ComplementCarry => {
            let inverted = !regs.flag(Flag::Carry);
            regs.set_flag(Flag::Subtract, false);
            regs.set_flag(Flag::HalfCarry, false);
            regs.set_flag(Flag::Carry, inverted);
            cycle_cost(CycleCostKind::ComplementCarry)
        }
        Instruction::SetCarry => {
            regs.set_flag(Flag::Subtract, false);
            regs.set_flag(Flag::HalfCarry, false);
            regs.set_flag(Flag::Carry, true);
            cycle_cost(CycleCostKind::SetCarry)
        }
        Instruction::JumpAbsolute => {
            let target = fetch_word(regs, memory);
            regs.set_pc(target);
            cycle_cost(CycleCostKind::JumpAbsolute)
        }
        Instruction::JumpRelative(condition) => execute_jump_relative(condition, regs, memory),
        Instruction::Call => {
            let target = fetch_word(regs, memory);
            let return_addr = regs.pc();
            let sp = regs.sp().wrapping_sub(2);
            regs.set_sp(sp);
            memory.write_word(sp, return_addr);
            regs.set_pc(target);
            cycle_cost(CycleCostKind::Call)
        }
        Instruction::BitTest { bit, operand } => execute_bit_test(bit, operand, regs, memory),
    }
}

fn execute_logic(
    op: LogicOp,
    source: LogicSource,
    regs: &mut Registers,
    memory: &Memory,
) -> u8 {
    let (operand, kind) = match source {
        LogicSource::Reg(reg) => (regs.reg8(reg), CycleCostKind::LogicReg),
        LogicSource::HlIndirect => (
            memory.read8(regs.pair(Reg16::HL)),
            CycleCostKind::LogicViaHl,
        ),
        LogicSource::Immediate => (fetch8(regs, memory), CycleCostKind::LogicImm),
    };

    let a = regs.reg8(Reg8::A);
    let (result, half_carry) = match op {
        LogicOp::And => (a & operand, true),
        LogicOp::Or => (a | operand, false),
        LogicOp::Xor => (a ^ operand, false),
    };

    regs.set_reg8(Reg8::A, result);
    flags::apply_logic(regs, result, half_carry);
    cycle_cost(kind)
}

fn execute_increment(target: Operand8, regs: &mut Registers, memory: &mut Memory) -> u8 {
    let (value, kind) = match target {
        Operand8::Reg(reg) => (regs.reg8(reg), CycleCostKind::IncReg),
        Operand8::HlIndirect => (
            memory.read8(regs.pair(Reg16::HL)),
            CycleCostKind::IncViaHl,
        ),
    };

    let result = value.wrapping_add(1);
    match target {
        Operand8::Reg(reg) => regs.set_reg8(reg, result),
        Operand8::HlIndirect => memory.write8(regs.pair(Reg16::HL), result),
    }

    flags::apply_increment(regs, result, value & 0x0F == 0x0F);
    cycle_cost(kind)
}

fn execute_jump_relative(
    condition: Option<Condition>,
    regs: &mut Registers,
    memory: &Memory,
) -> u8 {
    // Both paths consume exactly one operand byte.
    let displacement = i8::from_le_bytes([fetch8(regs, memory)]);
    let taken = match condition {
        None => true,
        Some(condition) => condition_holds(condition, regs),
    };

    if taken {
        regs.set_pc(regs.pc().wrapping_add_signed(i16::from(displacement)));
        cycle_cost(CycleCostKind::RelativeTaken)
    } else {
        cycle_cost(CycleCostKind::RelativeNotTaken)
    }
}

fn execute_bit_test(bit: u8, operand: Operand8, regs: &mut Registers, memory: &Memory) -> u8 {
    let (value, kind) = match operand {
        Operand8::Reg(reg) => (regs.reg8(reg), CycleCostKind::BitTestReg),
        Operand8::HlIndirect => (
            memory.read8(regs.pair(Reg16::HL)),
            CycleCostKind::BitTestViaHl,
        ),
    };

    flags::apply_bit_test(regs, value & (1 << bit) == 0);
    cycle_cost(kind)
}

const fn condition_holds(condition: Condition, regs: &Registers) -> bool {
    match condition {
        Condition::NotZero => !regs.flag(Flag::Zero),
        Condition::Zero => regs.flag(Flag::Zero),
        Condition::NotCarry => !regs.flag(Flag::Carry),
        Condition::Carry => regs.flag(Flag::Carry),
    }
}
