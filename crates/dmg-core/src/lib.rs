//! Instruction-execution core for a DMG (Game Boy) emulator.
//!
//! Three components in dependency order: a flat 64 KiB [`Memory`], the
//! [`Registers`] file with its four named flags, and the dispatch engine
//! ([`step_one`]) driving the immutable base and 0xCB-prefixed opcode
//! tables. A host drives [`Machine::step`] until it returns the
//! [`StepOutcome::Undefined`] outcome.

/// Flat addressable memory.
pub mod memory;
pub use memory::{Memory, ADDRESS_SPACE_BYTES};

/// CPU register file and flags.
pub mod registers;
pub use registers::{Flag, Reg16, Reg8, Registers, POWER_ON_PC, POWER_ON_SP};

/// Opcode classification and the immutable dispatch tables.
pub mod opcodes;
pub use opcodes::{
    decode_base, decode_extended, lookup_base, lookup_extended, Condition, Instruction, LogicOp,
    LogicSource, Operand8, BASE_OPCODES, EXTENDED_OPCODES, EXTENDED_OPCODE_PREFIX,
};

/// Canonical per-instruction cycle costs.
pub mod timing;
pub use timing::{cycle_cost, CycleCostKind};

/// Undefined-opcode fault type.
pub mod fault;
pub use fault::{OpcodeByte, UndefinedOpcode};

/// Machine state and the step outcome contract.
pub mod machine;
pub use machine::{Machine, StepOutcome};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::step_one;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
