//! Host-facing machine state and the step outcome contract.

use crate::fault::UndefinedOpcode;
use crate::memory::Memory;
use crate::registers::Registers;

/// Outcome of one instruction-boundary step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StepOutcome {
    /// Instruction retired.
    Retired {
        /// Canonical cycle cost, always a positive multiple of four.
        cycles: u8,
    },
    /// Neither dispatch table has a handler for the fetched opcode.
    Undefined(UndefinedOpcode),
}

/// One emulated machine: the register file plus its exclusively owned
/// 64 KiB memory.
///
/// The dispatch tables are process-wide immutable statics; all mutable
/// state lives here.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Machine {
    /// CPU register file.
    pub regs: Registers,
    /// Flat address space holding program code and runtime data.
    pub memory: Memory,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Creates a machine in documented power-on state with zeroed memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::power_on(),
            memory: Memory::new(),
        }
    }

    /// Restores the power-on register state. Memory is left untouched so a
    /// loaded image survives reset.
    pub fn reset(&mut self) {
        self.regs = Registers::power_on();
    }

    /// Executes exactly one instruction; see [`crate::execute::step_one`].
    pub fn step(&mut self) -> StepOutcome {
        crate::execute::step_one(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{Machine, StepOutcome};
    use crate::fault::{OpcodeByte, UndefinedOpcode};
    use crate::registers::{Reg8, Registers, POWER_ON_PC, POWER_ON_SP};

    #[test]
    fn new_machine_is_in_power_on_state() {
        let machine = Machine::new();
        assert_eq!(machine.regs, Registers::power_on());
        assert_eq!(machine.memory.read8(0x0000), 0);
        assert_eq!(machine.memory.read8(0xFFFF), 0);
    }

    #[test]
    fn reset_restores_registers_and_preserves_memory() {
        let mut machine = Machine::new();
        machine.memory.write8(0x0100, 0xAB);
        machine.regs.set_reg8(Reg8::A, 0x55);
        machine.regs.set_pc(0x1234);
        machine.regs.set_sp(0xC000);

        machine.reset();

        assert_eq!(machine.regs.pc(), POWER_ON_PC);
        assert_eq!(machine.regs.sp(), POWER_ON_SP);
        assert_eq!(machine.regs.reg8(Reg8::A), 0);
        assert_eq!(machine.memory.read8(0x0100), 0xAB);
    }

    #[test]
    fn undefined_outcome_is_distinct_from_every_cycle_count() {
        let undefined = StepOutcome::Undefined(UndefinedOpcode {
            opcode: OpcodeByte::Base(0xD3),
            pc: 0x0100,
        });

        for cycles in [4, 8, 12, 16, 24] {
            assert_ne!(undefined, StepOutcome::Retired { cycles });
        }
    }
}
