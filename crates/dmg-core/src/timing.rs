//! Canonical cycle costs per instruction form.
//!
//! Every cost is a positive multiple of four; memory-operand forms cost one
//! 4-cycle access unit more than their register-operand counterparts.

/// Instruction forms with fixed cycle costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleCostKind {
    /// `NOP`.
    Nop,
    /// `LD r,r'`.
    LoadRegReg,
    /// `LD r,d8`.
    LoadRegImm,
    /// Loads through a pair pointer, either direction.
    LoadViaPair,
    /// `LD (HL),d8`.
    LoadHlImm,
    /// `LD rr,d16` / `LD SP,d16`.
    LoadPairImm,
    /// `LD SP,HL`.
    LoadSpFromHl,
    /// `AND/OR/XOR A,r`.
    LogicReg,
    /// `AND/OR/XOR A,d8`.
    LogicImm,
    /// `AND/OR/XOR A,(HL)`.
    LogicViaHl,
    /// `INC r`.
    IncReg,
    /// `INC (HL)` — read, modify, write back.
    IncViaHl,
    /// `CPL`.
    ComplementA,
    /// `CCF`.
    ComplementCarry,
    /// `SCF`.
    SetCarry,
    /// `JP a16`.
    JumpAbsolute,
    /// Relative jump with the condition satisfied.
    RelativeTaken,
    /// Relative jump with the condition unsatisfied; the operand byte is
    /// still consumed.
    RelativeNotTaken,
    /// `CALL a16`.
    Call,
    /// `BIT b,r`.
    BitTestReg,
    /// `BIT b,(HL)`.
    BitTestViaHl,
}

impl CycleCostKind {
    /// Ordered list of all timing forms.
    pub const ALL: [Self; 21] = [
        Self::Nop,
        Self::LoadRegReg,
        Self::LoadRegImm,
        Self::LoadViaPair,
        Self::LoadHlImm,
        Self::LoadPairImm,
        Self::LoadSpFromHl,
        Self::LogicReg,
        Self::LogicImm,
        Self::LogicViaHl,
        Self::IncReg,
        Self::IncViaHl,
        Self::ComplementA,
        Self::ComplementCarry,
        Self::SetCarry,
        Self::JumpAbsolute,
        Self::RelativeTaken,
        Self::RelativeNotTaken,
        Self::Call,
        Self::BitTestReg,
        Self::BitTestViaHl,
    ];
}

/// Returns the canonical cycle cost for an instruction form.
#[must_use]
pub const fn cycle_cost(kind: CycleCostKind) -> u8 {
    match kind {
        CycleCostKind::Nop
        | CycleCostKind::LoadRegReg
        | CycleCostKind::LogicReg
        | CycleCostKind::IncReg
        | CycleCostKind::ComplementA
        | CycleCostKind::ComplementCarry
        | CycleCostKind::SetCarry => 4,
        CycleCostKind::LoadRegImm
        | CycleCostKind::LoadViaPair
        | CycleCostKind::LoadSpFromHl
        | CycleCostKind::LogicImm
        | CycleCostKind::LogicViaHl
        | CycleCostKind::RelativeNotTaken
        | CycleCostKind::BitTestReg => 8,
        CycleCostKind::LoadHlImm
        | CycleCostKind::LoadPairImm
        | CycleCostKind::IncViaHl
        | CycleCostKind::RelativeTaken
        | CycleCostKind::BitTestViaHl => 12,
        CycleCostKind::JumpAbsolute => 16,
        CycleCostKind::Call => 24,
    }
}

#[cfg(test)]
mod tests {
    use super::{cycle_cost, CycleCostKind};

    #[test]
    fn every_cost_is_a_positive_multiple_of_four() {
        for kind in CycleCostKind::ALL {
            let cycles = cycle_cost(kind);
            assert!(cycles > 0);
            assert_eq!(cycles % 4, 0);
            assert!(cycles <= 24);
        }
    }

    #[test]
    fn canonical_costs_match_the_documented_timings() {
        assert_eq!(cycle_cost(CycleCostKind::Nop), 4);
        assert_eq!(cycle_cost(CycleCostKind::LoadRegImm), 8);
        assert_eq!(cycle_cost(CycleCostKind::LoadViaPair), 8);
        assert_eq!(cycle_cost(CycleCostKind::LoadPairImm), 12);
        assert_eq!(cycle_cost(CycleCostKind::LoadSpFromHl), 8);
        assert_eq!(cycle_cost(CycleCostKind::RelativeTaken), 12);
        assert_eq!(cycle_cost(CycleCostKind::RelativeNotTaken), 8);
        assert_eq!(cycle_cost(CycleCostKind::JumpAbsolute), 16);
        assert_eq!(cycle_cost(CycleCostKind::Call), 24);
        assert_eq!(cycle_cost(CycleCostKind::BitTestReg), 8);
        assert_eq!(cycle_cost(CycleCostKind::BitTestViaHl), 12);
    }

    #[test]
    fn memory_operand_forms_cost_one_access_unit_more() {
        assert_eq!(
            cycle_cost(CycleCostKind::LogicViaHl),
            cycle_cost(CycleCostKind::LogicReg) + 4
        );
        assert_eq!(
            cycle_cost(CycleCostKind::LoadViaPair),
            cycle_cost(CycleCostKind::LoadRegReg) + 4
        );
        assert_eq!(
            cycle_cost(CycleCostKind::BitTestViaHl),
            cycle_cost(CycleCostKind::BitTestReg) + 4
        );
    }
}
