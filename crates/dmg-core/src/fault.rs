//! The undefined-opcode fault surfaced by the dispatch engine.

use std::fmt;

use thiserror::Error;

/// A fetched opcode byte, tagged by the table it was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum OpcodeByte {
    /// Single-byte opcode looked up in the base table.
    Base(u8),
    /// 0xCB-prefixed opcode looked up in the extended table.
    Extended(u8),
}

impl fmt::Display for OpcodeByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(opcode) => write!(f, "{opcode:#04x}"),
            Self::Extended(opcode) => write!(f, "0xcb {opcode:#04x}"),
        }
    }
}

/// Raised when the fetched byte(s) have no entry in either dispatch table.
///
/// This is the engine's only failure mode; it is a tagged outcome so it can
/// never be confused with a cycle count. The payload carries the opcode and
/// the address it was fetched from, which is what the driver reports before
/// stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[error("undefined opcode {opcode} at {pc:#06x}")]
pub struct UndefinedOpcode {
    /// The offending opcode, tagged base or extended.
    pub opcode: OpcodeByte,
    /// Address the opcode was fetched from.
    pub pc: u16,
}
