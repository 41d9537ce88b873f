//! Cartridge loading for the DMG instruction core.
//!
//! This crate is the core's external collaborator: it performs the one bulk
//! write of a program image into machine memory before execution starts,
//! and decides whether the image's banking scheme is supported at all.

use env_logger as _;
use log as _;
#[cfg(test)]
use tempfile as _;

/// Cartridge header parsing and the guarded bulk load.
pub mod cartridge;
pub use cartridge::{Cartridge, CartridgeError, CartridgeType};
