//! Cartridge image parsing and the one-shot bulk load into machine memory.
//!
//! The loader alone interprets the banking metadata in the header; the core
//! never sees it. Only the plain 32 KiB ROM scheme maps straight into the
//! flat address space, and an unsupported scheme is rejected before a single
//! byte of memory is written.

use std::ops::Range;

use dmg_core::{Machine, ADDRESS_SPACE_BYTES};
use thiserror::Error;

/// Byte range of the ASCII title in the cartridge header.
const TITLE_RANGE: Range<usize> = 0x0134..0x0142;

/// Header offset of the cartridge-type byte.
const CARTRIDGE_TYPE_OFFSET: usize = 0x0147;

/// Minimum image length that still contains the full header region.
const HEADER_END: usize = 0x0150;

/// Documented cartridge-type codes from the header byte at 0x0147.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CartridgeType {
    RomOnly,
    Mbc1,
    Mbc1Ram,
    Mbc1RamBattery,
    Mbc2,
    Mbc2Battery,
    RomRam,
    RomRamBattery,
    Mmmd1,
    Mmmd1Sram,
    Mmmd1SramBattery,
    Mbc3TimerBattery,
    Mbc3TimerRamBattery,
    Mbc3,
    Mbc3Ram,
    Mbc3RamBattery,
    Mbc5,
    Mbc5Ram,
    Mbc5RamBattery,
    Mbc5Rumble,
    Mbc5RumbleSram,
    Mbc5RumbleSramBattery,
    PocketCamera,
    BandaiTama5,
    HudsonHuc3,
    HudsonHuc1,
}

impl CartridgeType {
    /// Decodes the header type byte; `None` means an undocumented code.
    #[must_use]
    pub const fn from_byte(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::RomOnly),
            0x01 => Some(Self::Mbc1),
            0x02 => Some(Self::Mbc1Ram),
            0x03 => Some(Self::Mbc1RamBattery),
            0x05 => Some(Self::Mbc2),
            0x06 => Some(Self::Mbc2Battery),
            0x08 => Some(Self::RomRam),
            0x09 => Some(Self::RomRamBattery),
            0x0B => Some(Self::Mmmd1),
            0x0C => Some(Self::Mmmd1Sram),
            0x0D => Some(Self::Mmmd1SramBattery),
            0x0F => Some(Self::Mbc3TimerBattery),
            0x10 => Some(Self::Mbc3TimerRamBattery),
            0x11 => Some(Self::Mbc3),
            0x12 => Some(Self::Mbc3Ram),
            0x13 => Some(Self::Mbc3RamBattery),
            0x19 => Some(Self::Mbc5),
            0x1A => Some(Self::Mbc5Ram),
            0x1B => Some(Self::Mbc5RamBattery),
            0x1C => Some(Self::Mbc5Rumble),
            0x1D => Some(Self::Mbc5RumbleSram),
            0x1E => Some(Self::Mbc5RumbleSramBattery),
            0x1F => Some(Self::PocketCamera),
            0xFD => Some(Self::BandaiTama5),
            0xFE => Some(Self::HudsonHuc3),
            0xFF => Some(Self::HudsonHuc1),
            _ => None,
        }
    }

    /// Human-readable scheme name as reported by the driver.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RomOnly => "ROM",
            Self::Mbc1 => "ROM+MBC1",
            Self::Mbc1Ram => "ROM+MBC1+RAM",
            Self::Mbc1RamBattery => "ROM+MBC1+RAM+BATTERY",
            Self::Mbc2 => "ROM+MBC2",
            Self::Mbc2Battery => "ROM+MBC2+BATTERY",
            Self::RomRam => "ROM+RAM",
            Self::RomRamBattery => "ROM+RAM+BATTERY",
            Self::Mmmd1 => "ROM+MMMD1",
            Self::Mmmd1Sram => "ROM+MMMD1+SRAM",
            Self::Mmmd1SramBattery => "ROM+MMMD1+SRAM+BATTERY",
            Self::Mbc3TimerBattery => "ROM+MBC3+TIMER+BATTERY",
            Self::Mbc3TimerRamBattery => "ROM+MBC3+TIMER+RAM+BATTERY",
            Self::Mbc3 => "ROM+MBC3",
            Self::Mbc3Ram => "ROM+MBC3+RAM",
            Self::Mbc3RamBattery => "ROM+MBC3+RAM+BATTERY",
            Self::Mbc5 => "ROM+MBC5",
            Self::Mbc5Ram => "ROM+MBC5+RAM",
            Self::Mbc5RamBattery => "ROM+MBC5+RAM+BATTERY",
            Self::Mbc5Rumble => "ROM+MBC5+RUMBLE",
            Self::Mbc5RumbleSram => "ROM+MBC5+RUMBLE+SRAM",
            Self::Mbc5RumbleSramBattery => "ROM+MBC5+RUMBLE+SRAM+BATTERY",
            Self::PocketCamera => "Pocket Camera",
            Self::BandaiTama5 => "Bandai TAMA5",
            Self::HudsonHuc3 => "Hudson HuC-3",
            Self::HudsonHuc1 => "Hudson HuC-1",
        }
    }

    /// Only the plain 32 KiB ROM scheme maps into flat memory; everything
    /// else needs a banking controller this loader does not provide.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::RomOnly)
    }
}

/// Errors raised while parsing or loading a cartridge image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartridgeError {
    /// Image ends before the header region.
    #[error("image is {len} bytes, too short to contain the cartridge header")]
    ImageTooShort {
        /// Actual image length.
        len: usize,
    },
    /// Image would run past the end of the 64 KiB address space.
    #[error("image is {len} bytes and does not fit the 65536-byte address space")]
    ImageTooLarge {
        /// Actual image length.
        len: usize,
    },
    /// Header type byte is not a documented code.
    #[error("unknown cartridge type code {code:#04x}")]
    UnknownCartridgeType {
        /// The undocumented type byte.
        code: u8,
    },
    /// Banking scheme exists but has no flat-memory mapping.
    #[error("unsupported cartridge scheme {name}")]
    UnsupportedCartridge {
        /// Scheme name from the header.
        name: &'static str,
    },
}

/// Parsed view of a cartridge image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cartridge<'a> {
    image: &'a [u8],
    title: String,
    cartridge_type: CartridgeType,
}

impl<'a> Cartridge<'a> {
    /// Parses the header of a cartridge image.
    ///
    /// # Errors
    ///
    /// Returns [`CartridgeError::ImageTooShort`] when the image ends before
    /// the header region, [`CartridgeError::ImageTooLarge`] when it cannot
    /// fit the address space, and
    /// [`CartridgeError::UnknownCartridgeType`] for an undocumented type
    /// byte.
    pub fn parse(image: &'a [u8]) -> Result<Self, CartridgeError> {
        if image.len() < HEADER_END {
            return Err(CartridgeError::ImageTooShort { len: image.len() });
        }
        if image.len() > ADDRESS_SPACE_BYTES {
            return Err(CartridgeError::ImageTooLarge { len: image.len() });
        }

        let code = image[CARTRIDGE_TYPE_OFFSET];
        let cartridge_type = CartridgeType::from_byte(code)
            .ok_or(CartridgeError::UnknownCartridgeType { code })?;

        let title = image[TITLE_RANGE]
            .iter()
            .take_while(|byte| **byte != 0)
            .map(|&byte| char::from(byte))
            .collect();

        Ok(Self {
            image,
            title,
            cartridge_type,
        })
    }

    /// Title from the header, trailing NUL padding stripped.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Parsed cartridge type.
    #[must_use]
    pub const fn cartridge_type(&self) -> CartridgeType {
        self.cartridge_type
    }

    /// Performs the single bulk write of the image into machine memory at
    /// address 0x0000.
    ///
    /// # Errors
    ///
    /// Returns [`CartridgeError::UnsupportedCartridge`] for any scheme other
    /// than plain ROM; memory is not touched in that case.
    pub fn load_into(&self, machine: &mut Machine) -> Result<(), CartridgeError> {
        if !self.cartridge_type.is_supported() {
            return Err(CartridgeError::UnsupportedCartridge {
                name: self.cartridge_type.name(),
            });
        }

        machine.memory.load_block(0x0000, self.image);
        Ok(())
    }
}
