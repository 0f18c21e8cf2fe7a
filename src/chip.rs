//! Chip variants and the bus addresses derived from them.
//!
//! Each sub-device of the controller (status register, icon bank, every
//! digit) answers on its own bus address. A [`ChipProfile`] describes where
//! those live for one chip variant, and [`AddressPlan`] turns a profile into
//! the concrete address for each logical digit slot.

use core::str::FromStr;

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{address, MAX_BUS_ADDRESS, MAX_DIGITS};
use crate::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipProfile {
    pub status_address: u8,
    /// `None` when the chip has no icon bank.
    pub icon_address: Option<u8>,
    pub digit_base_address: u8,
    pub digit_count: u8,
    pub brightness_levels: u8,
}

const FD650: ChipProfile = ChipProfile {
    status_address: address::STATUS,
    icon_address: None,
    digit_base_address: address::DIGITS_BASE,
    digit_count: 4,
    brightness_levels: 8,
};

const FD6551: ChipProfile = ChipProfile {
    icon_address: Some(address::ICONS),
    ..FD650
};

impl ChipProfile {
    pub const fn has_icon_bank(&self) -> bool {
        self.icon_address.is_some()
    }

    /// Largest brightness level whose status value still fits above the on flag.
    pub const MAX_BRIGHTNESS_LEVELS: u8 = 0x7F;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.digit_count == 0 || self.digit_count as usize > MAX_DIGITS {
            return Err(ConfigError::InvalidDigitCount(self.digit_count));
        }
        if self.brightness_levels == 0 || self.brightness_levels > Self::MAX_BRIGHTNESS_LEVELS {
            return Err(ConfigError::InvalidBrightnessLevels(self.brightness_levels));
        }
        Ok(())
    }
}

/// Supported members of the controller family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    Fd650,
    Fd6551,
    Tm1650,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Fd650, Variant::Fd6551, Variant::Tm1650];

    pub const fn profile(self) -> &'static ChipProfile {
        match self {
            Variant::Fd650 | Variant::Tm1650 => &FD650,
            Variant::Fd6551 => &FD6551,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Fd650 => "fd650",
            Variant::Fd6551 => "fd6551",
            Variant::Tm1650 => "tm1650",
        }
    }

    /// Device tree style `vendor,chip` identifier.
    pub const fn compatible(self) -> &'static str {
        match self {
            Variant::Fd650 => "fdhisi,fd650",
            Variant::Fd6551 => "fdhisi,fd6551",
            Variant::Tm1650 => "titanmicro,tm1650",
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    /// Accepts either the short chip name or the compatible string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == s || v.compatible() == s)
            .ok_or(ConfigError::UnsupportedVariant)
    }
}

/// Concrete bus addresses for one device instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressPlan {
    pub status: u8,
    pub icon: Option<u8>,
    /// Indexed by logical slot (left to right text position).
    digits: Vec<u8, MAX_DIGITS>,
}

impl AddressPlan {
    /// With `reversed` set, raw digit `i` drives logical slot `digit_count - 1 - i`.
    pub fn derive(profile: &ChipProfile, reversed: bool) -> Result<Self, ConfigError> {
        profile.validate()?;

        let status = check_address(profile.status_address)?;
        let icon = profile.icon_address.map(check_address).transpose()?;

        let count = profile.digit_count;
        let mut digits = Vec::new();
        for slot in 0..count {
            let raw = if reversed { count - 1 - slot } else { slot };
            let addr = profile
                .digit_base_address
                .checked_add(raw)
                .ok_or(ConfigError::AddressOutOfRange(profile.digit_base_address))?;
            digits
                .push(check_address(addr)?)
                .map_err(|_| ConfigError::InvalidDigitCount(count))?;
        }

        if digits.contains(&status) {
            return Err(ConfigError::AddressConflict(status));
        }
        if let Some(icon) = icon {
            if icon == status || digits.contains(&icon) {
                return Err(ConfigError::AddressConflict(icon));
            }
        }

        Ok(Self {
            status,
            icon,
            digits,
        })
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn digit(&self, slot: usize) -> Option<u8> {
        self.digits.get(slot).copied()
    }
}

fn check_address(addr: u8) -> Result<u8, ConfigError> {
    if addr > MAX_BUS_ADDRESS {
        return Err(ConfigError::AddressOutOfRange(addr));
    }
    Ok(addr)
}
