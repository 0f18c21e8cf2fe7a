//! Per-device configuration: which chip, how the digits are wired and which
//! icons exist on the icon bank.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chip::{ChipProfile, Variant};
use crate::constants::{MAX_ICONS, MAX_ICON_NAME_LEN};
use crate::ConfigError;

/// Binds an icon name to its bit in the icon bank register.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IconMapping {
    pub name: String<MAX_ICON_NAME_LEN>,
    pub bit: u8,
}

impl IconMapping {
    pub fn new(name: &str, bit: u8) -> Result<Self, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::InvalidIconName);
        }
        let mut owned = String::new();
        owned
            .push_str(name)
            .map_err(|_| ConfigError::InvalidIconName)?;
        Ok(Self { name: owned, bit })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    pub variant: Variant,
    /// Physical digit order is right to left.
    #[cfg_attr(feature = "serde", serde(default))]
    pub digits_reversed: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icons: Vec<IconMapping, MAX_ICONS>,
}

impl DeviceConfig {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            digits_reversed: false,
            icons: Vec::new(),
        }
    }

    pub fn digits_reversed(self, digits_reversed: bool) -> Self {
        Self {
            digits_reversed,
            ..self
        }
    }

    /// Adds an icon, rejecting anything that would fail [`validate`](Self::validate).
    pub fn with_icon(mut self, name: &str, bit: u8) -> Result<Self, ConfigError> {
        let icon = IconMapping::new(name, bit)?;
        check_icon(&self.icons, &icon)?;
        self.icons
            .push(icon)
            .map_err(|_| ConfigError::TooManyIcons)?;
        Ok(self)
    }

    /// Loads the configuration from `source`; a missing source is fatal.
    pub fn from_source<S>(source: &S) -> Result<Self, ConfigError>
    where
        S: ConfigSource + ?Sized,
    {
        let config = source.device_config().ok_or(ConfigError::MissingSource)?;
        config.validate()?;
        Ok(config)
    }

    pub fn profile(&self) -> &'static ChipProfile {
        self.variant.profile()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile().validate()?;
        for (idx, icon) in self.icons.iter().enumerate() {
            if icon.name.is_empty() {
                return Err(ConfigError::InvalidIconName);
            }
            check_icon(&self.icons[..idx], icon)?;
        }
        Ok(())
    }

    pub fn icon_bit(&self, name: &str) -> Option<u8> {
        self.icons
            .iter()
            .find(|icon| icon.name.as_str() == name)
            .map(|icon| icon.bit)
    }

    /// The icon bank is only driven when the chip has one and icons are declared.
    pub fn uses_icon_bank(&self) -> bool {
        self.profile().has_icon_bank() && !self.icons.is_empty()
    }
}

fn check_icon(existing: &[IconMapping], icon: &IconMapping) -> Result<(), ConfigError> {
    if icon.bit as usize >= MAX_ICONS {
        return Err(ConfigError::InvalidIconBit(icon.bit));
    }
    if existing.iter().any(|other| other.bit == icon.bit) {
        return Err(ConfigError::DuplicateIconBit(icon.bit));
    }
    if existing.iter().any(|other| other.name == icon.name) {
        return Err(ConfigError::DuplicateIconName);
    }
    Ok(())
}

/// Supplies the device configuration at initialization time.
pub trait ConfigSource {
    fn device_config(&self) -> Option<DeviceConfig>;
}

impl ConfigSource for DeviceConfig {
    fn device_config(&self) -> Option<DeviceConfig> {
        Some(self.clone())
    }
}

impl<S: ConfigSource> ConfigSource for Option<S> {
    fn device_config(&self) -> Option<DeviceConfig> {
        self.as_ref().and_then(ConfigSource::device_config)
    }
}
