//! In-memory mirror of what the chip is showing, and the encoders that turn
//! it into register values.

use heapless::Vec;
use num_traits::ToPrimitive;

use crate::chip::ChipProfile;
use crate::constants::{status, MAX_DIGITS, MAX_ICONS};
use crate::segment;
use crate::ValidationError;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    /// `0` means display off, otherwise `1..=brightness_levels`.
    pub brightness: u8,
    pub icon_bitmask: u8,
    /// Raw characters as written, one per digit, space padded.
    text: Vec<u8, MAX_DIGITS>,
}

impl DisplayState {
    pub fn new(profile: &ChipProfile) -> Self {
        let mut state = Self {
            brightness: 0,
            icon_bitmask: 0,
            text: Vec::new(),
        };
        state.store_text(&[], profile);
        state
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Keeps the first `digit_count` characters and pads the rest with spaces.
    pub fn store_text(&mut self, chars: &[u8], profile: &ChipProfile) {
        let count = (profile.digit_count as usize).min(MAX_DIGITS);
        self.text.clear();
        for idx in 0..count {
            let ch = chars.get(idx).copied().unwrap_or(b' ');
            // capacity is MAX_DIGITS and count never exceeds it
            let _ = self.text.push(ch);
        }
    }

    /// Status register value for the current brightness.
    ///
    /// The chip's brightness field is inverted: `0` in bits 7:1 is the
    /// brightest setting, so the highest requested level maps to the smallest
    /// non-zero register value.
    pub fn status_byte(&self, profile: &ChipProfile) -> u8 {
        if self.brightness == 0 {
            return status::DISPLAY_OFF;
        }
        let level = self.brightness.min(profile.brightness_levels);
        status::DISPLAY_ON | ((profile.brightness_levels - level) << status::BRIGHTNESS_SHIFT)
    }

    /// One segment pattern per logical digit slot.
    pub fn digit_bytes(&self, profile: &ChipProfile) -> Vec<u8, MAX_DIGITS> {
        let count = (profile.digit_count as usize).min(MAX_DIGITS);
        (0..count)
            .map(|idx| segment::encode(self.text.get(idx).copied().unwrap_or(b' ')))
            .collect()
    }

    /// Read-modify-write of a single icon bit, returns the whole new bank value.
    pub fn set_icon_bit(&mut self, bit: u8, on: bool) -> Result<u8, ValidationError> {
        self.icon_bitmask = with_icon_bit(self.icon_bitmask, bit, on)?;
        Ok(self.icon_bitmask)
    }
}

pub fn with_icon_bit(bitmask: u8, bit: u8, on: bool) -> Result<u8, ValidationError> {
    if bit as usize >= MAX_ICONS {
        return Err(ValidationError::InvalidIconBit(bit));
    }
    let mask = 1 << bit;
    let mut value = bitmask & !mask;
    if on {
        value |= mask;
    }
    Ok(value)
}

/// Clamps any numeric level into `0..=brightness_levels`. Only NaN is rejected.
pub fn clamp_brightness<T>(level: T, profile: &ChipProfile) -> Result<u8, ValidationError>
where
    T: ToPrimitive,
{
    let max = profile.brightness_levels;
    if let Some(level) = level.to_i64() {
        return Ok(level.clamp(0, max as i64) as u8);
    }
    if level.to_u64().is_some() {
        return Ok(max);
    }
    match level.to_f64() {
        Some(level) if level > 0.0 => Ok(max),
        Some(level) if level < 0.0 => Ok(0),
        _ => Err(ValidationError::InvalidValue),
    }
}

/// Requested brightness recovered from a status register value.
pub fn brightness_from_status(value: u8, profile: &ChipProfile) -> u8 {
    if value & status::DISPLAY_ON == 0 {
        return 0;
    }
    profile
        .brightness_levels
        .saturating_sub(value >> status::BRIGHTNESS_SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::Variant;

    fn profile() -> &'static ChipProfile {
        Variant::Fd6551.profile()
    }

    #[test]
    fn status_off_and_inverted_levels() {
        let mut state = DisplayState::new(profile());
        assert_eq!(state.status_byte(profile()), 0x00);

        state.brightness = 8;
        assert_eq!(state.status_byte(profile()), 0x01);

        state.brightness = 1;
        assert_eq!(state.status_byte(profile()), 0x01 | (7 << 1));
    }

    #[test]
    fn short_text_is_space_padded() {
        let mut state = DisplayState::new(profile());
        state.store_text(b"AB", profile());
        assert_eq!(state.text(), b"AB  ");
        assert_eq!(
            state.digit_bytes(profile()).as_slice(),
            &[segment::encode(b'A'), segment::encode(b'B'), 0, 0]
        );
    }

    #[test]
    fn long_text_is_truncated_raw_kept() {
        let mut state = DisplayState::new(profile());
        state.store_text(b"\x01bcde", profile());
        assert_eq!(state.text(), b"\x01bcd");
        assert_eq!(state.digit_bytes(profile())[0], segment::encode(b' '));
    }

    #[test]
    fn icon_bits_are_independent() {
        let mut state = DisplayState::new(profile());
        assert_eq!(state.set_icon_bit(3, true), Ok(0x08));
        assert_eq!(state.set_icon_bit(0, true), Ok(0x09));
        assert_eq!(state.set_icon_bit(3, false), Ok(0x01));
        assert_eq!(
            state.set_icon_bit(8, true),
            Err(ValidationError::InvalidIconBit(8))
        );
        assert_eq!(state.icon_bitmask, 0x01);
    }

    #[test]
    fn brightness_clamps_both_ends() {
        assert_eq!(clamp_brightness(-3, profile()), Ok(0));
        assert_eq!(clamp_brightness(200u8, profile()), Ok(8));
        assert_eq!(clamp_brightness(u64::MAX, profile()), Ok(8));
        assert_eq!(clamp_brightness(4.6f32, profile()), Ok(4));
        assert_eq!(
            clamp_brightness(f32::NAN, profile()),
            Err(ValidationError::InvalidValue)
        );
    }
}
