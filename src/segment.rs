//! ASCII to seven-segment conversion.
//!
//! Bits 0-6 of an encoded byte drive segments A-G, bit 7 drives the decimal
//! point. Characters outside the printable range are clamped to the nearest
//! printable one, so encoding never fails.

use crate::constants::{ASCII_LAST_PRINTABLE, ASCII_TABLE_OFFSET, ASCII_TO_SEVEN};

/// Clamps a character code into `0x20..=0x7E`.
pub const fn clamp(ch: u8) -> u8 {
    if ch < ASCII_TABLE_OFFSET {
        ASCII_TABLE_OFFSET
    } else if ch > ASCII_LAST_PRINTABLE {
        ASCII_LAST_PRINTABLE
    } else {
        ch
    }
}

/// Segment pattern for a raw character code.
pub const fn encode(ch: u8) -> u8 {
    ASCII_TO_SEVEN[(clamp(ch) - ASCII_TABLE_OFFSET) as usize]
}

/// Segment pattern for a `char`; anything beyond a byte clamps like `0x7F`.
pub fn encode_char(ch: char) -> u8 {
    encode(u8::try_from(ch).unwrap_or(u8::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::segment_bit;

    #[test]
    fn space_is_blank() {
        assert_eq!(encode(b' '), 0);
    }

    #[test]
    fn digits_and_letters() {
        assert_eq!(encode(b'0'), 0x3F);
        assert_eq!(encode(b'8'), 0x7F);
        assert_eq!(encode(b'A'), 0x77);
        assert_eq!(encode(b'b'), 0x7C);
        assert_eq!(encode(b'-'), segment_bit::G);
        assert_eq!(encode(b'.'), segment_bit::DP);
    }

    #[test]
    fn only_dotted_punctuation_lights_the_decimal_point() {
        let dotted: Vec<u8> = (0x20..=0x7Eu8)
            .filter(|&ch| encode(ch) & segment_bit::DP != 0)
            .collect();
        assert_eq!(dotted, b"!%.?");
        assert_eq!(encode(b'!'), segment_bit::DP | segment_bit::B | segment_bit::C);
    }

    #[test]
    fn control_codes_clamp_to_space() {
        assert_eq!(clamp(0x00), b' ');
        assert_eq!(encode(b'\n'), encode(b' '));
    }

    #[test]
    fn high_codes_clamp_to_tilde() {
        assert_eq!(clamp(0x7F), b'~');
        assert_eq!(clamp(0xFF), b'~');
        assert_eq!(encode(0x80), encode(b'~'));
        assert_eq!(encode_char('é'), encode(b'~'));
        assert_eq!(encode_char('€'), encode(b'~'));
    }
}
