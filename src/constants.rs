pub const MAX_DIGITS: usize = 4;
pub const MAX_ICONS: usize = 8;
pub const MAX_ICON_NAME_LEN: usize = 16;
pub const ICON_MAX_BRIGHTNESS: u8 = 255;
// status + icon bank + digits
pub const MAX_ADDRESSES: usize = MAX_DIGITS + 2;
// a failed write and its rollback write for every address
pub const MAX_WRITE_FAILURES: usize = MAX_ADDRESSES * 2;
pub const MAX_BUS_ADDRESS: u8 = 0x7F; // 7-bit addressing

pub const BLANK: u8 = 0x00; // all segments off
pub const ASCII_TABLE_OFFSET: u8 = 0x20;
pub const ASCII_LAST_PRINTABLE: u8 = 0x7E;

pub mod address {
    pub const STATUS: u8 = 0x24;
    pub const ICONS: u8 = 0x33;
    pub const DIGITS_BASE: u8 = 0x34; // Digit1 - Digit4
}

pub mod status {
    pub const DISPLAY_OFF: u8 = 0x00;
    pub const DISPLAY_ON: u8 = 0x01; // bit 0: display enable
    pub const BRIGHTNESS_SHIFT: u8 = 1; // bits 7:1: inverted brightness
}

pub mod segment_bit {
    pub const A: u8 = 1 << 0;
    pub const B: u8 = 1 << 1;
    pub const C: u8 = 1 << 2;
    pub const D: u8 = 1 << 3;
    pub const E: u8 = 1 << 4;
    pub const F: u8 = 1 << 5;
    pub const G: u8 = 1 << 6;
    pub const DP: u8 = 1 << 7;
}

// ASCII 0x20..=0x7F, font from https://github.com/dmadison/LED-Segment-ASCII
// Punctuation drawn with a dot keeps the decimal point bit set.
pub const ASCII_TO_SEVEN: [u8; 96] = [
    0b0000_0000, // (space)
    segment_bit::DP | 0b0000_0110, // ! (dot under a bar)
    0b0010_0010, // "
    0b0111_1110, // #
    0b0110_1101, // $
    segment_bit::DP | 0b0101_0010, // % (dot after a slash)
    0b0100_0110, // &
    0b0010_0000, // '
    0b0010_1001, // (
    0b0000_1011, // )
    0b0010_0001, // *
    0b0111_0000, // +
    0b0001_0000, // ,
    0b0100_0000, // -
    segment_bit::DP, // .
    0b0101_0010, // /
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
    0b0000_1001, // :
    0b0000_1101, // ;
    0b0110_0001, // <
    0b0100_1000, // =
    0b0100_0011, // >
    segment_bit::DP | 0b0101_0011, // ? (dot after the hook)
    0b0101_1111, // @
    0b0111_0111, // A
    0b0111_1100, // B
    0b0011_1001, // C
    0b0101_1110, // D
    0b0111_1001, // E
    0b0111_0001, // F
    0b0011_1101, // G
    0b0111_0110, // H
    0b0011_0000, // I
    0b0001_1110, // J
    0b0111_0101, // K
    0b0011_1000, // L
    0b0001_0101, // M
    0b0011_0111, // N
    0b0011_1111, // O
    0b0111_0011, // P
    0b0110_1011, // Q
    0b0011_0011, // R
    0b0110_1101, // S
    0b0111_1000, // T
    0b0011_1110, // U
    0b0011_1110, // V
    0b0010_1010, // W
    0b0111_0110, // X
    0b0110_1110, // Y
    0b0101_1011, // Z
    0b0011_1001, // [
    0b0110_0100, // \
    0b0000_1111, // ]
    0b0010_0011, // ^
    0b0000_1000, // _
    0b0000_0010, // `
    0b0101_1111, // a
    0b0111_1100, // b
    0b0101_1000, // c
    0b0101_1110, // d
    0b0111_1011, // e
    0b0111_0001, // f
    0b0110_1111, // g
    0b0111_0100, // h
    0b0001_0000, // i
    0b0000_1100, // j
    0b0111_0101, // k
    0b0011_0000, // l
    0b0001_0100, // m
    0b0101_0100, // n
    0b0101_1100, // o
    0b0111_0011, // p
    0b0110_0111, // q
    0b0101_0000, // r
    0b0110_1101, // s
    0b0111_1000, // t
    0b0001_1100, // u
    0b0001_1100, // v
    0b0001_0100, // w
    0b0111_0110, // x
    0b0110_1110, // y
    0b0101_1011, // z
    0b0100_0110, // {
    0b0011_0000, // |
    0b0111_0000, // }
    0b0000_0001, // ~
    0b0000_0000, // (del)
];
