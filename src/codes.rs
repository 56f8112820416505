//! Packing of 12-bit codes into 3-byte groups.
//!
//! A group is read as a 24-bit big-endian integer. The first code occupies the top
//! 12 bits and the second code the bottom 12 bits:
//!
//! ```text
//!  byte 0          byte 1          byte 2
//! [c0 11..4     ] [c0 3..0|c1 11..8] [c1 7..0      ]
//! ```

/// Number of bytes in one packed group.
pub const GROUP_LEN: usize = 3;

/// Width of a single code in bits.
pub const CODE_BITS: u32 = 12;

/// Mask selecting the low 12 bits of a packed value.
const CODE_MASK: u32 = (1 << CODE_BITS) - 1;

/// Reserved high nibble written into the lead byte of an odd trailing code.
/// Keeps the lead byte non-zero so the tail cannot read as a terminal marker.
const TAIL_MARKER: u8 = 0xF0;

/// Splits a 3-byte group into its two codes.
#[inline]
#[must_use]
pub const fn unpack(group: [u8; GROUP_LEN]) -> (u16, u16) {
    let total = u32::from_be_bytes([0, group[0], group[1], group[2]]);
    ((total >> CODE_BITS) as u16, (total & CODE_MASK) as u16)
}

/// Packs two codes into a 3-byte group. Bits above the low 12 of each code are dropped.
#[inline]
#[must_use]
pub const fn pack(first: u16, second: u16) -> [u8; GROUP_LEN] {
    let total = ((first as u32 & CODE_MASK) << CODE_BITS) | (second as u32 & CODE_MASK);
    let bytes = total.to_be_bytes();
    [bytes[1], bytes[2], bytes[3]]
}

/// Shifts a trailing window one position to the right so that a code stored in the
/// first two bytes lands in positions 1-2 of a regular group.
#[inline]
#[must_use]
pub const fn realign(window: [u8; GROUP_LEN]) -> [u8; GROUP_LEN] {
    [0, window[0], window[1]]
}

/// Encodes a single trailing code as the two bytes that follow the last full group.
#[inline]
#[must_use]
pub const fn pack_tail(code: u16) -> [u8; 2] {
    let code = code & CODE_MASK as u16;
    [TAIL_MARKER | (code >> 8) as u8, code as u8]
}
