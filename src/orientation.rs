//! Chain orientation and the flipped byte remapping
//!
//! The display buffer is always kept in logical order: display 0 on the
//! left, column 0 on the left of each display, bit 0 on the top row. When a
//! chain is mounted upside down the bytes are remapped on the way out, so
//! every buffer helper works the same in both orientations.
//!
//! ## Flipped Mapping
//!
//! For a chain of `n` displays, physical byte `p` is taken from:
//!
//! - display `n - 1 - p / 8`
//! - the same header byte when `p % 8 < 3`
//! - column `4 - (p % 8 - 3)` otherwise, with rows 0..=6 mirrored
//!
//! ## Example
//!
//! ```
//! use pixie::orientation::{Orientation, physical_byte};
//!
//! let buffer = [0, 0xFF, 0, 0x01, 0, 0, 0, 0];
//!
//! // Normal orientation sends the buffer unchanged
//! assert_eq!(physical_byte(&buffer, 3, Orientation::Normal), 0x01);
//!
//! // Flipped: the top-left pixel becomes the bottom-right one
//! assert_eq!(physical_byte(&buffer, 7, Orientation::Flipped), 0x40);
//! assert_eq!(physical_byte(&buffer, 3, Orientation::Flipped), 0x00);
//! ```

use crate::protocol::{BYTES_PER_DISPLAY, COLUMNS_PER_DISPLAY, HEADER_BYTES};

/// Mounting orientation of the whole chain
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Orientation {
    /// Native orientation
    #[default]
    Normal,
    /// Rotated by 180 degrees
    Flipped,
}

impl Orientation {
    /// Orientation for the `flipped` flag
    pub const fn from_flipped(flipped: bool) -> Self {
        if flipped { Self::Flipped } else { Self::Normal }
    }

    /// Whether this is [`Orientation::Flipped`]
    pub const fn is_flipped(self) -> bool {
        matches!(self, Self::Flipped)
    }
}

/// Mirror the seven LED rows of a column byte
///
/// Bit `r` moves to bit `6 - r`; bit 7 is left in place.
pub const fn mirror_rows(column: u8) -> u8 {
    // Reversing all eight bits puts row r at bit 7 - r, one too high.
    let mirrored = (column & 0x7F).reverse_bits() >> 1;
    mirrored | (column & 0x80)
}

/// Logical buffer index that feeds physical byte `index`
///
/// # Arguments
///
/// * `index` - Position in transmission order
/// * `len` - Buffer length in bytes, a multiple of [`BYTES_PER_DISPLAY`]
/// * `orientation` - Chain orientation
///
/// # Panics
///
/// Panics if a flipped `len` holds no whole display or `index` is outside the
/// last whole display.
pub(crate) const fn source_index(index: usize, len: usize, orientation: Orientation) -> usize {
    match orientation {
        Orientation::Normal => index,
        Orientation::Flipped => {
            let displays = len / BYTES_PER_DISPLAY;
            let display = displays - 1 - index / BYTES_PER_DISPLAY;
            let offset = index % BYTES_PER_DISPLAY;
            let offset = if offset < HEADER_BYTES {
                offset
            } else {
                HEADER_BYTES + (COLUMNS_PER_DISPLAY - 1) - (offset - HEADER_BYTES)
            };
            display * BYTES_PER_DISPLAY + offset
        }
    }
}

/// Byte to transmit at position `index` for the given orientation
///
/// # Panics
///
/// Panics if `index` is outside `buffer`, or if a flipped `buffer` is not a
/// whole number of displays long.
pub(crate) fn physical_byte(buffer: &[u8], index: usize, orientation: Orientation) -> u8 {
    let byte = buffer[source_index(index, buffer.len(), orientation)];
    match orientation {
        Orientation::Normal => byte,
        Orientation::Flipped if index % BYTES_PER_DISPLAY < HEADER_BYTES => byte,
        Orientation::Flipped => mirror_rows(byte),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_rows() {
        assert_eq!(mirror_rows(0x01), 0x40);
        assert_eq!(mirror_rows(0x40), 0x01);
        assert_eq!(mirror_rows(0x08), 0x08); // middle row stays
        assert_eq!(mirror_rows(0x7F), 0x7F);
        assert_eq!(mirror_rows(0x81), 0xC0);
    }

    #[test]
    fn test_mirror_rows_is_involution() {
        for byte in 0..=u8::MAX {
            assert_eq!(mirror_rows(mirror_rows(byte)), byte);
        }
    }

    #[test]
    #[should_panic]
    fn test_flipped_partial_display_panics() {
        physical_byte(&[0u8; 12], 8, Orientation::Flipped);
    }

    #[test]
    fn test_normal_source_index_is_identity() {
        for index in 0..16 {
            assert_eq!(source_index(index, 16, Orientation::Normal), index);
        }
    }

    #[test]
    fn test_flipped_source_index_two_displays() {
        // Headers come from the other display, in place
        assert_eq!(source_index(0, 16, Orientation::Flipped), 8);
        assert_eq!(source_index(1, 16, Orientation::Flipped), 9);
        assert_eq!(source_index(2, 16, Orientation::Flipped), 10);
        // Columns are reversed
        assert_eq!(source_index(3, 16, Orientation::Flipped), 15);
        assert_eq!(source_index(7, 16, Orientation::Flipped), 11);
        assert_eq!(source_index(8, 16, Orientation::Flipped), 0);
        assert_eq!(source_index(11, 16, Orientation::Flipped), 7);
        assert_eq!(source_index(15, 16, Orientation::Flipped), 3);
    }

    #[test]
    fn test_flipped_keeps_headers_unmirrored() {
        let buffer = [0x00, 0x81, 0x00, 0, 0, 0, 0, 0];
        assert_eq!(physical_byte(&buffer, 1, Orientation::Flipped), 0x81);
    }

    #[test]
    fn test_from_flipped() {
        assert_eq!(Orientation::from_flipped(true), Orientation::Flipped);
        assert_eq!(Orientation::from_flipped(false), Orientation::Normal);
        assert!(Orientation::Flipped.is_flipped());
        assert_eq!(Orientation::default(), Orientation::Normal);
    }
}
