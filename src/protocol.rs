//! Pixie wire protocol constants and timing
//!
//! Pixies are driven with an open-loop bit clock on two lines. There is no
//! acknowledgement and no framing beyond a reset pulse: the controller simply
//! clocks the whole display buffer out, MSB first, and then holds the lines
//! idle long enough for the chain to latch.
//!
//! ## Bit Timing
//!
//! ```text
//!        ┌─────────┐         ┌─────────┐
//! CLK ───┘  high   └── low ──┘         └── ...
//!     DAT set    clock_high_us   clock_low_us
//! ```
//!
//! After every byte the lines rest for `byte_gap_us`, after every frame for
//! `latch_ms`.
//!
//! ## Example
//!
//! ```
//! use pixie::protocol::{Timing, DEFAULT_CLOCK_US};
//!
//! let timing = Timing::default();
//! assert_eq!(timing.clock_high_us, DEFAULT_CLOCK_US);
//!
//! // Long cable runs: slow the clock down
//! let slow = Timing::new().with_clock(40, 40);
//! assert_eq!(slow.clock_low_us, 40);
//! ```

// Buffer layout

/// Bytes of display buffer per 5x7 display
pub const BYTES_PER_DISPLAY: usize = 8;
/// Header bytes in front of the columns of every display
pub const HEADER_BYTES: usize = 3;
/// Offset of the brightness header inside a display block
pub const BRIGHTNESS_OFFSET: usize = 1;
/// Visible LED columns per display
pub const COLUMNS_PER_DISPLAY: usize = 5;
/// Visible LED rows per display
pub const ROWS: usize = 7;

/// Marker bit set on every brightness header byte
pub const BRIGHTNESS_FLAG: u8 = 0x80;
/// Highest brightness level that fits next to the marker bit
pub const MAX_BRIGHTNESS: u8 = 0x7F;

// Timing defaults

/// Default half-period of the bit clock in microseconds
pub const DEFAULT_CLOCK_US: u32 = 12;
/// Default rest between bytes in microseconds
pub const DEFAULT_BYTE_GAP_US: u32 = 12;
/// Default idle time after a frame so the chain latches, in milliseconds
pub const DEFAULT_LATCH_MS: u32 = 5;
/// Default CLOCK high time of the reset pulse in milliseconds
pub const DEFAULT_RESET_HIGH_MS: u32 = 15;
/// Default CLOCK low time of the reset pulse in milliseconds
pub const DEFAULT_RESET_LOW_MS: u32 = 10;

/// Bit clock timing
///
/// All values are waits performed through [`DelayNs`](embedded_hal::delay::DelayNs),
/// so the actual period is the configured wait plus the cost of the pin
/// writes on the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Wait after raising CLOCK
    pub clock_high_us: u32,
    /// Wait after lowering CLOCK
    pub clock_low_us: u32,
    /// Wait after each byte
    pub byte_gap_us: u32,
    /// Wait after each frame
    pub latch_ms: u32,
    /// CLOCK high time of the reset pulse
    pub reset_high_ms: u32,
    /// CLOCK low time of the reset pulse
    pub reset_low_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self::new()
    }
}

impl Timing {
    /// Timing matching the stock Pixie firmware
    pub const fn new() -> Self {
        Self {
            clock_high_us: DEFAULT_CLOCK_US,
            clock_low_us: DEFAULT_CLOCK_US,
            byte_gap_us: DEFAULT_BYTE_GAP_US,
            latch_ms: DEFAULT_LATCH_MS,
            reset_high_ms: DEFAULT_RESET_HIGH_MS,
            reset_low_ms: DEFAULT_RESET_LOW_MS,
        }
    }

    /// Set both half-periods of the bit clock
    pub const fn with_clock(mut self, high_us: u32, low_us: u32) -> Self {
        self.clock_high_us = high_us;
        self.clock_low_us = low_us;
        self
    }

    /// Set the rest between bytes
    pub const fn with_byte_gap(mut self, gap_us: u32) -> Self {
        self.byte_gap_us = gap_us;
        self
    }

    /// Set the idle time after a frame
    pub const fn with_latch(mut self, latch_ms: u32) -> Self {
        self.latch_ms = latch_ms;
        self
    }

    /// Set both halves of the reset pulse
    pub const fn with_reset(mut self, high_ms: u32, low_ms: u32) -> Self {
        self.reset_high_ms = high_ms;
        self.reset_low_ms = low_ms;
        self
    }

    /// Approximate time to clock out `bytes` bytes, ignoring pin write cost
    pub const fn frame_us(&self, bytes: usize, parity: bool) -> u64 {
        let bits_per_byte = if parity { 9 } else { 8 };
        let per_byte =
            bits_per_byte * (self.clock_high_us as u64 + self.clock_low_us as u64) + self.byte_gap_us as u64;
        per_byte * bytes as u64 + self.latch_ms as u64 * 1_000
    }
}

/// Encode a brightness level as a header byte
///
/// Levels above [`MAX_BRIGHTNESS`] are clamped.
pub const fn brightness_header(level: u8) -> u8 {
    let level = if level > MAX_BRIGHTNESS {
        MAX_BRIGHTNESS
    } else {
        level
    };
    BRIGHTNESS_FLAG | level
}

/// Odd-parity bit for a data byte, as sent by the PRO variant
///
/// The returned bit makes the nine transmitted bits contain an odd number of
/// ones.
pub const fn odd_parity(byte: u8) -> bool {
    byte.count_ones() % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing_matches_constants() {
        let timing = Timing::default();
        assert_eq!(timing.clock_high_us, 12);
        assert_eq!(timing.clock_low_us, 12);
        assert_eq!(timing.byte_gap_us, 12);
        assert_eq!(timing.latch_ms, 5);
        assert_eq!(timing.reset_high_ms, 15);
        assert_eq!(timing.reset_low_ms, 10);
    }

    #[test]
    fn test_builder_methods_override_fields() {
        let timing = Timing::new()
            .with_clock(3, 4)
            .with_byte_gap(0)
            .with_latch(1)
            .with_reset(2, 2);
        assert_eq!(
            timing,
            Timing {
                clock_high_us: 3,
                clock_low_us: 4,
                byte_gap_us: 0,
                latch_ms: 1,
                reset_high_ms: 2,
                reset_low_ms: 2,
            }
        );
    }

    #[test]
    fn test_frame_duration() {
        let timing = Timing::default();
        // 16 bytes * (8 * 24 + 12) us + 5 ms
        assert_eq!(timing.frame_us(16, false), 16 * 204 + 5_000);
        assert_eq!(timing.frame_us(16, true), 16 * 228 + 5_000);
    }

    #[test]
    fn test_brightness_header_clamps() {
        assert_eq!(brightness_header(0), 0x80);
        assert_eq!(brightness_header(64), 0xC0);
        assert_eq!(brightness_header(127), 0xFF);
        assert_eq!(brightness_header(255), 0xFF);
    }

    #[test]
    fn test_odd_parity() {
        assert!(odd_parity(0x00));
        assert!(!odd_parity(0x01));
        assert!(odd_parity(0x03));
        assert!(!odd_parity(0xFE));
        assert!(odd_parity(0xFF));
    }
}
