//! Chain configuration types and builder

pub use crate::error::{BuilderError, MAX_DISPLAYS};
pub use crate::orientation::Orientation;
pub use crate::protocol::Timing;

use crate::protocol::{BYTES_PER_DISPLAY, COLUMNS_PER_DISPLAY, MAX_BRIGHTNESS, ROWS};

/// Pixie hardware revision
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Variant {
    /// Classic Pixie boards, eight clocks per byte
    #[default]
    Classic,
    /// Pixie PRO boards, an odd-parity bit follows every byte
    Pro,
}

impl Variant {
    /// Whether this revision expects a parity bit after each byte
    pub const fn has_parity(self) -> bool {
        matches!(self, Self::Pro)
    }
}

/// Chain configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Number of 5x7 displays in the chain (two per Pixie board)
    pub displays: u8,
    /// Bit clock timing
    pub timing: Timing,
    /// Mounting orientation
    pub orientation: Orientation,
    /// Hardware revision
    pub variant: Variant,
    /// Brightness level (0..=127) written into new glyph headers
    pub brightness: u8,
}

impl Config {
    /// Required display buffer size in bytes
    pub const fn buffer_size(&self) -> usize {
        self.displays as usize * BYTES_PER_DISPLAY
    }

    /// Width of the chain in visible pixel columns
    pub const fn width(&self) -> usize {
        self.displays as usize * COLUMNS_PER_DISPLAY
    }

    /// Height of the chain in pixel rows
    pub const fn height(&self) -> usize {
        ROWS
    }
}

/// Builder for constructing chain configuration
///
/// # Example
///
/// ```
/// use pixie::{Builder, Orientation};
///
/// let config = match Builder::new().displays(4).orientation(Orientation::Flipped).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.buffer_size(), 32);
/// assert_eq!(config.width(), 20);
/// ```
#[must_use]
pub struct Builder {
    /// Number of displays (required)
    displays: Option<u16>,
    /// Bit clock timing
    timing: Timing,
    /// Mounting orientation
    orientation: Orientation,
    /// Hardware revision
    variant: Variant,
    /// Initial brightness level
    brightness: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            displays: None,
            timing: Timing::new(),
            orientation: Orientation::Normal,
            variant: Variant::Classic,
            // Full brightness, as the boards power up
            brightness: MAX_BRIGHTNESS,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of 5x7 displays in the chain (required)
    pub fn displays(mut self, count: u8) -> Self {
        self.displays = Some(u16::from(count));
        self
    }

    /// Set the number of Pixie boards; each board carries two displays
    ///
    /// More than 127 boards exceeds [`MAX_DISPLAYS`] and is rejected by
    /// [`build`](Self::build).
    pub fn pixies(mut self, boards: u8) -> Self {
        self.displays = Some(u16::from(boards) * 2);
        self
    }

    /// Set the bit clock timing
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Set the mounting orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the hardware revision
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the initial brightness level (clamped to 0..=127)
    pub fn brightness(mut self, level: u8) -> Self {
        self.brightness = level.min(MAX_BRIGHTNESS);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDisplayCount` if the display count was not set
    /// and `BuilderError::InvalidDisplayCount` if it is zero or above [`MAX_DISPLAYS`].
    pub fn build(self) -> Result<Config, BuilderError> {
        let count = self.displays.ok_or(BuilderError::MissingDisplayCount)?;
        let displays = match u8::try_from(count) {
            Ok(displays) if displays > 0 => displays,
            _ => return Err(BuilderError::InvalidDisplayCount { count }),
        };
        Ok(Config {
            displays,
            timing: self.timing,
            orientation: self.orientation,
            variant: self.variant,
            brightness: self.brightness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_display_count() {
        let result = Builder::new().build();
        assert!(matches!(result, Err(BuilderError::MissingDisplayCount)));
    }

    #[test]
    fn test_zero_displays_rejected() {
        let result = Builder::new().displays(0).build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidDisplayCount { count: 0 })
        ));
    }

    #[test]
    fn test_pixies_overflow_rejected() {
        let result = Builder::new().pixies(128).build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidDisplayCount { count: 256 })
        ));

        let config = Builder::new().pixies(127).build().unwrap();
        assert_eq!(config.displays, 254);
    }

    #[test]
    fn test_defaults() {
        let config = Builder::new().displays(2).build().unwrap();
        assert_eq!(config.timing, Timing::default());
        assert_eq!(config.orientation, Orientation::Normal);
        assert_eq!(config.variant, Variant::Classic);
        assert_eq!(config.brightness, 127);
    }

    #[test]
    fn test_pixies_counts_two_displays_per_board() {
        let config = Builder::new().pixies(3).build().unwrap();
        assert_eq!(config.displays, 6);
        assert_eq!(config.buffer_size(), 48);
        assert_eq!(config.width(), 30);
        assert_eq!(config.height(), 7);
    }

    #[test]
    fn test_max_displays_fits() {
        let config = Builder::new().displays(MAX_DISPLAYS).build().unwrap();
        assert_eq!(config.buffer_size(), 255 * 8);
    }

    #[test]
    fn test_brightness_clamped() {
        let config = Builder::new().displays(1).brightness(200).build().unwrap();
        assert_eq!(config.brightness, 127);
    }

    #[test]
    fn test_variant_parity() {
        assert!(Variant::Pro.has_parity());
        assert!(!Variant::Classic.has_parity());
    }
}
