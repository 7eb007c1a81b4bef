//! Pixie LED Matrix Driver
//!
//! A driver for "Pixie" chainable 5x7 LED matrix displays. Each Pixie board
//! carries two displays; boards are chained on a two-wire CLOCK/DATA bus that
//! is bit-banged from any pair of GPIO outputs.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Text, numbers and icons with a built-in 5x7 font
//! - `write`/`print` placement, `push`/`shift` scrolling, message scrolling
//! - Upside-down mounting and the parity bit of Pixie PRO boards
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use pixie::{Builder, Interface, Pixie};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let clk = MockPin;
//! # let dat = MockPin;
//! # let mut delay = MockDelay;
//! let config = match Builder::new().pixies(3).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let interface = Interface::new(clk, dat, config.timing);
//!
//! let mut pixie = Pixie::new(interface, config, [0u8; 48]);
//! let _ = pixie.begin(&mut delay);
//!
//! pixie.write("Hello", 0);
//! let _ = pixie.show(&mut delay);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Chain configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Built-in 5x7 font
pub mod font;
/// Hardware interface abstraction
pub mod interface;
/// Chain orientation remapping
pub mod orientation;
/// Wire protocol constants and timing
pub mod protocol;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use config::{Builder, Config, Variant};
pub use display::{Pixie, TEXT_CAPACITY};
pub use error::{BuilderError, Error, MAX_DISPLAYS};
pub use font::{Glyph, glyph};
pub use interface::{Interface, InterfaceError, PixieInterface};
pub use orientation::Orientation;
pub use protocol::Timing;
