//! Hardware interface abstraction
//!
//! This module provides the [`PixieInterface`] trait and the [`Interface`] struct
//! for clocking bits into a Pixie chain over two GPIO lines.
//!
//! ## Hardware Requirements
//!
//! A Pixie chain needs two push-pull outputs:
//! - **CLK**: bit clock, data is sampled on the rising edge
//! - **DAT**: serial data
//!
//! Any HAL pin implementing [`OutputPin`] works; the pin write cost of the
//! target adds to the configured [`Timing`] waits.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use pixie::{Interface, PixieInterface, Timing};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! // Create interface with clock and data pins
//! let mut interface = Interface::new(MockPin, MockPin, Timing::default());
//!
//! // Reset the chain
//! let _ = interface.reset(&mut delay);
//!
//! // Clock one byte, then let the chain latch
//! let _ = interface.send_byte(0xA5, false, &mut delay);
//! let _ = interface.latch(&mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::protocol::{Timing, odd_parity};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the two-wire link to a Pixie chain
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Pixie`](crate::display::Pixie) driver to work with any
/// pin implementation, or with something that is not a pin at all (a PIO
/// state machine, a test recorder).
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Only the four
/// primitive operations are required; [`send_byte`](Self::send_byte) is
/// built from them.
pub trait PixieInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Clock a single bit
    ///
    /// The implementation must:
    /// 1. Drive DAT to `bit`
    /// 2. Raise CLK and hold it for the high half-period
    /// 3. Lower CLK and hold it for the low half-period
    #[allow(clippy::type_complexity)]
    fn send_bit<D: DelayNs>(&mut self, bit: bool, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Rest between two bytes
    #[allow(clippy::type_complexity)]
    fn end_byte<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Idle after a complete frame so the chain latches what it received
    #[allow(clippy::type_complexity)]
    fn latch<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Send the reset pulse
    ///
    /// The implementation must hold CLK high for the reset high time, then
    /// low for the reset low time.
    #[allow(clippy::type_complexity)]
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Clock a byte MSB first, optionally followed by its odd-parity bit
    #[allow(clippy::type_complexity)]
    fn send_byte<D: DelayNs>(
        &mut self,
        byte: u8,
        parity: bool,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error> {
        for i in (0..8).rev() {
            self.send_bit(byte & (1 << i) != 0, delay)?;
        }
        if parity {
            self.send_bit(odd_parity(byte), delay)?;
        }
        self.end_byte(delay)
    }
}

/// Errors that can occur at the interface level
///
/// Generic over the GPIO error type.
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Bit-banged interface over two output pins
///
/// Implements [`PixieInterface`] for embedded-hal v1.0 GPIO traits.
///
/// ## Type Parameters
///
/// * `CLK` - Clock pin implementing [`OutputPin`]
/// * `DAT` - Data pin implementing [`OutputPin`]
pub struct Interface<CLK, DAT> {
    /// Clock pin
    clk: CLK,
    /// Data pin
    dat: DAT,
    /// Bit clock timing
    timing: Timing,
}

impl<CLK, DAT> Interface<CLK, DAT>
where
    CLK: OutputPin,
    DAT: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `clk` - Clock pin (output)
    /// * `dat` - Data pin (output)
    /// * `timing` - Bit clock timing, usually `config.timing`
    pub fn new(clk: CLK, dat: DAT, timing: Timing) -> Self {
        Self { clk, dat, timing }
    }

    /// Replace the bit clock timing
    pub fn set_timing(&mut self, timing: Timing) -> &mut Self {
        self.timing = timing;
        self
    }

    /// Get the current bit clock timing
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Give the pins back
    pub fn release(self) -> (CLK, DAT) {
        (self.clk, self.dat)
    }
}

impl<CLK, DAT, PinErr> PixieInterface for Interface<CLK, DAT>
where
    CLK: OutputPin<Error = PinErr>,
    DAT: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn send_bit<D: DelayNs>(&mut self, bit: bool, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        if bit {
            self.dat.set_high().map_err(InterfaceError::Pin)?;
        } else {
            self.dat.set_low().map_err(InterfaceError::Pin)?;
        }
        self.clk.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_us(self.timing.clock_high_us);
        self.clk.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_us(self.timing.clock_low_us);
        Ok(())
    }

    fn end_byte<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        delay.delay_us(self.timing.byte_gap_us);
        Ok(())
    }

    fn latch<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        delay.delay_ms(self.timing.latch_ms);
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        // Reset sequence: CLK HIGH -> wait 15ms -> LOW -> wait 10ms
        self.clk.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(self.timing.reset_high_ms);
        self.clk.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(self.timing.reset_low_ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use embedded_hal::digital::ErrorType;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Clk(bool),
        Dat(bool),
        DelayUs(u32),
        DelayMs(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug, Clone, Copy)]
    struct MockError;

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    struct RecordingPin {
        log: Log,
        is_clock: bool,
        fail: bool,
    }

    impl ErrorType for RecordingPin {
        type Error = MockError;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.record(false)
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.record(true)
        }
    }

    impl RecordingPin {
        fn record(&mut self, level: bool) -> Result<(), MockError> {
            if self.fail {
                return Err(MockError);
            }
            let event = if self.is_clock {
                Event::Clk(level)
            } else {
                Event::Dat(level)
            };
            self.log.borrow_mut().push(event);
            Ok(())
        }
    }

    struct RecordingDelay {
        log: Log,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_us(&mut self, us: u32) {
            self.log.borrow_mut().push(Event::DelayUs(us));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::DelayMs(ms));
        }
    }

    fn recording_interface(timing: Timing) -> (Interface<RecordingPin, RecordingPin>, RecordingDelay, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let clk = RecordingPin {
            log: log.clone(),
            is_clock: true,
            fail: false,
        };
        let dat = RecordingPin {
            log: log.clone(),
            is_clock: false,
            fail: false,
        };
        let delay = RecordingDelay { log: log.clone() };
        (Interface::new(clk, dat, timing), delay, log)
    }

    /// Data level at every rising clock edge
    fn sampled_bits(log: &[Event]) -> Vec<bool> {
        let mut dat = false;
        let mut bits = Vec::new();
        for event in log {
            match *event {
                Event::Dat(level) => dat = level,
                Event::Clk(true) => bits.push(dat),
                _ => {}
            }
        }
        bits
    }

    #[test]
    fn test_send_bit_waveform() {
        let (mut interface, mut delay, log) = recording_interface(Timing::new().with_clock(3, 7));
        interface.send_bit(true, &mut delay).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::Dat(true),
                Event::Clk(true),
                Event::DelayUs(3),
                Event::Clk(false),
                Event::DelayUs(7),
            ]
        );
    }

    #[test]
    fn test_send_byte_msb_first_with_gap() {
        let (mut interface, mut delay, log) = recording_interface(Timing::default());
        interface.send_byte(0b1000_0001, false, &mut delay).unwrap();
        let log = log.borrow();
        assert_eq!(
            sampled_bits(&log),
            [true, false, false, false, false, false, false, true]
        );
        assert_eq!(log.last(), Some(&Event::DelayUs(12)));
    }

    #[test]
    fn test_send_byte_with_parity_adds_ninth_clock() {
        let (mut interface, mut delay, log) = recording_interface(Timing::default());
        interface.send_byte(0x03, true, &mut delay).unwrap();
        let bits = sampled_bits(&log.borrow());
        assert_eq!(bits.len(), 9);
        assert!(bits[8]);
        assert_eq!(bits.iter().filter(|bit| **bit).count() % 2, 1);
    }

    #[test]
    fn test_reset_pulse() {
        let (mut interface, mut delay, log) = recording_interface(Timing::default());
        interface.reset(&mut delay).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::Clk(true),
                Event::DelayMs(15),
                Event::Clk(false),
                Event::DelayMs(10),
            ]
        );
    }

    #[test]
    fn test_latch_waits() {
        let (mut interface, mut delay, log) = recording_interface(Timing::new().with_latch(9));
        interface.latch(&mut delay).unwrap();
        assert_eq!(log.borrow().as_slice(), &[Event::DelayMs(9)]);
    }

    #[test]
    fn test_pin_error_propagates() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let clk = RecordingPin {
            log: log.clone(),
            is_clock: true,
            fail: true,
        };
        let dat = RecordingPin {
            log: log.clone(),
            is_clock: false,
            fail: false,
        };
        let mut delay = RecordingDelay { log };
        let mut interface = Interface::new(clk, dat, Timing::default());
        let result = interface.send_byte(0xFF, false, &mut delay);
        assert!(matches!(result, Err(InterfaceError::Pin(MockError))));
    }

    #[test]
    fn test_set_timing() {
        let (mut interface, _, _) = recording_interface(Timing::default());
        assert_eq!(interface.timing(), Timing::default());
        interface.set_timing(Timing::new().with_clock(1, 1));
        assert_eq!(interface.timing().clock_high_us, 1);
    }
}
