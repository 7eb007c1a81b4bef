//! Core display operations

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::error::Error;
use crate::font::{Glyph, glyph};
use crate::interface::PixieInterface;
use crate::orientation::{Orientation, physical_byte};
use crate::protocol::{
    BRIGHTNESS_OFFSET, BYTES_PER_DISPLAY, COLUMNS_PER_DISPLAY, HEADER_BYTES, MAX_BRIGHTNESS, ROWS,
    brightness_header,
};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Longest formatted number the `*_int`, `*_uint` and `*_float` helpers accept
pub const TEXT_CAPACITY: usize = 48;

/// Core driver for a Pixie chain
///
/// Holds the display buffer and the link to the chain. Every helper only
/// touches the buffer; nothing reaches the LEDs until [`show`](Self::show).
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`PixieInterface`]
/// * `B` - Buffer type, at least `config.buffer_size()` bytes
///
/// ## Example
///
/// ```rust,no_run
/// use core::fmt::Write;
/// use embedded_hal::delay::DelayNs;
/// use embedded_hal::digital::OutputPin;
/// use pixie::{Builder, Interface, Pixie};
/// # use core::convert::Infallible;
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// # let mut delay = MockDelay;
/// let config = match Builder::new().pixies(2).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let interface = Interface::new(MockPin, MockPin, config.timing);
/// let mut pixie = Pixie::new(interface, config, [0u8; 32]);
/// let _ = pixie.begin(&mut delay);
///
/// let _ = write!(pixie, "T={}", 21);
/// let _ = pixie.show(&mut delay);
/// ```
pub struct Pixie<I, B>
where
    I: PixieInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    /// Link to the chain
    interface: I,
    /// Chain configuration
    config: Config,
    /// Display buffer, in logical order
    buffer: B,
    /// Display that the next `print` starts at
    cursor: u8,
}

impl<I, B> Pixie<I, B>
where
    I: PixieInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    /// Create a new Pixie driver
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is smaller than `config.buffer_size()`.
    pub fn new(interface: I, config: Config, buffer: B) -> Self {
        let required = config.buffer_size();
        assert!(
            buffer.as_ref().len() >= required,
            "buffer too small: required {} bytes, got {}",
            required,
            buffer.as_ref().len()
        );
        Self {
            interface,
            config,
            buffer,
            cursor: 0,
        }
    }

    /// Try to create a new Pixie driver, returning an error if the buffer is too small
    ///
    /// This is the fallible version of [`new`](Self::new).
    pub fn try_new(interface: I, config: Config, buffer: B) -> Result<Self, Error<I>> {
        let required = config.buffer_size();
        if buffer.as_ref().len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: buffer.as_ref().len(),
            });
        }
        Ok(Self {
            interface,
            config,
            buffer,
            cursor: 0,
        })
    }

    /// Clear the buffer and reset the chain
    pub fn begin<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.clear();
        self.reset(delay)
    }

    /// Send the reset pulse
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!("pixie: reset, {} displays", self.config.displays);
        self.interface.reset(delay).map_err(Error::Interface)
    }

    /// Clock the whole buffer out to the chain
    ///
    /// Blocks for roughly [`Timing::frame_us`](crate::protocol::Timing::frame_us).
    pub fn show<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let len = self.config.buffer_size();
        let orientation = self.config.orientation;
        let parity = self.config.variant.has_parity();
        log::trace!("pixie: show {len} bytes, {orientation:?}");

        let frame = &self.buffer.as_ref()[..len];
        for index in 0..len {
            let byte = physical_byte(frame, index, orientation);
            self.interface
                .send_byte(byte, parity, delay)
                .map_err(Error::Interface)?;
        }
        self.interface.latch(delay).map_err(Error::Interface)
    }

    /// Blank every display and move the cursor home
    pub fn clear(&mut self) {
        self.frame_mut().fill(0);
        self.cursor = 0;
    }

    /// Select whether the chain is mounted upside down
    pub fn flipped(&mut self, enable: bool) {
        self.config.orientation = Orientation::from_flipped(enable);
        log::debug!("pixie: orientation {:?}", self.config.orientation);
    }

    /// Set the brightness of every display (0..=127, higher values are clamped)
    ///
    /// Also becomes the brightness of glyphs written afterwards.
    pub fn brightness(&mut self, level: u8) {
        self.config.brightness = level.min(MAX_BRIGHTNESS);
        let header = self.header();
        for block in self.frame_mut().chunks_exact_mut(BYTES_PER_DISPLAY) {
            block[BRIGHTNESS_OFFSET] = header;
        }
        log::debug!("pixie: brightness {}", self.config.brightness);
    }

    /// Set the brightness of display `pos` only
    pub fn write_brightness(&mut self, level: u8, pos: u8) {
        if let Some(block) = self.block_mut(pos) {
            block[BRIGHTNESS_OFFSET] = brightness_header(level);
        }
    }

    /// Move the position the next `print` starts at
    pub fn set_cursor(&mut self, pos: u8) {
        self.cursor = pos;
    }

    /// Write raw columns (an icon) to display `pos`
    pub fn write_icon(&mut self, icon: Glyph, pos: u8) {
        let block = self.glyph_block(icon);
        if let Some(target) = self.block_mut(pos) {
            target.copy_from_slice(&block);
        }
    }

    /// Write a character to display `pos`
    pub fn write_char(&mut self, ch: char, pos: u8) {
        self.write_icon(glyph(ch), pos);
    }

    /// Write text starting at display `pos`, clipped at the end of the chain
    ///
    /// Returns the number of characters in `text`, including clipped ones.
    pub fn write(&mut self, text: &str, pos: u8) -> usize {
        let mut count = 0;
        for (i, ch) in text.chars().enumerate() {
            if let Ok(target) = u8::try_from(pos as usize + i) {
                self.write_char(ch, target);
            }
            count += 1;
        }
        count
    }

    /// Write a signed integer starting at display `pos`
    pub fn write_int(&mut self, value: i32, pos: u8) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value}"))?;
        self.write(&text, pos);
        Ok(())
    }

    /// Write an unsigned integer starting at display `pos`
    pub fn write_uint(&mut self, value: u32, pos: u8) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value}"))?;
        self.write(&text, pos);
        Ok(())
    }

    /// Write a number with `places` decimals starting at display `pos`
    pub fn write_float(&mut self, value: f64, places: u8, pos: u8) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value:.*}", places as usize))?;
        self.write(&text, pos);
        Ok(())
    }

    /// Overwrite a single buffer byte
    ///
    /// `index` addresses the raw buffer, headers included. Out-of-range
    /// indexes are ignored.
    pub fn write_byte(&mut self, column: u8, index: u16) {
        if let Some(byte) = self.frame_mut().get_mut(index as usize) {
            *byte = column;
        }
    }

    /// Write a character at the cursor and advance it
    pub fn print_char(&mut self, ch: char) {
        self.write_char(ch, self.cursor);
        self.advance(1);
    }

    /// Write an icon at the cursor and advance it
    pub fn print_icon(&mut self, icon: Glyph) {
        self.write_icon(icon, self.cursor);
        self.advance(1);
    }

    /// Write text at the cursor and advance past it
    pub fn print(&mut self, text: &str) {
        let count = self.write(text, self.cursor);
        self.advance(count);
    }

    /// Write a signed integer at the cursor and advance past it
    pub fn print_int(&mut self, value: i32) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value}"))?;
        self.print(&text);
        Ok(())
    }

    /// Write an unsigned integer at the cursor and advance past it
    pub fn print_uint(&mut self, value: u32) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value}"))?;
        self.print(&text);
        Ok(())
    }

    /// Write a number with `places` decimals at the cursor and advance past it
    pub fn print_float(&mut self, value: f64, places: u8) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value:.*}", places as usize))?;
        self.print(&text);
        Ok(())
    }

    /// Shift the buffer one byte towards the start, `column` enters at the end
    ///
    /// The first byte falls off.
    pub fn push_byte(&mut self, column: u8) {
        let frame = self.frame_mut();
        let last = frame.len() - 1;
        frame.copy_within(1.., 0);
        frame[last] = column;
    }

    /// Push a whole icon block in from the end of the chain
    pub fn push_icon(&mut self, icon: Glyph) {
        for byte in self.glyph_block(icon) {
            self.push_byte(byte);
        }
    }

    /// Push a character in from the end of the chain
    pub fn push_char(&mut self, ch: char) {
        self.push_icon(glyph(ch));
    }

    /// Push text in from the end of the chain, one character at a time
    pub fn push(&mut self, text: &str) {
        for ch in text.chars() {
            self.push_char(ch);
        }
    }

    /// Push a signed integer in from the end of the chain
    pub fn push_int(&mut self, value: i32) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value}"))?;
        self.push(&text);
        Ok(())
    }

    /// Push an unsigned integer in from the end of the chain
    pub fn push_uint(&mut self, value: u32) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value}"))?;
        self.push(&text);
        Ok(())
    }

    /// Push a number with `places` decimals in from the end of the chain
    pub fn push_float(&mut self, value: f64, places: u8) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value:.*}", places as usize))?;
        self.push(&text);
        Ok(())
    }

    /// Shift the buffer one byte towards the end, `column` enters at the start
    ///
    /// The last byte falls off.
    pub fn shift_byte(&mut self, column: u8) {
        let frame = self.frame_mut();
        let last = frame.len() - 1;
        frame.copy_within(..last, 1);
        frame[0] = column;
    }

    /// Shift a whole icon block in from the start of the chain
    pub fn shift_icon(&mut self, icon: Glyph) {
        for byte in self.glyph_block(icon).into_iter().rev() {
            self.shift_byte(byte);
        }
    }

    /// Shift a character in from the start of the chain
    pub fn shift_char(&mut self, ch: char) {
        self.shift_icon(glyph(ch));
    }

    /// Shift text in from the start of the chain
    ///
    /// The last character goes first so the text reads left to right.
    pub fn shift(&mut self, text: &str) {
        for ch in text.chars().rev() {
            self.shift_char(ch);
        }
    }

    /// Shift a signed integer in from the start of the chain
    pub fn shift_int(&mut self, value: i32) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value}"))?;
        self.shift(&text);
        Ok(())
    }

    /// Shift an unsigned integer in from the start of the chain
    pub fn shift_uint(&mut self, value: u32) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value}"))?;
        self.shift(&text);
        Ok(())
    }

    /// Shift a number with `places` decimals in from the start of the chain
    pub fn shift_float(&mut self, value: f64, places: u8) -> DisplayResult<I> {
        let text = Self::format_text(format_args!("{value:.*}", places as usize))?;
        self.shift(&text);
        Ok(())
    }

    /// Turn a single LED on or off
    ///
    /// `x` counts visible columns across the whole chain (five per display),
    /// `y` counts rows from the top. Out-of-range pixels are ignored.
    pub fn set_pix(&mut self, x: u16, y: u8, on: bool) {
        if let Some((index, mask)) = self.pixel_location(x, y) {
            let byte = &mut self.frame_mut()[index];
            if on {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
    }

    /// Read a single LED, `None` when out of range
    pub fn pixel(&self, x: u16, y: u8) -> Option<bool> {
        self.pixel_location(x, y)
            .map(|(index, mask)| self.frame()[index] & mask != 0)
    }

    /// Draw a line with Bresenham's algorithm
    ///
    /// Endpoints may lie outside the chain; only visible pixels are set.
    pub fn draw_line(&mut self, x1: i16, y1: i16, x2: i16, y2: i16) {
        let (mut x, mut y) = (i32::from(x1), i32::from(y1));
        let (x2, y2) = (i32::from(x2), i32::from(y2));
        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if let (Ok(px), Ok(py)) = (u16::try_from(x), u8::try_from(y)) {
                self.set_pix(px, py, true);
            }
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Number of displays a signed integer occupies
    pub fn get_length_int(&self, value: i32) -> usize {
        text_length(format_args!("{value}"))
    }

    /// Number of displays an unsigned integer occupies
    pub fn get_length_uint(&self, value: u32) -> usize {
        text_length(format_args!("{value}"))
    }

    /// Number of displays a number with `places` decimals occupies
    pub fn get_length_float(&self, value: f64, places: u8) -> usize {
        text_length(format_args!("{value:.*}", places as usize))
    }

    /// Scroll a message across the chain from the right
    ///
    /// The buffer is cleared first. Without `instant` the message moves one
    /// column per frame; with `instant` it moves a whole character per frame.
    /// `wait_ms` is spent after every character. The message finally scrolls
    /// out, leaving the chain blank.
    pub fn scroll_message<D: DelayNs>(
        &mut self,
        text: &str,
        wait_ms: u32,
        instant: bool,
        delay: &mut D,
    ) -> DisplayResult<I> {
        log::debug!("pixie: scroll {} chars, instant={instant}", text.chars().count());
        self.clear();
        for ch in text.chars() {
            self.scroll_in(glyph(ch), instant, delay)?;
            delay.delay_ms(wait_ms);
        }
        for _ in 0..self.config.displays {
            if instant {
                self.push_block([0; BYTES_PER_DISPLAY]);
                self.show(delay)?;
            } else {
                for _ in 0..BYTES_PER_DISPLAY {
                    self.push_byte(0);
                    self.show(delay)?;
                }
            }
            delay.delay_ms(wait_ms);
        }
        Ok(())
    }

    /// Log the buffer, one line per display
    pub fn dump_buffer(&self) {
        for (display, block) in self.frame().chunks_exact(BYTES_PER_DISPLAY).enumerate() {
            log::info!("pixie: display {display}: {block:02X?}");
        }
    }

    /// Get the chain configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of displays in the chain
    pub fn displays(&self) -> u8 {
        self.config.displays
    }

    /// Display the next `print` starts at
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// The display buffer in logical order
    pub fn buffer(&self) -> &[u8] {
        self.frame()
    }

    /// Access the underlying interface mutably
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Give the interface and buffer back
    pub fn release(self) -> (I, B) {
        (self.interface, self.buffer)
    }

    /// Current brightness header byte
    fn header(&self) -> u8 {
        brightness_header(self.config.brightness)
    }

    /// A full display block for `icon`
    fn glyph_block(&self, icon: Glyph) -> [u8; BYTES_PER_DISPLAY] {
        let mut block = [0; BYTES_PER_DISPLAY];
        block[BRIGHTNESS_OFFSET] = self.header();
        block[HEADER_BYTES..].copy_from_slice(&icon);
        block
    }

    fn push_block(&mut self, block: [u8; BYTES_PER_DISPLAY]) {
        for byte in block {
            self.push_byte(byte);
        }
    }

    fn scroll_in<D: DelayNs>(&mut self, icon: Glyph, instant: bool, delay: &mut D) -> DisplayResult<I> {
        let block = self.glyph_block(icon);
        if instant {
            self.push_block(block);
            return self.show(delay);
        }
        for byte in block {
            self.push_byte(byte);
            self.show(delay)?;
        }
        Ok(())
    }

    fn advance(&mut self, count: usize) {
        let count = u8::try_from(count).unwrap_or(u8::MAX);
        self.cursor = self.cursor.saturating_add(count);
    }

    fn frame(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.config.buffer_size()]
    }

    fn frame_mut(&mut self) -> &mut [u8] {
        let len = self.config.buffer_size();
        &mut self.buffer.as_mut()[..len]
    }

    fn block_mut(&mut self, pos: u8) -> Option<&mut [u8]> {
        if pos >= self.config.displays {
            return None;
        }
        let start = pos as usize * BYTES_PER_DISPLAY;
        Some(&mut self.frame_mut()[start..start + BYTES_PER_DISPLAY])
    }

    fn pixel_location(&self, x: u16, y: u8) -> Option<(usize, u8)> {
        let x = x as usize;
        if x >= self.config.width() || y as usize >= ROWS {
            return None;
        }
        let index = (x / COLUMNS_PER_DISPLAY) * BYTES_PER_DISPLAY
            + HEADER_BYTES
            + x % COLUMNS_PER_DISPLAY;
        Some((index, 1 << y))
    }

    fn format_text(args: fmt::Arguments<'_>) -> Result<heapless::String<TEXT_CAPACITY>, Error<I>> {
        let mut text = heapless::String::new();
        fmt::write(&mut text, args).map_err(|_| Error::Format)?;
        Ok(text)
    }
}

/// Prints at the cursor, so `write!` behaves like [`Pixie::print`]
impl<I, B> fmt::Write for Pixie<I, B>
where
    I: PixieInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        Ok(())
    }
}

/// Counts characters without storing them
struct CharCounter(usize);

impl fmt::Write for CharCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.chars().count();
        Ok(())
    }
}

fn text_length(args: fmt::Arguments<'_>) -> usize {
    let mut counter = CharCounter(0);
    // Counting never fails
    let _ = fmt::write(&mut counter, args);
    counter.0
}
