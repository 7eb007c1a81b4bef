//! Graphics support via embedded-graphics
//!
//! [`Pixie`] implements the [`DrawTarget`] trait from the embedded-graphics
//! ecosystem with [`BinaryColor`] pixels. The drawing surface is the visible
//! LED area only: five columns per display by seven rows. Header bytes are
//! never touched, so brightness survives any drawing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Line, PrimitiveStyle, Rectangle},
//! };
//! use pixie::{Builder, Interface, Pixie};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! # let config = match Builder::new().displays(4).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let interface = Interface::new(MockPin, MockPin, config.timing);
//! let mut pixie = Pixie::new(interface, config, [0u8; 32]);
//!
//! // Frame around the whole chain
//! let _ = Rectangle::new(Point::zero(), pixie.size())
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut pixie);
//!
//! // Diagonal through the middle
//! let _ = Line::new(Point::new(2, 1), Point::new(17, 5))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut pixie);
//!
//! let _ = pixie.show(&mut delay);
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::display::Pixie;
use crate::interface::PixieInterface;

impl<I, B> DrawTarget for Pixie<I, B>
where
    I: PixieInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            let (Ok(x), Ok(y)) = (u16::try_from(x), u8::try_from(y)) else {
                continue;
            };
            self.set_pix(x, y, color.is_on());
        }

        Ok(())
    }
}

impl<I, B> OriginDimensions for Pixie<I, B>
where
    I: PixieInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    fn size(&self) -> Size {
        let config = self.config();
        Size::new(config.width() as u32, config.height() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use embedded_graphics::primitives::{Line, Primitive, PrimitiveStyle, Rectangle};
    use embedded_graphics::Drawable;
    use embedded_hal::delay::DelayNs;

    #[derive(Debug)]
    struct MockInterface;

    impl PixieInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send_bit<D: DelayNs>(&mut self, _bit: bool, _delay: &mut D) -> Result<(), Self::Error> {
            Ok(())
        }

        fn end_byte<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            Ok(())
        }

        fn latch<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn test_pixie(displays: u8) -> Pixie<MockInterface, [u8; 16]> {
        let config = Builder::new().displays(displays).build().unwrap();
        Pixie::new(MockInterface, config, [0u8; 16])
    }

    #[test]
    fn test_size_is_visible_area() {
        assert_eq!(test_pixie(2).size(), Size::new(10, 7));
        assert_eq!(test_pixie(1).size(), Size::new(5, 7));
    }

    #[test]
    fn test_line_matches_draw_line() {
        let mut drawn = test_pixie(2);
        Line::new(Point::new(0, 0), Point::new(9, 6))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut drawn)
            .unwrap();

        let mut native = test_pixie(2);
        native.draw_line(0, 0, 9, 6);

        let lit = (0..10u16)
            .flat_map(|x| (0..7u8).map(move |y| (x, y)))
            .filter(|(x, y)| drawn.pixel(*x, *y) == Some(true))
            .count();
        assert!(lit >= 10);
        assert_eq!(drawn.pixel(0, 0), Some(true));
        assert_eq!(drawn.pixel(9, 6), Some(true));
        assert_eq!(native.pixel(9, 6), Some(true));
    }

    #[test]
    fn test_fill_skips_headers_and_clips() {
        let mut pixie = test_pixie(2);
        Rectangle::new(Point::new(-3, -3), Size::new(40, 40))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut pixie)
            .unwrap();
        for block in pixie.buffer().chunks(8) {
            assert_eq!(&block[..3], &[0, 0, 0]);
            assert_eq!(&block[3..], &[0x7F; 5]);
        }
    }

    #[test]
    fn test_clear_off_keeps_headers() {
        let mut pixie = test_pixie(1);
        pixie.write_char('#', 0);
        DrawTarget::clear(&mut pixie, BinaryColor::Off).unwrap();
        assert_eq!(&pixie.buffer()[3..], &[0; 5]);
        assert_eq!(pixie.buffer()[1], 0xFF);
    }
}
