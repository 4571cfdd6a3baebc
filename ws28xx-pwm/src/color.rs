//! Channel ordering and packed color formats.

use rgb::RGB8;

/// Order in which the three color bytes go out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelOrder {
    /// Red, green, blue.
    Rgb,
    /// Blue, green, red.
    Bgr,
    /// Green, red, blue. WS2812 and SK6812 use this order.
    #[default]
    Grb,
}

impl ChannelOrder {
    /// Arrange `color` into wire order.
    #[inline(always)]
    pub const fn arrange(self, color: RGB8) -> [u8; 3] {
        match self {
            Self::Rgb => [color.r, color.g, color.b],
            Self::Bgr => [color.b, color.g, color.r],
            Self::Grb => [color.g, color.r, color.b],
        }
    }
}

/// Expand a 5-6-5 packed color to 8-bit channels.
///
/// The low bits of each channel are left at zero.
pub const fn rgb565(color: u16) -> RGB8 {
    RGB8 {
        r: ((color >> 8) & 0xF8) as u8,
        g: ((color >> 3) & 0xFC) as u8,
        b: ((color << 3) & 0xF8) as u8,
    }
}

/// Split a `0xRRGGBB` color into 8-bit channels. The top byte is ignored.
pub const fn rgb888(color: u32) -> RGB8 {
    RGB8 {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Largest of the three channels.
#[inline(always)]
pub const fn max_channel(channels: [u8; 3]) -> u8 {
    let [a, b, c] = channels;
    let ab = if a > b { a } else { b };
    if ab > c { ab } else { c }
}
