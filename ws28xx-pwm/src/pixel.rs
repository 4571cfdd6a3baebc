//! Per-pixel color and brightness storage.

use heapless::Vec;
use rgb::RGB8;

use crate::color::{ChannelOrder, max_channel};
use crate::gamma;

/// One pixel: channel bytes in wire order plus an independent brightness.
///
/// Brightness is applied only when the strip is encoded; the stored
/// channels are never rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pixel {
    /// Channel bytes in wire order (already gamma-corrected if enabled).
    pub channels: [u8; 3],
    /// Brightness scalar, 0 is off.
    pub brightness: u8,
}

impl Pixel {
    /// All channels and brightness zero.
    pub const OFF: Self = Self {
        channels: [0; 3],
        brightness: 0,
    };

    /// Largest stored channel value.
    pub const fn max_channel(&self) -> u8 {
        max_channel(self.channels)
    }
}

/// Fixed-capacity pixel store, sized once on creation.
#[derive(Debug, Clone)]
pub(crate) struct PixelStore<const MAX: usize> {
    pixels: Vec<Pixel, MAX>,
    order: ChannelOrder,
    gamma: bool,
}

impl<const MAX: usize> PixelStore<MAX> {
    /// Zeroed store of `count` pixels. `count` must not exceed `MAX`.
    pub(crate) fn new(count: usize, order: ChannelOrder, gamma: bool) -> Option<Self> {
        let mut pixels = Vec::new();
        pixels.resize(count, Pixel::OFF).ok()?;
        Some(Self {
            pixels,
            order,
            gamma,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.pixels.len()
    }

    pub(crate) fn as_slice(&self) -> &[Pixel] {
        &self.pixels
    }

    pub(crate) fn get(&self, index: usize) -> Option<Pixel> {
        self.pixels.get(index).copied()
    }

    /// Store `color` at `index`, in wire order and gamma-corrected if
    /// enabled. Returns `false` without writing if `index` is out of range.
    pub(crate) fn set(&mut self, index: usize, color: RGB8, brightness: u8) -> bool {
        let order = self.order;
        let gamma = self.gamma;
        let Some(pixel) = self.pixels.get_mut(index) else {
            return false;
        };
        let mut channels = order.arrange(color);
        if gamma {
            for channel in &mut channels {
                *channel = gamma::correct(*channel);
            }
        }
        *pixel = Pixel {
            channels,
            brightness,
        };
        true
    }

    pub(crate) fn set_brightness(&mut self, index: usize, brightness: u8) -> bool {
        match self.pixels.get_mut(index) {
            Some(pixel) => {
                pixel.brightness = brightness;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_all_brightness(&mut self, brightness: u8) {
        for pixel in self.pixels.iter_mut() {
            pixel.brightness = brightness;
        }
    }
}
