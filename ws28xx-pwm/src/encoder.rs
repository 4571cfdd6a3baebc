//! Pixel store to pulse buffer encoding.
//!
//! Layout of a frame of `n` pixels:
//!
//! ```text
//! [0] [pixel 0: 24 slots] ... [pixel n-1: 24 slots] [0]
//! ```
//!
//! The leading and trailing zero slots hold the line low around the data.
//! Every data slot is the compare value of a logical 0 or 1, most
//! significant bit of the first wire channel first.

use crate::pixel::Pixel;
use crate::timing::PulseTiming;

/// Bits sent per pixel.
pub const BITS_PER_PIXEL: usize = 24;

/// Fixed-point scale used for the brightness factor, so the per-pixel
/// factor keeps its fractional part through integer division.
pub const RESOLUTION: u32 = 1024;

/// Number of pulse slots for a frame of `pixels`.
pub const fn buffer_len(pixels: usize) -> usize {
    pixels * BITS_PER_PIXEL + 2
}

/// Channel bytes of `pixel` scaled so its brightest channel lands on its
/// brightness. `None` means the pixel is sent dark.
///
/// `scale = RESOLUTION * brightness / max` and each channel becomes
/// `channel * scale / RESOLUTION`. A pixel with all channels at zero is
/// dark whatever its brightness.
pub fn scale_channels(pixel: &Pixel) -> Option<[u8; 3]> {
    if pixel.brightness == 0 {
        return None;
    }
    let max = u32::from(pixel.max_channel());
    if max == 0 {
        return None;
    }
    let scale = RESOLUTION * u32::from(pixel.brightness) / max;
    Some(pixel.channels.map(|channel| {
        let scaled = u32::from(channel) * scale / RESOLUTION;
        u8::try_from(scaled).unwrap_or(u8::MAX)
    }))
}

/// Write `pixels` into `frame` using the thresholds of `timing`.
///
/// `frame` should hold at least [`buffer_len`]`(pixels.len())` slots;
/// pixels that do not fit are skipped and slots past the frame are left
/// untouched.
pub fn encode(pixels: &[Pixel], timing: &PulseTiming, frame: &mut [u16]) {
    debug_assert!(frame.len() >= buffer_len(pixels.len()));
    let Some((head, rest)) = frame.split_first_mut() else {
        return;
    };
    *head = 0;

    for (pixel, slots) in pixels.iter().zip(rest.chunks_mut(BITS_PER_PIXEL)) {
        match scale_channels(pixel) {
            None => slots.fill(timing.zero()),
            Some([c0, c1, c2]) => {
                let color = (u32::from(c0) << 16) | (u32::from(c1) << 8) | u32::from(c2);
                for (i, slot) in slots.iter_mut().enumerate() {
                    let bit = (color >> (BITS_PER_PIXEL - i - 1)) & 1;
                    *slot = timing.pulse(bit == 1);
                }
            }
        }
    }

    if let Some(tail) = rest.get_mut(pixels.len() * BITS_PER_PIXEL) {
        *tail = 0;
    }
}
