//! The strip handle: pixel store, pulse buffer, guard and engine of one
//! physical LED chain.

use embassy_time::Timer;
use embedded_hal::delay::DelayNs;
use rgb::RGB8;
use smart_leds_trait::{SmartLedsWrite, SmartLedsWriteAsync};

use crate::color::{self, ChannelOrder};
use crate::encoder::{buffer_len, encode};
use crate::engine::TransferEngine;
use crate::error::Error;
use crate::guard::{POLL_INTERVAL_MS, TransferGuard};
use crate::pixel::{Pixel, PixelStore};
use crate::timing::{ProtocolTiming, PulseTiming};

/// Settings applied uniformly to every operation on one strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StripConfig {
    /// Timer input clock in MHz.
    pub clock_mhz: u32,
    /// Wire order of the color channels.
    pub order: ChannelOrder,
    /// Gamma-correct channels when they are stored.
    pub gamma: bool,
    /// Protocol bit timing.
    pub timing: ProtocolTiming,
}

impl StripConfig {
    /// GRB order, no gamma correction, WS2812 timing.
    pub const fn new(clock_mhz: u32) -> Self {
        Self {
            clock_mhz,
            order: ChannelOrder::Grb,
            gamma: false,
            timing: ProtocolTiming::WS2812,
        }
    }

    #[must_use]
    pub const fn with_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub const fn with_gamma(mut self, gamma: bool) -> Self {
        self.gamma = gamma;
        self
    }

    #[must_use]
    pub const fn with_timing(mut self, timing: ProtocolTiming) -> Self {
        self.timing = timing;
        self
    }
}

/// Driver for one chain of WS28xx-family devices.
///
/// `MAX_PIXELS` is the hard capacity; the actual pixel count is chosen in
/// [`new`](Self::new). The pulse buffer is borrowed for the lifetime of the
/// strip, usually from a `static`, and must hold at least
/// [`buffer_len`]`(pixel_count)` slots. `D` is the sleep used while
/// waiting on the guard or on a running transfer.
pub struct Strip<'a, E, D, const MAX_PIXELS: usize> {
    engine: E,
    delay: D,
    buffer: &'a mut [u16],
    pixels: PixelStore<MAX_PIXELS>,
    timing: PulseTiming,
    guard: TransferGuard,
    config: StripConfig,
}

impl<'a, E: TransferEngine, D, const MAX_PIXELS: usize> Strip<'a, E, D, MAX_PIXELS> {
    /// Set up a strip of `pixel_count` pixels.
    ///
    /// Resolves the pulse thresholds for `config` and hands them to the
    /// engine, which may reject them. Then zeroes the pixels and the pulse
    /// buffer and primes the engine with the first `pixel_count` zero slots.
    pub fn new(
        mut engine: E,
        delay: D,
        buffer: &'a mut [u16],
        pixel_count: usize,
        config: StripConfig,
    ) -> Result<Self, Error<E::Error>> {
        let too_many = Error::TooManyPixels {
            requested: pixel_count,
            max: MAX_PIXELS,
        };
        if pixel_count > MAX_PIXELS {
            return Err(too_many);
        }
        let required = buffer_len(pixel_count);
        if buffer.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                actual: buffer.len(),
            });
        }
        let pixels = PixelStore::new(pixel_count, config.order, config.gamma).ok_or(too_many)?;

        let timing = PulseTiming::new(config.clock_mhz, &config.timing);
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "strip: {} pixels, reload {}, zero {}, one {}",
            pixel_count,
            timing.reload(),
            timing.zero(),
            timing.one()
        );
        engine.configure(&timing).map_err(Error::Configure)?;

        buffer.fill(0);
        if let Err(_err) = engine.start(&buffer[..pixel_count]) {
            #[cfg(feature = "defmt")]
            defmt::warn!("strip: priming transfer failed to start");
        }

        Ok(Self {
            engine,
            delay,
            buffer,
            pixels,
            timing,
            guard: TransferGuard::new(),
            config,
        })
    }

    /// Configured number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Thresholds resolved at creation.
    pub fn timing(&self) -> &PulseTiming {
        &self.timing
    }

    /// Stored entry of pixel `index`.
    pub fn pixel(&self, index: usize) -> Option<Pixel> {
        self.pixels.get(index)
    }

    pub fn pixels(&self) -> &[Pixel] {
        self.pixels.as_slice()
    }

    /// The frame part of the pulse buffer, [`buffer_len`]`(pixel_count)` slots.
    pub fn pulses(&self) -> &[u16] {
        &self.buffer[..buffer_len(self.pixels.len())]
    }

    /// Guard held for every update cycle.
    ///
    /// Updates take `&mut self`, so within one handle the guard is never
    /// contended. It is exposed so that code sharing the strip's pulse
    /// buffer or engine through other paths (an interrupt handler that
    /// restarts the last frame, for instance) can take
    /// [`TransferGuard::try_acquire`] on the same lock.
    pub fn guard(&self) -> &TransferGuard {
        &self.guard
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Set pixel `index` from 8-bit channels. Brightness follows the
    /// brightest channel.
    pub fn set_pixel_rgb(
        &mut self,
        index: usize,
        r: u8,
        g: u8,
        b: u8,
    ) -> Result<(), Error<E::Error>> {
        self.store(index, RGB8::new(r, g, b), None)
    }

    /// Set pixel `index` from a 5-6-5 packed color. Brightness follows the
    /// brightest channel.
    pub fn set_pixel_rgb565(&mut self, index: usize, color: u16) -> Result<(), Error<E::Error>> {
        self.store(index, color::rgb565(color), None)
    }

    /// Set pixel `index` from a `0xRRGGBB` color. Brightness follows the
    /// brightest channel.
    pub fn set_pixel_rgb888(&mut self, index: usize, color: u32) -> Result<(), Error<E::Error>> {
        self.store(index, color::rgb888(color), None)
    }

    /// Set pixel `index` from 8-bit channels with an explicit brightness.
    pub fn set_pixel_rgbw(
        &mut self,
        index: usize,
        r: u8,
        g: u8,
        b: u8,
        brightness: u8,
    ) -> Result<(), Error<E::Error>> {
        self.store(index, RGB8::new(r, g, b), Some(brightness))
    }

    /// Set pixel `index` from a 5-6-5 packed color with an explicit brightness.
    pub fn set_pixel_rgbw565(
        &mut self,
        index: usize,
        color: u16,
        brightness: u8,
    ) -> Result<(), Error<E::Error>> {
        self.store(index, color::rgb565(color), Some(brightness))
    }

    /// Set pixel `index` from a `0xRRGGBB` color with an explicit brightness.
    pub fn set_pixel_rgbw888(
        &mut self,
        index: usize,
        color: u32,
        brightness: u8,
    ) -> Result<(), Error<E::Error>> {
        self.store(index, color::rgb888(color), Some(brightness))
    }

    /// Set the brightness of every pixel, leaving colors untouched.
    pub fn set_all_brightness(&mut self, brightness: u8) {
        self.pixels.set_all_brightness(brightness);
    }

    /// Set the brightness of pixel `index`, leaving its color untouched.
    /// An out-of-range index is ignored.
    pub fn set_one_brightness(&mut self, index: usize, brightness: u8) {
        if !self.pixels.set_brightness(index, brightness) {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "strip: brightness for pixel {} ignored, {} pixels",
                index,
                self.pixels.len()
            );
        }
    }

    /// Encode the pixels and start the transfer, yielding to the executor
    /// while the guard is held or the engine is still busy.
    pub async fn update_async(&mut self) -> Result<(), Error<E::Error>> {
        let _token = self.guard.acquire_async().await;
        while self.engine.is_busy() {
            Timer::after_millis(u64::from(POLL_INTERVAL_MS)).await;
        }
        let frame = Self::render(self.pixels.as_slice(), &self.timing, &mut *self.buffer);
        self.engine.start_async(frame).await.map_err(Error::Transfer)
    }

    fn store(
        &mut self,
        index: usize,
        color: RGB8,
        brightness: Option<u8>,
    ) -> Result<(), Error<E::Error>> {
        let brightness =
            brightness.unwrap_or_else(|| color::max_channel([color.r, color.g, color.b]));
        if self.pixels.set(index, color, brightness) {
            Ok(())
        } else {
            Err(Error::PixelOutOfRange {
                index,
                count: self.pixels.len(),
            })
        }
    }

    /// Store colors from `iterator` starting at pixel 0, brightness
    /// following the brightest channel. Extra items are dropped.
    fn load<T, I>(&mut self, iterator: T)
    where
        T: IntoIterator<Item = I>,
        I: Into<RGB8>,
    {
        let count = self.pixels.len();
        for (index, item) in iterator.into_iter().take(count).enumerate() {
            let color = item.into();
            self.pixels
                .set(index, color, color::max_channel([color.r, color.g, color.b]));
        }
    }

    /// Encode `pixels` into the head of `buffer` and return the frame.
    fn render<'b>(pixels: &[Pixel], timing: &PulseTiming, buffer: &'b mut [u16]) -> &'b [u16] {
        let frame = &mut buffer[..buffer_len(pixels.len())];
        encode(pixels, timing, frame);
        #[cfg(feature = "defmt")]
        defmt::trace!("strip: sending {} slots", frame.len());
        frame
    }
}

impl<E: TransferEngine, D: DelayNs, const MAX_PIXELS: usize> Strip<'_, E, D, MAX_PIXELS> {
    /// Encode the pixels into the pulse buffer and start the transfer.
    ///
    /// Blocks, sleeping on the strip's delay, while another cycle holds the
    /// guard or the engine is still reading the previous frame. If the
    /// engine refuses to start, the buffer already holds the new frame and
    /// is not rolled back.
    pub fn update(&mut self) -> Result<(), Error<E::Error>> {
        let _token = self.guard.acquire(&mut self.delay);
        while self.engine.is_busy() {
            self.delay.delay_ms(POLL_INTERVAL_MS);
        }
        let frame = Self::render(self.pixels.as_slice(), &self.timing, &mut *self.buffer);
        self.engine.start(frame).map_err(Error::Transfer)
    }
}

impl<E: TransferEngine, D: DelayNs, const MAX_PIXELS: usize> SmartLedsWrite
    for Strip<'_, E, D, MAX_PIXELS>
{
    type Error = Error<E::Error>;
    type Color = RGB8;

    /// Write all the items of an iterator to the strip
    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.load(iterator);
        self.update()
    }
}

impl<E: TransferEngine, D, const MAX_PIXELS: usize> SmartLedsWriteAsync
    for Strip<'_, E, D, MAX_PIXELS>
{
    type Error = Error<E::Error>;
    type Color = RGB8;

    /// Write all the items of an iterator to the strip
    async fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.load(iterator);
        self.update_async().await
    }
}
