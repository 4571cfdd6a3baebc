//! Drive WS28xx LEDs (WS2812, SK6812 and friends) from a hardware pulse
//! generator fed by DMA.
//!
//! Each bit on the wire is one PWM period whose duty cycle encodes a
//! logical 0 or 1. The [`Strip`] keeps a per-pixel color and brightness
//! model, encodes it into a flat buffer of compare values on every
//! [`Strip::update`], and hands that buffer to a [`TransferEngine`] that
//! streams it out without further CPU involvement.
//!
//! This crate is intended for usage with the `smart-leds` crate: [`Strip`]
//! implements both `SmartLedsWrite` and `SmartLedsWriteAsync`.
//!
//! With the `nrf` feature (or one of the chip features) the [`nrf`] module
//! provides an engine built on the nRF `SequencePwm` peripheral.

#![no_std]

pub mod color;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod gamma;
pub mod guard;
#[cfg(feature = "nrf")]
pub mod nrf;
pub mod pixel;
pub mod strip;
pub mod timing;

pub use color::ChannelOrder;
pub use encoder::{RESOLUTION, buffer_len};
pub use engine::TransferEngine;
pub use error::Error;
pub use gamma::GAMMA8;
pub use guard::{GuardToken, TransferGuard};
pub use pixel::Pixel;
pub use rgb::RGB8;
pub use strip::{Strip, StripConfig};
pub use timing::{ProtocolTiming, PulseTiming};
