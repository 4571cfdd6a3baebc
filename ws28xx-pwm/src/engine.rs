//! Interface to the hardware that streams a pulse buffer to the strip.

use crate::timing::PulseTiming;

/// A timer compare channel fed by a DMA-like block transfer.
///
/// The engine reads one compare value per bit period from the slice
/// handed to [`start`](Self::start). It may keep reading after `start`
/// returns, in which case it must report [`is_busy`](Self::is_busy) until
/// the last slot has gone out. Engines that only return once the frame is
/// on the wire keep the default `is_busy`.
#[allow(async_fn_in_trait)]
pub trait TransferEngine {
    /// Error reported when the timing is rejected or a transfer cannot be
    /// started.
    type Error;

    /// Check or program the bit period. Called once when the strip is
    /// created; an error aborts the strip's creation.
    fn configure(&mut self, _timing: &PulseTiming) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Begin streaming `pulses`.
    fn start(&mut self, pulses: &[u16]) -> Result<(), Self::Error>;

    /// Begin streaming `pulses` from async context.
    ///
    /// Engines that wait for the frame to finish should yield here
    /// instead of blocking the executor.
    async fn start_async(&mut self, pulses: &[u16]) -> Result<(), Self::Error> {
        self.start(pulses)
    }

    /// Whether a previously started transfer is still reading its buffer.
    fn is_busy(&self) -> bool {
        false
    }
}

impl<T: TransferEngine + ?Sized> TransferEngine for &mut T {
    type Error = T::Error;

    fn configure(&mut self, timing: &PulseTiming) -> Result<(), Self::Error> {
        T::configure(self, timing)
    }

    fn start(&mut self, pulses: &[u16]) -> Result<(), Self::Error> {
        T::start(self, pulses)
    }

    async fn start_async(&mut self, pulses: &[u16]) -> Result<(), Self::Error> {
        T::start_async(self, pulses).await
    }

    fn is_busy(&self) -> bool {
        T::is_busy(self)
    }
}
