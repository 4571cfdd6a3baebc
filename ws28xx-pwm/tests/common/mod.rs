#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use ws28xx_pwm::{PulseTiming, TransferEngine};

/// Engine that records every frame it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub configured: Option<PulseTiming>,
    /// Only timing this engine can run; anything else is refused.
    pub supported: Option<PulseTiming>,
    pub frames: Vec<Vec<u16>>,
    /// Frames that went through `start_async`.
    pub async_frames: usize,
    pub fail: bool,
    /// Number of `is_busy` polls that still report a running transfer.
    pub busy_polls: core::cell::Cell<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refused;

impl RecordingEngine {
    pub fn last_len(&self) -> Option<usize> {
        self.frames.last().map(Vec::len)
    }
}

impl TransferEngine for RecordingEngine {
    type Error = Refused;

    fn configure(&mut self, timing: &PulseTiming) -> Result<(), Self::Error> {
        if self.supported.is_some_and(|supported| supported != *timing) {
            return Err(Refused);
        }
        self.configured = Some(*timing);
        Ok(())
    }

    fn start(&mut self, pulses: &[u16]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(Refused);
        }
        self.frames.push(pulses.to_vec());
        Ok(())
    }

    async fn start_async(&mut self, pulses: &[u16]) -> Result<(), Self::Error> {
        self.start(pulses)?;
        self.async_frames += 1;
        Ok(())
    }

    fn is_busy(&self) -> bool {
        let left = self.busy_polls.get();
        if left == 0 {
            return false;
        }
        self.busy_polls.set(left - 1);
        true
    }
}

/// Delay that returns immediately and counts how often it was asked to sleep.
#[derive(Debug, Default)]
pub struct CountingDelay {
    pub sleeps: u32,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, _ns: u32) {
        self.sleeps += 1;
    }

    fn delay_ms(&mut self, _ms: u32) {
        self.sleeps += 1;
    }
}
