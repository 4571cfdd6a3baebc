//! Transfer engine on the nRF `SequencePwm` peripheral.
//!
//! The PWM counter runs at 16 MHz and EasyDMA reads one compare value per
//! bit period. The sequence peripheral wants the polarity flag in bit 15
//! of every sample, so frames are copied into a staging buffer with the
//! flag set before they go out.

use embassy_nrf::{Peri, gpio, pwm};
use embassy_time::{Duration, Timer, block_for};

use crate::engine::TransferEngine;
use crate::timing::{ProtocolTiming, PulseTiming};

/// PWM clock in MHz.
pub const PWM_CLOCK_MHZ: u32 = 16;

/// Polarity flag: the output is high for the compare value's ticks.
const FLIP: u16 = 0x8000;

/// Convert microseconds to PWM ticks.
const fn to_ticks(us: u32) -> u32 {
    us * PWM_CLOCK_MHZ
}

/// Error of the nRF PWM engine.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NrfError {
    /// The sequence peripheral rejected the frame.
    Pwm(pwm::Error),
    /// The strip resolved its thresholds for a different clock or protocol
    /// than the PWM instance was set up with.
    TimingMismatch {
        engine: PulseTiming,
        strip: PulseTiming,
    },
    /// Frame longer than the staging buffer.
    FrameTooLong { len: usize, capacity: usize },
}

impl From<pwm::Error> for NrfError {
    fn from(err: pwm::Error) -> Self {
        NrfError::Pwm(err)
    }
}

/// Copy `pulses` into `staging` with the polarity flag set.
fn stage(staging: &mut [u16], pulses: &[u16]) -> Result<usize, NrfError> {
    if pulses.len() > staging.len() {
        return Err(NrfError::FrameTooLong {
            len: pulses.len(),
            capacity: staging.len(),
        });
    }
    for (slot, pulse) in staging.iter_mut().zip(pulses) {
        *slot = *pulse | FLIP;
    }
    Ok(pulses.len())
}

/// PWM sequence engine for one output pin.
///
/// `staging` must be at least as long as the longest frame handed to
/// [`start`](TransferEngine::start). Both `start` and `start_async` return
/// once the sequence and its reset latch have run.
pub struct NrfPwmEngine<'d> {
    pwm: pwm::SequencePwm<'d>,
    staging: &'d mut [u16],
    timing: PulseTiming,
}

impl<'d> NrfPwmEngine<'d> {
    /// Set up the PWM instance on `pin` for `protocol`.
    ///
    /// The strip driving this engine must be configured with
    /// [`PWM_CLOCK_MHZ`] and the same `protocol`.
    pub fn new<Pwm: pwm::Instance, P: gpio::Pin>(
        pwm: Peri<'d, Pwm>,
        pin: Peri<'d, P>,
        staging: &'d mut [u16],
        protocol: &ProtocolTiming,
    ) -> Result<Self, NrfError> {
        let timing = PulseTiming::new(PWM_CLOCK_MHZ, protocol);

        let mut config = pwm::Config::default();
        config.counter_mode = pwm::CounterMode::Up;
        config.max_duty = u16::try_from(timing.period_ticks()).unwrap_or(u16::MAX);
        config.prescaler = pwm::Prescaler::Div1;
        config.sequence_load = pwm::SequenceLoad::Common;
        config.ch0_drive = gpio::OutputDrive::HighDrive0Standard1;
        config.ch1_drive = gpio::OutputDrive::HighDrive0Standard1;
        config.ch2_drive = gpio::OutputDrive::HighDrive0Standard1;
        config.ch3_drive = gpio::OutputDrive::HighDrive0Standard1;
        let pwm = pwm::SequencePwm::new_1ch(pwm, pin, config)?;

        Ok(Self {
            pwm,
            staging,
            timing,
        })
    }

    /// Thresholds the PWM instance was set up for.
    pub fn timing(&self) -> &PulseTiming {
        &self.timing
    }

    fn sequence_config(&self) -> pwm::SequenceConfig {
        let mut conf = pwm::SequenceConfig::default();
        conf.refresh = 0;
        conf.end_delay = to_ticks(self.timing.reset_us());
        conf
    }
}

impl TransferEngine for NrfPwmEngine<'_> {
    type Error = NrfError;

    fn configure(&mut self, timing: &PulseTiming) -> Result<(), Self::Error> {
        if *timing != self.timing {
            #[cfg(feature = "defmt")]
            defmt::error!(
                "nrf pwm: strip wants {} ticks per bit, sequence runs {} ticks at {} MHz",
                timing.period_ticks(),
                self.timing.period_ticks(),
                PWM_CLOCK_MHZ
            );
            return Err(NrfError::TimingMismatch {
                engine: self.timing,
                strip: *timing,
            });
        }
        Ok(())
    }

    /// Stream `pulses` and block until the sequence has run.
    fn start(&mut self, pulses: &[u16]) -> Result<(), Self::Error> {
        if pulses.is_empty() {
            return Ok(());
        }
        let len = stage(self.staging, pulses)?;
        let conf = self.sequence_config();
        let delay = Duration::from_micros(self.timing.frame_duration_us(len));

        let seq = pwm::SingleSequencer::new(&mut self.pwm, &self.staging[..len], conf);
        seq.start(pwm::SingleSequenceMode::Times(1))?;
        block_for(delay);

        drop(seq);
        Ok(())
    }

    /// Stream `pulses` and wait on a timer until the sequence has run.
    async fn start_async(&mut self, pulses: &[u16]) -> Result<(), Self::Error> {
        if pulses.is_empty() {
            return Ok(());
        }
        let len = stage(self.staging, pulses)?;
        let conf = self.sequence_config();
        let delay = self.timing.frame_duration_us(len);

        let seq = pwm::SingleSequencer::new(&mut self.pwm, &self.staging[..len], conf);
        seq.start(pwm::SingleSequenceMode::Times(1))?;
        Timer::after_micros(delay).await;

        drop(seq);
        Ok(())
    }
}
