//! Pulse-width thresholds derived from the timer clock and the protocol's
//! bit timing.

/// Bit timing of a WS28xx-family protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProtocolTiming {
    /// Total bit period in ns.
    pub period_ns: u32,
    /// 0-bit high time in ns.
    pub zero_high_ns: u32,
    /// 1-bit high time in ns.
    pub one_high_ns: u32,
    /// Frame reset (latch) time in µs.
    pub reset_us: u32,
}

impl ProtocolTiming {
    /// WS2812 / WS2812B. Reset is 250µs for some batches, plus slop.
    pub const WS2812: Self = Self {
        period_ns: 1250,
        zero_high_ns: 400,
        one_high_ns: 800,
        reset_us: 270,
    };

    /// SK6812.
    pub const SK6812: Self = Self {
        period_ns: 1250,
        zero_high_ns: 300,
        one_high_ns: 600,
        reset_us: 80,
    };
}

impl Default for ProtocolTiming {
    fn default() -> Self {
        Self::WS2812
    }
}

/// Timer counts resolved for one clock frequency.
///
/// `reload` is the auto-reload value of an up-counting timer (the period is
/// `reload + 1` ticks); `zero` and `one` are the compare values producing
/// the high time of a logical 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseTiming {
    reload: u16,
    zero: u16,
    one: u16,
    period_ns: u32,
    reset_us: u32,
}

impl PulseTiming {
    /// Resolve `protocol` for a timer clocked at `clock_mhz`.
    ///
    /// `reload = round(clock_mhz * period_ns / 1000) - 1` and each threshold
    /// is `high_ns * reload / period_ns`, truncated.
    pub const fn new(clock_mhz: u32, protocol: &ProtocolTiming) -> Self {
        let ticks = (clock_mhz as u64 * protocol.period_ns as u64 + 500) / 1000;
        let reload = ticks.saturating_sub(1);
        Self {
            reload: saturate(reload),
            zero: saturate(threshold(protocol.zero_high_ns, reload, protocol.period_ns)),
            one: saturate(threshold(protocol.one_high_ns, reload, protocol.period_ns)),
            period_ns: protocol.period_ns,
            reset_us: protocol.reset_us,
        }
    }

    /// Auto-reload value.
    pub const fn reload(&self) -> u16 {
        self.reload
    }

    /// Timer ticks in one bit period.
    pub const fn period_ticks(&self) -> u32 {
        self.reload as u32 + 1
    }

    /// Compare value of a logical 0.
    pub const fn zero(&self) -> u16 {
        self.zero
    }

    /// Compare value of a logical 1.
    pub const fn one(&self) -> u16 {
        self.one
    }

    /// Compare value encoding `bit`.
    #[inline(always)]
    pub const fn pulse(&self, bit: bool) -> u16 {
        if bit { self.one } else { self.zero }
    }

    /// Frame reset time in µs.
    pub const fn reset_us(&self) -> u32 {
        self.reset_us
    }

    /// Number of microseconds a sequence of `slots` bit periods takes on
    /// the wire, including the reset latch.
    pub const fn frame_duration_us(&self, slots: usize) -> u64 {
        let active_ns = slots as u64 * self.period_ns as u64;
        active_ns / 1000 + self.reset_us as u64
    }
}

const fn threshold(high_ns: u32, reload: u64, period_ns: u32) -> u64 {
    if period_ns == 0 {
        return 0;
    }
    high_ns as u64 * reload / period_ns as u64
}

const fn saturate(value: u64) -> u16 {
    if value > u16::MAX as u64 {
        u16::MAX
    } else {
        value as u16
    }
}
