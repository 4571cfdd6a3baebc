mod tests {
    use ws28xx_pwm::{ProtocolTiming, PulseTiming, buffer_len};

    #[test]
    fn test_ws2812_at_72_mhz() {
        let timing = PulseTiming::new(72, &ProtocolTiming::WS2812);
        assert_eq!(timing.reload(), 89);
        assert_eq!(timing.period_ticks(), 90);
        assert_eq!(timing.zero(), 28);
        assert_eq!(timing.one(), 56);
    }

    #[test]
    fn test_ws2812_at_16_mhz() {
        let timing = PulseTiming::new(16, &ProtocolTiming::WS2812);
        assert_eq!(timing.reload(), 19);
        assert_eq!(timing.zero(), 6);
        assert_eq!(timing.one(), 12);
    }

    #[test]
    fn test_sk6812_at_72_mhz() {
        let timing = PulseTiming::new(72, &ProtocolTiming::SK6812);
        assert_eq!(timing.reload(), 89);
        assert_eq!(timing.zero(), 21);
        assert_eq!(timing.one(), 42);
    }

    #[test]
    fn test_reload_rounds_to_nearest_tick() {
        // 84 MHz * 1.25 µs = 105 ticks, 50 MHz * 1.25 µs = 62.5 ticks
        assert_eq!(PulseTiming::new(84, &ProtocolTiming::WS2812).reload(), 104);
        assert_eq!(PulseTiming::new(50, &ProtocolTiming::WS2812).reload(), 62);
    }

    #[test]
    fn test_pulse_selects_threshold() {
        let timing = PulseTiming::new(72, &ProtocolTiming::WS2812);
        assert_eq!(timing.pulse(false), timing.zero());
        assert_eq!(timing.pulse(true), timing.one());
        assert!(timing.zero() < timing.one());
        assert!(u32::from(timing.one()) < timing.period_ticks());
    }

    #[test]
    fn test_zero_period_does_not_divide_by_zero() {
        let protocol = ProtocolTiming {
            period_ns: 0,
            zero_high_ns: 400,
            one_high_ns: 800,
            reset_us: 0,
        };
        let timing = PulseTiming::new(72, &protocol);
        assert_eq!(timing.reload(), 0);
        assert_eq!(timing.zero(), 0);
        assert_eq!(timing.one(), 0);
    }

    #[test]
    fn test_frame_duration() {
        let timing = PulseTiming::new(16, &ProtocolTiming::WS2812);
        // 8 pixels = 194 slots * 1250 ns = 242.5 µs, plus 270 µs reset
        assert_eq!(timing.frame_duration_us(buffer_len(8)), 512);
        assert_eq!(timing.frame_duration_us(0), 270);
        assert_eq!(timing.reset_us(), 270);
    }
}
