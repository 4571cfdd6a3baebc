mod tests {
    use ws28xx_pwm::encoder::{BITS_PER_PIXEL, encode, scale_channels};
    use ws28xx_pwm::{Pixel, ProtocolTiming, PulseTiming, RESOLUTION, buffer_len};

    const TIMING: PulseTiming = PulseTiming::new(72, &ProtocolTiming::WS2812);

    fn pixel(channels: [u8; 3], brightness: u8) -> Pixel {
        Pixel {
            channels,
            brightness,
        }
    }

    fn bits_of(byte: u8) -> [u16; 8] {
        core::array::from_fn(|i| TIMING.pulse(byte & (0x80 >> i) != 0))
    }

    #[test]
    fn test_buffer_len() {
        assert_eq!(buffer_len(0), 2);
        assert_eq!(buffer_len(1), 26);
        assert_eq!(buffer_len(10), 242);
    }

    #[test]
    fn test_scale_full_brightness_keeps_channels() {
        assert_eq!(scale_channels(&pixel([255, 128, 3], 255)), Some([255, 128, 3]));
        assert_eq!(scale_channels(&pixel([40, 20, 10], 40)), Some([40, 20, 10]));
    }

    #[test]
    fn test_scale_half_brightness() {
        // scale = 1024 * 128 / 255 = 514
        assert_eq!(scale_channels(&pixel([255, 128, 0], 128)), Some([127, 64, 0]));
    }

    #[test]
    fn test_scale_dark_pixels() {
        assert_eq!(scale_channels(&pixel([255, 255, 255], 0)), None);
        assert_eq!(scale_channels(&pixel([0, 0, 0], 200)), None);
    }

    #[test]
    fn test_scale_matches_fixed_point_formula() {
        for brightness in [1u8, 17, 100, 128, 254, 255] {
            for channels in [[1u8, 0, 0], [10, 200, 30], [255, 255, 255], [3, 2, 1], [0, 90, 45]] {
                let max = u32::from(*channels.iter().max().unwrap());
                let scale = RESOLUTION * u32::from(brightness) / max;
                let expected = channels.map(|c| (u32::from(c) * scale / RESOLUTION) as u8);
                let scaled = scale_channels(&pixel(channels, brightness)).unwrap();
                assert_eq!(scaled, expected);
                assert!(scaled.iter().all(|c| *c <= brightness));
            }
        }
    }

    #[test]
    fn test_scale_boosts_dim_colors() {
        // brightness is the target of the brightest channel, not a multiplier
        assert_eq!(scale_channels(&pixel([10, 5, 0], 255)), Some([255, 127, 0]));
    }

    #[test]
    fn test_encode_layout() {
        let pixels = [pixel([0xFF, 0x00, 0xA5], 255)];
        let mut frame = [0xFFFFu16; 26];
        encode(&pixels, &TIMING, &mut frame);

        assert_eq!(frame[0], 0);
        assert_eq!(frame[1..9], bits_of(0xFF));
        assert_eq!(frame[9..17], bits_of(0x00));
        assert_eq!(frame[17..25], bits_of(0xA5));
        assert_eq!(frame[25], 0);
    }

    #[test]
    fn test_encode_dark_pixel_is_all_zero_pulses() {
        let pixels = [pixel([1, 2, 3], 255), pixel([255, 255, 255], 0)];
        let mut frame = [0u16; 50];
        encode(&pixels, &TIMING, &mut frame);

        let dark = &frame[1 + BITS_PER_PIXEL..1 + 2 * BITS_PER_PIXEL];
        assert!(dark.iter().all(|slot| *slot == TIMING.zero()));
        assert_eq!(frame[49], 0);
    }

    #[test]
    fn test_encode_applies_brightness() {
        let pixels = [pixel([255, 128, 0], 128)];
        let mut frame = [0u16; 26];
        encode(&pixels, &TIMING, &mut frame);

        assert_eq!(frame[1..9], bits_of(127));
        assert_eq!(frame[9..17], bits_of(64));
        assert_eq!(frame[17..25], bits_of(0));
    }

    #[test]
    fn test_encode_leaves_slots_past_frame() {
        let pixels = [pixel([0, 0, 0], 0)];
        let mut frame = [7u16; 30];
        encode(&pixels, &TIMING, &mut frame);

        assert_eq!(frame[25], 0);
        assert_eq!(frame[26..], [7, 7, 7, 7]);
    }
}
