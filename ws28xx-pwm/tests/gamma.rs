mod tests {
    use ws28xx_pwm::GAMMA8;
    use ws28xx_pwm::gamma::correct;

    #[test]
    fn test_gamma_is_monotonic() {
        for pair in GAMMA8.windows(2) {
            assert!(pair[0] <= pair[1], "{} > {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_gamma_endpoints() {
        assert_eq!(GAMMA8[0], 0);
        assert_eq!(GAMMA8[255], 255);
    }

    #[test]
    fn test_correct_reads_table() {
        for value in 0..=255u8 {
            assert_eq!(correct(value), GAMMA8[usize::from(value)]);
        }
        assert_eq!(correct(20), 0);
        assert_eq!(correct(22), 1);
        assert_eq!(correct(64), 11);
        assert_eq!(correct(128), 55);
        assert_eq!(correct(200), 148);
    }
}
