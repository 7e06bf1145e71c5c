mod tests {
    use embassy_time::Duration;
    use tca62724_emulator::config::{DEFAULT_ADDRESS, ReplyFraming, ResponderConfig};

    #[test]
    fn test_defaults() {
        let config = ResponderConfig::default();
        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert_eq!(config.seven_bit_address(), 0x55);
        assert_eq!(config.address_register(), 0xAA);
        assert!(!config.general_call);
        assert_eq!(config.reply_framing, ReplyFraming::Bare);
        assert_eq!(config.refresh_interval, Duration::from_millis(10));
        assert_eq!(config.heartbeat_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_builders() {
        let config = ResponderConfig::new()
            .with_address(0xC4)
            .with_general_call(true)
            .with_reply_framing(ReplyFraming::LengthPrefixed)
            .with_refresh_interval(Duration::from_millis(20))
            .with_heartbeat_interval(Duration::from_millis(1000));
        assert_eq!(config.seven_bit_address(), 0x62);
        assert_eq!(config.address_register(), 0xC5);
        assert_eq!(config.reply_framing, ReplyFraming::LengthPrefixed);
        assert_eq!(config.refresh_interval, Duration::from_millis(20));
        assert_eq!(config.heartbeat_interval, Duration::from_millis(1000));
    }
}
