mod tests {
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
    use tca62724_emulator::Rgb;
    use tca62724_emulator::soft_pwm::{ChannelOutputs, PwmChannel, PwmPins, SharedLevels, SoftPwm};

    #[derive(Default)]
    struct FakeOutputs {
        red: bool,
        green: bool,
        blue: bool,
    }

    impl ChannelOutputs for FakeOutputs {
        fn set(&mut self, channel: PwmChannel, on: bool) {
            match channel {
                PwmChannel::Red => self.red = on,
                PwmChannel::Green => self.green = on,
                PwmChannel::Blue => self.blue = on,
            }
        }
    }

    /// Count ticks each channel is on over one full cycle, after one warm-up
    /// cycle so the outputs start from a cycle boundary.
    fn on_ticks(levels: Rgb) -> (u32, u32, u32) {
        let mut pwm = SoftPwm::new();
        let mut outputs = FakeOutputs::default();
        for _ in 0..256 {
            pwm.tick(levels, &mut outputs);
        }

        let mut counts = (0, 0, 0);
        for _ in 0..256 {
            pwm.tick(levels, &mut outputs);
            counts.0 += u32::from(outputs.red);
            counts.1 += u32::from(outputs.green);
            counts.2 += u32::from(outputs.blue);
        }
        counts
    }

    #[test]
    fn test_level_zero_is_always_off() {
        assert_eq!(on_ticks(Rgb::new(0, 0, 0)), (0, 0, 0));
    }

    #[test]
    fn test_level_full_is_always_on() {
        assert_eq!(on_ticks(Rgb::new(255, 255, 255)), (256, 256, 256));
    }

    #[test]
    fn test_duty_cycle_is_proportional() {
        assert_eq!(on_ticks(Rgb::new(1, 128, 200)), (1, 128, 200));
    }

    #[test]
    fn test_phase_wraps() {
        let mut pwm = SoftPwm::new();
        let mut outputs = FakeOutputs::default();
        for _ in 0..255 {
            pwm.tick(Rgb::default(), &mut outputs);
        }
        assert_eq!(pwm.phase(), 255);
        pwm.tick(Rgb::default(), &mut outputs);
        assert_eq!(pwm.phase(), 0);
    }

    #[test]
    fn test_asserted_at_cycle_start() {
        let mut pwm = SoftPwm::new();
        let mut outputs = FakeOutputs::default();
        let levels = Rgb::new(16, 0, 255);
        for _ in 0..256 {
            pwm.tick(levels, &mut outputs);
        }
        assert_eq!(pwm.phase(), 0);
        assert!(outputs.red);
        assert!(!outputs.green);
        assert!(outputs.blue);

        for _ in 0..16 {
            pwm.tick(levels, &mut outputs);
        }
        assert!(!outputs.red);
        assert!(outputs.blue);
    }

    #[test]
    fn test_shared_levels() {
        let levels = SharedLevels::new();
        assert_eq!(levels.load(), Rgb::new(0, 0, 0));
        levels.publish(Rgb::new(0xF0, 0xA0, 0x50));
        assert_eq!(levels.load(), Rgb::new(0xF0, 0xA0, 0x50));

        let mut pwm = SoftPwm::new();
        let mut outputs = FakeOutputs::default();
        for _ in 0..256 {
            pwm.tick_shared(&levels, &mut outputs);
        }
        assert!(outputs.red && outputs.green && outputs.blue);
        assert_eq!(levels.load(), Rgb::new(0xF0, 0xA0, 0x50));
    }

    #[test]
    fn test_pins_start_released() {
        let low = [PinTransaction::set(State::Low)];
        let pins = PwmPins::new(PinMock::new(&low), PinMock::new(&low), PinMock::new(&low));

        let (mut red, mut green, mut blue) = pins.release();
        red.done();
        green.done();
        blue.done();
    }

    #[test]
    fn test_pins_follow_one_cycle() {
        let red = PinMock::new(&[
            PinTransaction::set(State::Low),
            // Released at phase 2 of the first cycle
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
        ]);
        let green = PinMock::new(&[
            PinTransaction::set(State::Low),
            PinTransaction::set(State::Low),
        ]);
        let blue = PinMock::new(&[
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let mut pins = PwmPins::new(red, green, blue);
        let mut pwm = SoftPwm::new();

        let levels = Rgb::new(2, 0, 255);
        for _ in 0..256 + 2 {
            pwm.tick(levels, &mut pins);
        }
        assert_eq!(pwm.phase(), 2);

        let (mut red, mut green, mut blue) = pins.release();
        red.done();
        green.done();
        blue.done();
    }
}
