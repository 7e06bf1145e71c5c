mod tests {
    use embassy_time::Duration;
    use tca62724_emulator::time_base::{Deadline, MAX_DELAY, Tick, TimeBase, ticks_for};

    fn advance(time: &TimeBase, ticks: u16) {
        for _ in 0..ticks {
            time.on_tick();
        }
    }

    #[test]
    fn test_tick_counts_up() {
        let time = TimeBase::new();
        assert_eq!(time.now(), Tick(0));
        advance(&time, 3);
        assert_eq!(time.now(), Tick(3));
    }

    #[test]
    fn test_counter_wraps() {
        let time = TimeBase::starting_at(Tick(u16::MAX));
        time.on_tick();
        assert_eq!(time.now(), Tick(0));
    }

    #[test]
    fn test_deadline_reached_after_delta() {
        let time = TimeBase::new();
        let deadline = time.arm(10);
        assert!(!time.reached(deadline));
        advance(&time, 9);
        assert!(!time.reached(deadline));
        advance(&time, 1);
        assert!(time.reached(deadline));
    }

    #[test]
    fn test_zero_delay_is_already_reached() {
        let time = TimeBase::starting_at(Tick(1234));
        assert!(time.reached(time.arm(0)));
    }

    #[test]
    fn test_deadline_survives_wraparound() {
        for start in [0xFFF0_u16, 0xFFFF, 0x7FF8, 0x8000, 0] {
            for delta in [1_u16, 2, 10, 500, 1000, MAX_DELAY] {
                let now = Tick(start);
                let deadline = Deadline::after(now, delta);
                assert!(!deadline.reached_at(now), "start {start:#x} delta {delta}");
                assert!(
                    !deadline.reached_at(now.wrapping_add(delta - 1)),
                    "start {start:#x} delta {delta}"
                );
                assert!(
                    deadline.reached_at(now.wrapping_add(delta)),
                    "start {start:#x} delta {delta}"
                );
            }
        }
    }

    #[test]
    fn test_deadline_across_counter_wrap() {
        let time = TimeBase::starting_at(Tick(0xFFFA));
        let deadline = time.arm(10);
        advance(&time, 9);
        assert_eq!(time.now(), Tick(3));
        assert!(!time.reached(deadline));
        advance(&time, 1);
        assert!(time.reached(deadline));
    }

    #[test]
    fn test_ticks_for_duration() {
        assert_eq!(ticks_for(Duration::from_millis(0)), 0);
        assert_eq!(ticks_for(Duration::from_millis(10)), 10);
        assert_eq!(ticks_for(Duration::from_millis(500)), 500);
        assert_eq!(ticks_for(Duration::from_secs(60)), MAX_DELAY);
    }

    #[test]
    fn test_arm_for_duration() {
        let time = TimeBase::new();
        let deadline = time.arm_for(Duration::from_millis(100));
        advance(&time, 99);
        assert!(!time.reached(deadline));
        advance(&time, 1);
        assert!(time.reached(deadline));
    }
}
