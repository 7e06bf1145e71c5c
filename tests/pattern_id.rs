mod tests {
    use embassy_time::Duration;
    use tca62724_emulator::pattern::{PatternId, PatternRunner, StripFrame};
    use tca62724_emulator::time_base::Tick;
    use tca62724_emulator::Rgb;

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    #[test]
    fn test_pattern_id_from_raw() {
        assert_eq!(PatternId::from_raw(0), None);
        assert_eq!(PatternId::from_raw(1), Some(PatternId::ColorChaser));
        assert_eq!(PatternId::from_raw(2), Some(PatternId::ColorCycle));
        assert_eq!(PatternId::from_raw(3), None);
        assert_eq!(PatternId::ColorCycle.raw(), 2);
    }

    #[test]
    fn test_pattern_id_names() {
        assert_eq!(PatternId::ColorChaser.as_str(), "color_chaser");
        assert_eq!(
            PatternId::parse_from_str("color_cycle"),
            Some(PatternId::ColorCycle)
        );
        assert_eq!(PatternId::parse_from_str("rainbow"), None);
    }

    #[test]
    fn test_step_tables() {
        let chaser = PatternId::ColorChaser.steps();
        assert_eq!(chaser.len(), 3);
        assert!(chaser.iter().all(|step| step.delay == Duration::from_millis(100)));

        let cycle = PatternId::ColorCycle.steps();
        assert_eq!(cycle.len(), 7);
        assert!(cycle.iter().all(|step| step.delay == Duration::from_millis(500)));
        assert_eq!(cycle[0].frame, StripFrame::Fill(RED));
        assert_eq!(cycle[6].frame, StripFrame::Fill(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_render_fill() {
        let mut frame = [Rgb::default(); 10];
        let pixels = StripFrame::Fill(BLUE).render_into(&mut frame);
        assert_eq!(pixels.len(), 10);
        assert!(pixels.iter().all(|&pixel| pixel == BLUE));
    }

    #[test]
    fn test_render_pixels_keeps_tail() {
        let mut frame = [BLUE; 10];
        let pixels = PatternId::ColorChaser.steps()[1].frame.render_into(&mut frame);
        assert_eq!(pixels, &[RED, BLUE, RED, RED, BLUE, RED, RED, BLUE, RED]);
        assert_eq!(frame[9], BLUE);
    }

    #[test]
    fn test_render_pixels_on_short_strip() {
        let mut frame = [Rgb::default(); 4];
        let pixels = PatternId::ColorChaser.steps()[0].frame.render_into(&mut frame);
        assert_eq!(pixels, &[BLUE, RED, RED, BLUE]);
    }

    #[test]
    fn test_runner_idle_without_pattern() {
        let mut runner = PatternRunner::new();
        assert_eq!(runner.poll(Tick(0)), None);
        runner.select(9);
        assert_eq!(runner.active(), None);
        assert_eq!(runner.poll(Tick(100)), None);
    }

    #[test]
    fn test_runner_paces_steps() {
        let mut runner = PatternRunner::new();
        runner.select(2);
        assert_eq!(runner.poll(Tick(1000)), Some(StripFrame::Fill(RED)));
        assert_eq!(runner.poll(Tick(1010)), None);
        assert_eq!(runner.poll(Tick(1499)), None);
        assert_eq!(
            runner.poll(Tick(1500)),
            Some(StripFrame::Fill(Rgb::new(0, 255, 0)))
        );
        assert_eq!(runner.stage(), 2);
    }

    #[test]
    fn test_runner_cycles() {
        let mut runner = PatternRunner::new();
        runner.select(1);
        let steps = PatternId::ColorChaser.steps();
        let mut now = Tick(0xFF00);
        for round in 0..7 {
            let frame = runner.poll(now).expect("step due");
            assert_eq!(frame, steps[round % 3].frame);
            now = now.wrapping_add(100);
        }
    }

    #[test]
    fn test_select_restarts() {
        let mut runner = PatternRunner::new();
        runner.select(2);
        runner.poll(Tick(0));
        runner.poll(Tick(500));
        assert_eq!(runner.stage(), 2);

        runner.select(2);
        assert_eq!(runner.stage(), 0);
        assert_eq!(runner.poll(Tick(510)), Some(StripFrame::Fill(RED)));
    }
}
