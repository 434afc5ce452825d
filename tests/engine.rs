mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use embassy_time::Instant;
    use glowring::orientation::{MotionPoll, MotionSource};
    use glowring::{
        Command, CommandQueue, Engine, EngineConfig, FrameSink, InputSource, Rgb, RoutineId,
    };

    /// Records what the engine pushes to the hardware.
    #[derive(Clone, Default)]
    struct RecordingSink {
        shows: Rc<Cell<u32>>,
        brightness: Rc<Cell<u8>>,
        lit: Rc<Cell<usize>>,
    }

    impl FrameSink for RecordingSink {
        fn set_brightness(&mut self, brightness: u8) {
            self.brightness.set(brightness);
        }

        fn show(&mut self, pixels: &[Rgb]) {
            self.shows.set(self.shows.get() + 1);
            let lit = pixels
                .iter()
                .filter(|p| **p != Rgb { r: 0, g: 0, b: 0 })
                .count();
            self.lit.set(lit);
        }
    }

    /// Button levels the test scripts from outside.
    #[derive(Clone, Default)]
    struct Buttons {
        tap: Rc<Cell<bool>>,
        advance: Rc<Cell<bool>>,
    }

    impl InputSource for Buttons {
        fn tap_active(&mut self) -> bool {
            self.tap.get()
        }

        fn advance_pressed(&mut self) -> bool {
            self.advance.get()
        }
    }

    /// Motion source that never produces data.
    struct SilentMotion;

    impl MotionSource for SilentMotion {
        fn poll(&mut self) -> MotionPoll {
            MotionPoll::Idle
        }

        fn reset_fifo(&mut self) {}
    }

    fn ms(v: u64) -> Instant {
        Instant::from_millis(v)
    }

    #[test]
    fn test_first_tick_renders_a_frame() {
        let queue: CommandQueue<8> = CommandQueue::new();
        let sink = RecordingSink::default();
        let shows = sink.shows.clone();
        let lit = sink.lit.clone();

        let mut engine = Engine::<_, _, SilentMotion, 60, 8>::new(
            &EngineConfig::default(),
            sink,
            Buttons::default(),
            None,
            &queue,
        );

        let result = engine.tick(ms(0));
        assert_eq!(shows.get(), 1);
        // The default routine (palette flow) lights the whole ring.
        assert_eq!(lit.get(), 60);
        // The engine tells the platform loop when to come back.
        assert!(result.sleep.as_micros() > 0);
        assert!(result.next_deadline > ms(0));
    }

    #[test]
    fn test_routine_self_paces_the_frame_task() {
        let queue: CommandQueue<8> = CommandQueue::new();
        let sink = RecordingSink::default();
        let shows = sink.shows.clone();

        let mut engine = Engine::<_, _, SilentMotion, 60, 8>::new(
            &EngineConfig::default(),
            sink,
            Buttons::default(),
            None,
            &queue,
        );

        engine.tick(ms(0));
        assert_eq!(shows.get(), 1);

        // Palette flow asks for 1.5-50 ms; a tick well before any
        // plausible deadline renders nothing new.
        engine.tick(ms(1));
        assert_eq!(shows.get(), 1);

        // By 50 ms the advised interval has certainly elapsed.
        engine.tick(ms(50));
        assert_eq!(shows.get(), 2);
    }

    #[test]
    fn test_select_routine_by_command() {
        let queue: CommandQueue<8> = CommandQueue::new();
        let mut engine = Engine::<_, _, SilentMotion, 60, 8>::new(
            &EngineConfig::default(),
            RecordingSink::default(),
            Buttons::default(),
            None,
            &queue,
        );

        assert_eq!(engine.current_routine(), RoutineId::PaletteRainbow);

        queue.try_send(Command::SelectRoutine(15)).unwrap();
        engine.tick(ms(0));
        assert_eq!(engine.current_routine(), RoutineId::Fire);

        // Out-of-range index: dropped, configuration unchanged.
        queue.try_send(Command::SelectRoutine(200)).unwrap();
        engine.tick(ms(10));
        assert_eq!(engine.current_routine(), RoutineId::Fire);
    }

    #[test]
    fn test_motion_routines_skipped_without_sensor() {
        let queue: CommandQueue<8> = CommandQueue::new();
        let buttons = Buttons::default();
        let advance = buttons.advance.clone();

        let mut engine = Engine::<_, _, SilentMotion, 60, 8>::new(
            &EngineConfig::default(),
            RecordingSink::default(),
            buttons,
            None,
            &queue,
        );

        // Selecting an orientation-reactive routine directly is ignored
        // in degraded mode ("wave" sits at catalog index 17).
        queue.try_send(Command::SelectRoutine(17)).unwrap();
        engine.tick(ms(0));
        assert_eq!(engine.current_routine(), RoutineId::PaletteRainbow);

        // Cycling from "racers" (16) skips wave/shakeit and lands on
        // the first sensor-free routine, "strobe1".
        queue.try_send(Command::SelectRoutine(16)).unwrap();
        engine.tick(ms(10));
        assert_eq!(engine.current_routine(), RoutineId::Racers);

        advance.set(true);
        engine.tick(ms(20));
        assert_eq!(engine.current_routine(), RoutineId::Strobe);
    }

    #[test]
    fn test_advance_button_cycles_with_wraparound() {
        let queue: CommandQueue<8> = CommandQueue::new();
        let buttons = Buttons::default();
        let advance = buttons.advance.clone();

        let mut engine = Engine::<_, _, SilentMotion, 60, 8>::new(
            &EngineConfig {
                start_routine: 38, // "black", the last catalog entry
                ..EngineConfig::default()
            },
            RecordingSink::default(),
            buttons,
            None,
            &queue,
        );
        assert_eq!(engine.current_routine(), RoutineId::Black);

        // Press: one rising edge advances once, wrapping to index 0.
        advance.set(true);
        engine.tick(ms(0));
        assert_eq!(engine.current_routine(), RoutineId::PaletteRainbow);

        // Held button is a single edge, not an advance per tick.
        engine.tick(ms(10));
        assert_eq!(engine.current_routine(), RoutineId::PaletteRainbow);

        // Release and press again: next routine.
        advance.set(false);
        engine.tick(ms(20));
        advance.set(true);
        engine.tick(ms(30));
        assert_eq!(engine.current_routine(), RoutineId::PaletteRainbowStripe);
    }

    #[test]
    fn test_bpm_and_brightness_commands() {
        let queue: CommandQueue<8> = CommandQueue::new();
        let sink = RecordingSink::default();
        let brightness = sink.brightness.clone();

        let mut engine = Engine::<_, _, SilentMotion, 60, 8>::new(
            &EngineConfig::default(),
            sink,
            Buttons::default(),
            None,
            &queue,
        );

        queue.try_send(Command::SetBpm(150)).unwrap();
        queue.try_send(Command::SetMaxBrightness(200)).unwrap();
        engine.tick(ms(0));

        assert!((engine.tempo().bpm() - 150.0).abs() < f32::EPSILON);
        // The next rendered frame carries the new ceiling.
        engine.tick(ms(60));
        assert_eq!(brightness.get(), 200);
    }

    #[test]
    fn test_taps_reach_the_tempo_tracker() {
        let queue: CommandQueue<8> = CommandQueue::new();
        let buttons = Buttons::default();
        let tap = buttons.tap.clone();

        let mut engine = Engine::<_, _, SilentMotion, 60, 8>::new(
            &EngineConfig::default(),
            RecordingSink::default(),
            buttons,
            None,
            &queue,
        );

        // Tap at 0, 400 and 800 ms: 150 BPM.
        for t in [0u64, 400, 800] {
            tap.set(true);
            engine.tick(ms(t));
            tap.set(false);
            engine.tick(ms(t + 10));
        }
        assert!(
            (engine.tempo().bpm() - 150.0).abs() < 0.5,
            "bpm = {}",
            engine.tempo().bpm()
        );
    }
}
