mod tests {
    use embassy_time::Instant;
    use glowring::tempo::{TempoConfig, TempoTracker};

    fn tracker() -> TempoTracker {
        TempoTracker::new(TempoConfig::default())
    }

    fn ms(v: u64) -> Instant {
        Instant::from_millis(v)
    }

    #[test]
    fn test_progress_advances_with_time() {
        let mut tempo = tracker();
        assert!((tempo.bpm() - 120.0).abs() < f32::EPSILON);

        tempo.update(ms(0), false);
        assert!(tempo.beat_progress() < 1e-6);

        // 120 BPM = 500 ms per beat, so 250 ms is half a beat.
        tempo.update(ms(250), false);
        assert!((tempo.beat_progress() - 0.5).abs() < 1e-5);
        assert_eq!(tempo.beat8(), 128);

        // Wraps back below 1.0 at the beat boundary.
        tempo.update(ms(500), false);
        assert!(tempo.beat_progress() < 1e-5);
    }

    #[test]
    fn test_progress_always_in_unit_range() {
        let mut tempo = tracker();
        for t in (0..20_000).step_by(93) {
            tempo.update(ms(t), t % 5 == 0);
            let p = tempo.beat_progress();
            assert!((0.0..1.0).contains(&p), "progress {p} at t={t}");
        }
    }

    #[test]
    fn test_set_bpm_keeps_phase_continuous() {
        let mut tempo = tracker();
        tempo.update(ms(0), false);
        tempo.update(ms(250), false);
        let before = tempo.beat_progress();

        tempo.set_bpm(60.0);
        let after = tempo.beat_progress();
        assert!((before - after).abs() < 1e-6, "phase jumped on set_bpm");

        // From here the beat period is 1000 ms.
        tempo.update(ms(500), false);
        assert!((tempo.beat_progress() - (before + 0.25)).abs() < 1e-5);
    }

    #[test]
    fn test_set_bpm_clamps_to_bounds() {
        let mut tempo = tracker();
        tempo.set_bpm(1000.0);
        assert!((tempo.bpm() - 220.0).abs() < f32::EPSILON);
        tempo.set_bpm(1.0);
        assert!((tempo.bpm() - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_taps_estimate_bpm() {
        let mut tempo = tracker();

        // Four taps 400 ms apart: 150 BPM.
        let mut t = 0;
        for _ in 0..4 {
            tempo.update(ms(t), true);
            tempo.update(ms(t + 10), false);
            t += 400;
        }
        assert!((tempo.bpm() - 150.0).abs() < 0.5, "bpm = {}", tempo.bpm());
    }

    #[test]
    fn test_accepted_tap_snaps_to_beat_boundary() {
        let mut tempo = tracker();
        tempo.update(ms(0), true);
        tempo.update(ms(10), false);
        // Second tap lands mid-beat; accepting it realigns the grid.
        tempo.update(ms(400), true);
        assert!(tempo.beat_progress() < 1e-6);
    }

    #[test]
    fn test_tap_debounce() {
        let mut tempo = tracker();
        tempo.update(ms(0), true);
        tempo.update(ms(10), false);
        tempo.update(ms(500), true);
        let after_clean_tap = tempo.bpm();

        // A bounce edge 50 ms later is ignored outright.
        tempo.update(ms(540), false);
        tempo.update(ms(550), true);
        assert!((tempo.bpm() - after_clean_tap).abs() < f32::EPSILON);

        // The next real tap still measures from the accepted tap at
        // 500 ms, so the average stays clean.
        tempo.update(ms(900), false);
        tempo.update(ms(1000), true);
        assert!((tempo.bpm() - 120.0).abs() < 0.5, "bpm = {}", tempo.bpm());
    }

    #[test]
    fn test_fast_taps_clamp_to_max() {
        let mut tempo = tracker();
        let mut t = 0;
        // 150 ms gaps are above the debounce floor but faster than the
        // configured ceiling: 400 raw BPM clamps to 220.
        for _ in 0..5 {
            tempo.update(ms(t), true);
            tempo.update(ms(t + 50), false);
            t += 150;
        }
        assert!((tempo.bpm() - 220.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_long_gap_starts_new_chain() {
        let mut tempo = tracker();
        tempo.update(ms(0), true);
        tempo.update(ms(10), false);
        tempo.update(ms(400), true);
        let chained = tempo.bpm();

        // Five seconds of silence: the next tap anchors a new chain
        // without dragging a 5000 ms gap into the average.
        tempo.update(ms(5000), false);
        tempo.update(ms(5400), true);
        assert!((tempo.bpm() - chained).abs() < f32::EPSILON);

        // The chain continues measuring from the new anchor, at the
        // faster rate of the new taps.
        tempo.update(ms(5500), false);
        tempo.update(ms(5700), true);
        assert!(tempo.bpm() > chained, "new chain at 200 BPM not picked up");
    }

    #[test]
    fn test_beat_dividers() {
        let mut tempo = tracker();
        tempo.update(ms(0), false);
        tempo.update(ms(500), false); // exactly one beat at 120 BPM

        assert_eq!(tempo.beat8(), 0);
        // Half-rate ramp is mid-cycle after one beat.
        assert_eq!(tempo.beat8_div(2), 128);
        // Double-rate ramp has wrapped twice.
        assert_eq!(tempo.beat8_mul(2), 0);
    }

    #[test]
    fn test_beatsin_bounds() {
        let mut tempo = tracker();
        for t in (0..5_000).step_by(17) {
            tempo.update(ms(t), false);
            let v = tempo.beatsin8(10, 200);
            assert!((10..=200).contains(&v));
            let w = tempo.beatsin16(1_500, 50_000);
            assert!((1_500..=50_000).contains(&w));
        }
    }
}
