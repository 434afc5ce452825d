mod tests {
    use embassy_time::Instant;
    use glowring::math8::{
        Rng8, beat8, beatsin8, blend8, lerp8by8, map_range, noise3, qadd8, qsub8, scale8, sin8,
        triwave8,
    };

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_blend8() {
        assert_eq!(blend8(255, 128, 128), 191);
        assert_eq!(blend8(0, 128, 255), 128);
        assert_eq!(blend8(255, 0, 128), 127);
        assert_eq!(blend8(255, 128, 0), 255);
    }

    #[test]
    fn test_saturating_math() {
        assert_eq!(qadd8(200, 100), 255);
        assert_eq!(qadd8(1, 2), 3);
        assert_eq!(qsub8(50, 100), 0);
        assert_eq!(qsub8(100, 50), 50);
    }

    #[test]
    fn test_lerp8by8() {
        assert_eq!(lerp8by8(0, 255, 0), 0);
        assert_eq!(lerp8by8(0, 255, 255), 255);
        assert_eq!(lerp8by8(0, 255, 128), 128);
        assert_eq!(lerp8by8(10, 20, 255), 20);
        assert_eq!(lerp8by8(20, 10, 255), 10);
    }

    #[test]
    fn test_triwave8() {
        assert_eq!(triwave8(0), 0);
        assert_eq!(triwave8(64), 128);
        assert_eq!(triwave8(127), 254);
        assert_eq!(triwave8(128), 254);
        assert_eq!(triwave8(255), 0);
    }

    #[test]
    fn test_sin8() {
        // Peak and trough at quarter points, mid-range at zero crossings.
        assert_eq!(sin8(64), 255);
        assert_eq!(sin8(192), 0);
        assert!((120..=136).contains(&sin8(0)));
        assert!((120..=136).contains(&sin8(128)));
    }

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(50, 0, 100, 0, 255), 127);
        assert_eq!(map_range(0, 0, 2500, 40, 2), 40);
        assert_eq!(map_range(2500, 0, 2500, 40, 2), 2);
        assert_eq!(map_range(0, -5000, 5000, 20, 255), 137);
        // Degenerate input range collapses to the lower output bound.
        assert_eq!(map_range(7, 3, 3, 1, 9), 1);
    }

    #[test]
    fn test_wall_clock_beat() {
        // 60 BPM: half a beat after 500 ms.
        assert_eq!(beat8(60, Instant::from_millis(0)), 0);
        assert_eq!(beat8(60, Instant::from_millis(500)), 128);
        assert_eq!(beat8(60, Instant::from_millis(1000)), 0);

        // The oscillator respects its bounds everywhere on the cycle.
        for ms in (0..2000).step_by(37) {
            let v = beatsin8(73, 20, 200, Instant::from_millis(ms));
            assert!((20..=200).contains(&v));
        }
    }

    #[test]
    fn test_rng8_deterministic() {
        let mut a = Rng8::new(42);
        let mut b = Rng8::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u8(), b.next_u8());
        }
    }

    #[test]
    fn test_rng8_bounds() {
        let mut rng = Rng8::new(7);
        for _ in 0..500 {
            let v = rng.u8_range(2, 6);
            assert!((2..6).contains(&v));
            assert!(rng.u16_below(60) < 60);
        }
        // Degenerate range pins to the lower bound.
        assert_eq!(rng.u8_range(5, 5), 5);
        assert_eq!(rng.u16_below(0), 0);
    }

    #[test]
    fn test_noise3_deterministic_and_smooth() {
        assert_eq!(noise3(1000, 2000, 3000), noise3(1000, 2000, 3000));

        // Within one lattice cell the field moves gradually: tiny input
        // steps never jump the output by more than a few units.
        let mut prev = noise3(0, 500, 500);
        for x in 1..256u16 {
            let v = noise3(x, 500, 500);
            assert!(v.abs_diff(prev) <= 8, "jump at x={x}: {prev} -> {v}");
            prev = v;
        }
    }
}
