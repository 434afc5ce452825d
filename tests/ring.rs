mod tests {
    use glowring::color::{Hsv, Rgb, blend_hsv, hsv2rgb};
    use glowring::math8::Rng8;
    use glowring::ring::{
        add_glitter, brighten_all, fade_all, fill_gradient_ring, fill_solid, fill_solid_ring,
        normalize_index,
    };

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    #[test]
    fn test_normalize_index() {
        assert_eq!(normalize_index(-1, 60), 59);
        assert_eq!(normalize_index(125, 60), 5);
        assert_eq!(normalize_index(0, 60), 0);
        assert_eq!(normalize_index(59, 60), 59);
        assert_eq!(normalize_index(60, 60), 0);
        assert_eq!(normalize_index(-61, 60), 59);
        assert_eq!(normalize_index(-120, 60), 0);
        assert_eq!(normalize_index(1205, 60), 5);
    }

    #[test]
    fn test_solid_ring_wraps() {
        let mut leds = [BLACK; 60];
        fill_solid_ring(&mut leds, 58, 62, BLUE);

        for (i, led) in leds.iter().enumerate() {
            let expected = matches!(i, 58 | 59 | 0 | 1);
            assert_eq!(*led == BLUE, expected, "index {i}");
        }
    }

    #[test]
    fn test_solid_ring_negative_start() {
        let mut leds = [BLACK; 60];
        fill_solid_ring(&mut leds, -2, 2, BLUE);
        for (i, led) in leds.iter().enumerate() {
            let expected = matches!(i, 58 | 59 | 0 | 1);
            assert_eq!(*led == BLUE, expected, "index {i}");
        }
    }

    #[test]
    fn test_solid_ring_zero_width() {
        let mut leds = [BLACK; 60];
        fill_solid_ring(&mut leds, 5, 5, BLUE);
        assert!(leds.iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_solid_ring_full_revolution() {
        let mut leds = [BLACK; 60];
        fill_solid_ring(&mut leds, 10, 200, BLUE);
        assert!(leds.iter().all(|led| *led == BLUE));
    }

    #[test]
    fn test_arc_error_marker() {
        // Start after end is a caller bug; the whole ring goes red so
        // the mistake is visible on hardware instead of silent.
        let mut leds = [BLACK; 60];
        fill_solid_ring(&mut leds, 10, 5, BLUE);
        assert!(leds.iter().all(|led| *led == RED));

        let mut leds = [BLACK; 60];
        let color = Hsv {
            hue: 100,
            sat: 255,
            val: 255,
        };
        fill_gradient_ring(&mut leds, 10, color, 5, color);
        assert!(leds.iter().all(|led| *led == RED));
    }

    #[test]
    fn test_gradient_ring_plain_arc() {
        let mut leds = [BLACK; 60];
        let start = Hsv {
            hue: 0,
            sat: 255,
            val: 255,
        };
        let end = Hsv {
            hue: 64,
            sat: 255,
            val: 255,
        };
        fill_gradient_ring(&mut leds, 10, start, 20, end);

        assert_eq!(leds[10], hsv2rgb(start));
        for led in &leds[10..=20] {
            assert_ne!(*led, BLACK);
        }
        // Pixels outside the arc stay untouched.
        assert!(leds[..10].iter().all(|led| *led == BLACK));
        assert!(leds[21..].iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_gradient_ring_wrap_blend_continuity() {
        let mut leds = [BLACK; 60];
        let start = Hsv {
            hue: 0,
            sat: 255,
            val: 255,
        };
        let end = Hsv {
            hue: 64,
            sat: 255,
            val: 255,
        };
        // Arc 50..70 wraps: split at index 0, with the seam color being
        // the endpoint blend at the wrap ratio (10 of 20 pixels => 128).
        fill_gradient_ring(&mut leds, 50, start, 70, end);

        let seam = hsv2rgb(blend_hsv(start, end, 128));
        assert_eq!(leds[0], seam);

        // The fixed-point walk may round the last pixel of the first
        // sub-fill by a unit; the seam must still be continuous.
        for (a, b) in [(leds[59].r, seam.r), (leds[59].g, seam.g), (leds[59].b, seam.b)] {
            assert!(a.abs_diff(b) <= 8, "seam discontinuity: {a} vs {b}");
        }

        // Both endpoints and everything between is painted.
        for i in (50..60).chain(0..=10) {
            assert_ne!(leds[i], BLACK, "index {i} unpainted");
        }
        // The middle of the ring is outside the arc.
        assert!(leds[11..50].iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_fade_and_brighten() {
        let gray = Rgb {
            r: 100,
            g: 100,
            b: 100,
        };
        let mut leds = [gray; 4];

        fade_all(&mut leds, 205);
        assert!(leds.iter().all(|led| led.r == 80 && led.g == 80 && led.b == 80));

        let mut leds = [gray; 4];
        brighten_all(&mut leds, 128);
        assert!(leds.iter().all(|led| led.r == 150));

        // Repeated fading reaches true black, not a dim floor.
        let mut leds = [gray; 4];
        for _ in 0..100 {
            fade_all(&mut leds, 205);
        }
        assert!(leds.iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_add_glitter() {
        let mut leds = [BLACK; 60];
        let mut rng = Rng8::new(1);
        add_glitter(&mut leds, &mut rng, 255);

        let lit = leds.iter().filter(|led| **led != BLACK).count();
        assert!(lit >= 1, "certain glitter lit nothing");
        assert!(lit <= 5, "more pixels lit than trials");

        // Zero probability leaves the canvas alone.
        let mut leds = [BLACK; 60];
        add_glitter(&mut leds, &mut rng, 0);
        assert!(leds.iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_fill_solid() {
        let mut leds = [BLACK; 5];
        fill_solid(&mut leds, BLUE);
        assert!(leds.iter().all(|led| *led == BLUE));
    }
}
