//! Animation routine catalog with compile-time known variants.
//!
//! Each routine is a frame generator: render one frame into the pixel
//! buffer from the current tempo (and optionally orientation) state, and
//! recommend when to be called next. All routines live in one enum so
//! dispatch is a match, not a string comparison, and selection costs
//! nothing at runtime.

mod bounce;
mod fastloop;
mod fire;
mod glitter;
mod heartbeat;
mod motion;
mod noise;
mod palette_flow;
mod pulse;
mod racers;
mod strobe;
mod twirlers;
mod waves;

use embassy_time::{Duration, Instant};

pub use bounce::{BounceBlendRoutine, JuggleRoutine};
pub use fastloop::{FastLoopRoutine, PendulumRoutine};
pub use fire::FireRoutine;
pub use glitter::{DiscoGlitterRoutine, FadeGlitterRoutine};
pub use heartbeat::HeartbeatRoutine;
pub use motion::{GravityLedRoutine, MotionStrobeRoutine, ShakeItRoutine, WaveRoutine};
pub use noise::NoiseRoutine;
pub use palette_flow::PaletteFlowRoutine;
pub use pulse::{Pulse3Routine, Pulse5Routine};
pub use racers::RacersRoutine;
pub use strobe::{QuadStrobeRoutine, StrobeRoutine};
pub use twirlers::TwirlersRoutine;
pub use waves::{ColorGlowRoutine, FanWipeRoutine, ThreeSinRoutine};

use crate::color::{
    HEAT_PALETTE, LAVA_PALETTE, OCEAN_PALETTE, PARTY_PALETTE, RAINBOW_PALETTE,
    RAINBOW_STRIPE_PALETTE, Rgb,
};
use crate::orientation::OrientationState;
use crate::ring::fill_solid;
use crate::tempo::TempoTracker;

/// Everything a routine may read while rendering one frame.
///
/// Passed explicitly so routines have no ambient state and can be unit
/// tested against a hand-built context.
pub struct FrameCtx<'a> {
    pub now: Instant,
    pub tempo: &'a TempoTracker,
    /// Latest orientation sample; `None` without a motion sensor
    pub motion: Option<&'a OrientationState>,
    /// Completed runs of the frame task since startup
    pub run_counter: u32,
    /// The frame task's current re-fire interval
    pub interval: Duration,
    /// Configured brightness ceiling
    pub max_brightness: u8,
}

/// What a routine hands back after rendering a frame
#[derive(Debug, Clone, Copy)]
pub struct TickAdvice {
    /// When the routine wants to run again
    pub next_interval: Duration,
    /// Global brightness for this frame
    pub brightness: u8,
}

/// One selectable frame generator
pub trait Routine {
    /// Render one frame into `leds`.
    ///
    /// Every pixel must end up determined: written outright or
    /// explicitly faded from the previous frame.
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice;

    /// Reset routine state
    fn reset(&mut self) {}
}

/// Known routine ids selectable from the catalog and command channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutineId {
    PaletteRainbow,
    PaletteRainbowStripe,
    PaletteOcean,
    PaletteHeat,
    PaletteLava,
    PaletteParty,
    Twirl1,
    Twirl2,
    Twirl4,
    Twirl6,
    Twirl2Opposing,
    Twirl4Opposing,
    Twirl6Opposing,
    FadeGlitter,
    DiscoGlitter,
    Fire,
    Racers,
    Wave,
    ShakeIt,
    Strobe,
    MotionStrobe,
    GravityLed,
    Heartbeat,
    FastLoop,
    FastLoopReverse,
    Pendulum,
    NoiseLava,
    NoiseParty,
    BounceBlend,
    Juggle,
    QuadStrobe,
    Pulse3,
    Pulse5One,
    Pulse5Two,
    Pulse5Three,
    ThreeSin,
    ColorGlow,
    FanWipe,
    Black,
}

/// The full build-time catalog, in cycling order
pub const DEFAULT_CATALOG: &[RoutineId] = &[
    RoutineId::PaletteRainbow,
    RoutineId::PaletteRainbowStripe,
    RoutineId::PaletteOcean,
    RoutineId::PaletteHeat,
    RoutineId::PaletteLava,
    RoutineId::PaletteParty,
    RoutineId::Twirl1,
    RoutineId::Twirl2,
    RoutineId::Twirl4,
    RoutineId::Twirl6,
    RoutineId::Twirl2Opposing,
    RoutineId::Twirl4Opposing,
    RoutineId::Twirl6Opposing,
    RoutineId::FadeGlitter,
    RoutineId::DiscoGlitter,
    RoutineId::Fire,
    RoutineId::Racers,
    RoutineId::Wave,
    RoutineId::ShakeIt,
    RoutineId::Strobe,
    RoutineId::MotionStrobe,
    RoutineId::GravityLed,
    RoutineId::Heartbeat,
    RoutineId::FastLoop,
    RoutineId::FastLoopReverse,
    RoutineId::Pendulum,
    RoutineId::NoiseLava,
    RoutineId::NoiseParty,
    RoutineId::BounceBlend,
    RoutineId::Juggle,
    RoutineId::QuadStrobe,
    RoutineId::Pulse3,
    RoutineId::Pulse5One,
    RoutineId::Pulse5Two,
    RoutineId::Pulse5Three,
    RoutineId::ThreeSin,
    RoutineId::ColorGlow,
    RoutineId::FanWipe,
    RoutineId::Black,
];

impl RoutineId {
    /// Short name used on the command channel and in diagnostics
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PaletteRainbow => "p_rb",
            Self::PaletteRainbowStripe => "p_rb_stripe",
            Self::PaletteOcean => "p_ocean",
            Self::PaletteHeat => "p_heat",
            Self::PaletteLava => "p_lava",
            Self::PaletteParty => "p_party",
            Self::Twirl1 => "twirl1",
            Self::Twirl2 => "twirl2",
            Self::Twirl4 => "twirl4",
            Self::Twirl6 => "twirl6",
            Self::Twirl2Opposing => "twirl2o",
            Self::Twirl4Opposing => "twirl4o",
            Self::Twirl6Opposing => "twirl6o",
            Self::FadeGlitter => "fglitter",
            Self::DiscoGlitter => "dglitter",
            Self::Fire => "fire2012",
            Self::Racers => "racers",
            Self::Wave => "wave",
            Self::ShakeIt => "shakeit",
            Self::Strobe => "strobe1",
            Self::MotionStrobe => "strobe2",
            Self::GravityLed => "gled",
            Self::Heartbeat => "heartbeat",
            Self::FastLoop => "fastloop",
            Self::FastLoopReverse => "fastloop2",
            Self::Pendulum => "pendulum",
            Self::NoiseLava => "noise_lava",
            Self::NoiseParty => "noise_party",
            Self::BounceBlend => "bounceblend",
            Self::Juggle => "jugglepal",
            Self::QuadStrobe => "quadstrobe",
            Self::Pulse3 => "pulse3",
            Self::Pulse5One => "pulse5_1",
            Self::Pulse5Two => "pulse5_2",
            Self::Pulse5Three => "pulse5_3",
            Self::ThreeSin => "tsp",
            Self::ColorGlow => "color_glow",
            Self::FanWipe => "fan_wipe",
            Self::Black => "black",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        DEFAULT_CATALOG.iter().copied().find(|id| id.as_str() == s)
    }

    /// Whether this routine is meaningless without an orientation source.
    ///
    /// Routines that merely prefer motion data fall back to fixed
    /// constants and are not listed here.
    pub const fn requires_motion(self) -> bool {
        matches!(
            self,
            Self::Wave | Self::ShakeIt | Self::MotionStrobe | Self::GravityLed
        )
    }

    /// Construct a fresh instance of this routine.
    ///
    /// Selection always starts from initial state; only scheduler
    /// disable/enable of a live slot resumes mid-animation.
    pub fn to_slot(self) -> RoutineSlot {
        match self {
            Self::PaletteRainbow => {
                RoutineSlot::PaletteFlow(PaletteFlowRoutine::new(&RAINBOW_PALETTE))
            }
            Self::PaletteRainbowStripe => {
                RoutineSlot::PaletteFlow(PaletteFlowRoutine::new(&RAINBOW_STRIPE_PALETTE))
            }
            Self::PaletteOcean => RoutineSlot::PaletteFlow(PaletteFlowRoutine::new(&OCEAN_PALETTE)),
            Self::PaletteHeat => RoutineSlot::PaletteFlow(PaletteFlowRoutine::new(&HEAT_PALETTE)),
            Self::PaletteLava => RoutineSlot::PaletteFlow(PaletteFlowRoutine::new(&LAVA_PALETTE)),
            Self::PaletteParty => RoutineSlot::PaletteFlow(PaletteFlowRoutine::new(&PARTY_PALETTE)),
            Self::Twirl1 => RoutineSlot::Twirlers(TwirlersRoutine::new(1, false)),
            Self::Twirl2 => RoutineSlot::Twirlers(TwirlersRoutine::new(2, false)),
            Self::Twirl4 => RoutineSlot::Twirlers(TwirlersRoutine::new(4, false)),
            Self::Twirl6 => RoutineSlot::Twirlers(TwirlersRoutine::new(6, false)),
            Self::Twirl2Opposing => RoutineSlot::Twirlers(TwirlersRoutine::new(2, true)),
            Self::Twirl4Opposing => RoutineSlot::Twirlers(TwirlersRoutine::new(4, true)),
            Self::Twirl6Opposing => RoutineSlot::Twirlers(TwirlersRoutine::new(6, true)),
            Self::FadeGlitter => RoutineSlot::FadeGlitter(FadeGlitterRoutine::new()),
            Self::DiscoGlitter => RoutineSlot::DiscoGlitter(DiscoGlitterRoutine::new()),
            Self::Fire => RoutineSlot::Fire(FireRoutine::new()),
            Self::Racers => RoutineSlot::Racers(RacersRoutine::new()),
            Self::Wave => RoutineSlot::Wave(WaveRoutine::new()),
            Self::ShakeIt => RoutineSlot::ShakeIt(ShakeItRoutine::new()),
            Self::Strobe => RoutineSlot::Strobe(StrobeRoutine::new()),
            Self::MotionStrobe => RoutineSlot::MotionStrobe(MotionStrobeRoutine::new()),
            Self::GravityLed => RoutineSlot::GravityLed(GravityLedRoutine::new()),
            Self::Heartbeat => RoutineSlot::Heartbeat(HeartbeatRoutine::new()),
            Self::FastLoop => RoutineSlot::FastLoop(FastLoopRoutine::new(false)),
            Self::FastLoopReverse => RoutineSlot::FastLoop(FastLoopRoutine::new(true)),
            Self::Pendulum => RoutineSlot::Pendulum(PendulumRoutine::new()),
            Self::NoiseLava => RoutineSlot::Noise(NoiseRoutine::new(&LAVA_PALETTE)),
            Self::NoiseParty => RoutineSlot::Noise(NoiseRoutine::new(&PARTY_PALETTE)),
            Self::BounceBlend => RoutineSlot::BounceBlend(BounceBlendRoutine::new()),
            Self::Juggle => RoutineSlot::Juggle(JuggleRoutine::new()),
            Self::QuadStrobe => RoutineSlot::QuadStrobe(QuadStrobeRoutine::new()),
            Self::Pulse3 => RoutineSlot::Pulse3(Pulse3Routine::new()),
            Self::Pulse5One => RoutineSlot::Pulse5(Pulse5Routine::new(1, true)),
            Self::Pulse5Two => RoutineSlot::Pulse5(Pulse5Routine::new(2, true)),
            Self::Pulse5Three => RoutineSlot::Pulse5(Pulse5Routine::new(3, true)),
            Self::ThreeSin => RoutineSlot::ThreeSin(ThreeSinRoutine::new()),
            Self::ColorGlow => RoutineSlot::ColorGlow(ColorGlowRoutine::new()),
            Self::FanWipe => RoutineSlot::FanWipe(FanWipeRoutine::new()),
            Self::Black => RoutineSlot::Black(BlackRoutine),
        }
    }
}

/// All-off idle routine
#[derive(Debug, Clone, Default)]
pub struct BlackRoutine;

impl Routine for BlackRoutine {
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        fill_solid(leds, Rgb { r: 0, g: 0, b: 0 });
        TickAdvice {
            // Nothing is going on; wake rarely.
            next_interval: Duration::from_millis(500),
            brightness: ctx.max_brightness,
        }
    }
}

/// Active routine slot - enum containing all possible routines
#[derive(Debug, Clone)]
pub enum RoutineSlot {
    PaletteFlow(PaletteFlowRoutine),
    Twirlers(TwirlersRoutine),
    FadeGlitter(FadeGlitterRoutine),
    DiscoGlitter(DiscoGlitterRoutine),
    Fire(FireRoutine),
    Racers(RacersRoutine),
    Wave(WaveRoutine),
    ShakeIt(ShakeItRoutine),
    Strobe(StrobeRoutine),
    MotionStrobe(MotionStrobeRoutine),
    GravityLed(GravityLedRoutine),
    Heartbeat(HeartbeatRoutine),
    FastLoop(FastLoopRoutine),
    Pendulum(PendulumRoutine),
    Noise(NoiseRoutine),
    BounceBlend(BounceBlendRoutine),
    Juggle(JuggleRoutine),
    QuadStrobe(QuadStrobeRoutine),
    Pulse3(Pulse3Routine),
    Pulse5(Pulse5Routine),
    ThreeSin(ThreeSinRoutine),
    ColorGlow(ColorGlowRoutine),
    FanWipe(FanWipeRoutine),
    Black(BlackRoutine),
}

impl RoutineSlot {
    /// Render one frame with the active routine
    pub fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        match self {
            Self::PaletteFlow(routine) => routine.render(ctx, leds),
            Self::Twirlers(routine) => routine.render(ctx, leds),
            Self::FadeGlitter(routine) => routine.render(ctx, leds),
            Self::DiscoGlitter(routine) => routine.render(ctx, leds),
            Self::Fire(routine) => routine.render(ctx, leds),
            Self::Racers(routine) => routine.render(ctx, leds),
            Self::Wave(routine) => routine.render(ctx, leds),
            Self::ShakeIt(routine) => routine.render(ctx, leds),
            Self::Strobe(routine) => routine.render(ctx, leds),
            Self::MotionStrobe(routine) => routine.render(ctx, leds),
            Self::GravityLed(routine) => routine.render(ctx, leds),
            Self::Heartbeat(routine) => routine.render(ctx, leds),
            Self::FastLoop(routine) => routine.render(ctx, leds),
            Self::Pendulum(routine) => routine.render(ctx, leds),
            Self::Noise(routine) => routine.render(ctx, leds),
            Self::BounceBlend(routine) => routine.render(ctx, leds),
            Self::Juggle(routine) => routine.render(ctx, leds),
            Self::QuadStrobe(routine) => routine.render(ctx, leds),
            Self::Pulse3(routine) => routine.render(ctx, leds),
            Self::Pulse5(routine) => routine.render(ctx, leds),
            Self::ThreeSin(routine) => routine.render(ctx, leds),
            Self::ColorGlow(routine) => routine.render(ctx, leds),
            Self::FanWipe(routine) => routine.render(ctx, leds),
            Self::Black(routine) => routine.render(ctx, leds),
        }
    }

    /// Reset the routine state
    pub fn reset(&mut self) {
        match self {
            Self::PaletteFlow(routine) => Routine::reset(routine),
            Self::Twirlers(routine) => Routine::reset(routine),
            Self::FadeGlitter(routine) => Routine::reset(routine),
            Self::DiscoGlitter(routine) => Routine::reset(routine),
            Self::Fire(routine) => Routine::reset(routine),
            Self::Racers(routine) => Routine::reset(routine),
            Self::Wave(routine) => Routine::reset(routine),
            Self::ShakeIt(routine) => Routine::reset(routine),
            Self::Strobe(routine) => Routine::reset(routine),
            Self::MotionStrobe(routine) => Routine::reset(routine),
            Self::GravityLed(routine) => Routine::reset(routine),
            Self::Heartbeat(routine) => Routine::reset(routine),
            Self::FastLoop(routine) => Routine::reset(routine),
            Self::Pendulum(routine) => Routine::reset(routine),
            Self::Noise(routine) => Routine::reset(routine),
            Self::BounceBlend(routine) => Routine::reset(routine),
            Self::Juggle(routine) => Routine::reset(routine),
            Self::QuadStrobe(routine) => Routine::reset(routine),
            Self::Pulse3(routine) => Routine::reset(routine),
            Self::Pulse5(routine) => Routine::reset(routine),
            Self::ThreeSin(routine) => Routine::reset(routine),
            Self::ColorGlow(routine) => Routine::reset(routine),
            Self::FanWipe(routine) => Routine::reset(routine),
            Self::Black(routine) => Routine::reset(routine),
        }
    }
}
