#![no_std]

pub mod color;
pub mod command;
pub mod engine;
pub mod math8;
pub mod orientation;
pub mod ring;
pub mod routine;
pub mod scheduler;
pub mod tempo;

pub use color::{Hsv, Rgb};
pub use command::{Command, CommandQueue};
pub use engine::{Engine, EngineConfig, InputSource, TickResult};
pub use math8::Rng8;
pub use orientation::{
    DataReadyFlag, MotionPoll, MotionSample, MotionSource, OrientationState,
};
pub use routine::{FrameCtx, Routine, RoutineId, RoutineSlot, TickAdvice};
pub use scheduler::{MIN_TASK_INTERVAL, Scheduler, TaskHandle};
pub use tempo::{TempoConfig, TempoTracker};

pub use embassy_time::{Duration, Instant};

/// Largest supported ring length.
///
/// Routine state buffers are sized by this so the routine catalog stays
/// independent of the engine's const pixel count.
pub const MAX_PIXELS: usize = 255;

/// Abstract LED output trait
///
/// Implement this trait to support different hardware platforms.
/// The engine is generic over this trait; `show` may block for the
/// hardware's minimum refresh latency.
pub trait FrameSink {
    /// Set the global brightness applied at flush time (0-255)
    fn set_brightness(&mut self, brightness: u8);

    /// Flush a full frame of colors to the LED hardware
    fn show(&mut self, pixels: &[Rgb]);
}
