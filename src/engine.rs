//! The engine: one cooperative run-loop around the routine catalog.
//!
//! A single scheduler pass runs, in table order: the motion poll (when a
//! sensor is configured), the input poll, the active routine's frame,
//! and the optional auto-advance. Table order is what guarantees a
//! routine never reads orientation data older than the current pass.
//!
//! The engine never sleeps or reads a clock itself: the platform loop
//! calls [`Engine::tick`] with the current time and sleeps until the
//! returned deadline, exactly like driving a single hardware timer.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::FrameSink;
use crate::color::Rgb;
use crate::command::{Command, CommandQueue};
use crate::orientation::{MotionSource, OrientationAdapter};
use crate::routine::{BlackRoutine, DEFAULT_CATALOG, FrameCtx, RoutineId, RoutineSlot};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::tempo::{TempoConfig, TempoTracker};

/// Interval the frame task starts with until the routine re-paces itself
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(50_000);

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(10);
const MOTION_POLL_INTERVAL: Duration = Duration::from_millis(3);

/// Suggested period for [`EngineConfig::auto_advance`]
pub const AUTO_ADVANCE_INTERVAL: Duration = Duration::from_secs(30);

/// Debounced user inputs, sampled once per input tick.
///
/// Implementations return current levels; edge detection happens in the
/// tempo tracker (taps) and the engine (routine advance).
pub trait InputSource {
    /// Level of the tap-tempo button
    fn tap_active(&mut self) -> bool;

    /// Level of the select-next-routine button
    fn advance_pressed(&mut self) -> bool;
}

/// Configuration for the engine
#[derive(Clone)]
pub struct EngineConfig {
    /// Build-time selected routine catalog, in cycling order
    pub catalog: &'static [RoutineId],
    /// Catalog index to start with
    pub start_routine: usize,
    /// Brightness ceiling handed to routines
    pub max_brightness: u8,
    pub tempo: TempoConfig,
    /// Cycle to the next routine automatically at this period
    pub auto_advance: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog: DEFAULT_CATALOG,
            start_routine: 0,
            max_brightness: 128,
            tempo: TempoConfig::default(),
            auto_advance: None,
        }
    }
}

/// Result of one engine tick
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// When the earliest task is due next
    pub next_deadline: Instant,
    /// How long the platform loop may sleep (zero if already behind)
    pub sleep: Duration,
}

/// Orchestrates scheduler, tempo, orientation and the active routine
pub struct Engine<'a, S, I, M, const N: usize, const COMMANDS: usize> {
    sink: S,
    input: I,
    motion_source: Option<M>,
    commands: &'a CommandQueue<COMMANDS>,

    adapter: OrientationAdapter,
    tempo: TempoTracker,
    leds: [Rgb; N],
    scheduler: Scheduler<4>,

    motion_task: Option<TaskHandle>,
    input_task: TaskHandle,
    frame_task: TaskHandle,
    advance_task: Option<TaskHandle>,

    catalog: &'static [RoutineId],
    current: usize,
    slot: RoutineSlot,
    max_brightness: u8,
    advance_was_pressed: bool,
}

impl<'a, S, I, M, const N: usize, const COMMANDS: usize> Engine<'a, S, I, M, N, COMMANDS>
where
    S: FrameSink,
    I: InputSource,
    M: MotionSource,
{
    /// Create a new engine.
    ///
    /// Passing `None` for the motion source is degraded mode: the engine
    /// runs normally but keeps orientation-dependent routines out of the
    /// rotation. This is also the startup path when sensor init fails;
    /// nothing ever halts over a missing sensor.
    pub fn new(
        config: &EngineConfig,
        sink: S,
        input: I,
        motion_source: Option<M>,
        commands: &'a CommandQueue<COMMANDS>,
    ) -> Self {
        let mut scheduler = Scheduler::new();

        // Table order is the intra-pass ordering: motion data must be
        // fresh before the frame task consumes it.
        let motion_task = motion_source
            .as_ref()
            .map(|_| scheduler.add(MOTION_POLL_INTERVAL).unwrap_or_else(|_| unreachable!()));
        let input_task = scheduler
            .add(INPUT_POLL_INTERVAL)
            .unwrap_or_else(|_| unreachable!());
        let frame_task = scheduler
            .add(DEFAULT_FRAME_INTERVAL)
            .unwrap_or_else(|_| unreachable!());
        let advance_task = config.auto_advance.map(|period| {
            scheduler.add(period).unwrap_or_else(|_| unreachable!())
        });

        #[cfg(feature = "esp32-log")]
        if motion_source.is_none() {
            println!("no motion source; orientation routines disabled");
        }

        let catalog = config.catalog;
        let mut current = config.start_routine.min(catalog.len().saturating_sub(1));
        if motion_source.is_none() {
            // Walk forward to something renderable without a sensor.
            for _ in 0..catalog.len() {
                if !catalog[current].requires_motion() {
                    break;
                }
                current = (current + 1) % catalog.len();
            }
        }
        let slot = catalog
            .get(current)
            .map_or(RoutineSlot::Black(BlackRoutine), |id| id.to_slot());

        Self {
            sink,
            input,
            motion_source,
            commands,
            adapter: OrientationAdapter::new(),
            tempo: TempoTracker::new(config.tempo),
            leds: [Rgb { r: 0, g: 0, b: 0 }; N],
            scheduler,
            motion_task,
            input_task,
            frame_task,
            advance_task,
            catalog,
            current,
            slot,
            max_brightness: config.max_brightness,
            advance_was_pressed: false,
        }
    }

    /// Run every due task once, then report when to come back.
    ///
    /// Tasks run to completion, one at a time; a task made due while
    /// another runs simply goes in the same pass, after it.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        while let Some(task) = self.scheduler.poll(now) {
            if Some(task) == self.motion_task {
                self.run_motion();
            } else if task == self.input_task {
                self.run_input(now);
            } else if task == self.frame_task {
                self.run_frame(now);
            } else if Some(task) == self.advance_task {
                self.advance_routine();
            }
            self.scheduler.complete(task, now);
        }

        let next_deadline = self.scheduler.next_deadline().unwrap_or(now);
        let sleep = if next_deadline > now {
            next_deadline - now
        } else {
            Duration::from_micros(0)
        };
        TickResult {
            next_deadline,
            sleep,
        }
    }

    fn run_motion(&mut self) {
        if let Some(source) = self.motion_source.as_mut() {
            self.adapter.poll(source);
        }
    }

    fn run_input(&mut self, now: Instant) {
        let tap = self.input.tap_active();
        self.tempo.update(now, tap);

        let advance = self.input.advance_pressed();
        if advance && !self.advance_was_pressed {
            self.advance_routine();
        }
        self.advance_was_pressed = advance;

        while let Some(command) = self.commands.try_receive() {
            self.apply_command(command);
        }
    }

    fn run_frame(&mut self, now: Instant) {
        let ctx = FrameCtx {
            now,
            tempo: &self.tempo,
            motion: self.adapter.state(),
            run_counter: self.scheduler.run_counter(self.frame_task),
            interval: self.scheduler.interval(self.frame_task),
            max_brightness: self.max_brightness,
        };
        let advice = self.slot.render(&ctx, &mut self.leds);

        self.sink.set_brightness(advice.brightness);
        self.sink.show(&self.leds);

        // The routine self-paces: its advice becomes the task interval,
        // effective at this task's completion.
        self.scheduler.set_interval(self.frame_task, advice.next_interval);
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::SelectRoutine(index) => {
                let index = usize::from(index);
                let selectable = self.catalog.get(index).is_some_and(|id| {
                    self.motion_source.is_some() || !id.requires_motion()
                });
                // Out-of-range or unusable selections are dropped,
                // leaving the current routine running.
                if selectable {
                    self.select_routine(index);
                }
            }
            Command::SetBpm(bpm) => self.tempo.set_bpm(f32::from(bpm)),
            Command::SetMaxBrightness(brightness) => self.max_brightness = brightness,
        }
    }

    /// Switch to the catalog entry at `index`, starting it fresh.
    ///
    /// Selection always constructs new routine state. Resuming a paused
    /// animation is the scheduler's job (disable/enable of the frame
    /// task), not selection's.
    fn select_routine(&mut self, index: usize) {
        let Some(id) = self.catalog.get(index) else {
            return;
        };
        self.current = index;
        self.slot = id.to_slot();
        self.scheduler.set_interval(self.frame_task, DEFAULT_FRAME_INTERVAL);

        #[cfg(feature = "esp32-log")]
        println!("routine: {}", id.as_str());
    }

    /// Cycle to the next routine, wrapping around the catalog and
    /// skipping motion-dependent entries in degraded mode.
    fn advance_routine(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let len = self.catalog.len();
        let mut next = (self.current + 1) % len;
        for _ in 0..len {
            if self.motion_source.is_some() || !self.catalog[next].requires_motion() {
                break;
            }
            next = (next + 1) % len;
        }
        self.select_routine(next);
    }

    /// Currently selected routine
    pub fn current_routine(&self) -> RoutineId {
        self.catalog.get(self.current).copied().unwrap_or(RoutineId::Black)
    }

    /// The frame most recently rendered
    pub fn pixels(&self) -> &[Rgb] {
        &self.leds
    }

    /// Tempo state, for observation
    pub fn tempo(&self) -> &TempoTracker {
        &self.tempo
    }
}
