//! Cooperative task table with per-task dynamic intervals.
//!
//! Single-threaded and non-preemptive: the driving loop polls for one due
//! task at a time, runs its body to completion, then reports back. The
//! next due time is computed at completion from the task's *current*
//! interval, so a body that changes its own interval re-paces itself
//! starting with the very next cycle and is never re-entered immediately.

use embassy_time::{Duration, Instant};
use heapless::Vec;

/// Floor applied to every task interval.
///
/// Tempo-derived interval formulas (quarter-beat strobes at high BPM)
/// can reach zero; flooring here keeps such tasks schedulable without
/// starving the rest of the table.
pub const MIN_TASK_INTERVAL: Duration = Duration::from_micros(100);

/// Opaque task identifier returned by [`Scheduler::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(usize);

/// Error returned when the task table is at capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerFull;

#[derive(Debug, Clone, Copy)]
struct Task {
    interval: Duration,
    next_due: Instant,
    enabled: bool,
    running: bool,
    run_counter: u32,
    remaining: Option<u32>,
}

/// Fixed-capacity cooperative scheduler
#[derive(Debug, Default)]
pub struct Scheduler<const N: usize> {
    tasks: Vec<Task, N>,
}

impl<const N: usize> Scheduler<N> {
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Add a repeat-forever task. The first run is due immediately.
    pub fn add(&mut self, interval: Duration) -> Result<TaskHandle, SchedulerFull> {
        self.add_inner(interval, None)
    }

    /// Add a task that disables itself after `iterations` completed runs
    pub fn add_limited(
        &mut self,
        interval: Duration,
        iterations: u32,
    ) -> Result<TaskHandle, SchedulerFull> {
        self.add_inner(interval, Some(iterations))
    }

    fn add_inner(
        &mut self,
        interval: Duration,
        remaining: Option<u32>,
    ) -> Result<TaskHandle, SchedulerFull> {
        let handle = TaskHandle(self.tasks.len());
        self.tasks
            .push(Task {
                interval: interval.max(MIN_TASK_INTERVAL),
                next_due: Instant::from_micros(0),
                enabled: true,
                running: false,
                run_counter: 0,
                remaining,
            })
            .map_err(|_| SchedulerFull)?;
        Ok(handle)
    }

    /// Return one due task, in table order, marking it in-flight.
    ///
    /// The caller must run the task body and then call [`complete`].
    /// Table order is the cross-task ordering guarantee: a producer task
    /// added before a consumer task runs first within the same pass.
    ///
    /// [`complete`]: Scheduler::complete
    pub fn poll(&mut self, now: Instant) -> Option<TaskHandle> {
        for (i, task) in self.tasks.iter_mut().enumerate() {
            if task.enabled && !task.running && task.next_due <= now {
                task.running = true;
                return Some(TaskHandle(i));
            }
        }
        None
    }

    /// Record that a task body finished at `now`.
    ///
    /// The next due time is `now + interval` with the interval as it
    /// stands *after* the body ran, so self-pacing changes made inside
    /// the body take effect without an immediate re-entry.
    pub fn complete(&mut self, handle: TaskHandle, now: Instant) {
        let task = &mut self.tasks[handle.0];
        task.running = false;
        task.run_counter = task.run_counter.wrapping_add(1);
        if let Some(remaining) = &mut task.remaining {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                task.enabled = false;
            }
        }
        task.next_due = now + task.interval;
    }

    /// Change a task's interval, effective from its next completion
    pub fn set_interval(&mut self, handle: TaskHandle, interval: Duration) {
        self.tasks[handle.0].interval = interval.max(MIN_TASK_INTERVAL);
    }

    pub fn interval(&self, handle: TaskHandle) -> Duration {
        self.tasks[handle.0].interval
    }

    /// Completed runs of this task since it was added
    pub fn run_counter(&self, handle: TaskHandle) -> u32 {
        self.tasks[handle.0].run_counter
    }

    /// Re-enable a task. It resumes with whatever state its owner kept;
    /// an overdue task runs at the next poll.
    pub fn enable(&mut self, handle: TaskHandle) {
        self.tasks[handle.0].enabled = true;
    }

    /// Disable a task. An in-flight body is not aborted; it simply is
    /// not rescheduled after completing.
    pub fn disable(&mut self, handle: TaskHandle) {
        self.tasks[handle.0].enabled = false;
    }

    pub fn is_enabled(&self, handle: TaskHandle) -> bool {
        self.tasks[handle.0].enabled
    }

    /// Earliest due time across enabled tasks, for the platform sleep
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks
            .iter()
            .filter(|t| t.enabled && !t.running)
            .map(|t| t.next_due)
            .min()
    }
}
