//! Live reconfiguration commands.
//!
//! Commands arrive as single-letter lines (`p3`, `b128`, `m200`) from a
//! serial console or any other producer, get parsed at the edge, and are
//! queued through a bounded interrupt-safe queue that the engine drains
//! once per input tick. Malformed payloads parse to `None` and are
//! dropped; prior configuration stays intact.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// A parsed reconfiguration command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `p<N>`: select the routine at catalog index N
    SelectRoutine(u8),
    /// `b<N>`: override the tempo estimate with N BPM
    SetBpm(u16),
    /// `m<N>`: set the maximum brightness
    SetMaxBrightness(u8),
}

impl Command {
    /// Parse one command line. Returns `None` for anything malformed.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let payload = line.get(1..)?;
        match line.as_bytes().first()? {
            b'p' => payload.parse().ok().map(Self::SelectRoutine),
            b'b' => payload.parse().ok().map(Self::SetBpm),
            b'm' => payload.parse().ok().map(Self::SetMaxBrightness),
            _ => None,
        }
    }
}

/// Error returned when the command queue is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandQueueFull;

/// Bounded command queue, safe to fill from an interrupt or another
/// context via critical sections.
pub struct CommandQueue<const N: usize> {
    inner: Mutex<RefCell<Deque<Command, N>>>,
}

impl<const N: usize> CommandQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Queue a command for the engine's next input tick
    pub fn try_send(&self, command: Command) -> Result<(), CommandQueueFull> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow_mut()
                .push_back(command)
                .map_err(|_| CommandQueueFull)
        })
    }

    /// Take the oldest queued command, if any
    pub fn try_receive(&self) -> Option<Command> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }
}

impl<const N: usize> Default for CommandQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
