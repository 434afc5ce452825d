//! Orientation and motion state derived from an inertial sensor.
//!
//! The sensor driver itself is external: anything implementing
//! [`MotionSource`] can feed the adapter. The adapter decodes each raw
//! sample once (quaternion + raw acceleration into yaw/pitch/roll and
//! gravity-free acceleration) and caches the result until the next
//! sample, which is what the routines read.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::Duration;
use libm::{atan2f, atanf, fabsf, roundf, sqrtf};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::math8::map_range;
use crate::ring::normalize_index;

/// Accelerometer scale of the decoded quaternion packets (LSB per g)
const ACCEL_LSB_PER_G: f32 = 8192.0;

const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Combined |pitch|+|roll| beyond which the device counts as vertical
const VERTICAL_DEGREES: i16 = 65;

/// Yaw readings are garbage once either tilt axis leaves this window
/// around level
const YAW_RELIABLE_DEGREES: i16 = 45;

/// One decoded sensor packet: orientation quaternion (w, x, y, z) and
/// raw acceleration in sensor units.
#[derive(Debug, Clone, Copy)]
pub struct MotionSample {
    pub quat: [f32; 4],
    pub accel: [i16; 3],
}

/// Result of polling a [`MotionSource`]
#[derive(Debug, Clone, Copy)]
pub enum MotionPoll {
    /// No new packet since the last poll
    Idle,
    /// A complete decoded packet
    Sample(MotionSample),
    /// The sensor FIFO overran; the packet is corrupt and must be skipped
    Overflow,
}

/// Abstract inertial sensor
///
/// Implementations own the bus access and packet framing; the adapter
/// owns interpretation and error recovery.
pub trait MotionSource {
    fn poll(&mut self) -> MotionPoll;

    /// Discard all buffered sensor data after an overflow
    fn reset_fifo(&mut self);
}

/// Flag an interrupt handler may set when the sensor signals data ready.
///
/// The handler does nothing but set the flag; all decoding happens in the
/// scheduled poll task, keeping interrupt latency bounded.
pub struct DataReadyFlag {
    inner: Mutex<Cell<bool>>,
}

impl DataReadyFlag {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(false)),
        }
    }

    /// Set the flag (safe to call from an interrupt handler)
    pub fn signal(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).set(true));
    }

    /// Consume the flag, returning whether it was set
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).replace(false))
    }
}

impl Default for DataReadyFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Orientation and motion snapshot, cached until the next sample.
///
/// Angles are stored in offset degrees so level is mid-range: yaw
/// 0..360 (180 = neutral), pitch and roll 0..180 (90 = level).
#[derive(Debug, Clone, Copy)]
pub struct OrientationState {
    pub yaw: i16,
    pub pitch: i16,
    pub roll: i16,
    /// Gravity-free acceleration in sensor units
    pub accel: [i32; 3],
}

impl OrientationState {
    /// Pitch relative to level, negative = nose down
    pub const fn pitch_signed(&self) -> i16 {
        self.pitch - 90
    }

    /// Roll relative to level
    pub const fn roll_signed(&self) -> i16 {
        self.roll - 90
    }

    /// Mean absolute linear acceleration across all three axes
    pub const fn activity_level(&self) -> i32 {
        (self.accel[0].abs() + self.accel[1].abs() + self.accel[2].abs()) / 3
    }

    /// Whether the device is held closer to vertical than flat
    pub const fn is_vertical(&self) -> bool {
        self.pitch_signed().abs() + self.roll_signed().abs() > VERTICAL_DEGREES
    }

    /// Roll-axis tilt above level
    pub const fn tilt_up(&self) -> bool {
        self.roll > 90
    }

    /// Roll-axis tilt below level
    pub const fn tilt_down(&self) -> bool {
        self.roll < 90
    }

    /// Yaw only means something while the device is near level
    pub fn is_yaw_reliable(&self) -> bool {
        let low = self.pitch.min(self.roll);
        let high = self.pitch.max(self.roll);
        low > 90 - YAW_RELIABLE_DEGREES && high < 90 + YAW_RELIABLE_DEGREES
    }
}

/// Converts raw sensor packets into [`OrientationState`] and handles
/// FIFO error recovery.
#[derive(Debug, Default)]
pub struct OrientationAdapter {
    state: Option<OrientationState>,
    overflows: u32,
}

impl OrientationAdapter {
    pub const fn new() -> Self {
        Self {
            state: None,
            overflows: 0,
        }
    }

    /// Poll the source once. Returns true when a fresh sample was decoded.
    ///
    /// An overflow resets the source FIFO and skips the packet; the
    /// previous state stays cached, so consumers read slightly stale but
    /// never corrupt data.
    pub fn poll<S: MotionSource>(&mut self, source: &mut S) -> bool {
        match source.poll() {
            MotionPoll::Idle => false,
            MotionPoll::Overflow => {
                source.reset_fifo();
                self.overflows += 1;
                #[cfg(feature = "esp32-log")]
                println!("motion FIFO overflow ({})", self.overflows);
                false
            }
            MotionPoll::Sample(sample) => {
                self.state = Some(decode(&sample));
                true
            }
        }
    }

    /// Latest decoded state, if any sample has arrived yet
    pub const fn state(&self) -> Option<&OrientationState> {
        self.state.as_ref()
    }

    /// Number of FIFO overflows recovered since startup
    pub const fn overflow_count(&self) -> u32 {
        self.overflows
    }
}

/// Decode one packet: quaternion to gravity vector to yaw/pitch/roll,
/// and raw acceleration minus gravity to linear acceleration.
#[allow(clippy::cast_possible_truncation)]
fn decode(sample: &MotionSample) -> OrientationState {
    let [w, x, y, z] = sample.quat;

    let gx = 2.0 * (x * z - w * y);
    let gy = 2.0 * (w * x + y * z);
    let gz = w * w - x * x - y * y + z * z;

    let yaw = atan2f(2.0 * x * y - 2.0 * w * z, 2.0 * w * w + 2.0 * x * x - 1.0);
    let pitch = atanf(gx / sqrtf(gy * gy + gz * gz));
    let roll = atanf(gy / sqrtf(gx * gx + gz * gz));

    let linear = |raw: i16, g: f32| -> i32 { (f32::from(raw) - g * ACCEL_LSB_PER_G) as i32 };

    OrientationState {
        yaw: (yaw * RAD_TO_DEG) as i16 + 180,
        pitch: (pitch * RAD_TO_DEG) as i16 + 90,
        roll: (roll * RAD_TO_DEG) as i16 + 90,
        accel: [
            linear(sample.accel[0], gx),
            linear(sample.accel[1], gy),
            linear(sample.accel[2], gz),
        ],
    }
}

/// Result of one [`LowestPointTracker`] step
#[derive(Debug, Clone, Copy)]
pub struct LowestPoint {
    /// Ring index currently considered lowest
    pub index: usize,
    /// Suggested re-fire interval: faster motion wants faster refresh
    pub refresh_interval: Duration,
}

/// Tilt magnitude (hundredths of a degree) mapped onto the refresh range
const SPEED_FULL_SCALE: i32 = 9_000;
const REFRESH_SLOW_MS: i32 = 25;
const REFRESH_FAST_MS: i32 = 5;

/// Tracks which pixel of the ring is physically lowest.
///
/// The target index comes from a quadrant-proportional mapping of pitch
/// and roll; the tracked index then steps at most one position per call
/// toward it along the shorter rotational direction, so the lit point
/// glides instead of jumping when the device swings.
#[derive(Debug, Clone)]
pub struct LowestPointTracker {
    current: i32,
    /// Mounting rotation between sensor "down" and ring index 0
    offset: i32,
}

impl LowestPointTracker {
    pub const fn new() -> Self {
        Self {
            current: 0,
            offset: -4,
        }
    }

    /// Set the sensor-to-ring mounting offset (in pixels)
    #[must_use]
    pub const fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    #[allow(
        clippy::cast_possible_wrap,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn step(&mut self, state: &OrientationState, n: usize) -> LowestPoint {
        if n < 4 {
            return LowestPoint {
                index: 0,
                refresh_interval: Duration::from_millis(REFRESH_SLOW_MS as u64),
            };
        }
        let pitch = f32::from(state.pitch_signed());
        let roll = f32::from(state.roll_signed());
        let abs_sum = fabsf(pitch) + fabsf(roll);

        let speed = (roundf(abs_sum * 100.0) as i32).clamp(0, SPEED_FULL_SCALE);
        let refresh_ms = map_range(speed, 0, SPEED_FULL_SCALE, REFRESH_SLOW_MS, REFRESH_FAST_MS);

        let quarter = n as i32 / 4;
        let target = if abs_sum > 0.0 {
            let ratio_of = |axis: f32| -> i32 { roundf(fabsf(axis) / abs_sum * 100.0) as i32 };
            // Quadrant by tilt signs, position within it by the ratio of
            // the two tilt magnitudes.
            let raw = if roll < 0.0 && pitch < 0.0 {
                map_range(ratio_of(pitch), 0, 100, 0, quarter - 1)
            } else if roll >= 0.0 && pitch < 0.0 {
                map_range(ratio_of(roll), 0, 100, quarter, 2 * quarter - 1)
            } else if roll >= 0.0 && pitch >= 0.0 {
                map_range(ratio_of(pitch), 0, 100, 2 * quarter, 3 * quarter - 1)
            } else {
                map_range(ratio_of(roll), 0, 100, 3 * quarter, n as i32 - 1)
            };
            normalize_index(raw + self.offset, n) as i32
        } else {
            self.current
        };

        if self.current != target {
            let forward = normalize_index(target - self.current, n) < n / 2;
            let step = if forward { 1 } else { -1 };
            self.current = normalize_index(self.current + step, n) as i32;
        }

        LowestPoint {
            index: self.current as usize,
            refresh_interval: Duration::from_millis(refresh_ms as u64),
        }
    }
}

impl Default for LowestPointTracker {
    fn default() -> Self {
        Self::new()
    }
}
