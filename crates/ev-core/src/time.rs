//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter; there is no wall-clock
//! execution anywhere in the simulation.  The mapping to simulated minutes is
//! held in `SimClock`:
//!
//!   elapsed_mins = tick * tick_duration_mins
//!
//! Using an integer tick as the canonical time unit keeps all dwell
//! arithmetic exact.  Travel durations are the one quantity expressed in
//! *fractional* ticks (`f64`): the source model draws edge durations like
//! 0.73 ticks, and a trip completes once the integer ticks elapsed meet or
//! exceed that fraction.
//!
//! The default tick duration is 30 simulated minutes.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`; overflow is not a practical concern at any tick
/// resolution this model runs at.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Owns the current tick and its mapping to simulated minutes.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated minutes one tick represents.  Default: 30.
    pub tick_duration_mins: u32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock at tick 0 with the given resolution.
    pub fn new(tick_duration_mins: u32) -> Self {
        Self {
            tick_duration_mins,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated minutes since tick 0.
    #[inline]
    pub fn elapsed_mins(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_mins as u64
    }

    /// Break elapsed time into (day, hour, minute) components from sim start.
    /// Useful for human-readable logging without a datetime library.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_mins = self.elapsed_mins();
        let days = total_mins / 1_440;
        let hours = ((total_mins % 1_440) / 60) as u32;
        let minutes = (total_mins % 60) as u32;
        (days, hours, minutes)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(30)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built by the application crate (or a world generator) and passed
/// to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total ticks to simulate.  The run always lasts exactly this long;
    /// there is no early-termination condition.
    pub total_ticks: u64,

    /// Simulated minutes per tick.  Default: 30.
    pub tick_duration_mins: u32,

    /// State-of-charge lost per unit of travel duration (ticks).
    pub discharge_factor: f64,

    /// State-of-charge gained per tick while plugged in, before the clamp
    /// at 100.
    pub charge_per_tick: f64,

    /// Call the observer's snapshot hook every N ticks.  0 disables
    /// snapshots; 1 = every tick.
    pub snapshot_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_mins)
    }
}
