//! Simulation observer trait for progress reporting and data collection.

use ev_core::Tick;
use ev_fleet::Vehicle;

use crate::TickMetrics;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at tick boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, metrics: &TickMetrics) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: mean SoC {:.1}", metrics.mean_soc);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any vehicle is stepped.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with that tick's fleet aggregates.
    fn on_tick_end(&mut self, _tick: Tick, _metrics: &TickMetrics) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`
    /// ticks; never called when the interval is 0).
    ///
    /// Provides read-only access to the full fleet so output writers can
    /// record per-vehicle state without the sim knowing about any specific
    /// output format.
    fn on_snapshot(&mut self, _tick: Tick, _vehicles: &[Vehicle]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
