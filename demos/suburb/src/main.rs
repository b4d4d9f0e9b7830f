//! suburb — smallest demo for the EV fleet charging model.
//!
//! Generates a synthetic neighborhood of 8 homes, 2 workplaces, and 3
//! stores, puts one commuting vehicle at every home, places a charger at
//! every home plus two shared public chargers, and simulates two weeks at
//! 30 minutes per tick.  Scale comment: swap the node counts and seed for
//! a city-sized siting study; the tick loop is O(vehicles × chargers/node).

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use ev_core::{SimConfig, Tick};
use ev_fleet::{ChargeMode, Vehicle, VehicleSpec, VehicleState};
use ev_output::{CsvWriter, MetricsObserver, OutputWriter};
use ev_sim::{SimBuilder, SimObserver, TickMetrics};
use ev_world::{ChargerScenario, World, WorldConfig};

// ── Constants ─────────────────────────────────────────────────────────────────

const HOMES:              usize = 8;
const WORKS:              usize = 2;
const STORES:             usize = 3;
const SEED:               u64   = 42;
const SIM_DAYS:           u64   = 14;
const TICKS_PER_DAY:      u64   = 48; // 1 tick = 30 min
const EXTRA_CHARGERS:     usize = 2;
const SNAPSHOT_INTERVAL:  u64   = TICKS_PER_DAY; // one snapshot per simulated day

// ── Observer wrapper to count rows and keep the final aggregates ──────────────

struct SummaryObserver<W: OutputWriter> {
    inner:         MetricsObserver<W>,
    metrics_rows:  usize,
    snapshot_rows: usize,
    last:          Option<TickMetrics>,
}

impl<W: OutputWriter> SummaryObserver<W> {
    fn new(inner: MetricsObserver<W>) -> Self {
        Self { inner, metrics_rows: 0, snapshot_rows: 0, last: None }
    }
}

impl<W: OutputWriter> SimObserver for SummaryObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, metrics: &TickMetrics) {
        self.metrics_rows += 1;
        self.last = Some(metrics.clone());
        self.inner.on_tick_end(tick, metrics);
    }

    fn on_snapshot(&mut self, tick: Tick, vehicles: &[Vehicle]) {
        self.snapshot_rows += vehicles.len();
        self.inner.on_snapshot(tick, vehicles);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

fn state_label(vehicle: &Vehicle) -> String {
    match vehicle.state {
        VehicleState::Driving { .. } => "driving".into(),
        VehicleState::Charging { mode: ChargeMode::Idle, .. } => "idle".into(),
        VehicleState::Charging { mode: ChargeMode::Queued, .. } => "queued".into(),
        VehicleState::Charging { mode: ChargeMode::Plugged(c), .. } => format!("plugged {}", c.0),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== suburb — EV fleet charging model ===");
    println!("Homes: {HOMES}  |  Days: {SIM_DAYS}  |  Seed: {SEED}");
    println!();

    // 1. Generate the world: nodes, travel matrix, node kinds.
    let world_config = WorldConfig {
        homes:             HOMES,
        works:             WORKS,
        stores:            STORES,
        total_ticks:       SIM_DAYS * TICKS_PER_DAY,
        seed:              SEED,
        work_store_factor: 1.0,
        home_store_factor: 0.5,
    };
    let mut world = World::generate(world_config)?;
    println!("World: {} nodes ({HOMES} homes, {WORKS} works, {STORES} stores)",
        world.matrix().node_count());

    // 2. One commuting vehicle per home.
    let specs: Vec<VehicleSpec> = world
        .trip_plans()
        .iter()
        .map(VehicleSpec::from_trip_plan)
        .collect();
    println!("Fleet: {} vehicles", specs.len());

    // 3. Charger placement: every home, plus shared public chargers.
    let placement = world.charger_placement(ChargerScenario::HomesPlusRandom(EXTRA_CHARGERS));
    println!("Chargers: {} ({HOMES} home + {EXTRA_CHARGERS} public)", placement.len());

    // 4. Sim config.
    let config = SimConfig {
        total_ticks:             SIM_DAYS * TICKS_PER_DAY,
        tick_duration_mins:      30,
        discharge_factor:        5.0,
        charge_per_tick:         10.0,
        snapshot_interval_ticks: SNAPSHOT_INTERVAL,
    };
    println!(
        "Sim: {} ticks ({SIM_DAYS} days × {TICKS_PER_DAY}), snapshot every {SNAPSHOT_INTERVAL} ticks",
        config.total_ticks
    );
    println!();

    // 5. Build the sim (validates every route against the matrix).
    let mut sim = SimBuilder::new(config, world.into_matrix())
        .vehicles(specs)
        .chargers(placement)
        .build()?;

    // 6. Set up CSV output.
    std::fs::create_dir_all("output/suburb")?;
    let writer = CsvWriter::new(Path::new("output/suburb"))?;
    let mut obs = SummaryObserver::new(MetricsObserver::new(writer));

    // 7. Run.
    let t0 = Instant::now();
    sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 8. Summary.
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    println!("  tick_metrics.csv      : {} rows", obs.metrics_rows);
    println!("  vehicle_snapshots.csv : {} rows", obs.snapshot_rows);
    if let Some(m) = &obs.last {
        println!();
        println!("Final tick aggregates:");
        println!("  mean SoC            : {:.1}", m.mean_soc);
        println!("  trips completed     : {}", m.trips_completed);
        println!("  energy delivered    : {:.1}", m.energy_delivered);
        println!("  insufficient charge : {}", m.insufficient_charge_events);
        println!("  queued vehicles     : {}", m.queued_vehicles);
    }
    println!();

    // 9. Final per-vehicle table.
    println!("{:<10} {:<8} {:<10} {:<14} {:<6} {:<6}", "Vehicle", "SoC", "Node", "State", "Trips", "Stuck");
    println!("{}", "-".repeat(58));
    for v in &sim.vehicles {
        println!(
            "{:<10} {:<8.1} {:<10} {:<14} {:<6} {:<6}",
            v.id.0,
            v.soc,
            v.location.0,
            state_label(v),
            v.trips_completed,
            v.insufficient_charge_events,
        );
    }

    Ok(())
}
