//! Synthetic world generation: a complete Home/Work/Store graph with
//! empirically grounded commute times, cyclic weekday/weekend trip plans,
//! and charger-placement scenarios.
//!
//! # Node layout
//!
//! Nodes are laid out as three contiguous id ranges:
//!
//! ```text
//! [0, homes)                  Home
//! [homes, homes + works)      Work
//! [homes + works, total)      Store
//! ```
//!
//! Edges between nodes of the *same* kind (and self loops) have duration 0 —
//! errands within a neighborhood are below tick resolution.  Home↔work
//! durations are drawn from a published commute-time distribution; the other
//! cross-kind pairs are uniform draws scaled by configurable factors.
//!
//! All randomness flows through one seeded [`SimRng`], so equal seeds yield
//! byte-identical worlds, plans, and placements.

use ev_core::{NodeId, SimRng};

use crate::topology::{TravelMatrix, TravelMatrixBuilder};
use crate::{WorldError, WorldResult};

// ── Commute-time distribution ─────────────────────────────────────────────────

// One-way commute duration buckets in minutes, with the share of commuters
// falling in each bucket (German federal commuter statistics).
const COMMUTE_RANGES_MIN: [(u32, u32); 4] = [(0, 10), (10, 30), (30, 60), (60, 90)];
const COMMUTE_PROBS: [f64; 4] = [0.23, 0.499, 0.222, 0.049];

// ── NodeKind ──────────────────────────────────────────────────────────────────

/// What a location node represents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Home,
    Work,
    Store,
}

// ── WorldConfig ───────────────────────────────────────────────────────────────

/// Parameters for synthetic world generation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    /// Number of home nodes.  One vehicle is generated per home.
    pub homes: usize,
    /// Number of workplace nodes.
    pub works: usize,
    /// Number of store nodes.
    pub stores: usize,
    /// Ticks the generated trip plans must cover (plans are generated until
    /// their dwell sum reaches this).
    pub total_ticks: u64,
    /// Master seed for all generation.
    pub seed: u64,
    /// Scale for uniform work↔store durations, in ticks.
    pub work_store_factor: f64,
    /// Scale for uniform home↔store durations, in ticks.
    pub home_store_factor: f64,
}

impl WorldConfig {
    pub fn total_nodes(&self) -> usize {
        self.homes + self.works + self.stores
    }
}

// ── TripPlan ──────────────────────────────────────────────────────────────────

/// One vehicle's generated journey: a start location and an ordered list of
/// `(destination, dwell_ticks)` stops.
///
/// This is the neutral input shape consumed by the fleet layer; the
/// simulation never mutates it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripPlan {
    pub start: NodeId,
    pub stops: Vec<(NodeId, u64)>,
}

// ── ChargerScenario ───────────────────────────────────────────────────────────

/// How chargers are placed across the world.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChargerScenario {
    /// A charger at every home, plus `n` extra chargers placed uniformly at
    /// random over work and store nodes.
    HomesPlusRandom(usize),
    /// All `n` chargers placed uniformly at random over every node.  Some
    /// vehicles may never visit a node with a charger — intentional stress
    /// case for siting studies.
    UniformRandom(usize),
}

// ── World ─────────────────────────────────────────────────────────────────────

/// A generated world: the travel matrix plus node-kind bookkeeping and the
/// RNG stream for plan/placement draws.
pub struct World {
    config: WorldConfig,
    matrix: TravelMatrix,
    kinds: Vec<NodeKind>,
    rng: SimRng,
}

impl World {
    /// Generate the node set and travel matrix from `config`.
    ///
    /// # Errors
    ///
    /// `WorldError::Config` if any node-kind count is zero — trip plans need
    /// at least one node of each kind.
    pub fn generate(config: WorldConfig) -> WorldResult<World> {
        if config.homes == 0 || config.works == 0 || config.stores == 0 {
            return Err(WorldError::Config(
                "homes, works, and stores must all be non-zero".into(),
            ));
        }

        let mut rng = SimRng::new(config.seed);
        let total = config.total_nodes();

        let mut kinds = Vec::with_capacity(total);
        kinds.extend(std::iter::repeat_n(NodeKind::Home, config.homes));
        kinds.extend(std::iter::repeat_n(NodeKind::Work, config.works));
        kinds.extend(std::iter::repeat_n(NodeKind::Store, config.stores));

        let mut builder = TravelMatrixBuilder::with_capacity(total * total);
        builder.add_nodes(total);

        for a in 0..total as u32 {
            for b in a..total as u32 {
                let (na, nb) = (NodeId(a), NodeId(b));
                let ticks = match (kinds[na.index()], kinds[nb.index()]) {
                    // Same-kind edges and self loops are below tick resolution.
                    (x, y) if x == y => 0.0,
                    (NodeKind::Home, NodeKind::Work) | (NodeKind::Work, NodeKind::Home) => {
                        sample_commute_ticks(&mut rng)
                    }
                    (NodeKind::Work, NodeKind::Store) | (NodeKind::Store, NodeKind::Work) => {
                        round2(rng.random::<f64>() * config.work_store_factor)
                    }
                    (NodeKind::Home, NodeKind::Store) | (NodeKind::Store, NodeKind::Home) => {
                        round2(rng.random::<f64>() * config.home_store_factor)
                    }
                    // Same-kind pairs already matched by the guard above.
                    _ => unreachable!(),
                };
                builder.set_duration(na, nb, ticks);
            }
        }

        Ok(World {
            matrix: builder.build(),
            kinds,
            rng,
            config,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn matrix(&self) -> &TravelMatrix {
        &self.matrix
    }

    /// Consume the world, keeping only the travel matrix.
    pub fn into_matrix(self) -> TravelMatrix {
        self.matrix
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.kinds.get(node.index()).copied()
    }

    /// All node ids of `kind`, ascending.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.kinds
            .iter()
            .enumerate()
            .filter(|&(_, &k)| k == kind)
            .map(|(i, _)| NodeId(i as u32))
            .collect()
    }

    // ── Trip plans ────────────────────────────────────────────────────────

    /// Generate one [`TripPlan`] per home node.
    ///
    /// Each vehicle starts at its home and alternates between a weekday
    /// pattern (home 8–14 h → assigned workplace 8–10 h → random store
    /// 2–4 h) and a weekend pattern (home 8–14 h → random store 4–8 h),
    /// switching after 240 weekday ticks and 96 weekend ticks.  Stops are
    /// appended until their dwell sum covers `config.total_ticks`, so a plan
    /// always outlasts the run.
    pub fn trip_plans(&mut self) -> Vec<TripPlan> {
        let works = self.nodes_of_kind(NodeKind::Work);
        let stores = self.nodes_of_kind(NodeKind::Store);
        let homes = self.nodes_of_kind(NodeKind::Home);

        homes
            .iter()
            .map(|&home| {
                // Every vehicle commutes to one fixed workplace.
                let work = *self.rng.choose(&works).expect("works is non-empty");

                let mut stops: Vec<(NodeId, u64)> = Vec::new();
                let mut weekday = true;
                let mut phase_start = 0u64; // dwell sum at the current phase switch

                // The first stop is the vehicle's own home; its dwell is
                // consumed before the run starts (the vehicle begins there),
                // so the coverage sum skips it.
                while stops.iter().skip(1).map(|&(_, d)| d).sum::<u64>() < self.config.total_ticks {
                    if weekday {
                        stops.push((home, self.rng.gen_range(16..=28u64)));
                        stops.push((work, self.rng.gen_range(16..=20u64)));
                        let store = *self.rng.choose(&stores).expect("stores is non-empty");
                        stops.push((store, self.rng.gen_range(4..=8u64)));
                    } else {
                        stops.push((home, self.rng.gen_range(16..=28u64)));
                        let store = *self.rng.choose(&stores).expect("stores is non-empty");
                        stops.push((store, self.rng.gen_range(8..=16u64)));
                    }

                    let phase_ticks: u64 =
                        stops.iter().map(|&(_, d)| d).sum::<u64>() - phase_start;
                    let phase_budget = if weekday { 240 } else { 96 };
                    if phase_ticks >= phase_budget {
                        weekday = !weekday;
                        phase_start += phase_ticks;
                    }
                }

                TripPlan {
                    start: stops[0].0,
                    stops: stops[1..].to_vec(),
                }
            })
            .collect()
    }

    // ── Charger placement ─────────────────────────────────────────────────

    /// Produce the charger placement list for `scenario`.  One charger is
    /// created per entry, in list order — that order becomes registry order.
    pub fn charger_placement(&mut self, scenario: ChargerScenario) -> Vec<NodeId> {
        match scenario {
            ChargerScenario::HomesPlusRandom(n) => {
                let mut placement = self.nodes_of_kind(NodeKind::Home);
                let mut pool = self.nodes_of_kind(NodeKind::Work);
                pool.extend(self.nodes_of_kind(NodeKind::Store));
                for _ in 0..n {
                    placement.push(*self.rng.choose(&pool).expect("pool is non-empty"));
                }
                placement
            }
            ChargerScenario::UniformRandom(n) => {
                let pool: Vec<NodeId> = self.matrix.nodes().collect();
                (0..n)
                    .map(|_| *self.rng.choose(&pool).expect("world has nodes"))
                    .collect()
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Draw a home↔work duration in ticks from the commute-time distribution.
fn sample_commute_ticks(rng: &mut SimRng) -> f64 {
    let bucket = rng.weighted_index(&COMMUTE_PROBS);
    let (lo, hi) = COMMUTE_RANGES_MIN[bucket];
    let minutes = rng.gen_range(lo..hi);
    minutes as f64 / 30.0
}

/// Round to 2 decimal places, matching the precision of recorded durations.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
