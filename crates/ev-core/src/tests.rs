//! Unit tests for ev-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ChargerId, NodeId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = VehicleId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VehicleId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(VehicleId(0) < VehicleId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(VehicleId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(ChargerId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5u64);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(30); // 1 tick = 30 min
        assert_eq!(clock.elapsed_mins(), 0);
        clock.advance();
        assert_eq!(clock.elapsed_mins(), 30);
        clock.advance();
        assert_eq!(clock.elapsed_mins(), 60);
    }

    #[test]
    fn clock_dhm() {
        let mut clock = SimClock::new(30);
        // Advance 49 half-hours = 1 day and 30 min.
        for _ in 0..49 {
            clock.advance();
        }
        assert_eq!(clock.elapsed_dhm(), (1, 0, 30));
    }

    #[test]
    fn config_end_tick() {
        let config = SimConfig {
            total_ticks:             336,
            tick_duration_mins:      30,
            discharge_factor:        5.0,
            charge_per_tick:         10.0,
            snapshot_interval_ticks: 0,
        };
        assert_eq!(config.end_tick(), Tick(336));
        assert_eq!(config.make_clock().current_tick, Tick::ZERO);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);
        for _ in 0..32 {
            assert_eq!(a.gen_range(0..1_000_000u32), b.gen_range(0..1_000_000u32));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(2);
        let va: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let vb: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_ne!(va, vb);
    }

    #[test]
    fn child_streams_are_reproducible() {
        let mut root_a = SimRng::new(7);
        let mut root_b = SimRng::new(7);
        let mut child_a = root_a.child(3);
        let mut child_b = root_b.child(3);
        assert_eq!(child_a.random::<u64>(), child_b.random::<u64>());
    }

    #[test]
    fn weighted_index_respects_zero_weights() {
        let mut rng = SimRng::new(5);
        for _ in 0..64 {
            let i = rng.weighted_index(&[0.0, 1.0, 0.0]);
            assert_eq!(i, 1);
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(5);
        let empty: [u32; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
