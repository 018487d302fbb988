//! Unit tests for col-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, RequestId, TaskId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert_eq!(TaskId::default().0, u64::MAX);
    }

    #[test]
    fn next_allocates_sequentially() {
        assert_eq!(TaskId(3).next(), TaskId(4));
        assert_eq!(RequestId(0).next(), RequestId(1));
    }

    #[test]
    fn display() {
        assert_eq!(TaskId(7).to_string(), "TaskId(7)");
    }
}

#[cfg(test)]
mod voxel {
    use crate::VoxelCoord;

    #[test]
    fn distance_sq_is_symmetric_and_non_negative() {
        let a = VoxelCoord::new(0, 0, 0);
        let b = VoxelCoord::new(3, -4, 0);
        assert_eq!(a.distance_sq(b), 25.0);
        assert_eq!(b.distance_sq(a), 25.0);
        assert_eq!(a.distance_sq(a), 0.0);
    }

    #[test]
    fn neighbors_are_all_adjacent() {
        let c = VoxelCoord::new(5, 5, 5);
        let n = c.neighbors();
        assert_eq!(n.len(), 6);
        assert!(n.iter().all(|v| v.is_adjacent(c)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(c.offset(1, 1, 0)));
    }

    #[test]
    fn manhattan() {
        assert_eq!(VoxelCoord::new(1, 2, 3).manhattan(VoxelCoord::new(-1, 2, 0)), 5);
    }
}

#[cfg(test)]
mod time {
    use crate::{SchedulerConfig, SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(10).offset(3), Tick(13));
        assert_eq!(Tick(15).since(Tick(10)), 5);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn clock_advances() {
        let mut clock = SimClock::new(16);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.elapsed_ms(), 32);
        assert_eq!(clock.ticks_for_ms(33), 3);
        assert_eq!(clock.ticks_for_ms(0), 1);
    }

    #[test]
    fn default_config_validates() {
        let config = SchedulerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.end_tick(), Tick(config.total_ticks));
    }

    #[test]
    fn zero_plan_budget_rejected() {
        let config = SchedulerConfig { plan_budget_per_tick: 0, ..SchedulerConfig::default() };
        assert!(config.validate().is_err());
    }
}

#[cfg(test)]
mod category {
    use crate::{CategorySet, TaskCategory, TaskPriority};

    #[test]
    fn priority_ordering() {
        assert!(TaskPriority::Eventually < TaskPriority::Low);
        assert!(TaskPriority::Low < TaskPriority::Medium);
        assert!(TaskPriority::Medium < TaskPriority::High);
        assert!(TaskPriority::High < TaskPriority::Urgent);
    }

    #[test]
    fn category_set_membership() {
        let set = CategorySet::EMPTY.with(TaskCategory::Dig).with(TaskCategory::Chop);
        assert!(set.contains(TaskCategory::Dig));
        assert!(set.contains(TaskCategory::Chop));
        assert!(!set.contains(TaskCategory::Craft));

        let mut all = CategorySet::all();
        assert!(TaskCategory::ALL.iter().all(|&c| all.contains(c)));
        all.remove(TaskCategory::Attack);
        assert!(!all.contains(TaskCategory::Attack));
    }
}

#[cfg(test)]
mod affordance {
    use crate::Affordances;

    #[test]
    fn union_and_contains() {
        let bird = Affordances::WALK | Affordances::FLY;
        assert!(bird.contains(Affordances::FLY));
        assert!(bird.contains(Affordances::WALK));
        assert!(!bird.contains(Affordances::SWIM));
        assert!(bird.contains(Affordances::NONE));
        assert_eq!(Affordances::default(), Affordances::WALK);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn same_seed_same_stream() {
        let mut a = AgentRng::new(7, AgentId(3));
        let mut b = AgentRng::new(7, AgentId(3));
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..1000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = AgentRng::new(0, AgentId(0));
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
