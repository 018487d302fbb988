//! Unit tests for col-agent.

#[cfg(test)]
mod inventory {
    use crate::Inventory;

    #[test]
    fn add_and_remove() {
        let mut inv = Inventory::new();
        inv.add("stone", 3);
        assert!(inv.has("stone", 3));
        assert!(inv.remove("stone", 2));
        assert_eq!(inv.count("stone"), 1);
        assert!(!inv.remove("stone", 2), "cannot remove more than held");
        assert_eq!(inv.count("stone"), 1);
        assert!(inv.remove("stone", 1));
        assert!(inv.is_empty());
    }

    #[test]
    fn remove_missing_tag() {
        let mut inv = Inventory::new();
        assert!(!inv.remove("wood", 1));
        assert!(inv.remove("wood", 0));
    }

    #[test]
    fn iteration_is_sorted() {
        let mut inv = Inventory::new();
        inv.add("wood", 1);
        inv.add("apple", 2);
        let tags: Vec<_> = inv.iter().map(|(t, _)| t).collect();
        assert_eq!(tags, ["apple", "wood"]);
    }
}

#[cfg(test)]
mod store {
    use col_core::{AgentId, Affordances, CategorySet, FactionId, TaskCategory, VoxelCoord};

    use crate::{AgentStatus, AgentStoreBuilder};

    #[test]
    fn builder_defaults() {
        let (store, rngs) = AgentStoreBuilder::new(3, 1).build();
        assert_eq!(store.count, 3);
        assert_eq!(rngs.len(), 3);
        assert!(store.agent_ids().all(|a| store.is_alive(a)));
        assert!(store.permissions.iter().all(|p| p.contains(TaskCategory::Research)));
        assert_eq!(store.faction[2], FactionId(0));
    }

    #[test]
    fn builder_overrides() {
        let (store, _) = AgentStoreBuilder::new(2, 1)
            .faction(FactionId(4))
            .permissions(CategorySet::EMPTY.with(TaskCategory::Dig))
            .affordances(Affordances::WALK | Affordances::CLIMB)
            .build();
        assert_eq!(store.faction[1], FactionId(4));
        assert!(!store.permissions[0].contains(TaskCategory::Chop));
        assert!(store.affordances[0].contains(Affordances::CLIMB));
    }

    #[test]
    fn view_reflects_soa_fields() {
        let (mut store, _) = AgentStoreBuilder::new(2, 1).build();
        store.position[1] = VoxelCoord::new(4, 0, 2);
        store.status[1] = AgentStatus::Sleeping;
        store.inventory[1].add("stone", 2);

        let view = store.view(AgentId(1)).unwrap();
        assert_eq!(view.position, VoxelCoord::new(4, 0, 2));
        assert!(!view.can_perform(TaskCategory::Dig), "sleeping agents cannot work");
        assert_eq!(view.inventory.count("stone"), 2);
        assert!(store.view(AgentId(2)).is_none());
    }

    #[test]
    fn dead_agents_are_not_alive() {
        let (mut store, _) = AgentStoreBuilder::new(1, 1).build();
        store.status[0] = AgentStatus::Dead;
        assert!(!store.is_alive(AgentId(0)));
        assert!(!store.is_alive(AgentId(9)));
    }
}
