/// End-to-end scenarios driving a full [`Simulation`] through scripted input
/// against a recording sink, checking the cross-module invariants that no
/// single unit test can see.

#[cfg(test)]
mod tests {
    use crate::edit::EditOutcome;
    use crate::input::InputState;
    use crate::pick::{CrosshairPicker, Eye, RayHit, RayPicker};
    use crate::Simulation;
    use cubeland_core::block::BlockType;
    use cubeland_core::config::WorldConfig;
    use cubeland_core::direction::Face;
    use cubeland_world::rng::{hash_to_range, placement_hash};
    use cubeland_world::sink::RecordingSink;
    use cubeland_world::World;
    use glam::{IVec3, Vec2, Vec3};
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 1.0 / 60.0;

    fn small_config() -> WorldConfig {
        WorldConfig {
            world_width: 48,
            world_depth: 48,
            tree_count: 4,
            render_distance: 10.0,
            ..Default::default()
        }
    }

    /// Every visible key is in the grid, every visible key is live in the
    /// sink, and the sink saw no contract violation.
    fn assert_consistent(sim: &Simulation, sink: &RecordingSink) {
        let world = sim.world();
        for coord in world.visible().coords() {
            assert!(world.block(coord).is_some(), "{coord} visible but not in grid");
            assert!(sink.is_live(coord), "{coord} visible but not presented");
        }
        assert_eq!(sink.live_count(), world.visible().len());
        assert!(sink.is_clean(), "{sink:?}");
    }

    /// Let the player fall onto the terrain and come to rest.
    fn settle(sim: &mut Simulation, sink: &mut RecordingSink) {
        let picker = CrosshairPicker::default();
        for _ in 0..240 {
            sim.tick(DT, &InputState::default(), &picker, sink);
        }
        assert!(sim.player().grounded, "player never landed: {:?}", sim.player());
    }

    /// Picker that always reports the same hit, for edits independent of the
    /// camera.
    struct FixedPicker(Option<RayHit>);

    impl RayPicker for FixedPicker {
        fn pick(&self, _eye: &Eye, _screen_point: Vec2, _world: &World) -> Option<RayHit> {
            self.0
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let a = Simulation::new(small_config()).unwrap();
        let b = Simulation::new(small_config()).unwrap();
        assert_eq!(a.world().grid().len(), b.world().grid().len());
        for (coord, block) in a.world().grid().iter() {
            assert_eq!(b.world().block(coord), Some(block), "differs at {coord}");
        }
        assert_eq!(a.player().position, b.player().position);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = WorldConfig {
            render_distance: -1.0,
            ..small_config()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_spawn_lands_on_centre_column() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let mut sink = RecordingSink::new();
        sim.prime(&mut sink);
        let top = sim.world().grid().highest_occupied(24, 24, 100);
        settle(&mut sim, &mut sink);
        let feet = sim.player().position.y - 0.9;
        assert!((feet - (top + 1) as f32).abs() < 1e-3, "feet at {feet}, top {top}");
        assert_consistent(&sim, &sink);
    }

    #[test]
    fn test_degenerate_dt_skips_tick() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let mut sink = RecordingSink::new();
        let picker = CrosshairPicker::default();
        let before = *sim.player();
        let input = InputState {
            forward: true,
            jump: true,
            ..Default::default()
        };
        for dt in [f32::NAN, f32::INFINITY, -0.01, 0.5] {
            let report = sim.tick(dt, &input, &picker, &mut sink);
            assert!(report.skipped, "dt = {dt}");
            assert!(report.visibility.is_none());
        }
        assert_eq!(*sim.player(), before);
        assert_eq!(sim.ticks(), 0);
        assert_eq!(sink.presented, 0);
    }

    #[test]
    fn test_periodic_pass_runs_on_interval() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let mut sink = RecordingSink::new();
        let picker = CrosshairPicker::default();
        let passes = (0..120)
            .filter(|_| {
                sim.tick(DT, &InputState::default(), &picker, &mut sink)
                    .visibility
                    .is_some()
            })
            .count();
        // Two seconds at 0.5 s per pass.
        assert!((3..=4).contains(&passes), "{passes} passes");
        assert!(sink.presented > 0);
    }

    #[test]
    fn test_slot_selection_through_tick() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let mut sink = RecordingSink::new();
        let picker = CrosshairPicker::default();
        let select = |slot| InputState {
            select_slot: Some(slot),
            ..Default::default()
        };
        sim.tick(DT, &select(2), &picker, &mut sink);
        assert_eq!(sim.inventory().selected_block(), BlockType::Stone);
        sim.tick(DT, &select(9), &picker, &mut sink);
        assert_eq!(sim.inventory().selected_block(), BlockType::Stone);
    }

    /// 48 × 48 stone slab at y = 10; the player spawns above (24, 24).
    fn flat_sim(config: WorldConfig) -> Simulation {
        let mut world = World::empty(&config);
        for x in 0..48 {
            for z in 0..48 {
                world.set_block(IVec3::new(x, 10, z), BlockType::Stone);
            }
        }
        Simulation::with_world(config, world).unwrap()
    }

    #[test]
    fn test_wrapped_world_config_is_validated() {
        let config = WorldConfig {
            visibility_interval: 0.0,
            ..small_config()
        };
        let world = World::empty(&config);
        assert!(Simulation::with_world(config, world).is_err());
    }

    #[test]
    fn test_slow_frames_keep_player_on_surface() {
        let mut sim = flat_sim(small_config());
        let mut sink = RecordingSink::new();
        sim.prime(&mut sink);
        let picker = CrosshairPicker::default();
        let walk = InputState {
            forward: true,
            ..Default::default()
        };
        for dt in [0.2, 0.1, 0.2, 0.1] {
            let report = sim.tick(dt, &walk, &picker, &mut sink);
            assert!(!report.skipped);
        }
        assert!(sim.player().grounded);
        assert!((sim.player().position.y - 11.9).abs() < 1e-3, "{:?}", sim.player());
        assert!(sim.player().position.z < 23.0, "{:?}", sim.player());
        assert_consistent(&sim, &sink);
    }

    #[test]
    fn test_edits_visible_before_next_pass() {
        // No periodic pass after priming: only immediate admission can
        // make an edit visible.
        let mut sim = flat_sim(WorldConfig {
            visibility_interval: 1000.0,
            ..small_config()
        });
        let mut sink = RecordingSink::new();
        sim.prime(&mut sink);
        settle(&mut sim, &mut sink);
        assert!((sim.player().position.y - 11.9).abs() < 1e-3);

        let target = IVec3::new(27, 10, 24);
        let hit = RayHit {
            coord: target,
            block: BlockType::Stone,
            face: Face::Top,
            point: Vec3::new(27.5, 11.0, 24.5),
            distance: 3.0,
        };
        let build = InputState {
            place_block: true,
            select_slot: Some(3),
            ..Default::default()
        };
        let report = sim.tick(DT, &build, &FixedPicker(Some(hit)), &mut sink);
        let placed = IVec3::new(27, 11, 24);
        assert_eq!(
            report.edit,
            Some(EditOutcome::Placed {
                coord: placed,
                block: BlockType::Wood
            })
        );
        assert!(report.visibility.is_none());
        assert!(sim.world().is_visible(placed));
        assert_eq!(sink.live_block(placed), Some(BlockType::Wood));

        // Look straight down and dig out the block underfoot.
        let dig = InputState {
            break_block: true,
            ..Default::default()
        }
        .with_look(0.0, -FRAC_PI_2);
        let report = sim.tick(DT, &dig, &CrosshairPicker::default(), &mut sink);
        let below = IVec3::new(24, 10, 24);
        assert_eq!(
            report.edit,
            Some(EditOutcome::Removed {
                coord: below,
                block: BlockType::Stone
            })
        );
        assert!(report.visibility.is_none());
        assert!(!sim.world().is_visible(below));
        assert!(!sink.is_live(below));
        assert_consistent(&sim, &sink);
    }

    #[test]
    fn test_cannot_build_inside_player() {
        let mut sim = flat_sim(small_config());
        let mut sink = RecordingSink::new();
        sim.prime(&mut sink);
        settle(&mut sim, &mut sink);
        let build = InputState {
            place_block: true,
            ..Default::default()
        }
        .with_look(0.0, -FRAC_PI_2);
        let report = sim.tick(DT, &build, &CrosshairPicker::default(), &mut sink);
        assert_eq!(report.edit, Some(EditOutcome::Obstructed(IVec3::new(24, 11, 24))));
        assert!(sim.world().block(IVec3::new(24, 11, 24)).is_none());
    }

    #[test]
    fn test_visible_subset_of_grid_under_random_play() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let mut sink = RecordingSink::new();
        sim.prime(&mut sink);
        let picker = CrosshairPicker::default();

        for tick in 0..900u32 {
            let h = placement_hash(99, tick / 20, 0);
            let action = placement_hash(99, tick, 1);
            let input = InputState {
                forward: h & 1 != 0,
                back: h & 2 != 0 && h & 1 == 0,
                left: h & 4 != 0,
                right: h & 8 != 0 && h & 4 == 0,
                jump: h & 16 != 0,
                break_block: action % 7 == 0,
                place_block: action % 7 == 1,
                select_slot: Some(hash_to_range(action, 5) as usize),
                yaw: (h >> 8) as f32 / 256.0 * std::f32::consts::TAU,
                pitch: -0.6,
            };
            let report = sim.tick(DT, &input, &picker, &mut sink);
            assert!(!report.skipped);
            if tick % 30 == 0 {
                assert_consistent(&sim, &sink);
            }
        }
        assert_consistent(&sim, &sink);
        assert!(sink.retracted > 0, "expected some churn");
    }

    #[test]
    fn test_fall_through_world_respawns() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let mut sink = RecordingSink::new();
        let picker = CrosshairPicker::default();
        let spawn = sim.world().spawn_point();
        // Push the player below the world outside the terrain footprint.
        sim.player_mut().position = Vec3::new(-50.0, -9.5, -50.0);
        let mut respawned = false;
        for _ in 0..60 {
            let report = sim.tick(DT, &InputState::default(), &picker, &mut sink);
            if report.step.respawned {
                respawned = true;
                break;
            }
        }
        assert!(respawned);
        assert_eq!(sim.player().position, spawn);
        assert_eq!(sim.player().velocity, Vec3::ZERO);
    }
}
