//! End-to-end tests for the game world
//!
//! Each test builds a small level, drives it with frame inputs and checks
//! the flags the outer loop would poll.

use approx::assert_relative_eq;
use chroma_ai::AiState;
use chroma_game::prelude::*;
use chroma_physics::vision_filter;

const DT: f32 = 1.0 / 60.0;
const PLAYER_START: Vec2 = Vec2::new(200.0, 160.0);

fn level() -> LevelDesc {
    LevelDesc::new("arena", 480.0, 320.0).with_player(PlayerSpawn {
        position: PLAYER_START,
        ..Default::default()
    })
}

fn fire_right() -> FrameInput {
    FrameInput::default()
        .with_cursor(PLAYER_START + Vec2::new(100.0, 0.0))
        .with_fire()
}

fn run_until(world: &mut GameWorld, input: &FrameInput, max_frames: usize, done: impl Fn(&GameWorld) -> bool) -> bool {
    for _ in 0..max_frames {
        world.tick(input, DT);
        if done(world) {
            return true;
        }
    }
    false
}

#[test]
fn test_player_hides_in_own_spray() {
    let mut world = GameWorld::from_level(&level(), GameConfig::default()).unwrap();
    assert!(!world.is_player_hidden());

    world.tick(&fire_right(), DT);
    world.tick(&FrameInput::default(), DT);
    assert!(world.is_player_hidden());
    assert_eq!(world.resolver().counters(world.player_tag()).spray, 1);
}

#[test]
fn test_hiding_ends_when_spray_expires() {
    let config = GameConfig::default().with_spray(SprayConfig::default().with_lifetime(0.25));
    let mut world = GameWorld::from_level(&level(), config).unwrap();

    world.tick(&fire_right(), DT);
    world.tick(&FrameInput::default(), DT);
    assert!(world.is_player_hidden());

    for _ in 0..40 {
        world.tick(&FrameInput::default(), DT);
    }
    assert!(!world.is_player_hidden());
    assert_eq!(world.resolver().counters(world.player_tag()).spray, 0);
}

#[test]
fn test_guard_chases_visible_player() {
    let level = level().with_enemy(EnemySpawn::guard("guard", Vec2::new(60.0, 160.0)));
    let mut world = GameWorld::from_level(&level, GameConfig::default()).unwrap();

    world.tick(&FrameInput::default(), DT);
    let guard = world.enemy("guard").unwrap();
    assert_eq!(guard.controller.state(), AiState::Chase);

    let caught = run_until(&mut world, &FrameInput::default(), 600, |w| w.player_collided_with_enemy());
    assert!(caught);

    world.clear_enemy_collision();
    assert!(!world.player_collided_with_enemy());
}

#[test]
fn test_guard_loses_hidden_player() {
    let level = level().with_enemy(EnemySpawn::guard("guard", Vec2::new(60.0, 160.0)));
    let mut world = GameWorld::from_level(&level, GameConfig::default()).unwrap();

    world.tick(&fire_right(), DT);
    assert_eq!(world.enemy("guard").unwrap().controller.state(), AiState::Chase);

    world.tick(&FrameInput::default(), DT);
    world.tick(&FrameInput::default(), DT);
    assert!(world.is_player_hidden());
    assert_eq!(world.enemy("guard").unwrap().controller.state(), AiState::Wander);
}

#[test]
fn test_guard_faces_its_heading() {
    let level = level().with_enemy(EnemySpawn::guard("guard", Vec2::new(200.0, 40.0)));
    let mut world = GameWorld::from_level(&level, GameConfig::default()).unwrap();

    for _ in 0..10 {
        world.tick(&FrameInput::default(), DT);
    }
    let guard = world.enemy("guard").unwrap();
    assert_eq!(guard.controller.state(), AiState::Chase);
    let tag = guard.tag;
    let snapshot = world.snapshots().into_iter().find(|s| s.tag == tag).unwrap();
    assert_relative_eq!(snapshot.rotation, std::f32::consts::FRAC_PI_2, epsilon = 1e-3);
}

#[test]
fn test_bomb_at_feet_hides_player() {
    let mut world = GameWorld::from_level(&level(), GameConfig::default()).unwrap();

    let throw = FrameInput::default().with_cursor(PLAYER_START).with_secondary();
    world.tick(&throw, DT);
    let hidden = run_until(&mut world, &FrameInput::default(), 5, |w| w.is_player_hidden());
    assert!(hidden);
    let counters = world.resolver().counters(world.player_tag());
    assert_eq!(counters.bomb, 1);
    assert_eq!(counters.spray, 0);
}

#[test]
fn test_thrown_bomb_fills_goal() {
    let goal = Vec2::new(260.0, 160.0);
    let level = level().with_goal(Pigment::Magenta, goal);
    let mut world = GameWorld::from_level(&level, GameConfig::default()).unwrap();
    assert_eq!(world.goals().progress(Pigment::Magenta), (0, 1));

    world.tick(&FrameInput::default().with_cursor(goal).with_secondary(), DT);
    let filled = run_until(&mut world, &FrameInput::default(), 60, |w| w.goals().all_satisfied());
    assert!(filled);
    assert_eq!(world.goals().progress(Pigment::Magenta), (1, 1));
}

#[test]
fn test_camera_never_catches() {
    let level = level().with_enemy(EnemySpawn::camera("eye", PLAYER_START + Vec2::new(0.0, 40.0)));
    let mut world = GameWorld::from_level(&level, GameConfig::default()).unwrap();

    let touched = run_until(&mut world, &FrameInput::moving(0.0, 1.0), 120, |w| w.player_collided_with_enemy());
    assert!(!touched);
    let camera = world.enemy("eye").unwrap().tag;
    let snapshot = world.snapshots().into_iter().find(|s| s.tag == camera).unwrap();
    assert_eq!(snapshot.position, PLAYER_START + Vec2::new(0.0, 40.0));
}

#[test]
fn test_door_wins_after_goals_filled() {
    let level = level()
        .with_goal(Pigment::Cyan, Vec2::new(260.0, 160.0))
        .with_door(Vec2::new(200.0, 240.0));
    let mut world = GameWorld::from_level(&level, GameConfig::default()).unwrap();

    world.tick(&fire_right(), DT);
    world.tick(&FrameInput::default(), DT);
    assert_eq!(world.goals().progress(Pigment::Cyan), (1, 1));
    assert!(world.goals().all_satisfied());

    let won = run_until(&mut world, &FrameInput::moving(0.0, 1.0), 240, |w| w.won());
    assert!(won);

    world.clear_won();
    assert!(!world.won());
}

#[test]
fn test_door_stays_shut_without_goals() {
    let level = level()
        .with_goal(Pigment::Cyan, Vec2::new(400.0, 40.0))
        .with_door(Vec2::new(200.0, 240.0));
    let mut world = GameWorld::from_level(&level, GameConfig::default()).unwrap();

    let won = run_until(&mut world, &FrameInput::moving(0.0, 1.0), 240, |w| w.won());
    assert!(!won);
    assert_eq!(world.goals().progress(Pigment::Cyan), (0, 1));
}

#[test]
fn test_active_laser_hits_player() {
    let level = level().with_laser(LaserDesc {
        start: Vec2::new(240.0, 100.0),
        end: Vec2::new(240.0, 220.0),
        period: 0.0,
        active: true,
        thickness: 4.0,
    });
    let mut world = GameWorld::from_level(&level, GameConfig::default()).unwrap();

    let hit = run_until(&mut world, &FrameInput::moving(1.0, 0.0), 240, |w| w.hit_by_laser());
    assert!(hit);
}

#[test]
fn test_inactive_laser_is_harmless() {
    let level = level().with_laser(LaserDesc {
        start: Vec2::new(240.0, 100.0),
        end: Vec2::new(240.0, 220.0),
        period: 0.0,
        active: false,
        thickness: 4.0,
    });
    let mut world = GameWorld::from_level(&level, GameConfig::default()).unwrap();

    let hit = run_until(&mut world, &FrameInput::moving(1.0, 0.0), 240, |w| w.hit_by_laser());
    assert!(!hit);
}

#[test]
fn test_level_json_round_trip_builds() {
    let json = r#"{
        "name": "json",
        "width": 320, "height": 320,
        "walls": [[[140, 0], [180, 0], [180, 200], [140, 200]]],
        "player": { "position": [40, 40] },
        "enemies": [{ "name": "guard", "position": [280, 40] }]
    }"#;
    let level = LevelDesc::from_json_str(json).unwrap();
    let world = GameWorld::from_level(&level, GameConfig::default()).unwrap();
    assert_eq!(world.enemies().len(), 1);
    assert!(world
        .nav_graph()
        .nodes()
        .iter()
        .all(|n| !level.walls[0].contains(n.position)));

    let mut edges = 0;
    for (a, b) in world.nav_graph().edges() {
        assert!(
            world.physics().raycast(a, b, vision_filter).is_none(),
            "edge {:?} -> {:?} crosses a wall",
            a,
            b
        );
        edges += 1;
    }
    assert!(edges > 0);
    assert_eq!(edges, world.nav_graph().edge_count());
}

#[test]
fn test_bundled_assets_build() {
    let assets = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets");
    let config = GameConfig::from_toml_str(&std::fs::read_to_string(assets.join("config.toml")).unwrap()).unwrap();
    assert_eq!(config.seed, 7);

    for name in ["courtyard.json", "corridor.json"] {
        let level = LevelDesc::load(assets.join("levels").join(name)).unwrap();
        let mut world = GameWorld::from_level(&level, config.clone()).unwrap();
        for _ in 0..30 {
            world.tick(&FrameInput::default(), config.physics.timestep);
        }
        assert_eq!(world.frame(), 30, "{}", name);
    }
}
