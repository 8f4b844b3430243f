//! Enemy controller
//!
//! Each tick the controller runs detection, lets the state machine pick
//! between wandering and chasing, and turns the chosen target into a movement
//! input. Movement is never assigned directly: the returned
//! [`SteeringOutput`] goes through the same force routine as player input.

use crate::navigation::NavGraph;
use crate::pathfinding::find_route;
use crate::perception::DetectionRange;
use crate::sight::LineOfSight;
use crate::state_machine::{AiState, StateMachine};
use crate::steering::SteeringOutput;
use chroma_math::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned region enemies wander in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    /// Bounds from the origin to `(width, height)`
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Uniform point at least `margin` inside the bounds. An axis too narrow
    /// for the margin collapses to its center.
    pub fn random_point<R: Rng>(&self, rng: &mut R, margin: f32) -> Vec2 {
        let center = self.center();
        let mut axis = |lo: f32, hi: f32, mid: f32| {
            let (lo, hi) = (lo + margin, hi - margin);
            if lo.is_finite() && hi.is_finite() && lo < hi {
                rng.gen_range(lo..hi)
            } else {
                mid
            }
        };
        let x = axis(self.min.x, self.max.x, center.x);
        let y = axis(self.min.y, self.max.y, center.y);
        Vec2::new(x, y)
    }
}

/// Tuning for one enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub detection_range: f32,
    /// Upper limit for the widening detection radius
    pub max_detection_range: f32,
    /// Units per second the radius grows while the player is unseen
    pub widen_rate: f32,
    /// Input magnitude while chasing
    pub chase_speed: f32,
    /// Input magnitude while wandering
    pub wander_speed: f32,
    /// Seconds before a wander target is replaced
    pub wander_interval: f32,
    /// Distance at which a wander target counts as reached
    pub arrive_distance: f32,
    /// Keeps wander targets away from the world edge
    pub wander_margin: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            detection_range: 250.0,
            max_detection_range: 250.0,
            widen_rate: 0.0,
            chase_speed: 1.0,
            wander_speed: 0.5,
            wander_interval: 2.0,
            arrive_distance: 10.0,
            wander_margin: 50.0,
        }
    }
}

impl EnemyConfig {
    pub fn with_detection_range(mut self, range: f32) -> Self {
        self.detection_range = range;
        self.max_detection_range = self.max_detection_range.max(range);
        self
    }

    pub fn with_widening(mut self, max_range: f32, rate: f32) -> Self {
        self.max_detection_range = max_range;
        self.widen_rate = rate;
        self
    }

    pub fn with_speeds(mut self, chase: f32, wander: f32) -> Self {
        self.chase_speed = chase;
        self.wander_speed = wander;
        self
    }

    pub fn with_wander_margin(mut self, margin: f32) -> Self {
        self.wander_margin = margin;
        self
    }

    fn detection(&self) -> DetectionRange {
        DetectionRange::widening(self.detection_range, self.max_detection_range, self.widen_rate)
    }
}

/// Cached wander destination. `generation` changes only when the target is
/// replaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WanderTarget {
    pub position: Vec2,
    pub generation: u64,
    /// Seconds since the target was chosen
    pub age: f32,
}

/// Everything an enemy needs from the world for one tick
#[derive(Clone, Copy)]
pub struct AiContext<'a> {
    pub graph: &'a NavGraph,
    pub sight: &'a dyn LineOfSight,
    pub player_position: Vec2,
    pub player_hidden: bool,
    pub dt: f32,
    pub bounds: WorldBounds,
}

/// Wander/chase controller for one enemy
pub struct EnemyController {
    config: EnemyConfig,
    fsm: StateMachine<AiState, bool>,
    detection: DetectionRange,
    rng: ChaCha8Rng,
    wander_target: Option<WanderTarget>,
    next_generation: u64,
    last_path: Vec<Vec2>,
    current_goal: Option<Vec2>,
}

impl EnemyController {
    pub fn new(config: EnemyConfig, seed: u64) -> Self {
        let mut fsm = StateMachine::new(AiState::Wander);
        fsm.add_global_transition(AiState::Chase, |detected: &bool| *detected);
        fsm.add_global_transition(AiState::Wander, |detected: &bool| !*detected);

        Self {
            detection: config.detection(),
            config,
            fsm,
            rng: ChaCha8Rng::seed_from_u64(seed),
            wander_target: None,
            next_generation: 1,
            last_path: Vec::new(),
            current_goal: None,
        }
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }

    pub fn state(&self) -> AiState {
        *self.fsm.current()
    }

    pub fn detection(&self) -> &DetectionRange {
        &self.detection
    }

    pub fn wander_target(&self) -> Option<&WanderTarget> {
        self.wander_target.as_ref()
    }

    /// Path computed on the most recent tick that used one
    pub fn last_path(&self) -> &[Vec2] {
        &self.last_path
    }

    /// Point the enemy is currently heading for
    pub fn current_goal(&self) -> Option<Vec2> {
        self.current_goal
    }

    /// Run one tick for an enemy at `position` and return its movement input
    pub fn update(&mut self, position: Vec2, ctx: &AiContext<'_>) -> SteeringOutput {
        let dt = if ctx.dt.is_finite() { ctx.dt.max(0.0) } else { 0.0 };

        let detected = self
            .detection
            .update(position, ctx.player_position, ctx.player_hidden, dt);
        self.fsm.update(&detected, dt);

        match self.state() {
            AiState::Chase => match self.chase(position, ctx) {
                Some(steering) => steering,
                None => {
                    log::trace!("no path to player from {:?}, wandering", position);
                    self.wander(position, ctx, dt)
                }
            },
            AiState::Wander | AiState::Patrol | AiState::Alert => self.wander(position, ctx, dt),
        }
    }

    fn chase(&mut self, position: Vec2, ctx: &AiContext<'_>) -> Option<SteeringOutput> {
        let player = ctx.player_position;

        if ctx.sight.is_clear(position, player) {
            self.last_path.clear();
            self.current_goal = Some(player);
            return Some(SteeringOutput::seek(position, player, self.config.chase_speed));
        }

        let route = find_route(ctx.graph, position, player)?;
        let waypoint = route.next_waypoint()?;
        self.last_path = route.waypoints;
        self.current_goal = Some(player);
        Some(SteeringOutput::seek(position, waypoint, self.config.chase_speed))
    }

    fn wander(&mut self, position: Vec2, ctx: &AiContext<'_>, dt: f32) -> SteeringOutput {
        let interval = self.config.wander_interval;
        let arrive = self.config.arrive_distance;

        let stale = match self.wander_target.as_mut() {
            Some(target) => {
                target.age += dt;
                target.age >= interval || position.distance(target.position) <= arrive
            }
            None => true,
        };
        if stale {
            self.pick_wander_target(&ctx.bounds);
        }

        let Some(target) = self.wander_target.map(|t| t.position) else {
            return SteeringOutput::zero();
        };
        self.current_goal = Some(target);

        match find_route(ctx.graph, position, target) {
            Some(route) => {
                let waypoint = route.next_waypoint();
                self.last_path = route.waypoints;
                waypoint
                    .map(|w| SteeringOutput::seek(position, w, self.config.wander_speed))
                    .unwrap_or_default()
            }
            None => {
                // Freeze rather than walk blindly into walls
                self.last_path.clear();
                SteeringOutput::zero()
            }
        }
    }

    fn pick_wander_target(&mut self, bounds: &WorldBounds) {
        let position = bounds.random_point(&mut self.rng, self.config.wander_margin);
        let generation = self.next_generation;
        self.next_generation += 1;
        log::trace!("new wander target {:?} (generation {})", position, generation);
        self.wander_target = Some(WanderTarget {
            position,
            generation,
            age: 0.0,
        });
    }

    /// Back to a fresh wandering state; the random stream is not rewound
    pub fn reset(&mut self) {
        self.fsm.force_transition(AiState::Wander);
        self.detection.reset();
        self.wander_target = None;
        self.last_path.clear();
        self.current_goal = None;
    }
}

impl std::fmt::Debug for EnemyController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnemyController")
            .field("state", &self.state())
            .field("detection", &self.detection)
            .field("wander_target", &self.wander_target)
            .field("current_goal", &self.current_goal)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavConfig;
    use crate::sight::{OpenSight, PolygonSight};
    use approx::assert_relative_eq;
    use chroma_math::Polygon;

    fn context<'a>(
        graph: &'a NavGraph,
        sight: &'a dyn LineOfSight,
        player_position: Vec2,
        bounds: WorldBounds,
    ) -> AiContext<'a> {
        AiContext {
            graph,
            sight,
            player_position,
            player_hidden: false,
            dt: 1.0 / 60.0,
            bounds,
        }
    }

    #[test]
    fn test_chase_straight_at_visible_player() {
        let graph = NavGraph::build(&NavConfig::new(2.0, 20.0, 20.0), &[], &OpenSight);
        let ctx = context(&graph, &OpenSight, Vec2::new(3.0, 0.0), WorldBounds::new(20.0, 20.0));
        let mut enemy = EnemyController::new(EnemyConfig::default().with_detection_range(5.0), 1);

        let steering = enemy.update(Vec2::ZERO, &ctx);

        assert_eq!(enemy.state(), AiState::Chase);
        assert_relative_eq!(steering.linear.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(steering.linear.y, 0.0, epsilon = 1e-6);
        assert_eq!(enemy.current_goal(), Some(Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn test_player_out_of_range_wanders() {
        let graph = NavGraph::build(&NavConfig::new(10.0, 100.0, 100.0), &[], &OpenSight);
        let ctx = context(&graph, &OpenSight, Vec2::new(90.0, 90.0), WorldBounds::new(100.0, 100.0));
        let mut enemy = EnemyController::new(EnemyConfig::default().with_detection_range(5.0), 1);

        enemy.update(Vec2::ZERO, &ctx);
        assert_eq!(enemy.state(), AiState::Wander);
        assert!(enemy.wander_target().is_some());
    }

    #[test]
    fn test_hidden_player_is_not_chased() {
        let graph = NavGraph::build(&NavConfig::new(2.0, 20.0, 20.0), &[], &OpenSight);
        let mut ctx = context(&graph, &OpenSight, Vec2::new(3.0, 0.0), WorldBounds::new(20.0, 20.0));
        let mut enemy = EnemyController::new(EnemyConfig::default().with_detection_range(5.0), 1);

        enemy.update(Vec2::ZERO, &ctx);
        assert_eq!(enemy.state(), AiState::Chase);

        ctx.player_hidden = true;
        enemy.update(Vec2::ZERO, &ctx);
        assert_eq!(enemy.state(), AiState::Wander);
    }

    #[test]
    fn test_chase_follows_path_around_wall() {
        let walls = vec![Polygon::rect(Vec2::new(25.0, -5.0), Vec2::new(10.0, 40.0))];
        let sight = PolygonSight::new(walls.clone());
        let graph = NavGraph::build(&NavConfig::new(10.0, 60.0, 60.0), &walls, &sight);
        let ctx = context(&graph, &sight, Vec2::new(50.0, 0.0), WorldBounds::new(60.0, 60.0));
        let mut enemy = EnemyController::new(EnemyConfig::default().with_detection_range(100.0), 3);

        let position = Vec2::new(10.0, 0.0);
        let steering = enemy.update(position, &ctx);

        assert_eq!(enemy.state(), AiState::Chase);
        assert!(enemy.last_path().len() >= 2);
        let expected = SteeringOutput::seek(position, enemy.last_path()[1], 1.0);
        assert_eq!(steering, expected);
        assert!(!steering.is_zero());
    }

    #[test]
    fn test_chase_without_path_falls_back_to_wander() {
        let walls = vec![Polygon::rect(Vec2::new(1.0, -5.0), Vec2::new(1.0, 10.0))];
        let sight = PolygonSight::new(walls);
        let graph = NavGraph::empty();
        let ctx = context(&graph, &sight, Vec2::new(3.0, 0.0), WorldBounds::new(20.0, 20.0));
        let mut enemy = EnemyController::new(EnemyConfig::default().with_detection_range(5.0), 1);

        let steering = enemy.update(Vec2::ZERO, &ctx);

        // Still chasing, but this tick wandered; the empty graph freezes it
        assert_eq!(enemy.state(), AiState::Chase);
        assert!(steering.is_zero());
        assert!(enemy.wander_target().is_some());
    }

    #[test]
    fn test_wander_without_path_freezes() {
        let graph = NavGraph::empty();
        let ctx = context(&graph, &OpenSight, Vec2::new(500.0, 500.0), WorldBounds::new(100.0, 100.0));
        let mut enemy = EnemyController::new(EnemyConfig::default().with_detection_range(5.0), 9);

        assert!(enemy.update(Vec2::new(10.0, 10.0), &ctx).is_zero());
        assert!(enemy.last_path().is_empty());
    }

    #[test]
    fn test_wander_target_kept_until_stale() {
        let graph = NavGraph::build(&NavConfig::new(100.0, 1000.0, 1000.0), &[], &OpenSight);
        let bounds = WorldBounds::new(1000.0, 1000.0);
        let ctx = context(&graph, &OpenSight, Vec2::new(5000.0, 5000.0), bounds);
        let mut enemy = EnemyController::new(
            EnemyConfig::default().with_detection_range(5.0).with_wander_margin(100.0),
            42,
        );

        // Outside the margin box, so the target can never be reached
        let position = Vec2::new(-500.0, -500.0);
        enemy.update(position, &ctx);
        let first = *enemy.wander_target().unwrap();
        assert!(bounds.contains(first.position));

        for _ in 0..30 {
            let steering = enemy.update(position, &ctx);
            assert!(!steering.is_zero());
            assert_relative_eq!(steering.magnitude(), 0.5, epsilon = 1e-5);
        }
        let kept = *enemy.wander_target().unwrap();
        assert_eq!(kept.generation, first.generation);
        assert_eq!(kept.position, first.position);

        // Past the 2 second timer a new target is chosen
        for _ in 0..120 {
            enemy.update(position, &ctx);
        }
        assert!(enemy.wander_target().unwrap().generation > first.generation);
    }

    #[test]
    fn test_reached_wander_target_is_replaced() {
        let graph = NavGraph::build(&NavConfig::new(10.0, 100.0, 100.0), &[], &OpenSight);
        let ctx = context(&graph, &OpenSight, Vec2::new(5000.0, 5000.0), WorldBounds::new(100.0, 100.0));
        let mut enemy = EnemyController::new(EnemyConfig::default().with_detection_range(5.0), 5);

        enemy.update(Vec2::new(-50.0, -50.0), &ctx);
        let first = *enemy.wander_target().unwrap();

        enemy.update(first.position, &ctx);
        assert_eq!(enemy.wander_target().unwrap().generation, first.generation + 1);
    }

    #[test]
    fn test_narrow_bounds_use_center() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let bounds = WorldBounds::new(40.0, 400.0);
        for _ in 0..10 {
            let p = bounds.random_point(&mut rng, 50.0);
            assert_eq!(p.x, 20.0);
            assert!(p.y >= 50.0 && p.y < 350.0);
        }
    }

    #[test]
    fn test_widening_range_catches_player() {
        let graph = NavGraph::build(&NavConfig::new(10.0, 100.0, 100.0), &[], &OpenSight);
        let mut ctx = context(&graph, &OpenSight, Vec2::new(8.0, 0.0), WorldBounds::new(100.0, 100.0));
        ctx.dt = 0.5;
        let mut enemy = EnemyController::new(
            EnemyConfig::default()
                .with_detection_range(5.0)
                .with_widening(10.0, 2.0),
            1,
        );

        enemy.update(Vec2::ZERO, &ctx);
        assert_eq!(enemy.state(), AiState::Wander);
        for _ in 0..3 {
            enemy.update(Vec2::ZERO, &ctx);
        }
        assert_eq!(enemy.state(), AiState::Chase);
        assert_relative_eq!(enemy.detection().current, 5.0);
    }

    #[test]
    fn test_same_seed_same_targets() {
        let graph = NavGraph::build(&NavConfig::new(10.0, 100.0, 100.0), &[], &OpenSight);
        let ctx = context(&graph, &OpenSight, Vec2::new(5000.0, 5000.0), WorldBounds::new(100.0, 100.0));
        let mut a = EnemyController::new(EnemyConfig::default(), 77);
        let mut b = EnemyController::new(EnemyConfig::default(), 77);

        for _ in 0..200 {
            assert_eq!(a.update(Vec2::new(-10.0, 0.0), &ctx), b.update(Vec2::new(-10.0, 0.0), &ctx));
        }
        assert_eq!(a.wander_target(), b.wander_target());
    }
}
