//! Level description
//!
//! Plain data loaded from JSON. Positions are world units; walls are vertex
//! loops in world coordinates.
//!
//! ```json
//! {
//!   "name": "courtyard",
//!   "width": 640, "height": 480,
//!   "walls": [[[200, 100], [260, 100], [260, 380], [200, 380]]],
//!   "player": { "position": [40, 240] },
//!   "enemies": [{ "name": "guard", "position": [500, 240] }],
//!   "goals": [{ "pigment": "cyan", "position": [400, 60] }],
//!   "door": { "position": [620, 240] }
//! }
//! ```

use crate::error::{GameError, Result};
use crate::goals::Pigment;
use crate::laser::{LaserDesc, MIN_LASER_PERIOD};
use chroma_math::{Polygon, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_tile_size() -> Vec2 {
    Vec2::splat(32.0)
}

/// Axis-aligned tile centered on `position`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileDesc {
    pub position: Vec2,
    #[serde(default = "default_tile_size")]
    pub size: Vec2,
}

impl TileDesc {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            size: default_tile_size(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalDesc {
    pub pigment: Pigment,
    pub position: Vec2,
    #[serde(default = "default_tile_size")]
    pub size: Vec2,
}

/// Player start and movement tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSpawn {
    pub position: Vec2,
    pub radius: f32,
    /// Force at full input. Bodies have unit density, so a radius 10 disc
    /// weighs about 314.
    pub force: f32,
    pub damping: f32,
    pub max_speed: f32,
    /// Seconds between spray casts
    pub shot_cooldown: f32,
}

impl Default for PlayerSpawn {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            radius: 10.0,
            force: 200_000.0,
            damping: 6.0,
            max_speed: 140.0,
            shot_cooldown: 0.5,
        }
    }
}

/// How an enemy behaves when the player touches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Walks around and catches the player on contact
    #[default]
    Guard,
    /// Fixed in place; watches but never catches
    Camera,
}

fn default_enemy_radius() -> f32 {
    10.0
}

fn default_enemy_force() -> f32 {
    120_000.0
}

fn default_enemy_damping() -> f32 {
    6.0
}

fn default_enemy_speed() -> f32 {
    90.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub name: String,
    pub position: Vec2,
    #[serde(default)]
    pub kind: EnemyKind,
    #[serde(default = "default_enemy_radius")]
    pub radius: f32,
    #[serde(default = "default_enemy_force")]
    pub force: f32,
    #[serde(default = "default_enemy_damping")]
    pub damping: f32,
    #[serde(default = "default_enemy_speed")]
    pub max_speed: f32,
}

impl EnemySpawn {
    pub fn guard(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            name: name.into(),
            position,
            kind: EnemyKind::Guard,
            radius: default_enemy_radius(),
            force: default_enemy_force(),
            damping: default_enemy_damping(),
            max_speed: default_enemy_speed(),
        }
    }

    pub fn camera(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            kind: EnemyKind::Camera,
            ..Self::guard(name, position)
        }
    }
}

/// Everything needed to build a [`GameWorld`](crate::world::GameWorld)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDesc {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub walls: Vec<Polygon>,
    pub player: PlayerSpawn,
    pub enemies: Vec<EnemySpawn>,
    pub goals: Vec<GoalDesc>,
    pub door: Option<TileDesc>,
    pub grates: Vec<TileDesc>,
    pub lasers: Vec<LaserDesc>,
}

impl LevelDesc {
    /// Empty level of the given size
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_wall(mut self, wall: Polygon) -> Self {
        self.walls.push(wall);
        self
    }

    pub fn with_player(mut self, player: PlayerSpawn) -> Self {
        self.player = player;
        self
    }

    pub fn with_enemy(mut self, enemy: EnemySpawn) -> Self {
        self.enemies.push(enemy);
        self
    }

    pub fn with_goal(mut self, pigment: Pigment, position: Vec2) -> Self {
        self.goals.push(GoalDesc {
            pigment,
            position,
            size: default_tile_size(),
        });
        self
    }

    pub fn with_door(mut self, position: Vec2) -> Self {
        self.door = Some(TileDesc::new(position));
        self
    }

    pub fn with_grate(mut self, position: Vec2) -> Self {
        self.grates.push(TileDesc::new(position));
        self
    }

    pub fn with_laser(mut self, laser: LaserDesc) -> Self {
        self.lasers.push(laser);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let level = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        log::info!(
            "Loaded level '{}' from {} ({} walls, {} enemies, {} goals)",
            level.name,
            path.display(),
            level.walls.len(),
            level.enemies.len(),
            level.goals.len()
        );
        Ok(level)
    }

    /// Reject levels the world cannot be built from
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GameError::InvalidLevel(msg));

        if !(self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0) {
            return invalid(format!("world size {}x{} must be positive", self.width, self.height));
        }
        for (i, wall) in self.walls.iter().enumerate() {
            if wall.len() < 3 {
                return invalid(format!("wall {} has {} vertices", i, wall.len()));
            }
            if wall.vertices.iter().any(|v| !v.is_finite()) {
                return invalid(format!("wall {} has a non-finite vertex", i));
            }
        }
        if !self.player.position.is_finite() {
            return invalid("player position is not finite".into());
        }
        if let Some(enemy) = self.enemies.iter().find(|e| !e.position.is_finite()) {
            return invalid(format!("enemy '{}' position is not finite", enemy.name));
        }
        for (i, laser) in self.lasers.iter().enumerate() {
            if !(laser.start.is_finite() && laser.end.is_finite() && laser.thickness.is_finite()) {
                return invalid(format!("laser {} has a non-finite endpoint or thickness", i));
            }
            if !laser.period.is_finite() || (laser.period > 0.0 && laser.period < MIN_LASER_PERIOD) {
                return invalid(format!(
                    "laser {} period {} must be zero or at least {}",
                    i, laser.period, MIN_LASER_PERIOD
                ));
            }
        }
        Ok(())
    }

    /// World-space rectangle for a tile
    pub fn tile_polygon(tile: &TileDesc) -> Polygon {
        Polygon::rect(tile.position - tile.size * 0.5, tile.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURTYARD: &str = r#"{
        "name": "courtyard",
        "width": 640, "height": 480,
        "walls": [[[200, 100], [260, 100], [260, 380], [200, 380]]],
        "player": { "position": [40, 240], "max_speed": 100 },
        "enemies": [
            { "name": "guard", "position": [500, 240] },
            { "name": "eye", "position": [320, 20], "kind": "camera" }
        ],
        "goals": [{ "pigment": "cyan", "position": [400, 60] }],
        "door": { "position": [620, 240], "size": [16, 64] },
        "lasers": [{ "start": [300, 400], "end": [300, 470], "period": 1.5 }]
    }"#;

    #[test]
    fn test_parse_level() {
        let level = LevelDesc::from_json_str(COURTYARD).unwrap();
        assert_eq!(level.name, "courtyard");
        assert_eq!(level.walls.len(), 1);
        assert_eq!(level.walls[0].vertices[2], Vec2::new(260.0, 380.0));
        assert_eq!(level.player.max_speed, 100.0);
        assert_eq!(level.player.shot_cooldown, PlayerSpawn::default().shot_cooldown);
        assert_eq!(level.enemies[0].kind, EnemyKind::Guard);
        assert_eq!(level.enemies[1].kind, EnemyKind::Camera);
        assert_eq!(level.goals[0].size, Vec2::splat(32.0));
        assert_eq!(level.door.unwrap().size, Vec2::new(16.0, 64.0));
        assert!(level.lasers[0].active);
    }

    #[test]
    fn test_invalid_levels() {
        assert!(matches!(
            LevelDesc::from_json_str(r#"{"width": 0, "height": 10}"#),
            Err(GameError::InvalidLevel(_))
        ));
        assert!(matches!(
            LevelDesc::from_json_str(r#"{"width": 10, "height": 10, "walls": [[[0, 0], [1, 1]]]}"#),
            Err(GameError::InvalidLevel(_))
        ));
        assert!(matches!(
            LevelDesc::from_json_str(
                r#"{"width": 10, "height": 10, "lasers": [{"start": [0, 0], "end": [5, 0], "period": 1e-12}]}"#
            ),
            Err(GameError::InvalidLevel(_))
        ));
        assert!(matches!(LevelDesc::from_json_str("{"), Err(GameError::LevelParse(_))));
    }

    #[test]
    fn test_tile_polygon_is_centered() {
        let tile = TileDesc {
            position: Vec2::new(10.0, 10.0),
            size: Vec2::new(4.0, 2.0),
        };
        let poly = LevelDesc::tile_polygon(&tile);
        assert_eq!(poly.bounds(), Some((Vec2::new(8.0, 9.0), Vec2::new(12.0, 11.0))));
    }
}
