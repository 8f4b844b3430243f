//! Chroma headless runner
//!
//! Loads a level and a config, drives the world at a fixed timestep and logs
//! what happened.
//!
//! ```text
//! chroma-sim <level.json> [--config <config.toml>] [--frames <n>] [--inputs <inputs.json>]
//! ```
//!
//! The inputs file is a JSON array of frame inputs played one per frame;
//! once it runs out the player stands still.

use chroma_game::prelude::*;
use std::path::{Path, PathBuf};

const DEFAULT_FRAMES: u64 = 3600;

#[derive(Debug)]
struct Args {
    level: PathBuf,
    config: Option<PathBuf>,
    frames: u64,
    inputs: Option<PathBuf>,
}

fn usage() -> String {
    "usage: chroma-sim <level.json> [--config <config.toml>] [--frames <n>] [--inputs <inputs.json>]".to_string()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut level = None;
    let mut config = None;
    let mut frames = DEFAULT_FRAMES;
    let mut inputs = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(args.next().ok_or_else(usage)?)),
            "--inputs" => inputs = Some(PathBuf::from(args.next().ok_or_else(usage)?)),
            "--frames" => {
                let value = args.next().ok_or_else(usage)?;
                frames = value
                    .parse()
                    .map_err(|_| format!("--frames expects a number, got '{}'", value))?;
            }
            "-h" | "--help" => return Err(usage()),
            other if level.is_none() && !other.starts_with('-') => level = Some(PathBuf::from(other)),
            other => return Err(format!("unexpected argument '{}'\n{}", other, usage())),
        }
    }

    Ok(Args {
        level: level.ok_or_else(usage)?,
        config,
        frames,
        inputs,
    })
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Won,
    Exited,
    OutOfFrames,
}

#[derive(Debug, Default)]
struct RunStats {
    frames: u64,
    caught: u32,
    lasered: u32,
    hidden_frames: u64,
}

fn load_inputs(path: &Path) -> Result<Vec<FrameInput>, GameError> {
    let inputs: Vec<FrameInput> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    log::info!("Loaded {} scripted frames from {}", inputs.len(), path.display());
    Ok(inputs)
}

fn run(args: &Args) -> Result<(Outcome, RunStats), GameError> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::from_env()?,
    };
    let level = LevelDesc::load(&args.level)?;
    let script = match &args.inputs {
        Some(path) => load_inputs(path)?,
        None => Vec::new(),
    };

    let dt = config.physics.timestep;
    let mut world = GameWorld::from_level(&level, config)?;
    let mut stats = RunStats::default();
    let idle = FrameInput::default();

    for frame in 0..args.frames {
        let input = script.get(frame as usize).unwrap_or(&idle);
        world.tick(input, dt);
        stats.frames += 1;
        if world.is_player_hidden() {
            stats.hidden_frames += 1;
        }

        if world.won() {
            return Ok((Outcome::Won, stats));
        }
        if world.should_exit() {
            return Ok((Outcome::Exited, stats));
        }
        if world.player_collided_with_enemy() {
            stats.caught += 1;
            log::warn!("Player caught on frame {}, restarting level", frame);
            world.clear_enemy_collision();
            world.reset();
        } else if world.hit_by_laser() {
            stats.lasered += 1;
            log::warn!("Player hit by a laser on frame {}, restarting level", frame);
            world.clear_laser_hit();
            world.reset();
        }
    }

    Ok((Outcome::OutOfFrames, stats))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };

    match run(&args) {
        Ok((outcome, stats)) => {
            log::info!(
                "Finished: {:?} after {} frames (caught {}, lasered {}, hidden {} frames)",
                outcome,
                stats.frames,
                stats.caught,
                stats.lasered,
                stats.hidden_frames
            );
        }
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["level.json", "--frames", "10", "--config", "c.toml"]).unwrap();
        assert_eq!(parsed.level, PathBuf::from("level.json"));
        assert_eq!(parsed.frames, 10);
        assert_eq!(parsed.config, Some(PathBuf::from("c.toml")));
        assert!(parsed.inputs.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&[]).is_err());
        assert!(args(&["level.json", "--frames", "many"]).is_err());
        assert!(args(&["level.json", "--config"]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_default_frames() {
        assert_eq!(args(&["level.json"]).unwrap().frames, DEFAULT_FRAMES);
    }
}
