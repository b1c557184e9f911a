//! Common test utilities for the trex test suite.
//!
//! Provides a deterministic, scripted in-memory environment so the episode
//! loop can be exercised without a live game.

#![allow(dead_code)]

use trex::{
    Action, Observation, ObstacleKind, Result,
    ports::Environment,
};

/// One tick of a scripted run.
#[derive(Debug, Clone)]
pub struct Frame {
    pub observation: Option<Observation>,
    pub crashed: bool,
}

/// Environment that replays pre-recorded episodes.
///
/// `restart` cycles through the scripted episodes; `execute` ignores the
/// action and simply advances to the next frame. The score of a run is the
/// number of ticks survived.
pub struct ScriptedEnvironment {
    episodes: Vec<Vec<Frame>>,
    current: usize,
    tick: usize,
    started: bool,
}

impl ScriptedEnvironment {
    pub fn new(episodes: Vec<Vec<Frame>>) -> Self {
        assert!(!episodes.is_empty(), "need at least one scripted episode");
        Self {
            episodes,
            current: 0,
            tick: 0,
            started: false,
        }
    }

    fn frames(&self) -> &[Frame] {
        &self.episodes[self.current]
    }

    fn frame(&self) -> &Frame {
        let frames = self.frames();
        &frames[self.tick.min(frames.len() - 1)]
    }
}

impl Environment for ScriptedEnvironment {
    fn restart(&mut self) -> Result<()> {
        if self.started {
            self.current = (self.current + 1) % self.episodes.len();
        }
        self.started = true;
        self.tick = 0;
        Ok(())
    }

    fn observe(&mut self) -> Result<Option<Observation>> {
        Ok(self.frame().observation)
    }

    fn is_crashed(&mut self) -> Result<bool> {
        Ok(self.frame().crashed)
    }

    fn is_playing(&mut self) -> Result<bool> {
        Ok(!self.frame().crashed && self.tick + 1 < self.frames().len())
    }

    fn execute(&mut self, _action: Action) -> Result<()> {
        if self.tick + 1 < self.frames().len() {
            self.tick += 1;
        }
        Ok(())
    }

    fn score(&mut self) -> Result<u64> {
        Ok(self.tick as u64)
    }
}

/// A small cactus at the given distance, at default running speed.
pub fn cactus(distance: f64) -> Observation {
    Observation::from_distance(ObstacleKind::CactusSmall, 1.0, distance, 0.0, 6.0)
}

/// A pterodactyl at the given distance and flight level.
pub fn pterodactyl(distance: f64, level: f64) -> Observation {
    Observation::from_distance(ObstacleKind::Pterodactyl, level, distance, 0.0, 6.0)
}

/// An episode where a cactus closes in over `ticks` frames and the run ends
/// in a crash.
pub fn approach_and_crash(ticks: usize) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(ticks + 1);
    for i in 0..ticks {
        let distance = 120.0 - 100.0 * i as f64 / ticks as f64;
        frames.push(Frame {
            observation: Some(cactus(distance)),
            crashed: false,
        });
    }
    frames.push(Frame {
        observation: Some(cactus(0.0)),
        crashed: true,
    });
    frames
}

/// An episode where the obstacle is cleared (distance jumps back up) before
/// a later crash.
pub fn pass_then_crash(ticks: usize) -> Vec<Frame> {
    let mut frames = approach_and_crash(ticks);
    let passed = Frame {
        observation: Some(cactus(200.0)),
        crashed: false,
    };
    frames.insert(ticks, passed);
    frames
}
