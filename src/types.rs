//! Domain types shared across the crate: actions, obstacles, and raw
//! per-tick observations of the game.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Flight altitudes (in game pixels) at which the pterodactyl spawns.
///
/// These are fixed by the game itself, so the discretization treats them as a
/// domain constant rather than a configuration knob.
pub const PTERODACTYL_FLIGHT_LEVELS: [f64; 3] = [50.0, 75.0, 100.0];

/// An action the player character can take on a tick.
///
/// `Run` (do nothing) and `Jump` are the modeled actions: transitions are
/// counted per action and the policy decides between them. `Duck` exists in
/// the game and in this enumeration, but it is excluded from the model's
/// action axis — the game can be beaten without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Run,
    Jump,
    Duck,
}

/// Number of actions the MDP model keeps statistics for (run and jump).
pub const MODELED_ACTIONS: usize = 2;

impl Action {
    /// All actions the game understands, in index order.
    pub const ALL: [Action; 3] = [Action::Run, Action::Jump, Action::Duck];

    /// Position of this action on the model's action axis, or `None` for
    /// actions the model does not track.
    pub fn model_slot(self) -> Option<usize> {
        match self {
            Action::Run => Some(0),
            Action::Jump => Some(1),
            Action::Duck => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Run => "run",
            Action::Jump => "jump",
            Action::Duck => "duck",
        };
        write!(f, "{name}")
    }
}

/// The closed set of obstacle kinds the game generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    CactusSmall,
    CactusLarge,
    Pterodactyl,
}

impl ObstacleKind {
    /// Whether the obstacle flies above the ground.
    ///
    /// Airborne obstacles get their own flight-level slots in the discretized
    /// state space; all ground obstacles share one composite slot.
    pub fn is_airborne(self) -> bool {
        matches!(self, ObstacleKind::Pterodactyl)
    }
}

impl fmt::Display for ObstacleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObstacleKind::CactusSmall => "small cactus",
            ObstacleKind::CactusLarge => "large cactus",
            ObstacleKind::Pterodactyl => "pterodactyl",
        };
        write!(f, "{name}")
    }
}

/// A raw, continuous observation of the game on one tick.
///
/// Produced by the environment collaborator; the core only reads it. The
/// observation is absent (the environment yields `None`) until the first
/// obstacle has spawned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Kind of the next obstacle ahead of the player.
    pub kind: ObstacleKind,
    /// Kind-specific configuration: consecutive-obstacle count for cactuses,
    /// flight altitude for the pterodactyl.
    pub config: f64,
    /// Horizontal distance to the obstacle, in game pixels.
    pub distance: f64,
    /// Time until the player reaches the obstacle, in seconds.
    pub time_to_obstacle: f64,
    /// Vertical position of the player.
    pub height: f64,
    /// Current horizontal speed of the player.
    pub speed: f64,
}

impl Observation {
    /// Build an observation, deriving time-to-obstacle from distance and
    /// speed. A non-positive speed yields an infinite time-to-obstacle,
    /// which the nearest-bucket lookup clamps to the farthest bucket.
    pub fn from_distance(
        kind: ObstacleKind,
        config: f64,
        distance: f64,
        height: f64,
        speed: f64,
    ) -> Self {
        let time_to_obstacle = if speed > 0.0 {
            distance / speed
        } else {
            f64::INFINITY
        };
        Self {
            kind,
            config,
            distance,
            time_to_obstacle,
            height,
            speed,
        }
    }
}
