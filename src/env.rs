use crate::grid::Grid;
use crate::seed::SeedSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Flat reward penalty charged on every step call
pub const STEP_PENALTY: f32 = -0.5;

/// Errors surfaced by the environment
#[derive(Error, Debug)]
pub enum EnvError {
    /// The requested target lies outside the action space
    #[error("invalid action ({x}, {y}): target must lie in [0,{cols}) x [0,{rows})")]
    InvalidAction { x: i32, y: i32, cols: i32, rows: i32 },
    /// Non-positive grid dimensions
    #[error("invalid grid size {cols}x{rows}: both dimensions must be positive")]
    Configuration { cols: i32, rows: i32 },
}

/// Environment contract consumed by a rollout driver
pub trait Env {
    type Obs: Send + Clone + 'static;
    type Act: Send + Clone + 'static;
    type Info: Send + Clone + 'static;

    fn reset(&mut self) -> Result<Self::Obs, EnvError>;
    fn step(&mut self, act: Self::Act) -> Result<(Self::Obs, f32, bool, Self::Info), EnvError>;
    fn close(&mut self) -> Result<(), EnvError>;
}

/// Observed state: nib position followed by the flattened pixel grid.
///
/// A value copy taken at observation time; later grid mutation never shows
/// through a previously returned observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Nib position as (x, y)
    pub pos: [i32; 2],
    /// Row-major binary pixel values, length cols*rows
    pub pixels: Vec<u8>,
}

impl Observation {
    /// Flatten to the position-then-pixels integer sequence
    pub fn to_flat(&self) -> Vec<i32> {
        let mut flat = Vec::with_capacity(2 + self.pixels.len());
        flat.push(self.pos[0]);
        flat.push(self.pos[1]);
        flat.extend(self.pixels.iter().map(|&p| p as i32));
        flat
    }
}

/// The pen-on-pixels world: a nib over a binary ink grid.
///
/// Stepping walks the nib toward a target cell one unit per axis per tick,
/// collecting reward from each ink pixel it crosses and blanking it. The
/// grid, the nib, and the episode accumulators are owned here and mutated
/// only by `step` and `reset`.
pub struct GridWorld {
    pub grid: Grid,
    /// Nib position (x, y); always inside the grid
    pub pos: [i32; 2],
    /// Cumulative Euclidean path length this episode
    pub distance_tot: f32,
    /// Cumulative reward this episode
    pub prev_reward: f32,
    source: SeedSource,
}

impl GridWorld {
    /// Build a world from a seed and grid dimensions.
    ///
    /// Fills the grid with uniform random ink, centers the nib, and zeroes
    /// the accumulators. Rejects non-positive dimensions.
    pub fn new(seed: u64, width: i32, height: i32) -> Result<Self, EnvError> {
        if width <= 0 || height <= 0 {
            return Err(EnvError::Configuration {
                cols: width,
                rows: height,
            });
        }
        let mut source = SeedSource::seed(seed);
        let grid = Grid::from_source(height, width, &mut source);
        Ok(GridWorld {
            pos: [width / 2, height / 2],
            grid,
            distance_tot: 0.0,
            prev_reward: 0.0,
            source,
        })
    }

    /// Grid width (number of columns)
    pub fn width(&self) -> i32 {
        self.grid.cols
    }

    /// Grid height (number of rows)
    pub fn height(&self) -> i32 {
        self.grid.rows
    }

    /// Read-only snapshot of the current state
    pub fn observe(&self) -> Observation {
        Observation {
            pos: self.pos,
            pixels: self.grid.cells.clone(),
        }
    }

    /// Start a new episode: re-ink the grid from the continuing random
    /// stream, recenter the nib, zero both accumulators.
    ///
    /// Every reset consumes a fixed draw pair ahead of the refill, so the
    /// grid contents after the n-th reset depend only on the seed and n.
    pub fn reset(&mut self) -> Observation {
        let _ = self.source.uniform_bits(2);
        self.grid.refill(&mut self.source);
        self.pos = [self.grid.cols / 2, self.grid.rows / 2];
        self.distance_tot = 0.0;
        self.prev_reward = 0.0;
        self.observe()
    }

    /// Walk the nib to `target`, erasing and collecting every ink pixel
    /// newly occupied along the way.
    ///
    /// The walk advances one unit per axis per tick (diagonal steps when
    /// both deltas are non-zero), reaching the target in
    /// max(|dx|, |dy|) ticks. Reward is the ink collected minus the flat
    /// step penalty; `done` is always false, termination being the
    /// driver's policy.
    pub fn step(&mut self, target: (i32, i32)) -> Result<(Observation, f32, bool, Value), EnvError> {
        let (tx, ty) = target;
        if tx < 0 || tx >= self.grid.cols || ty < 0 || ty >= self.grid.rows {
            return Err(EnvError::InvalidAction {
                x: tx,
                y: ty,
                cols: self.grid.cols,
                rows: self.grid.rows,
            });
        }

        let mut delta = [tx - self.pos[0], ty - self.pos[1]];
        let dist = ((delta[0] * delta[0] + delta[1] * delta[1]) as f32).sqrt();
        self.distance_tot += dist;

        let mut reward = 0.0f32;
        while delta != [0, 0] {
            let unit = [delta[0].signum(), delta[1].signum()];
            self.pos[0] += unit[0];
            self.pos[1] += unit[1];
            reward += self.grid.erase(self.pos[0], self.pos[1]) as f32;
            delta[0] -= unit[0];
            delta[1] -= unit[1];
        }
        reward += STEP_PENALTY;
        self.prev_reward += reward;

        Ok((self.observe(), reward, false, Value::Object(Default::default())))
    }
}

impl Env for GridWorld {
    type Obs = Observation;
    type Act = (i32, i32);
    type Info = Value;

    fn reset(&mut self) -> Result<Self::Obs, EnvError> {
        Ok(GridWorld::reset(self))
    }

    fn step(&mut self, act: Self::Act) -> Result<(Self::Obs, f32, bool, Self::Info), EnvError> {
        GridWorld::step(self, act)
    }

    fn close(&mut self) -> Result<(), EnvError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_walk_visits_max_axis_cells() {
        let mut world = GridWorld::new(0, 9, 9).unwrap();
        // All-ink grid makes the collected reward count the ticks
        world.grid.cells.fill(1);
        world.pos = [1, 1];

        let (_, reward, done, _) = world.step((5, 3)).unwrap();
        // 4 ticks: (2,2) (3,3) (4,3) (5,3)
        assert_eq!(reward, 4.0 + STEP_PENALTY);
        assert_eq!(world.pos, [5, 3]);
        assert!(!done);
    }

    #[test]
    fn test_zero_move_step_only_pays_penalty() {
        let mut world = GridWorld::new(3, 5, 5).unwrap();
        let before = world.observe();
        let (obs, reward, _, _) = world.step((world.pos[0], world.pos[1])).unwrap();
        assert_eq!(reward, STEP_PENALTY);
        assert_eq!(world.distance_tot, 0.0);
        assert_eq!(obs.pixels, before.pixels);
    }

    #[test]
    fn test_invalid_target_is_rejected() {
        let mut world = GridWorld::new(1, 4, 4).unwrap();
        assert!(matches!(
            world.step((4, 0)),
            Err(EnvError::InvalidAction { .. })
        ));
        assert!(matches!(
            world.step((0, -1)),
            Err(EnvError::InvalidAction { .. })
        ));
    }

    #[test]
    fn test_degenerate_dimensions_are_rejected() {
        assert!(matches!(
            GridWorld::new(0, 0, 10),
            Err(EnvError::Configuration { .. })
        ));
        assert!(matches!(
            GridWorld::new(0, 10, -3),
            Err(EnvError::Configuration { .. })
        ));
    }

    #[test]
    fn test_env_trait_round() {
        let mut world = GridWorld::new(9, 6, 6).unwrap();
        let obs = Env::reset(&mut world).unwrap();
        assert_eq!(obs.pos, [3, 3]);
        let (obs, _, done, info) = Env::step(&mut world, (0, 0)).unwrap();
        assert_eq!(obs.pos, [0, 0]);
        assert!(!done);
        assert!(info.as_object().unwrap().is_empty());
        assert!(Env::close(&mut world).is_ok());
    }
}
