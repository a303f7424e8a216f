pub mod artist;
pub mod config;
pub mod env;
pub mod episode_log;
pub mod grid;
pub mod seed;
pub mod viewer;

pub use env::{Env, EnvError, GridWorld, Observation};
pub use grid::Grid;
pub use seed::SeedSource;
pub use viewer::Frame;
