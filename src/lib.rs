//! **maze_chase** generates perfect mazes on a square grid and runs a pursuit game on them:
//! a player heads for the end cell while enemies wander the passages.

pub mod cells;
pub mod config;
pub mod coordinates;
pub mod entities;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grids;
pub mod pathing;
pub mod rules;
pub mod simulation;
pub mod units;
mod utils;
