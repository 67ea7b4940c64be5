//! Core engine — resolve matches, schedule rounds, run simulations.

pub mod resolver;
pub mod scheduler;
pub mod simulation;
