//! Helpers shared by several puzzle solvers

pub mod dp_cache;
pub mod grid;
pub mod math;
