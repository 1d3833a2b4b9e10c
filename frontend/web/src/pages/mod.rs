// src/pages/mod.rs
pub mod predict;

pub use predict::Predict;
