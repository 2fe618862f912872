// src/lib.rs

//! 衛星群の撮影スケジューラ（Resolver）と撮影リストの判定器（Judge）。
//!
//! 両者は同じ視野・旋回判定（[`math::geometry`]）と運動モデル（[`models::motion`]）を共有する。

pub mod config;
pub mod math;
pub mod models;
pub mod simulation;

pub use config::{LoadError, RunParameters};
pub use models::{MotionModel, OrbitalMotion};
pub use simulation::load_parameters::{load_run_parameters, load_scenario};
pub use simulation::{resolve, validate_and_score, Judge, JudgeError, Resolver, Shot, ShotList, SimulationData};
