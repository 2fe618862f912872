// src/simulation/load_parameters.rs

use std::fs::{self, File};
use std::path::Path;

use serde_yaml::from_reader;

use crate::config::{parse_scenario, LoadError, RunParameters};
use crate::simulation::SimulationData;

/// 実行パラメータの読み込み
pub fn load_run_parameters<P: AsRef<Path>>(path: P) -> Result<RunParameters, LoadError> {
    let file = File::open(path)?;
    let params: RunParameters = from_reader(file)?;
    params.validate()?;
    Ok(params)
}

/// シナリオ（入力ファイル）の読み込み
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<SimulationData, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_scenario(&text)
}
