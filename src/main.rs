// src/main.rs

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use satsim::{
    load_run_parameters, load_scenario, resolve, validate_and_score, OrbitalMotion, RunParameters, SimulationData,
};

#[derive(Parser)]
#[command(name = "satsim", version, about = "衛星撮影スケジューラと撮影リスト判定器")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args)]
struct CommonArgs {
    /// シミュレーション入力ファイル
    #[arg(long)]
    input: PathBuf,

    /// 実行パラメータ（YAML）
    #[arg(long)]
    params: Option<PathBuf>,

    /// 並列ワーカー数
    #[arg(long)]
    workers: Option<usize>,

    /// 解決パスの上限
    #[arg(long)]
    max_passes: Option<usize>,

    /// 判定時に旋回速度を再検証しない
    #[arg(long)]
    lenient_slew: bool,
}

#[derive(Subcommand)]
enum Command {
    /// 撮影リストを生成する
    Resolve {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long)]
        output: PathBuf,
    },

    /// 撮影リストを判定して得点を表示する
    Judge {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long)]
        shots: PathBuf,
    },

    /// 生成した撮影リストをそのまま判定する
    Run {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long)]
        output: PathBuf,
    },
}

/// パラメータファイルとコマンドライン引数から実行パラメータを組み立てる
fn run_parameters(common: &CommonArgs) -> anyhow::Result<RunParameters> {
    let mut params = match &common.params {
        Some(path) => load_run_parameters(path)
            .with_context(|| format!("パラメータを読み込めません: {}", path.display()))?,
        None => RunParameters::default(),
    };
    if let Some(workers) = common.workers {
        params.workers = workers;
    }
    if let Some(max_passes) = common.max_passes {
        params.max_passes = max_passes;
    }
    if common.lenient_slew {
        params.strict_slew = false;
    }
    params.validate()?;
    Ok(params)
}

fn load(common: &CommonArgs) -> anyhow::Result<(SimulationData, RunParameters)> {
    let params = run_parameters(common)?;
    let data = load_scenario(&common.input)
        .with_context(|| format!("入力ファイルを読み込めません: {}", common.input.display()))?;
    info!(
        input = %common.input.display(),
        satellites = data.satellites().len(),
        collections = data.collections().len(),
        images = data.total_images(),
        "入力を読み込みました"
    );
    Ok((data, params))
}

fn judge(data: &SimulationData, text: &str, params: &RunParameters) -> anyhow::Result<()> {
    let (valid, score) = validate_and_score(data, &OrbitalMotion, text, params);
    if !valid {
        bail!("撮影リストは無効です");
    }
    println!("score: {}", score);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Resolve { common, output } => {
            let (mut data, params) = load(&common)?;
            let shots = resolve(&mut data, &OrbitalMotion, &params);
            shots
                .save(&output)
                .with_context(|| format!("撮影リストを書き込めません: {}", output.display()))?;
            println!("{} shots -> {}", shots.len(), output.display());
        }
        Command::Judge { common, shots } => {
            let (data, params) = load(&common)?;
            let text = fs::read_to_string(&shots)
                .with_context(|| format!("撮影リストを読み込めません: {}", shots.display()))?;
            judge(&data, &text, &params)?;
        }
        Command::Run { common, output } => {
            let (mut data, params) = load(&common)?;
            let shots = resolve(&mut data, &OrbitalMotion, &params);
            shots
                .save(&output)
                .with_context(|| format!("撮影リストを書き込めません: {}", output.display()))?;
            println!("{} shots -> {}", shots.len(), output.display());
            judge(&data, &shots.to_string(), &params)?;
        }
    }

    Ok(())
}
