// src/simulation/resolver.rs

use std::thread;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::RunParameters;
use crate::math::{conflicts, in_range};
use crate::models::{Collection, MotionModel, Satellite};
use crate::simulation::{Shot, ShotList, SimulationData};

/// 貪欲法による撮影スケジューラ
///
/// 衛星をインデックスの剰余で `workers` 個のワーカーに分割し、各ワーカーが担当衛星を
/// ターン順に処理する。画像の確保は compare-and-set で行うため、同じ画像を
/// 複数のワーカーが撮影することはない。
///
/// パス終了時に未完成のコレクションを無効化し、変化がなくなるか `max_passes` に
/// 達するまでパスを繰り返す。
pub struct Resolver<'a, M: MotionModel> {
    data: &'a mut SimulationData,
    motion: &'a M,
    workers: usize,
    max_passes: usize,
}

impl<'a, M: MotionModel> Resolver<'a, M> {
    pub fn new(data: &'a mut SimulationData, motion: &'a M, params: &RunParameters) -> Self {
        Self {
            data,
            motion,
            workers: params.workers.max(1),
            max_passes: params.max_passes.max(1),
        }
    }

    /// 解決を実行する
    ///
    /// # 戻り値
    /// - 最も得点の高いパスの撮影リスト（同点の場合は後のパス）
    pub fn run(mut self) -> ShotList {
        self.data.reset_resolution_state();

        let mut best: Option<(u64, Vec<Shot>)> = None;
        for pass in 1..=self.max_passes {
            if pass > 1 {
                self.data.release_valid_images();
                self.data.restore_satellites();
            }

            let start = Instant::now();
            let shots = self.run_pass();
            let points = self.data.completed_points();
            info!(
                pass,
                shots = shots.len(),
                points,
                elapsed = ?start.elapsed(),
                "解決パスが完了しました"
            );

            if best.as_ref().map_or(true, |(best_points, _)| points >= *best_points) {
                best = Some((points, shots));
            }

            if !self.data.invalidate_incomplete() {
                debug!(pass, "無効化されるコレクションがなくなりました");
                break;
            }
        }

        self.data.restore_satellites();
        best.map(|(_, shots)| ShotList::new(shots)).unwrap_or_default()
    }

    /// 1パス分の撮影を全ワーカーで実行し、ワーカー順に結果を連結する
    fn run_pass(&mut self) -> Vec<Shot> {
        let workers = self.workers;
        let motion = self.motion;
        let duration = self.data.duration();
        let (satellites, collections) = self.data.split_for_pass();

        let mut partitions: Vec<Vec<&mut Satellite>> = (0..workers).map(|_| Vec::new()).collect();
        for (index, satellite) in satellites.iter_mut().enumerate() {
            partitions[index % workers].push(satellite);
        }

        let outputs: Vec<Vec<Shot>> = thread::scope(|scope| {
            let handles: Vec<_> = partitions
                .into_iter()
                .enumerate()
                .map(|(worker, owned)| {
                    scope.spawn(move || run_worker(worker, owned, collections, duration, motion))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });

        outputs.concat()
    }
}

/// ワーカー1つ分の処理
fn run_worker<M: MotionModel>(
    worker: usize,
    satellites: Vec<&mut Satellite>,
    collections: &[Collection],
    duration: u32,
    motion: &M,
) -> Vec<Shot> {
    let mut shots = Vec::new();
    for satellite in satellites {
        let start = Instant::now();
        let before = shots.len();

        for turn in 0..duration {
            capture_turn(satellite, collections, turn, &mut shots);
            motion.advance(satellite);
        }

        debug!(
            worker,
            satellite = satellite.id,
            shots = shots.len() - before,
            elapsed = ?start.elapsed(),
            "衛星の処理が完了しました"
        );
    }
    shots
}

/// 現在のターンで衛星が撮影できる画像を先着順に撮影する
///
/// # 引数
/// - `satellite`: 現在位置にある衛星（撮影時に直前の撮影記録を更新する）
/// - `collections`: 全コレクション
/// - `turn`: 現在のターン
/// - `shots`: 撮影記録の追加先
pub fn capture_turn(satellite: &mut Satellite, collections: &[Collection], turn: u32, shots: &mut Vec<Shot>) {
    for collection in collections
        .iter()
        .filter(|collection| collection.is_valid() && collection.accepts_turn(turn))
    {
        for image in &collection.images {
            if image.is_taken() {
                continue;
            }
            if in_range(satellite.position, satellite.fov_radius, image.position)
                && !conflicts(satellite, image.position, turn)
                && image.try_claim()
            {
                shots.push(Shot::new(image.position, turn, satellite.id));
                satellite.record_shot(image.position, turn);
            }
        }
    }
}

/// シミュレーションデータから撮影リストを生成する
pub fn resolve<M: MotionModel>(data: &mut SimulationData, motion: &M, params: &RunParameters) -> ShotList {
    info!(
        satellites = data.satellites().len(),
        collections = data.collections().len(),
        duration = data.duration(),
        workers = params.workers,
        "解決を開始します"
    );
    let shots = Resolver::new(data, motion, params).run();
    info!(shots = shots.len(), "解決が完了しました");
    shots
}
