// src/simulation/mod.rs

pub mod error;
pub mod judge;
pub mod load_parameters;
pub mod resolver;
pub mod shot_list;

use crate::models::{Collection, Satellite};

pub use error::{JudgeError, ViolationKind};
pub use judge::{validate_and_score, Judge};
pub use resolver::{resolve, Resolver};
pub use shot_list::{Shot, ShotList};

/// シミュレーションの全体データ
///
/// 衛星と画像は解決パス中に書き換えられるため、衛星の初期状態を保持して
/// パスごとに復元できるようにしている。
#[derive(Debug, Clone)]
pub struct SimulationData {
    duration: u32,
    satellites: Vec<Satellite>,
    initial_satellites: Vec<Satellite>,
    collections: Vec<Collection>,
}

impl SimulationData {
    pub fn new(duration: u32, satellites: Vec<Satellite>, collections: Vec<Collection>) -> Self {
        Self {
            duration,
            initial_satellites: satellites.clone(),
            satellites,
            collections,
        }
    }

    /// シミュレーションの最終ターン（両端を含む）
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// IDで初期状態の衛星を探す
    pub fn initial_satellite(&self, id: usize) -> Option<&Satellite> {
        self.initial_satellites.iter().find(|satellite| satellite.id == id)
    }

    /// 全コレクションの画像の総数
    pub fn total_images(&self) -> usize {
        self.collections.iter().map(|collection| collection.images.len()).sum()
    }

    /// 衛星を初期状態に戻す
    pub fn restore_satellites(&mut self) {
        self.satellites.clone_from(&self.initial_satellites);
    }

    /// 有効なコレクションの画像の撮影済みフラグを戻す
    pub fn release_valid_images(&mut self) {
        for collection in self.collections.iter_mut().filter(|c| c.is_valid()) {
            collection.release_images();
        }
    }

    /// 解決状態（撮影済み・有効フラグ）を全て初期化する
    pub fn reset_resolution_state(&mut self) {
        self.restore_satellites();
        for collection in &mut self.collections {
            collection.reset();
        }
    }

    /// 未完成の有効なコレクションを無効化する
    ///
    /// # 戻り値
    /// - いずれかのコレクションが無効化された場合は`true`
    pub fn invalidate_incomplete(&mut self) -> bool {
        let mut changed = false;
        for collection in self.collections.iter_mut().filter(|c| c.is_valid()) {
            if !collection.is_complete() {
                collection.invalidate();
                changed = true;
            }
        }
        changed
    }

    /// 完成している有効なコレクションの得点の合計
    pub fn completed_points(&self) -> u64 {
        self.collections
            .iter()
            .filter(|c| c.is_valid() && c.is_complete())
            .map(|c| u64::from(c.points))
            .sum()
    }

    /// 解決パス用に衛星（書き込み）とコレクション（共有）を分割して借用する
    pub(crate) fn split_for_pass(&mut self) -> (&mut [Satellite], &[Collection]) {
        (&mut self.satellites, &self.collections)
    }
}
