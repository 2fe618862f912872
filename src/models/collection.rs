// src/models/collection.rs

use std::sync::atomic::{AtomicBool, Ordering};

use crate::models::satellite::Position;

/// 撮影対象の画像
///
/// `taken` は複数のワーカーから参照されるため `AtomicBool` で保持し、
/// [`Image::try_claim`] の compare-and-set で一度だけ確保される。
#[derive(Debug)]
pub struct Image {
    pub position: Position,
    taken: AtomicBool,
}

impl Image {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            taken: AtomicBool::new(false),
        }
    }

    pub fn is_taken(&self) -> bool {
        self.taken.load(Ordering::Acquire)
    }

    /// 画像の撮影権を確保する
    ///
    /// # 戻り値
    /// - 呼び出し側が最初に確保した場合は`true`、既に撮影済みの場合は`false`
    pub fn try_claim(&self) -> bool {
        self.taken
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// 撮影済みフラグを戻す（パス間でのみ呼ばれる）
    pub fn release(&mut self) {
        *self.taken.get_mut() = false;
    }
}

impl Clone for Image {
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            taken: AtomicBool::new(self.is_taken()),
        }
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.is_taken() == other.is_taken()
    }
}

/// 撮影可能な時間帯（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub min_time: u32,
    pub max_time: u32,
}

impl TimeWindow {
    pub fn new(min_time: u32, max_time: u32) -> Self {
        Self { min_time, max_time }
    }

    pub fn contains(&self, turn: u32) -> bool {
        turn >= self.min_time && turn <= self.max_time
    }
}

/// 画像コレクション
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub images: Vec<Image>,
    pub windows: Vec<TimeWindow>,
    pub points: u32,
    is_valid: bool,
}

impl Collection {
    pub fn new(images: Vec<Image>, windows: Vec<TimeWindow>, points: u32) -> Self {
        Self {
            images,
            windows,
            points,
            is_valid: true,
        }
    }

    /// 指定ターンがいずれかの時間帯に含まれるか
    pub fn accepts_turn(&self, turn: u32) -> bool {
        self.windows.iter().any(|window| window.contains(turn))
    }

    /// 全ての画像が撮影済みか
    pub fn is_complete(&self) -> bool {
        self.images.iter().all(Image::is_taken)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn invalidate(&mut self) {
        self.is_valid = false;
    }

    /// 解決状態を初期化する（位置・得点・時間帯は変更しない）
    pub fn reset(&mut self) {
        self.is_valid = true;
        self.release_images();
    }

    pub fn release_images(&mut self) {
        for image in &mut self.images {
            image.release();
        }
    }
}
