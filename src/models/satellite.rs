// src/models/satellite.rs

use std::ops::Sub;

/// 緯度の許容範囲（秒角）
pub const LATITUDE_MIN: i32 = -306_000;
pub const LATITUDE_MAX: i32 = 306_000;
/// 経度の許容範囲（秒角）
pub const LONGITUDE_MIN: i32 = -648_000;
pub const LONGITUDE_MAX: i32 = 647_999;

/// 秒角単位の位置（または相対オフセット）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub la: i32, // 緯度（秒角）
    pub lo: i32, // 経度（秒角）
}

impl Position {
    pub const fn new(la: i32, lo: i32) -> Self {
        Self { la, lo }
    }

    /// 緯度・経度が撮影対象として許容される範囲内か
    pub fn is_within_bounds(&self) -> bool {
        (LATITUDE_MIN..=LATITUDE_MAX).contains(&self.la)
            && (LONGITUDE_MIN..=LONGITUDE_MAX).contains(&self.lo)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position {
            la: self.la - rhs.la,
            lo: self.lo - rhs.lo,
        }
    }
}

/// 直前の撮影の記録
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastShot {
    pub offset: Position, // 衛星位置から見た画像の相対オフセット
    pub turn: u32,        // 撮影ターン
}

/// 衛星の構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Satellite {
    pub id: usize,
    pub position: Position,
    pub velocity: i32,   // 緯度方向の速度（秒角/ターン）
    pub speed_rot: u32,  // カメラの旋回速度（秒角/ターン）
    pub fov_radius: u32, // 視野半径（秒角）
    pub last_shot: Option<LastShot>,
}

impl Satellite {
    pub fn new(id: usize, position: Position, velocity: i32, speed_rot: u32, fov_radius: u32) -> Self {
        Self {
            id,
            position,
            velocity,
            speed_rot,
            fov_radius,
            last_shot: None,
        }
    }

    /// 画像を撮影したことを記録する
    ///
    /// # 引数
    /// - `target`: 撮影した画像の位置
    /// - `turn`: 撮影ターン
    pub fn record_shot(&mut self, target: Position, turn: u32) {
        self.last_shot = Some(LastShot {
            offset: self.position - target,
            turn,
        });
    }
}
