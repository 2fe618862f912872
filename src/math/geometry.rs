// src/math/geometry.rs
//
// 秒角空間（緯度, 経度）上の平面ユークリッド距離による視野・旋回判定。
// 大円距離ではなく平面近似を用いる。距離の比較は二乗した整数で行う。

use crate::models::satellite::{Position, Satellite};

/// 2点間の距離の二乗
pub fn distance_squared(a: Position, b: Position) -> i128 {
    let dla = i128::from(a.la) - i128::from(b.la);
    let dlo = i128::from(a.lo) - i128::from(b.lo);
    dla * dla + dlo * dlo
}

/// 画像が視野内にあるか判定する関数
///
/// # 引数
/// - `pointing`: 衛星の指向位置
/// - `fov_radius`: 視野半径（秒角）
/// - `target`: 画像の位置
///
/// # 戻り値
/// - 距離が視野半径以下の場合は`true`
pub fn in_range(pointing: Position, fov_radius: u32, target: Position) -> bool {
    let radius = i128::from(fov_radius);
    distance_squared(pointing, target) <= radius * radius
}

/// 旋回速度の制約に違反するか判定する関数
///
/// 衛星の現在位置から見た `target` の相対オフセットと、直前の撮影の相対オフセットとの
/// 距離が `speed_rot * 経過ターン数` を超える場合に衝突とみなす（等しい場合は衝突ではない）。
/// 直前の撮影が無い場合は経過時間の制約がないため衝突しない。
///
/// # 引数
/// - `satellite`: 現在位置と直前の撮影記録を持つ衛星
/// - `target`: 撮影候補の画像の位置
/// - `turn`: 撮影候補のターン
///
/// # 戻り値
/// - 衝突する場合は`true`
pub fn conflicts(satellite: &Satellite, target: Position, turn: u32) -> bool {
    let Some(last_shot) = satellite.last_shot else {
        return false;
    };

    let offset = satellite.position - target;
    let elapsed = i128::from(turn.saturating_sub(last_shot.turn));
    let reach = i128::from(satellite.speed_rot) * elapsed;

    distance_squared(offset, last_shot.offset) > reach * reach
}
