// src/models/motion.rs

use crate::models::satellite::{Position, Satellite};

/// 極（±90°）の緯度（秒角）
pub const POLE_LATITUDE: i32 = 324_000;
/// 緯度方向の速度の上限（秒角/ターン）。1回の折り返しで極の内側に戻る
pub const VELOCITY_MAX: i32 = POLE_LATITUDE;
/// 180°（秒角）
const HALF_TURN: i32 = 648_000;
/// 360°（秒角）
const FULL_TURN: i32 = 1_296_000;
/// 1ターンあたりの地球自転による経度の変化（秒角）
const LONGITUDE_DRIFT: i32 = 15;

/// 衛星を1ターン進める運動モデル
pub trait MotionModel: Sync {
    fn advance(&self, satellite: &mut Satellite);
}

/// 極軌道の運動モデル
///
/// 毎ターン緯度を速度分だけ進め、経度を15秒角だけ西に流す。
/// 極を越えた場合は緯度を折り返し、経度を180°ずらして速度の符号を反転する。
#[derive(Debug, Clone, Copy, Default)]
pub struct OrbitalMotion;

impl MotionModel for OrbitalMotion {
    fn advance(&self, satellite: &mut Satellite) {
        let la = satellite.position.la + satellite.velocity;
        let lo = satellite.position.lo - LONGITUDE_DRIFT;

        let (la, lo) = if la > POLE_LATITUDE {
            satellite.velocity = -satellite.velocity;
            (HALF_TURN - la, lo - HALF_TURN)
        } else if la < -POLE_LATITUDE {
            satellite.velocity = -satellite.velocity;
            (-HALF_TURN - la, lo - HALF_TURN)
        } else {
            (la, lo)
        };

        satellite.position = Position::new(la, wrap_longitude(lo));
    }
}

/// 経度を [-648000, 647999] に正規化する
pub fn wrap_longitude(lo: i32) -> i32 {
    (lo + HALF_TURN).rem_euclid(FULL_TURN) - HALF_TURN
}

/// 指定ターンにおける衛星の指向位置を求める純粋関数
///
/// # 引数
/// - `model`: 運動モデル
/// - `initial`: ターン0の衛星
/// - `turn`: 経過ターン数
///
/// # 戻り値
/// - `turn` ターン後の衛星の位置
pub fn pointing_at<M: MotionModel + ?Sized>(model: &M, initial: &Satellite, turn: u32) -> Position {
    propagate(model, initial, turn).position
}

/// 衛星を複製して `turns` ターン進めた状態を返す
pub fn propagate<M: MotionModel + ?Sized>(model: &M, satellite: &Satellite, turns: u32) -> Satellite {
    let mut state = satellite.clone();
    for _ in 0..turns {
        model.advance(&mut state);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn satellite_at(la: i32, lo: i32, velocity: i32) -> Satellite {
        Satellite::new(0, Position::new(la, lo), velocity, 50, 100)
    }

    #[test]
    fn test_advance_regular_step() {
        let mut satellite = satellite_at(1000, 2000, 120);
        OrbitalMotion.advance(&mut satellite);
        assert_eq!(satellite.position, Position::new(1120, 1985));
        assert_eq!(satellite.velocity, 120);
    }

    /// 北極を越えると緯度が折り返され、経度が180°ずれて速度が反転する
    #[test]
    fn test_advance_over_north_pole() {
        let mut satellite = satellite_at(323_950, 0, 100);
        OrbitalMotion.advance(&mut satellite);
        // 648000 - 324050 = 323950, -15 - 648000 -> 647985
        assert_eq!(satellite.position, Position::new(323_950, 647_985));
        assert_eq!(satellite.velocity, -100);
    }

    #[test]
    fn test_advance_over_south_pole() {
        let mut satellite = satellite_at(-323_950, 100, -100);
        OrbitalMotion.advance(&mut satellite);
        // -648000 + 324050 = -323950, 85 - 648000 = -647915
        assert_eq!(satellite.position, Position::new(-323_950, -647_915));
        assert_eq!(satellite.velocity, 100);
    }

    /// 極にいる衛星が上限速度で進んでも緯度は極の内側に収まる
    #[test]
    fn test_advance_at_velocity_limit_stays_inside_poles() {
        for (la, velocity) in [(POLE_LATITUDE, VELOCITY_MAX), (-POLE_LATITUDE, -VELOCITY_MAX)] {
            let mut satellite = satellite_at(la, 0, velocity);
            for _ in 0..10 {
                OrbitalMotion.advance(&mut satellite);
                assert!(satellite.position.la.abs() <= POLE_LATITUDE);
            }
        }
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(-648_000), -648_000);
        assert_eq!(wrap_longitude(-648_001), 647_999);
        assert_eq!(wrap_longitude(648_000), -648_000);
        assert_eq!(wrap_longitude(12_345), 12_345);
    }

    /// 同じ入力に対して pointing_at は常に同じ結果を返し、入力を変更しない
    #[test]
    fn test_pointing_at_is_pure() {
        let satellite = satellite_at(320_000, -647_990, 700);
        let before = satellite.clone();

        let first = pointing_at(&OrbitalMotion, &satellite, 250);
        let second = pointing_at(&OrbitalMotion, &satellite, 250);

        assert_eq!(first, second);
        assert_eq!(satellite, before);
        assert_eq!(pointing_at(&OrbitalMotion, &satellite, 0), satellite.position);
    }

    #[test]
    fn test_pointing_at_matches_stepwise_advance() {
        let satellite = satellite_at(0, 0, 3000);
        let mut stepped = satellite.clone();
        for turn in 1..=500 {
            OrbitalMotion.advance(&mut stepped);
            assert_eq!(pointing_at(&OrbitalMotion, &satellite, turn), stepped.position);
        }
    }
}
