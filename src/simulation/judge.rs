// src/simulation/judge.rs

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::RunParameters;
use crate::math::{conflicts, in_range};
use crate::models::motion::propagate;
use crate::models::satellite::{LATITUDE_MAX, LATITUDE_MIN, LONGITUDE_MAX, LONGITUDE_MIN};
use crate::models::{LastShot, MotionModel, Position, Satellite};
use crate::simulation::{JudgeError, Shot, SimulationData};

/// 視野判定を通過した撮影（旋回の再検証用）
struct Sighting {
    line: usize,
    shot: Shot,
    pointing: Position,
}

/// 撮影リストの判定器
///
/// 構文 → 意味 → 物理的な実現可能性 の順に検査し、最初の失敗で打ち切る。
/// 各段階は撮影リストを先頭から読み直す。
pub struct Judge<'a, M: MotionModel> {
    data: &'a SimulationData,
    motion: &'a M,
    text: &'a str,
    strict_slew: bool,
}

impl<'a, M: MotionModel> Judge<'a, M> {
    pub fn new(data: &'a SimulationData, motion: &'a M, text: &'a str) -> Self {
        Self {
            data,
            motion,
            text,
            strict_slew: true,
        }
    }

    /// 旋回速度の再検証を行うかを設定する
    pub fn strict_slew(mut self, strict: bool) -> Self {
        self.strict_slew = strict;
        self
    }

    /// 全ての検査を実行する
    pub fn check(&self) -> Result<(), JudgeError> {
        self.check_syntax()?;
        debug!("構文検査を通過しました");
        self.check_semantics()?;
        debug!("意味検査を通過しました");
        self.check_feasibility()?;
        debug!("実現可能性の検査を通過しました");
        Ok(())
    }

    /// 行番号（1始まり）付きの行。末尾の空行は無視する
    fn lines(&self) -> impl Iterator<Item = (usize, &'a str)> {
        self.text
            .trim_end()
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
    }

    /// 構文検査
    ///
    /// # 戻り値
    /// - 宣言された撮影数
    pub fn check_syntax(&self) -> Result<usize, JudgeError> {
        let mut lines = self.lines();

        let (line, header) = lines.next().unwrap_or((1, ""));
        let header = header.trim();
        if !is_integer(header, false) {
            return Err(JudgeError::MalformedHeader {
                line,
                text: header.to_string(),
            });
        }
        let declared: usize = header.parse().map_err(|_| JudgeError::Unparsable {
            line,
            text: header.to_string(),
        })?;

        let mut found = 0;
        for (line, text) in lines {
            if !is_shot_line(text) {
                return Err(JudgeError::MalformedShot {
                    line,
                    text: text.to_string(),
                });
            }
            found += 1;
        }

        if found != declared {
            return Err(JudgeError::ShotCountMismatch { declared, found });
        }
        Ok(declared)
    }

    /// 意味検査（撮影数と各フィールドの範囲）
    pub fn check_semantics(&self) -> Result<(), JudgeError> {
        self.parse_shots().map(|_| ())
    }

    /// 撮影リストを先頭から読み、範囲を確認しながら撮影記録に変換する
    fn parse_shots(&self) -> Result<Vec<(usize, Shot)>, JudgeError> {
        let mut lines = self.lines();

        let (line, header) = lines.next().unwrap_or((1, ""));
        let header = header.trim();
        let declared: usize = header.parse().map_err(|_| JudgeError::Unparsable {
            line,
            text: header.to_string(),
        })?;

        let max = self.data.total_images();
        if declared == 0 || declared > max {
            return Err(JudgeError::ShotCountOutOfRange { declared, max });
        }

        lines
            .take(declared)
            .map(|(line, text)| self.parse_shot(line, text).map(|shot| (line, shot)))
            .collect()
    }

    fn parse_shot(&self, line: usize, text: &str) -> Result<Shot, JudgeError> {
        let mut tokens = text.split_whitespace();
        let mut field = |name: &'static str, min: i64, max: i64| -> Result<i64, JudgeError> {
            let token = tokens.next().unwrap_or("");
            let value: i64 = token.parse().map_err(|_| JudgeError::Unparsable {
                line,
                text: token.to_string(),
            })?;
            if value < min || value > max {
                return Err(JudgeError::FieldOutOfRange {
                    line,
                    field: name,
                    value,
                    min,
                    max,
                });
            }
            Ok(value)
        };

        let satellite_count = self.data.satellites().len() as i64;
        let la = field("la", LATITUDE_MIN.into(), LATITUDE_MAX.into())?;
        let lo = field("lo", LONGITUDE_MIN.into(), LONGITUDE_MAX.into())?;
        let turn = field("turn", 0, self.data.duration().into())?;
        let satellite = field("satellite", 0, satellite_count - 1)?;

        Ok(Shot {
            la: narrow(line, la)?,
            lo: narrow(line, lo)?,
            turn: narrow(line, turn)?,
            satellite_id: narrow(line, satellite)?,
        })
    }

    /// 実現可能性の検査
    ///
    /// 各撮影が衛星の視野内にあるかを確認し、`strict_slew` が有効な場合は衛星ごとに
    /// ターン順で並べ直して旋回速度の制約も再検証する。
    pub fn check_feasibility(&self) -> Result<(), JudgeError> {
        let shots = self.parse_shots()?;

        // 直前に解決した衛星とその伝播済みの状態
        let mut cached: Option<(u32, Satellite)> = None;
        let mut sightings = Vec::with_capacity(shots.len());

        for (line, shot) in shots {
            let initial = self.initial_satellite(line, shot.satellite_id)?;
            let pointing = self.pointing_cached(&mut cached, initial, shot.turn);

            if !in_range(pointing, initial.fov_radius, shot.position()) {
                return Err(JudgeError::OutOfView {
                    line,
                    la: shot.la,
                    lo: shot.lo,
                    turn: shot.turn,
                    satellite: shot.satellite_id,
                });
            }
            sightings.push(Sighting { line, shot, pointing });
        }

        if self.strict_slew {
            self.replay_slew(&sightings)?;
        }
        Ok(())
    }

    fn initial_satellite(&self, line: usize, id: usize) -> Result<&'a Satellite, JudgeError> {
        self.data
            .initial_satellite(id)
            .ok_or(JudgeError::FieldOutOfRange {
                line,
                field: "satellite",
                value: id as i64,
                min: 0,
                max: self.data.satellites().len() as i64 - 1,
            })
    }

    /// 同じ衛星が時間順に続く場合は前回の状態から進め、それ以外は初期状態から伝播する
    fn pointing_cached(&self, cached: &mut Option<(u32, Satellite)>, initial: &Satellite, turn: u32) -> Position {
        match cached {
            Some((cached_turn, state)) if state.id == initial.id && *cached_turn <= turn => {
                for _ in *cached_turn..turn {
                    self.motion.advance(state);
                }
                *cached_turn = turn;
                state.position
            }
            _ => {
                let state = propagate(self.motion, initial, turn);
                let position = state.position;
                *cached = Some((turn, state));
                position
            }
        }
    }

    /// 衛星ごとにターン順で撮影を再生し、旋回速度の制約を確認する
    fn replay_slew(&self, sightings: &[Sighting]) -> Result<(), JudgeError> {
        let mut order: Vec<&Sighting> = sightings.iter().collect();
        order.sort_by_key(|sighting| (sighting.shot.satellite_id, sighting.shot.turn));

        let mut last: Option<(usize, LastShot)> = None;
        for sighting in order {
            let shot = sighting.shot;
            let mut probe = self.initial_satellite(sighting.line, shot.satellite_id)?.clone();
            probe.position = sighting.pointing;
            probe.last_shot = last.filter(|(id, _)| *id == probe.id).map(|(_, previous)| previous);

            if conflicts(&probe, shot.position(), shot.turn) {
                return Err(JudgeError::SlewTooFast {
                    line: sighting.line,
                    la: shot.la,
                    lo: shot.lo,
                    turn: shot.turn,
                    satellite: shot.satellite_id,
                });
            }

            probe.record_shot(shot.position(), shot.turn);
            last = probe.last_shot.map(|previous| (probe.id, previous));
        }
        Ok(())
    }

    /// 得点の計算
    ///
    /// 全ての画像の (la, lo) が撮影リストに含まれるコレクションの得点を合計する。
    /// ターンや衛星は考慮せず、物理的な制約も確認しない。
    pub fn score(&self) -> u64 {
        let taken: HashSet<Position> = self
            .lines()
            .skip(1)
            .filter_map(|(_, text)| {
                let mut tokens = text.split_whitespace();
                let la = tokens.next()?.parse().ok()?;
                let lo = tokens.next()?.parse().ok()?;
                Some(Position::new(la, lo))
            })
            .collect();

        self.data
            .collections()
            .iter()
            .filter(|collection| collection.images.iter().all(|image| taken.contains(&image.position)))
            .map(|collection| u64::from(collection.points))
            .sum()
    }
}

fn narrow<T: TryFrom<i64>>(line: usize, value: i64) -> Result<T, JudgeError> {
    T::try_from(value).map_err(|_| JudgeError::Unparsable {
        line,
        text: value.to_string(),
    })
}

/// 整数トークンか（`signed` の場合は先頭の `-` を許す）
fn is_integer(token: &str, signed: bool) -> bool {
    let digits = if signed {
        token.strip_prefix('-').unwrap_or(token)
    } else {
        token
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `la lo turn satellite` の4整数（la, lo のみ符号付き）か
fn is_shot_line(text: &str) -> bool {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.len() == 4
        && is_integer(tokens[0], true)
        && is_integer(tokens[1], true)
        && is_integer(tokens[2], false)
        && is_integer(tokens[3], false)
}

/// 撮影リストを判定し、有効な場合は得点を返す
///
/// # 引数
/// - `data`: シミュレーションデータ
/// - `motion`: 運動モデル
/// - `text`: 撮影リストのテキスト
/// - `params`: 実行パラメータ（`strict_slew` を参照する）
///
/// # 戻り値
/// - (有効か, 得点)。無効な場合の得点は0
pub fn validate_and_score<M: MotionModel>(
    data: &SimulationData,
    motion: &M,
    text: &str,
    params: &RunParameters,
) -> (bool, u64) {
    let judge = Judge::new(data, motion, text).strict_slew(params.strict_slew);
    match judge.check() {
        Ok(()) => {
            let score = judge.score();
            info!(score, "撮影リストは有効です");
            (true, score)
        }
        Err(err) => {
            warn!(kind = ?err.kind(), line = ?err.line(), "撮影リストは無効です: {}", err);
            (false, 0)
        }
    }
}
