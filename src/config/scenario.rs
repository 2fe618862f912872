// src/config/scenario.rs
//
// 入力ファイルの形式（空行は無視する）:
//
//   <ターン数>
//   <衛星数 S>
//   <la> <lo> <速度> <旋回速度> <視野半径>      … S 行
//   <コレクション数 C>
//   <得点> <画像数 L> <時間帯数 R>               … 各コレクション
//   <la> <lo>                                      … L 行
//   <開始ターン> <終了ターン>                      … R 行

use std::iter::Enumerate;
use std::str::Lines;

use crate::config::error::LoadError;
use crate::models::motion::{POLE_LATITUDE, VELOCITY_MAX};
use crate::models::satellite::{LONGITUDE_MAX, LONGITUDE_MIN};
use crate::models::{Collection, Image, Position, Satellite, TimeWindow};
use crate::simulation::SimulationData;

/// 1行分の数値レコード
struct Record<'a, const N: usize> {
    line: usize,
    text: &'a str,
    expected: &'static str,
    values: [i64; N],
}

impl<const N: usize> Record<'_, N> {
    fn get<T: TryFrom<i64>>(&self, index: usize) -> Result<T, LoadError> {
        T::try_from(self.values[index]).map_err(|_| self.malformed())
    }

    fn malformed(&self) -> LoadError {
        LoadError::Malformed {
            line: self.line,
            expected: self.expected,
            text: self.text.trim().to_string(),
        }
    }

    fn out_of_range(&self, field: &'static str) -> LoadError {
        LoadError::OutOfRange {
            line: self.line,
            field,
            text: self.text.trim().to_string(),
        }
    }
}

struct RecordReader<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> RecordReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }

    fn next_record<const N: usize>(&mut self, expected: &'static str) -> Result<Record<'a, N>, LoadError> {
        let (index, text) = self
            .lines
            .by_ref()
            .find(|(_, line)| !line.trim().is_empty())
            .ok_or(LoadError::UnexpectedEnd { expected })?;

        let mut values = [0; N];
        let mut tokens = text.split_whitespace();
        let mut complete = true;
        for slot in values.iter_mut() {
            match tokens.next().and_then(|token| token.parse().ok()) {
                Some(value) => *slot = value,
                None => {
                    complete = false;
                    break;
                }
            }
        }

        let record = Record {
            line: index + 1,
            text,
            expected,
            values,
        };
        if !complete || tokens.next().is_some() {
            return Err(record.malformed());
        }
        Ok(record)
    }
}

/// 入力テキストからシミュレーションデータを構築する
///
/// # 引数
/// - `text`: 入力ファイルの内容
///
/// # 戻り値
/// - シミュレーションデータ（衛星のIDは入力順の番号）
pub fn parse_scenario(text: &str) -> Result<SimulationData, LoadError> {
    let mut reader = RecordReader::new(text);

    let duration: u32 = reader.next_record::<1>("ターン数")?.get(0)?;

    let satellite_count: usize = reader.next_record::<1>("衛星数")?.get(0)?;
    let mut satellites = Vec::new();
    for id in 0..satellite_count {
        let record = reader.next_record::<5>("衛星 (la lo 速度 旋回速度 視野半径)")?;
        let position = Position::new(record.get(0)?, record.get(1)?);
        if !(-POLE_LATITUDE..=POLE_LATITUDE).contains(&position.la)
            || !(LONGITUDE_MIN..=LONGITUDE_MAX).contains(&position.lo)
        {
            return Err(record.out_of_range("衛星の初期位置"));
        }
        let velocity: i32 = record.get(2)?;
        if !(-VELOCITY_MAX..=VELOCITY_MAX).contains(&velocity) {
            return Err(record.out_of_range("衛星の速度"));
        }
        satellites.push(Satellite::new(id, position, velocity, record.get(3)?, record.get(4)?));
    }

    let collection_count: usize = reader.next_record::<1>("コレクション数")?.get(0)?;
    let mut collections = Vec::new();
    for _ in 0..collection_count {
        let header = reader.next_record::<3>("コレクション (得点 画像数 時間帯数)")?;
        let points: u32 = header.get(0)?;
        let image_count: usize = header.get(1)?;
        let window_count: usize = header.get(2)?;

        let mut images = Vec::new();
        for _ in 0..image_count {
            let record = reader.next_record::<2>("画像 (la lo)")?;
            let position = Position::new(record.get(0)?, record.get(1)?);
            if !position.is_within_bounds() {
                return Err(record.out_of_range("画像の位置"));
            }
            images.push(Image::new(position));
        }

        let mut windows = Vec::new();
        for _ in 0..window_count {
            let record = reader.next_record::<2>("時間帯 (開始 終了)")?;
            windows.push(TimeWindow::new(record.get(0)?, record.get(1)?));
        }

        collections.push(Collection::new(images, windows, points));
    }

    Ok(SimulationData::new(duration, satellites, collections))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
3600
2
172120 -50 200 50 5000

-1000 300 -150 40 2000
1
100 2 1
170000 100
-1000 200
0 3599
";

    #[test]
    fn test_parse_sample() {
        let data = parse_scenario(SAMPLE).unwrap();
        assert_eq!(data.duration(), 3600);
        assert_eq!(data.satellites().len(), 2);
        assert_eq!(data.satellites()[1], Satellite::new(1, Position::new(-1000, 300), -150, 40, 2000));

        let collection = &data.collections()[0];
        assert_eq!(collection.points, 100);
        assert_eq!(collection.images[0].position, Position::new(170_000, 100));
        assert_eq!(collection.windows, vec![TimeWindow::new(0, 3599)]);
        assert!(collection.is_valid());
    }

    #[test]
    fn test_truncated_input() {
        let truncated = "3600\n2\n172120 -50 200 50 5000\n";
        assert!(matches!(
            parse_scenario(truncated),
            Err(LoadError::UnexpectedEnd { .. })
        ));
    }

    /// 旋回速度が負の場合は行番号付きで失敗する
    #[test]
    fn test_negative_speed_rejected() {
        let input = "10\n1\n0 0 10 -5 100\n0\n";
        match parse_scenario(input) {
            Err(LoadError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// 撮影可能範囲外の画像は行番号付きで失敗する
    #[test]
    fn test_image_out_of_bounds_rejected() {
        let input = "10\n1\n310000 0 0 10 100\n1\n5 1 1\n310000 0\n0 9\n";
        match parse_scenario(input) {
            Err(LoadError::OutOfRange { line, field, .. }) => {
                assert_eq!(line, 6);
                assert_eq!(field, "画像の位置");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let input = "10\n1\n0 0 0 10 100\n1\n5 1 1\n0 648000\n0 9\n";
        assert!(matches!(parse_scenario(input), Err(LoadError::OutOfRange { line: 6, .. })));
    }

    #[test]
    fn test_satellite_position_out_of_bounds_rejected() {
        let beyond_pole = "10\n1\n324001 0 0 10 100\n0\n";
        assert!(matches!(parse_scenario(beyond_pole), Err(LoadError::OutOfRange { line: 3, .. })));

        let beyond_longitude = "10\n1\n0 -648001 0 10 100\n0\n";
        assert!(matches!(parse_scenario(beyond_longitude), Err(LoadError::OutOfRange { line: 3, .. })));

        // 極上の衛星は許容される
        assert!(parse_scenario("10\n1\n-324000 647999 0 10 100\n0\n").is_ok());
    }

    /// 速度の絶対値が上限を超える衛星は運動モデルに渡さない
    #[test]
    fn test_satellite_velocity_out_of_bounds_rejected() {
        let input = "3\n1\n0 0 2147483647 10 100\n1\n5 1 1\n0 0\n0 2\n";
        match parse_scenario(input) {
            Err(LoadError::OutOfRange { line, field, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(field, "衛星の速度");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(parse_scenario("3\n1\n0 0 -324001 10 100\n0\n").is_err());
        assert!(parse_scenario("3\n1\n0 0 -324000 10 100\n0\n").is_ok());
    }

    #[test]
    fn test_extra_field_rejected() {
        let input = "10 20\n";
        assert!(matches!(parse_scenario(input), Err(LoadError::Malformed { line: 1, .. })));
    }
}
