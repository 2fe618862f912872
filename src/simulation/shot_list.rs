// src/simulation/shot_list.rs

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::Position;

/// 撮影記録
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    pub la: i32,
    pub lo: i32,
    pub turn: u32,
    pub satellite_id: usize,
}

impl Shot {
    pub fn new(target: Position, turn: u32, satellite_id: usize) -> Self {
        Self {
            la: target.la,
            lo: target.lo,
            turn,
            satellite_id,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.la, self.lo)
    }
}

impl fmt::Display for Shot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.la, self.lo, self.turn, self.satellite_id)
    }
}

/// 撮影リスト
///
/// テキスト形式は1行目に撮影数、続く各行に `la lo turn satellite_id`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotList {
    shots: Vec<Shot>,
}

impl ShotList {
    pub fn new(shots: Vec<Shot>) -> Self {
        Self { shots }
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// 撮影リストを書き出す
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        write!(writer, "{}", self)
    }

    /// 撮影リストをファイルに保存する
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()
    }
}

impl fmt::Display for ShotList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.shots.len())?;
        for shot in &self.shots {
            writeln!(f, "{}", shot)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_list_text() {
        let list = ShotList::new(vec![
            Shot::new(Position::new(100, 150), 0, 2),
            Shot::new(Position::new(-5, -648_000), 17, 0),
        ]);
        assert_eq!(list.to_string(), "2\n100 150 0 2\n-5 -648000 17 0\n");

        let mut buffer = Vec::new();
        list.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), list.to_string());
    }

    #[test]
    fn test_empty_shot_list_text() {
        assert_eq!(ShotList::default().to_string(), "0\n");
    }
}
