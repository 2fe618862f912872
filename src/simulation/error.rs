// src/simulation/error.rs

use thiserror::Error;

/// 判定失敗の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Format,   // 書式の誤り
    Range,    // 値の範囲外
    Physical, // 物理的に不可能な撮影
}

/// 撮影リストの判定エラー（行番号は1始まり）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JudgeError {
    #[error("{line}行目: 撮影数の書式が不正です: '{text}'")]
    MalformedHeader { line: usize, text: String },

    #[error("{line}行目: 撮影記録の書式が不正です: '{text}'")]
    MalformedShot { line: usize, text: String },

    #[error("撮影数 {declared} に対して撮影記録が {found} 行あります")]
    ShotCountMismatch { declared: usize, found: usize },

    #[error("{line}行目: 数値として解釈できません: '{text}'")]
    Unparsable { line: usize, text: String },

    #[error("撮影数 {declared} は 1..={max} の範囲外です")]
    ShotCountOutOfRange { declared: usize, max: usize },

    #[error("{line}行目: {field} = {value} は [{min}, {max}] の範囲外です")]
    FieldOutOfRange {
        line: usize,
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{line}行目: 画像 ({la}, {lo}) はターン {turn} で衛星 {satellite} の視野外です")]
    OutOfView {
        line: usize,
        la: i32,
        lo: i32,
        turn: u32,
        satellite: usize,
    },

    #[error("{line}行目: 衛星 {satellite} はターン {turn} までに ({la}, {lo}) へ旋回できません")]
    SlewTooFast {
        line: usize,
        la: i32,
        lo: i32,
        turn: u32,
        satellite: usize,
    },
}

impl JudgeError {
    pub fn kind(&self) -> ViolationKind {
        match self {
            JudgeError::MalformedHeader { .. }
            | JudgeError::MalformedShot { .. }
            | JudgeError::ShotCountMismatch { .. } => ViolationKind::Format,
            JudgeError::Unparsable { .. }
            | JudgeError::ShotCountOutOfRange { .. }
            | JudgeError::FieldOutOfRange { .. } => ViolationKind::Range,
            JudgeError::OutOfView { .. } | JudgeError::SlewTooFast { .. } => ViolationKind::Physical,
        }
    }

    /// 問題のある行（特定できる場合）
    pub fn line(&self) -> Option<usize> {
        match self {
            JudgeError::MalformedHeader { line, .. }
            | JudgeError::MalformedShot { line, .. }
            | JudgeError::Unparsable { line, .. }
            | JudgeError::FieldOutOfRange { line, .. }
            | JudgeError::OutOfView { line, .. }
            | JudgeError::SlewTooFast { line, .. } => Some(*line),
            JudgeError::ShotCountMismatch { .. } | JudgeError::ShotCountOutOfRange { .. } => None,
        }
    }
}
