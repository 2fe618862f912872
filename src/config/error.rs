// src/config/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("ファイルを読み込めません: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAMLの解析に失敗しました: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{line}行目: {expected}を読み取れません: '{text}'")]
    Malformed {
        line: usize,
        expected: &'static str,
        text: String,
    },

    #[error("{line}行目: {field}が範囲外です: '{text}'")]
    OutOfRange {
        line: usize,
        field: &'static str,
        text: String,
    },

    #[error("入力が途中で終わっています（{expected}が必要です）")]
    UnexpectedEnd { expected: &'static str },

    #[error("パラメータ {name} が不正です: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}
