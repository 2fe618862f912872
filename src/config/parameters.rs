// src/config/parameters.rs

use serde::Deserialize;

use crate::config::error::LoadError;

/// 実行パラメータ
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RunParameters {
    pub workers: usize,    // 並列ワーカー数
    pub max_passes: usize, // 解決パスの上限
    pub strict_slew: bool, // 判定時に旋回速度も再検証するか
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            workers: 4,
            max_passes: 8,
            strict_slew: true,
        }
    }
}

impl RunParameters {
    /// パラメータの妥当性を確認する
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.workers == 0 {
            return Err(LoadError::InvalidParameter {
                name: "workers",
                reason: "1以上である必要があります",
            });
        }
        if self.max_passes == 0 {
            return Err(LoadError::InvalidParameter {
                name: "max_passes",
                reason: "1以上である必要があります",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let params: RunParameters = serde_yaml::from_str("workers: 2\n").unwrap();
        assert_eq!(
            params,
            RunParameters {
                workers: 2,
                ..RunParameters::default()
            }
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<RunParameters, _> = serde_yaml::from_str("threads: 2\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let params = RunParameters {
            workers: 0,
            ..RunParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(LoadError::InvalidParameter { name: "workers", .. })
        ));
        assert!(RunParameters::default().validate().is_ok());
    }
}
