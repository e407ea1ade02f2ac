//! ドメインエラー型
//!
//! どのエラーも1件単位で回復可能。バッチ全体を中断させるエラーは存在しない。

use chrono::NaiveDate;
use thiserror::Error;

/// パス解決の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// どのルートの別名とも前方一致しなかった（正規化後のパスを保持）
    #[error("Unsupported registry key root: {0}")]
    UnsupportedRoot(String),
}

/// キー問い合わせの失敗
///
/// 表示文字列は呼び出し側へそのまま提示する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Registry key not found.")]
    NotFound,

    #[error("Permission denied to access registry key.")]
    PermissionDenied,

    /// その他のホストI/O失敗（システムのエラーテキストを含む）
    #[error("OS error occurred: {0}")]
    HostIo(String),

    #[error("Unsupported registry key root: {0}")]
    UnsupportedRoot(String),
}

impl From<ResolutionError> for QueryError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::UnsupportedRoot(path) => Self::UnsupportedRoot(path),
        }
    }
}

/// 日付フィルタの構築失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// 設定の読み込み/検証失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Read(String),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to write configuration: {0}")]
    Write(String),
}

impl From<FilterError> for ConfigError {
    fn from(err: FilterError) -> Self {
        Self::Invalid(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_messages_are_user_facing() {
        assert_eq!(QueryError::NotFound.to_string(), "Registry key not found.");
        assert_eq!(
            QueryError::PermissionDenied.to_string(),
            "Permission denied to access registry key."
        );
        assert_eq!(
            QueryError::HostIo("[WinError 21] The device is not ready.".into()).to_string(),
            "OS error occurred: [WinError 21] The device is not ready."
        );
    }

    #[test]
    fn resolution_error_converts_with_offending_path() {
        let err: QueryError = ResolutionError::UnsupportedRoot(r"Unknown\Foo".into()).into();
        assert_eq!(err, QueryError::UnsupportedRoot(r"Unknown\Foo".into()));
        assert_eq!(err.to_string(), r"Unsupported registry key root: Unknown\Foo");
    }
}
