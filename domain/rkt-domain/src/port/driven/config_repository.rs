//! 設定リポジトリポート

use crate::error::ConfigError;
use crate::model::AppConfig;

/// 設定ストレージポート
pub trait ConfigRepository {
    /// 設定を読込（ファイルがなければ既定値）
    fn load(&self) -> Result<AppConfig, ConfigError>;

    /// 設定を保存
    fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// 設定ファイルの存在確認
    fn exists(&self) -> bool;
}
