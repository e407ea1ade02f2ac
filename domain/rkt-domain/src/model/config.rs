use super::DateFilterWindow;
use crate::{ConfigError, FilterError};
use chrono::NaiveDate;
use std::path::PathBuf;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 明示的な範囲指定がないときに使う日付フィルタ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultFilter {
    /// フィルタなし
    #[default]
    None,
    /// 今日を含む直近N日間
    LastDays(u32),
    /// 固定範囲
    Range { start: NaiveDate, end: NaiveDate },
}

impl DefaultFilter {
    /// 今日の日付を基準に具体的な窓へ変換する。
    pub fn window(&self, today: NaiveDate) -> Result<Option<DateFilterWindow>, FilterError> {
        match *self {
            Self::None => Ok(None),
            Self::LastDays(days) => Ok(Some(DateFilterWindow::last_days(today, days))),
            Self::Range { start, end } => DateFilterWindow::new(start, end).map(Some),
        }
    }
}

/// アプリ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub default_filter: DefaultFilter,
    pub log_level: String,
    /// ライフサイクルログの追記先（未設定なら書かない）
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_filter: DefaultFilter::None,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let DefaultFilter::Range { start, end } = self.default_filter {
            DateFilterWindow::new(start, end)?;
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "log_level must be one of {} (got '{}')",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        if let Some(path) = &self.log_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("log_file must not be empty".into()));
            }
        }
        Ok(())
    }

    /// 大文字小文字と前後空白の揺れを吸収する。
    pub fn normalize(&mut self) {
        self.log_level = self.log_level.trim().to_ascii_lowercase();
        if self.log_level.is_empty() {
            self.log_level = "info".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_config_is_valid_and_unfiltered() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.default_filter.window(date(2024, 1, 1)).unwrap(), None);
    }

    #[test]
    fn rolling_default_resolves_against_today() {
        let window = DefaultFilter::LastDays(7)
            .window(date(2024, 1, 10))
            .unwrap()
            .unwrap();
        assert_eq!(window.start(), date(2024, 1, 3));
        assert_eq!(window.end(), date(2024, 1, 10));
    }

    #[test]
    fn inverted_range_is_invalid() {
        let cfg = AppConfig {
            default_filter: DefaultFilter::Range {
                start: date(2024, 2, 1),
                end: date(2024, 1, 1),
            },
            ..AppConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn normalize_then_validate_log_level() {
        let mut cfg = AppConfig {
            log_level: " DEBUG ".into(),
            ..AppConfig::default()
        };
        cfg.normalize();
        assert_eq!(cfg.log_level, "debug");
        assert!(cfg.validate().is_ok());

        cfg.log_level = "verbose".into();
        assert!(cfg.validate().is_err());
    }
}
