//! ファイルシステムアダプター（設定ファイル/結果レポート）
//! 設定はJSON、レポートはタブ区切り表またはJSONで書き出す。
use chrono::NaiveDate;
use rkt_domain::error::ConfigError;
use rkt_domain::model::{AppConfig, DefaultFilter};
use rkt_domain::port::driven::ConfigRepository;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod report;

pub use report::{ReportFormat, render_json, render_report, render_table};

#[derive(Debug, Clone)]
pub struct FsAdapter {
    config_path: PathBuf,
}

impl FsAdapter {
    /// 設定ファイルのパスを指定して作成。ファイルは遅延作成。
    pub fn new(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// レポートなど任意のファイルを置き換え書き込みする。
    pub fn write_file(&self, path: &Path, data: &[u8]) -> std::io::Result<()> {
        write_atomic(path, data)
    }
}

impl ConfigRepository for FsAdapter {
    fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "config file absent, using defaults");
            return Ok(AppConfig::default());
        }
        let buf = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::Read(format!("{}: {e}", self.config_path.display())))?;
        let dto: ConfigDto =
            serde_json::from_str(&buf).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = AppConfig::from(dto);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let dto = ConfigDto::from(config);
        let data = serde_json::to_string_pretty(&dto)
            .map_err(|e| ConfigError::Write(format!("serialize config: {e}")))?;
        write_atomic(&self.config_path, data.as_bytes())
            .map_err(|e| ConfigError::Write(format!("{}: {e}", self.config_path.display())))
    }

    fn exists(&self) -> bool {
        self.config_path.exists()
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp_path = path.with_extension(format!("tmp.{}", unique_suffix()));
    {
        let mut f = fs::File::create(&tmp_path)?;
        f.write_all(data)?;
        let _ = f.sync_all();
    }
    if path.exists() {
        #[cfg(windows)]
        {
            if let Err(e) = replace_file(&tmp_path, path) {
                let _ = fs::remove_file(&tmp_path);
                return Err(e);
            }
            return Ok(());
        }
    }
    fs::rename(&tmp_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp_path);
    })
}

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{}.{}", std::process::id(), nanos)
}

#[cfg(windows)]
fn replace_file(src: &Path, dst: &Path) -> std::io::Result<()> {
    use std::os::windows::ffi::OsStrExt;
    use windows::Win32::Storage::FileSystem::{REPLACE_FILE_FLAGS, ReplaceFileW};
    use windows::core::PCWSTR;

    fn to_wide(path: &Path) -> Vec<u16> {
        let mut wide: Vec<u16> = path.as_os_str().encode_wide().collect();
        wide.push(0);
        wide
    }

    let src_w = to_wide(src);
    let dst_w = to_wide(dst);
    unsafe {
        ReplaceFileW(
            PCWSTR(dst_w.as_ptr()),
            PCWSTR(src_w.as_ptr()),
            PCWSTR::null(),
            REPLACE_FILE_FLAGS(0),
            None,
            None,
        )
        .map_err(|e| std::io::Error::other(format!("ReplaceFileW failed: {}", e.message())))
    }
}

// ---------- DTO 定義 ----------

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct ConfigDto {
    default_filter: FilterDto,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_file: Option<PathBuf>,
}

impl Default for ConfigDto {
    fn default() -> Self {
        ConfigDto::from(&AppConfig::default())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum FilterDto {
    #[default]
    None,
    LastDays {
        days: u32,
    },
    Range {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl From<ConfigDto> for AppConfig {
    fn from(dto: ConfigDto) -> Self {
        let default_filter = match dto.default_filter {
            FilterDto::None => DefaultFilter::None,
            FilterDto::LastDays { days } => DefaultFilter::LastDays(days),
            FilterDto::Range { start, end } => DefaultFilter::Range { start, end },
        };
        AppConfig {
            default_filter,
            log_level: dto.log_level,
            log_file: dto.log_file,
        }
    }
}

impl From<&AppConfig> for ConfigDto {
    fn from(config: &AppConfig) -> Self {
        let default_filter = match config.default_filter {
            DefaultFilter::None => FilterDto::None,
            DefaultFilter::LastDays(days) => FilterDto::LastDays { days },
            DefaultFilter::Range { start, end } => FilterDto::Range { start, end },
        };
        ConfigDto {
            default_filter,
            log_level: config.log_level.clone(),
            log_file: config.log_file.clone(),
        }
    }
}
