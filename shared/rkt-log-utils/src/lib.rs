//! ログユーティリティ
//!
//! 標準エラーへの `tracing` 出力と、任意ファイルへのライフサイクル行の追記。

use chrono::{SecondsFormat, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` が設定されていればそれを優先し、なければ `level` で初期化する。
/// 2回目以降の呼び出しは無視される。
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// UTCのRFC3339（ミリ秒付き）。例: 2025-01-15T10:30:00.123Z
pub fn utc_rfc3339_millis() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// UTCタイムスタンプ付きのライフサイクル行を作成する。
pub fn lifecycle_line(component: &str, message: &str) -> String {
    format!("[{}] [{}] {}\n", utc_rfc3339_millis(), component, message)
}

/// ライフサイクル行をファイルに追記する。書けなければ警告だけ出して続行。
pub fn write_lifecycle_line(path: &Path, component: &str, message: &str) {
    let line = lifecycle_line(component, message);
    if let Err(e) = append_line(path, &line) {
        tracing::warn!(path = %path.display(), error = %e, "failed to write lifecycle log");
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    file.flush()
}
