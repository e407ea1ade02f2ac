//! CLI 用ランタイム配線。

use crate::error::{Result, err};
use rkt_adapter_clock::{ClockAdapter, FixedOffsetClock};
use rkt_adapter_fs::{FsAdapter, ReportFormat, render_report};
use rkt_adapter_registry::RegistryAdapter;
use rkt_app::{AppService, BatchReport, FilterSelection, PathSource, list_children_of};
use rkt_domain::model::{AppConfig, DateFilterWindow};
use rkt_domain::path::{ResolvedPath, resolve};
use rkt_domain::port::driven::{Clock, ConfigRepository};
use rkt_domain::ResolutionError;
use std::path::{Path, PathBuf};

/// CLI実行ファイル用の依存関係
pub struct CliRuntime {
    app: AppService,
    registry: RegistryAdapter,
    fs: FsAdapter,
    clock: Box<dyn Clock>,
    config: AppConfig,
}

impl CliRuntime {
    /// 設定ファイルを読み込んで作成（未指定なら既定の場所）
    pub fn new(config_path: Option<PathBuf>, utc: bool) -> Result<Self> {
        let config_path = resolve_config_path(config_path);
        let fs = FsAdapter::new(&config_path);
        let config = fs
            .load()
            .map_err(|e| err(format!("{}: {e}", config_path.display())))?;
        let clock: Box<dyn Clock> = if utc {
            Box::new(FixedOffsetClock::utc())
        } else {
            Box::new(ClockAdapter::new())
        };
        Ok(Self {
            app: AppService::new(),
            registry: RegistryAdapter::new(),
            fs,
            clock,
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        self.fs.config_path()
    }

    /// 設定を初期化（既存ファイルは `overwrite` 指定時のみ上書き）
    ///
    /// 既存ファイルは読まないので、壊れた設定も上書きで修復できる。
    pub fn init_config(config_path: Option<PathBuf>, overwrite: bool) -> Result<PathBuf> {
        let fs = FsAdapter::new(resolve_config_path(config_path));
        if fs.exists() && !overwrite {
            return Err(err(format!(
                "config already exists: {}",
                fs.config_path().display()
            )));
        }
        fs.save(&AppConfig::default()).map_err(|e| err(e.to_string()))?;
        Ok(fs.config_path().to_path_buf())
    }

    /// 指定と既定から日付フィルタ窓を決める
    pub fn window(&self, selection: FilterSelection) -> Result<Option<DateFilterWindow>> {
        self.app
            .select_window(selection, self.config.default_filter, self.clock.as_ref())
            .map_err(|e| err(e.to_string()))
    }

    /// 一括チェック
    pub fn check(&self, source: &PathSource, selection: FilterSelection) -> Result<BatchReport> {
        let window = self.window(selection)?;
        if let Some(w) = &window {
            tracing::info!(start = %w.start(), end = %w.end(), "date filter active");
        }
        self.log_lifecycle(&format!("check started ({})", describe_source(source)));
        let report = self.app.check_source(
            source,
            window.as_ref(),
            &self.registry,
            self.clock.as_ref(),
        );
        self.log_lifecycle(&format!(
            "check finished: queried={} failed={} excluded={}",
            report.queried, report.failed, report.excluded_by_filter
        ));
        Ok(report)
    }

    /// 1階層のサブキー一覧
    pub fn children(&self, raw: &str) -> std::result::Result<Vec<String>, ResolutionError> {
        list_children_of(&self.registry, raw.trim())
    }

    /// レポートを整形し、指定があればファイルへ書き出す（なければ文字列を返す）
    pub fn emit_report(
        &self,
        report: &BatchReport,
        format: ReportFormat,
        output: Option<&Path>,
    ) -> Result<Option<String>> {
        let rendered = render_report(&report.outcomes, format).map_err(err)?;
        match output {
            Some(path) => {
                self.fs
                    .write_file(path, rendered.as_bytes())
                    .map_err(|e| err(format!("write report {}: {e}", path.display())))?;
                Ok(None)
            }
            None => Ok(Some(rendered)),
        }
    }

    fn log_lifecycle(&self, message: &str) {
        if let Some(path) = &self.config.log_file {
            rkt_log_utils::write_lifecycle_line(path, "rkt-cli", message);
        }
    }
}

/// レジストリにも設定にも触れずにパスを解決する
pub fn resolve_path(raw: &str) -> std::result::Result<ResolvedPath, ResolutionError> {
    resolve(raw.trim())
}

fn resolve_config_path(config_path: Option<PathBuf>) -> PathBuf {
    config_path.unwrap_or_else(rkt_adapter_paths::default_config_path)
}

fn describe_source(source: &PathSource) -> String {
    match source {
        PathSource::Pasted(text) => format!("{} pasted line(s)", text.lines().count()),
        PathSource::Roots(roots) => {
            let names: Vec<&str> = roots.iter().map(|r| r.long_name()).collect();
            format!("roots: {}", names.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rkt_domain::model::RegistryRoot;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_config_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("rkt-cli-test-{}-{}-{}", name, std::process::id(), nanos))
            .join("config.json")
    }

    #[test]
    fn init_config_force_repairs_corrupt_file() {
        let path = temp_config_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        assert!(CliRuntime::new(Some(path.clone()), false).is_err());
        assert!(CliRuntime::init_config(Some(path.clone()), false).is_err());

        let written = CliRuntime::init_config(Some(path.clone()), true).unwrap();
        assert_eq!(written, path);
        let runtime = CliRuntime::new(Some(path.clone()), false).unwrap();
        assert_eq!(runtime.config(), &AppConfig::default());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn init_config_creates_missing_file() {
        let path = temp_config_path("fresh");
        CliRuntime::init_config(Some(path.clone()), false).unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn resolve_path_needs_no_config() {
        let resolved = resolve_path("  HKLM\\SOFTWARE\\Vendor ").unwrap();
        assert_eq!(resolved.root(), RegistryRoot::LocalMachine);
        assert_eq!(resolved.subpath(), "SOFTWARE\\Vendor");
    }

    #[test]
    fn children_trims_surrounding_whitespace() {
        let path = temp_config_path("children");
        let runtime = CliRuntime::new(Some(path), true).unwrap();
        assert!(runtime.children("  HKLM\\SOFTWARE \t").is_ok());
        assert!(runtime.children("HKXX\\SOFTWARE").is_err());
    }
}
