//! rkt-cli: レジストリキーの最終書き込み時刻を一覧表示する CLI。
//! パスは引数／ファイル／標準入力で渡すか、ルートを選んで直下のキーを全件調べる。

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rkt_composition::cli::{CliRuntime, resolve_path};
use rkt_composition::domain::model::RegistryRoot;
use rkt_composition::error::{Result, err};
use rkt_composition::{FilterSelection, PathSource, ReportFormat};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "rkt-cli", version, about = "Registry key last-write timestamp checker")]
struct Cli {
    /// 設定ファイル（未指定なら既定の場所）
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// ログレベル（設定ファイルより優先、RUST_LOG はさらに優先）
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// ローカル時刻ではなくUTCで表示・比較する
    #[arg(long, global = true, default_value_t = false)]
    utc: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// キーの最終書き込み時刻を取得
    Check(CheckArgs),
    /// 対応ルートと別名を表示
    Roots,
    /// キー直下のサブキーを表示
    Children {
        /// 対象キー（例: HKLM\SOFTWARE）
        path: String,
    },
    /// レジストリに触れずにパスの解決結果を表示
    Resolve {
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,
    },
    /// 既定値で設定ファイルを作成
    InitConfig {
        /// 既存ファイルを上書き
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// 対象キーのパス（HKEY_... / HKCU など）
    paths: Vec<String>,
    /// 標準入力から1行1パスで読む
    #[arg(long, default_value_t = false)]
    stdin: bool,
    /// ファイルから1行1パスで読む
    #[arg(long)]
    file: Option<PathBuf>,
    /// ルート直下の全キーを調べる（複数指定可、パス指定とは排他）
    #[arg(long = "root", value_name = "ROOT", conflicts_with_all = ["paths", "stdin", "file"])]
    roots: Vec<RegistryRoot>,
    /// この日付以降（YYYY-MM-DD）
    #[arg(long, conflicts_with_all = ["last_days", "no_filter"])]
    from: Option<NaiveDate>,
    /// この日付以前（YYYY-MM-DD）
    #[arg(long, conflicts_with_all = ["last_days", "no_filter"])]
    to: Option<NaiveDate>,
    /// 直近N日間に更新されたキーのみ
    #[arg(long, conflicts_with = "no_filter")]
    last_days: Option<u32>,
    /// 設定ファイルの既定フィルタを無視
    #[arg(long, default_value_t = false)]
    no_filter: bool,
    /// 出力形式（table|json）
    #[arg(long, default_value = "table")]
    format: ReportFormat,
    /// 出力先ファイル（未指定なら標準出力）
    #[arg(long)]
    output: Option<PathBuf>,
}

impl CheckArgs {
    fn filter_selection(&self) -> FilterSelection {
        if self.no_filter {
            FilterSelection::Disabled
        } else if let Some(days) = self.last_days {
            FilterSelection::LastDays(days)
        } else if self.from.is_some() || self.to.is_some() {
            FilterSelection::Range {
                from: self.from,
                to: self.to,
            }
        } else {
            FilterSelection::ConfiguredDefault
        }
    }

    fn path_source(&self) -> Result<PathSource> {
        if !self.roots.is_empty() {
            return Ok(PathSource::Roots(self.roots.clone()));
        }
        let mut text = self.paths.join("\n");
        if let Some(file) = &self.file {
            let content = std::fs::read_to_string(file)
                .map_err(|e| err(format!("read {}: {e}", file.display())))?;
            text.push('\n');
            text.push_str(&content);
        }
        if self.stdin {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            text.push('\n');
            text.push_str(&content);
        }
        if text.trim().is_empty() {
            return Err(err("no registry paths given (pass paths, --file, --stdin or --root)"));
        }
        Ok(PathSource::Pasted(text))
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rkt-cli failed: {e}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let log_level = cli.log_level.clone();

    // 設定を読まないコマンドは先に処理する（壊れた設定でも動くように）
    let args = match cli.command {
        Command::Check(args) => args,
        Command::Children { path } => return run_children(cli.config, log_level, cli.utc, &path),
        Command::Roots => {
            init_logging(log_level.as_deref(), None);
            for root in RegistryRoot::all() {
                println!("{}\t{}", root.long_name(), root.abbreviation());
            }
            return Ok(());
        }
        Command::Resolve { paths } => {
            init_logging(log_level.as_deref(), None);
            for raw in &paths {
                match resolve_path(raw) {
                    Ok(resolved) => println!(
                        "{}\t{}\t{}",
                        raw,
                        resolved.root().long_name(),
                        resolved.subpath()
                    ),
                    Err(e) => println!("{raw}\t{e}"),
                }
            }
            return Ok(());
        }
        Command::InitConfig { force } => {
            init_logging(log_level.as_deref(), None);
            let written = CliRuntime::init_config(cli.config, force)?;
            println!("wrote {}", written.display());
            return Ok(());
        }
    };

    // 全依存関係はComposition Rootで組み立て
    let runtime = load_runtime(cli.config, log_level, cli.utc)?;
    run_check(&runtime, &args)
}

fn load_runtime(
    config: Option<PathBuf>,
    log_level: Option<String>,
    utc: bool,
) -> Result<CliRuntime> {
    let runtime = CliRuntime::new(config, utc)?;
    init_logging(log_level.as_deref(), Some(runtime.config().log_level.as_str()));
    tracing::debug!(config = %runtime.config_path().display(), "configuration loaded");
    Ok(runtime)
}

/// 引数 > 設定ファイル > info の順でログレベルを決める
fn init_logging(cli_level: Option<&str>, configured: Option<&str>) {
    let level = cli_level.or(configured).unwrap_or("info");
    rkt_composition::log_utils::init_tracing(level);
}

fn run_children(
    config: Option<PathBuf>,
    log_level: Option<String>,
    utc: bool,
    path: &str,
) -> Result<()> {
    let runtime = load_runtime(config, log_level, utc)?;
    let children = runtime.children(path).map_err(|e| err(e.to_string()))?;
    for child in &children {
        println!("{child}");
    }
    if children.is_empty() {
        eprintln!("no subkeys found under {path}");
    }
    Ok(())
}

fn run_check(runtime: &CliRuntime, args: &CheckArgs) -> Result<()> {
    let source = args.path_source()?;
    let report = runtime.check(&source, args.filter_selection())?;
    if let Some(rendered) = runtime.emit_report(&report, args.format, args.output.as_deref())? {
        print!("{rendered}");
    }
    eprintln!(
        "{} shown, {} failed, {} outside date range",
        report.outcomes.len(),
        report.failed,
        report.excluded_by_filter
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("rkt-cli").chain(args.iter().copied()))
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn roots_and_paths_are_exclusive() {
        assert!(parse(&["check", "--root", "HKCU", r"HKLM\SOFTWARE"]).is_err());
        assert!(parse(&["check", "--root", "HKCU", "--stdin"]).is_err());
        assert!(parse(&["check", "--root", "HKCU", "--root", "HKEY_USERS"]).is_ok());
        assert!(parse(&["check", "--root", "hkcu"]).is_err());
    }

    #[test]
    fn filter_flags_map_to_selection() {
        let Command::Check(args) = parse(&["check", "HKCU"]).unwrap().command else {
            panic!("expected check");
        };
        assert_eq!(args.filter_selection(), FilterSelection::ConfiguredDefault);

        let Command::Check(args) = parse(&["check", "HKCU", "--last-days", "7"]).unwrap().command
        else {
            panic!("expected check");
        };
        assert_eq!(args.filter_selection(), FilterSelection::LastDays(7));

        let Command::Check(args) = parse(&["check", "HKCU", "--from", "2024-01-01"]).unwrap().command
        else {
            panic!("expected check");
        };
        assert_eq!(
            args.filter_selection(),
            FilterSelection::Range {
                from: NaiveDate::from_ymd_opt(2024, 1, 1),
                to: None
            }
        );

        assert!(parse(&["check", "HKCU", "--no-filter", "--last-days", "3"]).is_err());
    }

    #[test]
    fn roots_become_root_source() {
        let Command::Check(args) = parse(&["check", "--root", "HKLM", "--root", "HKCR"])
            .unwrap()
            .command
        else {
            panic!("expected check");
        };
        assert_eq!(
            args.path_source().unwrap(),
            PathSource::Roots(vec![RegistryRoot::LocalMachine, RegistryRoot::ClassesRoot])
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        let Command::Check(args) = parse(&["check"]).unwrap().command else {
            panic!("expected check");
        };
        assert!(args.path_source().is_err());
    }
}
