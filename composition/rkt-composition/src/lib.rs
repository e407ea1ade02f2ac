//! rkt-composition: 実行ファイル向けのランタイムを組み立てるコンポジションルート。
//! ドメイン／アプリケーション／各種アダプタをここで配線し、apps/* はこのクレートだけに依存する。

pub mod cli;
pub mod error;

// apps/* が内側レイヤーの型に触れる必要がある場合は、ここから辿れるようにする。
pub use rkt_app as app;
pub use rkt_domain as domain;

pub use rkt_adapter_fs::ReportFormat;
pub use rkt_adapter_paths::default_config_path;
pub use rkt_app::{AppService, BatchReport, FilterSelection, PathSource};
pub use rkt_log_utils as log_utils;
