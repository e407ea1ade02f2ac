//! 駆動ポート（出力インターフェース）。
//!
//! ドメインが外部に求める機能を定義する。
//! インフラ層のアダプタが実装する。

mod clock;
mod config_repository;
mod registry_reader;

pub use clock::*;
pub use config_repository::*;
pub use registry_reader::*;
