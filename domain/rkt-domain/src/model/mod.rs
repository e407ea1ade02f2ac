//! ドメインモデル
//!
//! 値オブジェクトと設定型を定義。いずれも構築後に変更されない。

mod config;    // アプリ設定（既定フィルタ、ログ）
mod filter;    // 日付フィルタ窓
mod outcome;   // キーごとの問い合わせ結果
mod root;      // ルートハイブと別名テーブル
mod timestamp; // FILETIMEティック→ローカル時刻

pub use config::*;
pub use filter::*;
pub use outcome::*;
pub use root::*;
pub use timestamp::*;
