//! RegKeyTime ドメイン層
//!
//! レジストリパスの解決、最終書き込み時刻の変換、日付フィルタを扱う中核ロジック。
//! ホストレジストリと時計には触れず、すべてポート経由で受け取る。

pub mod error; // ドメインエラー定義
pub mod model; // ドメインモデル（ルート、時刻、フィルタ、結果）
pub mod path;  // パス正規化とルート解決
pub mod port;  // ポート（driven）

pub use error::{ConfigError, FilterError, QueryError, ResolutionError};
