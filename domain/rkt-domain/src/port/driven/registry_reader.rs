use crate::QueryError;
use crate::model::RegistryRoot;

pub type Result<T> = std::result::Result<T, QueryError>;

/// ホストレジストリの読み取り専用ポート。
///
/// 実装は呼び出しごとにキーを開き、戻る前に必ず閉じること（ハンドルを持ち越さない）。
pub trait RegistryReader {
    /// キーの最終書き込み時刻（1601年起点の100nsティック）
    fn last_write_ticks(&self, root: RegistryRoot, subpath: &str) -> Result<u64>;

    /// 直下のサブキー名（列挙インデックス順）
    fn subkey_names(&self, root: RegistryRoot, subpath: &str) -> Result<Vec<String>>;
}
