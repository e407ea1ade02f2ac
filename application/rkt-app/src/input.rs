//! 問い合わせ対象パスの収集

use crate::enumerate::list_immediate_children;
use rkt_domain::model::RegistryRoot;
use rkt_domain::port::driven::RegistryReader;

/// パスの供給元。ルート選択と貼り付けは排他。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource {
    /// 1行1パスのテキスト
    Pasted(String),
    /// 選択したルート直下の全キー
    Roots(Vec<RegistryRoot>),
}

/// 貼り付けテキストを行単位のパスへ分解する（前後空白除去、空行は無視）。
pub fn parse_pasted_paths(text: &str) -> Vec<String> {
    text.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// 供給元から問い合わせ対象の一覧を作る。ルートはテーブル順・重複なしで展開する。
pub fn collect_paths(source: &PathSource, reader: &(impl RegistryReader + ?Sized)) -> Vec<String> {
    match source {
        PathSource::Pasted(text) => parse_pasted_paths(text),
        PathSource::Roots(selected) => RegistryRoot::all()
            .iter()
            .filter(|root| selected.contains(root))
            .flat_map(|root| list_immediate_children(reader, *root))
            .collect(),
    }
}
