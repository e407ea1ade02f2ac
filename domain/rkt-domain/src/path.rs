//! レジストリパスの正規化とルート解決（stdのみ）
//!
//! 前方一致・先勝ちの単純な解決器。別名テーブルの並び順がそのまま優先順になる。

use crate::ResolutionError;
use crate::model::RegistryRoot;
use std::fmt;

/// パス区切り文字
pub const PATH_DELIMITER: char = '\\';

/// 正規化の起点とみなす区切り要素の接頭辞
const ANCHOR_PREFIX: &str = "HKEY_";

/// 解決済みパス（ルート＋サブパス）。サブパスは一致した別名を含まない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    root: RegistryRoot,
    subpath: String,
}

impl ResolvedPath {
    pub fn new(root: RegistryRoot, subpath: impl Into<String>) -> Self {
        Self {
            root,
            subpath: subpath.into(),
        }
    }

    pub fn root(&self) -> RegistryRoot {
        self.root
    }

    /// ルート直下からのサブパス（空ならルートそのもの）
    pub fn subpath(&self) -> &str {
        &self.subpath
    }

    /// サブパスの区切り要素（空要素は除く）
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.subpath
            .split(PATH_DELIMITER)
            .filter(|segment| !segment.is_empty())
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.subpath.is_empty() {
            write!(f, "{}", self.root.long_name())
        } else {
            write!(f, "{}{}{}", self.root.long_name(), PATH_DELIMITER, self.subpath)
        }
    }
}

/// 最初の `HKEY_` で始まる要素より前を捨てる。見つからなければ入力をそのまま返す。
///
/// 例: `Computer\HKEY_CURRENT_USER\Software` → `HKEY_CURRENT_USER\Software`
pub fn clean_registry_path(raw: &str) -> String {
    let parts: Vec<&str> = raw.split(PATH_DELIMITER).collect();
    match parts.iter().position(|part| part.starts_with(ANCHOR_PREFIX)) {
        Some(anchor) => parts[anchor..].join("\\"),
        None => raw.to_string(),
    }
}

/// 生のパス文字列をルートとサブパスに解決する。
///
/// テーブル順に各ルートの別名（正式名→略称）で前方一致を試し、最初に一致したルートを採用する。
/// 最長一致ではない点に注意。サブパスは別名ごとに最初の出現を1回だけ除去し、
/// 先頭の区切り文字を落としたもの。
pub fn resolve(raw: &str) -> Result<ResolvedPath, ResolutionError> {
    let cleaned = clean_registry_path(raw);
    let root = RegistryRoot::all()
        .iter()
        .copied()
        .find(|root| root.aliases().iter().any(|alias| cleaned.starts_with(alias)))
        .ok_or_else(|| ResolutionError::UnsupportedRoot(cleaned.clone()))?;

    let mut subpath = cleaned;
    for alias in root.aliases() {
        subpath = subpath
            .replacen(alias, "", 1)
            .trim_start_matches(PATH_DELIMITER)
            .to_string();
    }
    Ok(ResolvedPath::new(root, subpath))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_and_short_aliases_resolve_identically() {
        for root in RegistryRoot::all() {
            let expected = ResolvedPath::new(*root, r"Sub\Key");
            for alias in root.aliases() {
                let raw = format!(r"{alias}\Sub\Key");
                assert_eq!(resolve(&raw).unwrap(), expected, "alias {alias}");
            }
        }
    }

    #[test]
    fn leading_junk_before_anchor_is_dropped() {
        assert_eq!(
            clean_registry_path(r"garbage\HKEY_CURRENT_USER\Software\X"),
            r"HKEY_CURRENT_USER\Software\X"
        );
        let resolved = resolve(r"garbage\HKEY_CURRENT_USER\Software\X").unwrap();
        assert_eq!(resolved.root(), RegistryRoot::CurrentUser);
        assert_eq!(resolved.subpath(), r"Software\X");
        assert_eq!(resolved.to_string(), r"HKEY_CURRENT_USER\Software\X");
    }

    #[test]
    fn regedit_address_bar_copy_resolves() {
        let resolved = resolve(r"Computer\HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft").unwrap();
        assert_eq!(resolved.root(), RegistryRoot::LocalMachine);
        assert_eq!(resolved.segments().collect::<Vec<_>>(), vec!["SOFTWARE", "Microsoft"]);
    }

    #[test]
    fn unknown_root_is_rejected_with_cleaned_path() {
        assert_eq!(
            resolve(r"Unknown\Foo"),
            Err(ResolutionError::UnsupportedRoot(r"Unknown\Foo".into()))
        );
        assert_eq!(
            resolve(r"junk\HKEY_BOGUS\Foo"),
            Err(ResolutionError::UnsupportedRoot(r"HKEY_BOGUS\Foo".into()))
        );
    }

    #[test]
    fn abbreviation_after_junk_is_not_an_anchor() {
        assert!(resolve(r"garbage\HKCU\Software").is_err());
    }

    #[test]
    fn bare_root_resolves_to_empty_subpath() {
        let resolved = resolve("HKCU").unwrap();
        assert_eq!(resolved.root(), RegistryRoot::CurrentUser);
        assert_eq!(resolved.subpath(), "");
        assert_eq!(resolved.segments().count(), 0);
        assert_eq!(resolved.to_string(), "HKEY_CURRENT_USER");
    }

    #[test]
    fn repeated_delimiters_after_alias_are_stripped() {
        let resolved = resolve(r"HKLM\\\SYSTEM").unwrap();
        assert_eq!(resolved.subpath(), "SYSTEM");
    }

    #[test]
    fn matching_is_prefix_based_and_case_sensitive() {
        // 区切りなしでも前方一致すれば採用される
        let resolved = resolve(r"HKCUX\Foo").unwrap();
        assert_eq!(resolved.root(), RegistryRoot::CurrentUser);
        assert_eq!(resolved.subpath(), r"X\Foo");

        assert!(resolve(r"hkcu\Software").is_err());
    }

    #[test]
    fn abbreviation_inside_long_form_path_is_removed_once() {
        // 正式名を除去した後、略称の最初の出現も1回だけ除去される
        let resolved = resolve(r"HKEY_CURRENT_USER\Software\HKCU\Leaf").unwrap();
        assert_eq!(resolved.subpath(), r"Software\\Leaf");
    }
}
