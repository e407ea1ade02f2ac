use crate::ResolutionError;
use std::fmt;
use std::str::FromStr;

/// ホストが認識するトップレベルのハイブ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegistryRoot {
    ClassesRoot,
    CurrentUser,
    LocalMachine,
    Users,
    CurrentConfig,
}

/// 表示順および解決時の優先順。並びを変えると前方一致の勝者が変わる。
const ROOT_ORDER: [RegistryRoot; 5] = [
    RegistryRoot::ClassesRoot,
    RegistryRoot::CurrentUser,
    RegistryRoot::LocalMachine,
    RegistryRoot::Users,
    RegistryRoot::CurrentConfig,
];

impl RegistryRoot {
    /// 全ルート（テーブル順）
    pub fn all() -> &'static [RegistryRoot] {
        &ROOT_ORDER
    }

    /// 別名一覧。正式名が先、略称が後。
    pub fn aliases(self) -> &'static [&'static str; 2] {
        match self {
            Self::ClassesRoot => &["HKEY_CLASSES_ROOT", "HKCR"],
            Self::CurrentUser => &["HKEY_CURRENT_USER", "HKCU"],
            Self::LocalMachine => &["HKEY_LOCAL_MACHINE", "HKLM"],
            Self::Users => &["HKEY_USERS", "HKU"],
            Self::CurrentConfig => &["HKEY_CURRENT_CONFIG", "HKCC"],
        }
    }

    pub fn long_name(self) -> &'static str {
        self.aliases()[0]
    }

    pub fn abbreviation(self) -> &'static str {
        self.aliases()[1]
    }

    /// 別名との完全一致（大文字小文字を区別）
    pub fn from_alias(alias: &str) -> Option<Self> {
        ROOT_ORDER
            .iter()
            .copied()
            .find(|root| root.aliases().contains(&alias))
    }
}

impl fmt::Display for RegistryRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

impl FromStr for RegistryRoot {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s).ok_or_else(|| ResolutionError::UnsupportedRoot(s.to_string()))
    }
}

/// 別名テーブルの参照（正式名、略称の順）
pub fn aliases_for(root: RegistryRoot) -> &'static [&'static str] {
    root.aliases()
}

/// 全ルートをテーブル順で返す
pub fn all_roots() -> &'static [RegistryRoot] {
    RegistryRoot::all()
}
