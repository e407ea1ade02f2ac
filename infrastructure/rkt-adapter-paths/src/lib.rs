//! RegKeyTimeの既定パス解決

use std::path::PathBuf;

const PRODUCT_DIR: &str = "RegKeyTime";

#[cfg(windows)]
fn known_folder_path(id: &windows::core::GUID) -> Option<PathBuf> {
    use windows::Win32::System::Com::CoTaskMemFree;
    use windows::Win32::UI::Shell::{KF_FLAG_DEFAULT, SHGetKnownFolderPath};
    use windows::core::PWSTR;

    unsafe {
        let raw: PWSTR = SHGetKnownFolderPath(id, KF_FLAG_DEFAULT, None).ok()?;
        let s = pwstr_to_string(raw);
        CoTaskMemFree(Some(raw.0 as _));
        if s.is_empty() {
            None
        } else {
            Some(PathBuf::from(s))
        }
    }
}

#[cfg(windows)]
fn pwstr_to_string(pwstr: windows::core::PWSTR) -> String {
    unsafe {
        if pwstr.is_null() {
            return String::new();
        }
        let mut len = 0usize;
        while *pwstr.0.add(len) != 0 {
            len += 1;
        }
        let slice = std::slice::from_raw_parts(pwstr.0, len);
        String::from_utf16_lossy(slice)
    }
}

/// ユーザーごとの設定ディレクトリ
///
/// - Windows: `%APPDATA%\RegKeyTime`（既知フォルダ）
/// - その他: `$XDG_CONFIG_HOME/regkeytime` または `~/.config/regkeytime`
pub fn default_config_dir() -> PathBuf {
    #[cfg(windows)]
    {
        use windows::Win32::UI::Shell::FOLDERID_RoamingAppData;

        known_folder_path(&FOLDERID_RoamingAppData)
            .or_else(|| std::env::var_os("APPDATA").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(r"C:\ProgramData"))
            .join(PRODUCT_DIR)
    }
    #[cfg(not(windows))]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("./var"));
        base.join(PRODUCT_DIR.to_ascii_lowercase())
    }
}

/// 既定の設定ファイル
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_lives_in_product_dir() {
        let path = default_config_path();
        assert_eq!(path.file_name().and_then(|s| s.to_str()), Some("config.json"));
        let dir = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap()
            .to_ascii_lowercase();
        assert_eq!(dir, "regkeytime");
    }
}
