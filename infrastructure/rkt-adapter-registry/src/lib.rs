//! Windowsレジストリ読み取りアダプター
//!
//! キーを読み取り専用で開き、最終書き込み時刻とサブキー名を取得する。
//! ハンドルは `RegKeyGuard` のDropで必ず閉じる。

use rkt_domain::QueryError;
use rkt_domain::model::RegistryRoot;
use rkt_domain::port::driven::RegistryReader;

/// プラットフォーム中立のハンドル
#[cfg(windows)]
pub type RegistryAdapter = WindowsRegistryAdapter;
#[cfg(not(windows))]
pub type RegistryAdapter = NonWindowsRegistryAdapter;

#[cfg(windows)]
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsRegistryAdapter;

#[cfg(windows)]
impl WindowsRegistryAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl RegistryReader for WindowsRegistryAdapter {
    fn last_write_ticks(&self, root: RegistryRoot, subpath: &str) -> Result<u64, QueryError> {
        let key = windows_impl::open_readonly(root, subpath)?;
        let info = windows_impl::query_info(&key)?;
        tracing::trace!(%root, subpath, ticks = info.last_write_ticks, "queried key info");
        Ok(info.last_write_ticks)
    }

    fn subkey_names(&self, root: RegistryRoot, subpath: &str) -> Result<Vec<String>, QueryError> {
        let key = windows_impl::open_readonly(root, subpath)?;
        let info = windows_impl::query_info(&key)?;
        windows_impl::enumerate_subkeys(&key, info.subkey_count, info.max_subkey_len)
    }
}

#[cfg(not(windows))]
const UNSUPPORTED_PLATFORM: &str = "the Windows registry is not available on this platform";

#[cfg(not(windows))]
#[derive(Debug, Default, Clone, Copy)]
pub struct NonWindowsRegistryAdapter;

#[cfg(not(windows))]
impl NonWindowsRegistryAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(windows))]
impl RegistryReader for NonWindowsRegistryAdapter {
    fn last_write_ticks(&self, _root: RegistryRoot, _subpath: &str) -> Result<u64, QueryError> {
        Err(QueryError::HostIo(UNSUPPORTED_PLATFORM.into()))
    }

    fn subkey_names(&self, _root: RegistryRoot, _subpath: &str) -> Result<Vec<String>, QueryError> {
        Err(QueryError::HostIo(UNSUPPORTED_PLATFORM.into()))
    }
}

/// FILETIMEの上位/下位32bitを64bitティックへ結合
pub fn filetime_to_ticks(high: u32, low: u32) -> u64 {
    (u64::from(high) << 32) | u64::from(low)
}

/// Win32エラーコードを問い合わせエラーへ分類する。
pub fn classify_win32_status(code: u32) -> QueryError {
    const ERROR_FILE_NOT_FOUND: u32 = 2;
    const ERROR_PATH_NOT_FOUND: u32 = 3;
    const ERROR_ACCESS_DENIED: u32 = 5;

    match code {
        ERROR_FILE_NOT_FOUND | ERROR_PATH_NOT_FOUND => QueryError::NotFound,
        ERROR_ACCESS_DENIED => QueryError::PermissionDenied,
        _ => QueryError::HostIo(format!(
            "[WinError {}] {}",
            code,
            std::io::Error::from_raw_os_error(code as i32)
        )),
    }
}

/// キー名の最大長（終端nullを含む）
pub const MAX_KEY_NAME_BUFFER: usize = 256;

/// 名前バッファの次の長さ。上限に達していれば `None`。
pub fn grown_name_capacity(current: usize) -> Option<usize> {
    if current >= MAX_KEY_NAME_BUFFER {
        return None;
    }
    Some(current.saturating_mul(2).clamp(current + 1, MAX_KEY_NAME_BUFFER))
}

#[cfg(windows)]
mod windows_impl {
    use super::*;
    use windows::Win32::Foundation::{
        ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS, ERROR_SUCCESS, FILETIME, WIN32_ERROR,
    };
    use windows::Win32::System::Registry::{
        HKEY, HKEY_CLASSES_ROOT, HKEY_CURRENT_CONFIG, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE,
        HKEY_USERS, KEY_READ, RegCloseKey, RegEnumKeyExW, RegOpenKeyExW, RegQueryInfoKeyW,
    };
    use windows::core::{PCWSTR, PWSTR};

    /// 開いたキーのハンドル。スコープを抜けると閉じる。
    pub(super) struct RegKeyGuard(HKEY);

    impl Drop for RegKeyGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = RegCloseKey(self.0);
            }
        }
    }

    pub(super) struct KeyInfo {
        pub subkey_count: u32,
        pub max_subkey_len: u32,
        pub last_write_ticks: u64,
    }

    fn root_hkey(root: RegistryRoot) -> HKEY {
        match root {
            RegistryRoot::ClassesRoot => HKEY_CLASSES_ROOT,
            RegistryRoot::CurrentUser => HKEY_CURRENT_USER,
            RegistryRoot::LocalMachine => HKEY_LOCAL_MACHINE,
            RegistryRoot::Users => HKEY_USERS,
            RegistryRoot::CurrentConfig => HKEY_CURRENT_CONFIG,
        }
    }

    fn to_wide(s: &str) -> Vec<u16> {
        let mut wide: Vec<u16> = s.encode_utf16().collect();
        wide.push(0);
        wide
    }

    fn map_win32_error(status: WIN32_ERROR) -> QueryError {
        classify_win32_status(status.0)
    }

    pub(super) fn open_readonly(root: RegistryRoot, subpath: &str) -> Result<RegKeyGuard, QueryError> {
        let wide_path = to_wide(subpath); // API呼び出し中にVecを生存させる
        let mut key = HKEY::default();
        let status = unsafe {
            RegOpenKeyExW(
                root_hkey(root),
                PCWSTR(wide_path.as_ptr()),
                Some(0),
                KEY_READ,
                &mut key,
            )
        };
        if status != ERROR_SUCCESS {
            return Err(map_win32_error(status));
        }
        Ok(RegKeyGuard(key))
    }

    pub(super) fn query_info(key: &RegKeyGuard) -> Result<KeyInfo, QueryError> {
        let mut subkey_count: u32 = 0;
        let mut max_subkey_len: u32 = 0;
        let mut last_write = FILETIME::default();
        let status = unsafe {
            RegQueryInfoKeyW(
                key.0,
                None,
                None,
                None,
                Some(&mut subkey_count),
                Some(&mut max_subkey_len),
                None,
                None,
                None,
                None,
                None,
                Some(&mut last_write),
            )
        };
        if status != ERROR_SUCCESS {
            return Err(map_win32_error(status));
        }
        Ok(KeyInfo {
            subkey_count,
            max_subkey_len,
            last_write_ticks: filetime_to_ticks(last_write.dwHighDateTime, last_write.dwLowDateTime),
        })
    }

    pub(super) fn enumerate_subkeys(
        key: &RegKeyGuard,
        subkey_count: u32,
        max_subkey_len: u32,
    ) -> Result<Vec<String>, QueryError> {
        let mut names = Vec::with_capacity(subkey_count as usize);
        // 終端nullの分を加える
        let mut name_buf: Vec<u16> = vec![0u16; max_subkey_len as usize + 1];
        let mut index = 0;
        while index < subkey_count {
            let mut name_len = name_buf.len() as u32;
            let status = unsafe {
                RegEnumKeyExW(
                    key.0,
                    index,
                    Some(PWSTR(name_buf.as_mut_ptr())),
                    &mut name_len,
                    None, // 予約
                    None, // クラス
                    None, // クラス長
                    None, // 最終書き込み時刻
                )
            };
            if status == ERROR_NO_MORE_ITEMS {
                break; // 列挙中に削除された
            }
            if status == ERROR_MORE_DATA {
                // 列挙中に長い名前のキーが作られた。広げて同じ番号を再試行
                match grown_name_capacity(name_buf.len()) {
                    Some(len) => {
                        name_buf.resize(len, 0);
                        continue;
                    }
                    None => {
                        tracing::warn!(index, "subkey name exceeds registry limit, skipped");
                        index += 1;
                        continue;
                    }
                }
            }
            if status != ERROR_SUCCESS {
                return Err(map_win32_error(status));
            }
            names.push(String::from_utf16_lossy(&name_buf[..name_len as usize]));
            index += 1;
        }
        Ok(names)
    }
}
