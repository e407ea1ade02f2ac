//! ルート/キー直下のサブキー列挙
//!
//! 列挙の失敗は「キーなし」と同じ扱いで空を返す（エラーは表面化させない）。

use rkt_domain::ResolutionError;
use rkt_domain::model::RegistryRoot;
use rkt_domain::path::{PATH_DELIMITER, resolve};
use rkt_domain::port::driven::RegistryReader;

/// ルート直下のキーを `<正式名>\<サブキー>` の形で返す。
pub fn list_immediate_children(
    reader: &(impl RegistryReader + ?Sized),
    root: RegistryRoot,
) -> Vec<String> {
    list_subkeys(reader, root, "")
}

/// 任意のキー直下のサブキーを `<正式名>\<キー>\<サブキー>` の形で返す。
pub fn list_subkeys(
    reader: &(impl RegistryReader + ?Sized),
    root: RegistryRoot,
    key: &str,
) -> Vec<String> {
    let names = match reader.subkey_names(root, key) {
        Ok(names) => names,
        Err(err) => {
            tracing::warn!(%root, key, error = %err, "subkey enumeration failed; treating as empty");
            return Vec::new();
        }
    };
    let parent = if key.is_empty() {
        root.long_name().to_string()
    } else {
        format!("{}{}{}", root.long_name(), PATH_DELIMITER, key)
    };
    names
        .into_iter()
        .map(|name| format!("{parent}{PATH_DELIMITER}{name}"))
        .collect()
}

/// 生のパスを解決し、その直下のサブキーを返す。
pub fn list_children_of(
    reader: &(impl RegistryReader + ?Sized),
    raw: &str,
) -> Result<Vec<String>, ResolutionError> {
    let resolved = resolve(raw)?;
    Ok(list_subkeys(reader, resolved.root(), resolved.subpath()))
}
