//! 単一キーの問い合わせ

use rkt_domain::QueryError;
use rkt_domain::model::{LastWriteTime, ticks_to_unix_seconds};
use rkt_domain::path::{ResolvedPath, resolve};
use rkt_domain::port::driven::{Clock, RegistryReader};

/// 解決済みパスの最終書き込み時刻をローカル時刻で返す。再試行はしない。
pub fn query_last_modified(
    resolved: &ResolvedPath,
    reader: &(impl RegistryReader + ?Sized),
    clock: &(impl Clock + ?Sized),
) -> Result<LastWriteTime, QueryError> {
    let ticks = reader.last_write_ticks(resolved.root(), resolved.subpath())?;
    let local = clock
        .to_local(ticks_to_unix_seconds(ticks))
        .ok_or_else(|| {
            QueryError::HostIo(format!("last-write time out of range ({ticks} ticks)"))
        })?;
    Ok(LastWriteTime::new(ticks, local))
}

/// 生のパス文字列を解決して問い合わせる。
pub fn query_path(
    raw: &str,
    reader: &(impl RegistryReader + ?Sized),
    clock: &(impl Clock + ?Sized),
) -> Result<LastWriteTime, QueryError> {
    let resolved = resolve(raw)?;
    query_last_modified(&resolved, reader, clock)
}
